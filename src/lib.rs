#![doc(test(attr(deny(warnings))))]

//! LenDiverse Core holds the transaction ledger behind the lending dashboard:
//! recording deposits, withdrawals, loans and repayments, deriving portfolio
//! totals and chart series, and caching history as local JSON.

pub mod config;
pub mod errors;
pub mod ledger;
pub mod market;
pub mod storage;
pub mod utils;
pub mod wallet;

use std::sync::Once;

pub use errors::LedgerError;
pub use ledger::{NewTransaction, Transaction, TransactionLedger};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing with the default filter and emits a startup info log.
pub fn init() {
    init_with_config(&config::Config::default());
}

/// Initializes global tracing using `config.log_filter`. Only the first call takes effect.
pub fn init_with_config(config: &config::Config) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing_with_filter(&config.log_filter);
        tracing::info!(filter = %config.log_filter, "LenDiverse Core tracing initialized.");
    });
}

/// Opens the ledger described by `config`, backed by a JSON file in its storage directory.
pub fn open_ledger(config: &config::Config) -> errors::Result<TransactionLedger> {
    let store = storage::JsonFileStore::new(config.resolve_storage_dir())?;
    tracing::info!(
        path = %store.path().display(),
        recent_limit = config.recent_limit,
        "opening transaction ledger"
    );
    Ok(TransactionLedger::with_system_clock(Box::new(store))
        .with_recent_limit(config.recent_limit))
}
