pub mod json_backend;

use std::{collections::HashSet, sync::Mutex};

use crate::{
    errors::{LedgerError, Result},
    ledger::{transaction::validate_amount, Transaction},
};

/// Abstraction over durable caches of the transaction list.
///
/// A store holds a full snapshot; every save replaces the previous one.
pub trait TransactionStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<Vec<Transaction>>>;
    fn save(&self, transactions: &[Transaction]) -> Result<()>;
}

/// Serializes a snapshot into the persisted JSON array layout.
pub fn encode_transactions(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string_pretty(transactions)?)
}

/// Parses and validates a persisted snapshot. Any malformed entry rejects the whole payload.
pub fn decode_transactions(data: &str) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_str(data)?;
    let mut seen = HashSet::with_capacity(transactions.len());
    for txn in &transactions {
        validate_amount(txn.amount)?;
        if !seen.insert(txn.id.as_str()) {
            return Err(LedgerError::DuplicateId(txn.id.clone()));
        }
    }
    Ok(transactions)
}

/// In-process store that keeps the encoded snapshot, mirroring what a file store would hold.
#[derive(Debug, Default)]
pub struct MemoryStore {
    payload: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a raw payload, valid or not.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Mutex::new(Some(payload.into())),
        }
    }

    pub fn payload(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.payload
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TransactionStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Transaction>>> {
        match self.lock().as_deref() {
            Some(data) => decode_transactions(data).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let encoded = encode_transactions(transactions)?;
        *self.lock() = Some(encoded);
        Ok(())
    }
}

pub use json_backend::JsonFileStore;
