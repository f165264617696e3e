#![allow(dead_code)]

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use lendiverse_core::{
    ledger::{SteppingClock, TransactionStatus, TransactionType},
    storage::{JsonFileStore, MemoryStore},
    NewTransaction, TransactionLedger,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const ADDRESS: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 1, 8, 30, 0).unwrap()
}

pub fn minute_clock() -> Box<SteppingClock> {
    Box::new(SteppingClock::new(epoch(), Duration::minutes(1)))
}

pub fn memory_ledger() -> TransactionLedger {
    TransactionLedger::open(Box::new(MemoryStore::new()), minute_clock())
}

/// Creates a unique directory for the current test and returns a JSON store inside it.
pub fn temp_store() -> JsonFileStore {
    let temp = TempDir::new().expect("create temp dir");
    let store = JsonFileStore::new(temp.path().join("ledger")).expect("create json store");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    store
}

pub fn request(kind: TransactionType, amount: f64, status: TransactionStatus) -> NewTransaction {
    NewTransaction::new(kind, amount, "ETH", ADDRESS, status)
}

/// Deterministic mix of every type and status, for property-style checks.
pub fn mixed_requests(count: usize, seed: u64) -> Vec<NewTransaction> {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let statuses = [
        TransactionStatus::Completed,
        TransactionStatus::Completed,
        TransactionStatus::Pending,
        TransactionStatus::Failed,
    ];
    (0..count)
        .map(|_| {
            let kind = TransactionType::ALL[(next() % 5) as usize];
            let status = statuses[(next() % 4) as usize];
            let amount = 1.0 + (next() % 10_000) as f64 / 100.0;
            request(kind, amount, status)
        })
        .collect()
}
