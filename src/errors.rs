use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid amount: {0} (amounts must be positive and finite)")]
    InvalidAmount(f64),
    #[error("Unknown transaction type: `{0}`")]
    UnknownType(String),
    #[error("Unknown transaction status: `{0}`")]
    UnknownStatus(String),
    #[error("Duplicate transaction id: {0}")]
    DuplicateId(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
