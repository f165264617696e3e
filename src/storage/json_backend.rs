use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{errors::Result, ledger::Transaction, utils::fs::write_replacing};

use super::{decode_transactions, encode_transactions, TransactionStore};

const STORE_FILE_NAME: &str = "transactions.json";

/// Filesystem-backed JSON cache holding the full transaction list in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Stores the list as `transactions.json` under `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join(STORE_FILE_NAME),
        })
    }

    /// Uses an explicit file path instead of the default file name.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Transaction>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        decode_transactions(&data).map(Some)
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let json = encode_transactions(transactions)?;
        write_replacing(&self.path, &json)
    }
}
