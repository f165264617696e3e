//! Domain model for ledger transactions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

/// An immutable ledger entry. Created only through [`super::TransactionLedger::record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub asset: String,
    pub timestamp: DateTime<Utc>,
    pub address: String,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Signed effect of this entry on the running portfolio balance.
    pub fn balance_delta(&self) -> f64 {
        if self.kind.increases_balance() {
            self.amount
        } else {
            -self.amount
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdraw,
    Lend,
    Borrow,
    Repay,
}

impl TransactionType {
    pub const ALL: [TransactionType; 5] = [
        TransactionType::Deposit,
        TransactionType::Withdraw,
        TransactionType::Lend,
        TransactionType::Borrow,
        TransactionType::Repay,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdraw => "withdraw",
            TransactionType::Lend => "lend",
            TransactionType::Borrow => "borrow",
            TransactionType::Repay => "repay",
        }
    }

    /// Deposits, loans and borrowings grow the running balance; the rest shrink it.
    pub fn increases_balance(self) -> bool {
        matches!(
            self,
            TransactionType::Deposit | TransactionType::Lend | TransactionType::Borrow
        )
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        TransactionType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| LedgerError::UnknownType(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Enumerates the lifecycle state of a transaction.
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Failed => "Failed",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionStatus {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            _ => Err(LedgerError::UnknownStatus(value.to_string())),
        }
    }
}

/// Caller-supplied fields of a transaction; the ledger adds `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: f64,
    pub asset: String,
    pub address: String,
    pub status: TransactionStatus,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionType,
        amount: f64,
        asset: impl Into<String>,
        address: impl Into<String>,
        status: TransactionStatus,
    ) -> Self {
        Self {
            kind,
            amount,
            asset: asset.into(),
            address: address.into(),
            status,
        }
    }

    pub fn completed(
        kind: TransactionType,
        amount: f64,
        asset: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self::new(kind, amount, asset, address, TransactionStatus::Completed)
    }

    /// Builds a request from untyped form values, rejecting anything outside the closed sets.
    pub fn parse(
        kind: &str,
        amount: f64,
        asset: impl Into<String>,
        address: impl Into<String>,
        status: &str,
    ) -> Result<Self> {
        let request = Self::new(kind.parse()?, amount, asset, address, status.parse()?);
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount)
    }

    pub(crate) fn into_transaction(self, id: String, timestamp: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            asset: self.asset,
            timestamp,
            address: self.address,
            status: self.status,
        }
    }
}

pub fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}

/// Creates an id of the form `tx-<unix millis>-<random suffix>`.
pub fn generate_id(timestamp: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("tx-{}-{}", timestamp.timestamp_millis(), &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_types_case_insensitively() {
        assert_eq!(
            "Deposit".parse::<TransactionType>().unwrap(),
            TransactionType::Deposit
        );
        assert_eq!(
            " repay ".parse::<TransactionType>().unwrap(),
            TransactionType::Repay
        );
    }

    #[test]
    fn rejects_unknown_type_and_status() {
        let err = NewTransaction::parse("stake", 1.0, "ETH", "0xabc", "completed")
            .expect_err("stake is not a ledger type");
        assert!(matches!(err, LedgerError::UnknownType(ref value) if value == "stake"));

        let err = NewTransaction::parse("deposit", 1.0, "ETH", "0xabc", "settled")
            .expect_err("settled is not a ledger status");
        assert!(matches!(err, LedgerError::UnknownStatus(_)));
    }

    #[test]
    fn rejects_non_positive_and_non_finite_amounts() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = NewTransaction::parse("deposit", amount, "ETH", "0xabc", "completed")
                .expect_err("amount must be rejected");
            assert!(matches!(err, LedgerError::InvalidAmount(_)));
        }
    }

    #[test]
    fn serializes_with_lowercase_enums_and_type_key() {
        let txn = Transaction {
            id: "tx-1-abc".into(),
            kind: TransactionType::Borrow,
            amount: 2.5,
            asset: "BTC".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            address: "0xabc".into(),
            status: TransactionStatus::Pending,
        };
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "borrow");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["timestamp"], "2024-03-01T12:00:00Z");
    }

    #[test]
    fn generated_ids_embed_the_creation_millis() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let id = generate_id(at);
        assert!(id.starts_with(&format!("tx-{}-", at.timestamp_millis())));
        assert_ne!(generate_id(at), generate_id(at));
    }

    #[test]
    fn balance_delta_follows_type() {
        let mut txn = NewTransaction::completed(TransactionType::Repay, 3.0, "ETH", "0xabc")
            .into_transaction("tx".into(), Utc::now());
        assert_eq!(txn.balance_delta(), -3.0);
        txn.kind = TransactionType::Borrow;
        assert_eq!(txn.balance_delta(), 3.0);
    }
}
