//! Presentation-neutral labels for the transaction table and summary cards.

use chrono::{DateTime, Utc};

use crate::ledger::{Transaction, TransactionType};

/// Amount with a direction sign and four decimals, e.g. `-0.2500`.
///
/// Withdrawals and borrowings read as outflows in the history table.
pub fn signed_amount(transaction: &Transaction) -> String {
    let sign = match transaction.kind {
        TransactionType::Withdraw | TransactionType::Borrow => '-',
        _ => '+',
    };
    format!("{sign}{:.4}", transaction.amount)
}

/// Short month, day, and 12-hour time, e.g. `Jan 5, 03:04 PM`.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %I:%M %p").to_string()
}

/// Dollar figure with two decimals, e.g. `$1234.50` or `-$3.00`.
pub fn format_usd(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}

/// Capitalized type label for toasts and table cells.
pub fn type_label(kind: TransactionType) -> String {
    let raw = kind.as_str();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionStatus;
    use chrono::TimeZone;

    fn txn(kind: TransactionType, amount: f64) -> Transaction {
        Transaction {
            id: "tx-1".into(),
            kind,
            amount,
            asset: "ETH".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap(),
            address: "0xabc".into(),
            status: TransactionStatus::Completed,
        }
    }

    #[test]
    fn outflows_are_negative() {
        assert_eq!(signed_amount(&txn(TransactionType::Borrow, 0.25)), "-0.2500");
        assert_eq!(signed_amount(&txn(TransactionType::Withdraw, 1.0)), "-1.0000");
        assert_eq!(signed_amount(&txn(TransactionType::Repay, 2.0)), "+2.0000");
        assert_eq!(signed_amount(&txn(TransactionType::Lend, 3.5)), "+3.5000");
    }

    #[test]
    fn timestamps_use_short_month_and_twelve_hour_clock() {
        let entry = txn(TransactionType::Deposit, 1.0);
        assert_eq!(format_timestamp(entry.timestamp), "Jan 5, 03:04 PM");
    }

    #[test]
    fn usd_keeps_two_decimals() {
        assert_eq!(format_usd(1234.5), "$1234.50");
        assert_eq!(format_usd(-3.0), "-$3.00");
        assert_eq!(format_usd(0.0), "$0.00");
    }

    #[test]
    fn type_labels_are_capitalized() {
        assert_eq!(type_label(TransactionType::Withdraw), "Withdraw");
    }
}
