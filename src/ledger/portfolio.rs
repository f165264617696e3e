//! Derived portfolio views: summary totals and the chart running-balance series.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::transaction::{Transaction, TransactionType};

/// A single point of the portfolio chart. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioDataPoint {
    pub name: String,
    pub value: f64,
    /// `None` only for the placeholder point of a ledger with no completed history.
    pub timestamp: Option<DateTime<Utc>>,
}

impl PortfolioDataPoint {
    fn origin(timestamp: Option<DateTime<Utc>>) -> Self {
        Self {
            name: "0".into(),
            value: 0.0,
            timestamp,
        }
    }
}

/// Snapshot of the summary-card figures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub deposited: f64,
    pub borrowed: f64,
    pub withdrawn: f64,
    pub repaid: f64,
    pub net: f64,
}

impl PortfolioTotals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let deposited = total_deposited(transactions);
        let borrowed = total_borrowed(transactions);
        let withdrawn = total_withdrawn(transactions);
        let repaid = total_repaid(transactions);
        Self {
            deposited,
            borrowed,
            withdrawn,
            repaid,
            net: net_value(deposited, withdrawn, borrowed, repaid),
        }
    }
}

pub fn net_value(deposited: f64, withdrawn: f64, borrowed: f64, repaid: f64) -> f64 {
    (deposited - withdrawn) + (borrowed - repaid)
}

/// Completed deposits plus lends.
pub fn total_deposited(transactions: &[Transaction]) -> f64 {
    sum_completed(transactions, |kind| {
        matches!(kind, TransactionType::Deposit | TransactionType::Lend)
    })
}

pub fn total_borrowed(transactions: &[Transaction]) -> f64 {
    sum_completed(transactions, |kind| kind == TransactionType::Borrow)
}

pub fn total_withdrawn(transactions: &[Transaction]) -> f64 {
    sum_completed(transactions, |kind| kind == TransactionType::Withdraw)
}

pub fn total_repaid(transactions: &[Transaction]) -> f64 {
    sum_completed(transactions, |kind| kind == TransactionType::Repay)
}

/// Sums the amounts of completed transactions whose type satisfies `predicate`.
pub fn sum_completed<F>(transactions: &[Transaction], predicate: F) -> f64
where
    F: Fn(TransactionType) -> bool,
{
    transactions
        .iter()
        .filter(|txn| txn.is_completed() && predicate(txn.kind))
        .map(|txn| txn.amount)
        .sum()
}

/// Projects completed history into a transaction-indexed running-balance series.
///
/// `transactions` must be newest-first, as the ledger stores them. The result
/// always holds `1 + completed` points: a zero origin dated one day before the
/// first completed entry, then one point per entry with the balance clamped at
/// zero.
pub fn chart_series(transactions: &[Transaction]) -> Vec<PortfolioDataPoint> {
    // Oldest-first, so entries sharing an instant keep their insertion order.
    let mut completed: Vec<&Transaction> = transactions
        .iter()
        .rev()
        .filter(|txn| txn.is_completed())
        .collect();

    let Some(first) = completed.iter().map(|txn| txn.timestamp).min() else {
        return vec![PortfolioDataPoint::origin(None)];
    };
    completed.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let mut points = Vec::with_capacity(completed.len() + 1);
    points.push(PortfolioDataPoint::origin(Some(first - Duration::days(1))));

    let mut running_total = 0.0;
    for (index, txn) in completed.iter().enumerate() {
        running_total += txn.balance_delta();
        points.push(PortfolioDataPoint {
            name: (index + 1).to_string(),
            value: running_total.max(0.0),
            timestamp: Some(txn.timestamp),
        });
    }
    points
}
