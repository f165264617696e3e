//! Transaction ledger, its domain types, and the portfolio views derived from it.

pub mod clock;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod portfolio;
pub mod transaction;

pub use clock::{Clock, SteppingClock, SystemClock};
pub use ledger::{LedgerEvent, SubscriptionId, TransactionLedger, DEFAULT_RECENT_LIMIT};
pub use portfolio::{PortfolioDataPoint, PortfolioTotals};
pub use transaction::{NewTransaction, Transaction, TransactionStatus, TransactionType};
