use std::{collections::HashSet, fmt};

use chrono::{DateTime, Utc};

use super::{
    clock::{Clock, SystemClock},
    portfolio::{self, PortfolioDataPoint, PortfolioTotals},
    transaction::{generate_id, NewTransaction, Transaction, TransactionType},
};
use crate::{errors::Result, storage::TransactionStore};

pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Change notification emitted after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    Recorded { id: String, version: u64 },
    Reloaded { count: usize, version: u64 },
}

impl LedgerEvent {
    pub fn version(&self) -> u64 {
        match self {
            LedgerEvent::Recorded { version, .. } | LedgerEvent::Reloaded { version, .. } => {
                *version
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&LedgerEvent) + Send + Sync>;

/// Owns the session's transaction history and derives every dashboard view from it.
///
/// Entries are kept newest-first. The store is a cache: it is read once on
/// [`TransactionLedger::open`] (or on [`TransactionLedger::reload`]) and
/// overwritten with the full list after each mutation.
pub struct TransactionLedger {
    transactions: Vec<Transaction>,
    ids: HashSet<String>,
    version: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    recent_limit: usize,
    store: Box<dyn TransactionStore>,
    clock: Box<dyn Clock>,
}

impl TransactionLedger {
    /// Opens a ledger over `store`, restoring any persisted history.
    ///
    /// Unreadable or malformed persisted state is logged and discarded; the
    /// ledger then starts empty.
    pub fn open(store: Box<dyn TransactionStore>, clock: Box<dyn Clock>) -> Self {
        let mut ledger = Self {
            transactions: Vec::new(),
            ids: HashSet::new(),
            version: 0,
            listeners: Vec::new(),
            next_subscription: 0,
            recent_limit: DEFAULT_RECENT_LIMIT,
            store,
            clock,
        };
        let restored = ledger.load_from_store();
        ledger.replace_all(restored);
        ledger
    }

    pub fn with_system_clock(store: Box<dyn TransactionStore>) -> Self {
        Self::open(store, Box::new(SystemClock))
    }

    /// Sets how many entries [`TransactionLedger::recent_default`] returns. Zero is raised to one.
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit.max(1);
        self
    }

    pub fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// Appends a new entry at the head and persists the updated list.
    ///
    /// Fails only for amounts that are not positive and finite. Persistence
    /// failures are logged and do not affect the in-memory ledger.
    pub fn record(&mut self, request: NewTransaction) -> Result<Transaction> {
        request.validate()?;

        let timestamp = self.next_timestamp();
        let mut id = generate_id(timestamp);
        while self.ids.contains(&id) {
            id = generate_id(timestamp);
        }

        let transaction = request.into_transaction(id, timestamp);
        self.ids.insert(transaction.id.clone());
        self.transactions.insert(0, transaction.clone());
        self.version += 1;
        tracing::debug!(
            id = %transaction.id,
            kind = %transaction.kind,
            amount = transaction.amount,
            asset = %transaction.asset,
            status = %transaction.status,
            "recorded transaction"
        );

        self.persist();
        self.notify(&LedgerEvent::Recorded {
            id: transaction.id.clone(),
            version: self.version,
        });
        Ok(transaction)
    }

    /// Discards in-memory state in favor of whatever the store currently holds.
    pub fn reload(&mut self) {
        let restored = self.load_from_store();
        self.replace_all(restored);
        self.version += 1;
        self.notify(&LedgerEvent::Reloaded {
            count: self.transactions.len(),
            version: self.version,
        });
    }

    /// Sums completed amounts whose type satisfies `predicate`.
    pub fn total_for<F>(&self, predicate: F) -> f64
    where
        F: Fn(TransactionType) -> bool,
    {
        portfolio::sum_completed(&self.transactions, predicate)
    }

    /// Deposits plus lends.
    pub fn total_deposited(&self) -> f64 {
        portfolio::total_deposited(&self.transactions)
    }

    pub fn total_borrowed(&self) -> f64 {
        portfolio::total_borrowed(&self.transactions)
    }

    pub fn total_withdrawn(&self) -> f64 {
        portfolio::total_withdrawn(&self.transactions)
    }

    pub fn total_repaid(&self) -> f64 {
        portfolio::total_repaid(&self.transactions)
    }

    pub fn net_portfolio_value(&self) -> f64 {
        self.totals().net
    }

    pub fn totals(&self) -> PortfolioTotals {
        PortfolioTotals::from_transactions(&self.transactions)
    }

    /// Up to `limit` entries, most recent first. Ties keep their stored order.
    pub fn recent(&self, limit: usize) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sorted.truncate(limit);
        sorted
    }

    /// The recent-activity view at the configured limit.
    pub fn recent_default(&self) -> Vec<Transaction> {
        self.recent(self.recent_limit)
    }

    pub fn chart_series(&self) -> Vec<PortfolioDataPoint> {
        portfolio::chart_series(&self.transactions)
    }

    /// Full history, newest-first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Incremented on every mutation; consumers compare it to decide whether to re-pull views.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&LedgerEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        match self.transactions.first() {
            Some(head) if head.timestamp > now => {
                tracing::debug!(%now, head = %head.timestamp, "clock behind ledger head");
                head.timestamp
            }
            _ => now,
        }
    }

    fn load_from_store(&self) -> Vec<Transaction> {
        match self.store.load() {
            Ok(Some(mut transactions)) => {
                // Persisted order is newest-first; re-establish it if the cache was edited by hand.
                transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                tracing::info!(count = transactions.len(), "restored persisted transactions");
                transactions
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::error!(error = %err, "failed to parse saved transactions; starting empty");
                Vec::new()
            }
        }
    }

    fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.ids = transactions.iter().map(|txn| txn.id.clone()).collect();
        self.transactions = transactions;
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.transactions) {
            tracing::warn!(error = %err, "failed to persist transactions; keeping in-memory state");
        }
    }

    fn notify(&self, event: &LedgerEvent) {
        for (_, listener) in &self.listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for TransactionLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionLedger")
            .field("transactions", &self.transactions.len())
            .field("version", &self.version)
            .field("recent_limit", &self.recent_limit)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
