//! Simulated wallet provider: the source of the address stamped on each transaction.

use std::sync::{Arc, Mutex};

type AccountsListener = Arc<dyn Fn(&[String]) + Send + Sync>;

/// Account-list query plus account-change notification, as exposed by an injected wallet.
pub trait WalletProvider: Send + Sync {
    fn accounts(&self) -> Vec<String>;

    fn on_accounts_changed(&self, listener: Box<dyn Fn(&[String]) + Send + Sync>);

    /// First connected account, if any.
    fn primary_account(&self) -> Option<String> {
        self.accounts().into_iter().next()
    }

    fn is_connected(&self) -> bool {
        self.primary_account().is_some()
    }
}

/// In-process wallet whose accounts are set by the host.
#[derive(Clone, Default)]
pub struct SimulatedWallet {
    inner: Arc<Mutex<WalletState>>,
}

#[derive(Default)]
struct WalletState {
    accounts: Vec<String>,
    listeners: Vec<AccountsListener>,
}

impl SimulatedWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected(account: impl Into<String>) -> Self {
        let wallet = Self::new();
        wallet.set_accounts(vec![account.into()]);
        wallet
    }

    /// Replaces the account list and notifies listeners when it actually changed.
    pub fn set_accounts(&self, accounts: Vec<String>) {
        let listeners = {
            let mut state = self.lock();
            if state.accounts == accounts {
                return;
            }
            state.accounts = accounts.clone();
            state.listeners.clone()
        };
        tracing::debug!(count = accounts.len(), "wallet accounts changed");
        // Called without the lock held so listeners may query the wallet.
        for listener in &listeners {
            listener(&accounts);
        }
    }

    pub fn disconnect(&self) {
        self.set_accounts(Vec::new());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WalletState> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WalletProvider for SimulatedWallet {
    fn accounts(&self) -> Vec<String> {
        self.lock().accounts.clone()
    }

    fn on_accounts_changed(&self, listener: Box<dyn Fn(&[String]) + Send + Sync>) {
        self.lock().listeners.push(Arc::from(listener));
    }
}

/// Shortens `0x71C7656EC7ab88b098defB751B7401B5f6d8976F` to `0x71C7...976F`.
pub fn truncate_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
