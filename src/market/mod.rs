//! Lending market rates shown on the overview cards, and the assets the forms offer.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Assets selectable in the deposit/withdraw/lend/borrow forms.
pub const SUPPORTED_ASSETS: [&str; 4] = ["ETH", "BTC", "USDC", "USDT"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRate {
    pub name: String,
    pub symbol: String,
    /// Annual percentage yield paid to depositors.
    pub deposit_apy: f64,
    /// Annual percentage rate charged to borrowers.
    pub borrow_apr: f64,
}

impl MarketRate {
    fn new(name: &str, symbol: &str, deposit_apy: f64, borrow_apr: f64) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            deposit_apy,
            borrow_apr,
        }
    }

    pub fn spread(&self) -> f64 {
        self.borrow_apr - self.deposit_apy
    }
}

/// Featured pairing on the overview's recommendation card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    /// Deposit and borrow legs, formatted `DEPOSIT-BORROW`.
    pub pair: String,
    /// Net annual yield of the pairing, in percent.
    pub net_apy: f64,
}

impl Opportunity {
    pub fn legs(&self) -> Option<(&str, &str)> {
        self.pair.split_once('-')
    }
}

static OPPORTUNITY: Lazy<Opportunity> = Lazy::new(|| Opportunity {
    pair: "ETH-USDC".into(),
    net_apy: 8.1,
});

static RATES: Lazy<Vec<MarketRate>> = Lazy::new(|| {
    vec![
        MarketRate::new("Bitcoin", "BTC", 1.2, 4.5),
        MarketRate::new("Ethereum", "ETH", 3.2, 5.8),
        MarketRate::new("USD Coin", "USDC", 5.4, 7.9),
    ]
});

pub fn rates() -> &'static [MarketRate] {
    &RATES
}

pub fn rate_for(symbol: &str) -> Option<&'static MarketRate> {
    let symbol = symbol.trim();
    RATES
        .iter()
        .find(|rate| rate.symbol.eq_ignore_ascii_case(symbol))
}

pub fn is_supported_asset(symbol: &str) -> bool {
    let symbol = symbol.trim();
    SUPPORTED_ASSETS
        .iter()
        .any(|asset| asset.eq_ignore_ascii_case(symbol))
}

/// Market paying the highest deposit yield.
pub fn top_deposit() -> Option<&'static MarketRate> {
    RATES
        .iter()
        .max_by(|a, b| a.deposit_apy.total_cmp(&b.deposit_apy))
}

/// Market with the cheapest borrowing rate.
pub fn top_borrow() -> Option<&'static MarketRate> {
    RATES
        .iter()
        .min_by(|a, b| a.borrow_apr.total_cmp(&b.borrow_apr))
}

pub fn opportunity() -> &'static Opportunity {
    &OPPORTUNITY
}
