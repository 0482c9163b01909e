use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How many gainers/losers the market view lists.
pub const TOP_MOVERS_LIMIT: usize = 5;

/// Latest level of a market index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    pub value: f64,

    /// Intraday change in percent
    pub change: f64,
}

impl IndexQuote {
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// A single stock in the movers lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub name: String,
    pub price: f64,

    /// Intraday change in percent
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Movers {
    #[serde(default)]
    pub gainers: Vec<StockQuote>,
    #[serde(default)]
    pub losers: Vec<StockQuote>,
}

/// Response of `GET /market`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Index display name (e.g., "S&P 500") → quote
    #[serde(default)]
    pub indices: BTreeMap<String, IndexQuote>,

    #[serde(default)]
    pub movers: Movers,
}
