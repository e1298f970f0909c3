use serde::{Deserialize, Serialize};

/// A single row scraped from the trending page.
///
/// Every field is optional: a row fragment that lacks one of the known markup
/// pieces still produces a record, with that field left as `None`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendingRecord {
    pub rank: Option<u32>,
    pub chain: Option<String>,
    pub pair_id: Option<String>,
    pub token_logo_url: Option<String>,
    pub base_symbol: Option<String>,
    pub base_name: Option<String>,
    pub price_usd: Option<String>,
    pub pct_change_24h: Option<String>,
}

/// A single match returned by the search API.
///
/// Same shape as [`TrendingRecord`], plus the 7 day change the API reports.
///
/// [`TrendingRecord`]: ./struct.TrendingRecord.html
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHit {
    pub rank: Option<u32>,
    pub chain: Option<String>,
    pub pair_id: Option<String>,
    pub token_logo_url: Option<String>,
    pub base_symbol: Option<String>,
    pub base_name: Option<String>,
    pub price_usd: Option<String>,
    pub pct_change_24h: Option<String>,
    pub pct_change_7d: Option<String>,
}

/// One `(timestamp, price)` sample of a price history.
///
/// Upstream encodes these as two element arrays, e.g., `[1718000000000, 1.52]`;
/// see [`crate::de`] for the deserializer.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// The common record shape both sources are reduced to before display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCoin {
    pub label: String,
    pub chain: String,
    pub pair_id: String,
    pub logo: Option<String>,
    pub name: String,
    pub symbol: String,
    pub price_usd: Option<String>,
    pub pct_24h: Option<String>,
    pub pct_7d: Option<String>,
}

impl NormalizedCoin {
    /// The chain and pair to chart, when the row carried both.
    pub fn chart_target(&self) -> Option<(&str, &str)> {
        let chain = self.chain.trim();
        let pair_id = self.pair_id.trim();
        (!chain.is_empty() && !pair_id.is_empty()).then_some((chain, pair_id))
    }
}
