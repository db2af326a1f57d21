//! Token quote and snapshot types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A normalized token price observation from one fetch cycle.
///
/// Immutable once produced; a refresh supersedes the whole snapshot
/// rather than mutating individual quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenQuote {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub current_price: Decimal,
    pub market_cap: Decimal,
    pub price_change_24h: Decimal,
}

/// Which upstream produced a token snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceOrigin {
    CoinGecko,
    CoinMarketCap,
    CoinPaprika,
    Fallback,
}

impl PriceOrigin {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, PriceOrigin::Fallback)
    }
}

/// A full top-N token list together with its provenance.
#[derive(Debug, Clone, Serialize)]
pub struct TokenSnapshot {
    pub tokens: Vec<TokenQuote>,
    pub origin: PriceOrigin,
}

/// Daily close series for one token, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct PriceHistory {
    pub token_id: String,
    /// (unix millis, usd price) pairs
    pub prices: Vec<(i64, Decimal)>,
    pub synthetic: bool,
}
