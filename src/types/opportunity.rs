//! Arbitrage opportunity types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use super::{TokenQuote, Venue};

/// Raw output of the profit calculator for one quote set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfitEstimate {
    pub source_venue: Venue,
    pub target_venue: Venue,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub investment_usd: Decimal,
    pub profit_usd: Decimal,
    pub profit_pct: Decimal,
}

/// A detected cross-venue price discrepancy, profitable for the
/// evaluated investment amount. Recomputed on every scan, never cached.
#[derive(Debug, Clone, Serialize)]
pub struct ArbitrageOpportunity {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub token: TokenQuote,
    pub source_venue: Venue,
    pub target_venue: Venue,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub investment_usd: Decimal,
    pub profit_usd: Decimal,
    pub profit_pct: Decimal,
    /// True when the underlying prices came from the fallback table
    /// rather than a live source.
    pub synthetic: bool,
}

impl ArbitrageOpportunity {
    pub fn from_estimate(token: TokenQuote, estimate: ProfitEstimate, synthetic: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            token,
            source_venue: estimate.source_venue,
            target_venue: estimate.target_venue,
            buy_price: estimate.buy_price,
            sell_price: estimate.sell_price,
            investment_usd: estimate.investment_usd,
            profit_usd: estimate.profit_usd,
            profit_pct: estimate.profit_pct,
            synthetic,
        }
    }
}
