//! Cross-venue profit calculation
//!
//! Pure and stateless: no I/O, no hidden state, identical input yields
//! identical output.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use crate::errors::{FeedError, FeedResult};
use crate::types::{ProfitEstimate, VenueQuote};

/// Finds the widest buy-low/sell-high pair in a quote set and prices a
/// round trip for the given investment.
///
/// Returns `Ok(None)` when fewer than two quotes are supplied or the
/// spread is zero (equal-priced quotes are not a loss opportunity, they
/// are no opportunity). Non-positive investments are rejected outright.
pub fn estimate_profit(
    quotes: &[VenueQuote],
    investment_usd: Decimal,
) -> FeedResult<Option<ProfitEstimate>> {
    if investment_usd <= Decimal::ZERO {
        return Err(FeedError::InvalidRequest {
            reason: format!("investment must be positive, got {}", investment_usd),
        });
    }

    if quotes.len() < 2 {
        return Ok(None);
    }

    let mut sorted: Vec<&VenueQuote> = quotes.iter().collect();
    sorted.sort_by(|a, b| a.price.cmp(&b.price));

    let low = sorted[0];
    let high = sorted[sorted.len() - 1];

    let tokens_received = investment_usd / low.price;
    let sell_value = tokens_received * high.price;
    let profit_usd = sell_value - investment_usd;

    if profit_usd <= Decimal::ZERO {
        return Ok(None);
    }

    Ok(Some(ProfitEstimate {
        source_venue: low.venue,
        target_venue: high.venue,
        buy_price: low.price,
        sell_price: high.price,
        investment_usd,
        profit_usd,
        profit_pct: profit_usd / investment_usd * dec!(100),
    }))
}
