//! Per-venue quote simulation
//!
//! Stands in for real DEX connectivity: given a resolved base price it
//! fabricates one quote per venue with bounded variance. A live
//! on-chain quote fetcher can replace it behind the same trait without
//! touching the detector or aggregator.

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use crate::errors::{FeedError, FeedResult};
use crate::types::{QuoteProvenance, Venue, VenueQuote};
use crate::utils::math::{jittered, uniform_between};

/// The seam a real quote source would implement.
#[async_trait]
pub trait VenueQuoteProvider: Send + Sync {
    async fn quotes_for(&self, base_price: Decimal) -> Result<Vec<VenueQuote>>;
}

/// Deterministic in structure (always the five fixed venues), random
/// in value within each venue's variance band.
pub struct SimulatedVenueBook;

impl SimulatedVenueBook {
    pub fn simulate(&self, base_price: Decimal) -> FeedResult<Vec<VenueQuote>> {
        if base_price <= Decimal::ZERO {
            return Err(FeedError::InvalidRequest {
                reason: format!("base price must be positive, got {}", base_price),
            });
        }

        Ok(Venue::ALL
            .iter()
            .map(|&venue| {
                let (vol_lo, vol_hi) = venue.volume_range();
                let (liq_lo, liq_hi) = venue.liquidity_range();
                VenueQuote {
                    venue,
                    price: jittered(base_price, venue.variance_half_width()),
                    volume_24h: uniform_between(vol_lo, vol_hi),
                    liquidity: Some(uniform_between(liq_lo, liq_hi)),
                    provenance: QuoteProvenance::Simulated,
                }
            })
            .collect())
    }
}

#[async_trait]
impl VenueQuoteProvider for SimulatedVenueBook {
    async fn quotes_for(&self, base_price: Decimal) -> Result<Vec<VenueQuote>> {
        Ok(self.simulate(base_price)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn produces_all_five_venues_once() {
        let quotes = SimulatedVenueBook.simulate(dec!(1000)).unwrap();
        assert_eq!(quotes.len(), 5);
        for venue in Venue::ALL {
            assert_eq!(quotes.iter().filter(|q| q.venue == venue).count(), 1);
        }
    }

    #[test]
    fn quotes_stay_within_venue_variance_band() {
        let base = dec!(1000);
        for _ in 0..200 {
            for quote in SimulatedVenueBook.simulate(base).unwrap() {
                let hw = quote.venue.variance_half_width();
                assert!(quote.price >= base * (dec!(1) - hw), "{:?}", quote);
                assert!(quote.price <= base * (dec!(1) + hw), "{:?}", quote);
            }
        }
    }

    #[test]
    fn quotes_are_marked_simulated() {
        for quote in SimulatedVenueBook.simulate(dec!(42)).unwrap() {
            assert_eq!(quote.provenance, QuoteProvenance::Simulated);
        }
    }

    #[test]
    fn volume_and_liquidity_respect_venue_ranges() {
        for quote in SimulatedVenueBook.simulate(dec!(250)).unwrap() {
            let (vol_lo, vol_hi) = quote.venue.volume_range();
            assert!(quote.volume_24h >= vol_lo && quote.volume_24h < vol_hi);
            let liquidity = quote.liquidity.unwrap();
            let (liq_lo, liq_hi) = quote.venue.liquidity_range();
            assert!(liquidity >= liq_lo && liquidity < liq_hi);
        }
    }

    #[test]
    fn non_positive_base_price_is_rejected() {
        assert!(SimulatedVenueBook.simulate(dec!(0)).is_err());
        assert!(SimulatedVenueBook.simulate(dec!(-5)).is_err());
    }

    proptest! {
        #[test]
        fn any_positive_base_price_yields_bounded_quotes(base_cents in 1u64..100_000_000) {
            let base = Decimal::from(base_cents) / dec!(100);
            let quotes = SimulatedVenueBook.simulate(base).unwrap();
            prop_assert_eq!(quotes.len(), 5);
            for quote in quotes {
                let hw = quote.venue.variance_half_width();
                prop_assert!(quote.price >= base * (dec!(1) - hw));
                prop_assert!(quote.price <= base * (dec!(1) + hw));
                prop_assert!(quote.price > Decimal::ZERO);
            }
        }
    }
}
