//! Venue definitions and per-venue quote types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The fixed set of venues quotes are simulated for.
///
/// Variance half-widths and volume/liquidity ranges are calibrated per
/// venue: deeper books track the reference price more tightly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    Uniswap,
    SushiSwap,
    PancakeSwap,
    Curve,
    Balancer,
}

impl Venue {
    pub const ALL: [Venue; 5] = [
        Venue::Uniswap,
        Venue::SushiSwap,
        Venue::PancakeSwap,
        Venue::Curve,
        Venue::Balancer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Venue::Uniswap => "Uniswap",
            Venue::SushiSwap => "SushiSwap",
            Venue::PancakeSwap => "PancakeSwap",
            Venue::Curve => "Curve",
            Venue::Balancer => "Balancer",
        }
    }

    /// Maximum fractional deviation from the base price, one-sided.
    pub fn variance_half_width(&self) -> Decimal {
        match self {
            Venue::Uniswap => dec!(0.003),
            Venue::SushiSwap => dec!(0.005),
            Venue::PancakeSwap => dec!(0.006),
            Venue::Curve => dec!(0.004),
            Venue::Balancer => dec!(0.007),
        }
    }

    /// (min, max) simulated 24h volume in USD.
    pub fn volume_range(&self) -> (Decimal, Decimal) {
        match self {
            Venue::Uniswap => (dec!(5_000_000), dec!(15_000_000)),
            Venue::SushiSwap => (dec!(3_000_000), dec!(11_000_000)),
            Venue::PancakeSwap => (dec!(4_000_000), dec!(13_000_000)),
            Venue::Curve => (dec!(3_500_000), dec!(10_500_000)),
            Venue::Balancer => (dec!(2_000_000), dec!(8_000_000)),
        }
    }

    /// (min, max) simulated pooled liquidity in USD.
    pub fn liquidity_range(&self) -> (Decimal, Decimal) {
        match self {
            Venue::Uniswap => (dec!(10_000_000), dec!(60_000_000)),
            Venue::SushiSwap => (dec!(8_000_000), dec!(48_000_000)),
            Venue::PancakeSwap => (dec!(9_000_000), dec!(54_000_000)),
            Venue::Curve => (dec!(7_000_000), dec!(42_000_000)),
            Venue::Balancer => (dec!(6_000_000), dec!(36_000_000)),
        }
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a venue quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteProvenance {
    /// Observed from a live venue feed.
    Live,
    /// Derived from a base price by the simulator.
    Simulated,
}

/// A single per-venue price observation for one token and one fetch cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueQuote {
    pub venue: Venue,
    pub price: Decimal,
    pub volume_24h: Decimal,
    pub liquidity: Option<Decimal>,
    pub provenance: QuoteProvenance,
}
