//! Arbitrage detection and profit calculation

pub mod calculator;

pub use calculator::estimate_profit;
