//! DEX Arbitrage Scanner - Multi-source price aggregation and
//! cross-venue arbitrage detection
//!
//! The engine resolves token prices from a chain of upstream APIs with
//! retry and fallback, simulates per-venue quote variance, and reports
//! profitable cross-venue spreads for a notional investment.

pub mod aggregator;
pub mod arbitrage;
pub mod cache;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fallback;
pub mod network;
pub mod simulator;
pub mod sources;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use aggregator::OpportunityAggregator;
pub use config::{Config, CONFIG};
pub use engine::PriceResolver;
pub use errors::{FeedError, FeedResult};
pub use types::*;
