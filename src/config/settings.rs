//! Scanner configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::str::FromStr;

// Configuration constants
pub const MIN_INVESTMENT_USD: Decimal = dec!(1);
pub const MAX_INVESTMENT_USD: Decimal = dec!(1_000_000);
pub const DEFAULT_INVESTMENT_USD: Decimal = dec!(1000);

pub const CACHE_TTL_SECS: u64 = 60;
pub const LIST_TIMEOUT_SECS: u64 = 10;
pub const SPOT_TIMEOUT_SECS: u64 = 5;

// Retry constants for the primary list source
pub const PRIMARY_MAX_ATTEMPTS: u32 = 3;
pub const PRIMARY_BASE_DELAY_MS: u64 = 1000;

// Aggregator pacing
pub const DEFAULT_CHUNK_SIZE: usize = 3;
pub const DEFAULT_CHUNK_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct Config {
    /// Notional USD amount evaluated per opportunity.
    pub investment_usd: Decimal,
    /// How many tokens each scan ranks.
    pub scan_limit: usize,
    /// Seconds between monitor scans.
    pub refresh_interval_secs: u64,
    /// Snapshot cache time-to-live.
    pub cache_ttl_secs: u64,
    /// Tokens resolved concurrently per chunk.
    pub chunk_size: usize,
    /// Pause between chunks, in milliseconds.
    pub chunk_delay_ms: u64,
    /// Primary source retry policy.
    pub primary_max_attempts: u32,
    pub primary_base_delay_ms: u64,
    /// Optional CoinMarketCap credential; the CMC source is skipped
    /// entirely when absent.
    pub coinmarketcap_api_key: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            investment_usd: env::var("INVESTMENT_USD")
                .ok()
                .and_then(|s| Decimal::from_str(&s).ok())
                .unwrap_or(DEFAULT_INVESTMENT_USD)
                .max(MIN_INVESTMENT_USD)
                .min(MAX_INVESTMENT_USD),
            scan_limit: env::var("SCAN_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10)
                .clamp(1, 250),
            refresh_interval_secs: env::var("REFRESH_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60)
                .max(5),
            cache_ttl_secs: env::var("CACHE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(CACHE_TTL_SECS),
            chunk_size: env::var("CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_SIZE)
                .clamp(1, 10),
            chunk_delay_ms: env::var("CHUNK_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_DELAY_MS),
            primary_max_attempts: env::var("PRIMARY_MAX_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(PRIMARY_MAX_ATTEMPTS)
                .clamp(1, 10),
            primary_base_delay_ms: env::var("PRIMARY_BASE_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(PRIMARY_BASE_DELAY_MS),
            coinmarketcap_api_key: env::var("COINMARKETCAP_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            investment_usd: DEFAULT_INVESTMENT_USD,
            scan_limit: 10,
            refresh_interval_secs: 60,
            cache_ttl_secs: CACHE_TTL_SECS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay_ms: DEFAULT_CHUNK_DELAY_MS,
            primary_max_attempts: PRIMARY_MAX_ATTEMPTS,
            primary_base_delay_ms: PRIMARY_BASE_DELAY_MS,
            coinmarketcap_api_key: None,
        }
    }
}
