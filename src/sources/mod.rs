//! Upstream price source clients
//!
//! Each upstream is a thin client behind one of two capabilities: a
//! full top-N token listing, or a single spot price. The resolution
//! engine walks ordered lists of these strategies and stops at the
//! first success.

pub mod binance;
pub mod coinbase;
pub mod coingecko;
pub mod coinmarketcap;
pub mod coinpaprika;
pub mod symbols;

pub use binance::BinanceTicker;
pub use coinbase::CoinbaseSpot;
pub use coingecko::CoinGeckoClient;
pub use coinmarketcap::{CoinMarketCapListings, CoinMarketCapQuotes};
pub use coinpaprika::CoinPaprikaTickers;
pub use symbols::token_id_to_symbol;

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use crate::network::RetryConfig;
use crate::types::{PriceOrigin, TokenQuote};

/// A source that can produce a full ranked token listing.
#[async_trait]
pub trait TokenListSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn origin(&self) -> PriceOrigin;

    /// Retry policy applied by the resolver before moving to the next
    /// source. Alternatives default to a single attempt.
    fn retry(&self) -> RetryConfig {
        RetryConfig::single_attempt()
    }

    async fn fetch_top(&self, count: usize) -> Result<Vec<TokenQuote>>;
}

/// A source that can quote a single token's USD spot price.
#[async_trait]
pub trait SpotPriceSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this source should be queried at all for the given
    /// token id. Venue sources only carry a known symbol set.
    fn supports(&self, token_id: &str) -> bool;

    async fn fetch_spot(&self, token_id: &str) -> Result<Decimal>;
}
