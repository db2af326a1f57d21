//! Ordered-fallback price resolution

use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;
use tracing::{debug, info, warn};
use crate::cache::PriceCache;
use crate::config::Config;
use crate::errors::{FeedError, FeedResult};
use crate::fallback;
use crate::network::retry_with_backoff;
use crate::sources::{
    BinanceTicker, CoinGeckoClient, CoinMarketCapListings, CoinMarketCapQuotes,
    CoinPaprikaTickers, CoinbaseSpot, SpotPriceSource, TokenListSource,
};
use crate::types::{PriceOrigin, TokenSnapshot};
use crate::utils::math::jittered;

/// Exchanges reported by [`PriceResolver::exchange_prices`], with the
/// variance half-width applied to each. DEX books run a little wider
/// than the centralized ones.
const COMPARISON_EXCHANGES: [(&str, Decimal); 7] = [
    ("Binance", dec!(0.01)),
    ("Coinbase", dec!(0.01)),
    ("Kraken", dec!(0.01)),
    ("Huobi", dec!(0.01)),
    ("KuCoin", dec!(0.01)),
    ("Uniswap", dec!(0.015)),
    ("SushiSwap", dec!(0.015)),
];

/// Orchestrates the source chain: cache, then each listing source in
/// priority order, then the static fallback table. Every public
/// operation degrades instead of propagating upstream failures.
pub struct PriceResolver {
    cache: PriceCache,
    list_sources: Vec<Box<dyn TokenListSource>>,
    spot_sources: Vec<Box<dyn SpotPriceSource>>,
    history_client: Option<CoinGeckoClient>,
}

impl PriceResolver {
    pub fn new(config: &Config) -> Result<Self> {
        let list_sources: Vec<Box<dyn TokenListSource>> = vec![
            Box::new(CoinGeckoClient::new(config)?),
            Box::new(CoinMarketCapListings::new(config)?),
            Box::new(CoinPaprikaTickers::new(config)?),
        ];
        let spot_sources: Vec<Box<dyn SpotPriceSource>> = vec![
            Box::new(CoinGeckoClient::new(config)?),
            Box::new(CoinMarketCapQuotes::new(config)?),
            Box::new(BinanceTicker::new(config)?),
            Box::new(CoinbaseSpot::new(config)?),
        ];

        Ok(Self {
            cache: PriceCache::new(Duration::from_secs(config.cache_ttl_secs)),
            list_sources,
            spot_sources,
            history_client: Some(CoinGeckoClient::new(config)?),
        })
    }

    /// Dependency-injection constructor: custom source chains, no
    /// history client. Used by tests and by callers embedding the
    /// engine with bespoke sources.
    pub fn with_sources(
        cache_ttl: Duration,
        list_sources: Vec<Box<dyn TokenListSource>>,
        spot_sources: Vec<Box<dyn SpotPriceSource>>,
    ) -> Self {
        Self {
            cache: PriceCache::new(cache_ttl),
            list_sources,
            spot_sources,
            history_client: None,
        }
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    pub(crate) fn history_client(&self) -> Option<&CoinGeckoClient> {
        self.history_client.as_ref()
    }

    /// Resolves the top `count` tokens by market cap.
    ///
    /// The cache fast path is the only synchronous one; otherwise the
    /// source chain runs strictly sequentially and whichever tier
    /// succeeds first populates the cache — fallback data included, so
    /// a later cache hit can legitimately serve synthetic prices.
    pub async fn resolve_top_tokens(
        &self,
        count: usize,
        force_refresh: bool,
    ) -> FeedResult<TokenSnapshot> {
        if count == 0 {
            return Err(FeedError::InvalidRequest {
                reason: "token count must be at least 1".to_string(),
            });
        }

        if !force_refresh {
            if let Some(mut snapshot) = self.cache.get().await {
                debug!("Serving cached price snapshot ({:?})", snapshot.origin);
                snapshot.tokens.truncate(count);
                return Ok(snapshot);
            }
        }

        for source in &self.list_sources {
            let attempt = retry_with_backoff(
                || source.fetch_top(count),
                &source.retry(),
                source.name(),
            )
            .await;

            match attempt {
                Ok(mut tokens) if !tokens.is_empty() => {
                    tokens.truncate(count);
                    info!("Fetched {} tokens from {}", tokens.len(), source.name());
                    let snapshot = TokenSnapshot {
                        tokens,
                        origin: source.origin(),
                    };
                    self.cache.set(snapshot.clone()).await;
                    return Ok(snapshot);
                }
                Ok(_) => {
                    warn!("{} returned zero usable tokens, trying next source", source.name());
                }
                Err(e) => {
                    warn!("{} exhausted: {}. Trying next source", source.name(), e);
                }
            }
        }

        warn!("All live sources failed, serving fallback token table");
        let snapshot = TokenSnapshot {
            tokens: fallback::tokens(count),
            origin: PriceOrigin::Fallback,
        };
        self.cache.set(snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Resolves a single USD reference price. Total: cache, then spot
    /// sources that carry the token, then the static table.
    pub async fn resolve_base_price(&self, token_id: &str) -> Decimal {
        let needle = token_id.to_lowercase();
        if let Some(snapshot) = self.cache.get().await {
            if let Some(cached) = snapshot
                .tokens
                .iter()
                .find(|t| t.id == needle || t.symbol == needle)
            {
                debug!("Base price for {} served from cache", token_id);
                return cached.current_price;
            }
        }

        for source in &self.spot_sources {
            if !source.supports(token_id) {
                continue;
            }
            match source.fetch_spot(token_id).await {
                Ok(price) if price > Decimal::ZERO => {
                    debug!("Base price for {} from {}: {}", token_id, source.name(), price);
                    return price;
                }
                Ok(price) => {
                    warn!("{} returned non-positive price {} for {}", source.name(), price, token_id);
                }
                Err(e) => {
                    warn!("{} spot fetch failed for {}: {}", source.name(), token_id, e);
                }
            }
        }

        debug!("All spot sources failed for {}, using fallback price", token_id);
        fallback::price_for(token_id)
    }

    /// CEX/DEX price comparison derived from the base price. Purely
    /// informational; the arbitrage path uses the venue simulator.
    pub async fn exchange_prices(&self, token_id: &str) -> Vec<(&'static str, Decimal)> {
        let base = self.resolve_base_price(token_id).await;
        COMPARISON_EXCHANGES
            .iter()
            .map(|&(name, half_width)| (name, jittered(base, half_width)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use async_trait::async_trait;
    use crate::network::RetryConfig;
    use crate::types::TokenQuote;

    struct FailingList;

    #[async_trait]
    impl TokenListSource for FailingList {
        fn name(&self) -> &'static str {
            "FailingList"
        }
        fn origin(&self) -> PriceOrigin {
            PriceOrigin::CoinGecko
        }
        fn retry(&self) -> RetryConfig {
            RetryConfig {
                max_attempts: 3,
                base_delay_ms: 0,
            }
        }
        async fn fetch_top(&self, _count: usize) -> Result<Vec<TokenQuote>> {
            anyhow::bail!("always down")
        }
    }

    struct FailingSpot;

    #[async_trait]
    impl SpotPriceSource for FailingSpot {
        fn name(&self) -> &'static str {
            "FailingSpot"
        }
        fn supports(&self, _token_id: &str) -> bool {
            true
        }
        async fn fetch_spot(&self, _token_id: &str) -> Result<Decimal> {
            anyhow::bail!("always down")
        }
    }

    fn gecko_only_resolver(server: &mockito::ServerGuard, ttl: Duration) -> PriceResolver {
        let config = Config {
            primary_base_delay_ms: 0,
            ..Config::default()
        };
        let gecko = CoinGeckoClient::new(&config)
            .unwrap()
            .with_base_url(server.url());
        PriceResolver::with_sources(ttl, vec![Box::new(gecko)], vec![])
    }

    const MARKETS_BODY: &str = r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin",
        "image":"img","current_price":65000.0,"market_cap":1270000000000,
        "price_change_percentage_24h":1.5}]"#;

    #[tokio::test]
    async fn zero_count_is_rejected() {
        let resolver = PriceResolver::with_sources(Duration::from_secs(60), vec![], vec![]);
        assert!(matches!(
            resolver.resolve_top_tokens(0, false).await,
            Err(FeedError::InvalidRequest { .. })
        ));
    }

    #[tokio::test]
    async fn cache_hit_issues_no_second_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/coins/markets")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(MARKETS_BODY)
            .expect(1)
            .create_async()
            .await;

        let resolver = gecko_only_resolver(&server, Duration::from_secs(60));
        let first = resolver.resolve_top_tokens(1, false).await.unwrap();
        let second = resolver.resolve_top_tokens(1, false).await.unwrap();

        assert_eq!(first.origin, PriceOrigin::CoinGecko);
        assert_eq!(second.origin, PriceOrigin::CoinGecko);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn expired_cache_refetches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/coins/markets")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(MARKETS_BODY)
            .expect(2)
            .create_async()
            .await;

        let resolver = gecko_only_resolver(&server, Duration::from_millis(20));
        resolver.resolve_top_tokens(1, false).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        resolver.resolve_top_tokens(1, false).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn force_refresh_bypasses_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/coins/markets")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(MARKETS_BODY)
            .expect(2)
            .create_async()
            .await;

        let resolver = gecko_only_resolver(&server, Duration::from_secs(60));
        resolver.resolve_top_tokens(1, false).await.unwrap();
        resolver.resolve_top_tokens(1, true).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn primary_failure_retries_then_falls_back() {
        let mut server = mockito::Server::new_async().await;
        // Default primary policy is 3 attempts; all of them must hit
        // the server before the chain degrades.
        let mock = server
            .mock("GET", "/coins/markets")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .expect(3)
            .create_async()
            .await;

        let resolver = gecko_only_resolver(&server, Duration::from_secs(60));
        let snapshot = resolver.resolve_top_tokens(5, false).await.unwrap();

        assert_eq!(snapshot.origin, PriceOrigin::Fallback);
        assert_eq!(snapshot.tokens.len(), 5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fallback_totality_at_fifty_tokens() {
        let resolver = PriceResolver::with_sources(
            Duration::from_secs(60),
            vec![Box::new(FailingList)],
            vec![Box::new(FailingSpot)],
        );
        let snapshot = resolver.resolve_top_tokens(50, false).await.unwrap();
        assert_eq!(snapshot.tokens.len(), 50);
        assert_eq!(snapshot.origin, PriceOrigin::Fallback);
    }

    #[tokio::test]
    async fn fallback_snapshot_populates_cache() {
        let resolver =
            PriceResolver::with_sources(Duration::from_secs(60), vec![Box::new(FailingList)], vec![]);
        resolver.resolve_top_tokens(3, false).await.unwrap();
        let cached = resolver.cache().get().await.unwrap();
        assert_eq!(cached.origin, PriceOrigin::Fallback);
    }

    #[tokio::test]
    async fn base_price_prefers_fresh_cache() {
        let resolver =
            PriceResolver::with_sources(Duration::from_secs(60), vec![], vec![Box::new(FailingSpot)]);
        resolver.resolve_top_tokens(20, false).await.unwrap();

        // bitcoin sits in the fallback table at 65000, now cached
        assert_eq!(resolver.resolve_base_price("bitcoin").await, dec!(65000));
        // symbol lookup works too
        assert_eq!(resolver.resolve_base_price("btc").await, dec!(65000));
    }

    #[tokio::test]
    async fn base_price_never_fails() {
        let resolver =
            PriceResolver::with_sources(Duration::from_secs(60), vec![], vec![Box::new(FailingSpot)]);
        assert_eq!(
            resolver.resolve_base_price("no-such-token").await,
            fallback::DEFAULT_FALLBACK_PRICE
        );
    }

    #[tokio::test]
    async fn exchange_prices_track_base_within_bands() {
        let resolver = PriceResolver::with_sources(Duration::from_secs(60), vec![], vec![]);
        let prices = resolver.exchange_prices("ethereum").await;
        assert_eq!(prices.len(), 7);
        let base = fallback::price_for("ethereum");
        for (name, price) in prices {
            let hw = if name == "Uniswap" || name == "SushiSwap" {
                dec!(0.015)
            } else {
                dec!(0.01)
            };
            assert!(price >= base * (dec!(1) - hw));
            assert!(price <= base * (dec!(1) + hw));
        }
    }
}
