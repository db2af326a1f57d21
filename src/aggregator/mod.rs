//! Opportunity aggregation across many tokens
//!
//! Batches price resolution in small chunks so at most `chunk_size`
//! token resolutions are outstanding at once, with a fixed pause
//! between chunks. The pacing is a rate-limiting discipline toward the
//! upstream APIs, not a performance device.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};
use crate::arbitrage::estimate_profit;
use crate::config::Config;
use crate::engine::PriceResolver;
use crate::errors::FeedResult;
use crate::fallback;
use crate::simulator::{SimulatedVenueBook, VenueQuoteProvider};
use crate::types::{ArbitrageOpportunity, TokenQuote, VenueQuote};
use rust_decimal::Decimal;

pub struct OpportunityAggregator {
    resolver: Arc<PriceResolver>,
    venues: Arc<dyn VenueQuoteProvider>,
    investment_usd: Decimal,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl OpportunityAggregator {
    pub fn new(config: &Config, resolver: Arc<PriceResolver>) -> Self {
        Self::with_venue_provider(config, resolver, Arc::new(SimulatedVenueBook))
    }

    /// Swap in a different quote source (a real on-chain fetcher, or a
    /// test double).
    pub fn with_venue_provider(
        config: &Config,
        resolver: Arc<PriceResolver>,
        venues: Arc<dyn VenueQuoteProvider>,
    ) -> Self {
        Self {
            resolver,
            venues,
            investment_usd: config.investment_usd,
            chunk_size: config.chunk_size.max(1),
            chunk_delay: Duration::from_millis(config.chunk_delay_ms),
        }
    }

    /// Ranked arbitrage opportunities for the top `limit` tokens, best
    /// profit first. Never fails: any pipeline error degrades to
    /// synthetic opportunities built from the fallback table.
    pub async fn scan(&self, limit: usize) -> Vec<ArbitrageOpportunity> {
        match self.try_scan(limit).await {
            Ok(opportunities) => opportunities,
            Err(e) => {
                error!("Opportunity scan failed: {}. Degrading to fallback data", e);
                self.synthetic_opportunities(limit)
            }
        }
    }

    async fn try_scan(&self, limit: usize) -> FeedResult<Vec<ArbitrageOpportunity>> {
        let snapshot = self.resolver.resolve_top_tokens(limit, false).await?;
        let synthetic = snapshot.origin.is_synthetic();

        let mut opportunities = Vec::new();
        let chunks: Vec<&[TokenQuote]> = snapshot.tokens.chunks(self.chunk_size).collect();
        let chunk_count = chunks.len();

        for (index, chunk) in chunks.into_iter().enumerate() {
            let mut join_set: JoinSet<Option<(TokenQuote, Vec<VenueQuote>)>> = JoinSet::new();

            for token in chunk.iter().cloned() {
                let resolver = Arc::clone(&self.resolver);
                let venues = Arc::clone(&self.venues);
                join_set.spawn(async move {
                    let base_price = resolver.resolve_base_price(&token.id).await;
                    match venues.quotes_for(base_price).await {
                        Ok(quotes) => Some((token, quotes)),
                        Err(e) => {
                            // Dropped from this scan, not retried.
                            warn!("Skipping {}: venue quotes failed: {}", token.id, e);
                            None
                        }
                    }
                });
            }

            while let Some(joined) = join_set.join_next().await {
                let Ok(Some((token, quotes))) = joined else {
                    continue;
                };
                if quotes.len() < 2 {
                    debug!("Skipping {}: fewer than 2 venue quotes", token.id);
                    continue;
                }
                match estimate_profit(&quotes, self.investment_usd) {
                    Ok(Some(estimate)) => {
                        opportunities.push(ArbitrageOpportunity::from_estimate(
                            token, estimate, synthetic,
                        ));
                    }
                    Ok(None) => {}
                    Err(e) => warn!("Profit estimate failed for {}: {}", token.id, e),
                }
            }

            if index + 1 < chunk_count {
                tokio::time::sleep(self.chunk_delay).await;
            }
        }

        opportunities.sort_by(|a, b| b.profit_pct.cmp(&a.profit_pct));
        Ok(opportunities)
    }

    /// Last-resort path: fabricate quotes straight off the fallback
    /// table. Output is always flagged synthetic.
    fn synthetic_opportunities(&self, limit: usize) -> Vec<ArbitrageOpportunity> {
        let book = SimulatedVenueBook;
        let mut opportunities: Vec<ArbitrageOpportunity> = fallback::tokens(limit)
            .into_iter()
            .filter_map(|token| {
                let quotes = book.simulate(token.current_price).ok()?;
                match estimate_profit(&quotes, self.investment_usd) {
                    Ok(Some(estimate)) => {
                        Some(ArbitrageOpportunity::from_estimate(token, estimate, true))
                    }
                    _ => None,
                }
            })
            .collect();
        opportunities.sort_by(|a, b| b.profit_pct.cmp(&a.profit_pct));
        opportunities
    }
}
