//! CoinPaprika client (alternative source, no credential required)

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use crate::config::{self, Config};
use crate::network::build_client;
use crate::sources::TokenListSource;
use crate::types::{PriceOrigin, TokenQuote};

pub const COINPAPRIKA_API: &str = "https://api.coinpaprika.com/v1";

#[derive(Debug, Deserialize)]
struct TickerUsd {
    price: Option<Decimal>,
    market_cap: Option<Decimal>,
    percent_change_24h: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct TickerQuotes {
    #[serde(rename = "USD")]
    usd: TickerUsd,
}

#[derive(Debug, Deserialize)]
struct Ticker {
    id: String,
    symbol: String,
    name: String,
    quotes: TickerQuotes,
}

#[derive(Debug, Deserialize)]
struct CoinDetail {
    #[serde(default)]
    logo: String,
}

/// `tickers` client. Each listed coin needs a secondary `coins/{id}`
/// request for its logo; a failure there drops that coin only, never
/// the whole batch.
pub struct CoinPaprikaTickers {
    client: reqwest::Client,
    base_url: String,
}

impl CoinPaprikaTickers {
    pub fn new(_config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config::LIST_TIMEOUT_SECS)?,
            base_url: COINPAPRIKA_API.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_logo(&self, coin_id: &str) -> Result<String> {
        let url = format!("{}/coins/{}", self.base_url, coin_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("CoinPaprika coin detail request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("CoinPaprika returned status {}", response.status());
        }

        let detail: CoinDetail = response
            .json()
            .await
            .context("Failed to parse CoinPaprika coin detail")?;
        Ok(detail.logo)
    }
}

#[async_trait]
impl TokenListSource for CoinPaprikaTickers {
    fn name(&self) -> &'static str {
        "CoinPaprika"
    }

    fn origin(&self) -> PriceOrigin {
        PriceOrigin::CoinPaprika
    }

    async fn fetch_top(&self, count: usize) -> Result<Vec<TokenQuote>> {
        let url = format!("{}/tickers", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", &count.to_string())])
            .send()
            .await
            .context("CoinPaprika tickers request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("CoinPaprika returned status {}", response.status());
        }

        let tickers: Vec<Ticker> = response
            .json()
            .await
            .context("Failed to parse CoinPaprika tickers body")?;

        let mut tokens = Vec::with_capacity(tickers.len().min(count));
        for ticker in tickers.into_iter().take(count) {
            let logo = match self.fetch_logo(&ticker.id).await {
                Ok(logo) => logo,
                Err(e) => {
                    debug!("Dropping {}: detail fetch failed: {}", ticker.id, e);
                    continue;
                }
            };

            tokens.push(TokenQuote {
                id: ticker.id,
                symbol: ticker.symbol.to_lowercase(),
                name: ticker.name,
                image: logo,
                current_price: ticker.quotes.usd.price.unwrap_or_default(),
                market_cap: ticker.quotes.usd.market_cap.unwrap_or_default(),
                price_change_24h: ticker.quotes.usd.percent_change_24h.unwrap_or_default(),
            });
        }

        debug!("Fetched {} usable tickers from CoinPaprika", tokens.len());
        Ok(tokens)
    }
}
