//! CoinGecko client (primary aggregator)

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;
use crate::config::{self, Config};
use crate::network::{build_client, RetryConfig};
use crate::sources::{SpotPriceSource, TokenListSource};
use crate::types::{PriceOrigin, TokenQuote};

pub const COINGECKO_API: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Deserialize)]
struct MarketRow {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: String,
    current_price: Option<Decimal>,
    market_cap: Option<Decimal>,
    price_change_percentage_24h: Option<Decimal>,
}

/// Primary source. Serves both the ranked listing (`coins/markets`)
/// and single spot prices (`simple/price`).
pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl CoinGeckoClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config::LIST_TIMEOUT_SECS)?,
            base_url: COINGECKO_API.to_string(),
            retry: RetryConfig {
                max_attempts: config.primary_max_attempts,
                base_delay_ms: config.primary_base_delay_ms,
            },
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TokenListSource for CoinGeckoClient {
    fn name(&self) -> &'static str {
        "CoinGecko"
    }

    fn origin(&self) -> PriceOrigin {
        PriceOrigin::CoinGecko
    }

    fn retry(&self) -> RetryConfig {
        self.retry.clone()
    }

    async fn fetch_top(&self, count: usize) -> Result<Vec<TokenQuote>> {
        let url = format!("{}/coins/markets", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("order", "market_cap_desc"),
                ("per_page", &count.to_string()),
                ("page", "1"),
                ("sparkline", "false"),
            ])
            .send()
            .await
            .context("CoinGecko markets request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("CoinGecko returned status {}", response.status());
        }

        // A non-array body is malformed and must count as a failure,
        // not an empty result.
        let body: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse CoinGecko markets body")?;
        if !body.is_array() {
            anyhow::bail!("CoinGecko markets payload is not an array");
        }

        let rows: Vec<MarketRow> =
            serde_json::from_value(body).context("Unexpected CoinGecko markets row shape")?;

        debug!("Fetched {} market rows from CoinGecko", rows.len());

        Ok(rows
            .into_iter()
            .map(|row| TokenQuote {
                id: row.id,
                symbol: row.symbol,
                name: row.name,
                image: row.image,
                current_price: row.current_price.unwrap_or_default(),
                market_cap: row.market_cap.unwrap_or_default(),
                price_change_24h: row.price_change_percentage_24h.unwrap_or_default(),
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct MarketChart {
    prices: Vec<(i64, Decimal)>,
}

impl CoinGeckoClient {
    /// Daily close series from `coins/{id}/market_chart`, oldest first.
    pub async fn fetch_market_chart(
        &self,
        token_id: &str,
        days: u32,
    ) -> Result<Vec<(i64, Decimal)>> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, token_id);
        let response = self
            .client
            .get(&url)
            .query(&[("vs_currency", "usd"), ("days", &days.to_string())])
            .send()
            .await
            .context("CoinGecko market_chart request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("CoinGecko returned status {}", response.status());
        }

        let chart: MarketChart = response
            .json()
            .await
            .context("Failed to parse CoinGecko market_chart body")?;
        Ok(chart.prices)
    }
}

#[async_trait]
impl SpotPriceSource for CoinGeckoClient {
    fn name(&self) -> &'static str {
        "CoinGecko"
    }

    fn supports(&self, _token_id: &str) -> bool {
        true
    }

    async fn fetch_spot(&self, token_id: &str) -> Result<Decimal> {
        let url = format!("{}/simple/price", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("ids", token_id), ("vs_currencies", "usd")])
            .send()
            .await
            .context("CoinGecko simple/price request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("CoinGecko returned status {}", response.status());
        }

        let body: HashMap<String, HashMap<String, Decimal>> = response
            .json()
            .await
            .context("Failed to parse CoinGecko simple/price body")?;

        body.get(token_id)
            .and_then(|quotes| quotes.get("usd"))
            .copied()
            .with_context(|| format!("No usd price for {} in CoinGecko response", token_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use rust_decimal_macros::dec;

    fn client(server: &mockito::ServerGuard) -> CoinGeckoClient {
        CoinGeckoClient::new(&Config::default())
            .unwrap()
            .with_base_url(server.url())
    }

    #[tokio::test]
    async fn parses_market_rows() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/coins/markets")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin","image":"img",
                    "current_price":65000.5,"market_cap":1270000000000,
                    "price_change_percentage_24h":1.5}]"#,
            )
            .create_async()
            .await;

        let tokens = client(&server).fetch_top(1).await.unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].id, "bitcoin");
        assert_eq!(tokens[0].current_price, dec!(65000.5));
    }

    #[tokio::test]
    async fn non_array_payload_is_a_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/coins/markets")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"error":"rate limited"}"#)
            .create_async()
            .await;

        assert!(client(&server).fetch_top(1).await.is_err());
    }

    #[tokio::test]
    async fn non_200_is_a_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/coins/markets")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        assert!(client(&server).fetch_top(1).await.is_err());
    }

    #[tokio::test]
    async fn spot_price_extracts_usd_field() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/simple/price")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"ethereum":{"usd":3500.25}}"#)
            .create_async()
            .await;

        let price = client(&server).fetch_spot("ethereum").await.unwrap();
        assert_eq!(price, dec!(3500.25));
    }

    #[tokio::test]
    async fn spot_price_missing_token_is_a_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/simple/price")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{}"#)
            .create_async()
            .await;

        assert!(client(&server).fetch_spot("ethereum").await.is_err());
    }
}
