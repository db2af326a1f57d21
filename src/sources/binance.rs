//! Binance spot ticker client (symbol-gated)

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use crate::config::{self, Config};
use crate::network::build_client;
use crate::sources::{token_id_to_symbol, SpotPriceSource};

pub const BINANCE_API: &str = "https://api.binance.com/api/v3";

/// Token ids Binance is queried for; everything else skips this source.
const SUPPORTED_IDS: [&str; 6] = [
    "bitcoin",
    "ethereum",
    "binancecoin",
    "ripple",
    "cardano",
    "solana",
];

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

pub struct BinanceTicker {
    client: reqwest::Client,
    base_url: String,
}

impl BinanceTicker {
    pub fn new(_config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config::SPOT_TIMEOUT_SECS)?,
            base_url: BINANCE_API.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SpotPriceSource for BinanceTicker {
    fn name(&self) -> &'static str {
        "Binance"
    }

    fn supports(&self, token_id: &str) -> bool {
        SUPPORTED_IDS.contains(&token_id)
    }

    async fn fetch_spot(&self, token_id: &str) -> Result<Decimal> {
        let pair = format!("{}USDT", token_id_to_symbol(token_id));
        let url = format!("{}/ticker/price", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", pair.as_str())])
            .send()
            .await
            .context("Binance ticker request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Binance returned status {}", response.status());
        }

        let ticker: TickerPrice = response
            .json()
            .await
            .context("Failed to parse Binance ticker body")?;

        Decimal::from_str(&ticker.price).context("Failed to parse Binance price string")
    }
}
