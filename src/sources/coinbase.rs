//! Coinbase spot price client (symbol-gated)

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use crate::config::{self, Config};
use crate::network::build_client;
use crate::sources::{token_id_to_symbol, SpotPriceSource};

pub const COINBASE_API: &str = "https://api.coinbase.com/v2";

const SUPPORTED_IDS: [&str; 4] = ["bitcoin", "ethereum", "litecoin", "bitcoin-cash"];

#[derive(Debug, Deserialize)]
struct SpotAmount {
    amount: String,
}

#[derive(Debug, Deserialize)]
struct SpotResponse {
    data: SpotAmount,
}

pub struct CoinbaseSpot {
    client: reqwest::Client,
    base_url: String,
}

impl CoinbaseSpot {
    pub fn new(_config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config::SPOT_TIMEOUT_SECS)?,
            base_url: COINBASE_API.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SpotPriceSource for CoinbaseSpot {
    fn name(&self) -> &'static str {
        "Coinbase"
    }

    fn supports(&self, token_id: &str) -> bool {
        SUPPORTED_IDS.contains(&token_id)
    }

    async fn fetch_spot(&self, token_id: &str) -> Result<Decimal> {
        let symbol = token_id_to_symbol(token_id);
        let url = format!("{}/prices/{}-USD/spot", self.base_url, symbol);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Coinbase spot request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Coinbase returned status {}", response.status());
        }

        let body: SpotResponse = response
            .json()
            .await
            .context("Failed to parse Coinbase spot body")?;

        Decimal::from_str(&body.data.amount).context("Failed to parse Coinbase amount string")
    }
}
