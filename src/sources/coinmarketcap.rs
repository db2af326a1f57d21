//! CoinMarketCap clients (key-gated alternative source)

use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;
use crate::config::{self, Config};
use crate::network::build_client;
use crate::sources::{token_id_to_symbol, SpotPriceSource, TokenListSource};
use crate::types::{PriceOrigin, TokenQuote};

pub const COINMARKETCAP_API: &str = "https://pro-api.coinmarketcap.com/v1";
const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

#[derive(Debug, Deserialize)]
struct UsdQuote {
    price: Option<Decimal>,
    market_cap: Option<Decimal>,
    percent_change_24h: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(rename = "USD")]
    usd: UsdQuote,
}

#[derive(Debug, Deserialize)]
struct Listing {
    id: u64,
    slug: String,
    symbol: String,
    name: String,
    quote: QuoteBlock,
}

#[derive(Debug, Deserialize)]
struct ListingsResponse {
    data: Vec<Listing>,
}

/// `cryptocurrency/listings/latest` client. Skipped (fails fast with a
/// descriptive error) when no API key is configured.
pub struct CoinMarketCapListings {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinMarketCapListings {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config::LIST_TIMEOUT_SECS)?,
            base_url: COINMARKETCAP_API.to_string(),
            api_key: config.coinmarketcap_api_key.clone(),
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TokenListSource for CoinMarketCapListings {
    fn name(&self) -> &'static str {
        "CoinMarketCap"
    }

    fn origin(&self) -> PriceOrigin {
        PriceOrigin::CoinMarketCap
    }

    async fn fetch_top(&self, count: usize) -> Result<Vec<TokenQuote>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("CoinMarketCap skipped: no API key configured")?;

        let url = format!("{}/cryptocurrency/listings/latest", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("start", "1"),
                ("limit", &count.to_string()),
                ("convert", "USD"),
            ])
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .context("CoinMarketCap listings request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("CoinMarketCap returned status {}", response.status());
        }

        let body: ListingsResponse = response
            .json()
            .await
            .context("Failed to parse CoinMarketCap listings body")?;

        debug!("Fetched {} listings from CoinMarketCap", body.data.len());

        Ok(body
            .data
            .into_iter()
            .map(|listing| TokenQuote {
                image: format!(
                    "https://s2.coinmarketcap.com/static/img/coins/64x64/{}.png",
                    listing.id
                ),
                id: listing.slug,
                symbol: listing.symbol.to_lowercase(),
                name: listing.name,
                current_price: listing.quote.usd.price.unwrap_or_default(),
                market_cap: listing.quote.usd.market_cap.unwrap_or_default(),
                price_change_24h: listing.quote.usd.percent_change_24h.unwrap_or_default(),
            })
            .collect())
    }
}

/// `cryptocurrency/quotes/latest` client for single spot prices.
pub struct CoinMarketCapQuotes {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinMarketCapQuotes {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_client(config::SPOT_TIMEOUT_SECS)?,
            base_url: COINMARKETCAP_API.to_string(),
            api_key: config.coinmarketcap_api_key.clone(),
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl SpotPriceSource for CoinMarketCapQuotes {
    fn name(&self) -> &'static str {
        "CoinMarketCap"
    }

    fn supports(&self, _token_id: &str) -> bool {
        self.api_key.is_some()
    }

    async fn fetch_spot(&self, token_id: &str) -> Result<Decimal> {
        let api_key = self
            .api_key
            .as_deref()
            .context("CoinMarketCap skipped: no API key configured")?;
        let symbol = token_id_to_symbol(token_id);

        let url = format!("{}/cryptocurrency/quotes/latest", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol.as_str()), ("convert", "USD")])
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .context("CoinMarketCap quotes request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("CoinMarketCap returned status {}", response.status());
        }

        #[derive(Deserialize)]
        struct QuotesResponse {
            data: HashMap<String, QuoteEntry>,
        }
        #[derive(Deserialize)]
        struct QuoteEntry {
            quote: QuoteBlock,
        }

        let body: QuotesResponse = response
            .json()
            .await
            .context("Failed to parse CoinMarketCap quotes body")?;

        body.data
            .get(&symbol)
            .and_then(|entry| entry.quote.usd.price)
            .with_context(|| format!("No USD quote for {} in CoinMarketCap response", symbol))
    }
}
