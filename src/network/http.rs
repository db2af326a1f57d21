//! Shared HTTP client construction

use std::time::Duration;
use anyhow::{Context, Result};

/// Build a JSON client with a fixed per-request timeout. A timeout is
/// treated identically to any other failure by callers.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent("dex-arb-scanner/0.3.0")
        .build()
        .context("Failed to build HTTP client")
}
