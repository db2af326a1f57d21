//! Custom error types for the price feed core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        retry_count: u32,
    },

    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },
}

pub type FeedResult<T> = Result<T, FeedError>;
