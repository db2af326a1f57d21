//! Retry logic with linear backoff

use std::time::Duration;
use anyhow::Result;
use tracing::warn;
use crate::errors::{FeedError, FeedResult};

/// Bounded retry policy. The wait before attempt `n + 1` is
/// `n * base_delay_ms`, so the first retry waits one base delay,
/// the second two, and so on.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    /// A policy that tries exactly once. Used for alternative sources,
    /// which get a single shot before the chain moves on.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 0,
        }
    }
}

pub async fn retry_with_backoff<F, Fut, T>(
    operation: F,
    config: &RetryConfig,
    context: &str,
) -> FeedResult<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt >= config.max_attempts => {
                return Err(FeedError::Network {
                    message: format!("{} failed after {} attempts", context, attempt),
                    source: Some(e),
                    retry_count: attempt,
                });
            }
            Err(e) => {
                let delay = config.base_delay_ms * attempt as u64;
                warn!(
                    "Attempt {}/{} failed for {}: {}. Retrying in {}ms...",
                    attempt, config.max_attempts, context, e, delay
                );
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn returns_first_success() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, anyhow::Error>(42)
            },
            &RetryConfig {
                max_attempts: 3,
                base_delay_ms: 0,
            },
            "test op",
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausts_attempts_then_errors() {
        let calls = AtomicU32::new(0);
        let result: FeedResult<u32> = retry_with_backoff(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(anyhow::anyhow!("boom"))
            },
            &RetryConfig {
                max_attempts: 3,
                base_delay_ms: 0,
            },
            "test op",
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        match result {
            Err(FeedError::Network { retry_count, .. }) => assert_eq!(retry_count, 3),
            other => panic!("expected network error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn single_attempt_does_not_retry() {
        let calls = AtomicU32::new(0);
        let result: FeedResult<u32> = retry_with_backoff(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(anyhow::anyhow!("boom"))
            },
            &RetryConfig::single_attempt(),
            "test op",
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
