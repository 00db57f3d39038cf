//! Retry with linear backoff.
//!
//! # Responsibilities
//! - Re-issue a failed operation while its error class is retryable
//! - Insert a linear backoff delay between attempts
//! - Surface the last classified error once the budget is exhausted
//!
//! # Design Decisions
//! - Non-retryable errors short-circuit without consuming a wait
//! - A timed-out attempt counts toward the budget like any other failure
//! - Delays are deterministic (`base * attempt`), no jitter

use std::future::Future;
use std::time::Duration;

use crate::api::error::ApiError;
use crate::config::RetryConfig;

/// Retry budget shared by every upstream operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.base_delay_ms),
        )
    }

    /// Delay inserted after failed attempt `attempt` (1-based).
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// Run `operation` until it succeeds, fails non-retryably, or the
    /// attempt budget is spent.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !error.kind.is_retryable() || attempt >= self.max_attempts {
                        return Err(error);
                    }
                    let delay = self.backoff_delay(attempt);
                    tracing::debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "retrying upstream operation"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
