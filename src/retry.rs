//! Bounded retry with exponential backoff for transient service failures.
//!
//! Only errors reporting [`PlannerError::is_retryable`] are retried;
//! semantic outcomes (address not found, no route) pass through on the
//! first attempt.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::PlannerError;

/// Retry behavior for remote calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first. `1` disables retrying.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Backoff multiplier applied after each failed attempt.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Policy that performs exactly one attempt.
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            multiplier: 1.0,
        }
    }
}

/// Run `operation`, retrying transient failures per `policy`.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, PlannerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlannerError>>,
{
    let mut backoff = policy.initial_backoff;
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
                warn!(%err, attempt, "transient service failure, retrying");
                tokio::time::sleep(backoff).await;
                backoff = backoff.mul_f64(policy.multiplier);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
