// src/error_recovery.rs
//! Retry with linear, capped backoff for API operations.

use crate::error::AppError;
use std::future::Future;
use std::time::Duration;

/// How many times to try an operation and how long to wait in between.
///
/// The wait after attempt `k` is `min(k × base_delay, max_delay)`. There is
/// no jitter and no wait after the final attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
        }
    }

    /// Same attempt budget, no waiting. Used by tests and `--no-delay`.
    pub const fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    /// Wait before the attempt that follows attempt number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(attempt)
            .min(self.max_delay)
    }

    /// Sum of all waits when every attempt fails.
    pub fn total_delay(&self) -> Duration {
        (1..self.max_attempts).map(|a| self.delay_for(a)).sum()
    }
}

/// Retries an async operation while `is_retryable` accepts its error.
///
/// A non-retryable error is returned as-is on the attempt it occurs. When
/// the budget runs out on retryable errors, the last one is wrapped in
/// [`AppError::RetriesExhausted`].
pub async fn retry_with_backoff<F, T, Fut, P>(
    policy: &RetryPolicy,
    is_retryable: P,
    mut operation: F,
) -> Result<T, AppError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
    P: Fn(&AppError) -> bool,
{
    let attempts = policy.max_attempts.max(1);

    for attempt in 1..=attempts {
        match operation(attempt).await {
            Ok(result) => return Ok(result),
            Err(e) if !is_retryable(&e) => return Err(e),
            Err(e) if attempt == attempts => {
                return Err(AppError::RetriesExhausted {
                    attempts,
                    last: Box::new(e),
                });
            }
            Err(e) => {
                let delay = policy.delay_for(attempt);
                log::warn!(
                    "Attempt {}/{} failed ({}), retrying in {:.1}s",
                    attempt,
                    attempts,
                    e,
                    delay.as_secs_f32()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    unreachable!("retry loop returns on its final attempt")
}
