//! Retry policy with exponential backoff.
//!
//! Shared by the upstream random-number client and the scoreboard store so
//! both call sites retry, log, and honour cancellation the same way.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::infrastructure::ports::Cancelled;

/// Base of the exponential backoff used by every production policy.
pub const BACKOFF_BASE: u32 = 3;

/// Retries after the first attempt for calls to the random-number service.
pub const UPSTREAM_MAX_RETRIES: u32 = 2;

/// Retries after the first attempt for scoreboard operations.
pub const STORAGE_MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// `unit * base^attempt`
    Exponential { base: u32, unit: Duration },
}

impl Backoff {
    /// Delay before retry number `attempt` (1-based). Saturates instead of overflowing.
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::Exponential { base, unit } => unit.saturating_mul(base.saturating_pow(attempt)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt (0 = single attempt).
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: Backoff) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// 2 retries, waiting 3s then 9s.
    pub fn upstream() -> Self {
        Self::new(
            UPSTREAM_MAX_RETRIES,
            Backoff::Exponential {
                base: BACKOFF_BASE,
                unit: Duration::from_secs(1),
            },
        )
    }

    /// 3 retries, waiting 3s, 9s then 27s.
    pub fn storage() -> Self {
        Self::new(
            STORAGE_MAX_RETRIES,
            Backoff::Exponential {
                base: BACKOFF_BASE,
                unit: Duration::from_secs(1),
            },
        )
    }

    /// Same shape, different time unit.
    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        match &mut self.backoff {
            Backoff::Exponential { unit: current, .. } => *current = unit,
        }
        self
    }

    /// Run `attempt` until it succeeds, fails with a non-retryable error, or
    /// the retry budget is spent. Both the attempt and the backoff sleep are
    /// raced against `cancel`.
    pub async fn execute<T, E, F, Fut, P>(
        &self,
        operation: &str,
        cancel: &CancellationToken,
        is_retryable: P,
        mut attempt: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: From<Cancelled> + Display,
    {
        let mut retries = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(Cancelled.into());
            }

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Cancelled.into()),
                result = attempt() => result,
            };

            let error = match result {
                Ok(value) => {
                    if retries > 0 {
                        tracing::info!(
                            attempt = retries + 1,
                            operation,
                            "Operation succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(error) => error,
            };

            if !is_retryable(&error) {
                tracing::error!(
                    error = %error,
                    operation,
                    "Operation failed with non-retryable error"
                );
                return Err(error);
            }

            if retries >= self.max_retries {
                tracing::error!(
                    attempts = retries + 1,
                    error = %error,
                    operation,
                    "Operation failed after all retry attempts"
                );
                return Err(error);
            }

            retries += 1;
            let delay = self.backoff.delay(retries);
            tracing::warn!(
                attempt = retries,
                max_retries = self.max_retries,
                delay_ms = delay_millis(delay),
                error = %error,
                operation,
                "Operation failed, retrying in {:?}",
                delay
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Cancelled.into()),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

/// Whole milliseconds, clamped to `u64::MAX`.
fn delay_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}
