//! Retry policy for the relation id collision.
//!
//! The server sometimes rejects a relation with `"id" has to be unique`
//! because the insert raced its auto-increment counter. Re-sending the very
//! same payload succeeds once the counter has moved on.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::Error;

/// Default number of attempts (initial try included).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// How often, and how patiently, a colliding relation is re-sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: Option<u32>,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
            delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Retry at most `attempts` times in total (initial try included).
    pub fn bounded(attempts: u32) -> Self {
        Self {
            max_attempts: Some(attempts.max(1)),
            ..Self::default()
        }
    }

    /// Retry until the request succeeds or fails for another reason.
    ///
    /// Loops forever if the server keeps answering with the collision.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            delay: Duration::ZERO,
        }
    }

    /// Never retry.
    pub fn none() -> Self {
        Self::bounded(1)
    }

    /// Wait this long between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `op` until it succeeds, fails with an error `retryable` rejects,
    /// or the attempt budget is spent. The last error is returned.
    pub async fn run<T, F, Fut, P>(&self, mut op: F, retryable: P) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
        P: Fn(&Error) -> bool,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if retryable(&err) && self.allows(attempt.saturating_add(1)) => {
                    debug!(attempt, error = %err, "retrying");
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn allows(&self, attempt: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempt <= max)
    }
}
