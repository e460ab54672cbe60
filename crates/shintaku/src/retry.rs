//! Retry with exponential backoff
//!
//! Shared executor for every upstream call in the pipeline. The delay
//! doubles per attempt from a base of one second and carries up to one
//! second of random jitter so parallel retries do not synchronize.
//! Non-retryable errors abort immediately.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::domain::errors::OracleError;

/// Backoff parameters for [`retry_with_backoff`].
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt, so `max_retries = 3` means up
    /// to four calls in total.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_jitter: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (zero-based).
    fn delay_for(&self, attempt: u32) -> Duration {
        let backoff = self.base_delay * 2u32.saturating_pow(attempt);
        let jitter_ms = rand::thread_rng().gen_range(0..=self.max_jitter.as_millis() as u64);
        backoff + Duration::from_millis(jitter_ms)
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or
/// the retry budget is exhausted. The last error is returned as-is.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, OracleError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, OracleError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.kind.is_retryable() => return Err(err),
            Err(err) if attempt >= policy.max_retries => return Err(err),
            Err(err) => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    kind = %err.kind,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    "retrying after upstream failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
