//! Request pacing for external collaborators.
//!
//! Two separate policies live here:
//!
//! - [`PolitenessGate`] spaces out page fetches with a randomized pause so a
//!   batch never looks like a burst to the blog host.
//! - [`retry_with_backoff`] retries a single request on transient errors
//!   (429, network failures, 5xx) with exponential backoff, stretched to the
//!   server's `Retry-After` on a 429. Everything else is returned immediately.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::ScraperError;

const DEFAULT_MIN_DELAY_MS: u64 = 1_000;
const DEFAULT_MAX_DELAY_MS: u64 = 3_000;

/// Upper bound on a server-requested `Retry-After` wait.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Randomized pause awaited before each page fetch.
///
/// The delay is drawn uniformly from `[min, max]` on every call to
/// [`PolitenessGate::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolitenessGate {
    min_ms: u64,
    max_ms: u64,
}

impl Default for PolitenessGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DELAY_MS, DEFAULT_MAX_DELAY_MS)
    }
}

impl PolitenessGate {
    /// Bounds given in the wrong order are swapped.
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// No pause at all. For tests and local fixtures only.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    #[must_use]
    pub fn bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.min_ms),
            Duration::from_millis(self.max_ms),
        )
    }

    #[must_use]
    pub fn next_delay(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }

    pub async fn wait(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        tracing::debug!(
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "politeness pause before page fetch"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Returns `true` if `err` is worth retrying after a backoff delay.
///
/// Retriable: [`ScraperError::RateLimited`], [`ScraperError::Http`], and
/// [`ScraperError::UnexpectedStatus`] with a 5xx status. Everything else
/// (404, other 4xx, bad JSON, orchestration outcomes) is returned as-is.
pub(crate) fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Delay before retry number `attempt + 1`.
///
/// `backoff_base_secs * 2^attempt`, or the server's `Retry-After` (capped at
/// [`MAX_RETRY_AFTER_SECS`]) when that is longer.
pub(crate) fn retry_delay(err: &ScraperError, attempt: u32, backoff_base_secs: u64) -> Duration {
    let backoff_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
    let retry_after_secs = match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } => (*retry_after_secs).min(MAX_RETRY_AFTER_SECS),
        _ => 0,
    };
    Duration::from_secs(backoff_secs.max(retry_after_secs))
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// Sleeps [`retry_delay`] between attempts, up to
/// `max_retries` additional attempts after the first try. With
/// `max_retries = 2` the operation runs at most 3 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay = retry_delay(&err, attempt, backoff_base_secs);
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs = delay.as_secs(),
            error = %err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
