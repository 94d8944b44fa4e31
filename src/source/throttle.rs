// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token bucket rate limiting for transaction sources.
//!
//! Aggregator APIs typically enforce per-token request quotas. Wrapping a
//! source in [`ThrottledSource`] keeps concurrent gap fetches within quota
//! instead of surfacing `429` responses as resolve failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::trace;

use super::{FetchOptions, TransactionSource};
use crate::errors::SourceError;
use crate::types::interval::Interval;
use crate::types::record::DatedRecord;

/// A source wrapper that limits the rate of fetches.
///
/// Tokens are replenished at a fixed rate and each fetch consumes one token.
/// If no tokens are available the fetch waits until one becomes available.
/// Clones share the same bucket.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use txrange::{MemorySource, ThrottledSource, Transaction};
///
/// // Allow 10 fetches per second
/// let source = ThrottledSource::new(
///     MemorySource::<Transaction>::default(),
///     10,
///     Duration::from_secs(1),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ThrottledSource<S> {
    inner: S,
    state: Arc<Mutex<RateLimitState>>,
}

impl<S> ThrottledSource<S> {
    /// Wraps `inner`, allowing at most `requests` fetches per `period`.
    pub fn new(inner: S, requests: u32, period: Duration) -> Self {
        Self {
            inner,
            state: Arc::new(Mutex::new(RateLimitState::new(requests, period))),
        }
    }

    /// Wraps `inner` with a requests-per-second limit.
    pub fn per_second(inner: S, requests: u32) -> Self {
        Self::new(inner, requests, Duration::from_secs(1))
    }

    /// Wraps `inner` with a fixed minimum delay between consecutive fetches.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use txrange::{MemorySource, ThrottledSource, Transaction};
    ///
    /// // At least 250ms between fetches
    /// let source = ThrottledSource::with_min_delay(
    ///     MemorySource::<Transaction>::default(),
    ///     Duration::from_millis(250),
    /// );
    /// ```
    pub fn with_min_delay(inner: S, delay: Duration) -> Self {
        Self::new(inner, 1, delay)
    }

    /// The wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn acquire(&self) {
        loop {
            let wait_time = {
                let mut state = self.state.lock().await;
                state.try_acquire()
            };

            match wait_time {
                None => break,
                Some(duration) => {
                    trace!(wait_ms = duration.as_millis() as u64, "Source throttled");
                    tokio::time::sleep(duration).await;
                }
            }
        }
    }
}

#[async_trait]
impl<R, S> TransactionSource<R> for ThrottledSource<S>
where
    R: DatedRecord,
    S: TransactionSource<R>,
{
    async fn fetch(
        &self,
        interval: Interval,
        options: &FetchOptions,
    ) -> Result<Vec<R>, SourceError> {
        self.acquire().await;
        self.inner.fetch(interval, options).await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Internal state for the token bucket.
#[derive(Debug)]
struct RateLimitState {
    /// Maximum number of tokens available
    capacity: u32,
    /// Current number of available tokens
    tokens: f64,
    /// Token replenishment rate (tokens per nanosecond)
    refill_rate: f64,
    /// Last time tokens were refilled
    last_refill: Instant,
}

impl RateLimitState {
    fn new(requests: u32, period: Duration) -> Self {
        let requests = requests.max(1);
        let period_nanos = period.as_nanos().max(1) as f64;
        Self {
            capacity: requests,
            tokens: requests as f64,
            refill_rate: requests as f64 / period_nanos,
            last_refill: Instant::now(),
        }
    }

    /// Try to acquire a token, returning the wait time if none is available.
    fn try_acquire(&mut self) -> Option<Duration> {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            None
        } else {
            let needed = 1.0 - self.tokens;
            let wait_nanos = (needed / self.refill_rate).ceil();
            Some(Duration::from_nanos(wait_nanos as u64))
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill);
        let new_tokens = elapsed.as_nanos() as f64 * self.refill_rate;

        self.tokens = (self.tokens + new_tokens).min(self.capacity as f64);
        self.last_refill = now;
    }
}
