// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Logging wrapper for transaction sources.
//!
//! Records per-fetch timing, result size and failures through `tracing`.

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, trace, warn, Instrument};

use super::{FetchOptions, TransactionSource};
use crate::errors::SourceError;
use crate::types::interval::Interval;
use crate::types::record::DatedRecord;

/// A source wrapper that logs every fetch.
///
/// By default only timing, record counts and errors are logged. Options can
/// be included with [`with_options_logging`](LoggingSource::with_options_logging);
/// they may carry account identifiers, so this is off by default.
///
/// # Example
///
/// ```rust
/// use txrange::{LoggingSource, MemorySource, Transaction};
///
/// let source = LoggingSource::new(MemorySource::<Transaction>::default());
/// ```
#[derive(Debug, Clone)]
pub struct LoggingSource<S> {
    inner: S,
    log_options: bool,
}

impl<S> LoggingSource<S> {
    /// Wraps `inner` with default logging settings.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            log_options: false,
        }
    }

    /// Enables logging of fetch options.
    pub fn with_options_logging(mut self) -> Self {
        self.log_options = true;
        self
    }

    /// The wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<R, S> TransactionSource<R> for LoggingSource<S>
where
    R: DatedRecord,
    S: TransactionSource<R>,
{
    async fn fetch(
        &self,
        interval: Interval,
        options: &FetchOptions,
    ) -> Result<Vec<R>, SourceError> {
        let source = self.inner.name();
        let span = tracing::info_span!(
            "source_fetch",
            source,
            interval = %interval,
            duration_ms = tracing::field::Empty,
        );

        async move {
            let start = Instant::now();

            if self.log_options {
                trace!(options = ?options, "Source fetch");
            } else {
                debug!("Source fetch: {source}");
            }

            let result = self.inner.fetch(interval, options).await;
            let duration = start.elapsed();
            tracing::Span::current().record("duration_ms", duration.as_millis() as u64);

            match &result {
                Ok(records) => {
                    debug!(
                        records = records.len(),
                        duration_ms = %duration.as_millis(),
                        "Source fetch complete: {source}"
                    );
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        duration_ms = %duration.as_millis(),
                        "Source fetch failed: {source}"
                    );
                }
            }

            result
        }
        .instrument(span)
        .await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::types::transaction::Transaction;

    #[test]
    fn test_logging_source_default() {
        let source = LoggingSource::new(MemorySource::<Transaction>::default());
        assert!(!source.log_options);
        assert!(source.with_options_logging().log_options);
    }

    #[tokio::test]
    async fn test_logging_source_passes_through() {
        let records = vec![Transaction::new(
            1,
            "2024-01-10".parse().unwrap(),
            "-5".parse().unwrap(),
        )];
        let source = LoggingSource::new(MemorySource::new(records.clone()));
        let interval = Interval::parse("2024-01-01", "2024-01-31").unwrap();

        let fetched: Vec<Transaction> = source.fetch(interval, &FetchOptions::new()).await.unwrap();

        assert_eq!(fetched, records);
        assert_eq!(source.inner().call_count(), 1);
        assert_eq!(
            TransactionSource::<Transaction>::name(&source),
            "MemorySource"
        );
    }
}
