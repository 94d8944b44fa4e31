//! Span creation helpers for txrange operations.
//!
//! Telemetry concerns are kept out of business logic: instead of
//! `#[instrument]` attributes, each instrumented operation has a corresponding
//! span helper here.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, interval: Interval) -> Result<T> {
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(spans::my_operation(interval))
//!     .await
//! }
//! ```

use tracing::{Level, Span};

use crate::types::interval::Interval;

/// Create span for resolving one requested interval.
///
/// This is the main public API entry point for cached retrieval.
///
/// Parent: None (root span for this operation)
/// Children: fetch_gap spans (one per gap)
#[inline]
pub(crate) fn resolve(interval: Interval) -> Span {
    tracing::span!(
        Level::INFO,
        "txrange.resolve",
        interval = %interval,
        lookup = tracing::field::Empty,
        gaps = tracing::field::Empty,
    )
}

/// Create span for fetching one uncached gap.
///
/// Parent: resolve span
/// Children: source_fetch span when the source is wrapped in `LoggingSource`
#[inline]
pub(crate) fn fetch_gap(gap: Interval, index: usize, total: usize) -> Span {
    tracing::debug_span!(
        "txrange.fetch_gap",
        gap = %gap,
        index = index,
        total = total,
    )
}

/// Create span for an explicit cache invalidation.
///
/// Parent: None (root span for this operation)
#[inline]
pub(crate) fn invalidate(interval: Option<Interval>) -> Span {
    match interval {
        Some(interval) => tracing::debug_span!("txrange.invalidate", interval = %interval),
        None => tracing::debug_span!("txrange.invalidate", interval = "all"),
    }
}
