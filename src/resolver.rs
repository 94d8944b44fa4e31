// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cached retrieval of date-ranged records
//!
//! [`TransactionCache`] sits between callers and a [`TransactionSource`]. Every
//! request is reconciled against previously fetched intervals; only the
//! uncached gaps reach the source, and the merged result is stored under the
//! requested interval for exact hits later.
//!
//! # Consistency
//!
//! - Exact and containment hits never contact the source.
//! - A failed gap fetch fails the whole resolution and leaves the store untouched.
//! - Every stored entry holds only records dated within its own key.
//!
//! # Concurrency
//!
//! The store is guarded by an async mutex held only while reconciling and
//! while writing back, never across a fetch. Two resolutions racing on
//! overlapping intervals may both fetch; the later write wins, and both
//! writes are complete for their keys.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn, Instrument, Span};

use crate::cache::merge::merge_records;
use crate::cache::reconcile::{filter_to, reconcile, Lookup, LookupKind};
use crate::cache::store::{RangeStore, Records, StoreStats};
use crate::config::CacheConfig;
use crate::errors::{IntervalError, ResolveError, SourceError};
use crate::source::{FetchOptions, TransactionSource};
use crate::spans;
use crate::types::date::DateBound;
use crate::types::interval::Interval;
use crate::types::record::DatedRecord;
use crate::types::transaction::Transaction;

/// Outcome of one resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<R> {
    /// Deduplicated records dated within the requested interval, unordered
    pub records: Vec<R>,
    /// How the request was classified against the cache
    pub lookup: LookupKind,
    /// Gaps fetched from the source, in ascending order
    pub fetched: Vec<Interval>,
    /// Fetched records discarded for lying outside their gap
    pub dropped_inconsistent: usize,
}

impl<R: DatedRecord> Resolution<R> {
    /// Sort records ascending by date, keeping source order for equal dates
    pub fn sorted_by_date(mut self) -> Self {
        self.records.sort_by_key(|record| record.date());
        self
    }

    /// Whether the source was contacted
    pub fn touched_source(&self) -> bool {
        !self.fetched.is_empty()
    }

    /// Consume into the record list
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

/// Cache statistics in the consumer-facing shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of cached intervals
    pub size: usize,
    /// Cached interval keys rendered as `<start>_<end>`, ascending
    pub keys: Vec<String>,
    /// Sum of record counts across entries (overlapping entries double count)
    pub total_transactions: usize,
}

/// Range-aware cache in front of a [`TransactionSource`]
///
/// Each instance owns an independent store; construct one per session or
/// account and share it behind an [`Arc`].
///
/// # Examples
///
/// ```rust
/// use txrange::{FetchOptions, MemorySource, Transaction, TransactionCache};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = MemorySource::<Transaction>::from_json_str(
///     r#"[{"id": 1, "date": "2024-01-05", "amount": "-12.50"}]"#,
/// )?;
/// let cache = TransactionCache::new(source);
///
/// let january = cache
///     .get_transactions("2024-01-01", "2024-01-31", &FetchOptions::new())
///     .await?;
/// assert_eq!(january.len(), 1);
///
/// // Served from the cached January entry
/// cache
///     .get_transactions("2024-01-02", "2024-01-09", &FetchOptions::new())
///     .await?;
/// assert_eq!(cache.source().call_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TransactionCache<S, R = Transaction> {
    source: Arc<S>,
    store: Mutex<RangeStore<R>>,
    config: CacheConfig,
}

impl<S, R> TransactionCache<S, R>
where
    S: TransactionSource<R>,
    R: DatedRecord,
{
    /// Create an empty cache with default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(source, CacheConfig::default())
    }

    /// Create an empty cache with custom configuration
    pub fn with_config(source: S, config: CacheConfig) -> Self {
        Self::from_shared(Arc::new(source), config)
    }

    /// Create an empty cache over a source shared with other owners
    pub fn from_shared(source: Arc<S>, config: CacheConfig) -> Self {
        Self {
            source,
            store: Mutex::new(RangeStore::default()),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The underlying source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve `interval` from cache and source
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Source`] if any gap fetch fails; nothing is cached.
    /// - [`ResolveError::DivergentRecord`] under [`DivergencePolicy::Reject`](crate::DivergencePolicy::Reject).
    pub async fn resolve(
        &self,
        interval: Interval,
        options: &FetchOptions,
    ) -> Result<Resolution<R>, ResolveError> {
        let span = spans::resolve(interval);
        async move {
            let lookup = {
                let mut store = self.store.lock().await;
                let lookup = reconcile(interval, &store);
                if let Lookup::Contained { records, .. } = &lookup {
                    if self.config.write_back_contained {
                        store.put(interval, records.clone());
                    }
                }
                lookup
            };

            let kind = lookup.kind();
            Span::current().record("lookup", kind.name());

            match lookup {
                Lookup::Exact { records } => {
                    info!(
                        interval = %interval,
                        records = records.len(),
                        "Exact cache hit"
                    );
                    Ok(Resolution {
                        records: records.to_vec(),
                        lookup: kind,
                        fetched: Vec::new(),
                        dropped_inconsistent: 0,
                    })
                }
                Lookup::Contained { container, records } => {
                    info!(
                        interval = %interval,
                        container = %container,
                        records = records.len(),
                        write_back = self.config.write_back_contained,
                        "Containment cache hit"
                    );
                    Ok(Resolution {
                        records,
                        lookup: kind,
                        fetched: Vec::new(),
                        dropped_inconsistent: 0,
                    })
                }
                Lookup::Partial { overlaps, gaps } => {
                    info!(
                        interval = %interval,
                        overlaps = overlaps.len(),
                        gaps = gaps.len(),
                        "Partial cache hit"
                    );
                    self.fill(interval, kind, overlaps, gaps, options).await
                }
                Lookup::Miss { gaps } => {
                    info!(interval = %interval, "Complete cache miss");
                    self.fill(interval, kind, Vec::new(), gaps, options).await
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Fetch `gaps`, merge with `overlaps` and write the result back under `interval`
    async fn fill(
        &self,
        interval: Interval,
        kind: LookupKind,
        overlaps: Vec<(Interval, Records<R>)>,
        gaps: Vec<Interval>,
        options: &FetchOptions,
    ) -> Result<Resolution<R>, ResolveError> {
        Span::current().record("gaps", gaps.len());

        let fetched = self.fetch_gaps(&gaps, options).await?;

        let mut dropped_inconsistent = 0;
        let mut fresh = Vec::new();
        let mut gap_entries = Vec::new();
        for (gap, records) in fetched {
            let records = self.check_consistency(gap, records, &mut dropped_inconsistent);
            if self.config.cache_fetched_gaps {
                gap_entries.push((gap, filter_to(&records, gap)));
            }
            fresh.extend(records);
        }

        let cached = overlaps
            .iter()
            .flat_map(|(_, records)| records.iter().cloned());
        let merged = merge_records(interval, fresh, cached, self.config.divergence_policy)?;

        {
            let mut store = self.store.lock().await;
            for (gap, records) in gap_entries {
                store.put(gap, records);
            }
            store.put(interval, merged.records.clone());
        }

        debug!(
            interval = %interval,
            records = merged.records.len(),
            fetched_gaps = gaps.len(),
            divergent = merged.divergent,
            dropped_inconsistent,
            "Stored merged records"
        );

        Ok(Resolution {
            records: merged.records,
            lookup: kind,
            fetched: gaps,
            dropped_inconsistent,
        })
    }

    /// Fetch every gap, at most `max_concurrent_fetches` at a time
    ///
    /// Results come back in gap order. The first failure drops the remaining
    /// in-flight fetches.
    async fn fetch_gaps(
        &self,
        gaps: &[Interval],
        options: &FetchOptions,
    ) -> Result<Vec<(Interval, Vec<R>)>, SourceError> {
        let total = gaps.len();
        let source = &*self.source;

        stream::iter(gaps.iter().copied().enumerate())
            .map(|(index, gap)| {
                async move {
                    debug!(
                        gap = %gap,
                        source = TransactionSource::<R>::name(source),
                        "Fetching gap"
                    );
                    let records = TransactionSource::<R>::fetch(source, gap, options).await?;
                    debug!(gap = %gap, records = records.len(), "Fetched gap");
                    Ok::<_, SourceError>((gap, records))
                }
                .instrument(spans::fetch_gap(gap, index, total))
            })
            .buffered(self.config.fetch_concurrency())
            .try_collect()
            .await
    }

    /// Drop (or only report) fetched records dated outside their gap
    fn check_consistency(&self, gap: Interval, records: Vec<R>, dropped: &mut usize) -> Vec<R> {
        if !self.config.drop_inconsistent_records {
            return records;
        }

        let before = records.len();
        let kept: Vec<R> = records
            .into_iter()
            .filter(|record| {
                let inside = gap.contains_date(record.date());
                if !inside {
                    warn!(
                        gap = %gap,
                        id = ?record.id(),
                        date = %record.date(),
                        "Dropping fetched record dated outside its gap"
                    );
                }
                inside
            })
            .collect();
        *dropped += before - kept.len();
        kept
    }

    /// Records dated within `start..=end`, given as `YYYY-MM-DD`
    ///
    /// # Errors
    ///
    /// [`ResolveError::InvalidInterval`] for malformed or inverted bounds,
    /// before any cache or source access.
    pub async fn get_transactions(
        &self,
        start: &str,
        end: &str,
        options: &FetchOptions,
    ) -> Result<Vec<R>, ResolveError> {
        let interval = Interval::parse(start, end)?;
        Ok(self.resolve(interval, options).await?.into_records())
    }

    /// Records for the calendar month containing `today`
    pub async fn current_month(
        &self,
        today: DateBound,
        options: &FetchOptions,
    ) -> Result<Resolution<R>, ResolveError> {
        self.resolve(Interval::current_month(today)?, options).await
    }

    /// Records from `days` days before `today` through `today`
    pub async fn last_n_days(
        &self,
        today: DateBound,
        days: u32,
        options: &FetchOptions,
    ) -> Result<Resolution<R>, ResolveError> {
        self.resolve(Interval::last_n_days(today, days)?, options)
            .await
    }

    /// Remove the entry keyed exactly by `interval`, or every entry when `None`
    ///
    /// Removing an absent key is a no-op.
    pub async fn invalidate(&self, interval: Option<Interval>) {
        async move {
            let mut store = self.store.lock().await;
            match interval {
                Some(interval) => {
                    let removed = store.remove(&interval);
                    info!(interval = %interval, removed, "Invalidated cached interval");
                }
                None => {
                    let removed = store.len();
                    store.clear();
                    info!(removed, "Cleared transaction cache");
                }
            }
        }
        .instrument(spans::invalidate(interval))
        .await
    }

    /// Clear the entry keyed `"<start>_<end>"`, or everything when `None`
    ///
    /// # Errors
    ///
    /// Returns an [`IntervalError`] for malformed or inverted bounds; the
    /// cache is left untouched.
    pub async fn clear_transaction_cache(
        &self,
        range: Option<(&str, &str)>,
    ) -> Result<(), IntervalError> {
        let interval = range
            .map(|(start, end)| Interval::parse(start, end))
            .transpose()?;
        self.invalidate(interval).await;
        Ok(())
    }

    /// Interval count and total record count
    pub async fn stats(&self) -> StoreStats {
        self.store.lock().await.stats()
    }

    /// Size, sorted keys and total record count
    pub async fn cache_stats(&self) -> CacheStats {
        let store = self.store.lock().await;
        let stats = store.stats();
        CacheStats {
            size: stats.interval_count,
            keys: store.keys().iter().map(Interval::key).collect(),
            total_transactions: stats.total_record_count,
        }
    }
}
