// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for txrange integration tests
//!
//! Provides a scripted source so resolver behavior can be tested without a
//! real provider.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use txrange::{FetchOptions, Interval, SourceError, Transaction, TransactionSource};

/// Build a transaction from text fields
pub fn tx(id: u64, date: &str, amount: &str) -> Transaction {
    Transaction::new(id, date.parse().unwrap(), amount.parse().unwrap())
}

/// Parse an interval from two `YYYY-MM-DD` bounds
pub fn interval(start: &str, end: &str) -> Interval {
    Interval::parse(start, end).unwrap()
}

/// Sorted ids of `records`
pub fn ids(records: &[Transaction]) -> Vec<u64> {
    let mut ids: Vec<u64> = records.iter().map(|t| t.id).collect();
    ids.sort_unstable();
    ids
}

/// Scripted TransactionSource for testing resolver logic
///
/// Records every call, can fail on demand, can delay each fetch and tracks
/// how many fetches were in flight at once.
///
/// # Example
///
/// ```rust,ignore
/// let source = RecordingSource::new(vec![tx(1, "2024-01-05", "-10")])
///     .with_delay(Duration::from_millis(50))
///     .failing_on(interval("2024-01-15", "2024-01-20"));
///
/// let cache = TransactionCache::new(source);
/// ```
pub struct RecordingSource {
    records: Mutex<Vec<Transaction>>,
    calls: Mutex<Vec<(Interval, FetchOptions)>>,
    fail_all: AtomicBool,
    fail_on: Mutex<Vec<Interval>>,
    ignore_bounds: bool,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl RecordingSource {
    /// Create a source serving `records`
    pub fn new(records: Vec<Transaction>) -> Self {
        Self {
            records: Mutex::new(records),
            calls: Mutex::new(Vec::new()),
            fail_all: AtomicBool::new(false),
            fail_on: Mutex::new(Vec::new()),
            ignore_bounds: false,
            delay: None,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Sleep for `delay` inside every fetch
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail fetches for exactly `gap`
    pub fn failing_on(self, gap: Interval) -> Self {
        self.fail_on.lock().unwrap().push(gap);
        self
    }

    /// Return every record regardless of the requested interval
    pub fn ignoring_bounds(mut self) -> Self {
        self.ignore_bounds = true;
        self
    }

    /// Toggle failure of every fetch
    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    /// Replace the served records
    pub fn set_records(&self, records: Vec<Transaction>) {
        *self.records.lock().unwrap() = records;
    }

    /// Number of fetches attempted
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Intervals requested, in call order
    pub fn requested(&self) -> Vec<Interval> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(interval, _)| *interval)
            .collect()
    }

    /// Options passed with each call
    pub fn options_seen(&self) -> Vec<FetchOptions> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, options)| options.clone())
            .collect()
    }

    /// Highest number of fetches observed in flight at once
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransactionSource for RecordingSource {
    async fn fetch(
        &self,
        interval: Interval,
        options: &FetchOptions,
    ) -> Result<Vec<Transaction>, SourceError> {
        self.calls.lock().unwrap().push((interval, options.clone()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let failing =
            self.fail_all.load(Ordering::SeqCst) || self.fail_on.lock().unwrap().contains(&interval);
        if failing {
            return Err(SourceError::request_failed(
                format!("fetch {interval}"),
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            ));
        }

        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|t| self.ignore_bounds || interval.contains_date(t.date))
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "RecordingSource"
    }
}
