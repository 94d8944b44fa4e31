// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Exact-key storage of fetched record sets
//!
//! The store knows nothing about interval arithmetic: lookups are by exact
//! key only. Reconciliation scans a [`RangeStore::entries`] snapshot instead.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::types::interval::Interval;

/// Immutable, cheaply clonable view of one entry's records
pub type Records<R> = Arc<[R]>;

/// Size metrics for a [`RangeStore`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of cached intervals
    pub interval_count: usize,
    /// Sum of record counts across all entries
    ///
    /// Records present in several overlapping entries are counted once per
    /// entry, so this is a size metric rather than a distinct transaction count.
    pub total_record_count: usize,
}

/// Mapping from interval to the records fetched for exactly that interval
///
/// Entries may overlap freely; a 30-day entry and a 7-day entry inside it can
/// coexist. Entries are only replaced by [`put`](RangeStore::put) for the
/// same key or dropped by explicit [`remove`](RangeStore::remove) /
/// [`clear`](RangeStore::clear). There is no expiry or size-based eviction.
///
/// # Examples
///
/// ```
/// use txrange::{Interval, RangeStore, Transaction};
///
/// let mut store: RangeStore<Transaction> = RangeStore::default();
/// let january = Interval::parse("2024-01-01", "2024-01-31").unwrap();
///
/// store.put(january, Vec::<Transaction>::new());
/// assert!(store.get(&january).is_some());
/// assert_eq!(store.stats().interval_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct RangeStore<R> {
    entries: HashMap<Interval, Records<R>>,
}

impl<R> Default for RangeStore<R> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<R> RangeStore<R> {
    /// Insert or replace the entry for `key`
    pub fn put(&mut self, key: Interval, records: impl Into<Records<R>>) {
        self.entries.insert(key, records.into());
    }

    /// Exact-key lookup
    pub fn get(&self, key: &Interval) -> Option<Records<R>> {
        self.entries.get(key).cloned()
    }

    /// Point-in-time snapshot of every entry
    pub fn entries(&self) -> Vec<(Interval, Records<R>)> {
        self.entries
            .iter()
            .map(|(key, records)| (*key, Arc::clone(records)))
            .collect()
    }

    /// Cached keys in ascending order
    pub fn keys(&self) -> Vec<Interval> {
        let mut keys: Vec<Interval> = self.entries.keys().copied().collect();
        keys.sort();
        keys
    }

    /// Delete one entry; no-op when absent. Returns whether an entry was removed.
    pub fn remove(&mut self, key: &Interval) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Delete every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached intervals
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interval count and total record count
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            interval_count: self.entries.len(),
            total_record_count: self.entries.values().map(|records| records.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(start: &str, end: &str) -> Interval {
        Interval::parse(start, end).unwrap()
    }

    #[test]
    fn test_empty_store() {
        let store: RangeStore<u32> = RangeStore::default();
        assert!(store.is_empty());
        assert!(store.get(&interval("2024-01-01", "2024-01-31")).is_none());
        assert_eq!(store.stats(), StoreStats::default());
    }

    #[test]
    fn test_put_replaces_same_key() {
        let mut store: RangeStore<i32> = RangeStore::default();
        let key = interval("2024-01-01", "2024-01-31");

        store.put(key, vec![1, 2, 3]);
        store.put(key, vec![4]);

        assert_eq!(store.len(), 1);
        assert_eq!(&*store.get(&key).unwrap(), &[4]);
    }

    #[test]
    fn test_get_is_exact_only() {
        let mut store: RangeStore<i32> = RangeStore::default();
        store.put(interval("2024-01-01", "2024-01-31"), vec![1]);

        assert!(store.get(&interval("2024-01-10", "2024-01-20")).is_none());
    }

    #[test]
    fn test_overlapping_entries_coexist() {
        let mut store: RangeStore<i32> = RangeStore::default();
        store.put(interval("2024-01-01", "2024-01-31"), vec![1, 2, 3]);
        store.put(interval("2024-01-08", "2024-01-14"), vec![2]);

        let stats = store.stats();
        assert_eq!(stats.interval_count, 2);
        // Record 2 is counted once per entry
        assert_eq!(stats.total_record_count, 4);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store: RangeStore<i32> = RangeStore::default();
        let a = interval("2024-01-01", "2024-01-31");
        let b = interval("2024-02-01", "2024-02-29");
        store.put(a, vec![1]);
        store.put(b, vec![2]);

        assert!(store.remove(&a));
        assert!(!store.remove(&a));
        assert_eq!(store.keys(), vec![b]);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_is_independent_of_later_writes() {
        let mut store: RangeStore<i32> = RangeStore::default();
        let key = interval("2024-01-01", "2024-01-31");
        store.put(key, vec![1, 2]);

        let snapshot = store.entries();
        store.clear();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(&*snapshot[0].1, &[1, 2]);
    }

    #[test]
    fn test_keys_sorted() {
        let mut store: RangeStore<i32> = RangeStore::default();
        store.put(interval("2024-03-01", "2024-03-31"), vec![0]);
        store.put(interval("2024-01-01", "2024-01-31"), vec![0]);
        store.put(interval("2024-02-01", "2024-02-29"), vec![0]);

        let keys: Vec<String> = store.keys().iter().map(Interval::key).collect();
        assert_eq!(
            keys,
            vec![
                "2024-01-01_2024-01-31",
                "2024-02-01_2024-02-29",
                "2024-03-01_2024-03-31"
            ]
        );
    }
}
