// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Interval reconciliation: classify a request against the cached intervals
//!
//! A request is resolved in priority order as an exact hit, a containment
//! hit, a partial (overlap) hit or a complete miss. For the last two the
//! uncached sub-intervals ("gaps") are computed with a single sorted sweep.
//!
//! # Gap boundaries
//!
//! Gaps are conceptually half-open but carry inclusive bounds: a gap that
//! ends where a cached interval starts (or starts where one ends) shares that
//! boundary day with it. Fetching the boundary day twice is harmless because
//! records are filtered to inclusive bounds and deduplicated by id, while
//! leaving it out could lose records dated on the boundary.

use serde::Serialize;

use super::store::{RangeStore, Records};
use crate::types::interval::Interval;
use crate::types::record::DatedRecord;

/// The four mutually exclusive lookup classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    /// An entry exists for exactly the requested interval
    Exact,
    /// A single entry fully contains the requested interval
    Contained,
    /// Entries intersect the request but none contains it
    Partial,
    /// No entry intersects the request
    Miss,
}

impl LookupKind {
    /// Whether the request can be served without contacting the source
    pub fn is_hit(&self) -> bool {
        matches!(self, LookupKind::Exact | LookupKind::Contained)
    }

    /// Short lowercase name for logs
    pub fn name(&self) -> &'static str {
        match self {
            LookupKind::Exact => "exact",
            LookupKind::Contained => "contained",
            LookupKind::Partial => "partial",
            LookupKind::Miss => "miss",
        }
    }
}

/// Outcome of reconciling a request against a store snapshot
#[derive(Debug, Clone)]
pub enum Lookup<R> {
    /// Records of the entry keyed by exactly the request
    Exact {
        /// The cached records, unchanged
        records: Records<R>,
    },
    /// Records of a containing entry, restricted to the request
    Contained {
        /// Key of the containing entry
        container: Interval,
        /// The container's records dated within the request
        records: Vec<R>,
    },
    /// Intersecting entries plus the gaps between them
    Partial {
        /// Intersecting entries sorted by interval
        overlaps: Vec<(Interval, Records<R>)>,
        /// Uncached sub-intervals of the request, sorted; may be empty when
        /// the overlaps jointly cover the request
        gaps: Vec<Interval>,
    },
    /// Nothing cached intersects the request
    Miss {
        /// Always exactly the request
        gaps: Vec<Interval>,
    },
}

impl<R> Lookup<R> {
    /// The classification of this lookup
    pub fn kind(&self) -> LookupKind {
        match self {
            Lookup::Exact { .. } => LookupKind::Exact,
            Lookup::Contained { .. } => LookupKind::Contained,
            Lookup::Partial { .. } => LookupKind::Partial,
            Lookup::Miss { .. } => LookupKind::Miss,
        }
    }

    /// Sub-intervals that must be fetched; empty for hits
    pub fn gaps(&self) -> &[Interval] {
        match self {
            Lookup::Exact { .. } | Lookup::Contained { .. } => &[],
            Lookup::Partial { gaps, .. } | Lookup::Miss { gaps } => gaps,
        }
    }
}

/// Classify `request` against the entries of `store`
///
/// When several entries contain the request, the narrowest one is used
/// (fewest days, then earliest key) so that the least filtering is needed and
/// the choice does not depend on hash iteration order.
pub fn reconcile<R: DatedRecord>(request: Interval, store: &RangeStore<R>) -> Lookup<R> {
    if let Some(records) = store.get(&request) {
        return Lookup::Exact { records };
    }

    let entries = store.entries();

    if let Some((container, records)) = entries
        .iter()
        .filter(|(key, _)| key.contains(&request))
        .min_by_key(|(key, _)| (key.days(), *key))
    {
        return Lookup::Contained {
            container: *container,
            records: filter_to(records, request),
        };
    }

    let mut overlaps: Vec<(Interval, Records<R>)> = entries
        .into_iter()
        .filter(|(key, _)| key.intersects(&request))
        .collect();

    if overlaps.is_empty() {
        return Lookup::Miss {
            gaps: vec![request],
        };
    }

    overlaps.sort_by_key(|(key, _)| *key);
    let gaps = find_gaps(request, overlaps.iter().map(|(key, _)| *key));

    Lookup::Partial { overlaps, gaps }
}

/// Compute the sub-intervals of `request` not covered by `covered`
///
/// Intervals in `covered` that do not intersect the request are ignored.
/// With nothing intersecting, the whole request is the single gap.
///
/// # Examples
///
/// ```
/// use txrange::{find_gaps, Interval};
///
/// let request = Interval::parse("2024-01-01", "2024-01-31").unwrap();
/// let cached = [
///     Interval::parse("2024-01-01", "2024-01-15").unwrap(),
///     Interval::parse("2024-01-20", "2024-01-31").unwrap(),
/// ];
///
/// let gaps = find_gaps(request, cached);
/// assert_eq!(gaps, vec![Interval::parse("2024-01-15", "2024-01-20").unwrap()]);
/// ```
pub fn find_gaps(request: Interval, covered: impl IntoIterator<Item = Interval>) -> Vec<Interval> {
    let mut covered: Vec<Interval> = covered
        .into_iter()
        .filter(|interval| interval.intersects(&request))
        .collect();

    if covered.is_empty() {
        return vec![request];
    }

    covered.sort();

    let mut gaps = Vec::new();
    let mut cursor = request.start();

    for interval in covered {
        if cursor < interval.start() {
            gaps.push(Interval::from_ordered(cursor, interval.start()));
        }
        if interval.end() > cursor {
            cursor = interval.end().min(request.end());
        }
    }

    if cursor < request.end() {
        gaps.push(Interval::from_ordered(cursor, request.end()));
    }

    gaps
}

/// Clone the records dated within `interval`, preserving order
pub fn filter_to<R: DatedRecord>(records: &[R], interval: Interval) -> Vec<R> {
    records
        .iter()
        .filter(|record| interval.contains_date(record.date()))
        .cloned()
        .collect()
}
