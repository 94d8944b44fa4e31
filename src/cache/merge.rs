// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Deduplicating merge of fetched and cached records
//!
//! Records are identified by [`DatedRecord::id`]. Fetched records are taken
//! first, so a fetched copy always wins over a cached one; among copies from
//! the same origin the first seen wins. Copies that share an id but differ in
//! content are reported according to the configured [`DivergencePolicy`].

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::warn;

use crate::config::DivergencePolicy;
use crate::errors::ResolveError;
use crate::types::interval::Interval;
use crate::types::record::DatedRecord;

/// Result of a merge
#[derive(Debug, Clone, PartialEq)]
pub struct Merged<R> {
    /// Deduplicated records dated within the merge interval
    pub records: Vec<R>,
    /// Number of duplicate ids whose copies differed in content
    pub divergent: usize,
}

/// Accumulates records, keeping one per id
struct Deduper<R: DatedRecord> {
    index: HashMap<R::Id, usize>,
    records: Vec<R>,
    divergent: usize,
    policy: DivergencePolicy,
}

impl<R: DatedRecord> Deduper<R> {
    fn new(policy: DivergencePolicy) -> Self {
        Self {
            index: HashMap::new(),
            records: Vec::new(),
            divergent: 0,
            policy,
        }
    }

    fn push(&mut self, record: R, origin: &'static str) -> Result<(), ResolveError> {
        match self.index.entry(record.id().clone()) {
            Entry::Vacant(slot) => {
                slot.insert(self.records.len());
                self.records.push(record);
            }
            Entry::Occupied(slot) => {
                let kept = &self.records[*slot.get()];
                if *kept != record {
                    self.divergent += 1;
                    if self.policy == DivergencePolicy::Reject {
                        return Err(ResolveError::divergent_record(record.id()));
                    }
                    warn!(
                        id = ?record.id(),
                        discarded_origin = origin,
                        kept_date = %kept.date(),
                        discarded_date = %record.date(),
                        "Duplicate record id with divergent content, keeping first copy"
                    );
                }
            }
        }
        Ok(())
    }
}

/// Merge `fetched` and `cached` records restricted to `interval`
///
/// Records dated outside `interval` are discarded from both inputs.
///
/// # Errors
///
/// Returns [`ResolveError::DivergentRecord`] when two copies of an id differ
/// and `policy` is [`DivergencePolicy::Reject`].
pub fn merge_records<R: DatedRecord>(
    interval: Interval,
    fetched: impl IntoIterator<Item = R>,
    cached: impl IntoIterator<Item = R>,
    policy: DivergencePolicy,
) -> Result<Merged<R>, ResolveError> {
    let mut deduper = Deduper::new(policy);

    for record in fetched {
        if interval.contains_date(record.date()) {
            deduper.push(record, "fetched")?;
        }
    }
    for record in cached {
        if interval.contains_date(record.date()) {
            deduper.push(record, "cached")?;
        }
    }

    Ok(Merged {
        records: deduper.records,
        divergent: deduper.divergent,
    })
}
