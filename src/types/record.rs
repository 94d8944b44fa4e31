// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The record contract the range cache is generic over

use std::fmt::Debug;
use std::hash::Hash;

use super::date::DateBound;

/// A record that carries a stable identity and a calendar date
///
/// The cache reads nothing else from a record. Two records with the same
/// [`id`](DatedRecord::id) are the same transaction; `PartialEq` is used only
/// to detect copies whose content has diverged (e.g. an amount correction).
pub trait DatedRecord: Clone + PartialEq + Send + Sync + 'static {
    /// Identity type, unique within one data source
    type Id: Clone + Eq + Hash + Debug + Send + Sync;

    /// The record's identity
    fn id(&self) -> &Self::Id;

    /// The date used for interval membership
    fn date(&self) -> DateBound;
}
