// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known formats and defaults
//!
//! This module centralizes the textual formats and default values used
//! throughout the txrange crate.

/// `chrono` format string for date bounds; sorts lexicographically in date order
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Separator between the two bounds of a rendered interval key
pub const KEY_SEPARATOR: char = '_';

/// Category name used for transactions without a known category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Default bound on concurrently issued gap fetches
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;

/// Default lookback window when a caller supplies no dates
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
