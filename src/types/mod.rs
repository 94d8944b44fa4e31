// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across txrange.
//!
//! This module provides the domain types the cache operates on:
//! - Calendar date bounds with a fixed, sortable text form
//! - Closed date intervals used as cache keys
//! - The record contract and the provider's transaction record

pub mod date;
pub mod interval;
pub mod record;
pub mod transaction;

// Note: Public types are re-exported from lib.rs, not here
