// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Interval-keyed caching infrastructure.
//!
//! This module provides the pieces the resolver is built from:
//! - [`store`]: exact-key storage of record sets with size metrics
//! - [`reconcile`]: classification of a request and gap computation
//! - [`merge`]: id-based deduplication of fetched and cached records

pub mod merge;
pub mod reconcile;
pub mod store;
