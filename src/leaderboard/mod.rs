// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Aggregation and ranking of scanned score events.

pub mod aggregate;
pub mod rank;

pub use aggregate::{aggregate, PlayerAggregate, PlayerStandings};
pub use rank::{compare_standing, rank};
