// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Deterministic ordering of player aggregates

use std::cmp::Ordering;

use super::aggregate::{PlayerAggregate, PlayerStandings};

/// Leaderboard order: score descending, then transactions descending
pub fn compare_standing(a: &PlayerAggregate, b: &PlayerAggregate) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| b.total_transactions.cmp(&a.total_transactions))
}

/// Sort every aggregate and keep the best `limit`
///
/// The complete set is sorted before truncation. The sort is stable, so
/// players tied on both keys keep their first-seen order.
pub fn rank(standings: PlayerStandings, limit: usize) -> Vec<PlayerAggregate> {
    let mut ranked = standings.into_vec();
    ranked.sort_by(compare_standing);
    ranked.truncate(limit);
    ranked
}
