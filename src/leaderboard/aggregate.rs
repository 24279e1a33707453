// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-player folding of score events
//!
//! Totals are recomputed from scratch for every scan and never persisted.
//! Players keep the order in which they were first seen, which is the order
//! the ranker falls back to for complete ties.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use serde::Serialize;
use tracing::trace;

use crate::chain::ScoreEvent;

/// Running totals of one player within a scanned window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAggregate {
    /// Player address
    pub player: Address,
    /// Sum of score deltas
    pub total_score: U256,
    /// Sum of transaction deltas
    pub total_transactions: U256,
}

impl PlayerAggregate {
    /// Empty aggregate for a player
    pub fn new(player: Address) -> Self {
        Self {
            player,
            total_score: U256::ZERO,
            total_transactions: U256::ZERO,
        }
    }
}

/// Insertion-ordered mapping from player to [`PlayerAggregate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerStandings {
    entries: Vec<PlayerAggregate>,
    index: HashMap<Address, usize>,
}

impl PlayerStandings {
    /// Empty standings
    pub fn new() -> Self {
        Self::default()
    }

    /// Add deltas to a player's totals, creating the player on first sight
    ///
    /// Totals only grow; additions saturate at `U256::MAX`.
    pub fn record(&mut self, player: Address, score: U256, transactions: U256) {
        let slot = match self.index.get(&player) {
            Some(&slot) => slot,
            None => {
                self.entries.push(PlayerAggregate::new(player));
                let slot = self.entries.len() - 1;
                self.index.insert(player, slot);
                slot
            }
        };

        let entry = &mut self.entries[slot];
        entry.total_score = entry.total_score.saturating_add(score);
        entry.total_transactions = entry.total_transactions.saturating_add(transactions);
    }

    /// Totals for one player, if seen
    pub fn get(&self, player: &Address) -> Option<&PlayerAggregate> {
        self.index.get(player).map(|&slot| &self.entries[slot])
    }

    /// Number of distinct players
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no player was seen
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Aggregates in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &PlayerAggregate> {
        self.entries.iter()
    }

    /// Consume into aggregates in first-seen order
    pub fn into_vec(self) -> Vec<PlayerAggregate> {
        self.entries
    }
}

/// Fold events into per-player totals
///
/// With a `scope`, events written by any other game are skipped even if the
/// fetch-time filter should already have excluded them. Address comparison
/// is byte-wise and therefore case-insensitive.
pub fn aggregate(events: &[ScoreEvent], scope: Option<Address>) -> PlayerStandings {
    let mut standings = PlayerStandings::new();
    let mut skipped = 0usize;

    for event in events {
        if let Some(game) = scope {
            if event.game != game {
                skipped += 1;
                continue;
            }
        }
        standings.record(event.player, event.score_amount, event.transaction_amount);
    }

    trace!(
        events = events.len(),
        skipped,
        players = standings.len(),
        "Aggregated score events"
    );

    standings
}
