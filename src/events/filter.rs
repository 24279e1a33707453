// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Builder for `PlayerDataUpdated` event filters
//!
//! Wraps the indexed-topic plumbing of [`alloy_rpc_types::Filter`] behind
//! domain names: `for_game` narrows topic1, `for_player` narrows topic2.
//! Block ranges are deliberately not part of the builder; the chunked fetcher
//! attaches one range per query.
//!
//! # Examples
//!
//! ```rust,ignore
//! use raceboard::events::filter::ScoreEventFilter;
//!
//! // Every score write of one game
//! let filter = ScoreEventFilter::new(registry).for_game(game);
//!
//! // One player's history across all games
//! let filter = ScoreEventFilter::new(registry).for_player(player);
//! ```

use alloy_primitives::Address;
use alloy_rpc_types::Filter;
use alloy_sol_types::SolEvent;

use crate::events::definitions::PlayerDataUpdated;

/// Query-time filter over the registry's `PlayerDataUpdated` events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEventFilter {
    contract: Address,
    game: Option<Address>,
    player: Option<Address>,
}

impl ScoreEventFilter {
    /// Match every `PlayerDataUpdated` event emitted by `contract`
    pub fn new(contract: Address) -> Self {
        Self {
            contract,
            game: None,
            player: None,
        }
    }

    /// Only match events written by `game` (topic1)
    pub fn for_game(mut self, game: Address) -> Self {
        self.game = Some(game);
        self
    }

    /// Only match events about `player` (topic2)
    pub fn for_player(mut self, player: Address) -> Self {
        self.player = Some(player);
        self
    }

    /// The registry contract being scanned
    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Game restriction, if any
    pub fn game(&self) -> Option<Address> {
        self.game
    }

    /// Player restriction, if any
    pub fn player(&self) -> Option<Address> {
        self.player
    }

    /// Build the RPC filter for one inclusive block range
    pub fn to_filter(&self, from_block: u64, to_block: u64) -> Filter {
        let mut filter = Filter::new()
            .address(self.contract)
            .event_signature(PlayerDataUpdated::SIGNATURE_HASH)
            .from_block(from_block)
            .to_block(to_block);

        if let Some(game) = self.game {
            filter = filter.topic1(game.into_word());
        }
        if let Some(player) = self.player {
            filter = filter.topic2(player.into_word());
        }

        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const REGISTRY: Address = address!("cecbff203c8b6044f52ce23d914a1bfd997541a4");

    #[test]
    fn test_unscoped_filter_has_no_indexed_arguments() {
        let filter = ScoreEventFilter::new(REGISTRY).to_filter(100, 190);

        assert_eq!(filter.get_from_block(), Some(100));
        assert_eq!(filter.get_to_block(), Some(190));
        assert!(filter.topics[1].is_empty());
        assert!(filter.topics[2].is_empty());
    }

    #[test]
    fn test_game_scope_sets_topic1_only() {
        let game = address!("1111111111111111111111111111111111111111");
        let filter = ScoreEventFilter::new(REGISTRY)
            .for_game(game)
            .to_filter(0, 90);

        assert!(!filter.topics[1].is_empty());
        assert!(filter.topics[2].is_empty());
    }

    #[test]
    fn test_player_scope_sets_topic2_only() {
        let player = address!("2222222222222222222222222222222222222222");
        let scoped = ScoreEventFilter::new(REGISTRY).for_player(player);

        assert_eq!(scoped.player(), Some(player));
        assert_eq!(scoped.game(), None);

        let filter = scoped.to_filter(0, 90);
        assert!(filter.topics[1].is_empty());
        assert!(!filter.topics[2].is_empty());
    }
}
