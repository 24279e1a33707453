// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Canonical event definition of the player registry contract
//!
//! The registry emits one event per accepted score write. Three fields are
//! indexed and therefore usable as query-time filters; the transaction amount
//! only lives in the log data.
//!
//! # Event Signature
//!
//! - **PlayerDataUpdated**: `PlayerDataUpdated(address,address,uint256,uint256)`
//!
//! | Topic | Field |
//! |---|---|
//! | topic0 | event signature hash |
//! | topic1 | `game` |
//! | topic2 | `player` |
//! | topic3 | `scoreAmount` |
//!
//! # Example: Decoding logs
//!
//! ```rust,ignore
//! use raceboard::PlayerDataUpdated;
//! use alloy_sol_types::SolEvent;
//!
//! for log in provider.get_logs(&filter).await? {
//!     let event = PlayerDataUpdated::decode_log(&log.inner)?;
//!     println!("{} scored {} in {}", event.player, event.scoreAmount, event.game);
//! }
//! ```

use std::fmt::Debug;

use alloy_sol_types::sol;

sol! {
    /// Emitted by the registry whenever a game records score for a player
    ///
    /// # Fields
    ///
    /// - `game`: Address of the game (the server signer) that wrote the score (indexed)
    /// - `player`: Wallet that earned the score (indexed)
    /// - `scoreAmount`: Score added by this write (indexed)
    /// - `transactionAmount`: Transactions added by this write
    event PlayerDataUpdated(
        address indexed game,
        address indexed player,
        uint256 indexed scoreAmount,
        uint256 transactionAmount
    );
}

impl Debug for PlayerDataUpdated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PlayerDataUpdated(game: {}, player: {}, score: {}, transactions: {})",
            self.game, self.player, self.scoreAmount, self.transactionAmount
        )
    }
}
