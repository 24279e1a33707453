// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain client capability used by the scanning pipeline and the assemblers
//!
//! Everything the engine needs from the chain goes through [`ChainClient`]:
//! the current head, ranged event queries, point reads of the registry's
//! state and the two state-changing calls of the score and registration flows.
//! The production implementation is [`AlloyChainClient`]; tests script their
//! own.
//!
//! The registry contract address is passed per call so one client can serve
//! several registries, and so "contract not configured" stays a validation
//! concern of the caller.

mod registry;

pub use registry::{AlloyChainClient, IPlayerRegistry};

use alloy_primitives::{Address, TxHash, B256, U256};
use async_trait::async_trait;

use crate::errors::{EventProcessingError, RpcError};
use crate::events::filter::ScoreEventFilter;

/// One decoded `PlayerDataUpdated` event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEvent {
    /// Game that wrote the score
    pub game: Address,
    /// Player the score belongs to
    pub player: Address,
    /// Score added by this write
    pub score_amount: U256,
    /// Transactions added by this write
    pub transaction_amount: U256,
    /// Block the event was included in; absent for pending logs
    pub block_number: Option<u64>,
    /// Transaction that emitted the event; absent for pending logs
    pub transaction_hash: Option<TxHash>,
}

/// Cumulative totals read from contract storage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerTotals {
    /// Total score
    pub score: U256,
    /// Total transactions
    pub transactions: U256,
}

/// A game's registration record in the registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameInfo {
    /// Registered game address; zero when the game is not registered
    pub game: Address,
    /// Display name
    pub name: String,
    /// Image URL
    pub image: String,
    /// Game URL
    pub url: String,
}

/// Capability the engine consumes from an EVM chain
///
/// Implementations do not retry. A failing call surfaces immediately so the
/// assembler can turn it into a "not ok" response.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current chain head
    async fn block_number(&self) -> Result<u64, RpcError>;

    /// Decoded `PlayerDataUpdated` events matching `filter` in `[from_block, to_block]`
    ///
    /// Events are returned in the order the node reports them.
    async fn score_events(
        &self,
        filter: &ScoreEventFilter,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ScoreEvent>, EventProcessingError>;

    /// `totalScoreOfPlayer(player)`
    async fn total_score_of_player(
        &self,
        contract: Address,
        player: Address,
    ) -> Result<U256, RpcError>;

    /// `totalTransactionsOfPlayer(player)`
    async fn total_transactions_of_player(
        &self,
        contract: Address,
        player: Address,
    ) -> Result<U256, RpcError>;

    /// `playerDataPerGame(game, player)`
    async fn player_data_per_game(
        &self,
        contract: Address,
        game: Address,
        player: Address,
    ) -> Result<PlayerTotals, RpcError>;

    /// Address of the server signer, if the client can send transactions
    fn signer_address(&self) -> Option<Address>;

    /// `GAME_ROLE()`
    async fn game_role(&self, contract: Address) -> Result<B256, RpcError>;

    /// `hasRole(role, account)`
    async fn has_role(
        &self,
        contract: Address,
        role: B256,
        account: Address,
    ) -> Result<bool, RpcError>;

    /// Send `updatePlayerData(player, score, transactions)` from the server signer
    async fn update_player_data(
        &self,
        contract: Address,
        player: Address,
        score_amount: U256,
        transaction_amount: U256,
    ) -> Result<TxHash, RpcError>;

    /// `games(game)`
    async fn game_info(&self, contract: Address, game: Address) -> Result<GameInfo, RpcError>;

    /// Send `registerGame(game, name, image, url)` from the server signer
    async fn register_game(&self, contract: Address, game: &GameInfo)
        -> Result<TxHash, RpcError>;
}
