// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for raceboard operations.
//!
//! Telemetry concerns are kept out of business logic. Instead of using
//! `#[instrument]` attributes directly on functions, each instrumented
//! operation has a corresponding span helper function in this module.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async { /* business logic */ }.instrument(span).await
//! }
//! ```
//!
//! Futures are instrumented rather than entered so they stay `Send` across
//! await points.

use alloy_primitives::{Address, BlockNumber};
use tracing::{Level, Span};

/// Create span for assembling a ranked leaderboard.
///
/// Parent: HTTP request span (if any)
/// Children: scan_range, resolve_identities
#[inline]
pub(crate) fn leaderboard(scope: &str, game: Option<Address>, limit: u64, range: u64) -> Span {
    tracing::span!(
        Level::INFO,
        "raceboard.leaderboard",
        scope = scope,
        game = ?game,
        limit = limit,
        range = range,
    )
}

/// Create span for assembling one player's event history.
///
/// Parent: HTTP request span (if any)
/// Children: scan_range
#[inline]
pub(crate) fn player_events(player: Address, limit: u64, range: u64) -> Span {
    tracing::info_span!(
        "raceboard.player_events",
        player = %player,
        limit = limit,
        range = range,
    )
}

/// Create span for reading one player's on-chain totals.
#[inline]
pub(crate) fn player_stats(player: Address, game: Option<Address>) -> Span {
    tracing::info_span!("raceboard.player_stats", player = %player, game = ?game)
}

/// Create span for walking a block window in chunks.
///
/// Parent: leaderboard or player_events span
/// Children: one eth_getLogs request per chunk
#[inline]
pub(crate) fn scan_range(
    contract: Address,
    from_block: BlockNumber,
    to_block: BlockNumber,
    chunk_size: u64,
) -> Span {
    tracing::debug_span!(
        "raceboard.scan_range",
        contract = %contract,
        from_block = from_block,
        to_block = to_block,
        chunk_size = chunk_size,
    )
}

/// Create span for resolving a batch of display names.
///
/// Parent: leaderboard span
#[inline]
pub(crate) fn resolve_identities(wallets: usize, workers: usize) -> Span {
    tracing::debug_span!(
        "raceboard.resolve_identities",
        wallets = wallets,
        workers = workers,
    )
}

/// Create span for validating and writing a score submission.
///
/// Parent: None (root span for this operation)
/// Children: GAME_ROLE/hasRole reads, updatePlayerData transaction
#[inline]
pub(crate) fn submit_score(wallet: Address) -> Span {
    tracing::info_span!("raceboard.submit_score", wallet = %wallet)
}
