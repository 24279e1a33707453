// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::{Address, BlockNumber};
use futures::future::try_join3;
use futures::TryFutureExt;
use tracing::{debug, info, Instrument};

use super::Scoreboard;
use crate::blocks::plan_scan;
use crate::chain::{PlayerTotals, ScoreEvent};
use crate::config::constants::player_events as bounds;
use crate::errors::{RaceboardError, RpcError};
use crate::events::{fetch_events_chunked, ScoreEventFilter};
use crate::{spans, ChunkSize};

/// Parameters of a player history query, already clamped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEventsRequest {
    /// Player whose events are scanned (indexed filter)
    pub player: Address,
    /// Rows returned, newest first
    pub limit: u64,
    /// Blocks scanned back from the head
    pub range: u64,
    /// Blocks per log query
    pub chunk: ChunkSize,
    /// Log queries allowed for the scan
    pub max_chunks: u64,
}

impl PlayerEventsRequest {
    /// Request with default bounds for `player`
    pub fn new(player: Address) -> Self {
        Self {
            player,
            limit: bounds::LIMIT.default,
            range: bounds::RANGE.default,
            chunk: ChunkSize::new(bounds::CHUNK.default),
            max_chunks: bounds::MAX_CHUNKS.default,
        }
    }
}

/// Raw score events of one player, newest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEventsReport {
    /// First scanned block
    pub from_block: BlockNumber,
    /// Last scanned block
    pub to_block: BlockNumber,
    /// At most `limit` events, by block number descending
    pub rows: Vec<ScoreEvent>,
}

/// Totals of a player within one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameTotals {
    /// The game the totals belong to (the server signer)
    pub game: Address,
    /// Score and transactions recorded by that game
    pub totals: PlayerTotals,
}

/// Cumulative totals of a player as stored by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStats {
    /// Across every game
    pub total: PlayerTotals,
    /// Within the server signer's game; absent without a signer
    pub game: Option<GameTotals>,
}

/// Newest first; pending events count as block zero
fn newest_first(rows: &mut [ScoreEvent]) {
    rows.sort_by(|a, b| b.block_number.unwrap_or(0).cmp(&a.block_number.unwrap_or(0)));
}

impl Scoreboard {
    /// Score events of one player in the most recent `range` blocks
    pub async fn player_events(
        &self,
        request: &PlayerEventsRequest,
    ) -> Result<PlayerEventsReport, RaceboardError> {
        let contract = self.require_contract()?;

        let span = spans::player_events(request.player, request.limit, request.range);
        async {
            let latest = self.chain.block_number().await?;
            let plan = plan_scan(latest, request.range, request.chunk, request.max_chunks);
            let filter = ScoreEventFilter::new(contract).for_player(request.player);

            let mut rows = fetch_events_chunked(
                self.chain.as_ref(),
                &filter,
                plan.from_block,
                plan.to_block,
                plan.chunk_size,
            )
            .await?;

            let found = rows.len();
            newest_first(&mut rows);
            rows.truncate(request.limit as usize);

            info!(
                from_block = plan.from_block,
                to_block = plan.to_block,
                found,
                returned = rows.len(),
                "Collected player events"
            );

            Ok::<_, RaceboardError>(PlayerEventsReport {
                from_block: plan.from_block,
                to_block: plan.to_block,
                rows,
            })
        }
        .instrument(span)
        .await
    }

    /// Cumulative totals of `player`, read from contract state
    ///
    /// The global totals and, when a server signer exists, the per-game
    /// totals are read concurrently. Any failing read fails the whole query.
    pub async fn stats(&self, player: Address) -> Result<PlayerStats, RaceboardError> {
        let contract = self.require_contract()?;
        let game = self.signer();

        let span = spans::player_stats(player, game);
        async {
            let per_game = async {
                match game {
                    Some(game) => self
                        .chain
                        .player_data_per_game(contract, game, player)
                        .map_ok(|totals| Some(GameTotals { game, totals }))
                        .await,
                    None => Ok::<_, RpcError>(None),
                }
            };

            let (score, transactions, game) = try_join3(
                self.chain.total_score_of_player(contract, player),
                self.chain.total_transactions_of_player(contract, player),
                per_game,
            )
            .await?;

            debug!(%score, %transactions, has_game = game.is_some(), "Read player totals");

            Ok::<_, RaceboardError>(PlayerStats {
                total: PlayerTotals {
                    score,
                    transactions,
                },
                game,
            })
        }
        .instrument(span)
        .await
    }
}
