// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::fmt;

use alloy_primitives::{Address, BlockNumber, U256};
use tracing::{info, Instrument};

use super::Scoreboard;
use crate::blocks::plan_scan;
use crate::config::constants::leaderboard as bounds;
use crate::errors::{QueryError, RaceboardError};
use crate::events::{fetch_events_chunked, ScoreEventFilter};
use crate::leaderboard::{aggregate, rank};
use crate::{spans, ChunkSize};

/// Which events a leaderboard counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    /// Only events written by one game
    #[default]
    Game,
    /// Events of every game sharing the registry
    Global,
}

impl Scope {
    /// `global` selects [`Scope::Global`]; anything else is [`Scope::Game`]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("global") => Scope::Global,
            _ => Scope::Game,
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Game => "game",
            Scope::Global => "global",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a leaderboard query, already clamped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRequest {
    /// Game-scoped or global
    pub scope: Scope,
    /// Explicit game for [`Scope::Game`]; defaults to the server signer
    pub game: Option<Address>,
    /// Rows to return
    pub limit: u64,
    /// Blocks to scan back from the head
    pub range: u64,
    /// Blocks per log query
    pub chunk: ChunkSize,
    /// Log queries allowed
    pub max_chunks: u64,
    /// Whether to resolve display names
    pub with_names: bool,
}

impl Default for LeaderboardRequest {
    fn default() -> Self {
        Self {
            scope: Scope::Game,
            game: None,
            limit: bounds::LIMIT.default,
            range: bounds::RANGE.default,
            chunk: ChunkSize::new(bounds::CHUNK.default),
            max_chunks: bounds::MAX_CHUNKS.default,
            with_names: true,
        }
    }
}

/// One ranked player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    /// 1-based position
    pub rank: usize,
    /// Player address
    pub player: Address,
    /// Display name; `None` when unknown or not requested
    pub username: Option<String>,
    /// Total score in the scanned window
    pub score: U256,
    /// Total transactions in the scanned window
    pub transactions: U256,
}

/// A ranked leaderboard and the window it was computed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardReport {
    /// Scope that was applied
    pub scope: Scope,
    /// Game the events were restricted to
    pub game: Option<Address>,
    /// First scanned block
    pub from_block: BlockNumber,
    /// Last scanned block
    pub to_block: BlockNumber,
    /// Chunk size used for the scan
    pub chunk_size: ChunkSize,
    /// Ranked rows, best first
    pub rows: Vec<LeaderboardRow>,
}

impl Scoreboard {
    fn resolve_game(&self, request: &LeaderboardRequest) -> Result<Option<Address>, QueryError> {
        match request.scope {
            Scope::Global => Ok(None),
            Scope::Game => request
                .game
                .or_else(|| self.signer())
                .map(Some)
                .ok_or(QueryError::GameScopeUnresolved),
        }
    }

    /// Build a ranked leaderboard from the most recent `range` blocks
    ///
    /// Only the returned rows are enriched with display names. Identity
    /// failures leave `username` empty and never fail the request.
    pub async fn leaderboard(
        &self,
        request: &LeaderboardRequest,
    ) -> Result<LeaderboardReport, RaceboardError> {
        let contract = self.require_contract()?;
        let game = self.resolve_game(request)?;

        let span = spans::leaderboard(request.scope.as_str(), game, request.limit, request.range);
        async {
            let latest = self.chain.block_number().await?;
            let plan = plan_scan(latest, request.range, request.chunk, request.max_chunks);

            let mut filter = ScoreEventFilter::new(contract);
            if let Some(game) = game {
                filter = filter.for_game(game);
            }

            let events = fetch_events_chunked(
                self.chain.as_ref(),
                &filter,
                plan.from_block,
                plan.to_block,
                plan.chunk_size,
            )
            .await?;

            let standings = aggregate(&events, game);
            let players = standings.len();
            let top = rank(standings, request.limit as usize);

            let names = if request.with_names && !top.is_empty() {
                let wallets: Vec<Address> = top.iter().map(|row| row.player).collect();
                self.enricher.resolve(&wallets).await
            } else {
                HashMap::new()
            };

            let rows: Vec<LeaderboardRow> = top
                .into_iter()
                .enumerate()
                .map(|(position, row)| LeaderboardRow {
                    rank: position + 1,
                    username: names.get(&row.player).cloned().flatten(),
                    player: row.player,
                    score: row.total_score,
                    transactions: row.total_transactions,
                })
                .collect();

            info!(
                from_block = plan.from_block,
                to_block = plan.to_block,
                events = events.len(),
                players,
                rows = rows.len(),
                "Assembled leaderboard"
            );

            Ok::<_, RaceboardError>(LeaderboardReport {
                scope: request.scope,
                game,
                from_block: plan.from_block,
                to_block: plan.to_block,
                chunk_size: plan.chunk_size,
                rows,
            })
        }
        .instrument(span)
        .await
    }
}
