// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # Raceboard
//!
//! Leaderboard engine for an on-chain racing game. Games record scores in a
//! shared player registry contract, which emits a `PlayerDataUpdated` event
//! per write. Raceboard replays those events over a recent block window and
//! serves ranked leaderboards, per-player histories and cumulative totals.
//!
//! ## Pipeline
//!
//! 1. [`plan_scan`] bounds the block window by a chunk budget
//! 2. [`fetch_events_chunked`] queries the window in fixed-size chunks, fail-fast
//! 3. [`aggregate`] folds events into per-player totals
//! 4. [`rank`] orders players by score, then transactions, and truncates
//! 5. [`IdentityEnricher`] resolves display names for the returned rows only
//!
//! [`Scoreboard`] composes these into the query shapes served by [`api`].
//! Score writes go through the signed nonce flow of [`ScoreSubmitter`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use raceboard::{LeaderboardRequest, Scope, Scoreboard};
//!
//! let request = LeaderboardRequest {
//!     scope: Scope::Global,
//!     ..Default::default()
//! };
//! let report = scoreboard.leaderboard(&request).await?;
//! for row in report.rows {
//!     println!("#{} {} {}", row.rank, row.player, row.score);
//! }
//! ```

pub mod api;
pub mod blocks;
pub mod bootstrap;
pub mod chain;
pub mod config;
mod config_types;
pub mod errors;
pub mod events;
pub mod identity;
pub mod leaderboard;
pub mod provider;
pub mod score;
pub mod service;
mod spans;
pub mod transport;

pub use blocks::{plan_scan, ScanPlan};
pub use chain::{AlloyChainClient, ChainClient, GameInfo, PlayerTotals, ScoreEvent};
pub use config::{GameMetadata, IdentityConfig, RaceboardConfig, RaceboardConfigBuilder};
pub use config_types::{parse_address, ChunkIterator, ChunkSize, IntBounds};
pub use errors::{
    EventProcessingError, IdentityError, QueryError, RaceboardError, RpcError, SubmissionError,
};
pub use events::{fetch_events_chunked, PlayerDataUpdated, ScoreEventFilter};
pub use identity::{
    EnrichmentPolicy, HttpIdentityLookup, IdentityCache, IdentityEnricher, IdentityLookup,
    LookupOutcome, ParsedIdentity,
};
pub use leaderboard::{aggregate, rank, PlayerAggregate, PlayerStandings};
pub use score::{NonceRecord, NonceStore, PlausibilityPolicy, ScoreSubmission, ScoreSubmitter};
pub use service::{
    GameRegistration, GameStatus, GameTotals, LeaderboardReport, LeaderboardRequest,
    LeaderboardRow, PlayerEventsReport, PlayerEventsRequest, PlayerStats, RegistrationOverrides,
    RegistrationReceipt, Scope, Scoreboard,
};
