//! Defaults and bounds of the query surfaces
//!
//! This module centralizes the magic numbers of the HTTP surfaces and the
//! well-known endpoints of the deployment, improving discoverability.

use crate::IntBounds;

/// Public RPC of the Monad testnet
pub const DEFAULT_RPC_URL: &str = "https://testnet-rpc.monad.xyz";

/// Display name used when registering the game
pub const DEFAULT_GAME_NAME: &str = "Monad Racer";

/// Port of the HTTP API
pub const DEFAULT_API_PORT: u16 = 3000;

/// Parameters of `/api/leaderboard`
pub mod leaderboard {
    use super::*;

    /// Rows returned
    pub const LIMIT: IntBounds = IntBounds::new(20, 1, 100);
    /// Blocks scanned back from the head
    pub const RANGE: IntBounds = IntBounds::new(10_000, 100, 50_000);
    /// Blocks per log query
    pub const CHUNK: IntBounds = IntBounds::new(90, 10, 100);
    /// Log queries allowed per request
    pub const MAX_CHUNKS: IntBounds = IntBounds::new(200, 1, 2_000);
}

/// Parameters of `/api/player/events`
pub mod player_events {
    use super::*;

    /// Rows returned
    pub const LIMIT: IntBounds = IntBounds::new(20, 1, 100);
    /// Blocks scanned back from the head
    pub const RANGE: IntBounds = IntBounds::new(8_000, 100, 50_000);
    /// Blocks per log query
    pub const CHUNK: IntBounds = IntBounds::new(90, 10, 100);
    /// Log queries allowed per request
    pub const MAX_CHUNKS: IntBounds = IntBounds::new(2_000, 1, 2_000);
}
