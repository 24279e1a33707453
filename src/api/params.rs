// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Query-string parameters of the HTTP surfaces
//!
//! Every field is taken as a raw string so that malformed numbers fall back
//! to their defaults instead of rejecting the request.

use alloy_primitives::Address;
use serde::Deserialize;

use crate::config::constants::{leaderboard, player_events};
use crate::errors::QueryError;
use crate::service::{LeaderboardRequest, PlayerEventsRequest, Scope};
use crate::{parse_address, ChunkSize};

/// `/api/leaderboard`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardParams {
    pub scope: Option<String>,
    pub game: Option<String>,
    pub limit: Option<String>,
    pub range: Option<String>,
    pub chunk: Option<String>,
    pub max_chunks: Option<String>,
    pub with_names: Option<String>,
}

impl LeaderboardParams {
    /// Clamp every value into its bounds
    ///
    /// A malformed `game` is ignored, so the server signer is used instead.
    pub fn into_request(self) -> LeaderboardRequest {
        LeaderboardRequest {
            scope: Scope::from_param(self.scope.as_deref()),
            game: self.game.as_deref().and_then(parse_address),
            limit: leaderboard::LIMIT.resolve(self.limit.as_deref()),
            range: leaderboard::RANGE.resolve(self.range.as_deref()),
            chunk: ChunkSize::new(leaderboard::CHUNK.resolve(self.chunk.as_deref())),
            max_chunks: leaderboard::MAX_CHUNKS.resolve(self.max_chunks.as_deref()),
            with_names: !self
                .with_names
                .as_deref()
                .is_some_and(|raw| raw.eq_ignore_ascii_case("0")),
        }
    }
}

/// `/api/player/events`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEventsParams {
    pub player: Option<String>,
    pub limit: Option<String>,
    pub range: Option<String>,
    pub chunk: Option<String>,
    pub max_chunks: Option<String>,
}

impl PlayerEventsParams {
    pub fn into_request(self) -> Result<PlayerEventsRequest, QueryError> {
        let player = required_address(self.player.as_deref(), "player")?;
        Ok(PlayerEventsRequest {
            player,
            limit: player_events::LIMIT.resolve(self.limit.as_deref()),
            range: player_events::RANGE.resolve(self.range.as_deref()),
            chunk: ChunkSize::new(player_events::CHUNK.resolve(self.chunk.as_deref())),
            max_chunks: player_events::MAX_CHUNKS.resolve(self.max_chunks.as_deref()),
        })
    }
}

/// `?player=`
#[derive(Debug, Default, Deserialize)]
pub struct PlayerParam {
    pub player: Option<String>,
}

/// `?wallet=`
#[derive(Debug, Default, Deserialize)]
pub struct WalletParam {
    pub wallet: Option<String>,
}

/// A well-formed address in `raw`, else `bad {field}`
///
/// The value is lower-cased before validation, so an upper-case `0X` prefix
/// is accepted here. The `game` override and submission bodies stay strict.
pub fn required_address(raw: Option<&str>, field: &'static str) -> Result<Address, QueryError> {
    raw.map(|raw| raw.trim().to_ascii_lowercase())
        .and_then(|raw| parse_address(&raw))
        .ok_or_else(|| QueryError::invalid_address(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: &str = "0x00000000000000000000000000000000000000aa";

    #[test]
    fn test_leaderboard_params_clamp_and_default() {
        let params = LeaderboardParams {
            scope: Some("global".into()),
            limit: Some("500".into()),
            range: Some("abc".into()),
            chunk: Some("5".into()),
            max_chunks: Some("12.9".into()),
            with_names: Some("0".into()),
            ..Default::default()
        };
        let request = params.into_request();

        assert_eq!(request.scope, Scope::Global);
        assert_eq!(request.limit, 100);
        assert_eq!(request.range, 10_000);
        assert_eq!(request.chunk, ChunkSize::new(10));
        assert_eq!(request.max_chunks, 12);
        assert!(!request.with_names);
    }

    #[test]
    fn test_malformed_game_is_ignored() {
        let params = LeaderboardParams {
            game: Some("0x1234".into()),
            ..Default::default()
        };
        assert_eq!(params.into_request().game, None);

        let params = LeaderboardParams {
            game: Some(PLAYER.into()),
            ..Default::default()
        };
        assert_eq!(params.into_request().game, parse_address(PLAYER));
    }

    #[test]
    fn test_with_names_is_false_only_for_zero() {
        for (raw, expected) in [
            (None, true),
            (Some("1"), true),
            (Some("false"), true),
            (Some("0"), false),
        ] {
            let params = LeaderboardParams {
                with_names: raw.map(String::from),
                ..Default::default()
            };
            assert_eq!(params.into_request().with_names, expected, "{raw:?}");
        }
    }

    #[test]
    fn test_required_address_accepts_upper_case_prefix() {
        let upper = "0X00000000000000000000000000000000000000AA";
        assert_eq!(required_address(Some(upper), "player").ok(), parse_address(PLAYER));

        // The game override keeps the strict check
        let params = LeaderboardParams {
            game: Some(upper.into()),
            ..Default::default()
        };
        assert_eq!(params.into_request().game, None);

        assert!(matches!(
            required_address(Some("0Xnothex"), "wallet"),
            Err(QueryError::InvalidAddress { field: "wallet" })
        ));
    }

    #[test]
    fn test_player_events_requires_player() {
        let missing = PlayerEventsParams::default().into_request();
        assert!(matches!(
            missing,
            Err(QueryError::InvalidAddress { field: "player" })
        ));

        let request = PlayerEventsParams {
            player: Some(PLAYER.into()),
            ..Default::default()
        }
        .into_request()
        .unwrap();
        assert_eq!(request.range, 8_000);
        assert_eq!(request.max_chunks, 2_000);
    }
}
