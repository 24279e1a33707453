// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! JSON bodies of successful responses
//!
//! `uint256` values and block numbers are rendered as decimal strings.

use alloy_primitives::{Address, TxHash};
use serde::Serialize;

use crate::chain::{PlayerTotals, ScoreEvent};
use crate::identity::LookupOutcome;
use crate::score::NonceRecord;
use crate::service::{
    GameRegistration, GameStatus, GameTotals, LeaderboardReport, LeaderboardRow,
    PlayerEventsReport, PlayerStats, RegistrationReceipt,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardBody {
    pub ok: bool,
    pub scope: &'static str,
    pub game_address: Option<Address>,
    pub from_block: String,
    pub to_block: String,
    pub chunk_size: u64,
    pub rows_count: usize,
    pub rows: Vec<LeaderboardRowBody>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardRowBody {
    pub rank: usize,
    pub player: Address,
    pub username: Option<String>,
    pub score: String,
    pub transactions: String,
}

impl From<LeaderboardRow> for LeaderboardRowBody {
    fn from(row: LeaderboardRow) -> Self {
        Self {
            rank: row.rank,
            player: row.player,
            username: row.username,
            score: row.score.to_string(),
            transactions: row.transactions.to_string(),
        }
    }
}

impl From<LeaderboardReport> for LeaderboardBody {
    fn from(report: LeaderboardReport) -> Self {
        let rows: Vec<LeaderboardRowBody> = report.rows.into_iter().map(Into::into).collect();
        Self {
            ok: true,
            scope: report.scope.as_str(),
            game_address: report.game,
            from_block: report.from_block.to_string(),
            to_block: report.to_block.to_string(),
            chunk_size: report.chunk_size.as_u64(),
            rows_count: rows.len(),
            rows,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEventsBody {
    pub ok: bool,
    pub from_block: String,
    pub to_block: String,
    pub rows: Vec<EventRowBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRowBody {
    pub block_number: String,
    pub tx_hash: String,
    pub game: Address,
    pub player: Address,
    pub score_amount: String,
    pub transaction_amount: String,
}

impl From<ScoreEvent> for EventRowBody {
    fn from(event: ScoreEvent) -> Self {
        Self {
            block_number: event.block_number.unwrap_or(0).to_string(),
            tx_hash: event
                .transaction_hash
                .map_or_else(|| "0x".to_string(), |hash| hash.to_string()),
            game: event.game,
            player: event.player,
            score_amount: event.score_amount.to_string(),
            transaction_amount: event.transaction_amount.to_string(),
        }
    }
}

impl From<PlayerEventsReport> for PlayerEventsBody {
    fn from(report: PlayerEventsReport) -> Self {
        Self {
            ok: true,
            from_block: report.from_block.to_string(),
            to_block: report.to_block.to_string(),
            rows: report.rows.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TotalsBody {
    pub score: String,
    pub transactions: String,
}

impl From<PlayerTotals> for TotalsBody {
    fn from(totals: PlayerTotals) -> Self {
        Self {
            score: totals.score.to_string(),
            transactions: totals.transactions.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTotalsBody {
    pub score: String,
    pub transactions: String,
    pub game_address: Address,
}

impl From<GameTotals> for GameTotalsBody {
    fn from(game: GameTotals) -> Self {
        Self {
            score: game.totals.score.to_string(),
            transactions: game.totals.transactions.to_string(),
            game_address: game.game,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsBody {
    pub ok: bool,
    pub total: TotalsBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameTotalsBody>,
}

impl From<PlayerStats> for StatsBody {
    fn from(stats: PlayerStats) -> Self {
        Self {
            ok: true,
            total: stats.total.into(),
            game: stats.game.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckUsernameBody {
    pub ok: bool,
    pub has_username: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckUsernameBody {
    /// Body for a wallet that failed validation
    pub fn invalid_wallet() -> Self {
        Self {
            ok: false,
            has_username: false,
            username: None,
            error: Some("wallet required or invalid".to_string()),
        }
    }
}

impl From<LookupOutcome> for CheckUsernameBody {
    fn from(outcome: LookupOutcome) -> Self {
        match outcome {
            LookupOutcome::Parsed(parsed) => Self {
                ok: true,
                has_username: parsed.has_username(),
                username: parsed.username().map(str::to_string),
                error: None,
            },
            LookupOutcome::Rejected { .. } => Self {
                ok: true,
                has_username: false,
                username: None,
                error: None,
            },
            LookupOutcome::Failed(err) => Self {
                ok: false,
                has_username: false,
                username: None,
                error: Some(err.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceBody {
    pub ok: bool,
    pub wallet: String,
    pub nonce: String,
    pub issued_at: i64,
    pub ttl_ms: u64,
    pub message: String,
}

impl NonceBody {
    pub fn new(record: NonceRecord, game_name: &str) -> Self {
        let message = record.authorization_message(game_name);
        Self {
            ok: true,
            wallet: format!("{:#x}", record.wallet),
            nonce: record.nonce,
            issued_at: record.issued_at,
            ttl_ms: record.ttl_ms,
            message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TxBody {
    pub ok: bool,
    pub tx: TxHash,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBody {
    pub ok: bool,
    pub signer: Option<Address>,
    pub contract: Option<Address>,
    pub latest_block: String,
    pub ready: bool,
}

impl From<GameStatus> for StatusBody {
    fn from(status: GameStatus) -> Self {
        Self {
            ok: true,
            ready: status.ready(),
            signer: status.signer,
            contract: status.contract,
            latest_block: status.latest_block.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameMetaBody {
    pub name: String,
    pub image: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct RegistrationBody {
    pub ok: bool,
    pub registered: bool,
    pub game: Address,
    pub meta: GameMetaBody,
}

impl From<GameRegistration> for RegistrationBody {
    fn from(registration: GameRegistration) -> Self {
        Self {
            ok: true,
            registered: registration.registered,
            game: registration.game,
            meta: GameMetaBody {
                name: registration.meta.name,
                image: registration.meta.image,
                url: registration.meta.url,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisteredBody {
    pub ok: bool,
    pub tx: TxHash,
    pub game: Address,
    pub name: String,
    pub image: String,
    pub url: String,
}

impl From<RegistrationReceipt> for RegisteredBody {
    fn from(receipt: RegistrationReceipt) -> Self {
        Self {
            ok: true,
            tx: receipt.tx,
            game: receipt.game.game,
            name: receipt.game.name,
            image: receipt.game.image,
            url: receipt.game.url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub ok: bool,
}
