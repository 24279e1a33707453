// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::{Address, BlockNumber, TxHash};
use serde::Deserialize;
use tracing::info;

use super::Scoreboard;
use crate::chain::GameInfo;
use crate::errors::{QueryError, RaceboardError};

/// Readiness of this deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStatus {
    /// Server signer, if a key is configured
    pub signer: Option<Address>,
    /// Registry contract, if configured
    pub contract: Option<Address>,
    /// Chain head at the time of the call
    pub latest_block: BlockNumber,
}

impl GameStatus {
    /// Scores can be written only with both a signer and a contract
    pub fn ready(&self) -> bool {
        self.signer.is_some() && self.contract.is_some()
    }
}

/// The registry's record for this deployment's game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRegistration {
    /// Whether the stored record belongs to the server signer
    pub registered: bool,
    /// The server signer's address
    pub game: Address,
    /// Stored metadata; empty strings when not registered
    pub meta: GameInfo,
}

/// Metadata supplied with a registration; missing fields use the configured defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistrationOverrides {
    /// Display name
    pub name: Option<String>,
    /// Image URL
    pub image: Option<String>,
    /// Game URL
    pub url: Option<String>,
}

/// A sent `registerGame` transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    /// Hash of the sent transaction
    pub tx: TxHash,
    /// The record as submitted
    pub game: GameInfo,
}

impl Scoreboard {
    fn require_signer(&self) -> Result<Address, QueryError> {
        self.signer().ok_or(QueryError::SignerMissing)
    }

    /// Signer, contract and chain head
    pub async fn status(&self) -> Result<GameStatus, RaceboardError> {
        let latest_block = self.chain.block_number().await?;
        Ok(GameStatus {
            signer: self.signer(),
            contract: self.contract,
            latest_block,
        })
    }

    /// Read the registry entry of the server signer
    pub async fn game_registration(&self) -> Result<GameRegistration, RaceboardError> {
        let contract = self.require_contract()?;
        let game = self.require_signer()?;

        let meta = self.chain.game_info(contract, game).await?;
        Ok(GameRegistration {
            registered: meta.game == game,
            game,
            meta,
        })
    }

    /// Register the server signer as a game
    pub async fn register_game(
        &self,
        overrides: RegistrationOverrides,
    ) -> Result<RegistrationReceipt, RaceboardError> {
        let contract = self.require_contract()?;
        let game = self.require_signer()?;

        let defaults = &self.game_metadata;
        let info = GameInfo {
            game,
            name: overrides.name.unwrap_or_else(|| defaults.name.clone()),
            image: overrides.image.unwrap_or_else(|| defaults.image.clone()),
            url: overrides.url.unwrap_or_else(|| defaults.url.clone()),
        };

        let tx = self.chain.register_game(contract, &info).await?;
        info!(%game, name = %info.name, %tx, "Sent game registration");

        Ok(RegistrationReceipt { tx, game: info })
    }
}
