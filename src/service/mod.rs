// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Query assemblers
//!
//! [`Scoreboard`] composes the scanning pipeline into the public query shapes:
//!
//! - **Leaderboard**: plan → fetch (game-scoped or global) → aggregate → rank → enrich the top rows
//! - **Player events**: plan → fetch (player-scoped) → newest first → truncate
//! - **Stats**: concurrent point reads of contract state, no log replay
//!
//! plus the game status and registration reads/writes of the server signer.
//! Validation failures come back as [`QueryError`](crate::errors::QueryError);
//! chain failures abort the request without partial results.

mod game;
mod leaderboard;
mod player;

pub use game::{GameRegistration, GameStatus, RegistrationOverrides, RegistrationReceipt};
pub use leaderboard::{LeaderboardReport, LeaderboardRequest, LeaderboardRow, Scope};
pub use player::{GameTotals, PlayerEventsReport, PlayerEventsRequest, PlayerStats};

use std::sync::Arc;

use alloy_primitives::Address;

use crate::chain::ChainClient;
use crate::config::GameMetadata;
use crate::errors::QueryError;
use crate::identity::{IdentityEnricher, LookupOutcome};

/// Assembler over a chain client and an identity enricher
#[derive(Clone)]
pub struct Scoreboard {
    chain: Arc<dyn ChainClient>,
    enricher: IdentityEnricher,
    contract: Option<Address>,
    game_metadata: GameMetadata,
}

impl Scoreboard {
    /// Create a scoreboard
    ///
    /// Without a `contract`, every chain query fails validation with
    /// `CONTRACT_ADDRESS missing`.
    pub fn new(
        chain: Arc<dyn ChainClient>,
        enricher: IdentityEnricher,
        contract: Option<Address>,
        game_metadata: GameMetadata,
    ) -> Self {
        Self {
            chain,
            enricher,
            contract,
            game_metadata,
        }
    }

    /// The chain client
    pub fn chain(&self) -> &Arc<dyn ChainClient> {
        &self.chain
    }

    /// The identity enricher
    pub fn enricher(&self) -> &IdentityEnricher {
        &self.enricher
    }

    /// The configured registry contract
    pub fn contract(&self) -> Option<Address> {
        self.contract
    }

    /// Game address of this deployment: the server signer
    pub fn signer(&self) -> Option<Address> {
        self.chain.signer_address()
    }

    /// Ask the identity service about one wallet, bypassing the cache
    pub async fn check_username(&self, wallet: Address) -> LookupOutcome {
        self.enricher.lookup().lookup(wallet).await
    }

    fn require_contract(&self) -> Result<Address, QueryError> {
        self.contract.ok_or_else(QueryError::missing_contract)
    }
}
