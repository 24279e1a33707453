// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`ChainClient`] backed by an Alloy provider and the registry's Solidity ABI

use std::future::Future;
use std::time::Duration;

use alloy_primitives::{Address, TxHash, B256, U256};
use alloy_provider::{DynProvider, Provider};
use alloy_sol_types::{sol, SolEvent};
use async_trait::async_trait;
use tracing::{debug, warn};

use super::{ChainClient, GameInfo, PlayerTotals, ScoreEvent};
use crate::errors::{EventProcessingError, RpcError};
use crate::events::definitions::PlayerDataUpdated;
use crate::events::filter::ScoreEventFilter;

sol! {
    /// Read and write surface of the player registry contract
    #[sol(rpc)]
    interface IPlayerRegistry {
        function totalScoreOfPlayer(address player) external view returns (uint256);
        function totalTransactionsOfPlayer(address player) external view returns (uint256);
        function playerDataPerGame(address game, address player) external view returns (uint256 score, uint256 transactions);
        function GAME_ROLE() external view returns (bytes32);
        function hasRole(bytes32 role, address account) external view returns (bool);
        function updatePlayerData(address player, uint256 scoreAmount, uint256 transactionAmount) external;
        function games(address key) external view returns (address game, string image, string name, string url);
        function registerGame(address _game, string _name, string _image, string _url) external;
    }
}

type Registry = IPlayerRegistry::IPlayerRegistryInstance<DynProvider>;

/// Chain client over a type-erased provider
///
/// Every call is bounded by `rpc_timeout`. Transactions are signed by the
/// wallet filler the provider was built with; `signer` only records its address.
#[derive(Clone)]
pub struct AlloyChainClient {
    provider: DynProvider,
    signer: Option<Address>,
    rpc_timeout: Duration,
}

impl AlloyChainClient {
    /// Wrap a provider
    ///
    /// Pass `signer` only when the provider carries a wallet for that address.
    pub fn new(provider: DynProvider, signer: Option<Address>, rpc_timeout: Duration) -> Self {
        Self {
            provider,
            signer,
            rpc_timeout,
        }
    }

    fn registry(&self, contract: Address) -> Registry {
        IPlayerRegistry::new(contract, self.provider.clone())
    }

    fn require_signer(&self, function: &str) -> Result<Address, RpcError> {
        self.signer.ok_or_else(|| RpcError::SignerUnavailable {
            function: function.to_string(),
        })
    }

    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T, RpcError>
    where
        F: Future<Output = Result<T, RpcError>> + Send,
    {
        match tokio::time::timeout(self.rpc_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, timeout = ?self.rpc_timeout, "Chain call timed out");
                Err(RpcError::timeout(operation, self.rpc_timeout))
            }
        }
    }
}

#[async_trait]
impl ChainClient for AlloyChainClient {
    async fn block_number(&self) -> Result<u64, RpcError> {
        self.bounded("eth_blockNumber", async {
            self.provider
                .get_block_number()
                .await
                .map_err(RpcError::get_block_number_failed)
        })
        .await
    }

    async fn score_events(
        &self,
        filter: &ScoreEventFilter,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ScoreEvent>, EventProcessingError> {
        let rpc_filter = filter.to_filter(from_block, to_block);

        let logs = self
            .bounded("eth_getLogs", async {
                self.provider.get_logs(&rpc_filter).await.map_err(|e| {
                    RpcError::get_logs_failed(format!("blocks {from_block}-{to_block}"), e)
                })
            })
            .await?;

        let mut events = Vec::with_capacity(logs.len());
        for log in &logs {
            let decoded = PlayerDataUpdated::decode_log(&log.inner).map_err(|e| {
                EventProcessingError::decode_failed(format!(
                    "PlayerDataUpdated in tx {:?}: {e}",
                    log.transaction_hash
                ))
            })?;

            debug!(event = ?decoded.data, block = ?log.block_number, "Decoded score event");

            events.push(ScoreEvent {
                game: decoded.data.game,
                player: decoded.data.player,
                score_amount: decoded.data.scoreAmount,
                transaction_amount: decoded.data.transactionAmount,
                block_number: log.block_number,
                transaction_hash: log.transaction_hash,
            });
        }

        Ok(events)
    }

    async fn total_score_of_player(
        &self,
        contract: Address,
        player: Address,
    ) -> Result<U256, RpcError> {
        let registry = self.registry(contract);
        self.bounded("totalScoreOfPlayer", async {
            registry
                .totalScoreOfPlayer(player)
                .call()
                .await
                .map_err(|e| RpcError::contract_call_failed("totalScoreOfPlayer", e))
        })
        .await
    }

    async fn total_transactions_of_player(
        &self,
        contract: Address,
        player: Address,
    ) -> Result<U256, RpcError> {
        let registry = self.registry(contract);
        self.bounded("totalTransactionsOfPlayer", async {
            registry
                .totalTransactionsOfPlayer(player)
                .call()
                .await
                .map_err(|e| RpcError::contract_call_failed("totalTransactionsOfPlayer", e))
        })
        .await
    }

    async fn player_data_per_game(
        &self,
        contract: Address,
        game: Address,
        player: Address,
    ) -> Result<PlayerTotals, RpcError> {
        let registry = self.registry(contract);
        let data = self
            .bounded("playerDataPerGame", async {
                registry
                    .playerDataPerGame(game, player)
                    .call()
                    .await
                    .map_err(|e| RpcError::contract_call_failed("playerDataPerGame", e))
            })
            .await?;

        Ok(PlayerTotals {
            score: data.score,
            transactions: data.transactions,
        })
    }

    fn signer_address(&self) -> Option<Address> {
        self.signer
    }

    async fn game_role(&self, contract: Address) -> Result<B256, RpcError> {
        let registry = self.registry(contract);
        self.bounded("GAME_ROLE", async {
            registry
                .GAME_ROLE()
                .call()
                .await
                .map_err(|e| RpcError::contract_call_failed("GAME_ROLE", e))
        })
        .await
    }

    async fn has_role(
        &self,
        contract: Address,
        role: B256,
        account: Address,
    ) -> Result<bool, RpcError> {
        let registry = self.registry(contract);
        self.bounded("hasRole", async {
            registry
                .hasRole(role, account)
                .call()
                .await
                .map_err(|e| RpcError::contract_call_failed("hasRole", e))
        })
        .await
    }

    async fn update_player_data(
        &self,
        contract: Address,
        player: Address,
        score_amount: U256,
        transaction_amount: U256,
    ) -> Result<TxHash, RpcError> {
        self.require_signer("updatePlayerData")?;
        let registry = self.registry(contract);
        let tx_hash = self
            .bounded("updatePlayerData", async {
                let pending = registry
                    .updatePlayerData(player, score_amount, transaction_amount)
                    .send()
                    .await
                    .map_err(|e| RpcError::transaction_failed("updatePlayerData", e))?;
                Ok(*pending.tx_hash())
            })
            .await?;

        debug!(%player, %score_amount, %tx_hash, "Sent updatePlayerData");
        Ok(tx_hash)
    }

    async fn game_info(&self, contract: Address, game: Address) -> Result<GameInfo, RpcError> {
        let registry = self.registry(contract);
        let record = self
            .bounded("games", async {
                registry
                    .games(game)
                    .call()
                    .await
                    .map_err(|e| RpcError::contract_call_failed("games", e))
            })
            .await?;

        Ok(GameInfo {
            game: record.game,
            name: record.name,
            image: record.image,
            url: record.url,
        })
    }

    async fn register_game(
        &self,
        contract: Address,
        game: &GameInfo,
    ) -> Result<TxHash, RpcError> {
        self.require_signer("registerGame")?;
        let registry = self.registry(contract);
        let tx_hash = self
            .bounded("registerGame", async {
                let pending = registry
                    .registerGame(
                        game.game,
                        game.name.clone(),
                        game.image.clone(),
                        game.url.clone(),
                    )
                    .send()
                    .await
                    .map_err(|e| RpcError::transaction_failed("registerGame", e))?;
                Ok(*pending.tx_hash())
            })
            .await?;

        debug!(game = %game.game, %tx_hash, "Sent registerGame");
        Ok(tx_hash)
    }
}
