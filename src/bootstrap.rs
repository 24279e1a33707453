// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;
use std::sync::Arc;

use alloy_signer_local::PrivateKeySigner;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{serve_api, AppState};
use crate::chain::{AlloyChainClient, ChainClient};
use crate::config::RaceboardConfig;
use crate::identity::{HttpIdentityLookup, IdentityCache, IdentityEnricher};
use crate::provider::{create_chain_provider, ProviderConfig};
use crate::score::{NonceStore, ScoreSubmitter};
use crate::service::Scoreboard;

/// Read the optional server signer from `SERVER_PRIVATE_KEY`
///
/// The key is never logged or kept in the configuration.
fn server_signer() -> anyhow::Result<Option<PrivateKeySigner>> {
    match dotenvy::var("SERVER_PRIVATE_KEY") {
        Ok(raw) if !raw.trim().is_empty() => {
            let signer = PrivateKeySigner::from_str(raw.trim())
                .context("SERVER_PRIVATE_KEY is not a valid private key")?;
            Ok(Some(signer))
        }
        _ => Ok(None),
    }
}

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    let config = RaceboardConfig::from_env();
    let signer = server_signer()?;
    let signer_address = signer.as_ref().map(|s| s.address());

    if config.contract_address.is_none() {
        warn!("CONTRACT_ADDRESS not set; chain queries will be rejected");
    }
    if signer_address.is_none() {
        warn!("SERVER_PRIVATE_KEY not set; score writes and game registration are disabled");
    }

    let provider = create_chain_provider(&ProviderConfig::from(&config), signer)?;
    let chain: Arc<dyn ChainClient> = Arc::new(AlloyChainClient::new(
        provider,
        signer_address,
        config.rpc_timeout,
    ));

    let lookup = HttpIdentityLookup::new(&config.identity.endpoint, config.identity.request_timeout)?;
    let enricher = IdentityEnricher::new(
        Arc::new(lookup),
        Arc::new(IdentityCache::new()),
        config.identity.policy(),
    );

    let scoreboard = Scoreboard::new(
        chain.clone(),
        enricher,
        config.contract_address,
        config.game_metadata.clone(),
    );
    let submitter = ScoreSubmitter::new(
        chain,
        Arc::new(NonceStore::new(config.nonce_ttl)),
        config.plausibility,
        config.contract_address,
    );

    info!(
        rpc_url = %config.rpc_url,
        contract = ?config.contract_address,
        signer = ?signer_address,
        "Raceboard configured"
    );

    let state = AppState::new(scoreboard, submitter, &config.game_metadata.name);
    let listener = TcpListener::bind(("0.0.0.0", config.api_port)).await?;

    serve_api(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
