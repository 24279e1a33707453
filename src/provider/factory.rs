// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory for the chain client

use alloy_network::EthereumWallet;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_client::{ClientBuilder, RpcClient};
use alloy_signer_local::PrivateKeySigner;
use tracing::info;

use crate::errors::RpcError;
use crate::transport::{LoggingLayer, ThrottleLayer};

use super::config::ProviderConfig;

/// Build the RPC client with the transport layers `config` asks for
///
/// The throttle sits outside the logging layer so logged durations exclude
/// time spent waiting for a slot.
fn build_client(config: &ProviderConfig, url: url::Url) -> RpcClient {
    let throttle = config.min_delay.filter(|delay| !delay.is_zero());

    match (throttle, config.logging_enabled) {
        (Some(delay), true) => ClientBuilder::default()
            .layer(ThrottleLayer::new(delay))
            .layer(LoggingLayer::new())
            .http(url),
        (Some(delay), false) => ClientBuilder::default()
            .layer(ThrottleLayer::new(delay))
            .http(url),
        (None, true) => ClientBuilder::default()
            .layer(LoggingLayer::new())
            .http(url),
        (None, false) => ClientBuilder::default().http(url),
    }
}

/// Create the HTTP provider used by the chain client
///
/// With a `signer`, the provider fills nonce, gas and chain id and signs
/// transactions locally, so `updatePlayerData` and `registerGame` can be
/// sent. Without one, the provider is read-only.
///
/// # Examples
///
/// ```rust,ignore
/// use raceboard::provider::{create_chain_provider, ProviderConfig};
///
/// let provider = create_chain_provider(
///     &ProviderConfig::new("https://testnet-rpc.monad.xyz"),
///     None,
/// )?;
/// ```
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_chain_provider(
    config: &ProviderConfig,
    signer: Option<PrivateKeySigner>,
) -> Result<DynProvider, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{e}")))?;

    let client = build_client(config, url);

    let provider = match signer {
        Some(signer) => {
            info!(signer = %signer.address(), throttled = config.is_throttled(), "Created signing chain provider");
            ProviderBuilder::new()
                .wallet(EthereumWallet::from(signer))
                .connect_client(client)
                .erased()
        }
        None => {
            info!(throttled = config.is_throttled(), "Created read-only chain provider");
            ProviderBuilder::new().connect_client(client).erased()
        }
    };

    Ok(provider)
}
