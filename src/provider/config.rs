// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

use std::time::Duration;

use crate::config::RaceboardConfig;

/// Configuration for creating the chain provider
///
/// # Example
///
/// ```rust
/// use raceboard::provider::ProviderConfig;
/// use std::time::Duration;
///
/// let config = ProviderConfig::new("https://testnet-rpc.monad.xyz")
///     .with_min_delay(Duration::from_millis(50));
/// assert!(config.is_throttled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
    /// Minimum delay between requests (None for unthrottled)
    pub min_delay: Option<Duration>,
    /// Whether to wrap the transport in the RPC logging layer
    pub logging_enabled: bool,
}

impl ProviderConfig {
    /// Create a new provider configuration with the specified URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            min_delay: None,
            logging_enabled: true,
        }
    }

    /// Set minimum delay between requests
    #[must_use]
    pub fn with_min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = Some(delay);
        self
    }

    /// Set the minimum delay from an optional value
    #[must_use]
    pub fn with_min_delay_opt(mut self, delay: Option<Duration>) -> Self {
        self.min_delay = delay;
        self
    }

    /// Skip the RPC logging layer
    #[must_use]
    pub fn without_logging(mut self) -> Self {
        self.logging_enabled = false;
        self
    }

    /// Check if this configuration spaces out requests
    #[must_use]
    pub fn is_throttled(&self) -> bool {
        self.min_delay.is_some_and(|delay| !delay.is_zero())
    }
}

impl From<&RaceboardConfig> for ProviderConfig {
    fn from(config: &RaceboardConfig) -> Self {
        Self::new(config.rpc_url.clone()).with_min_delay_opt(config.rpc_min_delay)
    }
}
