//! Configuration for raceboard
//!
//! This module provides the service configuration: chain access, the identity
//! upstream, the score submission policy and the HTTP port.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use raceboard::RaceboardConfig;
//!
//! // Monad testnet RPC, no contract configured yet
//! let config = RaceboardConfig::default();
//! assert!(config.contract_address.is_none());
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use raceboard::RaceboardConfigBuilder;
//! use std::time::Duration;
//!
//! let config = RaceboardConfigBuilder::with_defaults()
//!     .rpc_url("http://localhost:8545")
//!     .rpc_timeout(Duration::from_secs(10))
//!     .identity_concurrency(4)
//!     .build();
//! ```
//!
//! # Example: From the environment
//!
//! ```rust,ignore
//! // Reads RPC_URL, CONTRACT_ADDRESS, IDENTITY_URL, ... (a .env file is honoured)
//! let config = raceboard::RaceboardConfig::from_env();
//! ```

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;
use tracing::warn;

use crate::identity::http::DEFAULT_IDENTITY_URL;
use crate::identity::EnrichmentPolicy;
use crate::score::{NonceStore, PlausibilityPolicy};
use crate::parse_address;

pub mod constants;

/// Configuration of the identity upstream and the enricher's worker pool
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityConfig {
    /// Endpoint queried with `?wallet=..&t=..`
    pub endpoint: String,
    /// Concurrent lookups per batch (clamped to 1..=10 when used)
    pub concurrency: usize,
    /// Pause after each upstream lookup
    pub lookup_delay: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_IDENTITY_URL.to_string(),
            concurrency: EnrichmentPolicy::DEFAULT_CONCURRENCY,
            lookup_delay: EnrichmentPolicy::DEFAULT_LOOKUP_DELAY,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl IdentityConfig {
    /// Worker pool policy derived from this configuration
    pub fn policy(&self) -> EnrichmentPolicy {
        EnrichmentPolicy::new(self.concurrency, self.lookup_delay)
    }
}

/// Metadata written by `registerGame` when the request does not override it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMetadata {
    /// Display name
    pub name: String,
    /// Image URL
    pub image: String,
    /// Game URL
    pub url: String,
}

impl Default for GameMetadata {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_GAME_NAME.to_string(),
            image: String::new(),
            url: String::new(),
        }
    }
}

/// Configuration for raceboard
///
/// Use [`RaceboardConfigBuilder`] for a fluent API to construct instances.
/// The server signer key is deliberately not part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceboardConfig {
    /// JSON-RPC endpoint of the chain
    pub rpc_url: String,

    /// Timeout applied to every chain call
    /// Default: 30 seconds
    pub rpc_timeout: Duration,

    /// Minimum spacing between RPC requests
    /// Default: None (no throttling)
    pub rpc_min_delay: Option<Duration>,

    /// Player registry contract; chain queries fail validation without it
    pub contract_address: Option<Address>,

    /// Identity upstream
    pub identity: IdentityConfig,

    /// Lifetime of score nonces
    pub nonce_ttl: Duration,

    /// Anti-cheat bounds for score submissions
    pub plausibility: PlausibilityPolicy,

    /// Defaults for game registration
    pub game_metadata: GameMetadata,

    /// HTTP port
    pub api_port: u16,
}

impl Default for RaceboardConfig {
    fn default() -> Self {
        Self {
            rpc_url: constants::DEFAULT_RPC_URL.to_string(),
            rpc_timeout: Duration::from_secs(30),
            rpc_min_delay: None,
            contract_address: None,
            identity: IdentityConfig::default(),
            nonce_ttl: NonceStore::DEFAULT_TTL,
            plausibility: PlausibilityPolicy::default(),
            game_metadata: GameMetadata::default(),
            api_port: constants::DEFAULT_API_PORT,
        }
    }
}

impl RaceboardConfig {
    /// Load configuration from the process environment (and `.env`)
    ///
    /// Unset variables keep their defaults; unparsable values are logged and
    /// ignored.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = RaceboardConfigBuilder::with_defaults();

        if let Some(url) = var("RPC_URL") {
            builder = builder.rpc_url(url);
        }
        if let Some(secs) = parsed::<u64>("RPC_TIMEOUT_SECS", var("RPC_TIMEOUT_SECS")) {
            builder = builder.rpc_timeout(Duration::from_secs(secs));
        }
        if let Some(ms) = parsed::<u64>("RPC_MIN_DELAY_MS", var("RPC_MIN_DELAY_MS")) {
            builder = builder.rpc_min_delay(Duration::from_millis(ms));
        }
        if let Some(raw) = var("CONTRACT_ADDRESS") {
            match parse_address(raw.trim()) {
                Some(contract) => builder = builder.contract_address(contract),
                None => warn!(value = %raw, "Ignoring malformed CONTRACT_ADDRESS"),
            }
        }
        if let Some(endpoint) = var("IDENTITY_URL") {
            builder = builder.identity_endpoint(endpoint);
        }
        if let Some(n) = parsed::<usize>("IDENTITY_CONCURRENCY", var("IDENTITY_CONCURRENCY")) {
            builder = builder.identity_concurrency(n);
        }
        if let Some(ms) = parsed::<u64>("IDENTITY_DELAY_MS", var("IDENTITY_DELAY_MS")) {
            builder = builder.identity_lookup_delay(Duration::from_millis(ms));
        }
        if let Some(secs) = parsed::<u64>("NONCE_TTL_SECS", var("NONCE_TTL_SECS")) {
            builder = builder.nonce_ttl(Duration::from_secs(secs));
        }
        if let Some(name) = var("GAME_NAME") {
            builder = builder.game_name(name);
        }
        if let Some(image) = var("GAME_IMAGE") {
            builder = builder.game_image(image);
        }
        if let Some(url) = var("GAME_URL") {
            builder = builder.game_url(url);
        }
        if let Some(port) = parsed::<u16>("API_PORT", var("API_PORT")) {
            builder = builder.api_port(port);
        }

        builder.build()
    }
}

fn parsed<T: FromStr>(key: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable configuration value");
            None
        }
    }
}

/// Builder for [`RaceboardConfig`]
///
/// # Example
///
/// ```rust
/// use raceboard::RaceboardConfigBuilder;
/// use std::time::Duration;
///
/// let config = RaceboardConfigBuilder::new()
///     .rpc_min_delay(Duration::from_millis(50))
///     .nonce_ttl(Duration::from_secs(60))
///     .build();
/// assert_eq!(config.nonce_ttl, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RaceboardConfigBuilder {
    config: RaceboardConfig,
}

impl RaceboardConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with defaults; alias of [`new`](Self::new)
    pub fn with_defaults() -> Self {
        Self::new()
    }

    /// Set the RPC endpoint
    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.config.rpc_url = url.into();
        self
    }

    /// Set the per-call RPC timeout
    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.config.rpc_timeout = timeout;
        self
    }

    /// Space RPC requests at least `delay` apart
    pub fn rpc_min_delay(mut self, delay: Duration) -> Self {
        self.config.rpc_min_delay = Some(delay);
        self
    }

    /// Set the registry contract
    pub fn contract_address(mut self, contract: Address) -> Self {
        self.config.contract_address = Some(contract);
        self
    }

    /// Set the identity endpoint
    pub fn identity_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.identity.endpoint = endpoint.into();
        self
    }

    /// Set the identity worker count
    pub fn identity_concurrency(mut self, concurrency: usize) -> Self {
        self.config.identity.concurrency = concurrency;
        self
    }

    /// Set the pause after each identity lookup
    pub fn identity_lookup_delay(mut self, delay: Duration) -> Self {
        self.config.identity.lookup_delay = delay;
        self
    }

    /// Set the nonce lifetime
    pub fn nonce_ttl(mut self, ttl: Duration) -> Self {
        self.config.nonce_ttl = ttl;
        self
    }

    /// Set the score plausibility policy
    pub fn plausibility(mut self, policy: PlausibilityPolicy) -> Self {
        self.config.plausibility = policy;
        self
    }

    /// Set the default game name
    pub fn game_name(mut self, name: impl Into<String>) -> Self {
        self.config.game_metadata.name = name.into();
        self
    }

    /// Set the default game image
    pub fn game_image(mut self, image: impl Into<String>) -> Self {
        self.config.game_metadata.image = image.into();
        self
    }

    /// Set the default game URL
    pub fn game_url(mut self, url: impl Into<String>) -> Self {
        self.config.game_metadata.url = url.into();
        self
    }

    /// Set the HTTP port
    pub fn api_port(mut self, port: u16) -> Self {
        self.config.api_port = port;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> RaceboardConfig {
        self.config
    }
}
