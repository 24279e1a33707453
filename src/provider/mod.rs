// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chain provider setup
//!
//! The chain client talks to a single HTTP endpoint through a type-erased
//! [`DynProvider`](alloy_provider::DynProvider). Its transport carries the
//! [`LoggingLayer`](crate::transport::LoggingLayer) and, when configured, the
//! [`ThrottleLayer`](crate::transport::ThrottleLayer).
//!
//! # Examples
//!
//! ```rust,ignore
//! use raceboard::provider::{create_chain_provider, ProviderConfig};
//! use std::time::Duration;
//!
//! let config = ProviderConfig::new("https://testnet-rpc.monad.xyz")
//!     .with_min_delay(Duration::from_millis(50));
//!
//! let provider = create_chain_provider(&config, None)?;
//! let head = provider.get_block_number().await?;
//! ```

mod config;
mod factory;

pub use config::ProviderConfig;
pub use factory::create_chain_provider;
