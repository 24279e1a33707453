// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower layers for the RPC transport of the chain client.
//!
//! - [`LoggingLayer`] records method name and duration of every JSON-RPC call
//! - [`ThrottleLayer`] keeps a minimum gap between consecutive calls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use raceboard::transport::{LoggingLayer, ThrottleLayer};
//! use alloy_rpc_client::ClientBuilder;
//! use std::time::Duration;
//!
//! let client = ClientBuilder::default()
//!     .layer(LoggingLayer::new())
//!     .layer(ThrottleLayer::new(Duration::from_millis(50)))
//!     .http(rpc_url);
//! ```

mod logging;
mod throttle;

pub use logging::{LoggingLayer, LoggingService};
pub use throttle::{ThrottleLayer, ThrottleService};
