// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Best-effort wallet → display name resolution
//!
//! The identity service is an external HTTP endpoint whose response shape is
//! not guaranteed. A lookup never fails its caller: every outcome, including
//! transport errors, is represented in [`LookupOutcome`] and the enricher
//! degrades anything but a recognized name to "no name".
//!
//! # Components
//!
//! - [`IdentityLookup`] - the upstream capability (one wallet in, one outcome out)
//! - [`extract`] - ordered, independent rules that pull a name out of a JSON body
//! - [`HttpIdentityLookup`] - reqwest implementation of the capability
//! - [`IdentityCache`] - process-wide memo of resolved names, including misses
//! - [`IdentityEnricher`] - bounded worker pool that resolves a batch through the cache

pub mod cache;
pub mod enricher;
pub mod extract;
pub mod http;

pub use cache::{IdentityCache, IdentityCacheStats};
pub use enricher::{EnrichmentPolicy, IdentityEnricher};
pub use extract::{parse_identity, ExtractionRule, USERNAME_RULES};
pub use http::HttpIdentityLookup;

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::errors::IdentityError;

/// What a well-formed response body says about a wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedIdentity {
    /// The body was a JSON object
    Recognized {
        /// First non-empty name found by the extraction rules
        username: Option<String>,
        /// Whether the body carried a true `hasUsername`/`exists` flag
        flagged: bool,
    },
    /// The body was not a JSON object
    Unrecognized,
}

impl ParsedIdentity {
    /// Resolved name, if any
    pub fn username(&self) -> Option<&str> {
        match self {
            ParsedIdentity::Recognized { username, .. } => username.as_deref(),
            ParsedIdentity::Unrecognized => None,
        }
    }

    /// Whether the wallet is known to have a name, by flag or by value
    pub fn has_username(&self) -> bool {
        match self {
            ParsedIdentity::Recognized { username, flagged } => *flagged || username.is_some(),
            ParsedIdentity::Unrecognized => false,
        }
    }
}

/// Result of asking the identity service about one wallet
#[derive(Debug)]
pub enum LookupOutcome {
    /// The service answered with a success status
    Parsed(ParsedIdentity),
    /// The service answered with a non-success status
    Rejected {
        /// HTTP status code
        status: u16,
    },
    /// The request could not be completed
    Failed(IdentityError),
}

impl LookupOutcome {
    /// Resolved name, if any; every non-success outcome has none
    pub fn username(&self) -> Option<&str> {
        match self {
            LookupOutcome::Parsed(parsed) => parsed.username(),
            LookupOutcome::Rejected { .. } | LookupOutcome::Failed(_) => None,
        }
    }
}

/// Upstream identity capability
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Ask the service about `wallet`
    async fn lookup(&self, wallet: Address) -> LookupOutcome;
}
