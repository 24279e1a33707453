// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Validation errors for the query surfaces.
//!
//! Display strings are short, machine-readable reasons; the HTTP layer puts
//! them verbatim into the `error` field of the response envelope.

/// A request that cannot be served as asked. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// A required address parameter is missing or not `0x` + 40 hex digits.
    #[error("bad {field}")]
    InvalidAddress {
        /// Name of the offending parameter (e.g., "player")
        field: &'static str,
    },

    /// Required server-side configuration is absent.
    #[error("{field} missing")]
    MissingConfiguration {
        /// Name of the missing setting (e.g., "CONTRACT_ADDRESS")
        field: &'static str,
    },

    /// The operation needs the server signer, but none is configured.
    #[error("server signer missing")]
    SignerMissing,

    /// `scope=game` was requested but no game address could be determined.
    #[error("GAME scope requires server signer or ?game=")]
    GameScopeUnresolved,

    /// A request body could not be interpreted.
    #[error("invalid body: {details}")]
    InvalidBody {
        /// What was wrong with the body
        details: String,
    },

    /// A query string could not be deserialized, e.g. a repeated key.
    #[error("invalid query: {details}")]
    InvalidQuery {
        /// What was wrong with the query string
        details: String,
    },
}

impl QueryError {
    /// Create an `InvalidAddress` error for a parameter.
    pub fn invalid_address(field: &'static str) -> Self {
        QueryError::InvalidAddress { field }
    }

    /// Create a `MissingConfiguration` error for a setting.
    pub fn missing_configuration(field: &'static str) -> Self {
        QueryError::MissingConfiguration { field }
    }

    /// Shortcut for the contract address, required by every chain query.
    pub fn missing_contract() -> Self {
        Self::missing_configuration("CONTRACT_ADDRESS")
    }

    /// Create an `InvalidBody` error with details.
    pub fn invalid_body(details: impl Into<String>) -> Self {
        QueryError::InvalidBody {
            details: details.into(),
        }
    }

    /// Create an `InvalidQuery` error with details.
    pub fn invalid_query(details: impl Into<String>) -> Self {
        QueryError::InvalidQuery {
            details: details.into(),
        }
    }
}
