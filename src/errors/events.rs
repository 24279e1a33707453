// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Failures of a `PlayerDataUpdated` scan.

use super::RpcError;

/// Why a chunked score-event scan produced no result
///
/// A scan is all-or-nothing: the first failing chunk aborts it, so callers
/// never see totals built from part of the window.
///
/// ```rust,ignore
/// match fetch_events_chunked(chain, &filter, from_block, to_block, chunk).await {
///     Ok(events) => aggregate(&events, None),
///     Err(EventProcessingError::Rpc(err)) => return Err(err.into()),
///     Err(e) => panic!("bad scan arguments: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EventProcessingError {
    /// A returned log does not have the `PlayerDataUpdated` layout
    #[error("Failed to decode event: {details}")]
    DecodeFailed { details: String },

    /// A chunk query failed
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Scan arguments the fetcher cannot work with, such as a zero chunk size
    #[error("Invalid input: {details}")]
    InvalidInput { details: String },
}

impl EventProcessingError {
    pub fn decode_failed(details: impl Into<String>) -> Self {
        EventProcessingError::DecodeFailed {
            details: details.into(),
        }
    }

    pub fn invalid_input(details: impl Into<String>) -> Self {
        EventProcessingError::InvalidInput {
            details: details.into(),
        }
    }

    /// Whether the scan failed on the chain side rather than on its arguments
    pub fn is_upstream(&self) -> bool {
        !matches!(self, EventProcessingError::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_not_upstream() {
        assert!(!EventProcessingError::invalid_input("chunk_size must be greater than 0").is_upstream());
        assert!(EventProcessingError::decode_failed("short data").is_upstream());
    }
}
