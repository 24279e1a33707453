// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Errors from the score submission flow.

use alloy_primitives::Address;

use super::{QueryError, RpcError};

/// Reasons a score submission is rejected or fails.
///
/// Display strings double as the response `error` field.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// Wallet is not `0x` + 40 hex digits.
    #[error("bad wallet")]
    BadWallet,

    /// Nonce, message or signature is empty.
    #[error("missing nonce/signature")]
    MissingProof,

    /// Signature is not `0x`-prefixed hex.
    #[error("signature must be 0x-hex")]
    SignatureNotHex,

    /// A numeric field is not a non-negative integer.
    #[error("bad {field}")]
    BadAmount {
        /// Name of the body field
        field: &'static str,
    },

    /// The nonce was never issued or has been swept.
    #[error("nonce not found")]
    NonceNotFound,

    /// The nonce has already authorised a submission.
    #[error("nonce already used")]
    NonceUsed,

    /// The nonce was issued to a different wallet.
    #[error("nonce wallet mismatch")]
    NonceWalletMismatch,

    /// The nonce outlived its TTL.
    #[error("nonce expired")]
    NonceExpired,

    /// The signature does not recover to the submitting wallet.
    #[error("invalid signature")]
    InvalidSignature,

    /// The score exceeds what the session length allows.
    #[error("unreasonable score")]
    UnreasonableScore,

    /// The reported session is shorter than the minimum play time.
    #[error("too short session")]
    SessionTooShort,

    /// The server signer may not write scores to the contract.
    #[error("Server signer has no GAME_ROLE ({signer})")]
    MissingGameRole {
        /// The signer that lacks the role
        signer: Address,
    },

    /// Request-level validation failure (e.g., missing contract address).
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The chain rejected a read or the write.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl SubmissionError {
    /// Whether this failure is an authorisation problem of the server itself.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, SubmissionError::MissingGameRole { .. })
    }

    /// Whether this failure was caused by the chain rather than the request.
    pub fn is_upstream(&self) -> bool {
        matches!(self, SubmissionError::Rpc(_))
    }
}
