// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Score submission flow: nonces, plausibility policy and the on-chain write.

pub mod nonce;
pub mod policy;
pub mod submit;

pub use nonce::{NonceRecord, NonceStore};
pub use policy::PlausibilityPolicy;
pub use submit::{verify_personal_signature, ScoreSubmission, ScoreSubmitter};
