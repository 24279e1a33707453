// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Signed score submission
//!
//! A player asks for a nonce, signs the authorization message with their
//! wallet (EIP-191 personal sign), and submits the signature with the score.
//! The server checks the nonce, the signature and the score's plausibility,
//! confirms its own signer may write scores, and records the score on chain.

use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::{hex, Address, Signature, TxHash, U256};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn, Instrument};

use super::nonce::{now_millis, NonceStore};
use super::policy::PlausibilityPolicy;
use crate::chain::ChainClient;
use crate::errors::{QueryError, SubmissionError};
use crate::{parse_address, spans};

/// Body of a score submission
///
/// Amounts accept JSON numbers or decimal strings; a missing amount is zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreSubmission {
    /// Player wallet
    pub wallet: String,
    /// Score to add
    pub score_amount: Option<Value>,
    /// Transactions to add
    pub transaction_amount: Option<Value>,
    /// Nonce previously issued to `wallet`
    pub nonce: String,
    /// Signed authorization message
    pub message: String,
    /// `0x`-hex signature over `message`
    pub signature: String,
    /// Client-reported session length in milliseconds
    pub ms_played: Option<Value>,
}

fn parse_amount(value: Option<&Value>, field: &'static str) -> Result<U256, SubmissionError> {
    let bad = || SubmissionError::BadAmount { field };
    match value {
        None | Some(Value::Null) => Ok(U256::ZERO),
        Some(Value::Number(n)) => n.as_u64().map(U256::from).ok_or_else(bad),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(U256::ZERO)
            } else {
                U256::from_str_radix(s, 10).map_err(|_| bad())
            }
        }
        Some(_) => Err(bad()),
    }
}

fn parse_ms_played(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => f64::from_str(s.trim()).unwrap_or(f64::NAN),
        _ => 0.0,
    }
}

fn is_hex_string(raw: &str) -> bool {
    raw.strip_prefix("0x")
        .is_some_and(|digits| digits.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Recover the EIP-191 signer of `message` and compare it with `wallet`
pub fn verify_personal_signature(wallet: Address, message: &str, signature: &str) -> bool {
    let Ok(bytes) = hex::decode(signature) else {
        return false;
    };
    let Ok(signature) = Signature::from_raw(&bytes) else {
        return false;
    };
    signature
        .recover_address_from_msg(message.as_bytes())
        .is_ok_and(|recovered| recovered == wallet)
}

/// Validates submissions and writes accepted scores on chain
#[derive(Clone)]
pub struct ScoreSubmitter {
    chain: Arc<dyn ChainClient>,
    nonces: Arc<NonceStore>,
    policy: PlausibilityPolicy,
    contract: Option<Address>,
}

impl ScoreSubmitter {
    /// Create a submitter sharing `nonces` with the nonce endpoint
    pub fn new(
        chain: Arc<dyn ChainClient>,
        nonces: Arc<NonceStore>,
        policy: PlausibilityPolicy,
        contract: Option<Address>,
    ) -> Self {
        Self {
            chain,
            nonces,
            policy,
            contract,
        }
    }

    /// The shared nonce store
    pub fn nonces(&self) -> &Arc<NonceStore> {
        &self.nonces
    }

    /// Validate `submission` and write it on chain
    ///
    /// Checks run in a fixed order and the first failure is returned. The
    /// nonce is held from its check until the write settles, so concurrent
    /// submissions of one nonce cannot both write. It is consumed only after
    /// the transaction was accepted by the node and released otherwise.
    pub async fn submit(&self, submission: ScoreSubmission) -> Result<TxHash, SubmissionError> {
        let contract = self.contract.ok_or_else(QueryError::missing_contract)?;

        let wallet = parse_address(&submission.wallet).ok_or(SubmissionError::BadWallet)?;
        if submission.nonce.is_empty()
            || submission.message.is_empty()
            || submission.signature.is_empty()
        {
            return Err(SubmissionError::MissingProof);
        }
        if !is_hex_string(&submission.signature) {
            return Err(SubmissionError::SignatureNotHex);
        }

        let score = parse_amount(submission.score_amount.as_ref(), "scoreAmount")?;
        let transactions =
            parse_amount(submission.transaction_amount.as_ref(), "transactionAmount")?;
        let ms_played = parse_ms_played(submission.ms_played.as_ref());

        let span = spans::submit_score(wallet);
        async {
            let now = now_millis();
            let record = self.nonces.reserve(&submission.nonce, wallet, now).await?;

            let outcome = async {
                if !verify_personal_signature(wallet, &submission.message, &submission.signature) {
                    return Err(SubmissionError::InvalidSignature);
                }

                self.policy
                    .check(score, ms_played, record.age_at(now))
                    .inspect_err(|e| warn!(%score, ms_played, reason = %e, "Rejected implausible score"))?;

                let signer = self.chain.signer_address().ok_or(QueryError::SignerMissing)?;
                let role = self.chain.game_role(contract).await?;
                if !self.chain.has_role(contract, role, signer).await? {
                    return Err(SubmissionError::MissingGameRole { signer });
                }

                let tx = self
                    .chain
                    .update_player_data(contract, wallet, score, transactions)
                    .await?;
                Ok::<_, SubmissionError>(tx)
            }
            .await;

            match outcome {
                Ok(tx) => {
                    self.nonces.consume(&submission.nonce).await;
                    info!(%score, %transactions, %tx, "Recorded score on chain");
                    Ok::<_, SubmissionError>(tx)
                }
                Err(err) => {
                    self.nonces.release(&submission.nonce).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}
