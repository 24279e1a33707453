// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! One-time nonces that authorize a single score submission
//!
//! Records live in process memory only. A nonce is bound to one wallet,
//! expires after the store's TTL, and is consumed by the first successful
//! on-chain write it authorizes.

use std::collections::HashMap;
use std::time::Duration;

use alloy_primitives::{hex, Address, B128};
use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::SubmissionError;

/// Milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A nonce issued to a wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceRecord {
    /// Wallet the nonce was issued to
    pub wallet: Address,
    /// 32 lowercase hex characters
    pub nonce: String,
    /// Issuance time in Unix milliseconds
    pub issued_at: i64,
    /// Lifetime in milliseconds
    pub ttl_ms: u64,
    /// Whether a submission already consumed it
    pub used: bool,
    /// Held by a submission whose write is still outstanding
    #[serde(skip)]
    pub pending: bool,
}

impl NonceRecord {
    /// Fresh, unused record for `wallet`
    pub fn new(wallet: Address, nonce: String, issued_at: i64, ttl: Duration) -> Self {
        Self {
            wallet,
            nonce,
            issued_at,
            ttl_ms: ttl.as_millis() as u64,
            used: false,
            pending: false,
        }
    }

    /// Last valid instant in Unix milliseconds
    pub fn expires_at(&self) -> i64 {
        self.issued_at.saturating_add(self.ttl_ms as i64)
    }

    /// Whether the record is past its TTL at `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at()
    }

    /// Time since issuance, zero if `now` precedes it
    pub fn age_at(&self, now: i64) -> Duration {
        Duration::from_millis(now.saturating_sub(self.issued_at).max(0) as u64)
    }

    /// The text the wallet must sign to authorize a submission
    pub fn authorization_message(&self, game_name: &str) -> String {
        format!(
            "{game_name} Score Authorization\nwallet={:#x}\nnonce={}\nissuedAt={}",
            self.wallet, self.nonce, self.issued_at
        )
    }
}

/// Injected, mutex-guarded nonce store
#[derive(Debug)]
pub struct NonceStore {
    ttl: Duration,
    records: Mutex<HashMap<String, NonceRecord>>,
}

impl NonceStore {
    /// Default nonce lifetime
    pub const DEFAULT_TTL: Duration = Duration::from_secs(120);

    /// Empty store issuing nonces valid for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Lifetime of issued nonces
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sweep expired records, then issue a fresh nonce for `wallet`
    pub async fn issue(&self, wallet: Address) -> NonceRecord {
        let now = now_millis();
        self.sweep_expired(now).await;

        let record = NonceRecord::new(wallet, hex::encode(B128::random()), now, self.ttl);
        self.put(record.clone()).await;

        debug!(%wallet, nonce = %record.nonce, "Issued score nonce");
        record
    }

    /// Store a record under its nonce
    pub async fn put(&self, record: NonceRecord) {
        self.records
            .lock()
            .await
            .insert(record.nonce.clone(), record);
    }

    /// Look up a record
    pub async fn get(&self, nonce: &str) -> Option<NonceRecord> {
        self.records.lock().await.get(nonce).cloned()
    }

    /// Check `nonce` for a submission by `wallet` and hold it
    ///
    /// All checks and the hold happen under one lock, so of several
    /// concurrent submissions only one gets the record; the others see
    /// [`SubmissionError::NonceUsed`]. The holder must finish with
    /// [`consume`](Self::consume) or [`release`](Self::release).
    pub async fn reserve(
        &self,
        nonce: &str,
        wallet: Address,
        now: i64,
    ) -> Result<NonceRecord, SubmissionError> {
        let mut records = self.records.lock().await;
        let record = records.get_mut(nonce).ok_or(SubmissionError::NonceNotFound)?;

        if record.used || record.pending {
            return Err(SubmissionError::NonceUsed);
        }
        if record.wallet != wallet {
            return Err(SubmissionError::NonceWalletMismatch);
        }
        if record.is_expired_at(now) {
            return Err(SubmissionError::NonceExpired);
        }

        record.pending = true;
        Ok(record.clone())
    }

    /// Give a held nonce back so it can be submitted again
    pub async fn release(&self, nonce: &str) {
        if let Some(record) = self.records.lock().await.get_mut(nonce) {
            record.pending = false;
        }
    }

    /// Mark a nonce used; returns false if it is unknown
    pub async fn consume(&self, nonce: &str) -> bool {
        match self.records.lock().await.get_mut(nonce) {
            Some(record) => {
                record.used = true;
                record.pending = false;
                true
            }
            None => false,
        }
    }

    /// Drop every record expired at `now`; returns how many were dropped
    pub async fn sweep_expired(&self, now: i64) -> usize {
        let mut records = self.records.lock().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        let swept = before - records.len();
        if swept > 0 {
            debug!(swept, remaining = records.len(), "Swept expired nonces");
        }
        swept
    }

    /// Number of live records
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

impl Default for NonceStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
