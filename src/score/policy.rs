// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Score plausibility checks applied before a score is written on chain

use std::time::Duration;

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::errors::SubmissionError;

/// Bounds on what a single play session can reasonably score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlausibilityPolicy {
    /// Score a player can earn per second of play
    pub points_per_second: f64,
    /// Score always allowed, however short the session
    pub score_floor: u64,
    /// Sessions reported shorter than this are rejected
    pub min_session: Duration,
}

impl Default for PlausibilityPolicy {
    fn default() -> Self {
        Self {
            points_per_second: 200.0,
            score_floor: 300,
            min_session: Duration::from_millis(2_000),
        }
    }
}

impl PlausibilityPolicy {
    /// Highest acceptable score for a session of `secs` seconds
    pub fn max_score(&self, secs: f64) -> U256 {
        let allowed = (self.points_per_second * secs).max(self.score_floor as f64);
        U256::from(allowed.floor() as u128)
    }

    /// Check a submitted score
    ///
    /// `ms_played` is the client-reported session length; when it is not
    /// positive, `since_issued` (time since the nonce was handed out) is used
    /// instead. The score check runs before the session-length check.
    pub fn check(
        &self,
        score: U256,
        ms_played: f64,
        since_issued: Duration,
    ) -> Result<(), SubmissionError> {
        let reported = ms_played > 0.0;
        let elapsed_ms = if reported {
            ms_played
        } else {
            since_issued.as_millis() as f64
        };
        let secs = (elapsed_ms / 1_000.0).max(0.001);

        if score > self.max_score(secs) {
            return Err(SubmissionError::UnreasonableScore);
        }
        if reported && ms_played < self.min_session.as_millis() as f64 {
            return Err(SubmissionError::SessionTooShort);
        }
        Ok(())
    }
}
