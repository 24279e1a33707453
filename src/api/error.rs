// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{QueryError, RaceboardError, SubmissionError};

/// `{ "ok": false, "error": "<reason>" }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

/// A failed request, rendered as an [`ErrorBody`]
#[derive(Debug)]
pub struct ApiError(pub RaceboardError);

impl ApiError {
    /// 400 for caller mistakes, 403 for a signer without `GAME_ROLE`, 500 otherwise
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RaceboardError::Submission(err) if err.is_forbidden() => StatusCode::FORBIDDEN,
            err if err.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RaceboardError> for ApiError {
    fn from(err: RaceboardError) -> Self {
        Self(err)
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self(err.into())
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reason = self.0.reason();

        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            debug!(status = status.as_u16(), error = %reason, "Request rejected");
        }

        (status, Json(ErrorBody::new(reason))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RpcError;
    use alloy_primitives::Address;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        let bad_player = ApiError::from(QueryError::invalid_address("player"));
        assert_eq!(bad_player.status(), StatusCode::BAD_REQUEST);

        let no_role = ApiError::from(SubmissionError::MissingGameRole {
            signer: Address::ZERO,
        });
        assert_eq!(no_role.status(), StatusCode::FORBIDDEN);

        let nonce = ApiError::from(SubmissionError::NonceExpired);
        assert_eq!(nonce.status(), StatusCode::BAD_REQUEST);

        let timeout = ApiError::from(RaceboardError::from(RpcError::timeout(
            "eth_blockNumber",
            Duration::from_secs(1),
        )));
        assert_eq!(timeout.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let write_failed = ApiError::from(SubmissionError::from(RpcError::timeout(
            "updatePlayerData",
            Duration::from_secs(1),
        )));
        assert_eq!(write_failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
