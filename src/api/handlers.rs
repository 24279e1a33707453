// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use super::error::ApiError;
use super::params::{required_address, LeaderboardParams, PlayerEventsParams, PlayerParam, WalletParam};
use super::response::{
    CheckUsernameBody, HealthBody, LeaderboardBody, NonceBody, PlayerEventsBody, RegisteredBody,
    RegistrationBody, StatsBody, StatusBody, TxBody,
};
use super::AppState;
use crate::errors::QueryError;
use crate::score::ScoreSubmission;
use crate::service::RegistrationOverrides;

/// Unwrap query parameters, turning axum's plain-text rejection into a [`QueryError`]
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, QueryError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| QueryError::invalid_query(rejection.body_text()))
}

/// `GET /api/leaderboard`
pub async fn leaderboard(
    State(state): State<AppState>,
    params: Result<Query<LeaderboardParams>, QueryRejection>,
) -> Result<Json<LeaderboardBody>, ApiError> {
    let request = query_params(params)?.into_request();
    debug!(request = ?request, "Received leaderboard request");

    let report = state.scoreboard.leaderboard(&request).await?;
    Ok(Json(report.into()))
}

/// `GET /api/player/events`
pub async fn player_events(
    State(state): State<AppState>,
    params: Result<Query<PlayerEventsParams>, QueryRejection>,
) -> Result<Json<PlayerEventsBody>, ApiError> {
    let request = query_params(params)?.into_request()?;
    let report = state.scoreboard.player_events(&request).await?;
    Ok(Json(report.into()))
}

/// `GET /api/get-stats`
pub async fn player_stats(
    State(state): State<AppState>,
    params: Result<Query<PlayerParam>, QueryRejection>,
) -> Result<Json<StatsBody>, ApiError> {
    let params = query_params(params)?;
    let player = required_address(params.player.as_deref(), "player")?;
    let stats = state.scoreboard.stats(player).await?;
    Ok(Json(stats.into()))
}

/// `GET /api/check-username`
///
/// Upstream failures are reported with a 200 so clients can fall back to
/// "no username".
pub async fn check_username(
    State(state): State<AppState>,
    params: Result<Query<WalletParam>, QueryRejection>,
) -> Response {
    let wallet = query_params(params)
        .ok()
        .and_then(|params| required_address(params.wallet.as_deref(), "wallet").ok());
    let Some(wallet) = wallet else {
        return (
            StatusCode::BAD_REQUEST,
            Json(CheckUsernameBody::invalid_wallet()),
        )
            .into_response();
    };

    let outcome = state.scoreboard.check_username(wallet).await;
    Json(CheckUsernameBody::from(outcome)).into_response()
}

/// `GET /api/score/nonce`
pub async fn score_nonce(
    State(state): State<AppState>,
    params: Result<Query<WalletParam>, QueryRejection>,
) -> Result<Json<NonceBody>, ApiError> {
    let params = query_params(params)?;
    let wallet = required_address(params.wallet.as_deref(), "wallet")?;
    let record = state.submitter.nonces().issue(wallet).await;
    Ok(Json(NonceBody::new(record, &state.game_name)))
}

/// `POST /api/score/submit`
pub async fn score_submit(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TxBody>, ApiError> {
    let submission: ScoreSubmission =
        serde_json::from_slice(&body).map_err(|e| QueryError::invalid_body(e.to_string()))?;

    let tx = state.submitter.submit(submission).await?;
    Ok(Json(TxBody { ok: true, tx }))
}

/// `GET /game/status`
pub async fn game_status(State(state): State<AppState>) -> Result<Json<StatusBody>, ApiError> {
    let status = state.scoreboard.status().await?;
    Ok(Json(status.into()))
}

/// `GET /game/register`
pub async fn game_registration(
    State(state): State<AppState>,
) -> Result<Json<RegistrationBody>, ApiError> {
    let registration = state.scoreboard.game_registration().await?;
    Ok(Json(registration.into()))
}

/// `POST /game/register`
///
/// An unreadable body registers with the configured metadata.
pub async fn register_game(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RegisteredBody>, ApiError> {
    let overrides: RegistrationOverrides = serde_json::from_slice(&body).unwrap_or_default();
    let receipt = state.scoreboard.register_game(overrides).await?;
    info!(tx = %receipt.tx, "Game registration submitted");
    Ok(Json(receipt.into()))
}

/// `GET /health`
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { ok: true })
}
