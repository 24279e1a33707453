// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface
//!
//! Every failure is answered with `{ "ok": false, "error": "<reason>" }`:
//! 400 for invalid input or missing configuration, 403 when the server
//! signer lacks `GAME_ROLE`, 500 when the chain fails.

mod error;
mod handlers;
mod params;
mod response;

pub use error::{ApiError, ErrorBody};
pub use params::{LeaderboardParams, PlayerEventsParams};

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use crate::score::ScoreSubmitter;
use crate::service::Scoreboard;

/// Shared state of the handlers
#[derive(Clone)]
pub struct AppState {
    scoreboard: Arc<Scoreboard>,
    submitter: Arc<ScoreSubmitter>,
    game_name: Arc<str>,
}

impl AppState {
    /// `game_name` prefixes the score authorization message
    pub fn new(scoreboard: Scoreboard, submitter: ScoreSubmitter, game_name: &str) -> Self {
        Self {
            scoreboard: Arc::new(scoreboard),
            submitter: Arc::new(submitter),
            game_name: Arc::from(game_name),
        }
    }
}

/// Build the router over `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/leaderboard", get(handlers::leaderboard))
        .route("/api/player/events", get(handlers::player_events))
        .route("/api/get-stats", get(handlers::player_stats))
        .route("/api/check-username", get(handlers::check_username))
        .route("/api/score/nonce", get(handlers::score_nonce))
        .route("/api/score/submit", post(handlers::score_submit))
        .route(
            "/game/register",
            get(handlers::game_registration).post(handlers::register_game),
        )
        .route("/game/status", get(handlers::game_status))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Starts the API server and runs until `shutdown` resolves.
pub async fn serve_api<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);
    let addr = listener.local_addr()?;

    tracing::info!(address = ?addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
