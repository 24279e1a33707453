//! Error types for the raceboard library.
//!
//! This module provides strongly-typed errors for all public APIs in raceboard.
//! It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling (`QueryError`,
//!   `EventProcessingError`, `SubmissionError`, ...)
//! - **Unified error type** (`RaceboardError`) for callers that only need to
//!   know which class of failure happened
//!
//! # Architecture
//!
//! - [`QueryError`] - Validation failures (bad address, missing configuration)
//! - [`EventProcessingError`] - Failures of the chunked event scan
//! - [`RpcError`] - Chain client failures (shared by every module)
//! - [`IdentityError`] - Identity upstream failures, always absorbed by the enricher
//! - [`SubmissionError`] - Rejections of the score submission flow
//!
//! # Example
//!
//! ```rust,ignore
//! use raceboard::{RaceboardError, Scoreboard};
//!
//! async fn example(board: &Scoreboard) -> Result<(), RaceboardError> {
//!     let report = board.leaderboard(&request).await?;
//!     println!("{} rows between {} and {}", report.rows.len(), report.from_block, report.to_block);
//!     Ok(())
//! }
//! ```

mod events;
mod identity;
mod query;
mod rpc;
mod submission;

pub use events::EventProcessingError;
pub use identity::IdentityError;
pub use query::QueryError;
pub use rpc::RpcError;
pub use submission::SubmissionError;

/// Unified error type for the assemblers.
///
/// All module-specific error types convert into `RaceboardError` via `From`,
/// so `?` propagates them naturally.
#[derive(Debug, thiserror::Error)]
pub enum RaceboardError {
    /// The request was invalid; reported as a client error.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The event scan failed; nothing partial is returned.
    #[error("Event processing error: {0}")]
    Events(#[from] EventProcessingError),

    /// A point read or head lookup failed.
    #[error("Chain error: {0}")]
    Rpc(#[from] RpcError),

    /// A score submission was rejected or failed.
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl RaceboardError {
    /// Whether the caller is at fault (4xx) as opposed to an upstream failure (5xx).
    pub fn is_client_error(&self) -> bool {
        match self {
            RaceboardError::Query(_) => true,
            RaceboardError::Submission(err) => !err.is_upstream(),
            RaceboardError::Events(err) => !err.is_upstream(),
            RaceboardError::Rpc(_) => false,
        }
    }

    /// Short reason string for response envelopes.
    pub fn reason(&self) -> String {
        match self {
            RaceboardError::Query(err) => err.to_string(),
            RaceboardError::Events(EventProcessingError::Rpc(err)) => err.root_message(),
            RaceboardError::Events(err) => err.to_string(),
            RaceboardError::Rpc(err) => err.root_message(),
            RaceboardError::Submission(SubmissionError::Rpc(err)) => err.root_message(),
            RaceboardError::Submission(err) => err.to_string(),
        }
    }
}
