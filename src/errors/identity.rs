//! Errors from the identity upstream.
//!
//! These never fail an enclosing request: the enricher logs them and treats
//! the address as having no display name.

/// Transport-level failure while asking the identity service about a wallet.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The HTTP request could not be completed (DNS, TLS, timeout, reset).
    #[error("identity request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The configured endpoint is not a valid URL.
    #[error("invalid identity endpoint {endpoint}: {reason}")]
    InvalidEndpoint {
        /// The configured endpoint
        endpoint: String,
        /// Why it was rejected
        reason: String,
    },
}
