//! Shared RPC error types for chain client operations.
//!
//! Every failure of the chain client capability (block number, log queries,
//! contract reads and writes) is reported through [`RpcError`], carrying a
//! description of the operation that failed.

use std::time::Duration;

/// Errors that can occur while talking to the chain.
///
/// # Examples
///
/// ```rust
/// use raceboard::RpcError;
/// use std::time::Duration;
///
/// let error = RpcError::Timeout {
///     operation: "eth_blockNumber".to_string(),
///     after: Duration::from_secs(30),
/// };
/// assert!(error.to_string().contains("eth_blockNumber"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Failed to fetch logs from the chain.
    ///
    /// This can occur due to provider range limits, rate limiting or
    /// connectivity issues.
    #[error("Failed to fetch logs for {operation}")]
    GetLogsFailed {
        /// Description of the operation that failed (e.g., "blocks 100-190")
        operation: String,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to fetch the current chain head.
    #[error("Failed to get current block number")]
    GetBlockNumberFailed {
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A read-only contract call failed or reverted.
    #[error("Contract call {function} failed")]
    ContractCallFailed {
        /// Name of the contract function
        function: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A state-changing contract call could not be sent.
    #[error("Transaction {function} failed")]
    TransactionFailed {
        /// Name of the contract function
        function: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The chain did not answer within the configured timeout.
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        /// Description of the operation that timed out
        operation: String,
        /// The configured timeout
        after: Duration,
    },

    /// The RPC endpoint URL could not be parsed.
    #[error("Invalid RPC URL: {0}")]
    ProviderUrlInvalid(String),

    /// The client has no signer, so it cannot send transactions.
    #[error("No server signer configured for {function}")]
    SignerUnavailable {
        /// Name of the contract function that needed a signer
        function: String,
    },
}

impl RpcError {
    /// Helper to create a `GetLogsFailed` error from any error type.
    pub fn get_logs_failed(
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::GetLogsFailed {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `GetBlockNumberFailed` error from any error type.
    pub fn get_block_number_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RpcError::GetBlockNumberFailed {
            source: Box::new(source),
        }
    }

    /// Helper to create a `ContractCallFailed` error from any error type.
    pub fn contract_call_failed(
        function: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::ContractCallFailed {
            function: function.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `TransactionFailed` error from any error type.
    pub fn transaction_failed(
        function: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::TransactionFailed {
            function: function.into(),
            source: Box::new(source),
        }
    }

    /// Helper to create a `Timeout` error.
    pub fn timeout(operation: impl Into<String>, after: Duration) -> Self {
        RpcError::Timeout {
            operation: operation.into(),
            after,
        }
    }

    /// Message of the innermost error, falling back to this error's own message.
    ///
    /// Response envelopes use this so callers see the provider's reason
    /// (e.g., a revert string) rather than only the operation name.
    pub fn root_message(&self) -> String {
        let mut innermost = None;
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            innermost = Some(err);
            source = err.source();
        }

        match innermost {
            Some(err) => format!("{self}: {err}"),
            None => self.to_string(),
        }
    }
}
