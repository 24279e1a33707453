// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for the alloy RPC transport.
//!
//! Every JSON-RPC call runs inside an `rpc_call` span carrying the method
//! name and, once finished, its duration. Successful calls log at DEBUG,
//! calls slower than the configured threshold at INFO, failures at WARN.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::{Duration, Instant},
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::TransportError;
use tower::Layer;
use tracing::{debug, info, trace, warn, Instrument};

/// Calls slower than this are logged at INFO by default
pub const DEFAULT_SLOW_CALL: Duration = Duration::from_secs(2);

/// A Tower layer that adds logging to RPC requests.
///
/// # Example
///
/// ```rust,ignore
/// use raceboard::transport::LoggingLayer;
/// use alloy_rpc_client::ClientBuilder;
///
/// let client = ClientBuilder::default()
///     .layer(LoggingLayer::new())
///     .http(rpc_url);
/// ```
#[derive(Clone, Debug)]
pub struct LoggingLayer {
    /// Whether to log request and response payloads at TRACE
    log_payloads: bool,
    /// Duration above which a successful call is reported at INFO
    slow_call: Duration,
}

impl Default for LoggingLayer {
    fn default() -> Self {
        Self {
            log_payloads: false,
            slow_call: DEFAULT_SLOW_CALL,
        }
    }
}

impl LoggingLayer {
    /// Creates a new logging layer with default settings.
    ///
    /// By default, only method names, timing and errors are logged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log request and response payloads at TRACE.
    ///
    /// `eth_getLogs` responses can be large.
    pub fn with_payloads(mut self) -> Self {
        self.log_payloads = true;
        self
    }

    /// Report successful calls slower than `threshold` at INFO.
    pub fn with_slow_call(mut self, threshold: Duration) -> Self {
        self.slow_call = threshold;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            log_payloads: self.log_payloads,
            slow_call: self.slow_call,
        }
    }
}

/// A Tower service that logs RPC requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    log_payloads: bool,
    slow_call: Duration,
}

impl<S> tower::Service<RequestPacket> for LoggingService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let log_payloads = self.log_payloads;
        let slow_call = self.slow_call;
        let mut service = self.service.clone();

        let method = describe_request(&request);
        let span = tracing::debug_span!(
            "rpc_call",
            method = %method,
            duration_ms = tracing::field::Empty,
        );

        Box::pin(
            async move {
                if log_payloads {
                    trace!(request = ?request, "RPC request");
                }

                let start = Instant::now();
                let result = service.call(request).await;
                let duration = start.elapsed();
                let duration_ms = duration.as_millis() as u64;

                tracing::Span::current().record("duration_ms", duration_ms);

                match &result {
                    Ok(response) => {
                        if log_payloads {
                            trace!(response = ?response, duration_ms, "RPC response");
                        }
                        if duration >= slow_call {
                            info!(duration_ms, "Slow RPC call: {method}");
                        } else {
                            debug!(duration_ms, "RPC call: {method}");
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, duration_ms, "RPC error: {method}");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Method name of a request packet, or a summary for batches.
fn describe_request(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [only] => only.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_layer_default() {
        let layer = LoggingLayer::new();
        assert!(!layer.log_payloads);
        assert_eq!(layer.slow_call, DEFAULT_SLOW_CALL);
    }

    #[test]
    fn test_logging_layer_builders() {
        let layer = LoggingLayer::new()
            .with_payloads()
            .with_slow_call(Duration::from_millis(500));
        assert!(layer.log_payloads);
        assert_eq!(layer.slow_call, Duration::from_millis(500));
    }
}
