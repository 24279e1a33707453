// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Minimum spacing between RPC requests.
//!
//! Public RPC endpoints reject bursts of `eth_getLogs` calls. A chunked scan
//! issues hundreds of them back to back, so the transport can be told to keep
//! a fixed gap between consecutive requests.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use tokio::{sync::Mutex, time::Instant};
use tower::Layer;
use tracing::trace;

/// A Tower layer that spaces requests at least `min_delay` apart.
///
/// Requests are admitted one slot at a time. A request arriving while the
/// previous slot is still within `min_delay` waits for the remainder.
///
/// # Example
///
/// ```rust,ignore
/// use raceboard::transport::ThrottleLayer;
/// use alloy_rpc_client::ClientBuilder;
/// use std::time::Duration;
///
/// let client = ClientBuilder::default()
///     .layer(ThrottleLayer::new(Duration::from_millis(50)))
///     .http(rpc_url);
/// ```
#[derive(Clone, Debug)]
pub struct ThrottleLayer {
    min_delay: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl ThrottleLayer {
    /// Creates a throttle admitting one request per `min_delay`.
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            next_slot: Arc::new(Mutex::new(None)),
        }
    }

    /// The configured gap between requests.
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }
}

impl<S> Layer<S> for ThrottleLayer {
    type Service = ThrottleService<S>;

    fn layer(&self, service: S) -> Self::Service {
        ThrottleService {
            service,
            min_delay: self.min_delay,
            next_slot: self.next_slot.clone(),
        }
    }
}

/// Reserve the next free slot and return when it starts.
///
/// Slots are handed out in call order, so concurrent callers queue up
/// behind each other instead of all waking at the same instant.
async fn reserve_slot(next_slot: &Mutex<Option<Instant>>, min_delay: Duration) -> Instant {
    let mut next = next_slot.lock().await;
    let now = Instant::now();
    let start = match *next {
        Some(slot) if slot > now => slot,
        _ => now,
    };
    *next = Some(start + min_delay);
    start
}

/// A Tower service that delays requests to honor a [`ThrottleLayer`].
#[derive(Clone, Debug)]
pub struct ThrottleService<S> {
    service: S,
    min_delay: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl<S, Request> tower::Service<Request> for ThrottleService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let next_slot = self.next_slot.clone();
        let min_delay = self.min_delay;
        let mut service = self.service.clone();

        Box::pin(async move {
            let start = reserve_slot(&next_slot, min_delay).await;
            let wait = start.saturating_duration_since(Instant::now());
            if !wait.is_zero() {
                trace!(wait_ms = wait.as_millis() as u64, "Throttling RPC request");
                tokio::time::sleep_until(start).await;
            }

            service.call(request).await
        })
    }
}
