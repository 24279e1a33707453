// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Bounded-concurrency batch resolution of display names
//!
//! A fixed pool of workers pulls wallets from a shared cursor, so a worker
//! that finishes early picks up the next wallet instead of idling. Each miss
//! is followed by a short politeness pause before that worker continues.
//!
//! # Example
//!
//! ```rust,ignore
//! use raceboard::identity::{EnrichmentPolicy, HttpIdentityLookup, IdentityCache, IdentityEnricher};
//!
//! let enricher = IdentityEnricher::new(
//!     Arc::new(HttpIdentityLookup::new(url, timeout)?),
//!     Arc::new(IdentityCache::new()),
//!     EnrichmentPolicy::default(),
//! );
//! let names = enricher.resolve(&top_players).await;
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, warn, Instrument};

use super::{IdentityCache, IdentityLookup, LookupOutcome, ParsedIdentity};
use crate::spans;

/// Worker pool shape of the enricher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentPolicy {
    concurrency: usize,
    lookup_delay: Duration,
}

impl EnrichmentPolicy {
    /// Upper bound on concurrent upstream lookups
    pub const MAX_CONCURRENCY: usize = 10;
    /// Default number of workers
    pub const DEFAULT_CONCURRENCY: usize = 6;
    /// Default pause after each upstream lookup
    pub const DEFAULT_LOOKUP_DELAY: Duration = Duration::from_millis(10);

    /// Create a policy; `concurrency` is clamped to `1..=10`
    pub fn new(concurrency: usize, lookup_delay: Duration) -> Self {
        Self {
            concurrency: concurrency.clamp(1, Self::MAX_CONCURRENCY),
            lookup_delay,
        }
    }

    /// Number of workers
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Pause after each upstream lookup
    pub fn lookup_delay(&self) -> Duration {
        self.lookup_delay
    }
}

impl Default for EnrichmentPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CONCURRENCY, Self::DEFAULT_LOOKUP_DELAY)
    }
}

/// Resolves wallets to optional display names through a shared cache
#[derive(Clone)]
pub struct IdentityEnricher {
    lookup: Arc<dyn IdentityLookup>,
    cache: Arc<IdentityCache>,
    policy: EnrichmentPolicy,
}

impl IdentityEnricher {
    /// Create an enricher
    pub fn new(
        lookup: Arc<dyn IdentityLookup>,
        cache: Arc<IdentityCache>,
        policy: EnrichmentPolicy,
    ) -> Self {
        Self {
            lookup,
            cache,
            policy,
        }
    }

    /// The shared cache
    pub fn cache(&self) -> &Arc<IdentityCache> {
        &self.cache
    }

    /// The upstream lookup, for uncached single queries
    pub fn lookup(&self) -> &Arc<dyn IdentityLookup> {
        &self.lookup
    }

    /// The pool policy
    pub fn policy(&self) -> EnrichmentPolicy {
        self.policy
    }

    /// Resolve every wallet in `wallets`
    ///
    /// The result has one entry per distinct wallet. Upstream failures map to
    /// `None`; this never fails.
    pub async fn resolve(&self, wallets: &[Address]) -> HashMap<Address, Option<String>> {
        let mut seen = HashSet::with_capacity(wallets.len());
        let queue: Vec<Address> = wallets.iter().copied().filter(|w| seen.insert(*w)).collect();

        if queue.is_empty() {
            return HashMap::new();
        }

        let workers = self.policy.concurrency.min(queue.len());
        let span = spans::resolve_identities(queue.len(), workers);

        async {
            let cursor = AtomicUsize::new(0);
            let batches = join_all((0..workers).map(|_| self.drain(&queue, &cursor))).await;

            let resolved: HashMap<_, _> = batches.into_iter().flatten().collect();
            debug!(
                wallets = resolved.len(),
                named = resolved.values().filter(|n| n.is_some()).count(),
                "Resolved identities"
            );
            resolved
        }
        .instrument(span)
        .await
    }

    async fn drain(
        &self,
        queue: &[Address],
        cursor: &AtomicUsize,
    ) -> Vec<(Address, Option<String>)> {
        let mut resolved = Vec::new();

        loop {
            let slot = cursor.fetch_add(1, Ordering::Relaxed);
            let Some(&wallet) = queue.get(slot) else {
                break;
            };

            if let Some(cached) = self.cache.get(&wallet).await {
                resolved.push((wallet, cached));
                continue;
            }

            let username = self.fetch(wallet).await;
            self.cache.insert(wallet, username.clone()).await;
            resolved.push((wallet, username));

            if !self.policy.lookup_delay.is_zero() {
                sleep(self.policy.lookup_delay).await;
            }
        }

        resolved
    }

    async fn fetch(&self, wallet: Address) -> Option<String> {
        match self.lookup.lookup(wallet).await {
            LookupOutcome::Parsed(ParsedIdentity::Recognized { username, .. }) => username,
            LookupOutcome::Parsed(ParsedIdentity::Unrecognized) => {
                debug!(%wallet, "Identity response has an unrecognized shape");
                None
            }
            LookupOutcome::Rejected { status } => {
                debug!(%wallet, status, "Identity service rejected lookup");
                None
            }
            LookupOutcome::Failed(e) => {
                warn!(%wallet, error = %e, "Identity lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_clamps_concurrency() {
        assert_eq!(EnrichmentPolicy::new(0, Duration::ZERO).concurrency(), 1);
        assert_eq!(EnrichmentPolicy::new(64, Duration::ZERO).concurrency(), 10);
        assert_eq!(EnrichmentPolicy::default().concurrency(), 6);
        assert_eq!(
            EnrichmentPolicy::default().lookup_delay(),
            Duration::from_millis(10)
        );
    }
}
