// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Process-wide memo of identity lookups
//!
//! Both names and "no name" are stored, so a wallet is asked about at most
//! once per process. Entries never expire.

use std::collections::HashMap;
use std::fmt;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::trace;

/// Statistics about cache effectiveness
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityCacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to go upstream
    pub misses: u64,
    /// Wallets currently memoized
    pub entries: usize,
}

impl IdentityCacheStats {
    /// Hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for IdentityCacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={}, misses={}, entries={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.entries,
            self.hit_rate()
        )
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<Address, Option<String>>,
    stats: IdentityCacheStats,
}

/// Unbounded wallet → optional name cache
#[derive(Debug, Default)]
pub struct IdentityCache {
    state: Mutex<CacheState>,
}

impl IdentityCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached outcome for `wallet`
    ///
    /// `Some(None)` means the wallet was looked up and has no name.
    pub async fn get(&self, wallet: &Address) -> Option<Option<String>> {
        let mut state = self.state.lock().await;
        let cached = state.entries.get(wallet).cloned();

        if cached.is_some() {
            state.stats.hits += 1;
            trace!(%wallet, "Identity cache hit");
        } else {
            state.stats.misses += 1;
            trace!(%wallet, "Identity cache miss");
        }

        cached
    }

    /// Memoize the outcome for `wallet`
    pub async fn insert(&self, wallet: Address, username: Option<String>) {
        let mut state = self.state.lock().await;
        state.entries.insert(wallet, username);
        state.stats.entries = state.entries.len();
    }

    /// Current statistics
    pub async fn stats(&self) -> IdentityCacheStats {
        self.state.lock().await.stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const WALLET: Address = address!("1111111111111111111111111111111111111111");

    #[tokio::test]
    async fn test_negative_results_are_cached() {
        let cache = IdentityCache::new();
        assert_eq!(cache.get(&WALLET).await, None);

        cache.insert(WALLET, None).await;

        assert_eq!(cache.get(&WALLET).await, Some(None));
        let stats = cache.stats().await;
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
    }

    #[tokio::test]
    async fn test_positive_results_are_cached() {
        let cache = IdentityCache::new();
        cache.insert(WALLET, Some("speedy".to_string())).await;

        assert_eq!(cache.get(&WALLET).await, Some(Some("speedy".to_string())));
        assert_eq!(cache.stats().await.hit_rate(), 100.0);
    }
}
