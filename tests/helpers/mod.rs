// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for raceboard integration tests
//!
//! Provides scripted implementations of the chain and identity capabilities
//! so the pipeline can be exercised without a node or the identity service.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, TxHash, B256, U256};
use async_trait::async_trait;
use raceboard::{
    ChainClient, EventProcessingError, GameInfo, GameMetadata, IdentityCache, IdentityEnricher,
    IdentityError, IdentityLookup, EnrichmentPolicy, LookupOutcome, ParsedIdentity, PlayerTotals,
    RpcError, ScoreEvent, ScoreEventFilter, Scoreboard,
};

/// Registry contract used throughout the tests
pub const CONTRACT: Address = Address::repeat_byte(0xc0);

/// Address whose last byte is `n`
pub fn addr(n: u8) -> Address {
    Address::with_last_byte(n)
}

/// A mined score event
pub fn event(game: Address, player: Address, score: u64, transactions: u64, block: u64) -> ScoreEvent {
    ScoreEvent {
        game,
        player,
        score_amount: U256::from(score),
        transaction_amount: U256::from(transactions),
        block_number: Some(block),
        transaction_hash: Some(B256::with_last_byte(block as u8)),
    }
}

#[derive(Debug)]
struct ScriptedFailure(&'static str);

impl std::fmt::Display for ScriptedFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for ScriptedFailure {}

/// Scripted chain client
///
/// `score_events` answers from the scripted events, honoring the block range
/// and the indexed `game`/`player` filters. Every queried range is recorded.
///
/// # Example
///
/// ```rust,ignore
/// let chain = MockChainClient::new(1275)
///     .with_events(vec![event(game, player, 100, 1, 1200)])
///     .failing_on_chunk(2);
/// ```
pub struct MockChainClient {
    head: u64,
    events: Vec<ScoreEvent>,
    fail_on_chunk: Option<usize>,
    signer: Option<Address>,
    has_game_role: bool,
    fail_writes: bool,
    write_delay: Duration,
    totals: PlayerTotals,
    per_game: PlayerTotals,
    registered: GameInfo,
    ranges: Mutex<Vec<(u64, u64)>>,
    writes: Mutex<Vec<(Address, U256, U256)>>,
    registrations: Mutex<Vec<GameInfo>>,
}

impl MockChainClient {
    /// Chain at `head` with no events, no signer
    pub fn new(head: u64) -> Self {
        Self {
            head,
            events: Vec::new(),
            fail_on_chunk: None,
            signer: None,
            has_game_role: true,
            fail_writes: false,
            write_delay: Duration::ZERO,
            totals: PlayerTotals::default(),
            per_game: PlayerTotals::default(),
            registered: GameInfo::default(),
            ranges: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            registrations: Mutex::new(Vec::new()),
        }
    }

    pub fn with_events(mut self, events: Vec<ScoreEvent>) -> Self {
        self.events = events;
        self
    }

    /// Fail the `n`th log query (0-based)
    pub fn failing_on_chunk(mut self, n: usize) -> Self {
        self.fail_on_chunk = Some(n);
        self
    }

    pub fn with_signer(mut self, signer: Address) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn without_game_role(mut self) -> Self {
        self.has_game_role = false;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Suspend every `updatePlayerData` call for `delay` before it settles
    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    pub fn with_totals(mut self, totals: PlayerTotals, per_game: PlayerTotals) -> Self {
        self.totals = totals;
        self.per_game = per_game;
        self
    }

    pub fn with_registration(mut self, info: GameInfo) -> Self {
        self.registered = info;
        self
    }

    /// Block ranges queried so far, in order
    pub fn ranges(&self) -> Vec<(u64, u64)> {
        self.ranges.lock().unwrap().clone()
    }

    /// `updatePlayerData` calls so far
    pub fn writes(&self) -> Vec<(Address, U256, U256)> {
        self.writes.lock().unwrap().clone()
    }

    /// `registerGame` calls so far
    pub fn registrations(&self) -> Vec<GameInfo> {
        self.registrations.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn block_number(&self) -> Result<u64, RpcError> {
        Ok(self.head)
    }

    async fn score_events(
        &self,
        filter: &ScoreEventFilter,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ScoreEvent>, EventProcessingError> {
        let call = {
            let mut ranges = self.ranges.lock().unwrap();
            ranges.push((from_block, to_block));
            ranges.len() - 1
        };

        if self.fail_on_chunk == Some(call) {
            return Err(RpcError::get_logs_failed(
                format!("blocks {from_block}-{to_block}"),
                ScriptedFailure("query returned more than 10000 results"),
            )
            .into());
        }

        Ok(self
            .events
            .iter()
            .filter(|e| {
                let block = e.block_number.unwrap_or(0);
                block >= from_block && block <= to_block
            })
            .filter(|e| filter.game().is_none_or(|game| e.game == game))
            .filter(|e| filter.player().is_none_or(|player| e.player == player))
            .cloned()
            .collect())
    }

    async fn total_score_of_player(
        &self,
        _contract: Address,
        _player: Address,
    ) -> Result<U256, RpcError> {
        Ok(self.totals.score)
    }

    async fn total_transactions_of_player(
        &self,
        _contract: Address,
        _player: Address,
    ) -> Result<U256, RpcError> {
        Ok(self.totals.transactions)
    }

    async fn player_data_per_game(
        &self,
        _contract: Address,
        _game: Address,
        _player: Address,
    ) -> Result<PlayerTotals, RpcError> {
        Ok(self.per_game)
    }

    fn signer_address(&self) -> Option<Address> {
        self.signer
    }

    async fn game_role(&self, _contract: Address) -> Result<B256, RpcError> {
        Ok(B256::repeat_byte(0x6a))
    }

    async fn has_role(
        &self,
        _contract: Address,
        _role: B256,
        _account: Address,
    ) -> Result<bool, RpcError> {
        Ok(self.has_game_role)
    }

    async fn update_player_data(
        &self,
        _contract: Address,
        player: Address,
        score_amount: U256,
        transaction_amount: U256,
    ) -> Result<TxHash, RpcError> {
        if !self.write_delay.is_zero() {
            tokio::time::sleep(self.write_delay).await;
        }
        if self.fail_writes {
            return Err(RpcError::transaction_failed(
                "updatePlayerData",
                ScriptedFailure("insufficient funds for gas"),
            ));
        }
        self.writes
            .lock()
            .unwrap()
            .push((player, score_amount, transaction_amount));
        Ok(TxHash::repeat_byte(0xaa))
    }

    async fn game_info(&self, _contract: Address, _game: Address) -> Result<GameInfo, RpcError> {
        Ok(self.registered.clone())
    }

    async fn register_game(
        &self,
        _contract: Address,
        game: &GameInfo,
    ) -> Result<TxHash, RpcError> {
        self.registrations.lock().unwrap().push(game.clone());
        Ok(TxHash::repeat_byte(0xbb))
    }
}

/// How the mock identity service answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityMode {
    /// Names from the table, no name otherwise
    Healthy,
    /// Every lookup gets the given HTTP status
    Rejecting(u16),
    /// Every lookup fails in transport
    Failing,
}

/// Scripted identity service counting its lookups
///
/// Lookups can be made to suspend, globally or per wallet; the number of
/// lookups in flight at once is tracked with a high-water mark.
pub struct MockIdentityLookup {
    names: HashMap<Address, String>,
    mode: IdentityMode,
    delay: Duration,
    wallet_delays: HashMap<Address, Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    wallets: Mutex<Vec<Address>>,
}

impl MockIdentityLookup {
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
            mode: IdentityMode::Healthy,
            delay: Duration::ZERO,
            wallet_delays: HashMap::new(),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            wallets: Mutex::new(Vec::new()),
        }
    }

    pub fn with_name(mut self, wallet: Address, name: &str) -> Self {
        self.names.insert(wallet, name.to_string());
        self
    }

    pub fn with_mode(mut self, mode: IdentityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Every lookup takes `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Lookups of `wallet` take `delay` instead
    pub fn with_wallet_delay(mut self, wallet: Address, delay: Duration) -> Self {
        self.wallet_delays.insert(wallet, delay);
        self
    }

    /// Most lookups observed in flight at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Number of upstream lookups so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wallets looked up so far, in order
    pub fn wallets(&self) -> Vec<Address> {
        self.wallets.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityLookup for MockIdentityLookup {
    async fn lookup(&self, wallet: Address) -> LookupOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.wallets.lock().unwrap().push(wallet);

        let delay = self.wallet_delays.get(&wallet).copied().unwrap_or(self.delay);
        if !delay.is_zero() {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }

        match self.mode {
            IdentityMode::Healthy => LookupOutcome::Parsed(ParsedIdentity::Recognized {
                username: self.names.get(&wallet).cloned(),
                flagged: self.names.contains_key(&wallet),
            }),
            IdentityMode::Rejecting(status) => LookupOutcome::Rejected { status },
            IdentityMode::Failing => LookupOutcome::Failed(IdentityError::InvalidEndpoint {
                endpoint: "mock://identity".to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

/// Enricher over `lookup` with a fresh cache and no politeness delay
pub fn enricher(lookup: Arc<MockIdentityLookup>, concurrency: usize) -> IdentityEnricher {
    IdentityEnricher::new(
        lookup,
        Arc::new(IdentityCache::new()),
        EnrichmentPolicy::new(concurrency, Duration::ZERO),
    )
}

/// Scoreboard over the mocks, with [`CONTRACT`] configured
pub fn scoreboard(chain: Arc<MockChainClient>, lookup: Arc<MockIdentityLookup>) -> Scoreboard {
    Scoreboard::new(chain, enricher(lookup, 4), Some(CONTRACT), GameMetadata::default())
}
