// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Chunked event fetching
//!
//! Walks a block window in fixed-size chunks, one `eth_getLogs` per chunk,
//! strictly one after another. Results are concatenated in chunk order and
//! are not sorted here.
//!
//! # Example
//!
//! ```rust,ignore
//! use raceboard::{fetch_events_chunked, ChunkSize, ScoreEventFilter};
//!
//! let filter = ScoreEventFilter::new(registry).for_game(game);
//! let events = fetch_events_chunked(&client, &filter, 1_000, 1_275, ChunkSize::new(90)).await?;
//! ```

use tracing::{debug, Instrument};

use crate::chain::{ChainClient, ScoreEvent};
use crate::errors::EventProcessingError;
use crate::events::filter::ScoreEventFilter;
use crate::spans;
use crate::ChunkSize;

/// Fetch score events over `[from_block, to_block]` in chunks
///
/// # Arguments
///
/// * `client` - Chain client issuing the range queries
/// * `filter` - Contract and optional indexed-argument restriction
/// * `from_block`, `to_block` - Inclusive window; an inverted window yields nothing
/// * `chunk_size` - Blocks each query advances past its start block
///
/// # Errors
///
/// Returns an error if:
/// - `chunk_size` is zero
/// - Any chunk query fails (fails fast, no partial results)
pub async fn fetch_events_chunked(
    client: &dyn ChainClient,
    filter: &ScoreEventFilter,
    from_block: u64,
    to_block: u64,
    chunk_size: ChunkSize,
) -> Result<Vec<ScoreEvent>, EventProcessingError> {
    if chunk_size.as_u64() == 0 {
        return Err(EventProcessingError::invalid_input(
            "chunk_size must be greater than 0",
        ));
    }

    let span = spans::scan_range(filter.contract(), from_block, to_block, chunk_size.as_u64());
    fetch_chunks(client, filter, from_block, to_block, chunk_size)
        .instrument(span)
        .await
}

async fn fetch_chunks(
    client: &dyn ChainClient,
    filter: &ScoreEventFilter,
    from_block: u64,
    to_block: u64,
    chunk_size: ChunkSize,
) -> Result<Vec<ScoreEvent>, EventProcessingError> {
    debug!(
        from_block,
        to_block,
        chunk_size = chunk_size.as_u64(),
        max_chunks = chunk_size.chunks_needed(from_block, to_block),
        game = ?filter.game(),
        player = ?filter.player(),
        "Starting chunked event fetch"
    );

    let mut all_events = Vec::new();

    for (chunk_start, chunk_end) in chunk_size.chunk_range(from_block, to_block) {
        debug!(chunk_start, chunk_end, "Fetching events for chunk");

        let events = client
            .score_events(filter, chunk_start, chunk_end)
            .await
            .inspect_err(|e| {
                debug!(chunk_start, chunk_end, error = %e, "Chunk fetch failed, aborting scan");
            })?;

        debug!(events_count = events.len(), "Fetched events for chunk");
        all_events.extend(events);
    }

    debug!(total_events = all_events.len(), "Finished chunked event fetch");

    Ok(all_events)
}
