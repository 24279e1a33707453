// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Scan window planning
//!
//! Turns "the last N blocks" into a concrete inclusive window ending at the
//! chain head. When covering the whole request would take more than the
//! allowed number of chunk queries, the window is shrunk from the left so the
//! scan cost stays bounded; recent blocks are always kept.
//!
//! # Examples
//!
//! ```
//! use raceboard::{plan_scan, ChunkSize};
//!
//! // Enough budget: the full requested range is scanned
//! let plan = plan_scan(10_000, 1_000, ChunkSize::new(100), 200);
//! assert_eq!((plan.from_block, plan.to_block), (9_001, 10_000));
//!
//! // Budget of 5 chunks of 100 blocks: only the newest 500 blocks
//! let plan = plan_scan(10_000, 1_000, ChunkSize::new(100), 5);
//! assert_eq!((plan.from_block, plan.to_block), (9_501, 10_000));
//! ```

use alloy_primitives::BlockNumber;
use serde::{Deserialize, Serialize};

use crate::ChunkSize;

/// Inclusive block window plus the chunk size to walk it with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPlan {
    /// First block of the window
    pub from_block: BlockNumber,
    /// Last block of the window (the chain head at planning time)
    pub to_block: BlockNumber,
    /// Chunk size the fetcher should use
    pub chunk_size: ChunkSize,
}

impl ScanPlan {
    /// Number of blocks in the window
    pub fn block_count(&self) -> u64 {
        (self.to_block - self.from_block).saturating_add(1)
    }

    /// Upper bound on the chunk queries needed to scan the window
    pub fn chunks_needed(&self) -> u64 {
        self.chunk_size.chunks_needed(self.from_block, self.to_block)
    }
}

/// Plan a scan of the `range` most recent blocks
///
/// `range`, the chunk size and `max_chunks` are treated as at least 1. The
/// returned window never needs more than `max_chunks` chunk queries and never
/// reaches below block 0.
pub fn plan_scan(
    latest_block: BlockNumber,
    range: u64,
    chunk_size: ChunkSize,
    max_chunks: u64,
) -> ScanPlan {
    let chunk_size = ChunkSize::new(chunk_size.as_u64().max(1));
    let range = range.max(1);
    let max_chunks = max_chunks.max(1);

    let to_block = latest_block;
    let mut from_block = to_block.saturating_sub(range - 1);

    if chunk_size.chunks_needed(from_block, to_block) > max_chunks {
        let budget_blocks = chunk_size.as_u64().saturating_mul(max_chunks);
        from_block = to_block.saturating_sub(budget_blocks - 1);
    }

    ScanPlan {
        from_block,
        to_block,
        chunk_size,
    }
}
