// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Score event processing.
//!
//! This module handles:
//! - The `PlayerDataUpdated` event definition
//! - Semantic filter builders over its indexed arguments
//! - Chunked, sequential scanning of a block window

pub mod chunked;
pub mod definitions;
pub mod filter;

pub use chunked::fetch_events_chunked;
pub use definitions::PlayerDataUpdated;
pub use filter::ScoreEventFilter;
