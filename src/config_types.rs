// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for configuration values
//!
//! These types keep scan-shaping values (chunk sizes, clamped query
//! parameters) from being confused with block numbers or scores.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Number of blocks a single `eth_getLogs` query advances past its start block
///
/// A chunk that starts at block `s` covers `[s, s + chunk_size]`, clipped to the
/// end of the scanned window, and the next chunk starts right after it. With a
/// chunk size of 90 the window `[1000, 1275]` is fetched as
/// `[1000,1090]`, `[1091,1181]`, `[1182,1272]`, `[1273,1275]`.
///
/// # Examples
///
/// ```
/// use raceboard::ChunkSize;
///
/// let chunk = ChunkSize::new(90);
/// let chunks: Vec<_> = chunk.chunk_range(1000, 1275).collect();
/// assert_eq!(chunks, vec![(1000, 1090), (1091, 1181), (1182, 1272), (1273, 1275)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkSize(u64);

impl ChunkSize {
    /// Default chunk size used by the query surfaces
    pub const DEFAULT: Self = Self(90);

    /// Create a new chunk size
    pub const fn new(blocks: u64) -> Self {
        Self(blocks)
    }

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Upper bound on the number of queries needed to cover `[start, end]`
    ///
    /// This is `ceil(span / chunk_size)`. Because each query actually spans
    /// `chunk_size + 1` blocks, [`chunk_range`](Self::chunk_range) never yields
    /// more chunks than this.
    ///
    /// # Examples
    ///
    /// ```
    /// use raceboard::ChunkSize;
    ///
    /// let chunk = ChunkSize::new(1000);
    /// assert_eq!(chunk.chunks_needed(0, 2499), 3);
    /// assert_eq!(chunk.chunks_needed(100, 50), 0);
    /// ```
    pub fn chunks_needed(&self, start: u64, end: u64) -> u64 {
        if end < start {
            return 0;
        }
        let total_blocks = (end - start).saturating_add(1);
        total_blocks.div_ceil(self.0.max(1))
    }

    /// Split a block range into `(start, end)` chunks, both inclusive
    pub fn chunk_range(&self, start: u64, end: u64) -> ChunkIterator {
        ChunkIterator {
            current: start,
            end,
            step: self.0,
            done: end < start,
        }
    }
}

impl From<u64> for ChunkSize {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} blocks", self.0)
    }
}

/// Iterator over block range chunks
///
/// Created by [`ChunkSize::chunk_range`].
#[derive(Debug, Clone)]
pub struct ChunkIterator {
    current: u64,
    end: u64,
    step: u64,
    done: bool,
}

impl Iterator for ChunkIterator {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let chunk_start = self.current;
        let chunk_end = chunk_start.saturating_add(self.step).min(self.end);

        if chunk_end >= self.end {
            self.done = true;
        } else {
            self.current = chunk_end + 1;
        }

        Some((chunk_start, chunk_end))
    }
}

/// Default and inclusive bounds of an integer query parameter
///
/// Query surfaces never reject a numeric parameter: anything missing or
/// unparsable falls back to the default and anything else is clamped.
///
/// # Examples
///
/// ```
/// use raceboard::IntBounds;
///
/// let limit = IntBounds::new(20, 1, 100);
/// assert_eq!(limit.resolve(None), 20);
/// assert_eq!(limit.resolve(Some("500")), 100);
/// assert_eq!(limit.resolve(Some("abc")), 20);
/// assert_eq!(limit.resolve(Some("7.9")), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntBounds {
    /// Value used when the parameter is absent or not a finite number
    pub default: u64,
    /// Smallest accepted value
    pub min: u64,
    /// Largest accepted value
    pub max: u64,
}

impl IntBounds {
    /// Create new bounds
    pub const fn new(default: u64, min: u64, max: u64) -> Self {
        Self { default, min, max }
    }

    /// Clamp an already-numeric value into `[min, max]`
    pub fn clamp(&self, value: u64) -> u64 {
        value.clamp(self.min, self.max)
    }

    /// Resolve a raw query-string value
    ///
    /// Absent means default. An empty string counts as zero, fractional values
    /// are truncated toward zero, and non-finite or non-numeric input falls back
    /// to the default.
    pub fn resolve(&self, raw: Option<&str>) -> u64 {
        let Some(raw) = raw else {
            return self.default;
        };

        let trimmed = raw.trim();
        let parsed = if trimmed.is_empty() {
            0.0
        } else {
            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => value.trunc(),
                _ => return self.default,
            }
        };

        if parsed <= self.min as f64 {
            self.min
        } else if parsed >= self.max as f64 {
            self.max
        } else {
            parsed as u64
        }
    }
}

/// Parse a strictly formatted address: `0x` followed by 40 hex digits
///
/// Either hex case is accepted and no checksum is enforced. Unlike
/// `Address::from_str`, a missing `0x` prefix is rejected.
///
/// # Examples
///
/// ```
/// use raceboard::parse_address;
///
/// assert!(parse_address("0xAbCdEf0123456789aBcDeF0123456789AbCdEf01").is_some());
/// assert!(parse_address("AbCdEf0123456789aBcDeF0123456789AbCdEf01").is_none());
/// assert!(parse_address("0x1234").is_none());
/// ```
pub fn parse_address(raw: &str) -> Option<Address> {
    let digits = raw.strip_prefix("0x")?;
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_range_matches_inclusive_stride() {
        let chunks: Vec<_> = ChunkSize::new(90).chunk_range(1000, 1275).collect();

        assert_eq!(
            chunks,
            vec![(1000, 1090), (1091, 1181), (1182, 1272), (1273, 1275)]
        );
    }

    #[test]
    fn test_chunk_range_single_block() {
        let chunks: Vec<_> = ChunkSize::new(90).chunk_range(42, 42).collect();
        assert_eq!(chunks, vec![(42, 42)]);
    }

    #[test]
    fn test_chunk_range_empty_when_inverted() {
        assert_eq!(ChunkSize::new(90).chunk_range(10, 9).count(), 0);
    }

    #[test]
    fn test_chunk_range_stops_at_u64_max() {
        let chunks: Vec<_> = ChunkSize::new(10)
            .chunk_range(u64::MAX - 3, u64::MAX)
            .collect();
        assert_eq!(chunks, vec![(u64::MAX - 3, u64::MAX)]);
    }

    #[test]
    fn test_chunks_needed_is_upper_bound_of_iterator() {
        let chunk = ChunkSize::new(90);
        for (start, end) in [(0, 0), (0, 89), (0, 90), (1000, 1275), (5, 18_004)] {
            let yielded = chunk.chunk_range(start, end).count() as u64;
            assert!(yielded <= chunk.chunks_needed(start, end));
        }
    }

    #[test]
    fn test_chunks_needed() {
        let chunk = ChunkSize::new(1000);
        assert_eq!(chunk.chunks_needed(0, 999), 1);
        assert_eq!(chunk.chunks_needed(0, 1000), 2);
        assert_eq!(chunk.chunks_needed(100, 100), 1);
        assert_eq!(chunk.chunks_needed(100, 50), 0);
    }

    #[test]
    fn test_int_bounds_resolve() {
        let bounds = IntBounds::new(10_000, 100, 50_000);

        assert_eq!(bounds.resolve(None), 10_000);
        assert_eq!(bounds.resolve(Some("250")), 250);
        assert_eq!(bounds.resolve(Some("99")), 100);
        assert_eq!(bounds.resolve(Some("1000000")), 50_000);
        assert_eq!(bounds.resolve(Some("-5")), 100);
        assert_eq!(bounds.resolve(Some("")), 100);
        assert_eq!(bounds.resolve(Some("NaN")), 10_000);
        assert_eq!(bounds.resolve(Some("inf")), 10_000);
        assert_eq!(bounds.resolve(Some("1e3")), 1000);
        assert_eq!(bounds.resolve(Some(" 321.99 ")), 321);
    }

    #[test]
    fn test_parse_address_is_strict() {
        assert!(parse_address("0x0000000000000000000000000000000000000001").is_some());
        assert!(parse_address("0X0000000000000000000000000000000000000001").is_none());
        assert!(parse_address("0x000000000000000000000000000000000000000g").is_none());
        assert!(parse_address(" 0x0000000000000000000000000000000000000001").is_none());
        assert!(parse_address("").is_none());
    }

    #[test]
    fn test_int_bounds_clamp() {
        let bounds = IntBounds::new(20, 1, 100);
        assert_eq!(bounds.clamp(0), 1);
        assert_eq!(bounds.clamp(50), 50);
        assert_eq!(bounds.clamp(101), 100);
    }
}
