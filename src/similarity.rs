// File: similarity.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

/// Below this many comparable bytes a score says nothing useful.
pub const MIN_COMPARABLE_BYTES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Similarity {
    pub distance: usize,
    pub percentage: i32,
}

/// Size of the window both bodies are compared over.
pub fn comparable_length(limit: usize, baseline: &[u8], probe: &[u8]) -> usize {
    limit.min(baseline.len()).min(probe.len())
}

/// Scores the first `length` bytes of both buffers.
///
/// The prefixes are decoded as UTF-8 (invalid sequences become U+FFFD) and
/// compared per character with unit-cost Levenshtein distance. The percentage
/// is taken against the byte window, so a multi-byte character never counts
/// for more than its bytes. `length` must be non-zero.
pub fn score(baseline: &[u8], probe: &[u8], length: usize) -> Similarity {
    let length = length.min(baseline.len()).min(probe.len());
    let left = String::from_utf8_lossy(&baseline[..length]);
    let right = String::from_utf8_lossy(&probe[..length]);

    let distance = strsim::levenshtein(&left, &right);

    Similarity {
        distance,
        percentage: percentage(distance, length),
    }
}

/// `100 - round(distance / length * 100)`, not clamped.
pub fn percentage(distance: usize, length: usize) -> i32 {
    if length == 0 {
        return 0;
    }
    let ratio = distance as f64 / length as f64;
    100 - (ratio * 100.0).round() as i32
}
