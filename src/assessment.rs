// File: assessment.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::similarity::{self, MIN_COMPARABLE_BYTES};
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Match,
    Miss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Match => write!(f, "match"),
            Outcome::Miss => write!(f, "miss"),
        }
    }
}

/// Strictly greater than: a score equal to the threshold is a miss.
pub fn classify(percentage: i32, threshold: i32) -> Outcome {
    if percentage > threshold {
        Outcome::Match
    } else {
        Outcome::Miss
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub candidate: IpAddr,
    pub target: String,
    pub outcome: Outcome,
    pub percentage: i32,
    pub comparable_length: usize,
    pub distance: usize,
    /// Set when the window was too small to score.
    pub insufficient: bool,
}

impl Assessment {
    /// Scores `probe` against `baseline` over at most `limit` bytes and
    /// classifies the result.
    pub fn evaluate(
        candidate: IpAddr,
        target: &str,
        baseline: &[u8],
        probe: &[u8],
        limit: usize,
        threshold: i32,
    ) -> Self {
        let length = similarity::comparable_length(limit, baseline, probe);
        if length < MIN_COMPARABLE_BYTES {
            return Self::insufficient(candidate, target);
        }

        let scored = similarity::score(baseline, probe, length);
        Assessment {
            candidate,
            target: target.to_string(),
            outcome: classify(scored.percentage, threshold),
            percentage: scored.percentage,
            comparable_length: length,
            distance: scored.distance,
            insufficient: false,
        }
    }

    pub fn insufficient(candidate: IpAddr, target: &str) -> Self {
        Assessment {
            candidate,
            target: target.to_string(),
            outcome: Outcome::Miss,
            percentage: 0,
            comparable_length: 0,
            distance: 0,
            insufficient: true,
        }
    }

    pub fn is_match(&self) -> bool {
        self.outcome == Outcome::Match
    }
}
