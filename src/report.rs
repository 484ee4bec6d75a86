// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::assessment::Assessment;
use crate::config::OutputFormat;
use crate::getstate::GetState;
use colored::*;
use log::info;
use std::io::{Result, Write};
use std::sync::Mutex;

/// Writes one result record per candidate. Lines from concurrent workers
/// never interleave.
pub struct Reporter<W: Write + Send> {
    out: Mutex<W>,
    format: OutputFormat,
    show_samples: bool,
}

impl<W: Write + Send> Reporter<W> {
    pub fn new(out: W, format: OutputFormat, show_samples: bool) -> Self {
        Self {
            out: Mutex::new(out),
            format,
            show_samples,
        }
    }

    pub fn format_line(assessment: &Assessment) -> String {
        format!(
            "{} {} {} {} percent in {} bytes",
            assessment.outcome,
            assessment.candidate,
            assessment.target,
            assessment.percentage,
            assessment.comparable_length
        )
    }

    pub fn format_json(assessment: &Assessment) -> String {
        serde_json::to_string(assessment).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }

    /// Narrates the assessment on the diagnostic stream and writes the
    /// result record.
    pub fn report(&self, assessment: &Assessment, baseline: &[u8], probe: &[u8]) -> Result<()> {
        if assessment.insufficient {
            info!(
                "{}=={} Not enough bytes to be meaningful. baseline: {} bytes, probe: {} bytes",
                assessment.candidate,
                assessment.target,
                baseline.len(),
                probe.len()
            );
        } else {
            info!(
                "{}=={} Similarity in first {} bytes computed as: {}% @ distance: {}",
                assessment.candidate,
                assessment.target,
                assessment.comparable_length,
                assessment.percentage,
                assessment.distance
            );
            if self.show_samples {
                let length = assessment.comparable_length;
                info!("Baseline sample:\n{}", String::from_utf8_lossy(&baseline[..length.min(baseline.len())]));
                info!("Probe sample:\n{}", String::from_utf8_lossy(&probe[..length.min(probe.len())]));
            }
        }

        let record = match self.format {
            OutputFormat::Text => Self::format_line(assessment),
            OutputFormat::Json => Self::format_json(assessment),
        };

        // A record is one short line, so the blocking write is held only
        // briefly. Writing and flushing under the lock keeps lines from
        // different workers whole.
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        writeln!(out, "{}", record)?;
        out.flush()
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// End-of-run summary for the diagnostic stream.
pub fn summary(state: &GetState, target: &str, colorize: bool) -> String {
    let matches = format!("{} matched", state.matches());
    let matches = if colorize && state.matches() > 0 {
        matches.bright_green().bold().to_string()
    } else {
        matches
    };

    let mut line = format!(
        "{} candidates checked against {} ({} baseline bytes): {}, {} missed ({} without enough data), {} probes failed.",
        state.completed(),
        target,
        state.baseline_bytes(),
        matches,
        state.misses(),
        state.insufficient(),
        state.failed_probes()
    );
    if let (Some(start), Some(end), Some(ms)) = (state.start_time(), state.end_time(), state.elapsed_ms()) {
        line.push_str(&format!(
            " Started at {} / Ended at {}. {} ms.",
            start.format("%Y-%m-%d %H:%M:%S"),
            end.format("%Y-%m-%d %H:%M:%S"),
            ms
        ));
    }
    line
}
