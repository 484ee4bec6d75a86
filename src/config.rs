// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::time::Duration;

pub const DEFAULT_TARGET: &str = "https://example.org";
pub const DEFAULT_MATCH_BYTES: usize = 500;
pub const DEFAULT_THRESHOLD: i32 = 50;
pub const DEFAULT_WORKERS: usize = 200;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Run-wide settings. Built once in `main`, then shared behind an `Arc`
/// by the baseline fetch, every probe and the reporter.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    target: String,
    user_agent: String,
    timeout: Duration,
    match_bytes: usize,
    threshold: i32,
    workers: usize,
    show_samples: bool,
    output_format: OutputFormat,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            user_agent: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            match_bytes: DEFAULT_MATCH_BYTES,
            threshold: DEFAULT_THRESHOLD,
            workers: DEFAULT_WORKERS,
            show_samples: false,
            output_format: OutputFormat::Text,
        }
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = target.into();
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_match_bytes(&mut self, match_bytes: usize) {
        self.match_bytes = match_bytes;
    }

    /// Upper bound on how many body bytes are read and compared.
    pub fn match_bytes(&self) -> usize {
        self.match_bytes
    }

    pub fn set_threshold(&mut self, threshold: i32) {
        self.threshold = threshold;
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Zero is bumped to one; a pool without workers would never drain.
    pub fn set_workers(&mut self, workers: usize) {
        self.workers = workers.max(1);
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn set_show_samples(&mut self, show_samples: bool) {
        self.show_samples = show_samples;
    }

    pub fn show_samples(&self) -> bool {
        self.show_samples
    }

    pub fn set_output_format(&mut self, output_format: OutputFormat) {
        self.output_format = output_format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}
