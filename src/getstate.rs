/*
Copyright 2022 Volker Schwaberow <volker@schwaberow.de>
Permission is hereby granted, free of charge, to any person obtaining a
copy of this software and associated documentation files (the
"Software"), to deal in the Software without restriction, including without
limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the
Software is furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be
included in all copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR
OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE,
ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
DEALINGS IN THE SOFTWARE.
Author(s): Volker Schwaberow
*/

use crate::assessment::Assessment;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Run counters shared by every worker.
#[derive(Debug, Default)]
pub struct GetState {
    total_candidates: AtomicUsize,
    completed: AtomicUsize,
    matches: AtomicUsize,
    misses: AtomicUsize,
    insufficient: AtomicUsize,
    failed_probes: AtomicUsize,
    baseline_bytes: AtomicU64,
    start_time: Mutex<Option<DateTime<Utc>>>,
    end_time: Mutex<Option<DateTime<Utc>>>,
}

impl GetState {
    pub fn new() -> GetState {
        GetState::default()
    }

    pub fn set_total_candidates(&self, total: usize) {
        self.total_candidates.store(total, Ordering::SeqCst);
    }

    pub fn total_candidates(&self) -> usize {
        self.total_candidates.load(Ordering::SeqCst)
    }

    pub fn set_baseline_bytes(&self, bytes: u64) {
        self.baseline_bytes.store(bytes, Ordering::SeqCst);
    }

    pub fn baseline_bytes(&self) -> u64 {
        self.baseline_bytes.load(Ordering::SeqCst)
    }

    pub fn add_failed_probe(&self) {
        self.failed_probes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failed_probes(&self) -> usize {
        self.failed_probes.load(Ordering::Relaxed)
    }

    /// Tallies a reported assessment and bumps the completion counter.
    pub fn record(&self, assessment: &Assessment) {
        if assessment.is_match() {
            self.matches.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        if assessment.insufficient {
            self.insufficient.fetch_add(1, Ordering::Relaxed);
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn matches(&self) -> usize {
        self.matches.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn insufficient(&self) -> usize {
        self.insufficient.load(Ordering::Relaxed)
    }

    pub fn mark_start(&self) {
        if let Ok(mut start) = self.start_time.lock() {
            *start = Some(Utc::now());
        }
    }

    pub fn mark_end(&self) {
        if let Ok(mut end) = self.end_time.lock() {
            *end = Some(Utc::now());
        }
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time.lock().ok().and_then(|t| *t)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time.lock().ok().and_then(|t| *t)
    }

    pub fn elapsed_ms(&self) -> Option<i64> {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds()),
            _ => None,
        }
    }
}
