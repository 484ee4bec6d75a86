// File: dispatcher.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::assessment::Assessment;
use crate::config::ProbeConfig;
use crate::getstate::GetState;
use crate::http::{self, Baseline};
use crate::input;
use crate::report::Reporter;
use log::{debug, error, info, warn};
use std::io::Write;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// Fans candidate probes out over a fixed pool of workers.
pub struct Dispatcher<W: Write + Send + 'static> {
    config: Arc<ProbeConfig>,
    reporter: Arc<Reporter<W>>,
    state: Arc<GetState>,
}

impl<W: Write + Send + 'static> Dispatcher<W> {
    pub fn new(config: Arc<ProbeConfig>, reporter: Arc<Reporter<W>>, state: Arc<GetState>) -> Self {
        Self {
            config,
            reporter,
            state,
        }
    }

    pub fn state(&self) -> Arc<GetState> {
        Arc::clone(&self.state)
    }

    /// Probes every entry of `entries` that parses as an address and returns
    /// once all of them have been reported. Unparsable entries are dropped
    /// without a trace.
    pub async fn run<S: AsRef<str>>(&self, baseline: Arc<Baseline>, entries: &[S]) -> Vec<Assessment> {
        let candidates = input::parse_candidates(entries);
        let total = candidates.len();
        self.state.set_total_candidates(total);

        // mpsc rejects a zero capacity; an empty run still gets one slot.
        let (tx, rx) = mpsc::channel::<IpAddr>(total.max(1));
        let rx = Arc::new(Mutex::new(rx));
        let results = Arc::new(Mutex::new(Vec::with_capacity(total)));

        let mut workers = JoinSet::new();
        for id in 1..=self.config.workers() {
            let rx = Arc::clone(&rx);
            let results = Arc::clone(&results);
            let config = Arc::clone(&self.config);
            let reporter = Arc::clone(&self.reporter);
            let state = Arc::clone(&self.state);
            let baseline = Arc::clone(&baseline);

            workers.spawn(async move {
                loop {
                    let next = { rx.lock().await.recv().await };
                    let Some(candidate) = next else { break };

                    let assessment = assess(id, &config, &baseline, candidate, &reporter, &state).await;
                    results.lock().await.push(assessment);
                }
                debug!("[T@{}] queue drained, exiting", id);
            });
        }

        for candidate in candidates {
            if tx.send(candidate).await.is_err() {
                error!("All workers exited before {} was queued", candidate);
                break;
            }
        }
        drop(tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                error!("Worker task failed: {}", e);
            }
        }

        let completed = self.state.completed();
        if completed == total {
            debug!("{} of {} candidates completed", completed, total);
        } else {
            warn!("Only {} of {} candidates completed", completed, total);
        }

        let mut guard = results.lock().await;
        std::mem::take(&mut *guard)
    }
}

/// Scores on the blocking pool. Levenshtein over a large window is
/// quadratic and must not stall the runtime threads the workers share.
/// The response body is handed back for the reporter.
pub async fn evaluate_blocking(
    candidate: IpAddr,
    target: String,
    baseline: Arc<Baseline>,
    response: Vec<u8>,
    limit: usize,
    threshold: i32,
) -> (Assessment, Vec<u8>) {
    let fallback_target = target.clone();
    let scored = tokio::task::spawn_blocking(move || {
        let assessment = Assessment::evaluate(candidate, &target, baseline.body(), &response, limit, threshold);
        (assessment, response)
    })
    .await;

    match scored {
        Ok(scored) => scored,
        Err(e) => {
            error!("Scoring {} failed: {}", candidate, e);
            (Assessment::insufficient(candidate, &fallback_target), Vec::new())
        }
    }
}

async fn assess<W: Write + Send>(
    id: usize,
    config: &ProbeConfig,
    baseline: &Arc<Baseline>,
    candidate: IpAddr,
    reporter: &Reporter<W>,
    state: &GetState,
) -> Assessment {
    info!("[T@{}] Is {} hosted on {}?", id, config.target(), candidate);

    let response = match http::probe(config, candidate).await {
        Ok(body) => body,
        Err(_) => {
            state.add_failed_probe();
            Vec::new()
        }
    };

    let (assessment, response) = evaluate_blocking(
        candidate,
        config.target().to_string(),
        Arc::clone(baseline),
        response,
        config.match_bytes(),
        config.threshold(),
    )
    .await;

    if let Err(e) = reporter.report(&assessment, baseline.body(), &response) {
        error!("Failed to write result for {}: {}", candidate, e);
    }
    state.record(&assessment);
    assessment
}
