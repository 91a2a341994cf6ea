//! Search instrumentation: wall-clock timing and per-move reports

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::board::{Move, Player};
use crate::eval::Outcome;

/// Accumulating wall-clock timer
#[derive(Clone, Copy, Debug, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
    total: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_new() -> Self {
        let mut watch = Self::new();
        watch.start();
        watch
    }

    /// No-op while already running
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    /// Stop and return the total over all runs
    pub fn stop(&mut self) -> Duration {
        if let Some(started) = self.started.take() {
            self.total += started.elapsed();
        }
        self.total
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) => self.total + started.elapsed(),
            None => self.total,
        }
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} sec", self.elapsed().as_secs_f64())
    }
}

/// Result of one root search
#[derive(Clone, Debug, Serialize)]
pub struct SearchReport {
    /// Side the search chose a move for
    pub player: Player,
    pub outcome: Outcome,
    pub best_move: Option<Move>,
    /// Nodes visited since the previous report
    pub nodes: u64,
    pub elapsed: Duration,
    pub cache_entries: usize,
}

impl SearchReport {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }
}
