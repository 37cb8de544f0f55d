//! Score reporting seam
//!
//! The session hands each final score to a [`ScoreReporter`] and moves on.
//! Implementations must not block the caller; delivery failures stay inside
//! the reporter.

use std::sync::{Arc, Mutex};

use rank_tetris_types::ScoreReport;

pub trait ScoreReporter {
    fn report(&self, report: ScoreReport);
}

impl<T: ScoreReporter + ?Sized> ScoreReporter for Arc<T> {
    fn report(&self, report: ScoreReport) {
        (**self).report(report);
    }
}

/// Drops every report (leaderboard disabled)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ScoreReporter for NoopReporter {
    fn report(&self, _report: ScoreReport) {}
}

/// Keeps reports in memory; clones share one list.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    reports: Arc<Mutex<Vec<ScoreReport>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<ScoreReport> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl ScoreReporter for RecordingReporter {
    fn report(&self, report: ScoreReport) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(report);
        }
    }
}
