//! Leaderboard reporter runtime.
//!
//! Bridges the sync game loop with async score submission: the game hands a
//! report to an unbounded channel and returns at once, a task on the
//! reporter's own tokio runtime posts it to the store and logs the outcome.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};

use rank_tetris_engine::ScoreReporter;

use crate::protocol::{parse_entries, LeaderboardEntry, ScoreSubmission};
use crate::service::{body_text, query, submit};
use crate::store::LeaderboardStore;
use crate::types::ScoreReport;

enum Message {
    Submit(ScoreReport),
    /// Acknowledged once every earlier submission has been handled.
    Flush(oneshot::Sender<()>),
}

/// Running reporter instance.
pub struct LeaderboardReporter {
    rt: Runtime,
    tx: mpsc::UnboundedSender<Message>,
    store: Arc<dyn LeaderboardStore>,
}

impl LeaderboardReporter {
    pub fn start(store: Arc<dyn LeaderboardStore>) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let (tx, rx) = mpsc::unbounded_channel::<Message>();
        rt.spawn(run_reporter(store.clone(), rx));
        Ok(Self { rt, tx, store })
    }

    /// Wait until every report sent so far has reached the store.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Message::Flush(ack_tx)).is_err() {
            return;
        }
        let _ = self.rt.block_on(ack_rx);
    }

    /// Top entries, best first, after pending reports are flushed.
    ///
    /// Failures and malformed replies come back as an empty list.
    pub fn fetch_top(&self) -> Vec<LeaderboardEntry> {
        self.flush();
        let response = self.rt.block_on(query(self.store.clone()));
        if !response.is_success() {
            warn!(
                "leaderboard query failed ({}): {}",
                response.status,
                response.error_message().unwrap_or("unknown error")
            );
            return Vec::new();
        }
        parse_entries(&body_text(&response))
    }
}

impl ScoreReporter for LeaderboardReporter {
    fn report(&self, report: ScoreReport) {
        if self.tx.send(Message::Submit(report)).is_err() {
            warn!("leaderboard reporter is gone; score dropped");
        }
    }
}

async fn run_reporter(store: Arc<dyn LeaderboardStore>, mut rx: mpsc::UnboundedReceiver<Message>) {
    while let Some(message) = rx.recv().await {
        match message {
            Message::Submit(report) => {
                let body = match serde_json::to_string(&ScoreSubmission::from(&report)) {
                    Ok(body) => body,
                    Err(err) => {
                        warn!("could not encode score for {}: {err}", report.player);
                        continue;
                    }
                };
                let response = submit(store.clone(), body).await;
                if response.is_success() {
                    info!("reported {} for {}", report.score, report.player);
                } else {
                    warn!(
                        "score report for {} failed ({}): {}",
                        report.player,
                        response.status,
                        response.error_message().unwrap_or("unknown error")
                    );
                }
            }
            Message::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileLeaderboard, MemoryLeaderboard};
    use crate::types::GameOverReason;

    fn report(player: &str, score: u32) -> ScoreReport {
        ScoreReport {
            player: player.to_string(),
            score,
            reason: GameOverReason::TimeUp,
        }
    }

    #[test]
    fn test_reports_reach_the_store() {
        let store = Arc::new(MemoryLeaderboard::new());
        let reporter = LeaderboardReporter::start(store.clone()).unwrap();

        reporter.report(report("ana", 300));
        reporter.report(report("bo", 800));

        let top = reporter.fetch_top();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "bo");
        assert_eq!(top[1].score, 300.0);
        assert_eq!(store.top(10).unwrap().len(), 2);
    }

    #[test]
    fn test_empty_name_is_logged_not_stored() {
        let store = Arc::new(MemoryLeaderboard::new());
        let reporter = LeaderboardReporter::start(store.clone()).unwrap();
        reporter.report(report("", 100));
        reporter.flush();
        assert!(store.top(10).unwrap().is_empty());
    }

    #[test]
    fn test_broken_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        std::fs::write(&path, "[oops").unwrap();

        let reporter = LeaderboardReporter::start(Arc::new(JsonFileLeaderboard::new(&path))).unwrap();
        reporter.report(report("ana", 100));
        assert!(reporter.fetch_top().is_empty());
    }
}
