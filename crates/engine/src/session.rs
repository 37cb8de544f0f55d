//! Game session - one player's run of games
//!
//! A session owns the rule state and wires it to the outside world: frame
//! timestamps drive the [`TimingController`], drained [`GameEvent`]s are
//! dispatched to the sound sink, the score reporter and the high-score store.
//! Nothing here blocks on a collaborator.

use std::time::Instant;

use log::{debug, info, warn};

use rank_tetris_core::{GameEvent, GameOptions, GameSnapshot, GameState, PlayerName};
use rank_tetris_types::GameAction;

use crate::highscore::HighScoreStore;
use crate::report::{NoopReporter, ScoreReporter};
use crate::sound::{NullSound, SoundSink};
use crate::timing::{TickOutcome, TimingController};

/// Whether the frame loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Continue,
    Cancelled,
}

pub struct GameSession {
    state: GameState,
    timing: TimingController,
    sound: Box<dyn SoundSink>,
    reporter: Box<dyn ScoreReporter>,
    high_scores: Box<dyn HighScoreStore>,
    muted: bool,
    cancelled: bool,
}

impl GameSession {
    /// New session for `player`. The stored high score wins over the one in
    /// `options` if it is larger.
    pub fn new(
        player: PlayerName,
        mut options: GameOptions,
        high_scores: Box<dyn HighScoreStore>,
    ) -> Self {
        options.high_score = options.high_score.max(high_scores.load());
        info!(
            "session for {player} (speed {}, high score {})",
            options.speed, options.high_score
        );
        Self {
            state: GameState::new(player, options),
            timing: TimingController::new(),
            sound: Box::new(NullSound),
            reporter: Box::new(NoopReporter),
            high_scores,
            muted: false,
            cancelled: false,
        }
    }

    pub fn with_sound(mut self, sound: Box<dyn SoundSink>) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_reporter(mut self, reporter: Box<dyn ScoreReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for tests and fixtures.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Apply one input action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.cancelled {
            return false;
        }
        let changed = match action {
            GameAction::ToggleMute => {
                self.muted = !self.muted;
                info!("sound {}", if self.muted { "muted" } else { "on" });
                true
            }
            GameAction::Restart => {
                let restarted = self.state.apply_action(action);
                if restarted {
                    self.timing.reset();
                    info!("restart");
                }
                restarted
            }
            other => self.state.apply_action(other),
        };
        self.dispatch_events();
        changed
    }

    /// Advance timers for the frame delivered at `now`.
    pub fn on_frame(&mut self, now: Instant) -> Frame {
        if self.cancelled {
            return Frame::Cancelled;
        }
        let TickOutcome { timer_ticked, .. } = self.timing.advance(now, &mut self.state);
        if timer_ticked && self.state.time_left() % 30 == 0 {
            debug!("{}s left", self.state.time_left());
        }
        self.dispatch_events();
        Frame::Continue
    }

    /// Tear the loop down. Later frames and actions are ignored.
    pub fn cancel(&mut self) {
        if !self.cancelled {
            debug!("session cancelled");
        }
        self.cancelled = true;
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(cue) => {
                    if !self.muted {
                        debug!("cue {}", cue.as_str());
                        self.sound.play(cue);
                    }
                }
                GameEvent::LinesCleared { rows, points } => {
                    debug!("cleared {rows} rows for {points}");
                }
                GameEvent::GameOver(report) => {
                    info!(
                        "game over ({:?}): {} scored {}",
                        report.reason, report.player, report.score
                    );
                    if let Err(err) = self.high_scores.save(self.state.high_score()) {
                        warn!("could not save high score: {err}");
                    }
                    self.reporter.report(report);
                }
            }
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.cancel();
    }
}
