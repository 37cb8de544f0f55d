//! Engine layer: frame timing, session wiring and persistence seams.
//!
//! `rank-tetris-core` knows the rules but has no clock and no I/O. This crate
//! adds the frame-driven [`TimingController`], the [`GameSession`] that
//! dispatches game events to sound, score reporting and high-score storage,
//! and the environment-driven [`GameConfig`].

pub mod config;
pub mod highscore;
pub mod report;
pub mod session;
pub mod sound;
pub mod timing;

pub use config::{ConfigError, GameConfig, RandomizerKind};
pub use highscore::{FileHighScore, HighScoreError, HighScoreStore, MemoryHighScore};
pub use report::{NoopReporter, RecordingReporter, ScoreReporter};
pub use session::{Frame, GameSession};
pub use sound::{NullSound, SoundLog, SoundSink};
pub use timing::{FrameClock, ManualClock, SystemClock, TickOutcome, TimingController};
