//! Frame-driven timing: countdown steps and gravity
//!
//! The controller is fed one timestamp per frame and decides whether a
//! countdown step and/or a gravity step is due. Frames arrive as fast as the
//! front-end can deliver them, so both intervals are measured against frame
//! timestamps, never against a fixed rate.
//!
//! Anchors are taken on the first running frame of a game and again after
//! every pause or restart; time spent paused or over never counts.

use std::cell::Cell;
use std::time::{Duration, Instant};

use rank_tetris_core::GameState;
use rank_tetris_types::{Direction, TIMER_TICK_MS};

/// Source of frame timestamps
pub trait FrameClock {
    fn now(&self) -> Instant;
}

/// Real monotonic clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl FrameClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Synthetic clock advanced by hand
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    elapsed: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) -> Instant {
        self.elapsed.set(self.elapsed.get() + by);
        self.now()
    }

    pub fn advance_ms(&self, ms: u64) -> Instant {
        self.advance(Duration::from_millis(ms))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed.get()
    }
}

/// What one frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub timer_ticked: bool,
    pub fell: bool,
}

#[derive(Debug, Clone, Copy)]
struct Anchors {
    game_id: u32,
    last_timer: Instant,
    last_fall: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct TimingController {
    anchors: Option<Anchors>,
}

impl TimingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one frame at `now`.
    pub fn advance(&mut self, now: Instant, state: &mut GameState) -> TickOutcome {
        if !state.is_running() {
            self.anchors = None;
            return TickOutcome::default();
        }

        let anchors = match self.anchors {
            Some(a) if a.game_id == state.game_id() => a,
            _ => {
                self.anchors = Some(Anchors {
                    game_id: state.game_id(),
                    last_timer: now,
                    last_fall: now,
                });
                return TickOutcome::default();
            }
        };
        let mut next = anchors;
        let mut outcome = TickOutcome::default();

        if now.saturating_duration_since(anchors.last_timer)
            >= Duration::from_millis(TIMER_TICK_MS)
        {
            outcome.timer_ticked = state.tick_timer();
            next.last_timer = now;
        }

        if state.is_running()
            && state.current().is_some()
            && now.saturating_duration_since(anchors.last_fall) >= state.speed().fall_interval()
        {
            state.move_piece(Direction::Down);
            outcome.fell = true;
            next.last_fall = now;
        }

        self.anchors = Some(next);
        outcome
    }

    /// Drop the anchors so the next running frame re-takes them.
    pub fn reset(&mut self) {
        self.anchors = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rank_tetris_core::{GameOptions, PlayerName, Randomizer};
    use rank_tetris_types::{PieceKind, INITIAL_TIME_SECS};

    fn running_game() -> GameState {
        let options = GameOptions {
            randomizer: Randomizer::sequence(vec![PieceKind::T]),
            ..GameOptions::default()
        };
        let mut state = GameState::new(PlayerName::parse("p").unwrap(), options);
        state.start();
        state
    }

    #[test]
    fn test_first_frame_only_anchors() {
        let clock = ManualClock::new();
        let mut timing = TimingController::new();
        let mut state = running_game();

        let out = timing.advance(clock.advance_ms(5_000), &mut state);
        assert_eq!(out, TickOutcome::default());
        assert_eq!(state.time_left(), INITIAL_TIME_SECS);
    }

    #[test]
    fn test_gravity_follows_speed() {
        let clock = ManualClock::new();
        let mut timing = TimingController::new();
        let mut state = running_game();
        timing.advance(clock.now(), &mut state);

        // Default speed 2 -> 250ms
        let out = timing.advance(clock.advance_ms(249), &mut state);
        assert!(!out.fell);
        let out = timing.advance(clock.advance_ms(1), &mut state);
        assert!(out.fell);
        assert_eq!(state.current().unwrap().y, 1);
    }

    #[test]
    fn test_timer_steps_once_per_second() {
        let clock = ManualClock::new();
        let mut timing = TimingController::new();
        let mut state = running_game();
        timing.advance(clock.now(), &mut state);

        let out = timing.advance(clock.advance_ms(1_000), &mut state);
        assert!(out.timer_ticked);
        assert_eq!(state.time_left(), INITIAL_TIME_SECS - 1);

        let out = timing.advance(clock.advance_ms(999), &mut state);
        assert!(!out.timer_ticked);
        assert_eq!(state.time_left(), INITIAL_TIME_SECS - 1);
    }

    #[test]
    fn test_paused_time_does_not_count() {
        let clock = ManualClock::new();
        let mut timing = TimingController::new();
        let mut state = running_game();
        timing.advance(clock.now(), &mut state);

        state.toggle_pause();
        for _ in 0..10 {
            timing.advance(clock.advance_ms(1_000), &mut state);
        }
        assert_eq!(state.time_left(), INITIAL_TIME_SECS);

        state.toggle_pause();
        timing.advance(clock.advance_ms(16), &mut state);
        let out = timing.advance(clock.advance_ms(500), &mut state);
        assert!(!out.timer_ticked);
        assert_eq!(state.time_left(), INITIAL_TIME_SECS);
    }
}
