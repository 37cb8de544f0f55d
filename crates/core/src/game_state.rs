//! Game state module - the piece controller and lock cycle
//!
//! `GameState` owns the board, the current/next/held pieces, the ghost
//! projection, score, high score and countdown. Every transform goes through
//! [`is_valid_move`]; illegal requests are no-ops that return `false`.
//!
//! A failed downward move is the only landing signal: it locks the piece,
//! clears rows, promotes the next piece and checks for a blocked spawn.
//!
//! Side effects the outside world cares about (sound cues, cleared lines,
//! the final score) are queued as [`GameEvent`]s and drained by the caller.

use std::mem;

use crate::collision::{drop_distance, ghost_of, is_valid_move};
use crate::pieces::{try_rotate, Piece};
use crate::player::PlayerName;
use crate::rng::{PieceSource, Randomizer};
use crate::scoring::clear_completed;
use crate::snapshot::GameSnapshot;
use crate::types::*;
use crate::Board;

/// Something that happened inside the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    LinesCleared { rows: u32, points: u32 },
    /// Queued exactly once per transition into [`Phase::Over`].
    GameOver(ScoreReport),
}

/// Construction options for a game
#[derive(Debug, Clone, Default)]
pub struct GameOptions {
    pub speed: Speed,
    pub randomizer: Randomizer,
    /// Best score known before this session (from a high-score store)
    pub high_score: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    player: PlayerName,
    board: Board,
    current: Option<Piece>,
    next: Option<PieceKind>,
    held: Option<PieceKind>,
    ghost: Option<Piece>,
    can_hold: bool,
    score: u32,
    high_score: u32,
    time_left: u32,
    speed: Speed,
    phase: Phase,
    randomizer: Randomizer,
    /// Increments on every restart.
    game_id: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(player: PlayerName, options: GameOptions) -> Self {
        Self {
            player,
            board: Board::new(),
            current: None,
            next: None,
            held: None,
            ghost: None,
            can_hold: true,
            score: 0,
            high_score: options.high_score,
            time_left: INITIAL_TIME_SECS,
            speed: options.speed,
            phase: Phase::NotStarted,
            randomizer: options.randomizer,
            game_id: 0,
            events: Vec::new(),
        }
    }

    /// Start from a prepared board instead of an empty one.
    ///
    /// Only honoured before the first start; a restart always clears the board.
    pub fn with_board(mut self, board: Board) -> Self {
        if self.phase == Phase::NotStarted {
            self.board = board;
        }
        self
    }

    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn ghost(&self) -> Option<Piece> {
        self.ghost
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.current = self.current;
        out.ghost = self.ghost;
        out.next = self.next;
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.phase = self.phase;
        out.score = self.score;
        out.high_score = self.high_score;
        out.time_left = self.time_left;
        out.speed = self.speed;
        out.game_id = self.game_id;
        out.player.clear();
        out.player.push_str(self.player.as_str());
    }

    /// Begin a game that has not started yet. Returns false otherwise.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }
        self.begin();
        true
    }

    /// Reset board, score, timer, pieces and flags and start again.
    ///
    /// Only a finished game can be restarted; a game that has not started
    /// yet simply starts. Running and paused games refuse. The player, speed
    /// and high score carry over.
    pub fn restart(&mut self) -> bool {
        match self.phase {
            Phase::NotStarted => {}
            Phase::Over => {
                self.board = Board::new();
                self.game_id = self.game_id.wrapping_add(1);
            }
            Phase::Running | Phase::Paused => return false,
        }
        self.held = None;
        self.score = 0;
        self.begin();
        true
    }

    fn begin(&mut self) {
        self.time_left = INITIAL_TIME_SECS;
        self.can_hold = true;
        self.phase = Phase::Running;
        let first = Piece::spawn(self.draw_kind());
        self.next = Some(self.draw_kind());
        self.events.push(GameEvent::Sound(SoundCue::Start));
        self.set_current(first);
        if !is_valid_move(&first, &self.board, 0, 0) {
            self.end_game(GameOverReason::SpawnBlocked);
        }
    }

    /// Choose gravity speed; only before the game starts or after it ends.
    pub fn set_speed(&mut self, speed: Speed) -> bool {
        match self.phase {
            Phase::NotStarted | Phase::Over => {
                self.speed = speed;
                true
            }
            Phase::Running | Phase::Paused => false,
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                true
            }
            Phase::NotStarted | Phase::Over => false,
        }
    }

    /// Move the current piece one cell.
    ///
    /// A blocked `Down` locks the piece instead of being ignored.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let (dx, dy) = direction.offset();
        if is_valid_move(&piece, &self.board, dx, dy) {
            self.set_current(piece.translated(dx, dy));
            if dx != 0 {
                self.events.push(GameEvent::Sound(SoundCue::Move));
            }
            return true;
        }

        if direction == Direction::Down {
            self.lock_piece();
        }
        false
    }

    /// Rotate clockwise, trying the wall-kick nudges in order.
    pub fn rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let board = &self.board;
        match try_rotate(&piece, |candidate, dx, dy| {
            is_valid_move(candidate, board, dx, dy)
        }) {
            Some(rotated) => {
                self.set_current(rotated);
                self.events.push(GameEvent::Sound(SoundCue::Rotate));
                true
            }
            None => false,
        }
    }

    /// Drop the current piece to its landing row and lock it at once.
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let distance = drop_distance(&piece, &self.board);
        self.current = Some(piece.translated(0, distance));
        self.events.push(GameEvent::Sound(SoundCue::Drop));
        self.lock_piece();
        true
    }

    /// Put the current piece aside, once per lock cycle.
    ///
    /// With an empty slot the next piece comes in; otherwise the held piece
    /// swaps in at the spawn anchor. The outgoing piece is stored by kind, so
    /// it comes back in its canonical orientation.
    ///
    /// Policy: a swap whose incoming piece would not fit at the spawn anchor
    /// is refused and changes nothing, so a hold never places a piece over
    /// locked cells.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold || !self.is_running() {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        let (incoming_kind, from_next) = match (self.held, self.next) {
            (Some(held), _) => (held, false),
            (None, Some(next)) => (next, true),
            (None, None) => return false,
        };
        let incoming = Piece::spawn(incoming_kind);
        if !is_valid_move(&incoming, &self.board, 0, 0) {
            return false;
        }

        if from_next {
            self.next = Some(self.draw_kind());
        }
        self.held = Some(current.kind);
        self.can_hold = false;
        self.set_current(incoming);
        self.events.push(GameEvent::Sound(SoundCue::Hold));
        true
    }

    /// One countdown step. Reaching zero ends the game.
    pub fn tick_timer(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end_game(GameOverReason::TimeUp);
        }
        true
    }

    /// Apply a game action. `ToggleMute` is not a rules concern and is
    /// always rejected here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(Direction::Left),
            GameAction::MoveRight => self.move_piece(Direction::Right),
            GameAction::MoveDown => self.move_piece(Direction::Down),
            GameAction::Rotate => self.rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Hold => self.hold(),
            GameAction::Start => self.start(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Restart => self.restart(),
            GameAction::SetSpeed(speed) => self.set_speed(speed),
            GameAction::ToggleMute => false,
        }
    }

    /// Commit the current piece, clear rows, score, and bring in the next piece.
    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.board.commit(&piece);

        let cleared = clear_completed(&self.board);
        let lines = cleared.lines();
        if lines > 0 {
            self.board = cleared.board;
            self.add_score(cleared.points);
            self.events.push(GameEvent::LinesCleared {
                rows: lines as u32,
                points: cleared.points,
            });
            let cue = if lines == 4 {
                SoundCue::ClearTetris
            } else {
                SoundCue::ClearLine
            };
            self.events.push(GameEvent::Sound(cue));
        }

        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.draw_kind(),
        };
        self.next = Some(self.draw_kind());
        self.can_hold = true;

        let spawned = Piece::spawn(kind);
        self.set_current(spawned);
        if !is_valid_move(&spawned, &self.board, 0, 0) {
            self.end_game(GameOverReason::SpawnBlocked);
        }
    }

    fn end_game(&mut self, reason: GameOverReason) {
        if self.phase == Phase::Over {
            return;
        }
        self.phase = Phase::Over;
        self.events.push(GameEvent::Sound(SoundCue::GameOver));
        self.events.push(GameEvent::GameOver(ScoreReport {
            player: self.player.as_str().to_string(),
            score: self.score,
            reason,
        }));
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    fn set_current(&mut self, piece: Piece) {
        self.current = Some(piece);
        self.ghost = Some(ghost_of(&piece, &self.board));
    }

    fn draw_kind(&mut self) -> PieceKind {
        self.randomizer.next_kind()
    }
}
