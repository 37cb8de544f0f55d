//! Core types module - shared data structures and constants
//!
//! Everything in here is plain data with no external dependencies, so the
//! rule engine, the session/timing layer, the leaderboard collaborator and the
//! terminal front-end can all agree on one vocabulary.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Spawn anchor**: (4, 0), the top-left of the piece's shape grid
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_TIME_SECS` | 120 | Countdown length of one game |
//! | `TIMER_TICK_MS` | 1000 | Real time per countdown step |
//! | `BASE_FALL_MS` | 500 | Gravity interval at speed 1 |
//!
//! The automatic fall interval is `BASE_FALL_MS / speed`.
//!
//! # Examples
//!
//! ```
//! use rank_tetris_types::{PieceKind, Speed, BOARD_COLS, BOARD_ROWS};
//! use std::time::Duration;
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Speed::new(5).unwrap().fall_interval(), Duration::from_millis(100));
//! assert_eq!((BOARD_COLS, BOARD_ROWS), (10, 20));
//! ```

use std::fmt;
use std::time::Duration;

/// Board width in cells (10 columns)
pub const BOARD_COLS: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_ROWS: u8 = 20;

/// Column of the spawn anchor (`COLS / 2 - 1`)
pub const SPAWN_X: i8 = (BOARD_COLS / 2) as i8 - 1;

/// Row of the spawn anchor
pub const SPAWN_Y: i8 = 0;

/// Seconds on the countdown when a game starts (2 minutes)
pub const INITIAL_TIME_SECS: u32 = 120;

/// Real time that must elapse between two countdown steps
pub const TIMER_TICK_MS: u64 = 1000;

/// Gravity interval at speed 1; divided by the speed level
pub const BASE_FALL_MS: u64 = 500;

/// Points for clearing N rows in a single lock (index = rows cleared)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Number of entries returned by a leaderboard query
pub const LEADERBOARD_LIMIT: usize = 10;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use rank_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Display colour of the kind.
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
            PieceKind::O => Color::Yellow,
            PieceKind::S => Color::Green,
            PieceKind::T => Color::Purple,
            PieceKind::Z => Color::Red,
        }
    }
}

/// Colour tag carried by every piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(kind)`: filled by a fragment of a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Unit translation requested by the player or by gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// `(dx, dy)` offset of one step in this direction.
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Automatic-fall speed level, 1 (slowest) to 5 (fastest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Speed = Speed(1);
    pub const MAX: Speed = Speed(5);

    /// Returns `None` outside 1..=5.
    pub fn new(level: u8) -> Option<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&level) {
            Some(Self(level))
        } else {
            None
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Gravity interval: `BASE_FALL_MS / level`.
    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(BASE_FALL_MS) / u32::from(self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(2)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of one game
///
/// `NotStarted -> Running <-> Paused`, `Running -> Over`, `Over -> Running` (restart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    Over,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "notStarted",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Over => "over",
        }
    }
}

/// Game actions that can be applied to a game
///
/// Produced by keyboard input; gravity drives the same `MoveDown` path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    MoveDown,
    /// Rotate piece 90° clockwise with wall kicks
    Rotate,
    /// Drop to the lowest legal row and lock
    HardDrop,
    /// Exchange the current piece with the held slot
    Hold,
    /// Start a game that has not started yet
    Start,
    /// Toggle between running and paused
    TogglePause,
    /// Toggle sound cues
    ToggleMute,
    /// Reset everything and start a fresh game
    Restart,
    /// Choose the gravity speed before the game starts
    SetSpeed(Speed),
}

impl GameAction {
    /// Parse action from its camelCase name.
    ///
    /// ```
    /// use rank_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("fly"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "start" => Some(GameAction::Start),
            "togglepause" | "pause" => Some(GameAction::TogglePause),
            "togglemute" | "mute" => Some(GameAction::ToggleMute),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::Start => "start",
            GameAction::TogglePause => "togglePause",
            GameAction::ToggleMute => "toggleMute",
            GameAction::Restart => "restart",
            GameAction::SetSpeed(_) => "setSpeed",
        }
    }
}

/// Named sound cue emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Move,
    Rotate,
    Drop,
    ClearLine,
    ClearTetris,
    GameOver,
    Hold,
    Start,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Move => "move",
            SoundCue::Rotate => "rotate",
            SoundCue::Drop => "drop",
            SoundCue::ClearLine => "clearLine",
            SoundCue::ClearTetris => "clearTetris",
            SoundCue::GameOver => "gameOver",
            SoundCue::Hold => "hold",
            SoundCue::Start => "start",
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    /// The countdown reached zero
    TimeUp,
    /// The replacement piece could not be placed at the spawn anchor
    SpawnBlocked,
}

/// Final result of one game, handed to the leaderboard collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub player: String,
    pub score: u32,
    pub reason: GameOverReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_anchor_is_left_of_centre() {
        assert_eq!(SPAWN_X, 4);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn test_fall_interval_scales_with_speed() {
        assert_eq!(Speed::new(1).unwrap().fall_interval(), Duration::from_millis(500));
        assert_eq!(Speed::new(2).unwrap().fall_interval(), Duration::from_millis(250));
        assert_eq!(Speed::new(4).unwrap().fall_interval(), Duration::from_millis(125));
        assert_eq!(Speed::default().level(), 2);
    }

    #[test]
    fn test_speed_rejects_out_of_range_levels() {
        assert!(Speed::new(0).is_none());
        assert!(Speed::new(6).is_none());
        assert_eq!(Speed::new(5), Some(Speed::MAX));
    }

    #[test]
    fn test_piece_kind_char_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('.'), None);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::Left.offset(), (-1, 0));
        assert_eq!(Direction::Right.offset(), (1, 0));
        assert_eq!(Direction::Down.offset(), (0, 1));
    }
}
