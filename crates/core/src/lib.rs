//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every rule of the game: the board, the piece catalog,
//! the collision predicate, line clearing and scoring, and the piece
//! controller that ties them together. It has **zero dependencies** on
//! terminals, clocks, files or networking, and it never logs.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells, commit and row removal
//! - [`pieces`]: shape catalog, clockwise rotation, wall-kick order
//! - [`collision`]: the single legality predicate plus landing projection
//! - [`scoring`]: completed-row detection, clearing and the score table
//! - [`rng`]: uniform, 7-bag and scripted piece sources
//! - [`game_state`]: current/next/held pieces, lock cycle, countdown, events
//! - [`player`]: validated player name
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Game Rules
//!
//! - **Gravity and input share one path**: a failed downward move locks
//! - **Wall kicks**: (0,0), then one left, one right, one up
//! - **Ghost piece**: always the lowest legal row of the current piece
//! - **Hold**: once per lock cycle, held piece returns in canonical shape
//! - **Scoring**: 0/100/300/500/800 for 0..=4 rows in one lock
//! - **Countdown**: 120 seconds; reaching zero ends the game
//!
//! # Example
//!
//! ```
//! use rank_tetris_core::{Board, GameOptions, GameState, PlayerName, Randomizer};
//! use rank_tetris_core::types::{GameAction, PieceKind};
//!
//! let board = Board::from_ascii(&["IIII..IIII"]).unwrap();
//! let options = GameOptions {
//!     randomizer: Randomizer::sequence(vec![PieceKind::O]),
//!     ..GameOptions::default()
//! };
//! let mut game = GameState::new(PlayerName::parse("ana").unwrap(), options).with_board(board);
//! game.start();
//!
//! game.apply_action(GameAction::HardDrop);
//! assert_eq!(game.score(), 100);
//! ```
//!
//! # Timing
//!
//! The core has no clock. Callers decide when a countdown step or a gravity
//! step is due and call [`GameState::tick_timer`] or
//! [`GameState::move_piece`] with `Direction::Down`.

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod player;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use rank_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardParseError, RowSet};
pub use collision::{drop_distance, ghost_of, is_valid_move};
pub use game_state::{GameEvent, GameOptions, GameState};
pub use pieces::{canonical_shape, try_rotate, Piece, ShapeGrid, WALL_KICKS};
pub use player::{NameError, PlayerName};
pub use rng::{BagSource, PieceSource, Randomizer, SequenceSource, SimpleRng, UniformSource};
pub use scoring::{clear_completed, clear_rows, line_clear_score, ClearResult};
pub use snapshot::GameSnapshot;
