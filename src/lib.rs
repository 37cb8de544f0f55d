//! Rank Tetris (workspace facade crate).
//!
//! Re-exports the member crates as `rank_tetris::{core, engine, input,
//! leaderboard, term, types}`; the implementation lives under `crates/`.

pub use rank_tetris_core as core;
pub use rank_tetris_engine as engine;
pub use rank_tetris_input as input;
pub use rank_tetris_leaderboard as leaderboard;
pub use rank_tetris_term as term;
pub use rank_tetris_types as types;
