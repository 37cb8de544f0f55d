//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`], taking the game
//! phase into account.

pub mod map;

pub use rank_tetris_types as types;

pub use map::{map_key, should_quit};
