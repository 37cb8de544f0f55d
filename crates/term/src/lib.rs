//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: views draw a [`GameSnapshot`] into
//! a framebuffer, and the renderer flushes only the changed spans to the
//! terminal. No widget toolkit is involved.
//!
//! [`GameSnapshot`]: rank_tetris_core::GameSnapshot

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use rank_tetris_core as core;
pub use rank_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Hud, RankRow, Viewport};
pub use renderer::{changed_spans, Span, TerminalRenderer};
