//! Leaderboard collaborator
//!
//! Finished games report `{name, score}`; the leaderboard keeps every
//! submission and answers queries with the best ten.
//!
//! # Layout
//!
//! - [`protocol`]: request/response JSON shapes and validation
//! - [`store`]: storage trait with in-memory and JSON-file stores
//! - [`service`]: `POST`/`GET` handlers turning store results into responses
//! - [`reporter`]: fire-and-forget [`ScoreReporter`](rank_tetris_engine::ScoreReporter)
//!   running on its own tokio runtime
//!
//! # Failure policy
//!
//! Nothing here can fail a game. Submission errors are logged inside the
//! reporter task; a broken or malformed leaderboard reads as empty.

pub mod protocol;
pub mod reporter;
pub mod service;
pub mod store;

pub use rank_tetris_types as types;

pub use protocol::{parse_entries, parse_submission, LeaderboardEntry, ProtocolError, Response, ScoreSubmission};
pub use reporter::LeaderboardReporter;
pub use service::{handle_get, handle_post};
pub use store::{JsonFileLeaderboard, LeaderboardStore, MemoryLeaderboard, StoreError};
