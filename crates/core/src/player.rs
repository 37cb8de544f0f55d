//! Player identity
//!
//! A game cannot be created without a resolved player name; the name is what
//! ends up on the leaderboard.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("player name must not be empty")]
    Empty,
}

/// Non-empty, trimmed player name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    /// ```
    /// use rank_tetris_core::PlayerName;
    ///
    /// assert_eq!(PlayerName::parse("  ana ").unwrap().as_str(), "ana");
    /// assert!(PlayerName::parse("   ").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PlayerName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
