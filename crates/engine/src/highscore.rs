//! High-score persistence
//!
//! The session seeds its high score from a store when it is built and writes
//! the (possibly improved) value back on every game over.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::data_dir;

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file I/O: {0}")]
    Io(#[from] io::Error),
    #[error("high score file format: {0}")]
    Format(#[from] serde_json::Error),
}

pub trait HighScoreStore {
    /// Best score on record, 0 when nothing is stored or it cannot be read.
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> Result<(), HighScoreError>;
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    best: u32,
}

impl MemoryHighScore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        self.best = self.best.max(score);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/rank-tetris/highscore.json`
    pub fn default_path() -> PathBuf {
        data_dir().join("highscore.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<u32, HighScoreError> {
        let json = fs::read_to_string(&self.path)?;
        let file: HighScoreFile = serde_json::from_str(&json)?;
        Ok(file.high_score)
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> u32 {
        match self.read() {
            Ok(score) => score,
            Err(err) => {
                debug!("no high score loaded from {}: {err}", self.path.display());
                0
            }
        }
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        let best = self.load().max(score);
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&HighScoreFile { high_score: best })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_keeps_the_best() {
        let mut store = MemoryHighScore::new(300);
        store.save(100).unwrap();
        assert_eq!(store.load(), 300);
        store.save(800).unwrap();
        assert_eq!(store.load(), 800);
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileHighScore::new(dir.path().join("none.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("highscore.json");

        let mut store = FileHighScore::new(&path);
        store.save(500).unwrap();
        store.save(200).unwrap();

        let reopened = FileHighScore::new(&path);
        assert_eq!(reopened.load(), 500);
    }

    #[test]
    fn test_corrupt_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscore.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileHighScore::new(&path).load(), 0);
    }
}
