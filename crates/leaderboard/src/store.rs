//! Leaderboard storage
//!
//! Stores are shared between the game thread and the reporter task, so they
//! take `&self` and synchronise internally. A successful `insert` is visible
//! to every later `top` on the same store.

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::protocol::LeaderboardEntry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("leaderboard I/O: {0}")]
    Io(#[from] io::Error),
    #[error("leaderboard data: {0}")]
    Format(#[from] serde_json::Error),
    #[error("leaderboard lock poisoned")]
    Poisoned,
}

pub trait LeaderboardStore: Send + Sync {
    fn insert(&self, name: &str, score: f64) -> Result<LeaderboardEntry, StoreError>;

    /// Best `limit` entries, highest score first; ties keep insertion order.
    fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError>;
}

fn rank(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(a.id.cmp(&b.id))
    });
}

fn next_id(entries: &[LeaderboardEntry]) -> u64 {
    entries.iter().map(|e| e.id).max().map_or(1, |id| id + 1)
}

#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    entries: Mutex<Vec<LeaderboardEntry>>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardStore for MemoryLeaderboard {
    fn insert(&self, name: &str, score: f64) -> Result<LeaderboardEntry, StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        let entry = LeaderboardEntry {
            id: next_id(&entries),
            name: name.to_string(),
            score,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .clone();
        rank(&mut entries);
        entries.truncate(limit);
        Ok(entries)
    }
}

/// Entries kept as a JSON array on disk; every call goes to the file.
#[derive(Debug)]
pub struct JsonFileLeaderboard {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<LeaderboardEntry>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) if json.trim().is_empty() => Ok(Vec::new()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        // Replaced through a temp file and rename.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LeaderboardStore for JsonFileLeaderboard {
    fn insert(&self, name: &str, score: f64) -> Result<LeaderboardEntry, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.read_all()?;
        let entry = LeaderboardEntry {
            id: next_id(&entries),
            name: name.to_string(),
            score,
        };
        entries.push(entry.clone());
        self.write_all(&entries)?;
        Ok(entry)
    }

    fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.read_all()?;
        rank(&mut entries);
        entries.truncate(limit);
        Ok(entries)
    }
}
