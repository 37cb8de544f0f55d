//! Environment-driven configuration
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TETRIS_PLAYER` | player name, skips the prompt | prompt |
//! | `TETRIS_SPEED` | gravity speed 1-5 | 2 |
//! | `TETRIS_SEED` | piece RNG seed | derived from the clock |
//! | `TETRIS_RANDOMIZER` | `uniform` or `bag` | `uniform` |
//! | `TETRIS_MUTED` | start with sound cues off | off |
//! | `TETRIS_HIGHSCORE_PATH` | high-score JSON file | `<config>/rank-tetris/highscore.json` |
//! | `TETRIS_LEADERBOARD_PATH` | leaderboard JSON file | `<config>/rank-tetris/leaderboard.json` |
//! | `TETRIS_LEADERBOARD_DISABLED` | skip score reporting | off |
//! | `TETRIS_LOG_PATH` | log file | `rank-tetris.log` |
//!
//! Malformed values never abort startup; they fall back to the default and
//! are logged.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::warn;
use thiserror::Error;

use rank_tetris_core::{GameOptions, Randomizer};
use rank_tetris_types::Speed;

const APP_DIR: &str = "rank-tetris";
const DEFAULT_LOG_PATH: &str = "rank-tetris.log";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid speed {0:?}, expected 1-5")]
    Speed(String),
    #[error("invalid seed {0:?}")]
    Seed(String),
    #[error("unknown randomizer {0:?}, expected uniform or bag")]
    Randomizer(String),
}

/// Which piece source a configured game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomizerKind {
    #[default]
    Uniform,
    Bag,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub player: Option<String>,
    pub speed: Speed,
    pub seed: u32,
    pub randomizer: RandomizerKind,
    pub muted: bool,
    pub highscore_path: PathBuf,
    pub leaderboard_path: PathBuf,
    pub leaderboard_enabled: bool,
    pub log_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        let dir = data_dir();
        Self {
            player: None,
            speed: Speed::default(),
            seed: clock_seed(),
            randomizer: RandomizerKind::Uniform,
            muted: false,
            highscore_path: dir.join("highscore.json"),
            leaderboard_path: dir.join("leaderboard.json"),
            leaderboard_enabled: true,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; `from_env` uses the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();

        config.player = get("TETRIS_PLAYER");

        if let Some(raw) = get("TETRIS_SPEED") {
            match parse_speed(&raw) {
                Ok(speed) => config.speed = speed,
                Err(err) => warn!("{err}; using speed {}", config.speed),
            }
        }
        if let Some(raw) = get("TETRIS_SEED") {
            match parse_seed(&raw) {
                Ok(seed) => config.seed = seed,
                Err(err) => warn!("{err}; using a clock seed"),
            }
        }
        if let Some(raw) = get("TETRIS_RANDOMIZER") {
            match parse_randomizer(&raw) {
                Ok(kind) => config.randomizer = kind,
                Err(err) => warn!("{err}; using uniform"),
            }
        }
        if let Some(raw) = get("TETRIS_MUTED") {
            config.muted = parse_flag(&raw);
        }
        if let Some(path) = get("TETRIS_HIGHSCORE_PATH") {
            config.highscore_path = PathBuf::from(path);
        }
        if let Some(path) = get("TETRIS_LEADERBOARD_PATH") {
            config.leaderboard_path = PathBuf::from(path);
        }
        if let Some(raw) = get("TETRIS_LEADERBOARD_DISABLED") {
            config.leaderboard_enabled = !parse_flag(&raw);
        }
        if let Some(path) = get("TETRIS_LOG_PATH") {
            config.log_path = PathBuf::from(path);
        }

        config
    }

    pub fn piece_source(&self) -> Randomizer {
        match self.randomizer {
            RandomizerKind::Uniform => Randomizer::uniform(self.seed),
            RandomizerKind::Bag => Randomizer::bag(self.seed),
        }
    }

    pub fn game_options(&self, high_score: u32) -> GameOptions {
        GameOptions {
            speed: self.speed,
            randomizer: self.piece_source(),
            high_score,
        }
    }
}

pub fn parse_speed(raw: &str) -> Result<Speed, ConfigError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(Speed::new)
        .ok_or_else(|| ConfigError::Speed(raw.to_string()))
}

pub fn parse_seed(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Seed(raw.to_string()))
}

pub fn parse_randomizer(raw: &str) -> Result<RandomizerKind, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "uniform" | "random" => Ok(RandomizerKind::Uniform),
        "bag" | "7bag" | "7-bag" => Ok(RandomizerKind::Bag),
        _ => Err(ConfigError::Randomizer(raw.to_string())),
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Per-user directory for persisted game data.
pub fn data_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
