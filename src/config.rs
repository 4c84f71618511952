//! Runtime configuration read from `MEOW_LETTERS_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::GameConfig;
use crate::store::{LEDGER_FILE, SETTINGS_FILE, SNAPSHOT_FILE};
use crate::types::{MAX_GRID_SIZE, MIN_GRID_SIZE};

pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub game: GameConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            game: GameConfig::default(),
        }
    }
}

impl Config {
    /// Create from environment variables
    ///
    /// Unset or unparsable values fall back to defaults; the grid size is
    /// clamped to the supported range and the seed defaults to the clock.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = GameConfig::default();

        let data_dir = lookup("MEOW_LETTERS_DATA_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let grid_size = lookup("MEOW_LETTERS_GRID_SIZE")
            .and_then(|s| s.trim().parse::<u8>().ok())
            .map(|n| n.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE))
            .unwrap_or(defaults.grid_size);

        let seed = lookup("MEOW_LETTERS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(seed_from_clock);

        let round_ms = lookup("MEOW_LETTERS_ROUND_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.round_ms);

        Self {
            data_dir,
            game: GameConfig {
                grid_size,
                seed,
                round_ms,
                ..defaults
            },
        }
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_file(SNAPSHOT_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_file(SETTINGS_FILE)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_file(LEDGER_FILE)
    }

    fn data_file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(name)
    }
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
