//! Settings store - `{"settings": {"username": ...}}`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::snapshot::{ensure_parent, read_optional};

pub const DEFAULT_USERNAME: &str = "Player";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsFile {
    settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Settings {
    username: String,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            settings: Settings {
                username: DEFAULT_USERNAME.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored username, or [`DEFAULT_USERNAME`] when nothing is stored.
    pub fn username(&self) -> Result<String> {
        Ok(self.load()?.settings.username)
    }

    pub fn save_username(&self, username: &str) -> Result<()> {
        let mut file = self.load()?;
        file.settings.username = username.to_string();

        ensure_parent(&self.path)?;
        fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        info!(path = %self.path.display(), username, "username saved");
        Ok(())
    }

    fn load(&self) -> Result<SettingsFile> {
        match read_optional(&self.path)? {
            Some(contents) => Ok(serde_json::from_str(&contents)?),
            None => Ok(SettingsFile::default()),
        }
    }
}
