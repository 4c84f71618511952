//! Snapshot store - the in-progress session on disk
//!
//! The file holds `{level, score, timer, grid}` as JSON, with each grid cell a
//! one-character string or `null`. A zero-length file means "no saved
//! session": [`SnapshotStore::clear`] truncates rather than deletes.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::SessionSnapshot;
use crate::error::{Result, StoreError};
use crate::types::Symbol;

/// On-disk form of a [`SessionSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotFile {
    level: u32,
    score: u32,
    timer: f64,
    grid: Vec<Vec<Option<char>>>,
}

impl From<&SessionSnapshot> for SnapshotFile {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            level: snapshot.level,
            score: snapshot.score,
            timer: snapshot.timer,
            grid: snapshot
                .grid
                .iter()
                .map(|row| row.iter().map(|cell| cell.map(Symbol::as_char)).collect())
                .collect(),
        }
    }
}

impl TryFrom<SnapshotFile> for SessionSnapshot {
    type Error = StoreError;

    fn try_from(file: SnapshotFile) -> Result<Self> {
        let grid = file
            .grid
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| match cell {
                        Some(c) => Symbol::from_char(c)
                            .map(Some)
                            .ok_or(StoreError::UnknownSymbol(c)),
                        None => Ok(None),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SessionSnapshot {
            level: file.level,
            score: file.score,
            timer: file.timer,
            grid,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with `snapshot`.
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        ensure_parent(&self.path)?;
        let json = serde_json::to_string_pretty(&SnapshotFile::from(snapshot))?;
        fs::write(&self.path, json)?;
        info!(
            path = %self.path.display(),
            level = snapshot.level,
            score = snapshot.score,
            "session saved"
        );
        Ok(())
    }

    /// Read the saved session, if there is one
    ///
    /// A missing or blank file is `Ok(None)`. A file that does not parse, or
    /// holds a character outside the alphabet, is an error.
    pub fn restore(&self) -> Result<Option<SessionSnapshot>> {
        let Some(contents) = read_optional(&self.path)? else {
            debug!(path = %self.path.display(), "no saved session");
            return Ok(None);
        };
        let file: SnapshotFile = serde_json::from_str(&contents)?;
        let snapshot = SessionSnapshot::try_from(file)?;
        info!(
            path = %self.path.display(),
            level = snapshot.level,
            score = snapshot.score,
            "session restored"
        );
        Ok(Some(snapshot))
    }

    /// Forget the saved session.
    pub fn clear(&self) -> Result<()> {
        ensure_parent(&self.path)?;
        fs::write(&self.path, "")?;
        info!(path = %self.path.display(), "saved session cleared");
        Ok(())
    }

    /// Whether there is no saved session. Unreadable files count as empty.
    pub fn is_empty(&self) -> bool {
        !matches!(read_optional(&self.path), Ok(Some(_)))
    }
}

/// File contents, or `None` when the file is missing or blank.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(None),
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(fs::create_dir_all(dir)?),
        _ => Ok(()),
    }
}
