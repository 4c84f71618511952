//! Highscore ledger - the top-ten table in SQLite
//!
//! Every insert prunes the table back to [`TOP_SCORES`] rows. When scores tie
//! at the cut-off the row inserted first is kept.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::error::Result;

/// Number of rows the ledger keeps.
pub const TOP_SCORES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighscoreEntry {
    pub username: String,
    pub score: u32,
}

pub struct HighscoreLedger {
    conn: Connection,
}

impl HighscoreLedger {
    /// Open (or create) the ledger database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        crate::snapshot::ensure_parent(path)?;
        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "highscore ledger opened");
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS highscores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL,
                highscore INTEGER NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    /// Record `score` for `username`, then drop everything outside the top ten.
    pub fn insert(&mut self, username: &str, score: u32) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO highscores (username, highscore) VALUES (?1, ?2)",
            params![username, score],
        )?;
        let pruned = tx.execute(
            "DELETE FROM highscores WHERE id NOT IN (
                SELECT id FROM highscores ORDER BY highscore DESC, id ASC LIMIT ?1
            )",
            params![TOP_SCORES as i64],
        )?;
        tx.commit()?;

        info!(username, score, pruned, "highscore recorded");
        Ok(())
    }

    /// Best scores first.
    pub fn top_ten(&self) -> Result<Vec<HighscoreEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT username, highscore FROM highscores
             ORDER BY highscore DESC, id ASC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![TOP_SCORES as i64], |row| {
            Ok(HighscoreEntry {
                username: row.get(0)?,
                score: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Whether `score` would make it onto the table.
    pub fn qualifies(&self, score: u32) -> Result<bool> {
        let top = self.top_ten()?;
        Ok(top.len() < TOP_SCORES || top.last().is_some_and(|e| score > e.score))
    }

    /// Rows currently stored.
    pub fn len(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM highscores", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
