//! Persistence adapters for the game
//!
//! Three small stores, each owning one file:
//!
//! - [`SnapshotStore`]: the in-progress session as JSON (`state.json`)
//! - [`SettingsStore`]: player settings as JSON (`settings.json`)
//! - [`HighscoreLedger`]: the top-ten table in SQLite (`meowletters.db`)
//!
//! All I/O is synchronous. Callers touch the stores only when a session starts
//! or ends, never in the middle of a turn.

pub mod error;
pub mod ledger;
pub mod settings;
pub mod snapshot;

pub use meow_letters_core as core;
pub use meow_letters_types as types;

pub use error::{Result, StoreError};
pub use ledger::{HighscoreEntry, HighscoreLedger, TOP_SCORES};
pub use settings::{SettingsStore, DEFAULT_USERNAME};
pub use snapshot::SnapshotStore;

/// File names inside the data directory.
pub const SNAPSHOT_FILE: &str = "state.json";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LEDGER_FILE: &str = "meowletters.db";
