//! Meow Letters (workspace facade crate).
//!
//! Re-exports the workspace crates under stable names so the binary, the
//! integration tests and the benches share one import path:
//! `meow_letters::{core, store, types}`. The facade itself adds the
//! environment configuration, the session plumbing and the plain-text view
//! used by the terminal driver.

pub use meow_letters_core as core;
pub use meow_letters_store as store;
pub use meow_letters_types as types;

pub mod config;
pub mod session;
pub mod view;
