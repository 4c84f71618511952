//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be
//! used by the engine, the persistence layer and any presentation layer.
//!
//! # Alphabet
//!
//! Tokens are drawn from the 26 upper-case English letters. A [`Symbol`] is a
//! position in that alphabet; positional arithmetic (next/previous, boundary
//! checks) lives here, run generation lives in the core crate.
//!
//! # Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_SIZE` | 5 | Board edge length |
//! | `INITIAL_TOKENS` | 5 | Tokens placed by a fresh game |
//! | `POINTS_PER_LINK` | 5 | Points per link of a completed chain |
//! | `POINTS_PER_LEVEL` | 100 | Score needed per level |
//! | `ROUND_MS` | 10000 | Countdown length of one cycle |
//! | `TIMER_PENALTY_MS` | 1000 | Countdown lost when a run is broken |
//!
//! # Examples
//!
//! ```
//! use meow_letters_types::{Symbol, ALPHABET_LEN};
//!
//! let d = Symbol::from_char('d').unwrap();
//! assert_eq!(d.as_char(), 'D');
//! assert_eq!(d.next().map(Symbol::as_char), Some('E'));
//! assert_eq!(Symbol::last().index(), ALPHABET_LEN - 1);
//! assert!(Symbol::first().previous().is_none());
//! ```

use std::fmt;

/// The ordered alphabet tokens are drawn from.
pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Number of symbols in [`ALPHABET`].
pub const ALPHABET_LEN: usize = ALPHABET.len();

/// Default board edge length (5x5 grid).
pub const DEFAULT_GRID_SIZE: u8 = 5;

/// Smallest board edge accepted by the engine.
pub const MIN_GRID_SIZE: u8 = 3;

/// Largest board edge accepted by the engine.
pub const MAX_GRID_SIZE: u8 = 16;

/// Tokens placed on the board when a new game starts.
pub const INITIAL_TOKENS: usize = 5;

/// Minimum token count for a board setup (a guaranteed pair plus one).
pub const MIN_SETUP_TOKENS: usize = 3;

/// Shortest chain that counts as a run.
pub const MIN_RUN_LEN: usize = 2;

/// Points awarded per link of a completed chain (`(len - 1) * 5`).
pub const POINTS_PER_LINK: u32 = 5;

/// Score needed to advance one level.
pub const POINTS_PER_LEVEL: u32 = 100;

/// Countdown length of one cycle in milliseconds.
pub const ROUND_MS: u32 = 10_000;

/// Countdown lost when the player breaks a run.
pub const TIMER_PENALTY_MS: u32 = 1_000;

/// Step in which drivers feed wall-clock time to the countdown.
pub const TICK_MS: u32 = 100;

/// One symbol of [`ALPHABET`], stored as its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    /// Symbol at `index`, or `None` past the end of the alphabet.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < ALPHABET_LEN).then_some(Self(index as u8))
    }

    /// Parse a symbol from a character (case-insensitive)
    ///
    /// ```
    /// use meow_letters_types::Symbol;
    ///
    /// assert_eq!(Symbol::from_char('a'), Symbol::from_index(0));
    /// assert_eq!(Symbol::from_char('Z'), Symbol::from_index(25));
    /// assert_eq!(Symbol::from_char('1'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        ALPHABET
            .iter()
            .position(|&a| a == upper)
            .map(|i| Self(i as u8))
    }

    /// Parse a single-character string.
    pub fn from_str(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    pub fn first() -> Self {
        Self(0)
    }

    pub fn last() -> Self {
        Self((ALPHABET_LEN - 1) as u8)
    }

    /// Position in the alphabet (0-based)
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        ALPHABET[self.index()]
    }

    pub fn is_first(self) -> bool {
        self.0 == 0
    }

    pub fn is_last(self) -> bool {
        self.index() == ALPHABET_LEN - 1
    }

    /// Following symbol, `None` at the end of the alphabet.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Preceding symbol, `None` at the start of the alphabet.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self(i as u8))
    }

    /// Iterate over every symbol in alphabet order.
    pub fn all() -> impl Iterator<Item = Symbol> {
        (0..ALPHABET_LEN).map(|i| Self(i as u8))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Player actions accepted by a game session
///
/// The presentation layer translates touches or typed commands into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Toggle the token at (x, y)
    Select { x: u8, y: u8 },
    /// Resolve the current chain immediately, as if the countdown expired
    Resolve,
    /// Throw the board away and start over
    Restart,
}

impl GameAction {
    /// Parse an action from a text command
    ///
    /// # Examples
    ///
    /// ```
    /// use meow_letters_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("2 3"), Some(GameAction::Select { x: 2, y: 3 }));
    /// assert_eq!(GameAction::from_str("resolve"), Some(GameAction::Resolve));
    /// assert_eq!(GameAction::from_str("Restart"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("2"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "resolve" | "r" => return Some(GameAction::Resolve),
            "restart" | "n" => return Some(GameAction::Restart),
            _ => {}
        }

        let mut parts = s.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty());
        let x = parts.next()?.parse().ok()?;
        let y = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(GameAction::Select { x, y })
    }
}

/// Session-side event emitted after an action or tick.
///
/// Consumed by the presentation layer (animations, sounds, timer bar).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The last selection broke the run and the chain was dropped.
    InvalidSelection,
    /// A chain of `length` tokens was cleared for `points`.
    ChainCompleted { length: usize, points: u32 },
    /// The countdown ran out and the cycle was forced.
    TimerExpired,
    /// The board filled up; the session is over.
    GameOver,
}
