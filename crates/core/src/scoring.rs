//! Scoring module - points and levels earned from completed chains
//!
//! - A completed chain of `n >= 2` tokens is worth `(n - 1) * 5` points.
//! - The level is `score / 100 + 1`, so every 100 points is one level.
//!
//! Chains shorter than two tokens score nothing; [`Score::update`] treats
//! them as a no-op rather than an error because a forced cycle can end with an
//! empty or singleton chain.

use crate::types::{MIN_RUN_LEN, POINTS_PER_LEVEL, POINTS_PER_LINK};

/// Points for a completed chain of `chain_len` tokens
pub fn chain_points(chain_len: usize) -> u32 {
    if chain_len < MIN_RUN_LEN {
        return 0;
    }
    ((chain_len - 1) as u32).saturating_mul(POINTS_PER_LINK)
}

/// Level reached with `points`
pub fn level_for_score(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

/// Running score of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    points: u32,
}

impl Score {
    pub fn new(points: u32) -> Self {
        Self { points }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Add `points` and return the new total
    pub fn add(&mut self, points: u32) -> u32 {
        self.points = self.points.saturating_add(points);
        self.points
    }

    /// Credit a completed chain of `chain_len` tokens and return the new total
    pub fn update(&mut self, chain_len: usize) -> u32 {
        self.add(chain_points(chain_len))
    }

    pub fn reset(&mut self) {
        self.points = 0;
    }
}

/// Player level, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    level: u32,
}

impl Level {
    pub fn new() -> Self {
        Self { level: 1 }
    }

    /// Restore a stored level; zero is raised to 1.
    pub fn from_value(level: u32) -> Self {
        Self {
            level: level.max(1),
        }
    }

    pub fn value(&self) -> u32 {
        self.level
    }

    /// Recompute the level from `points` and return it
    pub fn set_level(&mut self, points: u32) -> u32 {
        self.level = level_for_score(points);
        self.level
    }

    pub fn reset(&mut self) {
        self.level = 1;
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}
