//! Session snapshot - the state persisted between plays.

use crate::types::Symbol;

/// `{level, score, timer, grid}` as stored by the snapshot store.
///
/// `grid` is row-major (`grid[y][x]`); `timer` is the remaining countdown in
/// seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub level: u32,
    pub score: u32,
    pub timer: f64,
    pub grid: Vec<Vec<Option<Symbol>>>,
}

impl SessionSnapshot {
    /// Edge length of the stored grid.
    pub fn size(&self) -> usize {
        self.grid.len()
    }

    pub fn is_square(&self) -> bool {
        self.grid.iter().all(|row| row.len() == self.grid.len())
    }

    pub fn token_count(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Remaining countdown in whole milliseconds.
    pub fn timer_ms(&self) -> u32 {
        if self.timer.is_finite() && self.timer > 0.0 {
            (self.timer * 1000.0).round().min(u32::MAX as f64) as u32
        } else {
            0
        }
    }
}
