//! GameView: maps `core::GameState` into plain text.
//!
//! This module is pure (no I/O). It can be unit-tested.

use std::fmt::Write;

use crate::core::{BySymbol, GameState};
use crate::store::HighscoreEntry;
use crate::types::SessionEvent;

const TIMER_BAR_WIDTH: usize = 10;

/// Text renderer for the board and status line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render the grid with coordinate labels
    ///
    /// Selected tokens are bracketed, empty cells are dots.
    pub fn render_board(&self, state: &GameState) -> String {
        let board = state.board();
        let size = board.size();
        let mut out = String::new();

        out.push_str("   ");
        for x in 0..size {
            let _ = write!(out, "{x:^3}");
        }
        out.push('\n');

        for y in 0..size {
            let _ = write!(out, "{y:>2} ");
            for x in 0..size {
                match board.get(x, y).flatten() {
                    Some(token) if token.is_selected() => {
                        let _ = write!(out, "[{}]", token.symbol());
                    }
                    Some(token) => {
                        let _ = write!(out, " {} ", token.symbol());
                    }
                    None => out.push_str(" . "),
                }
            }
            out.push('\n');
        }
        out
    }

    /// One-line summary: score, level, countdown and the current chain.
    pub fn render_status(&self, state: &GameState) -> String {
        let chain: String = state
            .board()
            .chain()
            .symbols()
            .map(|s| s.as_char())
            .collect();
        let mut line = format!(
            "score {}  level {}  timer {:.1}s",
            state.score(),
            state.level(),
            state.timer().remaining_secs()
        );
        let filled = (state.timer().fraction() * TIMER_BAR_WIDTH as f64).round() as usize;
        let _ = write!(
            line,
            " [{}{}]",
            "#".repeat(filled.min(TIMER_BAR_WIDTH)),
            ".".repeat(TIMER_BAR_WIDTH.saturating_sub(filled))
        );
        if !chain.is_empty() {
            let _ = write!(line, "  chain {chain}");
        }
        if state.game_over() {
            line.push_str("  GAME OVER");
        }
        line
    }

    pub fn render_event(&self, event: SessionEvent) -> String {
        match event {
            SessionEvent::InvalidSelection => "That broke the run!".to_string(),
            SessionEvent::ChainCompleted { length, points } => {
                format!("Cleared {length} letters for {points} points.")
            }
            SessionEvent::TimerExpired => "Time's up!".to_string(),
            SessionEvent::GameOver => "The board is full. Game over.".to_string(),
        }
    }

    pub fn render_highscores(&self, entries: &[HighscoreEntry]) -> String {
        let mut out = String::from("Highscores\n");
        if entries.is_empty() {
            out.push_str("  (none yet)\n");
        }
        for (rank, entry) in entries.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {:<16} {:>6}", rank + 1, entry.username, entry.score);
        }
        out
    }
}
