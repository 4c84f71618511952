//! Game state module - one play session
//!
//! Ties the board, score, level and countdown together. All mutation comes
//! from two entry points on the same thread: [`GameState::select`] for a
//! player touch and [`GameState::tick`] for the countdown. Either can end a
//! cycle; the board's end flag after a cycle ends the game.

use tracing::{debug, info};

use crate::board::{Board, Toggle};
use crate::error::{CoreError, Result};
use crate::rng::SimpleRng;
use crate::scoring::{chain_points, Level, Score};
use crate::snapshot::SessionSnapshot;
use crate::timer::CountdownTimer;
use crate::types::{
    GameAction, SessionEvent, DEFAULT_GRID_SIZE, INITIAL_TOKENS, ROUND_MS, TIMER_PENALTY_MS,
};

/// Session parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_size: u8,
    pub seed: u32,
    pub round_ms: u32,
    pub initial_tokens: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            seed: 1,
            round_ms: ROUND_MS,
            initial_tokens: INITIAL_TOKENS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    score: Score,
    level: Level,
    timer: CountdownTimer,
    started: bool,
    game_over: bool,
    /// Last event (consumed by the presentation layer).
    last_event: Option<SessionEvent>,
}

impl GameState {
    /// Create an idle session; call [`start`](Self::start) or
    /// [`resume`](Self::resume) before playing.
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            board: Board::new(config.grid_size, config.seed)?,
            score: Score::default(),
            level: Level::new(),
            timer: CountdownTimer::new(config.round_ms),
            started: false,
            game_over: false,
            last_event: None,
            config,
        })
    }

    /// Reset score and level, deal a fresh board and start the countdown.
    pub fn start(&mut self) -> Result<()> {
        self.score.reset();
        self.level.reset();
        self.board.setup(self.config.initial_tokens)?;
        self.timer.restart();
        self.started = true;
        self.game_over = false;
        self.last_event = None;
        info!(
            grid = self.config.grid_size,
            tokens = self.board.token_count(),
            "new game"
        );
        Ok(())
    }

    /// Continue a saved session.
    pub fn resume(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        let expected = self.config.grid_size as usize;
        if snapshot.size() != expected || !snapshot.is_square() {
            return Err(CoreError::GridMismatch { expected });
        }

        let rng = SimpleRng::new(self.board.rng_state());
        self.board = Board::from_symbol_grid(&snapshot.grid, rng)?;
        self.score = Score::new(snapshot.score);
        self.level = Level::from_value(snapshot.level);
        self.timer.set_remaining_ms(snapshot.timer_ms());
        self.timer.resume();
        self.started = true;
        self.game_over = false;
        self.last_event = None;
        info!(
            score = snapshot.score,
            level = snapshot.level,
            tokens = snapshot.token_count(),
            "resumed game"
        );
        Ok(())
    }

    /// Capture the persisted part of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.level.value(),
            score: self.score.points(),
            timer: self.timer.remaining_secs(),
            grid: self.board.symbol_grid(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score.points()
    }

    pub fn level(&self) -> u32 {
        self.level.value()
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn take_last_event(&mut self) -> Option<SessionEvent> {
        self.last_event.take()
    }

    fn playable(&self) -> bool {
        self.started && !self.game_over
    }

    /// Toggle the token at (x, y)
    ///
    /// Breaking the run costs [`TIMER_PENALTY_MS`]. Selecting the last
    /// reachable symbol of a run completes the cycle immediately.
    pub fn select(&mut self, x: u8, y: u8) -> Result<Toggle> {
        if !self.playable() {
            return Ok(Toggle::Empty);
        }

        let toggle = self.board.toggle(x, y)?;
        match toggle {
            Toggle::Broken => {
                self.timer.penalize(TIMER_PENALTY_MS);
                self.last_event = Some(SessionEvent::InvalidSelection);
            }
            Toggle::Selected if self.board.is_chain_complete() => {
                self.finish_cycle(false)?;
            }
            _ => {}
        }
        Ok(toggle)
    }

    /// Advance the countdown by `elapsed_ms`
    ///
    /// Returns true when the countdown expired and forced a cycle.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<bool> {
        if !self.playable() {
            return Ok(false);
        }
        if !self.timer.tick(elapsed_ms) {
            return Ok(false);
        }
        self.finish_cycle(true)?;
        Ok(true)
    }

    /// Resolve the current chain now, as if the countdown had expired.
    pub fn resolve(&mut self) -> Result<()> {
        if !self.playable() {
            return Ok(());
        }
        self.finish_cycle(true)
    }

    /// Apply a player action
    pub fn apply_action(&mut self, action: GameAction) -> Result<bool> {
        match action {
            GameAction::Select { x, y } => {
                let toggle = self.select(x, y)?;
                Ok(toggle != Toggle::Empty)
            }
            GameAction::Resolve => {
                let was_playable = self.playable();
                self.resolve()?;
                Ok(was_playable)
            }
            GameAction::Restart => {
                self.start()?;
                Ok(true)
            }
        }
    }

    /// Score the chain, clear it and replenish; stop on a full board.
    fn finish_cycle(&mut self, forced: bool) -> Result<()> {
        let length = self.board.chain().len();
        let points = chain_points(length);
        self.score.update(length);
        self.level.set_level(self.score.points());

        let outcome = self.board.cycle_end(self.level.value())?;
        debug!(
            forced,
            length,
            points,
            cleared = outcome.cleared,
            added = outcome.added.len(),
            "cycle finished"
        );

        if self.board.is_end() {
            self.game_over = true;
            self.timer.stop();
            self.last_event = Some(SessionEvent::GameOver);
            info!(
                score = self.score.points(),
                level = self.level.value(),
                "game over"
            );
            return Ok(());
        }

        self.timer.restart();
        self.last_event = Some(if forced {
            SessionEvent::TimerExpired
        } else {
            SessionEvent::ChainCompleted { length, points }
        });
        Ok(())
    }
}
