//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the puzzle rules and session state. It has no
//! dependencies on rendering, input or storage, which makes it:
//!
//! - **Deterministic**: every random choice goes through a seeded [`SimpleRng`]
//! - **Testable**: each rule is a plain function or method on owned data
//! - **Portable**: terminal, GUI or headless drivers all use the same API
//!
//! # Module Structure
//!
//! - [`alphabet`]: neighbour lookup and run generation over symbols
//! - [`token`]: letters on the board, identity vs. value comparison
//! - [`chain`]: the player's selection and its validity rules
//! - [`board`]: grid placement, replenishment and cycle completion
//! - [`scoring`]: points per chain and level thresholds
//! - [`timer`]: per-cycle countdown
//! - [`game_state`]: a complete play session
//! - [`snapshot`]: the persisted session state
//!
//! # Game Rules
//!
//! - Select letters in ascending alphabet order without gaps (`D, E, F`).
//! - A selection that breaks the run is dropped and costs countdown time.
//! - Once the next letter of the run is nowhere on the board, the run is
//!   cleared and scores `(length - 1) * 5`.
//! - When the countdown runs out, the current selection is resolved.
//! - After every cycle new letters are added; a run is always reachable.
//! - The game ends when new letters no longer fit on the board.
//!
//! # Example
//!
//! ```
//! use meow_letters_core::{GameConfig, GameState};
//! use meow_letters_core::types::GameAction;
//!
//! let mut game = GameState::new(GameConfig::default()).unwrap();
//! game.start().unwrap();
//!
//! game.apply_action(GameAction::Select { x: 0, y: 0 }).unwrap();
//! game.tick(100).unwrap();
//!
//! assert!(!game.game_over());
//! assert_eq!(game.level(), 1);
//! ```

pub mod alphabet;
pub mod board;
pub mod chain;
pub mod error;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;
pub mod token;

pub use meow_letters_types as types;

// Re-export commonly used types for convenience
pub use alphabet::{adjacent_run, any_adjacent, next_run, Run};
pub use board::{replenish_quantity, Board, CycleOutcome, Toggle};
pub use chain::{Chain, Link, TokenLookup};
pub use error::{CoreError, Result};
pub use game_state::{GameConfig, GameState};
pub use rng::SimpleRng;
pub use scoring::{chain_points, level_for_score, Level, Score};
pub use snapshot::SessionSnapshot;
pub use timer::CountdownTimer;
pub use token::{BySymbol, Token, TokenId};
