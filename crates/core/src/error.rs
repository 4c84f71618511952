//! Error type for precondition failures in the puzzle engine.
//!
//! Every variant is a caller bug rather than a runtime condition: nothing here
//! is retried, callers propagate with `?`.

use thiserror::Error;

use crate::token::TokenId;
use crate::types::{Symbol, MAX_GRID_SIZE, MIN_GRID_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("board setup needs at least {min} tokens, got {got}")]
    TooFewTokens { min: usize, got: usize },

    #[error("run length must be at least {min}, got {got}")]
    RunTooShort { min: usize, got: usize },

    #[error("run length must be at most {max}, got {got}")]
    RunTooLong { max: usize, got: usize },

    #[error("symbol {0} has no neighbours in the alphabet")]
    NoNeighbour(Symbol),

    #[error("cannot remove from an empty chain")]
    EmptyChain,

    #[error("token {0:?} is not in the chain")]
    NotInChain(TokenId),

    #[error("'{0}' is not a symbol of the alphabet")]
    UnknownSymbol(String),

    #[error("grid size must be within {MIN_GRID_SIZE}..={MAX_GRID_SIZE}, got {0}")]
    InvalidGridSize(usize),

    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: u8, y: u8 },

    #[error("snapshot grid must be {expected}x{expected}")]
    GridMismatch { expected: usize },
}

pub type Result<T> = std::result::Result<T, CoreError>;
