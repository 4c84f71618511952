use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("'{0}' in saved grid is not a symbol of the alphabet")]
    UnknownSymbol(char),
}

pub type Result<T> = std::result::Result<T, StoreError>;
