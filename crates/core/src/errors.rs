use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

pub type WatchResult<T> = Result<T, WatchError>;
