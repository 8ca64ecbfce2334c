use thiserror::Error;

/// Storage layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    CoreError(#[from] lektio_core::error::CoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
