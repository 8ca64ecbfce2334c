use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    StoreError(#[from] lektio_db::error::StoreError),

    #[error(transparent)]
    ScheduleError(#[from] lektio_schedule::error::ScheduleError),

    #[error(transparent)]
    CoreError(#[from] lektio_core::error::CoreError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

impl ServiceError {
    /// Whether this failure is a missing record (as opposed to bad
    /// input or an internal fault).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::StoreError(lektio_db::error::StoreError::NotFound(_))
        )
    }

    /// Whether this failure was rejected input, surfaced before any
    /// write happened.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::ScheduleError(lektio_schedule::error::ScheduleError::ValidationError(_))
        )
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
