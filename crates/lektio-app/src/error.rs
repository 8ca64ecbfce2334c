use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] lektio_service::error::ServiceError),

    #[error(transparent)]
    StoreError(#[from] lektio_db::error::StoreError),

    #[error(transparent)]
    ScheduleError(#[from] lektio_schedule::error::ScheduleError),

    #[error(transparent)]
    CoreError(#[from] lektio_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
