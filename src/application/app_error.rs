use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database not configured")]
    DatabaseNotConfigured,

    #[error("FID is required")]
    FidRequired,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    MalformedBody(String),

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// True for failures whose message comes from outside the service
    /// (parser, driver, runtime) rather than from a fixed string.
    pub fn carries_raw_detail(&self) -> bool {
        matches!(
            self,
            AppError::MalformedBody(_) | AppError::Database(_) | AppError::Internal(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
