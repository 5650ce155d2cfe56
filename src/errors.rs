// errors.rs
use thiserror::Error;

/// Errors surfaced by the data-access core.
///
/// Not-found is never an error here: lookups return `Option` and deletes
/// return `bool`. Store failures (constraint violations, a locked or missing
/// database file) propagate as `Db` without retries.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Image store error: {0}")]
    ImageStore(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True when the store rejected a write because of a UNIQUE or
    /// FOREIGN KEY constraint.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            AppError::Db(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code == rusqlite::ErrorCode::ConstraintViolation
            }
            _ => false,
        }
    }
}
