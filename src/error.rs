//! Error types for fmngr.

use thiserror::Error;

/// Common error type for fmngr.
#[derive(Error, Debug)]
pub enum FmngrError {
    /// Database error.
    ///
    /// Wraps any catalog query or execution failure. Errors from sqlx are
    /// converted automatically; unique-constraint violations become
    /// [`FmngrError::Conflict`] instead.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// The operation would break a uniqueness or referential rule.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The upload body could not be read.
    #[error("upload error: {0}")]
    Upload(String),

    /// A catalog row exists but its blob is gone.
    #[error("blob missing for {0}")]
    MissingBlob(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for FmngrError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return FmngrError::Conflict(db_err.message().to_string());
            }
        }
        FmngrError::Database(e.to_string())
    }
}

/// Result type alias for fmngr operations.
pub type Result<T> = std::result::Result<T, FmngrError>;
