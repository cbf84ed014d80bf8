//! Server error types

use axum::http::StatusCode;
use thiserror::Error;

use crate::path::PathError;

/// Main server error type
#[derive(Debug, Error)]
pub enum ServerError {
    // ========== Not Found ==========
    /// Thread does not exist
    #[error("thread not found: {0}")]
    ThreadNotFound(String),

    /// Post (usually a referenced parent) does not exist
    #[error("post not found: {0}")]
    PostNotFound(String),

    // ========== Path Errors ==========
    /// No sibling segment left under a parent, or root id beyond capacity
    #[error("path allocation exhausted: {0}")]
    AllocationExhausted(String),

    /// Stored path failed validation; storage integrity is broken
    #[error("malformed path: {0}")]
    MalformedPath(String),

    // ========== Validation Errors ==========
    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // ========== Storage Errors ==========
    /// Storage operation failed (NOT NotFound - those map to the variants above)
    #[error("storage error: {0}")]
    Storage(StorageError),

    // ========== Server Errors ==========
    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Storage-specific errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Transaction failed
    #[error("transaction failed: {0}")]
    TransactionFailed(String),

    /// Data corruption detected
    #[error("data corruption: {0}")]
    Corruption(String),

    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Server result type alias
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ServerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            ServerError::ThreadNotFound(_) | ServerError::PostNotFound(_) => {
                StatusCode::NOT_FOUND
            }

            // 507 Insufficient Storage
            ServerError::AllocationExhausted(_) => StatusCode::INSUFFICIENT_STORAGE,

            // 500 Internal Server Error
            ServerError::MalformedPath(_)
            | ServerError::Storage(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::ThreadNotFound(_) => "THREAD_NOT_FOUND",
            ServerError::PostNotFound(_) => "POST_NOT_FOUND",
            ServerError::AllocationExhausted(_) => "ALLOCATION_EXHAUSTED",
            ServerError::MalformedPath(_) => "MALFORMED_PATH",
            ServerError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ServerError::Storage(_) => "STORAGE_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Check if error is recoverable (client can retry)
    pub fn is_recoverable(&self) -> bool {
        match self {
            ServerError::Storage(StorageError::ConnectionFailed(_))
            | ServerError::Storage(StorageError::TransactionFailed(_)) => true,
            ServerError::Storage(StorageError::Sqlite(e)) => is_busy(e),
            _ => false,
        }
    }

    /// True for a UNIQUE violation, the signal to re-run sibling allocation
    pub(crate) fn is_unique_violation(&self) -> bool {
        match self {
            ServerError::Storage(StorageError::Sqlite(rusqlite::Error::SqliteFailure(e, _))) => {
                e.code == rusqlite::ErrorCode::ConstraintViolation
                    && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            }
            _ => false,
        }
    }
}

fn is_busy(e: &rusqlite::Error) -> bool {
    match e {
        rusqlite::Error::SqliteFailure(code, _) => matches!(
            code.code,
            rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
        ),
        _ => false,
    }
}

// Conversions from external errors

impl From<serde_json::Error> for ServerError {
    fn from(e: serde_json::Error) -> Self {
        ServerError::InvalidArgument(e.to_string())
    }
}

impl From<chrono::ParseError> for ServerError {
    fn from(e: chrono::ParseError) -> Self {
        ServerError::InvalidArgument(format!("invalid date: {}", e))
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::Storage(StorageError::Sqlite(e))
    }
}

impl From<StorageError> for ServerError {
    fn from(e: StorageError) -> Self {
        ServerError::Storage(e)
    }
}

impl From<PathError> for ServerError {
    fn from(e: PathError) -> Self {
        match e {
            PathError::Overflow(_) => ServerError::AllocationExhausted(e.to_string()),
            other => ServerError::MalformedPath(other.to_string()),
        }
    }
}
