//! Error types for hoist-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Transaction control error (D003)
    #[error("[D003] Transaction {action} failed: {message}")]
    TransactionError {
        action: &'static str,
        message: String,
    },

    /// Connection already closed (D004)
    #[error("[D004] Connection to {0} is closed")]
    Closed(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => DbError::ConnectionError(err.to_string()),
            other => DbError::ExecutionError(other.to_string()),
        }
    }
}
