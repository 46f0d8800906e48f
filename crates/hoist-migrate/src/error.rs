//! Error types for hoist-migrate

use hoist_core::{CoreError, Environment};
use hoist_db::DbError;
use thiserror::Error;

/// Migration engine errors.
///
/// Migrators convert these into a log line and a count of zero; only the
/// orchestrator's setup failures reach callers.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// M001: Configuration could not be resolved for the destination
    #[error("[M001] Cannot resolve configuration: {0}")]
    Config(#[from] CoreError),

    /// M002: Database statement or transaction failure
    #[error("[M002] {0}")]
    Db(#[from] DbError),

    /// M003: Destination connection could not be opened
    #[error("[M003] Cannot connect to {env}: {source}")]
    Connect { env: Environment, source: DbError },
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
