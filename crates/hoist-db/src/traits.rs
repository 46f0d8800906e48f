//! Database trait definitions

use crate::error::DbResult;
use async_trait::async_trait;
use hoist_core::ConnectionProfile;

/// A single destination connection.
///
/// One statement is in flight at a time; callers await each call before
/// issuing the next. Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one SQL statement verbatim, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<u64>;

    /// Check if a table exists in the connected database
    async fn table_exists(&self, name: &str) -> DbResult<bool>;

    /// Start a transaction
    async fn begin(&self) -> DbResult<()>;

    /// Commit the open transaction
    async fn commit(&self) -> DbResult<()>;

    /// Roll back the open transaction
    async fn rollback(&self) -> DbResult<()>;

    /// Close the connection. Later calls fail with `DbError::Closed`.
    async fn close(&self) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// Opens destination connections
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, profile: &ConnectionProfile) -> DbResult<Box<dyn Database>>;
}
