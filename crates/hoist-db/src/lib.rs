//! hoist-db - Database abstraction layer for hoist
//!
//! This crate provides the `Database` and `Connector` traits and their
//! MySQL implementation (plus an in-memory fake behind `test-support`).

pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod mysql;
pub mod traits;

pub use error::{DbError, DbResult};
#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemoryConnector, MemoryDatabase};
pub use mysql::{MySqlBackend, MySqlConnector};
pub use traits::{Connector, Database};
