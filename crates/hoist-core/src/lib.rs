//! hoist-core - Core library for hoist
//!
//! This crate provides the promotion chain, configuration parsing, the
//! on-disk layout of definitions and work lists, backups, and the
//! environment literal rewriter shared by the migration engine and the CLI.

pub mod backup;
pub mod config;
pub mod environment;
pub mod error;
pub mod kind;
pub mod layout;
pub mod mode;
pub mod object_name;
pub mod rewrite;
pub mod store;
pub mod sync_marker;
pub mod worklist;

pub use backup::{BackupManager, Clock, FixedClock, RunDate, SystemClock};
pub use config::{Config, ConnectionProfile, EnvironmentConfig};
pub use environment::Environment;
pub use error::{CoreError, CoreResult};
pub use kind::{AlterKind, ListStatus, ObjectKind};
pub use layout::Layout;
pub use mode::RunMode;
pub use object_name::ObjectName;
pub use rewrite::rewrite;
pub use store::FileStore;
pub use sync_marker::{FileSync, SyncMarker};
pub use worklist::{PendingList, WorkList, WorkListKind};
