//! hoist-migrate - Migration engine for hoist
//!
//! This crate promotes functions, procedures and tables from an
//! environment into its successor on the promotion chain, inside one
//! transaction per run, and keeps the definition tree in step.

pub mod alter;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod routine;
pub mod run;
pub mod table;

#[cfg(test)]
pub(crate) mod fixture;

pub use alter::AlterationApplier;
pub use error::{MigrateError, MigrateResult};
pub use orchestrator::{MigrationRequest, Orchestrator};
pub use report::MigrationReport;
pub use routine::RoutineMigrator;
pub use run::MigrationRun;
pub use table::TableMigrator;
