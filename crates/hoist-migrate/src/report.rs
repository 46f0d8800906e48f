//! Outcome of one orchestrated run

use hoist_core::{Environment, ListStatus, ObjectKind};
use std::fmt;
use std::time::Duration;

/// Counts and timing for one MigrationRun
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub destination: Environment,

    /// Logical database name of the destination
    pub database: String,

    pub kind: ObjectKind,

    pub status: ListStatus,

    /// Objects created or re-imported
    pub migrated: usize,

    /// Alteration statements applied (tables with status `updated` only)
    pub altered: usize,

    pub elapsed: Duration,
}

impl MigrationReport {
    /// Total units changed at the destination
    pub fn total(&self) -> usize {
        self.migrated + self.altered
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Migrate {} {}.{}.{}",
            self.migrated, self.destination, self.database, self.kind
        )?;
        if self.kind == ObjectKind::Tables && self.status == ListStatus::Updated {
            write!(f, " (altered {})", self.altered)?;
        }
        write!(f, " done in:: {}ms", self.elapsed.as_millis())
    }
}
