//! Table creation
//!
//! Only the `new` list is handled here; changes to existing tables go
//! through [`crate::alter::AlterationApplier`]. Tables already present at
//! the destination are skipped, so re-running an unchanged list is safe.

use crate::error::MigrateResult;
use crate::run::{committed_count, rollback_quietly, MigrationRun};
use hoist_core::{ListStatus, ObjectKind, ObjectName};
use hoist_db::Database;

pub struct TableMigrator<'a> {
    db: &'a dyn Database,
    run: &'a MigrationRun,
}

impl<'a> TableMigrator<'a> {
    pub fn new(db: &'a dyn Database, run: &'a MigrationRun) -> Self {
        Self { db, run }
    }

    /// Create every table on the `new` list that the destination lacks.
    /// Returns the number of tables created.
    pub async fn migrate(&self) -> usize {
        let list = self.run.worklist(ObjectKind::Tables, ListStatus::New);
        let names = match list.read(&self.run.store) {
            Ok(names) => names,
            Err(e) => {
                log::error!("Error reading {}: {}", list, e);
                return 0;
            }
        };

        if names.is_empty() {
            log::debug!("No tables to migrate to {}", self.run.destination);
            return 0;
        }

        let label = self.run.label(ObjectKind::Tables);
        if self.run.mode.is_dry_run() {
            self.log_intent(&names).await;
            return 0;
        }

        if let Err(e) = self.db.begin().await {
            log::error!("Error during migration of {}: {}", label, e);
            return 0;
        }

        let created = match self.create_missing(&names).await {
            Ok(created) => created,
            Err(e) => {
                rollback_quietly(self.db, &label).await;
                log::error!("Error during migration of {}: {}", label, e);
                return 0;
            }
        };

        if let Err(e) = self.db.commit().await {
            rollback_quietly(self.db, &label).await;
            log::error!("Error during migration of {}: {}", label, e);
            return 0;
        }

        committed_count(list.clear(&self.run.store), &list, &label, created)
    }

    async fn create_missing(&self, names: &[ObjectName]) -> MigrateResult<usize> {
        let source_dir = self.run.source_dir(ObjectKind::Tables);
        let mut created = 0;

        for name in names {
            if self.db.table_exists(name).await? {
                log::debug!("Table {} already exists in {}", name, self.run.destination);
                continue;
            }

            let sql = self.run.store.read(&source_dir, &name.sql_file_name())?;
            self.db.execute(&sql).await?;
            log::info!("Created table {}", name);
            created += 1;
        }

        Ok(created)
    }

    async fn log_intent(&self, names: &[ObjectName]) {
        let source_dir = self.run.source_dir(ObjectKind::Tables);
        for name in names {
            match self.db.table_exists(name).await {
                Ok(true) => log::debug!("Dry run:: table {} already exists", name),
                Ok(false) => match self.run.store.read(&source_dir, &name.sql_file_name()) {
                    Ok(sql) => log::warn!("Dry run:: {}", sql),
                    Err(e) => log::warn!("Dry run:: table {} (definition unreadable: {})", name, e),
                },
                Err(e) => log::warn!("Dry run:: cannot check table {}: {}", name, e),
            }
        }
    }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
