//! Column and index alterations for existing tables
//!
//! The `alter-<family>` lists are maintained by whoever prepares the
//! promotion and are never cleared here.

use crate::error::MigrateResult;
use crate::run::{rollback_quietly, MigrationRun};
use hoist_core::{AlterKind, ObjectName};
use hoist_db::Database;

pub struct AlterationApplier<'a> {
    db: &'a dyn Database,
    run: &'a MigrationRun,
}

impl<'a> AlterationApplier<'a> {
    pub fn new(db: &'a dyn Database, run: &'a MigrationRun) -> Self {
        Self { db, run }
    }

    /// Apply the `alter` statements of every listed table present at the
    /// destination. Returns the number of statements applied.
    pub async fn apply(&self, alter: AlterKind) -> usize {
        let list = self.run.alter_list(alter);
        let names = match list.read(&self.run.store) {
            Ok(names) => names,
            Err(e) => {
                log::error!("Error reading {}: {}", list, e);
                return 0;
            }
        };

        if names.is_empty() {
            log::debug!("No {} alterations for {}", alter, self.run.destination);
            return 0;
        }

        if self.run.mode.is_dry_run() {
            for name in &names {
                log::warn!("Dry run:: alter {} of table {}", alter, name);
            }
            return 0;
        }

        let label = format!("{} ({})", list, self.run.destination);
        if let Err(e) = self.db.begin().await {
            log::error!("Error altering {}: {}", label, e);
            return 0;
        }

        let applied = match self.apply_all(alter, &names).await {
            Ok(applied) => applied,
            Err(e) => {
                rollback_quietly(self.db, &label).await;
                log::error!("Error altering {}: {}", label, e);
                return 0;
            }
        };

        if let Err(e) = self.db.commit().await {
            rollback_quietly(self.db, &label).await;
            log::error!("Error altering {}: {}", label, e);
            return 0;
        }

        applied
    }

    async fn apply_all(&self, alter: AlterKind, names: &[ObjectName]) -> MigrateResult<usize> {
        let statements = self.run.alter_dir(alter);
        let mut applied = 0;

        for name in names {
            if !self.db.table_exists(name).await? {
                log::info!(
                    "Table {} does not exist in {}, skipping {} alteration",
                    name,
                    self.run.destination,
                    alter
                );
                continue;
            }

            let sql = self.run.store.read(&statements, &name.sql_file_name())?;
            self.db.execute(&sql).await?;
            log::info!("Altered {} of table {}", alter, name);
            applied += 1;
        }

        Ok(applied)
    }
}

#[cfg(test)]
#[path = "alter_test.rs"]
mod tests;
