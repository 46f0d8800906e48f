//! Function and procedure promotion
//!
//! Each routine is dropped and re-imported inside one transaction. The
//! definition tree is synced only after the commit: the current destination
//! definition is backed up, then overwritten with the source definition.
//! A [`SyncMarker`] written before the commit records the pending file work
//! until it has all been applied.

use crate::error::MigrateResult;
use crate::run::{committed_count, rollback_quietly, MigrationRun};
use hoist_core::{rewrite, FileSync, ListStatus, ObjectKind, ObjectName, SyncMarker};
use hoist_db::Database;
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;

/// Migrator for one routine kind
pub struct RoutineMigrator<'a> {
    db: &'a dyn Database,
    run: &'a MigrationRun,
    kind: ObjectKind,
}

impl<'a> RoutineMigrator<'a> {
    pub fn functions(db: &'a dyn Database, run: &'a MigrationRun) -> Self {
        Self {
            db,
            run,
            kind: ObjectKind::Functions,
        }
    }

    pub fn procedures(db: &'a dyn Database, run: &'a MigrationRun) -> Self {
        Self {
            db,
            run,
            kind: ObjectKind::Procedures,
        }
    }

    /// Promote every routine on the `status` list. Returns the number of
    /// routines migrated; any failure is logged and yields 0.
    pub async fn migrate(&self, status: ListStatus) -> usize {
        let list = self.run.worklist(self.kind, status);
        let names = match list.read(&self.run.store) {
            Ok(names) => self.without_reserved(dedup(names)),
            Err(e) => {
                log::error!("Error reading {}: {}", list, e);
                return 0;
            }
        };

        if names.is_empty() {
            log::debug!(
                "No {} to migrate to {}",
                self.kind.sql_keyword(),
                self.run.destination
            );
            return 0;
        }

        let marker_path = self.run.sync_marker_path(self.kind, status);
        self.report_leftover_marker(&marker_path);

        if self.run.mode.is_dry_run() {
            self.log_intent(&names);
            return 0;
        }

        let label = self.run.label(self.kind);
        if let Err(e) = self.db.begin().await {
            log::error!("Error during migration of {}: {}", label, e);
            return 0;
        }

        let plan = match self.apply_all(&names).await {
            Ok(plan) => plan,
            Err(e) => {
                rollback_quietly(self.db, &label).await;
                log::error!("Error during migration of {}: {}", label, e);
                return 0;
            }
        };

        let mut marker = SyncMarker::new(self.run.destination, self.kind, status, plan);
        if let Err(e) = marker.save(&marker_path) {
            rollback_quietly(self.db, &label).await;
            log::error!("Cannot write sync marker for {}: {}", label, e);
            return 0;
        }

        if let Err(e) = self.db.commit().await {
            rollback_quietly(self.db, &label).await;
            // Nothing was committed, so the marker describes no pending work
            let _ = SyncMarker::remove(&marker_path);
            log::error!("Error during migration of {}: {}", label, e);
            return 0;
        }

        if let Err(e) = self.sync_files(&names, &mut marker, &marker_path) {
            log::error!(
                "{} committed but definition files are out of sync ({}); see {}",
                label,
                e,
                marker_path.display()
            );
            return 0;
        }

        if let Err(e) = SyncMarker::remove(&marker_path) {
            log::warn!("Cannot remove sync marker {}: {}", marker_path.display(), e);
        }
        committed_count(list.clear(&self.run.store), &list, &label, names.len())
    }

    /// Warn about file work an earlier run committed but never applied
    fn report_leftover_marker(&self, marker_path: &Path) {
        match SyncMarker::load(marker_path) {
            Ok(Some(marker)) if !marker.is_complete() => {
                let pending: Vec<&str> =
                    marker.pending.iter().map(|op| op.name.as_str()).collect();
                log::warn!(
                    "Run {} left definition files out of sync for {} ({})",
                    marker.run_id,
                    pending.join(", "),
                    marker_path.display()
                );
            }
            Ok(_) => {}
            Err(e) => log::warn!("Cannot read sync marker {}: {}", marker_path.display(), e),
        }
    }

    /// Functions with a reserved prefix never leave their environment
    fn without_reserved(&self, names: Vec<ObjectName>) -> Vec<ObjectName> {
        if self.kind != ObjectKind::Functions {
            return names;
        }
        names
            .into_iter()
            .filter(|name| {
                let reserved = name.has_prefix(&self.run.reserved_prefixes);
                if reserved {
                    log::debug!("Skipping reserved function {}", name);
                }
                !reserved
            })
            .collect()
    }

    /// Statement sent to the destination for a source definition
    fn import_statement<'s>(&self, source_sql: &'s str) -> Cow<'s, str> {
        match self.kind {
            ObjectKind::Procedures => rewrite(source_sql, self.run.destination),
            _ => Cow::Borrowed(source_sql),
        }
    }

    fn log_intent(&self, names: &[ObjectName]) {
        let source_dir = self.run.source_dir(self.kind);
        for name in names {
            let drop_query = self.kind.drop_statement(name);
            match self.run.store.read(&source_dir, &name.sql_file_name()) {
                Ok(source_sql) => log::warn!(
                    "Dry run:: {}\n{}",
                    drop_query,
                    self.import_statement(&source_sql)
                ),
                Err(e) => log::warn!("Dry run:: {} (definition unreadable: {})", drop_query, e),
            }
        }
    }

    /// Drop and import every routine; returns the file work to do after commit
    async fn apply_all(&self, names: &[ObjectName]) -> MigrateResult<Vec<FileSync>> {
        let source_dir = self.run.source_dir(self.kind);
        let destination_dir = self.run.destination_dir(self.kind);
        let mut plan = Vec::with_capacity(names.len());

        for name in names {
            let file_name = name.sql_file_name();
            let drop_query = self.kind.drop_statement(name);
            let source_sql = self.run.store.read(&source_dir, &file_name)?;

            self.db.execute(&drop_query).await?;
            self.db.execute(&self.import_statement(&source_sql)).await?;
            log::info!("Imported {} {}", self.kind.sql_keyword(), name);

            plan.push(FileSync {
                name: name.to_string(),
                source: source_dir.join(&file_name),
                destination: destination_dir.join(&file_name),
                backup: None,
            });
        }

        Ok(plan)
    }

    /// Back up and overwrite destination definitions, recording progress in
    /// the marker after each routine
    fn sync_files(
        &self,
        names: &[ObjectName],
        marker: &mut SyncMarker,
        marker_path: &Path,
    ) -> MigrateResult<()> {
        let backups = self.run.backups();

        for name in names {
            let Some(op) = marker.pending.iter_mut().find(|op| op.name == name.as_str()) else {
                continue;
            };
            op.backup = backups.snapshot(self.kind, name)?;
            self.run.store.copy(&op.source, &op.destination)?;

            marker.mark_applied(name);
            marker.save(marker_path)?;
        }

        Ok(())
    }
}

/// Drop repeated names, keeping the first occurrence
fn dedup(names: Vec<ObjectName>) -> Vec<ObjectName> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| {
            let first = seen.insert(name.clone());
            if !first {
                log::debug!("Ignoring repeated entry {}", name);
            }
            first
        })
        .collect()
}

#[cfg(test)]
#[path = "routine_test.rs"]
mod tests;
