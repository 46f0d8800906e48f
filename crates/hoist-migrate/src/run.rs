//! Per-run context shared by the migrators

use crate::error::MigrateResult;
use hoist_core::{
    AlterKind, BackupManager, Clock, Config, CoreResult, Environment, FileStore, Layout,
    ListStatus, ObjectKind, RunDate, RunMode, WorkList,
};
use hoist_db::Database;
use std::path::PathBuf;

/// Everything one MigrationRun needs, resolved once up front
#[derive(Debug, Clone)]
pub struct MigrationRun {
    /// Environment receiving the objects
    pub destination: Environment,

    /// Chain predecessor of `destination`
    pub source: Environment,

    /// Logical database name of `source`
    pub source_db: String,

    /// Logical database name of `destination`
    pub destination_db: String,

    /// Date stamp for this run's backup folder
    pub run_date: RunDate,

    pub mode: RunMode,

    /// Function names with these prefixes are never migrated
    pub reserved_prefixes: Vec<String>,

    pub layout: Layout,

    pub store: FileStore,
}

impl MigrationRun {
    /// Resolve the run context for promoting into `destination`
    pub fn resolve(
        config: &Config,
        destination: Environment,
        clock: &dyn Clock,
        mode: RunMode,
    ) -> MigrateResult<Self> {
        let source = config.upstream_of(destination)?;
        Ok(Self {
            destination,
            source,
            source_db: config.database_name(source)?.to_string(),
            destination_db: config.database_name(destination)?.to_string(),
            run_date: RunDate::from_clock(clock),
            mode,
            reserved_prefixes: config.reserved_prefixes.clone(),
            layout: Layout::new(config.data_root_absolute()),
            store: FileStore,
        })
    }

    /// `(kind, status)` creation list
    pub fn worklist(&self, kind: ObjectKind, status: ListStatus) -> WorkList {
        WorkList::creation(
            &self.layout,
            self.source,
            self.destination,
            &self.source_db,
            kind,
            status,
        )
    }

    /// `alter-<family>` list
    pub fn alter_list(&self, alter: AlterKind) -> WorkList {
        WorkList::alteration(
            &self.layout,
            self.source,
            self.destination,
            &self.source_db,
            alter,
        )
    }

    /// Source definitions folder for `kind`
    pub fn source_dir(&self, kind: ObjectKind) -> PathBuf {
        self.layout
            .definitions_dir(self.source, &self.source_db, kind)
    }

    /// Destination definitions folder for `kind`
    pub fn destination_dir(&self, kind: ObjectKind) -> PathBuf {
        self.layout
            .definitions_dir(self.destination, &self.destination_db, kind)
    }

    /// Folder of alteration statements for `alter`
    pub fn alter_dir(&self, alter: AlterKind) -> PathBuf {
        self.layout
            .alter_statements_dir(self.source, self.destination, &self.source_db, alter)
    }

    pub fn sync_marker_path(&self, kind: ObjectKind, status: ListStatus) -> PathBuf {
        self.layout.sync_marker_file(
            self.source,
            self.destination,
            &self.source_db,
            kind,
            status,
        )
    }

    pub fn backups(&self) -> BackupManager {
        BackupManager::new(
            self.layout.clone(),
            self.store,
            self.destination,
            self.destination_db.clone(),
            self.run_date,
        )
    }

    /// `<ENV>.<db>.<kind>` label used in log lines
    pub fn label(&self, kind: ObjectKind) -> String {
        format!("{}.{}.{}", self.destination, self.destination_db, kind)
    }
}

/// Count reported once a run has committed. Failing to clear the work list
/// afterwards is logged; the committed objects are still counted.
pub(crate) fn committed_count(
    cleared: CoreResult<()>,
    list: &WorkList,
    label: &str,
    count: usize,
) -> usize {
    if let Err(e) = cleared {
        log::error!("{} migrated but {} was not cleared: {}", label, list, e);
    }
    count
}

/// Roll back after a failure; a failing rollback is logged, not returned
pub(crate) async fn rollback_quietly(db: &dyn Database, label: &str) {
    if let Err(e) = db.rollback().await {
        log::error!("Rollback failed for {}: {}", label, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hoist_core::FixedClock;

    const YAML: &str = r#"
name: test
data_root: data
environments:
  UAT: { host: u, database: flo_uat, user: m }
  STAGE: { host: s, database: flo_stage, user: m }
"#;

    fn config() -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hoist.yml");
        std::fs::write(&path, YAML).unwrap();
        let mut config = Config::load(&path).unwrap();
        config.root = PathBuf::from("/srv/promo");
        config
    }

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    #[test]
    fn test_resolve_stage_run() {
        let run =
            MigrationRun::resolve(&config(), Environment::Stage, &clock(), RunMode::Apply).unwrap();

        assert_eq!(run.source, Environment::Uat);
        assert_eq!(run.source_db, "flo_uat");
        assert_eq!(run.destination_db, "flo_stage");
        assert_eq!(run.reserved_prefixes, vec!["OTE_".to_string()]);
        assert_eq!(
            run.worklist(ObjectKind::Functions, ListStatus::New).path(),
            PathBuf::from("/srv/promo/data/map-migrate/UAT-to-STAGE/flo_uat/functions/new.list")
        );
        assert_eq!(
            run.source_dir(ObjectKind::Procedures),
            PathBuf::from("/srv/promo/data/db/UAT/flo_uat/procedures")
        );
        assert_eq!(
            run.backups().backup_dir(ObjectKind::Functions),
            PathBuf::from("/srv/promo/data/db/STAGE/flo_stage/backup/10_16_2026/functions")
        );
        assert_eq!(run.label(ObjectKind::Tables), "STAGE.flo_stage.tables");
    }

    #[test]
    fn test_resolve_requires_source_profile() {
        // PROD's upstream STAGE is configured but PROD itself is not
        assert!(
            MigrationRun::resolve(&config(), Environment::Prod, &clock(), RunMode::Apply).is_err()
        );
        // UAT's upstream DEV is not configured
        assert!(
            MigrationRun::resolve(&config(), Environment::Uat, &clock(), RunMode::Apply).is_err()
        );
    }

    #[test]
    fn test_committed_count_survives_clear_failure() {
        let run =
            MigrationRun::resolve(&config(), Environment::Stage, &clock(), RunMode::Apply).unwrap();
        let list = run.worklist(ObjectKind::Tables, ListStatus::New);
        let failed = Err(hoist_core::CoreError::ConfigInvalid {
            message: "read-only".to_string(),
        });

        assert_eq!(committed_count(failed, &list, "STAGE.flo_stage.tables", 3), 3);
        assert_eq!(committed_count(Ok(()), &list, "STAGE.flo_stage.tables", 2), 2);
    }

    #[test]
    fn test_resolve_rejects_chain_head() {
        assert!(
            MigrationRun::resolve(&config(), Environment::Dev, &clock(), RunMode::Apply).is_err()
        );
    }
}
