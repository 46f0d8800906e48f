//! Temporary data root shared by the migrator tests

use crate::run::MigrationRun;
use chrono::NaiveDate;
use hoist_core::{
    AlterKind, Config, Environment, FixedClock, ListStatus, ObjectKind, RunMode,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(crate) const CONFIG: &str = r#"
name: fixture
environments:
  UAT: { host: uat, database: flo_uat, user: m }
  STAGE: { host: stage, database: flo_stage, user: m }
"#;

/// Data root promoting UAT into STAGE
pub(crate) struct Fixture {
    pub dir: TempDir,
    pub config: Config,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hoist.yml");
        fs::write(&path, CONFIG).unwrap();
        let config = Config::load(&path).unwrap();
        Self { dir, config }
    }

    pub fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    pub fn run(&self, mode: RunMode) -> MigrationRun {
        MigrationRun::resolve(&self.config, Environment::Stage, &Self::clock(), mode).unwrap()
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    fn write(path: PathBuf, content: &str) -> PathBuf {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn list_path(&self, kind: ObjectKind, status: ListStatus) -> PathBuf {
        self.root()
            .join("map-migrate/UAT-to-STAGE/flo_uat")
            .join(kind.as_str())
            .join(format!("{}.list", status.as_str()))
    }

    pub fn write_list(&self, kind: ObjectKind, status: ListStatus, names: &[&str]) -> PathBuf {
        let mut content = names.join("\n");
        content.push('\n');
        Self::write(self.list_path(kind, status), &content)
    }

    pub fn alter_list_path(&self, alter: AlterKind) -> PathBuf {
        self.root()
            .join("map-migrate/UAT-to-STAGE/flo_uat/tables")
            .join(format!("alter-{}.list", alter.as_str()))
    }

    pub fn write_alter_list(&self, alter: AlterKind, names: &[&str]) -> PathBuf {
        let mut content = names.join("\n");
        content.push('\n');
        Self::write(self.alter_list_path(alter), &content)
    }

    pub fn write_alter_statement(&self, alter: AlterKind, table: &str, sql: &str) -> PathBuf {
        let path = self
            .root()
            .join("map-migrate/UAT-to-STAGE/flo_uat/tables/alters")
            .join(alter.as_str())
            .join(format!("{table}.sql"));
        Self::write(path, sql)
    }

    pub fn source_path(&self, kind: ObjectKind, name: &str) -> PathBuf {
        self.root()
            .join("db/UAT/flo_uat")
            .join(kind.as_str())
            .join(format!("{name}.sql"))
    }

    pub fn write_source(&self, kind: ObjectKind, name: &str, sql: &str) -> PathBuf {
        Self::write(self.source_path(kind, name), sql)
    }

    pub fn destination_path(&self, kind: ObjectKind, name: &str) -> PathBuf {
        self.root()
            .join("db/STAGE/flo_stage")
            .join(kind.as_str())
            .join(format!("{name}.sql"))
    }

    pub fn write_destination(&self, kind: ObjectKind, name: &str, sql: &str) -> PathBuf {
        Self::write(self.destination_path(kind, name), sql)
    }

    pub fn backup_path(&self, kind: ObjectKind, name: &str) -> PathBuf {
        self.root()
            .join("db/STAGE/flo_stage/backup/10_16_2026")
            .join(kind.as_str())
            .join(format!("{name}.sql"))
    }

    pub fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }
}
