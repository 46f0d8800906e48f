//! On-disk resource naming.
//!
//! Other tooling reads and writes the same tree, so these paths are fixed:
//!
//! ```text
//! db/<env>/<db>/<kind>/<name>.sql                       definitions
//! db/<env>/<db>/backup/<run-date>/<kind>/<name>.sql     backups
//! map-migrate/<src>-to-<dest>/<src-db>/<kind>/<status>.list
//! map-migrate/<src>-to-<dest>/<src-db>/tables/alter-<family>.list
//! map-migrate/<src>-to-<dest>/<src-db>/tables/alters/<family>/<table>.sql
//! ```

use crate::backup::RunDate;
use crate::environment::Environment;
use crate::kind::{AlterKind, ListStatus, ObjectKind};
use std::path::{Path, PathBuf};

/// Folder holding definition trees
pub const DB_DIR: &str = "db";

/// Folder holding work lists
pub const MAP_MIGRATE_DIR: &str = "map-migrate";

/// Path builder rooted at the data root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `db/<env>/<db>/<kind>`
    pub fn definitions_dir(&self, env: Environment, db_name: &str, kind: ObjectKind) -> PathBuf {
        self.root
            .join(DB_DIR)
            .join(env.as_str())
            .join(db_name)
            .join(kind.as_str())
    }

    /// `db/<env>/<db>/backup/<run-date>/<kind>`
    pub fn backup_dir(
        &self,
        env: Environment,
        db_name: &str,
        run_date: &RunDate,
        kind: ObjectKind,
    ) -> PathBuf {
        self.root
            .join(DB_DIR)
            .join(env.as_str())
            .join(db_name)
            .join("backup")
            .join(run_date.folder_name())
            .join(kind.as_str())
    }

    /// `map-migrate/<src>-to-<dest>/<src-db>`
    pub fn promotion_dir(&self, source: Environment, dest: Environment, src_db: &str) -> PathBuf {
        self.root
            .join(MAP_MIGRATE_DIR)
            .join(format!("{}-to-{}", source, dest))
            .join(src_db)
    }

    /// `map-migrate/<src>-to-<dest>/<src-db>/<kind>`
    pub fn worklist_dir(
        &self,
        source: Environment,
        dest: Environment,
        src_db: &str,
        kind: ObjectKind,
    ) -> PathBuf {
        self.promotion_dir(source, dest, src_db).join(kind.as_str())
    }

    /// `.../<kind>/<status>.list`
    pub fn worklist_file(
        &self,
        source: Environment,
        dest: Environment,
        src_db: &str,
        kind: ObjectKind,
        status: ListStatus,
    ) -> PathBuf {
        self.worklist_dir(source, dest, src_db, kind)
            .join(status.file_name())
    }

    /// `.../tables/alter-<family>.list`
    pub fn alter_list_file(
        &self,
        source: Environment,
        dest: Environment,
        src_db: &str,
        alter: AlterKind,
    ) -> PathBuf {
        self.worklist_dir(source, dest, src_db, ObjectKind::Tables)
            .join(alter.list_file_name())
    }

    /// `.../tables/alters/<family>`
    pub fn alter_statements_dir(
        &self,
        source: Environment,
        dest: Environment,
        src_db: &str,
        alter: AlterKind,
    ) -> PathBuf {
        self.worklist_dir(source, dest, src_db, ObjectKind::Tables)
            .join("alters")
            .join(alter.as_str())
    }

    /// `.../<kind>/<status>.sync.json`
    pub fn sync_marker_file(
        &self,
        source: Environment,
        dest: Environment,
        src_db: &str,
        kind: ObjectKind,
        status: ListStatus,
    ) -> PathBuf {
        self.worklist_dir(source, dest, src_db, kind)
            .join(format!("{}.sync.json", status.as_str()))
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
