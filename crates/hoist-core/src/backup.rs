//! Pre-overwrite backups of destination definitions
//!
//! Backups land in a folder named after the run's calendar date. The date is
//! taken once per run from an injected [`Clock`] and threaded through as a
//! [`RunDate`].

use crate::environment::Environment;
use crate::error::CoreResult;
use crate::kind::ObjectKind;
use crate::layout::Layout;
use crate::object_name::ObjectName;
use crate::store::FileStore;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Source of "today" for a migration run
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Calendar date a run started on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunDate(NaiveDate);

impl RunDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_clock(clock: &dyn Clock) -> Self {
        Self::new(clock.today())
    }

    /// Backup folder name, `M_D_YYYY` without zero padding
    pub fn folder_name(&self) -> String {
        self.0.format("%-m_%-d_%Y").to_string()
    }
}

/// Copies destination definitions into the run's backup area
#[derive(Debug, Clone)]
pub struct BackupManager {
    layout: Layout,
    store: FileStore,
    env: Environment,
    db_name: String,
    run_date: RunDate,
}

impl BackupManager {
    pub fn new(
        layout: Layout,
        store: FileStore,
        env: Environment,
        db_name: impl Into<String>,
        run_date: RunDate,
    ) -> Self {
        Self {
            layout,
            store,
            env,
            db_name: db_name.into(),
            run_date,
        }
    }

    /// `db/<env>/<db>/backup/<run-date>/<kind>`
    pub fn backup_dir(&self, kind: ObjectKind) -> PathBuf {
        self.layout
            .backup_dir(self.env, &self.db_name, &self.run_date, kind)
    }

    /// Copy the current destination definition of `name` into the backup
    /// area. Returns the backup path, or `None` when the destination has no
    /// definition yet and there is nothing to preserve.
    ///
    /// Backups are append-only: the first snapshot of a name on a run date
    /// is kept, and later snapshots that day leave it untouched.
    pub fn snapshot(&self, kind: ObjectKind, name: &ObjectName) -> CoreResult<Option<PathBuf>> {
        let file_name = name.sql_file_name();
        let current = self
            .layout
            .definitions_dir(self.env, &self.db_name, kind)
            .join(&file_name);

        if !self.store.exists(&current) {
            log::debug!("No destination definition for {kind}/{name}, nothing to back up");
            return Ok(None);
        }

        let backup = self.backup_dir(kind).join(&file_name);
        if self.store.copy_new(&current, &backup)? {
            log::debug!("Backed up {} to {}", current.display(), backup.display());
        } else {
            log::debug!("Keeping earlier backup {}", backup.display());
        }
        Ok(Some(backup))
    }
}

#[cfg(test)]
#[path = "backup_test.rs"]
mod tests;
