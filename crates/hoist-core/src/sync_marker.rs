//! Write-ahead marker for the file phase of a routine migration
//!
//! SQL commit and file sync are two separate steps. The marker is saved
//! before the commit and removed once every backup and overwrite has been
//! applied, so a marker left on disk means the definition tree may lag
//! behind the destination database and needs manual reconciliation.

use crate::environment::Environment;
use crate::error::CoreResult;
use crate::kind::{ListStatus, ObjectKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Pending file operations of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncMarker {
    /// Short identifier for this run
    pub run_id: String,

    pub destination: Environment,

    pub kind: ObjectKind,

    pub status: ListStatus,

    /// When the marker was first written
    pub created_at: DateTime<Utc>,

    /// When the marker was last written
    pub last_updated_at: DateTime<Utc>,

    /// Operations not yet applied, in order
    pub pending: Vec<FileSync>,

    /// Operations already applied
    #[serde(default)]
    pub applied: Vec<FileSync>,
}

/// One file-phase step for a migrated object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSync {
    /// Object name
    pub name: String,

    /// Source definition to copy over the destination definition
    pub source: PathBuf,

    /// Destination definition being overwritten
    pub destination: PathBuf,

    /// Backup path, when a destination definition existed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
}

impl SyncMarker {
    pub fn new(
        destination: Environment,
        kind: ObjectKind,
        status: ListStatus,
        pending: Vec<FileSync>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string()[..8].to_string(),
            destination,
            kind,
            status,
            created_at: Utc::now(),
            last_updated_at: Utc::now(),
            pending,
            applied: Vec::new(),
        }
    }

    /// Load a marker from a file path
    pub fn load(path: &Path) -> CoreResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let marker: SyncMarker = serde_json::from_str(&content)?;
        Ok(Some(marker))
    }

    /// Save the marker atomically (write to temp, then rename)
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Move the first pending operation for `name` to `applied`
    pub fn mark_applied(&mut self, name: &str) {
        if let Some(pos) = self.pending.iter().position(|op| op.name == name) {
            let op = self.pending.remove(pos);
            self.applied.push(op);
        }
        self.last_updated_at = Utc::now();
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    /// Delete a marker file; a missing file is not an error
    pub fn remove(path: &Path) -> CoreResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "sync_marker_test.rs"]
mod tests;
