//! Work lists: ordered, file-backed queues of object names

use crate::environment::Environment;
use crate::error::{CoreError, CoreResult};
use crate::kind::{AlterKind, ListStatus, ObjectKind};
use crate::layout::Layout;
use crate::object_name::ObjectName;
use crate::store::FileStore;
use std::path::PathBuf;

/// Which family a work list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkListKind {
    /// `<kind>/<status>.list`
    Creation(ObjectKind, ListStatus),
    /// `tables/alter-<family>.list`
    Alteration(AlterKind),
}

/// A single work list file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkList {
    pub kind: WorkListKind,
    folder: PathBuf,
    file_name: String,
}

impl WorkList {
    /// Creation list for objects promoted from `source` to `dest`
    pub fn creation(
        layout: &Layout,
        source: Environment,
        dest: Environment,
        src_db: &str,
        kind: ObjectKind,
        status: ListStatus,
    ) -> Self {
        Self {
            kind: WorkListKind::Creation(kind, status),
            folder: layout.worklist_dir(source, dest, src_db, kind),
            file_name: status.file_name(),
        }
    }

    /// Alteration list for tables promoted from `source` to `dest`
    pub fn alteration(
        layout: &Layout,
        source: Environment,
        dest: Environment,
        src_db: &str,
        alter: AlterKind,
    ) -> Self {
        Self {
            kind: WorkListKind::Alteration(alter),
            folder: layout.worklist_dir(source, dest, src_db, ObjectKind::Tables),
            file_name: alter.list_file_name(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }

    /// Read the names in list order. A list file that does not exist is
    /// treated as empty; any other read failure, or a line that is not a
    /// valid object name, is an error.
    pub fn read(&self, store: &FileStore) -> CoreResult<Vec<ObjectName>> {
        let lines = match store.read_list(&self.folder, &self.file_name) {
            Ok(lines) => lines,
            Err(CoreError::IoWithPath { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::debug!("Work list {} does not exist", self.path().display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        lines
            .into_iter()
            .map(|line| {
                ObjectName::try_new(&line).ok_or_else(|| CoreError::ConfigInvalid {
                    message: format!(
                        "invalid object name '{}' in {}",
                        line,
                        self.path().display()
                    ),
                })
            })
            .collect()
    }

    /// Empty the list (the file is kept, with no content)
    pub fn clear(&self, store: &FileStore) -> CoreResult<()> {
        store.write(&self.folder, &self.file_name, "")
    }
}

impl std::fmt::Display for WorkList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            WorkListKind::Creation(kind, status) => write!(f, "{}/{}", kind, status.file_name()),
            WorkListKind::Alteration(alter) => write!(f, "tables/{}", alter.list_file_name()),
        }
    }
}

/// A non-empty work list together with its entries
#[derive(Debug, Clone)]
pub struct PendingList {
    pub list: WorkList,
    pub names: Vec<ObjectName>,
}

/// Every non-empty list feeding `dest` from its upstream environment.
pub fn pending_for(
    layout: &Layout,
    store: &FileStore,
    source: Environment,
    dest: Environment,
    src_db: &str,
) -> CoreResult<Vec<PendingList>> {
    let creation = ObjectKind::ALL.into_iter().flat_map(move |kind| {
        ListStatus::ALL
            .into_iter()
            .map(move |status| WorkList::creation(layout, source, dest, src_db, kind, status))
    });
    let alteration = AlterKind::ALL
        .into_iter()
        .map(move |alter| WorkList::alteration(layout, source, dest, src_db, alter));

    let mut pending = Vec::new();
    for list in creation.chain(alteration) {
        let names = list.read(store)?;
        if !names.is_empty() {
            pending.push(PendingList { list, names });
        }
    }
    Ok(pending)
}

#[cfg(test)]
#[path = "worklist_test.rs"]
mod tests;
