//! Object kinds, work-list statuses and alteration families

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of schema object being promoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Tables,
    Functions,
    Procedures,
}

impl ObjectKind {
    /// All kinds, in the order `pending` reports them
    pub const ALL: [ObjectKind; 3] = [
        ObjectKind::Tables,
        ObjectKind::Functions,
        ObjectKind::Procedures,
    ];

    /// Folder name used under `db/` and `map-migrate/`
    pub const fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Tables => "tables",
            ObjectKind::Functions => "functions",
            ObjectKind::Procedures => "procedures",
        }
    }

    /// SQL keyword for the object type
    pub const fn sql_keyword(self) -> &'static str {
        match self {
            ObjectKind::Tables => "TABLE",
            ObjectKind::Functions => "FUNCTION",
            ObjectKind::Procedures => "PROCEDURE",
        }
    }

    /// `DROP <KIND> IF EXISTS` statement for a routine or table name
    pub fn drop_statement(self, name: &str) -> String {
        format!(
            "DROP {} IF EXISTS `{}`;",
            self.sql_keyword(),
            name.replace('`', "``")
        )
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tables" | "table" => Ok(ObjectKind::Tables),
            "functions" | "function" => Ok(ObjectKind::Functions),
            "procedures" | "procedure" => Ok(ObjectKind::Procedures),
            _ => Err(CoreError::UnknownVariant {
                what: "object kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Work-list status; the value is the list file stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStatus {
    #[default]
    New,
    Updated,
    Deprecated,
}

impl ListStatus {
    pub const ALL: [ListStatus; 3] = [ListStatus::New, ListStatus::Updated, ListStatus::Deprecated];

    pub const fn as_str(self) -> &'static str {
        match self {
            ListStatus::New => "new",
            ListStatus::Updated => "updated",
            ListStatus::Deprecated => "deprecated",
        }
    }

    /// List file name, e.g. `new.list`
    pub fn file_name(self) -> String {
        format!("{}.list", self.as_str())
    }
}

impl fmt::Display for ListStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(ListStatus::New),
            "updated" => Ok(ListStatus::Updated),
            "deprecated" => Ok(ListStatus::Deprecated),
            _ => Err(CoreError::UnknownVariant {
                what: "list status",
                value: s.to_string(),
            }),
        }
    }
}

/// Family of supplementary table alterations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlterKind {
    Columns,
    Indexes,
}

impl AlterKind {
    /// Application order within an "updated" table run
    pub const ALL: [AlterKind; 2] = [AlterKind::Columns, AlterKind::Indexes];

    pub const fn as_str(self) -> &'static str {
        match self {
            AlterKind::Columns => "columns",
            AlterKind::Indexes => "indexes",
        }
    }

    /// List file name, e.g. `alter-columns.list`
    pub fn list_file_name(self) -> String {
        format!("alter-{}.list", self.as_str())
    }
}

impl fmt::Display for AlterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "kind_test.rs"]
mod tests;
