//! Strongly-typed schema object name.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Name of a table, function or procedure as it appears in a work list.
///
/// Names double as file stems (`<name>.sql`), so they are trimmed and must
/// not be empty or contain path separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectName(String);

impl ObjectName {
    /// Parse a name, returning `None` for blank or path-like input.
    pub fn try_new(name: impl AsRef<str>) -> Option<Self> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() || trimmed.contains(['/', '\\']) || trimmed == ".." {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Definition file name, `<name>.sql`
    pub fn sql_file_name(&self) -> String {
        format!("{}.sql", self.0)
    }

    /// Whether the name starts with any of the given prefixes
    pub fn has_prefix<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        prefixes
            .iter()
            .any(|p| !p.as_ref().is_empty() && self.0.starts_with(p.as_ref()))
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ObjectName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ObjectName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectName {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_new(&s).ok_or_else(|| format!("invalid object name '{s}'"))
    }
}

impl From<ObjectName> for String {
    fn from(name: ObjectName) -> Self {
        name.0
    }
}

impl PartialEq<&str> for ObjectName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "object_name_test.rs"]
mod tests;
