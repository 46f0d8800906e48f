//! Process-wide execution mode

use std::fmt;

/// Whether mutating actions are performed or only logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Transactional execution
    #[default]
    Apply,
    /// Log intended actions, mutate nothing
    DryRun,
}

impl RunMode {
    /// Interpret the numeric switch: any value >= 1 selects dry-run; absent,
    /// zero, negative or non-numeric values select normal execution.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(str::trim).and_then(|v| v.parse::<f64>().ok()) {
            Some(n) if n >= 1.0 => RunMode::DryRun,
            _ => RunMode::Apply,
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == RunMode::DryRun
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Apply => write!(f, "apply"),
            RunMode::DryRun => write!(f, "dry-run"),
        }
    }
}
