//! The promotion chain.
//!
//! Changes flow DEV → UAT → STAGE → PROD. Every environment carries a fixed
//! mail domain literal that stored procedures embed; promoting a procedure
//! swaps the upstream literal for the destination's.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A member of the promotion chain, in promotion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    Dev,
    Uat,
    Stage,
    Prod,
}

/// Static facts about one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentTraits {
    /// Chain predecessor, `None` for the head of the chain
    pub upstream: Option<Environment>,
    /// Literal domain token embedded in procedure bodies
    pub domain_token: &'static str,
}

impl Environment {
    /// All environments in promotion order
    pub const ALL: [Environment; 4] = [
        Environment::Dev,
        Environment::Uat,
        Environment::Stage,
        Environment::Prod,
    ];

    /// Lookup table for the environment. The match is exhaustive, so adding a
    /// variant fails to compile until its traits are declared here.
    pub const fn traits(self) -> EnvironmentTraits {
        match self {
            Environment::Dev => EnvironmentTraits {
                upstream: None,
                domain_token: "@flodev.net",
            },
            Environment::Uat => EnvironmentTraits {
                upstream: Some(Environment::Dev),
                domain_token: "@flouat.net",
            },
            Environment::Stage => EnvironmentTraits {
                upstream: Some(Environment::Uat),
                domain_token: "@flostage.com",
            },
            Environment::Prod => EnvironmentTraits {
                upstream: Some(Environment::Stage),
                domain_token: "@flomail.net",
            },
        }
    }

    /// Chain predecessor, if any
    pub const fn upstream(self) -> Option<Environment> {
        self.traits().upstream
    }

    /// Chain predecessor, or an error for the chain head
    pub fn require_upstream(self) -> CoreResult<Environment> {
        self.upstream().ok_or_else(|| CoreError::NoUpstream {
            env: self.to_string(),
        })
    }

    /// Literal domain token for this environment
    pub const fn domain_token(self) -> &'static str {
        self.traits().domain_token
    }

    /// Upper-case name used in folder layouts (`UAT`, `STAGE`, ...)
    pub const fn as_str(self) -> &'static str {
        match self {
            Environment::Dev => "DEV",
            Environment::Uat => "UAT",
            Environment::Stage => "STAGE",
            Environment::Prod => "PROD",
        }
    }

    /// Environments that can receive promotions
    pub fn promotion_targets() -> impl Iterator<Item = Environment> {
        Self::ALL.into_iter().filter(|env| env.upstream().is_some())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEV" => Ok(Environment::Dev),
            "UAT" => Ok(Environment::Uat),
            "STAGE" => Ok(Environment::Stage),
            "PROD" => Ok(Environment::Prod),
            _ => Err(CoreError::UnknownEnvironment {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "environment_test.rs"]
mod tests;
