//! Configuration types and parsing for hoist.yml

use crate::environment::Environment;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Main project configuration from hoist.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Base directory holding `db/` and `map-migrate/`, relative to the
    /// directory the config was loaded from
    #[serde(default = "default_data_root")]
    pub data_root: String,

    /// Routine names starting with any of these prefixes are never migrated
    #[serde(default = "default_reserved_prefixes")]
    pub reserved_prefixes: Vec<String>,

    /// Connection profile per environment
    #[serde(default)]
    pub environments: BTreeMap<Environment, EnvironmentConfig>,

    /// Directory the config file was loaded from
    #[serde(skip)]
    pub root: PathBuf,
}

/// Per-environment connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Logical database name, used both in folder layouts and to connect
    pub database: String,

    pub user: String,

    /// Inline password
    #[serde(default)]
    pub password: Option<String>,

    /// Name of a process environment variable holding the password
    #[serde(default)]
    pub password_env: Option<String>,
}

/// Fully-resolved connection parameters for one destination
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    pub env: Environment,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("env", &self.env)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

fn default_data_root() -> String {
    ".".to_string()
}

fn default_reserved_prefixes() -> Vec<String> {
    vec!["OTE_".to_string()]
}

fn default_port() -> u16 {
    3306
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: Config =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                message: format!("{}: {}", path.display(), e),
            })?;
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for hoist.yml or hoist.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("hoist.yml");
        let yaml_path = dir.join("hoist.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        for (env, settings) in &self.environments {
            for (field, value) in [
                ("host", &settings.host),
                ("database", &settings.database),
                ("user", &settings.user),
            ] {
                if value.trim().is_empty() {
                    return Err(CoreError::ConfigInvalid {
                        message: format!("environments.{env}.{field} cannot be empty"),
                    });
                }
            }
        }

        Ok(())
    }

    /// Absolute data root
    pub fn data_root_absolute(&self) -> PathBuf {
        self.root.join(&self.data_root)
    }

    /// Promotion-chain predecessor of `env`
    pub fn upstream_of(&self, env: Environment) -> CoreResult<Environment> {
        env.require_upstream()
    }

    /// Settings block for an environment
    pub fn environment(&self, env: Environment) -> CoreResult<&EnvironmentConfig> {
        self.environments
            .get(&env)
            .ok_or_else(|| CoreError::MissingProfile {
                env: env.to_string(),
            })
    }

    /// Logical database name for an environment
    pub fn database_name(&self, env: Environment) -> CoreResult<&str> {
        Ok(self.environment(env)?.database.as_str())
    }

    /// Resolve connection parameters for a destination environment
    pub fn destination_profile(&self, env: Environment) -> CoreResult<ConnectionProfile> {
        let settings = self.environment(env)?;
        let password = match (&settings.password_env, &settings.password) {
            (Some(var), _) => std::env::var(var).map_err(|_| CoreError::MissingPassword {
                env: env.to_string(),
                var: var.clone(),
            })?,
            (None, Some(password)) => password.clone(),
            (None, None) => String::new(),
        };

        Ok(ConnectionProfile {
            env,
            host: settings.host.clone(),
            port: settings.port,
            database: settings.database.clone(),
            user: settings.user.clone(),
            password,
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
