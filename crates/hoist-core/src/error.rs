//! Error types for hoist-core

use thiserror::Error;

/// Core error type for hoist
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Environment name not part of the promotion chain
    #[error("[E004] Unknown environment '{name}'. Expected one of: DEV, UAT, STAGE, PROD")]
    UnknownEnvironment { name: String },

    /// E005: Environment has no predecessor and cannot receive promotions
    #[error("[E005] Environment {env} is the head of the promotion chain and has no upstream")]
    NoUpstream { env: String },

    /// E006: Environment missing from the `environments` section
    #[error("[E006] No connection profile configured for environment {env}")]
    MissingProfile { env: String },

    /// E007: Password environment variable not set
    #[error("[E007] Password variable '{var}' for environment {env} is not set")]
    MissingPassword { env: String, var: String },

    /// E008: Unknown object kind, list status or alteration kind
    #[error("[E008] Unknown {what} '{value}'")]
    UnknownVariant { what: &'static str, value: String },

    /// E014: IO error
    #[error("[E014] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E016: IO error with file path context
    #[error("[E016] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
