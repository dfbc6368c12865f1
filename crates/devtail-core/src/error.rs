//! Error types for devtail

use std::path::PathBuf;

/// devtail error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid service format \"{0}\". Expected \"name: command\", e.g. \"api: uv run server\"")]
    InvalidService(String),

    #[error("Service name is empty in \"{0}\"")]
    EmptyServiceName(String),

    #[error("Service command is empty in \"{0}\"")]
    EmptyServiceCommand(String),

    #[error("No services supplied")]
    NoServices,

    #[error("Session directory not found: {0}")]
    SessionNotFound(PathBuf),

    #[error("Process failed to start: {0}")]
    SpawnFailed(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for devtail
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    pub fn spawn<S: Into<String>>(msg: S) -> Self {
        Error::SpawnFailed(msg.into())
    }
}
