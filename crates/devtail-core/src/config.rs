//! Configuration file parsing for devtail
//!
//! Supports multiple configuration file formats:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use crate::types::Options;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Partial options record as found in a config file. Every field is
/// optional; absent fields fall back to the built-in defaults. The merge is
/// shallow: the exclude list is replaced wholesale, never concatenated.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub log_dir: Option<String>,
    pub log_file_name: Option<String>,
    pub max_sessions: Option<usize>,
    pub endpoint: Option<String>,
    pub flush_interval_ms: Option<u64>,
    pub max_batch_size: Option<usize>,
    pub max_serialize_len: Option<usize>,
    pub warn_on_missing_gitignore: Option<bool>,
    pub levels: Option<Vec<String>>,
    pub capture_errors: Option<bool>,
    pub capture_rejections: Option<bool>,
    pub excludes: Option<Vec<String>>,
}

impl ConfigFile {
    /// Load config from file, automatically detecting format from extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            Error::ConfigError(format!(
                "Unsupported config file extension: {}. Expected .toml, .yaml, .yml, or .json",
                path.display()
            ))
        })?;

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format)
    }

    /// Parse config content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => Self::from_toml(content),
            ConfigFormat::Yaml => Self::from_yaml(content),
            ConfigFormat::Json => Self::from_json(content),
        }
    }

    /// Parse TOML config content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ConfigFile = toml::from_str(content)?;
        Ok(config)
    }

    /// Parse YAML config content
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ConfigFile = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Parse JSON config content
    pub fn from_json(content: &str) -> Result<Self> {
        let config: ConfigFile = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Find and load a config file from the given directory. Returns `None`
    /// when no config file exists (devtail runs fine on defaults alone).
    pub fn find_and_load(dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok(Some((config, path)));
            }
        }
        Ok(None)
    }

    /// Resolve into a full options record, taking defaults for absent fields.
    pub fn into_options(self) -> Options {
        let defaults = Options::default();
        Options {
            log_dir: self.log_dir.unwrap_or(defaults.log_dir),
            log_file_name: self.log_file_name.unwrap_or(defaults.log_file_name),
            max_sessions: self.max_sessions.unwrap_or(defaults.max_sessions),
            endpoint: self.endpoint.unwrap_or(defaults.endpoint),
            flush_interval_ms: self.flush_interval_ms.unwrap_or(defaults.flush_interval_ms),
            max_batch_size: self.max_batch_size.unwrap_or(defaults.max_batch_size),
            max_serialize_len: self.max_serialize_len.unwrap_or(defaults.max_serialize_len),
            warn_on_missing_gitignore: self
                .warn_on_missing_gitignore
                .unwrap_or(defaults.warn_on_missing_gitignore),
            levels: self.levels.unwrap_or(defaults.levels),
            capture_errors: self.capture_errors.unwrap_or(defaults.capture_errors),
            capture_rejections: self.capture_rejections.unwrap_or(defaults.capture_rejections),
            excludes: self.excludes.unwrap_or(defaults.excludes),
        }
    }
}
