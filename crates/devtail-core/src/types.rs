//! Core types for devtail

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Error, Result};

/// One structured log entry from the browser producer.
///
/// `args` arrive pre-serialized (objects already JSON-rendered and truncated
/// by the producer); `timestamp` is producer-local wall-clock time formatted
/// `HH:MM:SS.mmm` and is never re-stamped on the server side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub level: String,
    pub args: Vec<String>,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// One named service to run: `{ name, command }`, parsed from `name: command`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceSpec {
    pub name: String,
    pub command: String,
}

impl ServiceSpec {
    /// Parse a `name: command` string. The first colon is the separator, so
    /// colons inside the command (`host:port`) are preserved.
    pub fn parse(raw: &str) -> Result<Self> {
        let Some(colon) = raw.find(':') else {
            return Err(Error::InvalidService(raw.to_string()));
        };
        let name = raw[..colon].trim().to_string();
        let command = raw[colon + 1..].trim().to_string();
        if name.is_empty() {
            return Err(Error::EmptyServiceName(raw.to_string()));
        }
        if command.is_empty() {
            return Err(Error::EmptyServiceCommand(raw.to_string()));
        }
        Ok(Self { name, command })
    }

    /// Parse a batch of service strings, validating all of them up front so a
    /// bad entry aborts before anything is spawned.
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Self>> {
        if raw.is_empty() {
            return Err(Error::NoServices);
        }
        raw.iter().map(|s| Self::parse(s.as_ref())).collect()
    }
}

/// Fully-defaulted options record consumed by the session manager, the
/// orchestrator, and the batch ingestor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Options {
    /// Directory for log storage, relative to the project root
    pub log_dir: String,
    /// Log file name within each session directory
    pub log_file_name: String,
    /// Maximum number of log session directories to retain
    pub max_sessions: usize,
    /// Server endpoint path for receiving log batches
    pub endpoint: String,
    /// Client-side flush interval in milliseconds
    pub flush_interval_ms: u64,
    /// Client-side max batch size before immediate flush
    pub max_batch_size: usize,
    /// Max character length for serialized objects in the client
    pub max_serialize_len: usize,
    /// Warn in terminal if log_dir is not covered by .gitignore
    pub warn_on_missing_gitignore: bool,
    /// Console methods to intercept
    pub levels: Vec<String>,
    /// Capture window unhandled errors
    pub capture_errors: bool,
    /// Capture unhandled promise rejections
    pub capture_rejections: bool,
    /// Patterns to exclude from logs. Plain strings are substring matches,
    /// patterns starting with `/` are regexes.
    pub excludes: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            log_dir: DEFAULT_LOG_DIR.to_string(),
            log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
            max_sessions: DEFAULT_MAX_SESSIONS,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            flush_interval_ms: DEFAULT_FLUSH_INTERVAL_MS,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            max_serialize_len: DEFAULT_MAX_SERIALIZE_LEN,
            warn_on_missing_gitignore: true,
            levels: DEFAULT_LEVELS.iter().map(|s| s.to_string()).collect(),
            capture_errors: true,
            capture_rejections: true,
            excludes: Vec::new(),
        }
    }
}
