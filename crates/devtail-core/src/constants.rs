//! Constants and default values for devtail

/// Default log directory, relative to the project root
pub const DEFAULT_LOG_DIR: &str = "tmp/logs";

/// Default log file name for the browser producer
pub const DEFAULT_LOG_FILE_NAME: &str = "browser.log";

/// Default number of session directories to retain
pub const DEFAULT_MAX_SESSIONS: usize = 10;

/// Default server endpoint path for receiving log batches
pub const DEFAULT_ENDPOINT: &str = "/__browser-logs";

/// Default client-side flush interval in milliseconds
pub const DEFAULT_FLUSH_INTERVAL_MS: u64 = 500;

/// Default client-side max batch size before immediate flush
pub const DEFAULT_MAX_BATCH_SIZE: usize = 50;

/// Default max character length for serialized objects in the client
pub const DEFAULT_MAX_SERIALIZE_LEN: usize = 2000;

/// Console methods intercepted by default
pub const DEFAULT_LEVELS: &[&str] = &["log", "warn", "error", "info", "debug"];

/// Name of the symlink pointing at the newest session directory
pub const LATEST_LINK: &str = "latest";

/// File name of the interleaved multi-service log within a session
pub const COMBINED_LOG: &str = "combined.log";

/// Environment variable carrying the active session directory to children
pub const SESSION_ENV_VAR: &str = "DEVTAIL_SESSION";

/// Config file names to search for (in priority order)
pub const CONFIG_FILES: &[&str] = &[
    "devtail.toml",
    "devtail.config.toml",
    "devtail.yaml",
    "devtail.yml",
    "devtail.config.yaml",
    "devtail.config.yml",
    "devtail.json",
    "devtail.config.json",
];
