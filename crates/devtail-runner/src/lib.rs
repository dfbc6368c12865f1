//! devtail Runner - Process orchestration for `wrap` and `run`

pub mod multi;
pub mod palette;
pub mod route;
pub mod signals;
pub mod single;

pub use multi::{run_services, ServiceOutcome, ServiceStatus};
pub use route::{Echo, LineRoute, StreamKind};
pub use single::wrap_command;

use devtail_core::SESSION_ENV_VAR;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Orchestrator-level options, resolved by the CLI.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Write the interleaved combined.log
    pub combined: bool,
    /// Exclusion patterns applied to every captured line
    pub excludes: Vec<String>,
    /// Services suppressed from the terminal and combined.log
    pub mutes: Vec<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            combined: true,
            excludes: Vec::new(),
            mutes: Vec::new(),
        }
    }
}

/// Build the shell invocation for a service command: stdin stays attached to
/// the controlling terminal, stdout/stderr are captured, and the session
/// directory is exported so in-process producers can join it.
pub(crate) fn shell_command(command: &str, session_dir: &Path) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(command)
        .env(SESSION_ENV_VAR, session_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(false);
    cmd
}
