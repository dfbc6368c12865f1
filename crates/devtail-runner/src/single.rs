//! Wrap a single command, capturing its output into the session

use devtail_core::{Error, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::route::{pump_lines, Echo, LineRoute, StreamKind};
use crate::{shell_command, signals, RunOptions};

/// Spawn `command` through a shell, piping each captured line to
/// `<name>.log`, the combined log, and the corresponding terminal stream.
/// Resolves with the child's exit code (a missing code, e.g. after a fatal
/// signal, defaults to 0). Interrupt/termination signals received by the
/// wrapper are forwarded to the child.
pub async fn wrap_command(
    session_dir: &Path,
    name: &str,
    command: &str,
    options: &RunOptions,
) -> Result<i32> {
    let route = Arc::new(LineRoute::open(
        session_dir,
        name,
        Echo::Raw,
        false,
        options.combined,
        &options.excludes,
    )?);

    let mut child = shell_command(command, session_dir)
        .spawn()
        .map_err(|e| Error::spawn(format!("Failed to start '{}': {}", command, e)))?;

    if let Some(pid) = child.id() {
        if let Err(e) = signals::forward_signals(vec![pid]) {
            warn!("Failed to install signal handlers: {}", e);
        }
    }

    let out_task: Option<JoinHandle<()>> = child
        .stdout
        .take()
        .map(|out| tokio::spawn(pump_lines(out, route.clone(), StreamKind::Stdout)));
    let err_task: Option<JoinHandle<()>> = child
        .stderr
        .take()
        .map(|err| tokio::spawn(pump_lines(err, route.clone(), StreamKind::Stderr)));

    let status = child.wait().await?;

    // Let the pumps drain whatever the child wrote before exiting
    if let Some(task) = out_task {
        let _ = task.await;
    }
    if let Some(task) = err_task {
        let _ = task.await;
    }

    Ok(status.code().unwrap_or(0))
}
