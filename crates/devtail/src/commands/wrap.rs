//! Wrap a single command in the current (or a new) session

use anyhow::Result;
use devtail_logs::SessionManager;
use devtail_runner::wrap_command;

use crate::cli::Cli;
use crate::commands::resolve;
use crate::output::print_info;

/// Reuse-or-create a session, capture the command's output into
/// `<name>.log`, and hand back the child's exit code for the process to
/// exit with.
pub async fn execute(cli: &Cli, name: &str, command_parts: &[String]) -> Result<i32> {
    let resolved = resolve(cli)?;
    let manager = SessionManager::new(resolved.options);
    let session = manager.resolve_or_create(&resolved.project_root)?;

    let log_file = session.dir.join(format!("{}.log", name));
    print_info(&format!("{} → {}", name, log_file.display()));

    let command = command_parts.join(" ");
    let code = wrap_command(&session.dir, name, &command, &resolved.run_options).await?;
    Ok(code)
}
