//! Create a new log session and print its directory

use anyhow::Result;
use devtail_logs::SessionManager;

use crate::cli::Cli;
use crate::commands::resolve;

pub fn execute(cli: &Cli) -> Result<()> {
    let resolved = resolve(cli)?;
    let manager = SessionManager::new(resolved.options);
    let session = manager.create_session(&resolved.project_root)?;
    println!("{}", session.dir.display());
    Ok(())
}
