//! Host the ingestion endpoint for browser log batches

use anyhow::Result;
use devtail_core::SESSION_ENV_VAR;
use devtail_ingest::{serve, IngestState};
use devtail_logs::SessionManager;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cli::{Cli, ServeArgs};
use crate::commands::resolve;
use crate::output::{print_info, print_warn};

pub async fn execute(cli: &Cli, args: &ServeArgs) -> Result<()> {
    let resolved = resolve(cli)?;
    let manager = SessionManager::new(resolved.options.clone());

    // Join the session exported by a wrapping `run`, if any
    let session = match std::env::var(SESSION_ENV_VAR) {
        Ok(dir) if PathBuf::from(&dir).is_dir() => manager.join_session(&PathBuf::from(dir))?,
        Ok(dir) => {
            print_warn(&format!(
                "{} points at missing directory {}, starting a fresh session",
                SESSION_ENV_VAR, dir
            ));
            manager.resolve_or_create(&resolved.project_root)?
        }
        Err(_) => manager.resolve_or_create(&resolved.project_root)?,
    };

    print_info(&format!("Writing to {}", session.primary_log.display()));

    let state = Arc::new(IngestState::new(
        Some(session.primary_log),
        &resolved.options,
    ));
    serve(&args.addr, &resolved.options.endpoint, state).await?;
    Ok(())
}
