//! Run multiple services concurrently in a fresh session

use anyhow::Result;
use devtail_core::ServiceSpec;
use devtail_logs::SessionManager;
use devtail_runner::run_services;

use crate::cli::Cli;
use crate::commands::resolve;
use crate::output::print_info;

pub async fn execute(cli: &Cli, service_args: &[String]) -> Result<()> {
    // Validate every service string before any session or process exists
    let services = ServiceSpec::parse_all(service_args)?;

    let resolved = resolve(cli)?;
    let manager = SessionManager::new(resolved.options);
    let session = manager.create_session(&resolved.project_root)?;

    print_info(&format!("Session: {}", session.dir.display()));
    for svc in &services {
        print_info(&format!("  {} → {}.log", svc.name, svc.name));
    }
    if resolved.run_options.combined {
        print_info("  combined → combined.log");
    }
    println!();

    run_services(&session.dir, &services, &resolved.run_options).await?;
    Ok(())
}
