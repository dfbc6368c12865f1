//! Run multiple services concurrently into one session

use devtail_core::{Error, Result, ServiceSpec};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::palette;
use crate::route::{pump_lines, Echo, LineRoute, StreamKind};
use crate::{shell_command, signals, RunOptions};

/// Terminal state of one spawned service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Exited(i32),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ServiceOutcome {
    pub name: String,
    pub status: ServiceStatus,
}

/// Spawn every service concurrently, fan each one's output out through its
/// own [`LineRoute`], and resolve once all children have exited. One
/// service's spawn failure or non-zero exit is reported for that service
/// only; siblings are never cancelled.
pub async fn run_services(
    session_dir: &Path,
    services: &[ServiceSpec],
    options: &RunOptions,
) -> Result<Vec<ServiceOutcome>> {
    if services.is_empty() {
        return Err(Error::NoServices);
    }

    // Open every log route before spawning anything, so a filesystem
    // problem aborts with no process started.
    let mut routes = Vec::with_capacity(services.len());
    for (i, svc) in services.iter().enumerate() {
        let muted = options.mutes.iter().any(|m| m == &svc.name);
        let tag = palette::service_tag(&svc.name, i);
        let route = LineRoute::open(
            session_dir,
            &svc.name,
            Echo::Tagged(tag.clone()),
            muted,
            options.combined,
            &options.excludes,
        )?;
        routes.push((svc.clone(), tag, Arc::new(route)));
    }

    let mut pids = Vec::new();
    let mut waiters = Vec::new();
    let mut outcomes = Vec::new();

    for (svc, tag, route) in routes {
        match shell_command(&svc.command, session_dir).spawn() {
            Ok(mut child) => {
                if let Some(pid) = child.id() {
                    pids.push(pid);
                }
                waiters.push(tokio::spawn(async move {
                    let out_task = child
                        .stdout
                        .take()
                        .map(|out| tokio::spawn(pump_lines(out, route.clone(), StreamKind::Stdout)));
                    let err_task = child
                        .stderr
                        .take()
                        .map(|err| tokio::spawn(pump_lines(err, route.clone(), StreamKind::Stderr)));

                    let status = match child.wait().await {
                        Ok(status) => status,
                        Err(e) => {
                            eprintln!("{} wait failed: {}", tag, e);
                            return ServiceOutcome {
                                name: svc.name,
                                status: ServiceStatus::Failed(e.to_string()),
                            };
                        }
                    };

                    if let Some(task) = out_task {
                        let _ = task.await;
                    }
                    if let Some(task) = err_task {
                        let _ = task.await;
                    }

                    let code = status.code().unwrap_or(0);
                    if code != 0 {
                        println!("{} exited with code {}", tag, code);
                    }
                    ServiceOutcome {
                        name: svc.name,
                        status: ServiceStatus::Exited(code),
                    }
                }));
            }
            Err(e) => {
                eprintln!("{} Failed to start: {}", tag, e);
                outcomes.push(ServiceOutcome {
                    name: svc.name.clone(),
                    status: ServiceStatus::Failed(e.to_string()),
                });
            }
        }
    }

    if let Err(e) = signals::forward_signals(pids) {
        warn!("Failed to install signal handlers: {}", e);
    }

    for result in join_all(waiters).await {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => warn!("Service task panicked: {}", e),
        }
    }

    Ok(outcomes)
}
