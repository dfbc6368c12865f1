//! Interrupt/termination forwarding to child processes

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::signal::unix::{signal, SignalKind};
use tracing::debug;

/// Install handlers that forward SIGINT and SIGTERM to every child in
/// `pids`. Delivery is fire-and-forget: a child that already exited (or
/// ignores the signal) is left alone, and the wrapper exits once its
/// children do.
pub fn forward_signals(pids: Vec<u32>) -> std::io::Result<tokio::task::JoinHandle<()>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        loop {
            let sig = tokio::select! {
                _ = sigint.recv() => Signal::SIGINT,
                _ = sigterm.recv() => Signal::SIGTERM,
            };
            debug!("Forwarding {:?} to {} child(ren)", sig, pids.len());
            for pid in &pids {
                let _ = kill(Pid::from_raw(*pid as i32), sig);
            }
        }
    }))
}
