//! Per-line fan-out: own log file, combined log, terminal echo

use devtail_core::{Result, COMBINED_LOG};
use devtail_logs::{ExcludeFilter, LogFile};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::warn;

/// Which real terminal stream a captured line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

/// Terminal echo style: `wrap` echoes lines verbatim, `run` prefixes each
/// line with the service's colorized tag.
pub enum Echo {
    Raw,
    Tagged(String),
}

/// Routes one service's output lines to their destinations.
pub struct LineRoute {
    name: String,
    echo: Echo,
    muted: bool,
    filter: ExcludeFilter,
    own: LogFile,
    combined: Option<LogFile>,
}

impl LineRoute {
    pub fn open(
        session_dir: &Path,
        name: &str,
        echo: Echo,
        muted: bool,
        combined: bool,
        excludes: &[String],
    ) -> Result<Self> {
        let own = LogFile::append(session_dir.join(format!("{}.log", name)))?;
        let combined = if combined {
            Some(LogFile::append(session_dir.join(COMBINED_LOG))?)
        } else {
            None
        };
        Ok(Self {
            name: name.to_string(),
            echo,
            muted,
            filter: ExcludeFilter::new(excludes),
            own,
            combined,
        })
    }

    pub fn own_log_path(&self) -> &Path {
        self.own.path()
    }

    /// Fan one complete line out. Excluded lines are dropped from every
    /// destination; a muted service still reaches its own log file but
    /// neither the combined log nor the terminal.
    pub fn handle(&self, kind: StreamKind, line: &str) -> Result<()> {
        if self.filter.matches(line) {
            return Ok(());
        }

        self.own.write_line(line)?;

        if self.muted {
            return Ok(());
        }

        if let Some(combined) = &self.combined {
            combined.write_line(&format!("[{}] {}", self.name, line))?;
        }

        match (&self.echo, kind) {
            (Echo::Raw, StreamKind::Stdout) => println!("{}", line),
            (Echo::Raw, StreamKind::Stderr) => eprintln!("{}", line),
            (Echo::Tagged(tag), StreamKind::Stdout) => println!("{} {}", tag, line),
            (Echo::Tagged(tag), StreamKind::Stderr) => eprintln!("{} {}", tag, line),
        }
        Ok(())
    }
}

/// Drain a child's stdout or stderr line by line into the route until EOF.
pub async fn pump_lines<R>(reader: R, route: Arc<LineRoute>, kind: StreamKind)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if let Err(e) = route.handle(kind, &line) {
            warn!("Failed to write log line for {}: {}", route.name, e);
        }
    }
}
