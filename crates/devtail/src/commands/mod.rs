//! CLI command implementations

pub mod init;
pub mod run;
pub mod serve;
pub mod wrap;

use anyhow::Result;
use devtail_core::{ConfigFile, Options};
use devtail_runner::RunOptions;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::Cli;

/// Options resolved from the defaults, an optional project config file, and
/// CLI flags (flags win).
pub(crate) struct Resolved {
    pub options: Options,
    pub run_options: RunOptions,
    pub project_root: PathBuf,
}

pub(crate) fn resolve(cli: &Cli) -> Result<Resolved> {
    let project_root = std::env::current_dir()?;

    let mut options = match ConfigFile::find_and_load(&project_root)? {
        Some((config, path)) => {
            debug!("Loaded config from {}", path.display());
            config.into_options()
        }
        None => Options::default(),
    };

    if let Some(dir) = &cli.log_dir {
        options.log_dir = dir.clone();
    }
    if let Some(max) = cli.max_sessions {
        options.max_sessions = max;
    }
    if !cli.exclude.is_empty() {
        options.excludes = cli.exclude.clone();
    }

    let run_options = RunOptions {
        combined: !cli.no_combined,
        excludes: options.excludes.clone(),
        mutes: cli.mute.clone(),
    };

    Ok(Resolved {
        options,
        run_options,
        project_root,
    })
}
