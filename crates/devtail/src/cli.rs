//! CLI argument definitions

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "devtail")]
#[command(version, about = "Pipe dev server output and browser console logs into one session directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log directory relative to the project root
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// Maximum number of sessions to keep
    #[arg(long, global = true)]
    pub max_sessions: Option<usize>,

    /// Don't write the interleaved combined.log
    #[arg(long, global = true)]
    pub no_combined: bool,

    /// Exclude lines matching pattern (repeatable; substring or /regex/flags)
    #[arg(long, global = true)]
    pub exclude: Vec<String>,

    /// Mute a service from terminal and combined.log (repeatable; still logs to <name>.log)
    #[arg(long, global = true)]
    pub mute: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new log session and print its directory
    Init,

    /// Wrap a command, piping its output to <name>.log in the session
    Wrap {
        /// Service name (its log file becomes <name>.log)
        name: String,

        /// Command to run, given after `--`
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Run multiple services concurrently ("name: command" per argument)
    Run {
        /// Service definitions, e.g. "api: uv run server"
        #[arg(required = true)]
        services: Vec<String>,
    },

    /// Host the browser log ingestion endpoint
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:8787")]
    pub addr: String,
}
