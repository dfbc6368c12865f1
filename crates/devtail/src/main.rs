//! devtail CLI - unified dev-log sessions for terminals and browsers

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "devtail={level},devtail_core={level},devtail_logs={level},devtail_runner={level},devtail_ingest={level}",
                    level = log_level
                )
                .into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let result = match &cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Wrap { name, command } => match commands::wrap::execute(&cli, name, command).await
        {
            // The wrapper's own exit code mirrors the child's
            Ok(code) => std::process::exit(code),
            Err(e) => Err(e),
        },
        Commands::Run { services } => commands::run::execute(&cli, services).await,
        Commands::Serve(args) => commands::serve::execute(&cli, args).await,
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
