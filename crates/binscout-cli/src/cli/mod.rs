//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            if cli.verbose {
                "binscout_core=debug,binscout_backends=debug".into()
            } else {
                "warn".into()
            }
        });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration; flags win over config, config over defaults.
    // A broken or missing config file never blocks a scan.
    let config = match Config::load() {
        Ok(config) => config,
        Err(error) => {
            tracing::warn!(%error, "ignoring unreadable config file");
            Config::default()
        }
    };
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Table);

    let ctx = commands::Context {
        output_format,
        verbose: cli.verbose,
        config,
    };

    match cli.command {
        Commands::Scan(args) => commands::scan::execute(ctx, args).await,
        Commands::List(args) => commands::list::execute(ctx, args).await,
        Commands::Doctor => commands::doctor::execute(ctx).await,
    }
}
