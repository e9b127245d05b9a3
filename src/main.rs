use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use mcpscout::cli::{Cli, Commands};
use mcpscout::config::Config;
use mcpscout::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration lives next to the tree being scanned; default to the
    // current directory for logging setup before arguments are parsed.
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = Config::load(&cwd).unwrap_or_default();

    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&config.logging, &cwd)?;

    tracing::debug!("mcpscout starting up");

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect { path, json } => {
            mcpscout::commands::detect::run(path, json).await?;
        }
        Commands::Init { path, force } => {
            mcpscout::commands::init::run(path, force).await?;
        }
        Commands::Repos {
            path,
            protocol,
            json,
        } => {
            mcpscout::commands::repos::run(path, protocol, json).await?;
        }
    }

    Ok(())
}
