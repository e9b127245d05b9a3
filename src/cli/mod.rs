use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mcpscout")]
#[command(author, version, about = "Classify project trees and generate MCP server settings")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect projects and workspace topology under a directory
    Detect {
        /// Directory to scan (default: current directory)
        path: Option<PathBuf>,

        /// Print the detection result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run detection and write .mcpscout/settings.json
    Init {
        /// Directory to initialize (default: current directory)
        path: Option<PathBuf>,

        /// Overwrite existing settings
        #[arg(short, long)]
        force: bool,
    },

    /// Show repository remotes for each detected project
    Repos {
        /// Directory to scan (default: current directory)
        path: Option<PathBuf>,

        /// Clone protocol for regenerated URLs: https or ssh
        #[arg(short, long, default_value = "https")]
        protocol: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
