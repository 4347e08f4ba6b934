//! CLI command definitions.

pub mod items;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the cloudfns handlers.
#[derive(Debug, Parser)]
#[command(name = "cloudfns-client")]
#[command(about = "CLI client for the cloudfns handlers", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "CLOUDFNS_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Item management.
    Items(items::ItemsCommand),
    /// Run the outbound connectivity check.
    Connectivity,
    /// Run the row-level security demo.
    Rls,
    /// Check that the server is alive.
    Livez,
}
