//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod categories;
pub mod config;
pub mod lookup;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Air quality at an address or coordinate pair
#[derive(Parser)]
#[command(name = "smog-radar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up air quality near an address or coordinates
    Lookup(lookup::LookupArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show the AQI interpretation table
    Categories(categories::CategoriesArgs),
}

/// Initialize logging to stderr
///
/// `RUST_LOG` overrides the given default directive.
pub fn init_logging(default: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup(args) => lookup::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Categories(args) => categories::run(args),
    }
}
