use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Ark Vtxo Tree Analyser
#[derive(Parser)]
#[command(name = "arktree")]
#[command(about = "Generate Ark vtxo trees and analyse their branches")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a vtxo tree with the given number of leaves and report branch statistics
    Generate(commands::generate::GenerateCommand),
}

pub fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(command) => command.run(),
    }
}
