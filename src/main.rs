use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod cli;
mod config;
mod error;
mod orchestrator;
mod output;
mod persona;
mod prompt;
mod provider;
mod runner;
mod synthesis;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("persona_reflect=debug")
    } else {
        EnvFilter::new("persona_reflect=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Reflect(args) => cli::reflect::execute(args).await,
        Commands::Plan(args) => cli::plan::execute(args).await,
        Commands::Personas => cli::personas::execute(),
        Commands::Schema => cli::schema::execute(),
    }
}
