//! DTO Forge
//!
//! TypeScript DTO and Mongoose schema generator.
//!
//! This is the main entry point for the command-line application.

use dtoforge_cli::Cli;
use dtoforge_cli::clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(dtoforge_cli::log_level(cli.verbose)));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = dtoforge_cli::VERSION, "starting dtoforge");
    dtoforge_cli::run(cli)
}
