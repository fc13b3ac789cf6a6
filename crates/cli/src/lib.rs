//! # DTO Forge CLI
//!
//! Command-line interface for DTO Forge.
//!
//! This crate loads schema descriptions from JSON and drives the generators
//! from the command line.
//!
//! ## Commands
//!
//! - `generate` - Write `<name>.dto.ts` and `<name>.model.ts` for each schema
//! - `preview` - Print the rendered artifacts to stdout
//! - `info` - Display field statistics and review hints for a schema
//!

pub mod commands;
pub mod output;
pub mod sources;

// Re-export dependencies for use in main.rs
pub use clap;
pub use dtoforge_codegen;
pub use dtoforge_core;
pub use dtoforge_ir;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use dtoforge_codegen::Artifact;

use commands::{GenerateArgs, InfoArgs, PreviewArgs};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

/// Generate TypeScript DTOs and Mongoose models from schema descriptions
#[derive(Parser, Debug)]
#[command(name = "dtoforge", version, about)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate DTO and model files from schema descriptions
    Generate(GenerateArgs),

    /// Print the rendered artifacts of a schema
    Preview(PreviewArgs),

    /// Show field statistics and review hints for a schema
    Info(InfoArgs),
}

/// Which artifacts to render
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ArtifactChoice {
    /// The TypeScript DTO document only
    Dto,
    /// The Mongoose model document only
    Model,
    /// Both documents
    #[default]
    Both,
}

impl ArtifactChoice {
    /// The artifacts this choice selects, in output order
    pub fn artifacts(self) -> Vec<Artifact> {
        match self {
            ArtifactChoice::Dto => vec![Artifact::Dto],
            ArtifactChoice::Model => vec![Artifact::Model],
            ArtifactChoice::Both => Artifact::ALL.to_vec(),
        }
    }
}

/// Default log filter for a `-v` count
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Execute a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Generate(args) => commands::generate(args),
        Commands::Preview(args) => commands::preview(args),
        Commands::Info(args) => commands::info(args),
    }
}

// ============================================================================
// Tests
// ============================================================================
