//! Subcommand arguments and handlers

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use dtoforge_codegen::{
    Generator, GeneratorConfig, artifact_file_name, lint_schema, render_artifact,
};
use dtoforge_ir::{SchemaStats, load_schema};
use std::path::PathBuf;

use crate::ArtifactChoice;
use crate::output;
use crate::sources::collect_schema_files;

// ============================================================================
// generate
// ============================================================================

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Schema files or directories containing `*.json` schemas
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (overrides the config file)
    #[arg(short, long, env = "DTOFORGE_OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,

    /// Generator configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Artifacts to write (overrides the config file)
    #[arg(short, long, value_enum)]
    pub artifact: Option<ArtifactChoice>,
}

impl GenerateArgs {
    /// Merge the config file, if any, with command-line overrides
    pub fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(dir) = &self.output {
            config.output_dir = dir.clone();
        }
        if self.force {
            config.overwrite = true;
        }
        if let Some(choice) = self.artifact {
            config.artifacts = choice.artifacts();
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn generate(args: GenerateArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let files = collect_schema_files(&args.inputs)?;
    if files.is_empty() {
        bail!("no schema files found");
    }

    let generator = Generator::new(config);
    let mut written_total = 0;
    let mut warning_total = 0;

    for path in &files {
        let schema = load_schema(path)?;
        let (generated, written) = generator
            .generate_and_write(&schema)
            .with_context(|| format!("generating {}", path.display()))?;

        output::heading(&format!("{} ({})", generated.name, path.display()));
        for file in &written {
            output::written(file);
        }
        for warning in &generated.warnings {
            output::warning(warning);
        }

        written_total += written.len();
        warning_total += generated.warnings.len();
    }

    output::success(&format!(
        "Generated {} file(s) from {} schema(s) into {}{}",
        written_total,
        files.len(),
        generator.config().output_dir.display(),
        if warning_total > 0 {
            format!(" with {} warning(s)", warning_total)
        } else {
            String::new()
        }
    ));
    Ok(())
}

// ============================================================================
// preview
// ============================================================================

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Schema file
    pub schema: PathBuf,

    /// Artifacts to print
    #[arg(short, long, value_enum, default_value_t = ArtifactChoice::Both)]
    pub artifact: ArtifactChoice,
}

pub fn preview(args: PreviewArgs) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    let artifacts = args.artifact.artifacts();
    let labelled = artifacts.len() > 1;

    for (position, artifact) in artifacts.into_iter().enumerate() {
        if labelled {
            if position > 0 {
                println!();
            }
            let label = format!("// {}", artifact_file_name(&schema, artifact));
            println!("{}", label.dimmed());
        }
        println!("{}", render_artifact(&schema, artifact));
    }
    Ok(())
}

// ============================================================================
// info
// ============================================================================

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Schema file
    pub schema: PathBuf,

    /// Print statistics as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn info(args: InfoArgs) -> Result<()> {
    let schema = load_schema(&args.schema)?;
    let stats = SchemaStats::of(&schema);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    output::heading(&format!("Schema {}", schema.name));
    output::row("Fields", stats.total_fields);
    output::row("Required", stats.required_fields);
    output::row("Unique", stats.unique_fields);
    output::row("Enums", stats.enum_fields);
    output::row("All fields", stats.all_fields);
    output::row("Max depth", stats.max_depth);
    output::row("Indexes", schema.indexes.len());

    let warnings = lint_schema(&schema);
    if warnings.is_empty() {
        output::success("No issues found");
    } else {
        for warning in &warnings {
            output::warning(&warning.to_string());
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
