//! # Code Generator Orchestrator
//!
//! The `Generator` is the top-level entry point for code generation. It takes a
//! [`Schema`] and a [`GeneratorConfig`], renders the selected artifacts and
//! collects review hints into a [`GeneratedSchema`].
//!
//! ## Pipeline
//!
//! ```text
//! Schema + GeneratorConfig
//!         │
//!         ├──► typescript::render_type_artifact()    → <name>.dto.ts
//!         ├──► mongoose::render_storage_artifact()   → <name>.model.ts
//!         ├──► lint::lint_schema()                   → warnings
//!         │
//!         ▼
//!   GeneratedSchema { files, warnings }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dtoforge_codegen::{Generator, GeneratorConfig};
//! use dtoforge_ir::load_schema;
//!
//! let schema = load_schema("schemas/user.json")?;
//! let config = GeneratorConfig::default().with_output_dir("src/generated");
//!
//! let result = Generator::new(config).generate_and_write(&schema)?;
//! println!("Generated {} files", result.file_count());
//! ```

use dtoforge_core::ForgeResult;
use dtoforge_ir::Schema;
use std::path::PathBuf;

use crate::lint::lint_schema;
use crate::mongoose::render_storage_artifact;
use crate::naming::{dto_file_name, model_file_name};
use crate::typescript::render_type_artifact;
use crate::{Artifact, GeneratedFile, GeneratedSchema, GeneratorConfig};

// ============================================================================
// Rendering
// ============================================================================

/// Both artifacts of a schema, as displayed by the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    /// Type-definition document
    pub dto: String,
    /// Storage schema document
    pub model: String,
}

impl RenderedArtifacts {
    /// Text of one artifact
    pub fn get(&self, artifact: Artifact) -> &str {
        match artifact {
            Artifact::Dto => &self.dto,
            Artifact::Model => &self.model,
        }
    }
}

/// Render both artifacts of a schema
pub fn render(schema: &Schema) -> RenderedArtifacts {
    RenderedArtifacts {
        dto: render_artifact(schema, Artifact::Dto),
        model: render_artifact(schema, Artifact::Model),
    }
}

/// Render one artifact of a schema
pub fn render_artifact(schema: &Schema, artifact: Artifact) -> String {
    match artifact {
        Artifact::Dto => render_type_artifact(schema),
        Artifact::Model => render_storage_artifact(schema),
    }
}

/// File name an artifact is written under
pub fn artifact_file_name(schema: &Schema, artifact: Artifact) -> String {
    match artifact {
        Artifact::Dto => dto_file_name(&schema.name),
        Artifact::Model => model_file_name(&schema.name),
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Top-level code generator.
///
/// The `Generator` is stateless aside from its configuration.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Create a new generator with the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Create a generator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: GeneratorConfig) {
        self.config = config;
    }

    /// Render the configured artifacts of a schema.
    ///
    /// Rendering is total. Problems with the schema are reported as
    /// warnings on the result, never as errors.
    pub fn generate(&self, schema: &Schema) -> GeneratedSchema {
        let mut output = GeneratedSchema::new(&schema.name);

        for &artifact in &self.config.artifacts {
            let mut content = render_artifact(schema, artifact);
            content.push('\n');
            output.add_file(GeneratedFile::new(
                artifact_file_name(schema, artifact),
                content,
                artifact,
            ));
        }

        for warning in lint_schema(schema) {
            tracing::warn!(schema = %schema.name, "{}", warning);
            output.add_warning(warning.to_string());
        }

        tracing::info!(
            files = output.file_count(),
            warnings = output.warnings.len(),
            schema = %schema.name,
            "code generation complete",
        );

        output
    }

    /// Generate and write all files to the configured output directory.
    ///
    /// Returns the generated schema together with the written paths.
    pub fn generate_and_write(
        &self,
        schema: &Schema,
    ) -> ForgeResult<(GeneratedSchema, Vec<PathBuf>)> {
        let output = self.generate(schema);
        let written = output.write_to_disk(&self.config.output_dir, self.config.overwrite)?;
        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            files = written.len(),
            "files written to disk",
        );
        Ok((output, written))
    }
}

/// Generate with the default configuration.
pub fn generate(schema: &Schema) -> GeneratedSchema {
    Generator::with_defaults().generate(schema)
}

// ============================================================================
// Tests
// ============================================================================
