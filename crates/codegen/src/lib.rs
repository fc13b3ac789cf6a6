//! # DTO Forge Codegen
//!
//! Code generation engine for DTO Forge.
//!
//! This crate renders a [`Schema`](dtoforge_ir::Schema) into two TypeScript
//! documents and writes them to disk.
//!
//! ## Features
//!
//! - **DTO Generation**: base, schema-bound, create, update and populated types
//! - **Model Generation**: Mongoose schema declaration and model binding
//! - **Lint**: review hints for names, enums, nesting and indexes
//!

// ============================================================================
// Modules
// ============================================================================

pub mod generator;
pub mod lint;
pub mod mongoose;
pub mod naming;
pub mod typescript;

// ============================================================================
// Re-exports
// ============================================================================

pub use generator::{
    Generator, RenderedArtifacts, artifact_file_name, generate, render, render_artifact,
};
pub use lint::{LintWarning, lint_schema};
pub use mongoose::{render_storage_artifact, storage_field_def, storage_type_of};
pub use typescript::{MAX_NESTING_DEPTH, render_type_artifact, type_of};

use dtoforge_core::{ForgeError, ForgeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// Artifact
// ============================================================================

/// The documents rendered for a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Artifact {
    /// `<name>.dto.ts`
    Dto,
    /// `<name>.model.ts`
    Model,
}

impl Artifact {
    /// Every artifact, in output order
    pub const ALL: [Artifact; 2] = [Artifact::Dto, Artifact::Model];

    /// Configuration token
    pub fn as_str(&self) -> &'static str {
        match self {
            Artifact::Dto => "dto",
            Artifact::Model => "model",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the code generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Output directory for generated files
    pub output_dir: PathBuf,

    /// Whether to overwrite existing files
    pub overwrite: bool,

    /// Artifacts to render
    pub artifacts: Vec<Artifact>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./generated"),
            overwrite: false,
            artifacts: Artifact::ALL.to_vec(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Allow overwriting existing files
    pub fn allow_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Restrict output to the given artifacts
    pub fn with_artifacts(mut self, artifacts: impl IntoIterator<Item = Artifact>) -> Self {
        self.artifacts = artifacts.into_iter().collect();
        self
    }

    /// Parse a TOML configuration
    ///
    /// ```toml
    /// output_dir = "src/generated"
    /// overwrite = true
    /// artifacts = ["dto", "model"]
    /// ```
    pub fn from_toml_str(source: &str) -> ForgeResult<Self> {
        let config: GeneratorConfig =
            toml::from_str(source).map_err(|e| ForgeError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load(path: impl AsRef<Path>) -> ForgeResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ForgeError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Check the configuration for values the generator cannot honour
    pub fn validate(&self) -> ForgeResult<()> {
        if self.artifacts.is_empty() {
            return Err(ForgeError::config("no artifacts selected"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ForgeError::config("output_dir is empty"));
        }
        Ok(())
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// Represents a single generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path from output directory
    pub path: PathBuf,

    /// File content
    pub content: String,

    /// Which artifact this file holds
    pub artifact: Artifact,
}

impl GeneratedFile {
    /// Create a new generated file
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, artifact: Artifact) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            artifact,
        }
    }
}

// ============================================================================
// GeneratedSchema
// ============================================================================

/// All generated files for one schema
#[derive(Debug, Clone, Default)]
pub struct GeneratedSchema {
    /// Schema name
    pub name: String,

    /// All generated files
    pub files: Vec<GeneratedFile>,

    /// Review hints raised during generation
    pub warnings: Vec<String>,
}

impl GeneratedSchema {
    /// Create an empty result
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add a file
    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Get the number of files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get the file holding an artifact
    pub fn file(&self, artifact: Artifact) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.artifact == artifact)
    }

    /// Write all files below `base_dir`.
    ///
    /// Nothing is written if any target exists and `overwrite` is false.
    pub fn write_to_disk(
        &self,
        base_dir: impl AsRef<Path>,
        overwrite: bool,
    ) -> ForgeResult<Vec<PathBuf>> {
        let base_dir = base_dir.as_ref();
        if base_dir.is_file() {
            return Err(ForgeError::InvalidOutputPath(base_dir.to_path_buf()));
        }

        let targets: Vec<PathBuf> = self.files.iter().map(|f| base_dir.join(&f.path)).collect();
        if !overwrite {
            if let Some(existing) = targets.iter().find(|p| p.exists()) {
                return Err(ForgeError::OutputExists(existing.clone()));
            }
        }

        for (file, full_path) in self.files.iter().zip(&targets) {
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ForgeError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }

            std::fs::write(full_path, &file.content).map_err(|e| ForgeError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;
            tracing::debug!(
                path = %full_path.display(),
                bytes = file.content.len(),
                "wrote artifact"
            );
        }

        Ok(targets)
    }
}

/// Join the non-empty sections of an artifact with a blank line
pub(crate) fn join_sections<I>(sections: I) -> String
where
    I: IntoIterator<Item = String>,
{
    sections
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./generated"));
        assert!(!config.overwrite);
        assert_eq!(config.artifacts, vec![Artifact::Dto, Artifact::Model]);
    }

    #[test]
    fn test_generator_config_builder() {
        let config = GeneratorConfig::new()
            .with_output_dir("/tmp/output")
            .with_artifacts([Artifact::Dto])
            .allow_overwrite();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/output"));
        assert_eq!(config.artifacts, vec![Artifact::Dto]);
        assert!(config.overwrite);
    }

    #[test]
    fn test_config_from_toml() {
        let config = GeneratorConfig::from_toml_str(
            "output_dir = \"src/generated\"\noverwrite = true\nartifacts = [\"model\"]\n",
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("src/generated"));
        assert!(config.overwrite);
        assert_eq!(config.artifacts, vec![Artifact::Model]);

        let partial = GeneratorConfig::from_toml_str("overwrite = true").unwrap();
        assert_eq!(partial.artifacts, Artifact::ALL.to_vec());
    }

    #[test]
    fn test_config_rejects_bad_input() {
        let err = GeneratorConfig::from_toml_str("artifacts = [\"sql\"]").unwrap_err();
        assert!(matches!(err, ForgeError::InvalidConfig(_)));

        let err = GeneratorConfig::from_toml_str("colour = true").unwrap_err();
        assert!(matches!(err, ForgeError::InvalidConfig(_)));

        let err = GeneratorConfig::from_toml_str("artifacts = []").unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: no artifacts selected");
    }

    #[test]
    fn test_config_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dtoforge.toml");
        std::fs::write(&path, "output_dir = \"out\"").unwrap();

        let config = GeneratorConfig::load(&path).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));

        let missing = temp_dir.path().join("missing.toml");
        let err = GeneratorConfig::load(missing).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_artifact_tokens() {
        assert_eq!(Artifact::Dto.to_string(), "dto");
        assert_eq!(Artifact::Model.as_str(), "model");
    }

    #[test]
    fn test_join_sections_drops_empty() {
        let joined = join_sections(["a".to_string(), String::new(), "b".to_string()]);
        assert_eq!(joined, "a\n\nb");
    }

    #[test]
    fn test_generated_schema() {
        let mut output = GeneratedSchema::new("User");
        output.add_file(GeneratedFile::new("user.dto.ts", "type A = {};\n", Artifact::Dto));
        output.add_warning("User.#1: field has no name");

        assert_eq!(output.file_count(), 1);
        assert!(output.has_warnings());
        assert!(output.file(Artifact::Dto).is_some());
        assert!(output.file(Artifact::Model).is_none());
    }

    #[test]
    fn test_write_to_disk_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let mut output = GeneratedSchema::new("User");
        output.add_file(GeneratedFile::new("user.dto.ts", "first\n", Artifact::Dto));
        output.add_file(GeneratedFile::new("user.model.ts", "first\n", Artifact::Model));

        std::fs::write(temp_dir.path().join("user.model.ts"), "keep\n").unwrap();

        let err = output.write_to_disk(temp_dir.path(), false).unwrap_err();
        assert!(matches!(err, ForgeError::OutputExists(_)));
        assert!(!temp_dir.path().join("user.dto.ts").exists());

        let written = output.write_to_disk(temp_dir.path(), true).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("user.model.ts")).unwrap(),
            "first\n"
        );
    }

    #[test]
    fn test_write_to_file_path_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("occupied");
        std::fs::write(&file, "").unwrap();

        let err = GeneratedSchema::new("User").write_to_disk(&file, true).unwrap_err();
        assert!(matches!(err, ForgeError::InvalidOutputPath(_)));
    }
}
