//! Error types for DTO Forge
//!
//! Rendering and tree edits are total and never fail. Errors only arise at
//! the boundary: reading schema descriptions, parsing configuration and
//! writing generated artifacts.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for DTO Forge
#[derive(Debug, Error)]
pub enum ForgeError {
    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Schema description not found
    #[error("Schema not found at path: {0}")]
    SchemaNotFound(PathBuf),

    // ========================================================================
    // Output Errors
    // ========================================================================
    /// Output file already exists and overwriting is disabled
    #[error("Output file already exists: {0} (use overwrite to replace it)")]
    OutputExists(PathBuf),

    /// Invalid output path
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(PathBuf),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Invalid schema file format
    #[error("Invalid schema format: {0}")]
    InvalidSchemaFormat(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ForgeError {
    /// Create an invalid configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        ForgeError::InvalidConfig(msg.into())
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, ForgeError::SchemaNotFound(_))
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ForgeError::FileRead { .. }
                | ForgeError::FileWrite { .. }
                | ForgeError::DirectoryCreate { .. }
                | ForgeError::OutputExists(_)
        )
    }
}

/// Result type alias using ForgeError
pub type ForgeResult<T> = Result<T, ForgeError>;

// ============================================================================
// Tests
// ============================================================================
