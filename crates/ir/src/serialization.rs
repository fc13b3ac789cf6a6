//! Loading schema descriptions
//!
//! Schemas are read from JSON documents. A document is either a bare schema
//! object or a wrapper `{ "schema": { ... } }` as written by the editor's
//! export.

use crate::schema::Schema;
use dtoforge_core::{ForgeError, ForgeResult, Persistable};
use serde_json::Value;
use std::path::Path;

// ============================================================================
// Constants
// ============================================================================

/// File extension of schema descriptions
pub const SCHEMA_EXTENSION: &str = "json";

// ============================================================================
// Load Functions
// ============================================================================

/// Load a schema from a file
///
/// # Example
///
/// ```rust,ignore
/// use dtoforge_ir::load_schema;
///
/// let schema = load_schema("schemas/user.json").unwrap();
/// println!("Loaded schema: {}", schema.name);
/// ```
pub fn load_schema(path: impl AsRef<Path>) -> ForgeResult<Schema> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ForgeError::SchemaNotFound(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path).map_err(|e| ForgeError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let schema = load_schema_from_string(&json).map_err(|e| match e {
        ForgeError::JsonSerialization(je) => ForgeError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid schema file format: {}", je),
        },
        other => other,
    })?;

    tracing::debug!(
        path = %path.display(),
        schema = %schema.name,
        fields = schema.fields.len(),
        "loaded schema"
    );
    Ok(schema)
}

/// Load a schema from a JSON string
pub fn load_schema_from_string(json: &str) -> ForgeResult<Schema> {
    let value = match serde_json::from_str(json)? {
        Value::Object(mut document) if document.len() == 1 && document.contains_key("schema") => {
            document.remove("schema").unwrap_or(Value::Null)
        }
        value => value,
    };

    if !value.is_object() {
        return Err(ForgeError::InvalidSchemaFormat(
            "expected a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Check whether a path looks like a schema description
pub fn is_schema_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    path.is_file() && Schema::has_extension(path)
}

// ============================================================================
// Tests
// ============================================================================
