//! # DTO Forge IR (Intermediate Representation)
//!
//! This crate provides the data model the generators work on: a `Schema`
//! owning a tree of `Field`s, together with the structural edits an editor
//! applies to that tree.
//!
//! ## Core Concepts
//!
//! - **Field**: A named, typed entry, possibly owning nested fields
//! - **Schema**: The root aggregate of fields plus storage options
//! - **FieldPath**: The ids leading from the root to a nested sequence
//! - **FieldPatch**: A partial update merged into one field
//!

// Module declarations
pub mod edit;
pub mod field;
pub mod schema;
pub mod serialization;
pub mod stats;

// Re-export commonly used types at crate root
pub use edit::{FieldPath, apply_insert, apply_remove, apply_update, find_by_id};
pub use field::{EnumValue, Field, FieldPatch, RuleValue, ValidationRule, non_empty};
pub use schema::{DEFAULT_SCHEMA_NAME, Hooks, IndexDefinition, Schema, SchemaOptions};
pub use serialization::{is_schema_file, load_schema, load_schema_from_string};
pub use stats::SchemaStats;

// Re-export core types that are commonly used with IR
pub use dtoforge_core::{FieldId, FieldType, ForgeError, ForgeResult, ValidationKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        EnumValue, Field, FieldPatch, FieldPath, FieldType, ForgeError, ForgeResult,
        IndexDefinition, Schema, SchemaOptions, ValidationKind, ValidationRule,
    };
}
