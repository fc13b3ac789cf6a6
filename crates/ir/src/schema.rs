//! Schema definitions
//!
//! A `Schema` is the root aggregate handed to the generators: a named entity
//! with its field tree and the generation options of the storage artifact.

use crate::field::Field;
use crate::serialization::SCHEMA_EXTENSION;
use dtoforge_core::{FieldType, Persistable};
use serde::{Deserialize, Serialize};

/// Name given to a schema that does not declare one
pub const DEFAULT_SCHEMA_NAME: &str = "User";

// ============================================================================
// Schema
// ============================================================================

/// Root aggregate of fields plus generation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Entity name, used to derive every generated identifier
    pub name: String,

    /// Top-level fields, in declaration order
    pub fields: Vec<Field>,

    /// Extra import lines emitted verbatim in the type artifact
    pub imports: Vec<String>,

    /// Storage schema options
    pub options: SchemaOptions,

    /// Compound and single-field indexes
    pub indexes: Vec<IndexDefinition>,

    /// Lifecycle hooks to stub
    pub hooks: Hooks,

    /// Virtual property names to stub
    pub virtuals: Vec<String>,

    /// Instance method names to stub
    pub methods: Vec<String>,

    /// Static method names to stub
    pub statics: Vec<String>,
}

impl Schema {
    /// Create an empty schema with default options
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Append a top-level field
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a custom import line
    pub fn with_import(mut self, line: impl Into<String>) -> Self {
        self.imports.push(line.into());
        self
    }

    /// Append an index definition
    pub fn with_index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    /// Replace the storage options
    pub fn with_options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a virtual property stub
    pub fn with_virtual(mut self, name: impl Into<String>) -> Self {
        self.virtuals.push(name.into());
        self
    }

    /// Add an instance method stub
    pub fn with_method(mut self, name: impl Into<String>) -> Self {
        self.methods.push(name.into());
        self
    }

    /// Add a static method stub
    pub fn with_static(mut self, name: impl Into<String>) -> Self {
        self.statics.push(name.into());
        self
    }

    /// Add a pre hook stub
    pub fn with_pre_hook(mut self, event: impl Into<String>) -> Self {
        self.hooks.pre.push(event.into());
        self
    }

    /// Add a post hook stub
    pub fn with_post_hook(mut self, event: impl Into<String>) -> Self {
        self.hooks.post.push(event.into());
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Top-level enum fields, in declaration order
    pub fn enum_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|f| f.field_type == FieldType::Enum)
    }

    /// Look up a top-level field by name
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Custom import lines that carry content
    pub fn custom_imports(&self) -> impl Iterator<Item = &str> {
        self.imports
            .iter()
            .map(String::as_str)
            .filter(|line| !line.trim().is_empty())
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCHEMA_NAME.to_string(),
            fields: Vec::new(),
            imports: Vec::new(),
            options: SchemaOptions::default(),
            indexes: Vec::new(),
            hooks: Hooks::default(),
            virtuals: Vec::new(),
            methods: Vec::new(),
            statics: Vec::new(),
        }
    }
}

impl Persistable for Schema {
    fn file_extension() -> &'static str {
        SCHEMA_EXTENSION
    }
}

// ============================================================================
// Options
// ============================================================================

/// Options passed to the storage schema constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaOptions {
    /// Maintain createdAt / updatedAt
    pub timestamps: bool,

    /// Keep the __v version key
    pub version_key: bool,

    /// Reject paths not declared in the schema
    pub strict: bool,

    /// Validate documents before saving
    pub validate_before_save: bool,

    /// Build indexes automatically
    pub auto_index: bool,

    /// Explicit collection name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// Discriminator key for inheritance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator_key: Option<String>,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            timestamps: true,
            version_key: false,
            strict: true,
            validate_before_save: true,
            auto_index: true,
            collection: None,
            discriminator_key: None,
        }
    }
}

impl SchemaOptions {
    /// Set the collection name
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set the discriminator key
    pub fn with_discriminator_key(mut self, key: impl Into<String>) -> Self {
        self.discriminator_key = Some(key.into());
        self
    }
}

// ============================================================================
// Indexes
// ============================================================================

/// An index over one or more field paths
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexDefinition {
    /// Indexed field paths, ascending
    pub fields: Vec<String>,

    /// Unique index
    pub unique: bool,

    /// Sparse index
    pub sparse: bool,

    /// Build in the background
    pub background: bool,
}

impl IndexDefinition {
    /// Create an index over the given field paths
    pub fn new<S: Into<String>>(fields: impl IntoIterator<Item = S>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Mark the index unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark the index sparse
    pub fn sparse(mut self) -> Self {
        self.sparse = true;
        self
    }

    /// Build the index in the background
    pub fn background(mut self) -> Self {
        self.background = true;
        self
    }

    /// Whether any index option is set
    pub fn has_options(&self) -> bool {
        self.unique || self.sparse || self.background
    }
}

// ============================================================================
// Hooks
// ============================================================================

/// Lifecycle events to stub, by phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hooks {
    /// Events stubbed with a pre hook
    pub pre: Vec<String>,

    /// Events stubbed with a post hook
    pub post: Vec<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let schema = Schema::default();
        assert_eq!(schema.name, "User");
        assert!(schema.fields.is_empty());
        assert!(schema.options.timestamps);
        assert!(!schema.options.version_key);
        assert!(schema.options.strict);
        assert!(schema.options.validate_before_save);
        assert!(schema.options.auto_index);
        assert_eq!(schema.hooks, Hooks::default());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let schema = serde_json::from_str::<Schema>("{}").unwrap();
        assert_eq!(schema, Schema::default());
    }

    #[test]
    fn test_json_camel_case_options() {
        let json = r#"{
            "name": "Order",
            "options": { "versionKey": true, "collection": "orders", "discriminatorKey": "kind" },
            "indexes": [{ "fields": ["customer", "createdAt"], "unique": true }],
            "hooks": { "pre": ["save"] },
            "virtuals": ["total"]
        }"#;
        let schema = serde_json::from_str::<Schema>(json).unwrap();

        assert_eq!(schema.name, "Order");
        assert!(schema.options.version_key);
        assert!(schema.options.timestamps);
        assert_eq!(schema.options.collection.as_deref(), Some("orders"));
        assert_eq!(schema.options.discriminator_key.as_deref(), Some("kind"));
        assert_eq!(
            schema.indexes,
            vec![IndexDefinition::new(["customer", "createdAt"]).unique()]
        );
        assert_eq!(schema.hooks.pre, vec!["save"]);
        assert!(schema.hooks.post.is_empty());
        assert_eq!(schema.virtuals, vec!["total"]);
    }

    #[test]
    fn test_enum_fields() {
        let schema = Schema::new("User")
            .with_field(Field::new("email", FieldType::String))
            .with_field(Field::enumeration("role", [("ADMIN", "admin")]))
            .with_field(Field::enumeration("status", [("ON", "on")]));

        let names: Vec<_> = schema.enum_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["role", "status"]);
    }

    #[test]
    fn test_custom_imports_skip_blank_lines() {
        let schema = Schema::new("User")
            .with_import("import { Tag } from \"./tag\";")
            .with_import("   ")
            .with_import("");

        let imports: Vec<_> = schema.custom_imports().collect();
        assert_eq!(imports, vec!["import { Tag } from \"./tag\";"]);
    }

    #[test]
    fn test_index_options() {
        assert!(!IndexDefinition::new(["email"]).has_options());
        assert!(IndexDefinition::new(["email"]).sparse().has_options());
    }
}
