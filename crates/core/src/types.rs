//! Core types used throughout DTO Forge
//!
//! This module contains the closed set of field types a schema can use and
//! the kinds of validation rules a field can carry.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Type alias for field identifiers (opaque string tokens)
pub type FieldId = String;

/// Generate a fresh, unique field identifier
pub fn new_field_id() -> FieldId {
    uuid::Uuid::new_v4().simple().to_string()
}

// ============================================================================
// Field Types
// ============================================================================

/// Field types supported by the schema builder.
///
/// The JSON representation uses the exact tokens shown to the user
/// (`"string"`, `"Date"`, `"ObjectId"`, ...). Any other token is read as
/// [`FieldType::Unknown`], which renders through the any/Mixed fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Text
    #[default]
    String,
    /// Any numeric value
    Number,
    /// true / false
    Boolean,
    /// Date and time
    Date,
    /// Reference to another document
    ObjectId,
    /// Binary data
    Buffer,
    /// String-keyed map
    Map,
    /// High-precision decimal
    Decimal128,
    /// Ordered list, element type given by `arrayType`
    Array,
    /// Nested record
    Object,
    /// Named enumeration
    Enum,
    /// Anything goes
    Mixed,
    /// Token outside the supported set
    Unknown,
}

impl FieldType {
    /// Every selectable field type, in editor order
    pub const ALL: [FieldType; 12] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::ObjectId,
        FieldType::Buffer,
        FieldType::Map,
        FieldType::Decimal128,
        FieldType::Array,
        FieldType::Object,
        FieldType::Enum,
        FieldType::Mixed,
    ];

    /// The token used in schema descriptions
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "Date",
            FieldType::ObjectId => "ObjectId",
            FieldType::Buffer => "Buffer",
            FieldType::Map => "Map",
            FieldType::Decimal128 => "Decimal128",
            FieldType::Array => "array",
            FieldType::Object => "object",
            FieldType::Enum => "enum",
            FieldType::Mixed => "mixed",
            FieldType::Unknown => "unknown",
        }
    }

    /// Parse a schema token. Never fails; unrecognised tokens map to `Unknown`.
    pub fn from_token(token: &str) -> Self {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == token)
            .unwrap_or(FieldType::Unknown)
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Boolean => "Boolean",
            FieldType::Date => "Date",
            FieldType::ObjectId => "ObjectId",
            FieldType::Buffer => "Buffer",
            FieldType::Map => "Map",
            FieldType::Decimal128 => "Decimal128",
            FieldType::Array => "Array",
            FieldType::Object => "Object",
            FieldType::Enum => "Enum",
            FieldType::Mixed => "Mixed",
            FieldType::Unknown => "Unknown",
        }
    }

    /// Whether fields of this type may own nested fields
    pub fn is_container(&self) -> bool {
        matches!(self, FieldType::Array | FieldType::Object)
    }
}

impl From<String> for FieldType {
    fn from(token: String) -> Self {
        FieldType::from_token(&token)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Validation Rule Kinds
// ============================================================================

/// Kinds of validation rules a field can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationKind {
    /// Minimum numeric value
    Min,
    /// Maximum numeric value
    Max,
    /// Minimum string length
    MinLength,
    /// Maximum string length
    MaxLength,
    /// Regular expression the value must match
    Match,
    /// Custom validator function
    Validate,
    /// Free-form custom rule
    Custom,
}

impl ValidationKind {
    /// The Mongoose option key for this rule, if the rule maps onto one
    pub fn option_key(&self) -> Option<&'static str> {
        match self {
            ValidationKind::Min => Some("min"),
            ValidationKind::Max => Some("max"),
            ValidationKind::MinLength => Some("minLength"),
            ValidationKind::MaxLength => Some("maxLength"),
            ValidationKind::Match => Some("match"),
            ValidationKind::Validate | ValidationKind::Custom => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
