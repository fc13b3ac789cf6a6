//! Field definitions for schema properties
//!
//! This module contains the `Field` struct, the recursive node of a schema's
//! field tree, together with its enum entries, validation rules and the
//! `FieldPatch` used to apply partial edits.

use dtoforge_core::{FieldId, FieldType, ValidationKind, new_field_id};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Field
// ============================================================================

/// A named, typed entry in a schema, possibly owning nested fields.
///
/// Every attribute is optional in the JSON representation; missing values
/// fall back to [`Field::blank`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Field {
    /// Unique identifier within the tree
    pub id: FieldId,

    /// Field name as emitted in generated code (not validated)
    pub name: String,

    /// Data type of the field
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether the field is required
    pub required: bool,

    /// Whether the field must be unique
    pub unique: bool,

    /// Whether to create an index on this field
    pub index: bool,

    /// Whether the index is sparse
    pub sparse: bool,

    /// Whether the value is immutable once set
    pub immutable: bool,

    /// Whether the field is deprecated
    pub deprecated: bool,

    /// Whether the field is selected by default in queries
    pub select: bool,

    /// Whether the field is virtual
    #[serde(rename = "virtual")]
    pub is_virtual: bool,

    /// Raw default literal, emitted verbatim (quoted for string fields)
    #[serde(
        rename = "default",
        deserialize_with = "literal",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,

    /// Alternate property name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Referenced model name (ObjectId fields)
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Field holding a dynamic reference model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    /// Element type (array fields)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_type: Option<FieldType>,

    /// Referenced model name of ObjectId elements (array fields)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_ref: Option<String>,

    /// Minimum number of elements (array fields)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_min_items: Option<u32>,

    /// Maximum number of elements (array fields)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_max_items: Option<u32>,

    /// Children of object fields and arrays of objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested_fields: Option<Vec<Field>>,

    /// Entries of enum fields
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<EnumValue>>,

    /// Validation rules, in declaration order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,

    /// Editor view state: whether the field card is expanded
    pub is_expanded: bool,
}

impl Field {
    /// Create the seed the editor inserts: fresh id, empty name, string type,
    /// expanded.
    pub fn blank() -> Self {
        Self {
            id: new_field_id(),
            name: String::new(),
            field_type: FieldType::String,
            required: false,
            unique: false,
            index: false,
            sparse: false,
            immutable: false,
            deprecated: false,
            select: true,
            is_virtual: false,
            default_value: None,
            description: None,
            example: None,
            alias: None,
            reference: None,
            ref_path: None,
            array_type: None,
            array_ref: None,
            array_min_items: None,
            array_max_items: None,
            nested_fields: None,
            enum_values: None,
            validation: Vec::new(),
            is_expanded: true,
        }
    }

    /// Create a new field with the given name and type
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let mut field = Self::blank();
        field.name = name.into();
        field.field_type = field_type;
        field.initialize_for_type();
        field
    }

    /// Create an object field owning the given children
    pub fn object(name: impl Into<String>, nested: Vec<Field>) -> Self {
        Self::new(name, FieldType::Object).with_nested(nested)
    }

    /// Create an array field with the given element type
    pub fn array_of(name: impl Into<String>, element: FieldType) -> Self {
        let mut field = Self::new(name, FieldType::Array);
        field.array_type = Some(element);
        field.initialize_for_type();
        field
    }

    /// Create an enum field with `(key, value)` entries
    pub fn enumeration<K, V>(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut field = Self::new(name, FieldType::Enum);
        field.enum_values = Some(
            entries
                .into_iter()
                .map(|(key, value)| EnumValue::new(key, value))
                .collect(),
        );
        field
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Use a specific id
    pub fn with_id(mut self, id: impl Into<FieldId>) -> Self {
        self.id = id.into();
        self
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark the field as indexed
    pub fn indexed(mut self) -> Self {
        self.index = true;
        self
    }

    /// Mark the field as deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Set the raw default literal
    pub fn with_default(mut self, literal: impl Into<String>) -> Self {
        self.default_value = Some(literal.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the referenced model
    pub fn with_ref(mut self, model: impl Into<String>) -> Self {
        self.reference = Some(model.into());
        self
    }

    /// Add a validation rule
    pub fn with_validation(mut self, rule: ValidationRule) -> Self {
        self.validation.push(rule);
        self
    }

    /// Replace the nested children
    pub fn with_nested(mut self, nested: Vec<Field>) -> Self {
        self.nested_fields = Some(nested);
        self
    }

    // ========================================================================
    // Utility methods
    // ========================================================================

    /// Nested children, or an empty slice
    pub fn nested(&self) -> &[Field] {
        self.nested_fields.as_deref().unwrap_or(&[])
    }

    /// Enum entries, or an empty slice
    pub fn enum_entries(&self) -> &[EnumValue] {
        self.enum_values.as_deref().unwrap_or(&[])
    }

    /// Whether this is an array whose elements are nested records
    pub fn is_array_of_objects(&self) -> bool {
        self.field_type == FieldType::Array && self.array_type == Some(FieldType::Object)
    }

    /// Whether this field declares a nested record shape
    pub fn has_record_shape(&self) -> bool {
        (self.field_type == FieldType::Object || self.is_array_of_objects())
            && self.nested_fields.is_some()
    }

    /// Merge a partial update into this field.
    ///
    /// When the patch touches `type` or `arrayType`, container attributes the
    /// new type needs are initialised if absent. Existing data is never
    /// replaced.
    pub fn apply_patch(&mut self, patch: &FieldPatch) {
        let type_touched = patch.field_type.is_some() || patch.array_type.is_some();

        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(field_type) = patch.field_type {
            self.field_type = field_type;
        }
        set(&mut self.required, patch.required);
        set(&mut self.unique, patch.unique);
        set(&mut self.index, patch.index);
        set(&mut self.sparse, patch.sparse);
        set(&mut self.immutable, patch.immutable);
        set(&mut self.deprecated, patch.deprecated);
        set(&mut self.select, patch.select);
        set(&mut self.is_virtual, patch.is_virtual);
        set(&mut self.is_expanded, patch.is_expanded);
        set(&mut self.default_value, patch.default_value.clone());
        set(&mut self.description, patch.description.clone());
        set(&mut self.example, patch.example.clone());
        set(&mut self.alias, patch.alias.clone());
        set(&mut self.reference, patch.reference.clone());
        set(&mut self.ref_path, patch.ref_path.clone());
        set(&mut self.array_type, patch.array_type);
        set(&mut self.array_ref, patch.array_ref.clone());
        set(&mut self.array_min_items, patch.array_min_items);
        set(&mut self.array_max_items, patch.array_max_items);
        set(&mut self.nested_fields, patch.nested_fields.clone());
        set(&mut self.enum_values, patch.enum_values.clone());
        set(&mut self.validation, patch.validation.clone());

        if type_touched {
            self.initialize_for_type();
        }
    }

    fn initialize_for_type(&mut self) {
        match self.field_type {
            FieldType::Object => {
                self.nested_fields.get_or_insert_with(Vec::new);
            }
            FieldType::Enum => {
                self.enum_values
                    .get_or_insert_with(|| vec![EnumValue::default()]);
            }
            FieldType::Array if self.array_type == Some(FieldType::Object) => {
                self.nested_fields.get_or_insert_with(Vec::new);
            }
            _ => {}
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::blank()
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Treat empty strings in optional text attributes as "not set".
///
/// The editor stores `""` when an input is cleared.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ============================================================================
// EnumValue
// ============================================================================

/// One entry of an enum field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumValue {
    /// Enum member identifier
    pub key: String,

    /// String value of the member
    pub value: String,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EnumValue {
    /// Create a new enum entry
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
        }
    }
}

// ============================================================================
// ValidationRule
// ============================================================================

/// A validation rule attached to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Rule kind
    #[serde(rename = "type")]
    pub kind: ValidationKind,

    /// Rule argument, emitted verbatim
    pub value: RuleValue,

    /// Optional error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationRule {
    /// Create a new rule
    pub fn new(kind: ValidationKind, value: impl Into<RuleValue>) -> Self {
        Self {
            kind,
            value: value.into(),
            message: None,
        }
    }

    /// Attach an error message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Argument of a validation rule: a number or a raw literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RuleValue {
    fn from(value: f64) -> Self {
        RuleValue::Number(value)
    }
}

impl From<i64> for RuleValue {
    fn from(value: i64) -> Self {
        RuleValue::Number(value as f64)
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::Text(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        RuleValue::Text(value)
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Number(n) => write!(f, "{}", n),
            RuleValue::Text(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// FieldPatch
// ============================================================================

/// Partial changes merged into a field by `update`.
///
/// `None` leaves an attribute untouched. Optional attributes take
/// `Some(None)` to clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
    pub unique: Option<bool>,
    pub index: Option<bool>,
    pub sparse: Option<bool>,
    pub immutable: Option<bool>,
    pub deprecated: Option<bool>,
    pub select: Option<bool>,
    pub is_virtual: Option<bool>,
    pub is_expanded: Option<bool>,
    pub default_value: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub example: Option<Option<String>>,
    pub alias: Option<Option<String>>,
    pub reference: Option<Option<String>>,
    pub ref_path: Option<Option<String>>,
    pub array_type: Option<Option<FieldType>>,
    pub array_ref: Option<Option<String>>,
    pub array_min_items: Option<Option<u32>>,
    pub array_max_items: Option<Option<u32>>,
    pub nested_fields: Option<Option<Vec<Field>>>,
    pub enum_values: Option<Option<Vec<EnumValue>>>,
    pub validation: Option<Vec<ValidationRule>>,
}

impl FieldPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the field
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Change the field type
    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Change the array element type
    pub fn array_type(mut self, element: FieldType) -> Self {
        self.array_type = Some(Some(element));
        self
    }

    /// Set the required flag
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Set the unique flag
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    /// Set the select flag
    pub fn select(mut self, select: bool) -> Self {
        self.select = Some(select);
        self
    }

    /// Set the expansion view state
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.is_expanded = Some(expanded);
        self
    }

    /// Set the raw default literal
    pub fn default_value(mut self, literal: impl Into<String>) -> Self {
        self.default_value = Some(Some(literal.into()));
        self
    }

    /// Remove the default literal
    pub fn clear_default(mut self) -> Self {
        self.default_value = Some(None);
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Set the referenced model
    pub fn reference(mut self, model: impl Into<String>) -> Self {
        self.reference = Some(Some(model.into()));
        self
    }

    /// Replace the enum entries
    pub fn enum_values(mut self, values: Vec<EnumValue>) -> Self {
        self.enum_values = Some(Some(values));
        self
    }

    /// Replace the validation rules
    pub fn validation(mut self, rules: Vec<ValidationRule>) -> Self {
        self.validation = Some(rules);
        self
    }
}

// ============================================================================
// Serde helpers
// ============================================================================

/// Accept a string, number or boolean default and keep it as raw text.
fn literal<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Literal {
        Text(String),
        Number(serde_json::Number),
        Bool(bool),
    }

    Ok(Option::<Literal>::deserialize(deserializer)?.map(|literal| match literal {
        Literal::Text(s) => s,
        Literal::Number(n) => n.to_string(),
        Literal::Bool(b) => b.to_string(),
    }))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_field() {
        let field = Field::blank();
        assert!(field.name.is_empty());
        assert_eq!(field.field_type, FieldType::String);
        assert!(!field.required);
        assert!(!field.unique);
        assert!(field.select);
        assert!(field.is_expanded);
        assert_eq!(field.id.len(), 32);
    }

    #[test]
    fn test_new_initializes_containers() {
        assert_eq!(Field::new("address", FieldType::Object).nested_fields, Some(vec![]));
        assert_eq!(
            Field::new("role", FieldType::Enum).enum_values,
            Some(vec![EnumValue::default()])
        );
        assert_eq!(
            Field::array_of("items", FieldType::Object).nested_fields,
            Some(vec![])
        );
        assert_eq!(Field::array_of("tags", FieldType::String).nested_fields, None);
    }

    #[test]
    fn test_builder() {
        let field = Field::new("email", FieldType::String)
            .required()
            .unique()
            .with_description("Login address");

        assert!(field.required);
        assert!(field.unique);
        assert_eq!(field.description.as_deref(), Some("Login address"));
    }

    #[test]
    fn test_patch_merges_only_given_attributes() {
        let mut field = Field::new("email", FieldType::String)
            .required()
            .with_default("none");
        field.apply_patch(&FieldPatch::new().name("mail").unique(true));

        assert_eq!(field.name, "mail");
        assert!(field.unique);
        assert!(field.required);
        assert_eq!(field.default_value.as_deref(), Some("none"));
    }

    #[test]
    fn test_patch_clears_optional_attribute() {
        let mut field = Field::new("age", FieldType::Number).with_default("18");
        field.apply_patch(&FieldPatch::new().clear_default());
        assert_eq!(field.default_value, None);
    }

    #[test]
    fn test_patch_type_transition_initializes() {
        let mut field = Field::new("meta", FieldType::String);
        field.apply_patch(&FieldPatch::new().field_type(FieldType::Object));
        assert_eq!(field.nested_fields, Some(vec![]));

        let mut field = Field::new("status", FieldType::String);
        field.apply_patch(&FieldPatch::new().field_type(FieldType::Enum));
        assert_eq!(field.enum_values, Some(vec![EnumValue::new("", "")]));

        let mut field = Field::new("lines", FieldType::String);
        field.apply_patch(
            &FieldPatch::new()
                .field_type(FieldType::Array)
                .array_type(FieldType::Object),
        );
        assert_eq!(field.nested_fields, Some(vec![]));
    }

    #[test]
    fn test_patch_type_transition_keeps_existing_children() {
        let child = Field::new("city", FieldType::String);
        let mut field = Field::object("address", vec![child.clone()]);
        field.apply_patch(&FieldPatch::new().field_type(FieldType::Object));
        assert_eq!(field.nested_fields, Some(vec![child]));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&None), None);
    }

    #[test]
    fn test_deserialize_minimal_field() {
        let field: Field = serde_json::from_str(r#"{ "name": "email" }"#).unwrap();
        assert_eq!(field.name, "email");
        assert_eq!(field.field_type, FieldType::String);
        assert!(field.select);
        assert!(!field.id.is_empty());
    }

    #[test]
    fn test_deserialize_full_field() {
        let json = r#"{
            "id": "f1",
            "name": "tags",
            "type": "array",
            "arrayType": "ObjectId",
            "arrayRef": "Tag",
            "arrayMinItems": 1,
            "ref": "Tag",
            "refPath": "kind",
            "default": 0,
            "select": false,
            "virtual": true,
            "validation": [
                { "type": "min", "value": 1 },
                { "type": "match", "value": "/^a/", "message": "must start with a" }
            ]
        }"#;
        let field: Field = serde_json::from_str(json).unwrap();

        assert_eq!(field.id, "f1");
        assert_eq!(field.field_type, FieldType::Array);
        assert_eq!(field.array_type, Some(FieldType::ObjectId));
        assert_eq!(field.array_ref.as_deref(), Some("Tag"));
        assert_eq!(field.array_min_items, Some(1));
        assert_eq!(field.reference.as_deref(), Some("Tag"));
        assert_eq!(field.ref_path.as_deref(), Some("kind"));
        assert_eq!(field.default_value.as_deref(), Some("0"));
        assert!(!field.select);
        assert!(field.is_virtual);
        assert_eq!(field.validation.len(), 2);
        assert_eq!(field.validation[0].value.to_string(), "1");
        assert_eq!(field.validation[1].value.to_string(), "/^a/");
    }

    #[test]
    fn test_deserialize_nested_and_enum() {
        let json = r#"{
            "name": "profile",
            "type": "object",
            "nestedFields": [
                { "name": "role", "type": "enum", "enum": [{ "key": "ADMIN", "value": "admin" }] }
            ]
        }"#;
        let field: Field = serde_json::from_str(json).unwrap();
        let role = &field.nested()[0];
        assert_eq!(role.field_type, FieldType::Enum);
        assert_eq!(role.enum_entries(), &[EnumValue::new("ADMIN", "admin")]);
    }

    #[test]
    fn test_rule_value_display() {
        assert_eq!(RuleValue::from(5i64).to_string(), "5");
        assert_eq!(RuleValue::from(2.5).to_string(), "2.5");
        assert_eq!(RuleValue::from("/x/").to_string(), "/x/");
    }
}
