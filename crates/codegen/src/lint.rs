//! Schema review hints
//!
//! Rendering never rejects a schema. These checks point out inputs that will
//! produce TypeScript or Mongoose code that does not compile or does not do
//! what the author likely meant.

use dtoforge_core::FieldType;
use dtoforge_ir::{Field, Schema};
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use std::collections::HashSet;
use std::fmt;

/// Paths every stored document carries in addition to its declared fields
const IMPLICIT_PATHS: [&str; 1] = ["_id"];
const TIMESTAMP_PATHS: [&str; 2] = ["createdAt", "updatedAt"];

/// A single review hint, located by the dotted field path it concerns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    /// Dotted field path, or the schema name for schema-level hints
    pub location: String,
    /// What is wrong
    pub message: String,
}

impl LintWarning {
    fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Whether `name` is a plain JavaScript identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Review a schema and return every hint found, in tree order
pub fn lint_schema(schema: &Schema) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    let location = if schema.name.is_empty() {
        "<schema>".to_string()
    } else {
        schema.name.clone()
    };

    if schema.name.is_empty() {
        warnings.push(LintWarning::new(
            &location,
            "schema has no name; generated type names will be incomplete",
        ));
    } else if !is_identifier(&schema.name) {
        warnings.push(LintWarning::new(
            &location,
            format!(
                "schema name is not a valid identifier (try '{}')",
                schema.name.to_upper_camel_case()
            ),
        ));
    }

    lint_fields(&schema.fields, &location, &mut warnings);
    lint_indexes(schema, &location, &mut warnings);
    warnings
}

fn lint_fields(fields: &[Field], parent: &str, warnings: &mut Vec<LintWarning>) {
    let mut seen = HashSet::new();

    for (position, field) in fields.iter().enumerate() {
        let location = if field.name.is_empty() {
            format!("{}.#{}", parent, position + 1)
        } else {
            format!("{}.{}", parent, field.name)
        };

        if field.name.is_empty() {
            warnings.push(LintWarning::new(&location, "field has no name"));
        } else if !is_identifier(&field.name) {
            warnings.push(LintWarning::new(
                &location,
                format!(
                    "field name is not a valid identifier (try '{}')",
                    field.name.to_lower_camel_case()
                ),
            ));
        }

        if !field.name.is_empty() && !seen.insert(field.name.as_str()) {
            warnings.push(LintWarning::new(&location, "duplicate field name"));
        }

        if field.field_type == FieldType::Enum {
            let entries = field.enum_entries();
            if entries.is_empty() {
                warnings.push(LintWarning::new(&location, "enum has no entries"));
            }
            for (index, entry) in entries.iter().enumerate() {
                if entry.key.is_empty() {
                    warnings.push(LintWarning::new(
                        &location,
                        format!("enum entry {} has an empty key", index + 1),
                    ));
                }
            }
        }

        if !field.nested().is_empty() && !field.has_record_shape() {
            warnings.push(LintWarning::new(
                &location,
                format!(
                    "nested fields are ignored for type '{}'",
                    field.field_type
                ),
            ));
        }

        if field.has_record_shape() {
            lint_fields(field.nested(), &location, warnings);
        }
    }
}

fn lint_indexes(schema: &Schema, location: &str, warnings: &mut Vec<LintWarning>) {
    for (position, index) in schema.indexes.iter().enumerate() {
        let index_location = format!("{}.indexes[{}]", location, position);

        if index.fields.is_empty() {
            warnings.push(LintWarning::new(&index_location, "index has no fields"));
            continue;
        }

        for path in &index.fields {
            let root = path.split('.').next().unwrap_or(path);
            let known = schema.field_by_name(root).is_some()
                || IMPLICIT_PATHS.contains(&root)
                || (schema.options.timestamps && TIMESTAMP_PATHS.contains(&root));
            if !known {
                warnings.push(LintWarning::new(
                    &index_location,
                    format!("index refers to unknown field '{}'", path),
                ));
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dtoforge_ir::{EnumValue, IndexDefinition};
    use pretty_assertions::assert_eq;

    fn messages(schema: &Schema) -> Vec<String> {
        lint_schema(schema)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("email"));
        assert!(is_identifier("_id"));
        assert!(is_identifier("$meta"));
        assert!(is_identifier("line2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fa"));
        assert!(!is_identifier("first name"));
        assert!(!is_identifier("e-mail"));
    }

    #[test]
    fn test_clean_schema_has_no_warnings() {
        let schema = Schema::new("User")
            .with_field(Field::new("email", FieldType::String))
            .with_field(Field::enumeration("role", [("ADMIN", "admin")]))
            .with_field(Field::object("address", vec![Field::new("city", FieldType::String)]))
            .with_index(IndexDefinition::new(["email", "address.city", "createdAt"]));

        assert!(lint_schema(&schema).is_empty());
    }

    #[test]
    fn test_names() {
        let schema = Schema::new("blog post")
            .with_field(Field::new("", FieldType::String))
            .with_field(Field::new("first name", FieldType::String));

        assert_eq!(
            messages(&schema),
            vec![
                "blog post: schema name is not a valid identifier (try 'BlogPost')",
                "blog post.#1: field has no name",
                "blog post.first name: field name is not a valid identifier (try 'firstName')",
            ]
        );
    }

    #[test]
    fn test_empty_schema_name() {
        let schema = Schema::new("");
        assert_eq!(
            messages(&schema),
            vec!["<schema>: schema has no name; generated type names will be incomplete"]
        );
    }

    #[test]
    fn test_duplicate_siblings() {
        let schema = Schema::new("User")
            .with_field(Field::new("email", FieldType::String))
            .with_field(Field::new("email", FieldType::String))
            .with_field(Field::object("a", vec![Field::new("email", FieldType::String)]));

        assert_eq!(messages(&schema), vec!["User.email: duplicate field name"]);
    }

    #[test]
    fn test_enum_entries() {
        let mut empty = Field::new("status", FieldType::Enum);
        empty.enum_values = Some(vec![]);
        let mut blank_key = Field::new("role", FieldType::Enum);
        blank_key.enum_values = Some(vec![EnumValue::new("A", "a"), EnumValue::new("", "b")]);

        let schema = Schema::new("User").with_field(empty).with_field(blank_key);
        assert_eq!(
            messages(&schema),
            vec![
                "User.status: enum has no entries",
                "User.role: enum entry 2 has an empty key",
            ]
        );
    }

    #[test]
    fn test_nested_fields_on_scalar() {
        let field = Field::new("email", FieldType::String)
            .with_nested(vec![Field::new("x", FieldType::String)]);
        let schema = Schema::new("User").with_field(field);

        assert_eq!(
            messages(&schema),
            vec!["User.email: nested fields are ignored for type 'string'"]
        );
    }

    #[test]
    fn test_nested_paths() {
        let schema = Schema::new("Order").with_field(
            Field::array_of("lines", FieldType::Object)
                .with_nested(vec![Field::new("unit price", FieldType::Number)]),
        );
        assert_eq!(
            messages(&schema),
            vec!["Order.lines.unit price: field name is not a valid identifier (try 'unitPrice')"]
        );
    }

    #[test]
    fn test_indexes() {
        let schema = Schema::new("User")
            .with_field(Field::new("email", FieldType::String))
            .with_index(IndexDefinition::default())
            .with_index(IndexDefinition::new(["email", "username", "_id"]));

        assert_eq!(
            messages(&schema),
            vec![
                "User.indexes[0]: index has no fields",
                "User.indexes[1]: index refers to unknown field 'username'",
            ]
        );
    }

    #[test]
    fn test_timestamp_paths_need_timestamps() {
        let mut schema = Schema::new("User").with_index(IndexDefinition::new(["createdAt"]));
        assert!(lint_schema(&schema).is_empty());

        schema.options.timestamps = false;
        assert_eq!(lint_schema(&schema).len(), 1);
    }
}
