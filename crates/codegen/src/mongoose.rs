//! # Mongoose Schema Generator
//!
//! Renders the storage artifact (`<name>.model.ts`): the schema declaration
//! with its options, indexes, stubs for virtuals, methods, statics and hooks,
//! and the model binding.

use dtoforge_core::FieldType;
use dtoforge_ir::{Field, IndexDefinition, Schema, non_empty};

use crate::join_sections;
use crate::naming::{enum_name, file_stem, schema_dto_name, schema_var_name};
use crate::typescript::MAX_NESTING_DEPTH;

const MIXED: &str = "Schema.Types.Mixed";

// ============================================================================
// Field rendering
// ============================================================================

/// Storage type expression for a field
pub fn storage_type_of(field: &Field) -> String {
    storage_type_at(field, 0)
}

/// Complete storage definition of a field: the bare type when no option
/// applies, otherwise an option object with `type` first.
pub fn storage_field_def(field: &Field) -> String {
    field_def_at(field, 0)
}

fn storage_type_at(field: &Field, depth: usize) -> String {
    if depth > MAX_NESTING_DEPTH {
        return MIXED.to_string();
    }

    match field.field_type {
        FieldType::Array => match &field.nested_fields {
            Some(nested) if field.is_array_of_objects() => {
                let mut members = members(nested, depth);
                members.push("    _id: false".to_string());
                format!("[{{\n{}\n  }}]", members.join(",\n"))
            }
            _ => format!("[{}]", element_token(field.array_type)),
        },
        FieldType::Object => match &field.nested_fields {
            Some(nested) => format!("{{\n{}\n  }}", members(nested, depth).join(",\n")),
            None => MIXED.to_string(),
        },
        scalar => scalar_token(scalar).to_string(),
    }
}

fn scalar_token(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String | FieldType::Enum => "String",
        FieldType::Number => "Number",
        FieldType::Boolean => "Boolean",
        FieldType::Date => "Date",
        FieldType::ObjectId => "Schema.Types.ObjectId",
        FieldType::Buffer => "Buffer",
        FieldType::Map => "Map",
        FieldType::Decimal128 => "Schema.Types.Decimal128",
        FieldType::Array | FieldType::Object | FieldType::Mixed | FieldType::Unknown => MIXED,
    }
}

fn element_token(element: Option<FieldType>) -> &'static str {
    match element {
        Some(
            t @ (FieldType::ObjectId
            | FieldType::String
            | FieldType::Number
            | FieldType::Boolean
            | FieldType::Date
            | FieldType::Decimal128),
        ) => scalar_token(t),
        _ => MIXED,
    }
}

fn members(nested: &[Field], depth: usize) -> Vec<String> {
    nested
        .iter()
        .map(|f| format!("    {}: {}", f.name, field_def_at(f, depth + 1)))
        .collect()
}

fn field_def_at(field: &Field, depth: usize) -> String {
    let base = storage_type_at(field, depth);
    if field.field_type.is_container() {
        return base;
    }

    let options = field_options(field, &base);
    if options.len() > 1 {
        format!("{{\n      {}\n    }}", options.join(",\n      "))
    } else {
        base
    }
}

fn field_options(field: &Field, base: &str) -> Vec<String> {
    let mut options = vec![format!("type: {}", base)];

    let flags = [
        (field.required, "required: true"),
        (field.unique, "unique: true"),
        (field.index, "index: true"),
        (field.sparse, "sparse: true"),
        (field.immutable, "immutable: true"),
    ];
    options.extend(
        flags
            .into_iter()
            .filter(|(set, _)| *set)
            .map(|(_, option)| option.to_string()),
    );

    if let Some(default) = non_empty(&field.default_value) {
        if field.field_type == FieldType::String {
            options.push(format!("default: \"{}\"", default));
        } else {
            options.push(format!("default: {}", default));
        }
    }
    if let Some(model) = non_empty(&field.reference) {
        options.push(format!("ref: \"{}\"", model));
    }
    if let Some(path) = non_empty(&field.ref_path) {
        options.push(format!("refPath: \"{}\"", path));
    }
    if let Some(alias) = non_empty(&field.alias) {
        options.push(format!("alias: \"{}\"", alias));
    }
    if !field.select {
        options.push("select: false".to_string());
    }

    for rule in &field.validation {
        if let Some(key) = rule.kind.option_key() {
            options.push(format!("{}: {}", key, rule.value));
        }
    }

    if field.field_type == FieldType::Enum {
        options.push(format!("enum: Object.values({})", enum_name(&field.name)));
    }

    options
}

// ============================================================================
// Artifact
// ============================================================================

/// Render the complete storage artifact
pub fn render_storage_artifact(schema: &Schema) -> String {
    tracing::debug!(schema = %schema.name, "rendering storage artifact");

    let var = schema_var_name(&schema.name);
    join_sections([
        imports_section(schema),
        declaration_section(schema, &var),
        schema
            .indexes
            .iter()
            .map(|index| index_line(&var, index))
            .collect::<Vec<_>>()
            .join("\n"),
        stubs(&schema.virtuals, |v| {
            format!("{var}.virtual('{v}').get(function() {{\n  // Add virtual logic here\n}});")
        }),
        stubs(&schema.methods, |m| {
            format!("{var}.methods.{m} = function() {{\n  // Add method logic here\n}};")
        }),
        stubs(&schema.statics, |s| {
            format!("{var}.statics.{s} = function() {{\n  // Add static method logic here\n}};")
        }),
        hooks_section(schema, &var),
        format!(
            "const {name}: Model<{dto}> = model(\"{name}\", {var});",
            name = schema.name,
            dto = schema_dto_name(&schema.name),
        ),
        format!("export {{ {} }};", schema.name),
    ])
}

fn imports_section(schema: &Schema) -> String {
    let bindings: Vec<String> = std::iter::once(schema_dto_name(&schema.name))
        .chain(schema.enum_fields().map(|f| enum_name(&f.name)))
        .collect();

    format!(
        "import {{ Model, Schema, model }} from \"mongoose\";\nimport {{ {} }} from \"../dtos/{}.dto\";",
        bindings.join(", "),
        file_stem(&schema.name)
    )
}

fn declaration_section(schema: &Schema, var: &str) -> String {
    let fields: Vec<String> = schema
        .fields
        .iter()
        .map(|f| format!("    {}: {}", f.name, storage_field_def(f)))
        .collect();

    let opts = &schema.options;
    let mut options = vec![
        format!("    timestamps: {}", opts.timestamps),
        format!("    versionKey: {}", opts.version_key),
        format!("    strict: {}", opts.strict),
        format!("    validateBeforeSave: {}", opts.validate_before_save),
        format!("    autoIndex: {}", opts.auto_index),
    ];
    if let Some(collection) = non_empty(&opts.collection) {
        options.push(format!("    collection: \"{}\"", collection));
    }
    if let Some(key) = non_empty(&opts.discriminator_key) {
        options.push(format!("    discriminatorKey: \"{}\"", key));
    }

    format!(
        "const {var} = new Schema<{dto}>(\n  {{\n{fields}\n  }},\n  {{\n{options}\n  }}\n);",
        dto = schema_dto_name(&schema.name),
        fields = fields.join(",\n"),
        options = options.join(",\n"),
    )
}

fn index_line(var: &str, index: &IndexDefinition) -> String {
    let keys: Vec<String> = index.fields.iter().map(|f| format!("{}: 1", f)).collect();

    let options = if index.has_options() {
        let flags = [
            (index.unique, "unique: true"),
            (index.sparse, "sparse: true"),
            (index.background, "background: true"),
        ];
        let enabled: Vec<&str> = flags
            .into_iter()
            .filter(|(set, _)| *set)
            .map(|(_, option)| option)
            .collect();
        format!(", {{ {} }}", enabled.join(", "))
    } else {
        String::new()
    };
    format!("{}.index({{ {} }}{});", var, keys.join(", "), options)
}

fn stubs(names: &[String], render: impl Fn(&str) -> String) -> String {
    names
        .iter()
        .map(|name| render(name))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn hooks_section(schema: &Schema, var: &str) -> String {
    let pre = schema.hooks.pre.iter().map(|event| {
        format!(
            "{var}.pre('{event}', function(next) {{\n  // Add pre-hook logic here\n  next();\n}});"
        )
    });
    let post = schema.hooks.post.iter().map(|event| {
        format!("{var}.post('{event}', function(doc) {{\n  // Add post-hook logic here\n}});")
    });
    pre.chain(post).collect::<Vec<_>>().join("\n\n")
}

// ============================================================================
// Tests
// ============================================================================
