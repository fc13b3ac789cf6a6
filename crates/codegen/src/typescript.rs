//! # TypeScript DTO Generator
//!
//! Renders the type-definition artifact (`<name>.dto.ts`) of a schema.
//!
//! ## Sections
//!
//! - `mongoose` import plus custom import lines
//! - one `enum` per top-level enum field
//! - one `interface` per nested record, depth-first
//! - the base `<Name>Dto` type
//! - derived Schema / Create / Update / Populated types
//! - the export list
//!
//! Empty sections are dropped; the rest are separated by a blank line.

use dtoforge_core::FieldType;
use dtoforge_ir::{Field, Schema, non_empty};

use crate::join_sections;
use crate::naming::{
    create_dto_name, dto_name, enum_name, interface_name, item_interface_name, populated_dto_name,
    schema_dto_name, update_dto_name,
};

/// Nesting levels rendered before falling back to `any`
pub const MAX_NESTING_DEPTH: usize = 32;

const MONGOOSE_IMPORT: &str = "import { Document, Types } from \"mongoose\";";

// ============================================================================
// Type mapping
// ============================================================================

/// TypeScript type expression for a field. Total: never fails.
pub fn type_of(field: &Field) -> String {
    type_at(field, 0)
}

fn type_at(field: &Field, depth: usize) -> String {
    if depth > MAX_NESTING_DEPTH {
        return "any".to_string();
    }

    match field.field_type {
        FieldType::Enum => enum_name(&field.name),
        FieldType::Array => match &field.nested_fields {
            Some(nested) if field.is_array_of_objects() => {
                format!("{}[]", inline_record(nested, depth))
            }
            _ => format!("{}[]", element_type(field.array_type)),
        },
        FieldType::Object => match &field.nested_fields {
            Some(nested) => inline_record(nested, depth),
            None => "object".to_string(),
        },
        scalar => scalar_type(scalar).to_string(),
    }
}

fn scalar_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String => "string",
        FieldType::Number => "number",
        FieldType::Boolean => "boolean",
        FieldType::Date => "Date",
        FieldType::ObjectId => "Types.ObjectId",
        FieldType::Buffer => "Buffer",
        FieldType::Map => "Map<string, any>",
        FieldType::Decimal128 => "Types.Decimal128",
        FieldType::Object => "object",
        FieldType::Array | FieldType::Enum | FieldType::Mixed | FieldType::Unknown => "any",
    }
}

fn element_type(element: Option<FieldType>) -> &'static str {
    element.map_or("any", scalar_type)
}

fn inline_record(nested: &[Field], depth: usize) -> String {
    let members: Vec<String> = nested
        .iter()
        .map(|f| {
            format!(
                "    {}{}: {};",
                f.name,
                optional_marker(f),
                type_at(f, depth + 1)
            )
        })
        .collect();
    format!("{{\n{}\n  }}", members.join("\n"))
}

fn optional_marker(field: &Field) -> &'static str {
    if field.required { "" } else { "?" }
}

fn member_line(field: &Field, depth: usize, mark_deprecated: bool) -> String {
    let mut line = format!(
        "  {}{}: {};",
        field.name,
        optional_marker(field),
        type_at(field, depth)
    );

    let description = non_empty(&field.description);
    let deprecated = mark_deprecated && field.deprecated;
    match (description, deprecated) {
        (Some(text), true) => line.push_str(&format!(" // {} @deprecated", text)),
        (Some(text), false) => line.push_str(&format!(" // {}", text)),
        (None, true) => line.push_str(" // @deprecated"),
        (None, false) => {}
    }
    line
}

// ============================================================================
// Artifact
// ============================================================================

/// Render the complete type-definition artifact
pub fn render_type_artifact(schema: &Schema) -> String {
    tracing::debug!(schema = %schema.name, "rendering type artifact");

    join_sections([
        imports_section(schema),
        enums_section(schema),
        interfaces_section(schema),
        dto_section(schema),
        derived_section(schema),
        export_section(schema),
    ])
}

fn imports_section(schema: &Schema) -> String {
    std::iter::once(MONGOOSE_IMPORT)
        .chain(schema.custom_imports())
        .collect::<Vec<_>>()
        .join("\n")
}

fn enums_section(schema: &Schema) -> String {
    schema
        .enum_fields()
        .map(|field| {
            let values: Vec<String> = field
                .enum_entries()
                .iter()
                .map(|e| format!("  {} = \"{}\"", e.key, e.value))
                .collect();
            format!("enum {} {{\n{}\n}}", enum_name(&field.name), values.join(",\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn interfaces_section(schema: &Schema) -> String {
    let mut interfaces = Vec::new();
    collect_interfaces(&schema.fields, &schema.name, 0, &mut interfaces);
    interfaces.join("\n\n")
}

fn collect_interfaces(fields: &[Field], prefix: &str, depth: usize, out: &mut Vec<String>) {
    if depth >= MAX_NESTING_DEPTH {
        return;
    }

    for field in fields {
        let Some(nested) = &field.nested_fields else {
            continue;
        };
        let name = if field.field_type == FieldType::Object {
            interface_name(prefix, &field.name)
        } else if field.is_array_of_objects() {
            item_interface_name(prefix, &field.name)
        } else {
            continue;
        };

        let members: Vec<String> = nested
            .iter()
            .map(|f| member_line(f, depth + 1, false))
            .collect();
        out.push(format!("interface {} {{\n{}\n}}", name, members.join("\n")));

        collect_interfaces(nested, &name, depth + 1, out);
    }
}

fn dto_section(schema: &Schema) -> String {
    let members: Vec<String> = schema
        .fields
        .iter()
        .map(|f| member_line(f, 0, true))
        .collect();
    format!(
        "type {} = {{\n{}\n}};",
        dto_name(&schema.name),
        members.join("\n")
    )
}

fn derived_section(schema: &Schema) -> String {
    let name = &schema.name;
    let dto = dto_name(name);
    let create = create_dto_name(name);
    [
        format!("type {} = {} & Document;", schema_dto_name(name), dto),
        format!(
            "type {} = Omit<{}, '_id' | 'createdAt' | 'updatedAt'>;",
            create, dto
        ),
        format!("type {} = Partial<{}>;", update_dto_name(name), create),
        format!(
            "type {} = {}; // Add populated field types as needed",
            populated_dto_name(name),
            dto
        ),
    ]
    .join("\n")
}

fn export_section(schema: &Schema) -> String {
    let name = &schema.name;
    let exports: Vec<String> = [
        dto_name(name),
        schema_dto_name(name),
        create_dto_name(name),
        update_dto_name(name),
        populated_dto_name(name),
    ]
    .into_iter()
    .chain(schema.enum_fields().map(|f| enum_name(&f.name)))
    .collect();

    format!("export {{\n  {}\n}};", exports.join(",\n  "))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dtoforge_ir::EnumValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalar_types() {
        let cases = [
            (FieldType::String, "string"),
            (FieldType::Number, "number"),
            (FieldType::Boolean, "boolean"),
            (FieldType::Date, "Date"),
            (FieldType::ObjectId, "Types.ObjectId"),
            (FieldType::Buffer, "Buffer"),
            (FieldType::Mixed, "any"),
            (FieldType::Map, "Map<string, any>"),
            (FieldType::Decimal128, "Types.Decimal128"),
            (FieldType::Unknown, "any"),
        ];
        for (field_type, expected) in cases {
            assert_eq!(type_of(&Field::new("x", field_type)), expected);
        }
    }

    #[test]
    fn test_enum_type() {
        assert_eq!(type_of(&Field::new("address", FieldType::Enum)), "AddressEnum");
    }

    #[test]
    fn test_type_of_is_total() {
        for field_type in FieldType::ALL {
            assert!(!type_of(&Field::new("x", field_type)).is_empty());

            let array = Field::array_of("xs", field_type);
            assert!(!type_of(&array).is_empty());

            let mut bare = Field::new("xs", FieldType::Array);
            bare.array_type = Some(field_type);
            bare.nested_fields = None;
            assert!(type_of(&bare).ends_with("[]"));
        }
        assert_eq!(type_of(&Field::new("xs", FieldType::Array)), "any[]");
    }

    #[test]
    fn test_array_element_types() {
        let cases = [
            (FieldType::String, "string[]"),
            (FieldType::ObjectId, "Types.ObjectId[]"),
            (FieldType::Decimal128, "Types.Decimal128[]"),
            (FieldType::Enum, "any[]"),
            (FieldType::Mixed, "any[]"),
            (FieldType::Array, "any[]"),
        ];
        for (element, expected) in cases {
            assert_eq!(type_of(&Field::array_of("xs", element)), expected);
        }

        let mut objects = Field::array_of("xs", FieldType::Object);
        objects.nested_fields = None;
        assert_eq!(type_of(&objects), "object[]");
    }

    #[test]
    fn test_array_of_objects_inline() {
        let field = Field::array_of("lines", FieldType::Object).with_nested(vec![
            Field::new("sku", FieldType::String).required(),
            Field::new("qty", FieldType::Number),
        ]);
        assert_eq!(
            type_of(&field),
            "{\n    sku: string;\n    qty?: number;\n  }[]"
        );
    }

    #[test]
    fn test_object_types() {
        let field = Field::object(
            "address",
            vec![Field::new("city", FieldType::String).required()],
        );
        assert_eq!(type_of(&field), "{\n    city: string;\n  }");

        let mut bare = Field::new("meta", FieldType::Object);
        bare.nested_fields = None;
        assert_eq!(type_of(&bare), "object");
    }

    #[test]
    fn test_depth_limit_falls_back_to_any() {
        let mut field = Field::new("leaf", FieldType::String);
        for _ in 0..(MAX_NESTING_DEPTH + 4) {
            field = Field::object("level", vec![field]);
        }
        let rendered = type_of(&field);
        assert!(rendered.contains("level?: any;"));
        assert!(!rendered.contains("leaf"));
    }

    #[test]
    fn test_member_comments() {
        let plain = Field::new("email", FieldType::String);
        assert_eq!(member_line(&plain, 0, true), "  email?: string;");

        let described = plain.clone().with_description("Login address");
        assert_eq!(member_line(&described, 0, true), "  email?: string; // Login address");

        let old = described.clone().deprecated();
        assert_eq!(
            member_line(&old, 0, true),
            "  email?: string; // Login address @deprecated"
        );
        assert_eq!(member_line(&old, 0, false), "  email?: string; // Login address");

        let old_bare = plain.deprecated();
        assert_eq!(member_line(&old_bare, 0, true), "  email?: string; // @deprecated");

        let empty_description = Field::new("a", FieldType::Number).with_description("");
        assert_eq!(member_line(&empty_description, 0, true), "  a?: number;");
    }

    #[test]
    fn test_render_user_email() {
        let schema = Schema::new("User")
            .with_field(Field::new("email", FieldType::String).required().unique());

        let expected = concat!(
            "import { Document, Types } from \"mongoose\";\n",
            "\n",
            "type UserDto = {\n  email: string;\n};\n",
            "\n",
            "type UserSchemaDto = UserDto & Document;\n",
            "type CreateUserDto = Omit<UserDto, '_id' | 'createdAt' | 'updatedAt'>;\n",
            "type UpdateUserDto = Partial<CreateUserDto>;\n",
            "type UserPopulatedDto = UserDto; // Add populated field types as needed\n",
            "\n",
            "export {\n  UserDto,\n  UserSchemaDto,\n  CreateUserDto,\n  UpdateUserDto,\n  UserPopulatedDto\n};",
        );

        assert_eq!(render_type_artifact(&schema), expected);
    }

    #[test]
    fn test_render_enum() {
        let schema = Schema::new("User").with_field(
            Field::enumeration("role", [("ADMIN", "admin")]).required(),
        );
        let output = render_type_artifact(&schema);

        assert!(output.contains("enum RoleEnum {\n  ADMIN = \"admin\"\n}"));
        assert!(output.contains("  role: RoleEnum;"));
        assert!(output.contains("  UserPopulatedDto,\n  RoleEnum\n};"));

        let optional =
            Schema::new("User").with_field(Field::enumeration("role", [("ADMIN", "admin")]));
        assert!(render_type_artifact(&optional).contains("  role?: RoleEnum;"));
    }

    #[test]
    fn test_enum_export_iff_top_level_enum() {
        let with_enum = Schema::new("User")
            .with_field(Field::enumeration("address", [("HOME", "home"), ("WORK", "work")]));
        let output = render_type_artifact(&with_enum);
        assert!(output.contains("enum AddressEnum {\n  HOME = \"home\",\n  WORK = \"work\"\n}"));
        assert!(output.contains("  UserPopulatedDto,\n  AddressEnum\n};"));

        let nested_enum = Schema::new("User").with_field(Field::object(
            "profile",
            vec![Field::enumeration("address", [("HOME", "home")])],
        ));
        assert!(!render_type_artifact(&nested_enum).contains("AddressEnum\n};"));

        let string_address =
            Schema::new("User").with_field(Field::new("address", FieldType::String));
        assert!(!render_type_artifact(&string_address).contains("AddressEnum"));
    }

    #[test]
    fn test_enum_without_entries() {
        let mut field = Field::new("status", FieldType::Enum);
        field.enum_values = None;
        let schema = Schema::new("User").with_field(field);
        assert!(render_type_artifact(&schema).contains("enum StatusEnum {\n\n}"));
    }

    #[test]
    fn test_render_nested_interface() {
        let schema = Schema::new("User").with_field(Field::object(
            "address",
            vec![Field::new("city", FieldType::String).required()],
        ));
        let output = render_type_artifact(&schema);

        assert!(output.contains("interface UserAddressType {\n  city: string;\n}"));
        assert!(output.contains("  address?: {\n    city: string;\n  };"));
    }

    #[test]
    fn test_render_deeply_nested_interfaces() {
        let schema = Schema::new("Order").with_field(
            Field::array_of("lines", FieldType::Object).with_nested(vec![
                Field::new("sku", FieldType::String).with_description("Stock unit"),
                Field::object("price", vec![Field::new("amount", FieldType::Decimal128)]),
            ]),
        );
        let output = render_type_artifact(&schema);

        let expected = concat!(
            "interface OrderLinesItemType {\n",
            "  sku?: string; // Stock unit\n",
            "  price?: {\n    amount?: Types.Decimal128;\n  };\n",
            "}\n",
            "\n",
            "interface OrderLinesItemTypePriceType {\n",
            "  amount?: Types.Decimal128;\n",
            "}",
        );
        assert!(output.contains(expected), "{}", output);
    }

    #[test]
    fn test_custom_imports() {
        let schema = Schema::new("User")
            .with_import("import { Tag } from \"./tag.dto\";")
            .with_import("  ");
        let output = render_type_artifact(&schema);

        assert!(output.starts_with(
            "import { Document, Types } from \"mongoose\";\nimport { Tag } from \"./tag.dto\";\n\ntype UserDto"
        ));
    }

    #[test]
    fn test_empty_schema() {
        let output = render_type_artifact(&Schema::new("User"));
        assert!(output.contains("type UserDto = {\n\n};"));
    }

    #[test]
    fn test_enum_values_are_emitted_verbatim() {
        let mut field = Field::new("kind", FieldType::Enum);
        field.enum_values = Some(vec![EnumValue::new("A_B", "a b")]);
        let schema = Schema::new("Thing").with_field(field);
        assert!(render_type_artifact(&schema).contains("  A_B = \"a b\""));
    }
}
