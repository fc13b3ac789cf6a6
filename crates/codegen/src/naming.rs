//! Identifier derivation for generated artifacts
//!
//! Every generated name is derived from the schema name or a field name by
//! plain concatenation. Names are never sanitised: an empty or invalid name
//! yields an equally empty or invalid identifier.

/// Upper-case the first character, leaving the rest untouched
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `role` → `RoleEnum`
pub fn enum_name(field_name: &str) -> String {
    format!("{}Enum", capitalize(field_name))
}

/// `User` → `UserDto`
pub fn dto_name(schema_name: &str) -> String {
    format!("{}Dto", schema_name)
}

/// `User` → `UserSchemaDto`
pub fn schema_dto_name(schema_name: &str) -> String {
    format!("{}SchemaDto", schema_name)
}

/// `User` → `CreateUserDto`
pub fn create_dto_name(schema_name: &str) -> String {
    format!("Create{}Dto", schema_name)
}

/// `User` → `UpdateUserDto`
pub fn update_dto_name(schema_name: &str) -> String {
    format!("Update{}Dto", schema_name)
}

/// `User` → `UserPopulatedDto`
pub fn populated_dto_name(schema_name: &str) -> String {
    format!("{}PopulatedDto", schema_name)
}

/// `User` → `UserSchema`
pub fn schema_var_name(schema_name: &str) -> String {
    format!("{}Schema", schema_name)
}

/// Nested interface name for an object field under `prefix`
pub fn interface_name(prefix: &str, field_name: &str) -> String {
    format!("{}{}Type", prefix, capitalize(field_name))
}

/// Nested interface name for the elements of an array field under `prefix`
pub fn item_interface_name(prefix: &str, field_name: &str) -> String {
    format!("{}{}ItemType", prefix, capitalize(field_name))
}

/// Lower-cased schema name used for file names and the dto import path
pub fn file_stem(schema_name: &str) -> String {
    schema_name.to_lowercase()
}

/// `User` → `user.dto.ts`
pub fn dto_file_name(schema_name: &str) -> String {
    format!("{}.dto.ts", file_stem(schema_name))
}

/// `User` → `user.model.ts`
pub fn model_file_name(schema_name: &str) -> String {
    format!("{}.model.ts", file_stem(schema_name))
}

// ============================================================================
// Tests
// ============================================================================
