//! Field statistics for a schema

use crate::field::Field;
use crate::schema::Schema;
use dtoforge_core::FieldType;
use serde::Serialize;

/// Counts shown in the schema summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchemaStats {
    /// Top-level fields
    pub total_fields: usize,
    /// Top-level required fields
    pub required_fields: usize,
    /// Top-level unique fields
    pub unique_fields: usize,
    /// Top-level enum fields
    pub enum_fields: usize,
    /// Fields at every depth
    pub all_fields: usize,
    /// Deepest nesting level (1 for a flat schema, 0 when empty)
    pub max_depth: usize,
}

impl SchemaStats {
    /// Compute statistics for a schema
    pub fn of(schema: &Schema) -> Self {
        let top = &schema.fields;
        Self {
            total_fields: top.len(),
            required_fields: top.iter().filter(|f| f.required).count(),
            unique_fields: top.iter().filter(|f| f.unique).count(),
            enum_fields: top
                .iter()
                .filter(|f| f.field_type == FieldType::Enum)
                .count(),
            all_fields: count_all(top),
            max_depth: depth(top),
        }
    }
}

fn count_all(fields: &[Field]) -> usize {
    fields.iter().map(|f| 1 + count_all(f.nested())).sum()
}

fn depth(fields: &[Field]) -> usize {
    fields
        .iter()
        .map(|f| 1 + depth(f.nested()))
        .max()
        .unwrap_or(0)
}

// ============================================================================
// Tests
// ============================================================================
