//! Structural edits over the field tree
//!
//! Every operation takes the current value and returns a new one; the input
//! is never modified. Sequences are addressed by a [`FieldPath`] that is
//! resolved afresh on each call.
//!
//! Edits are total: unresolvable paths and unknown ids leave the tree as it
//! was.

use crate::field::{Field, FieldPatch};
use crate::schema::Schema;
use dtoforge_core::FieldId;
use std::fmt;

// ============================================================================
// FieldPath
// ============================================================================

/// Ids of the fields leading from the root sequence to a nested sequence.
///
/// The empty path addresses the root sequence itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<FieldId>);

impl FieldPath {
    /// The root sequence
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path to the nested sequence of the given ancestors
    pub fn new<S: Into<FieldId>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self(ids.into_iter().map(Into::into).collect())
    }

    /// Path to the nested sequence of `id`, below this one
    pub fn child(&self, id: impl Into<FieldId>) -> Self {
        let mut ids = self.0.clone();
        ids.push(id.into());
        Self(ids)
    }

    /// Whether this addresses the root sequence
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Ancestor ids, outermost first
    pub fn ids(&self) -> &[FieldId] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0.join("/"))
        }
    }
}

// ============================================================================
// Sequence operations
// ============================================================================

/// Append `field` to the sequence addressed by `target`
pub fn insert(fields: &[Field], target: &FieldPath, field: Field) -> Vec<Field> {
    let mut next = fields.to_vec();
    match sequence_mut(&mut next, target.ids()) {
        Some(sequence) => sequence.push(field),
        None => tracing::debug!(target = %target, "insert target not found; tree unchanged"),
    }
    next
}

/// Remove the field with `field_id` from the sequence addressed by `target`.
///
/// Only that sequence is searched; the removed field takes its subtree with it.
pub fn remove(fields: &[Field], field_id: &str, target: &FieldPath) -> Vec<Field> {
    let mut next = fields.to_vec();
    match sequence_mut(&mut next, target.ids()) {
        Some(sequence) => {
            let before = sequence.len();
            sequence.retain(|f| f.id != field_id);
            if sequence.len() == before {
                tracing::debug!(field_id, target = %target, "field not in target; tree unchanged");
            }
        }
        None => tracing::debug!(target = %target, "remove target not found; tree unchanged"),
    }
    next
}

/// Merge `patch` into the first field (depth-first) whose id matches
pub fn update(fields: &[Field], field_id: &str, patch: &FieldPatch) -> Vec<Field> {
    let mut next = fields.to_vec();
    match find_by_id_mut(&mut next, field_id) {
        Some(field) => field.apply_patch(patch),
        None => tracing::debug!(field_id, "update target not found; tree unchanged"),
    }
    next
}

/// Depth-first search for a field by id
pub fn find_by_id<'a>(fields: &'a [Field], field_id: &str) -> Option<&'a Field> {
    for field in fields {
        if field.id == field_id {
            return Some(field);
        }
        if let Some(found) = find_by_id(field.nested(), field_id) {
            return Some(found);
        }
    }
    None
}

/// Flip the expansion state of the field with `field_id`
pub fn toggle_expansion(fields: &[Field], field_id: &str) -> Vec<Field> {
    match find_by_id(fields, field_id) {
        Some(field) => update(
            fields,
            field_id,
            &FieldPatch::new().expanded(!field.is_expanded),
        ),
        None => fields.to_vec(),
    }
}

/// Expand or collapse every top-level field
pub fn set_all_expanded(fields: &[Field], expanded: bool) -> Vec<Field> {
    fields
        .iter()
        .cloned()
        .map(|mut field| {
            field.is_expanded = expanded;
            field
        })
        .collect()
}

fn sequence_mut<'a>(fields: &'a mut Vec<Field>, path: &[FieldId]) -> Option<&'a mut Vec<Field>> {
    match path.split_first() {
        None => Some(fields),
        Some((head, rest)) => {
            let parent = fields.iter_mut().find(|f| &f.id == head)?;
            let nested = parent.nested_fields.as_mut()?;
            sequence_mut(nested, rest)
        }
    }
}

fn find_by_id_mut<'a>(fields: &'a mut [Field], field_id: &str) -> Option<&'a mut Field> {
    for field in fields.iter_mut() {
        if field.id == field_id {
            return Some(field);
        }
        if let Some(nested) = field.nested_fields.as_mut() {
            if let Some(found) = find_by_id_mut(nested, field_id) {
                return Some(found);
            }
        }
    }
    None
}

// ============================================================================
// Schema operations
// ============================================================================

impl Schema {
    /// Schema with `field` appended to the sequence addressed by `target`
    pub fn insert_field(&self, target: &FieldPath, field: Field) -> Schema {
        self.with_fields(insert(&self.fields, target, field))
    }

    /// Schema without the field `field_id` in the sequence addressed by `target`
    pub fn remove_field(&self, field_id: &str, target: &FieldPath) -> Schema {
        self.with_fields(remove(&self.fields, field_id, target))
    }

    /// Schema with `patch` merged into the field `field_id`
    pub fn update_field(&self, field_id: &str, patch: &FieldPatch) -> Schema {
        self.with_fields(update(&self.fields, field_id, patch))
    }

    /// Schema with the expansion state of `field_id` flipped
    pub fn toggle_expansion(&self, field_id: &str) -> Schema {
        self.with_fields(toggle_expansion(&self.fields, field_id))
    }

    /// Schema with every top-level field expanded or collapsed
    pub fn set_all_expanded(&self, expanded: bool) -> Schema {
        self.with_fields(set_all_expanded(&self.fields, expanded))
    }

    /// Find a field anywhere in the tree
    pub fn find_field(&self, field_id: &str) -> Option<&Field> {
        find_by_id(&self.fields, field_id)
    }

    fn with_fields(&self, fields: Vec<Field>) -> Schema {
        Schema {
            name: self.name.clone(),
            fields,
            imports: self.imports.clone(),
            options: self.options.clone(),
            indexes: self.indexes.clone(),
            hooks: self.hooks.clone(),
            virtuals: self.virtuals.clone(),
            methods: self.methods.clone(),
            statics: self.statics.clone(),
        }
    }
}

/// Insert `seed` into the sequence addressed by `target`
pub fn apply_insert(schema: &Schema, target: &FieldPath, seed: Field) -> Schema {
    schema.insert_field(target, seed)
}

/// Remove `field_id` from the sequence addressed by `target`
pub fn apply_remove(schema: &Schema, field_id: &str, target: &FieldPath) -> Schema {
    schema.remove_field(field_id, target)
}

/// Merge `patch` into the field `field_id`
pub fn apply_update(schema: &Schema, field_id: &str, patch: &FieldPatch) -> Schema {
    schema.update_field(field_id, patch)
}

// ============================================================================
// Tests
// ============================================================================
