//! Core traits for DTO Forge

use std::path::Path;

// ============================================================================
// Persistable Trait
// ============================================================================

/// Trait for documents stored on disk under a known file extension
///
/// # Example
///
/// ```rust,ignore
/// use dtoforge_core::Persistable;
///
/// struct Schema;
///
/// impl Persistable for Schema {
///     fn file_extension() -> &'static str {
///         "json"
///     }
/// }
///
/// assert!(Schema::has_extension(Path::new("user.JSON")));
/// ```
pub trait Persistable {
    /// Get the file extension for this type (without the dot)
    fn file_extension() -> &'static str;

    /// Check whether a path carries this type's file extension
    fn has_extension(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(Self::file_extension()))
    }
}

// ============================================================================
// Tests
// ============================================================================
