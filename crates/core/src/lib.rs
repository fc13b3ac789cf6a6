//! # DTO Forge Core
//!
//! Core types, traits, and error handling for DTO Forge.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: the closed set of field types and validation rule kinds
//! - **Traits**: `Persistable` for documents stored under a file extension
//! - **Errors**: Unified error handling with `ForgeError` and `ForgeResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ForgeError, ForgeResult};
pub use traits::Persistable;
pub use types::{FieldId, FieldType, ValidationKind, new_field_id};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
