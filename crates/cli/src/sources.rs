//! Resolving command-line inputs to schema files

use dtoforge_core::ForgeError;
use dtoforge_ir::is_schema_file;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Expand files and directories into the list of schema files to load.
///
/// Files are taken as given. Directories are walked recursively for
/// `*.json` files, in file-name order. Duplicates are dropped.
pub fn collect_schema_files(inputs: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            files.extend(walk_dir(input)?);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(ForgeError::SchemaNotFound(input.clone()).into());
        }
    }

    let mut seen = std::collections::HashSet::new();
    files.retain(|path| seen.insert(path.clone()));
    Ok(files)
}

fn walk_dir(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if is_schema_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    tracing::debug!(dir = %dir.display(), files = files.len(), "scanned directory");
    Ok(files)
}

// ============================================================================
// Tests
// ============================================================================
