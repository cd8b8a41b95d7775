use super::{GroupSource, GroupTag, UserRecord};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Lists the group export files directly inside `dir`.
///
/// Only regular files whose extension equals `extension` are kept. Results
/// are sorted by file name so group order does not depend on the filesystem.
///
/// # Errors
///
/// Returns an error if the directory does not exist or cannot be read.
pub fn list_group_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("Failed to list directory: {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path.to_path_buf());
        } else {
            trace!(path = %path.display(), "Skipping non-group entry");
        }
    }

    Ok(files)
}

/// Reads one group export file.
///
/// The group tag is the file stem; the contents must be a JSON array of
/// objects.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not decode as an array
/// of objects.
pub fn load_group_file(path: &Path) -> Result<GroupSource> {
    let tag = GroupTag::from_path(path)
        .with_context(|| format!("Cannot derive group name from: {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read group file: {}", path.display()))?;
    let users = parse_group_str(&content)
        .with_context(|| format!("Invalid group file: {}", path.display()))?;

    debug!(group = %tag, users = users.len(), "Loaded group file");
    Ok(GroupSource { tag, users })
}

/// Decodes the contents of a group export file
///
/// # Errors
///
/// Returns an error if `content` is not a JSON array of objects.
pub fn parse_group_str(content: &str) -> Result<Vec<UserRecord>> {
    serde_json::from_str(content).context("Expected a JSON array of user objects")
}

/// Lists and loads every group file of `dir`, in listing order.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or any file fails to
/// load. Nothing is returned partially.
pub fn load_group_dir(dir: &Path, extension: &str) -> Result<Vec<GroupSource>> {
    list_group_files(dir, extension)?
        .iter()
        .map(|path| load_group_file(path))
        .collect()
}
