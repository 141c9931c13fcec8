//! Recursive file listing by extension

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{BlogError, Result};

/// Extension used for posts when nothing else is configured
pub const DEFAULT_EXTENSION: &str = ".md";

/// List every file under `root` whose file name ends with `extension`.
///
/// Entries are visited sorted by file name at every level, so the result is
/// the same on every platform and every run. Directories are never returned,
/// even when their name matches. A symlink is listed when it points at a
/// file; symlinked directories are not descended into.
///
/// A missing root is an error rather than an empty result.
pub fn list_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(BlogError::path_not_found(root));
    }
    if !root.is_dir() {
        return Err(BlogError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| BlogError::Walk {
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;

        if !entry.file_name().to_string_lossy().ends_with(extension) {
            continue;
        }
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        } else if entry.path_is_symlink() {
            if entry.path().is_file() {
                files.push(entry.into_path());
            } else {
                debug!(path = %entry.path().display(), "ignoring symlink that does not point at a file");
            }
        }
    }

    debug!(root = %root.display(), extension, count = files.len(), "listed files");
    Ok(files)
}
