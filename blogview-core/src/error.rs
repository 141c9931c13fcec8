/// Structured error types for blogview-core.
///
/// Uses `thiserror` so library callers can match on what went wrong.
/// The `blogview` binary wraps these in `anyhow` for reporting.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for blogview-core operations
#[derive(Error, Debug)]
pub enum BlogError {
    /// Content does not start with an anchored `---` block
    #[error("no front matter in {}: content must start with a `---` line and close with another", show(.path))]
    MissingFrontMatter { path: Option<PathBuf> },

    /// The `---` block is present but its YAML is invalid or not a mapping
    #[error("malformed front matter in {}: {reason}", show(.path))]
    MalformedFrontMatter {
        path: Option<PathBuf>,
        reason: String,
    },

    /// File could not be opened or read (includes invalid UTF-8)
    #[error("failed to read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// Directory traversal failed below the root
    #[error("failed to walk {path:?}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Root directory does not exist
    #[error("path not found: {path:?}")]
    PathNotFound { path: PathBuf },

    /// Root exists but is a file
    #[error("not a directory: {path:?}")]
    NotADirectory { path: PathBuf },

    /// File name reduces to an empty post key
    #[error("cannot derive a post key from {path:?}")]
    EmptyKey { path: PathBuf },

    /// Two files map to the same key and duplicates are rejected
    #[error("duplicate post key '{key}': {first:?} and {second:?}")]
    DuplicateKey {
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Notebook converter could not start or exited with failure
    #[error("converter failed on {path:?}: {reason}")]
    Converter { path: PathBuf, reason: String },

    /// Serializing front matter back to YAML failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for blogview-core operations
pub type Result<T> = std::result::Result<T, BlogError>;

fn show(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!("{:?}", path),
        None => "content".to_string(),
    }
}

impl BlogError {
    /// Create a missing front matter error without a path
    pub fn missing_front_matter() -> Self {
        Self::MissingFrontMatter { path: None }
    }

    /// Create a malformed front matter error without a path
    pub fn malformed_front_matter(reason: impl Into<String>) -> Self {
        Self::MalformedFrontMatter {
            path: None,
            reason: reason.into(),
        }
    }

    /// Create an I/O error for a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create a converter error
    pub fn converter(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Converter {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Attach a file path to a parser error that was raised on a bare string.
    ///
    /// Errors that already carry a path are returned unchanged.
    pub fn with_path(self, file: &Path) -> Self {
        match self {
            Self::MissingFrontMatter { path: None } => Self::MissingFrontMatter {
                path: Some(file.to_path_buf()),
            },
            Self::MalformedFrontMatter { path: None, reason } => Self::MalformedFrontMatter {
                path: Some(file.to_path_buf()),
                reason,
            },
            other => other,
        }
    }

    /// True for the two front matter parse failures
    pub fn is_front_matter_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFrontMatter { .. } | Self::MalformedFrontMatter { .. }
        )
    }
}
