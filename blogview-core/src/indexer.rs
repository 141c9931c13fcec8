//! Post indexing: list files, parse each one, and build the key-indexed
//! body and front matter mappings.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{BlogError, Result};
use crate::frontmatter::{self, FrontMatter};
use crate::lister::{list_files, DEFAULT_EXTENSION};

/// What to do when a single file cannot be read or parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Leave the file out, log it and record it in the report
    #[default]
    Skip,
    /// Fail the whole pass on the first bad file
    Abort,
}

/// What to do when two files produce the same key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The file visited later replaces the earlier one
    #[default]
    LastWins,
    /// Fail the pass with `DuplicateKey`
    Reject,
}

/// Options for an indexing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// File name suffix that marks a post, including the dot
    pub extension: String,
    pub on_error: FailurePolicy,
    pub on_duplicate: DuplicatePolicy,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            on_error: FailurePolicy::default(),
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}

/// Borrowed view of one indexed post
#[derive(Debug, Clone, Copy)]
pub struct Post<'a> {
    pub key: &'a str,
    pub front_matter: &'a FrontMatter,
    pub body: &'a str,
    pub path: &'a Path,
}

/// Two parallel mappings (key -> body, key -> front matter) sharing one key set.
///
/// Entries are only ever inserted together, so a key is either in both
/// mappings or in neither.
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    bodies: IndexMap<String, String>,
    front_matter: IndexMap<String, FrontMatter>,
    sources: IndexMap<String, PathBuf>,
}

impl PostCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parsed post, returning the path it replaced if the key existed
    fn insert(
        &mut self,
        key: String,
        front_matter: FrontMatter,
        body: String,
        path: PathBuf,
    ) -> Option<PathBuf> {
        self.bodies.insert(key.clone(), body);
        self.front_matter.insert(key.clone(), front_matter);
        self.sources.insert(key, path)
    }

    pub fn get(&self, key: &str) -> Option<Post<'_>> {
        let (key, body) = self.bodies.get_key_value(key)?;
        Some(Post {
            key,
            body,
            front_matter: self.front_matter.get(key)?,
            path: self.sources.get(key)?,
        })
    }

    pub fn get_body(&self, key: &str) -> Option<&str> {
        self.bodies.get(key).map(String::as_str)
    }

    pub fn get_front_matter(&self, key: &str) -> Option<&FrontMatter> {
        self.front_matter.get(key)
    }

    /// Source file a key was read from
    pub fn source_path(&self, key: &str) -> Option<&Path> {
        self.sources.get(key).map(PathBuf::as_path)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.bodies.contains_key(key)
    }

    /// Keys in index order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bodies.keys().map(String::as_str)
    }

    /// Posts in index order
    pub fn iter(&self) -> impl Iterator<Item = Post<'_>> {
        self.keys().filter_map(move |key| self.get(key))
    }

    pub fn bodies(&self) -> &IndexMap<String, String> {
        &self.bodies
    }

    pub fn front_matters(&self) -> &IndexMap<String, FrontMatter> {
        &self.front_matter
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// A file left out of the index under `FailurePolicy::Skip`
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: BlogError,
}

/// A key that was produced by more than one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub key: String,
    /// File whose entry was overwritten
    pub replaced: PathBuf,
    /// File that now owns the key
    pub kept: PathBuf,
}

/// Outcome of one indexing pass
#[derive(Debug, Default)]
pub struct IndexReport {
    pub posts: PostCollection,
    pub skipped: Vec<SkippedFile>,
    pub collisions: Vec<Collision>,
}

impl IndexReport {
    /// True when every listed file made it into the index
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Derive the post key from a path: the file name with `extension` removed.
///
/// Uses the platform path API, so `a/b/foo.md` and `a\b\foo.md` (on Windows)
/// both give `foo`. Returns `None` when nothing is left.
pub fn post_key(path: &Path, extension: &str) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let key = name.strip_suffix(extension).unwrap_or(name.as_ref());
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Read one post file and split it into front matter and body
pub fn read_post(path: &Path) -> Result<(FrontMatter, String)> {
    let content = fs::read_to_string(path).map_err(|err| BlogError::io(path, err))?;
    frontmatter::parse(&content).map_err(|err| err.with_path(path))
}

fn index_file(path: &Path, extension: &str) -> Result<(String, FrontMatter, String)> {
    let key = post_key(path, extension).ok_or_else(|| BlogError::EmptyKey {
        path: path.to_path_buf(),
    })?;
    let (front_matter, body) = read_post(path)?;
    Ok((key, front_matter, body))
}

/// Index every post under `root`.
///
/// Files are processed one at a time in the lister's sorted order. A file
/// that fails is handled by `options.on_error`; it never leaves a partial
/// entry behind.
pub fn index_directory(root: &Path, options: &IndexOptions) -> Result<IndexReport> {
    let files = list_files(root, &options.extension)?;
    let mut report = IndexReport::default();

    for path in files {
        let (key, front_matter, body) = match index_file(&path, &options.extension) {
            Ok(parsed) => parsed,
            Err(err) => match options.on_error {
                FailurePolicy::Abort => return Err(err),
                FailurePolicy::Skip => {
                    warn!(path = %path.display(), error = %err, "skipping post");
                    report.skipped.push(SkippedFile { path, error: err });
                    continue;
                }
            },
        };

        if options.on_duplicate == DuplicatePolicy::Reject {
            if let Some(first) = report.posts.source_path(&key) {
                return Err(BlogError::DuplicateKey {
                    key,
                    first: first.to_path_buf(),
                    second: path,
                });
            }
        }

        debug!(key = %key, path = %path.display(), "indexed post");
        if let Some(replaced) = report
            .posts
            .insert(key.clone(), front_matter, body, path.clone())
        {
            warn!(
                key = %key,
                replaced = %replaced.display(),
                kept = %path.display(),
                "duplicate post key, later file wins"
            );
            report.collisions.push(Collision {
                key,
                replaced,
                kept: path,
            });
        }
    }

    info!(
        root = %root.display(),
        posts = report.posts.len(),
        skipped = report.skipped.len(),
        "indexed posts"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_key_strips_directory_and_extension() {
        let path = Path::new("content").join("posts").join("2020").join("hello.md");
        assert_eq!(post_key(&path, ".md").as_deref(), Some("hello"));
    }

    #[test]
    fn test_post_key_only_strips_configured_suffix() {
        assert_eq!(
            post_key(Path::new("notes.v2.md"), ".md").as_deref(),
            Some("notes.v2")
        );
        assert_eq!(
            post_key(Path::new("page.markdown"), ".markdown").as_deref(),
            Some("page")
        );
    }

    #[test]
    fn test_post_key_empty() {
        assert_eq!(post_key(Path::new("posts/.md"), ".md"), None);
    }

    #[test]
    fn test_collection_insert_keeps_mappings_in_step() {
        let mut posts = PostCollection::new();
        assert!(posts
            .insert("a".into(), FrontMatter::new(), "one".into(), "a.md".into())
            .is_none());
        let replaced = posts.insert("a".into(), FrontMatter::new(), "two".into(), "b/a.md".into());

        assert_eq!(replaced, Some(PathBuf::from("a.md")));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts.front_matters().len(), 1);
        assert_eq!(posts.get_body("a"), Some("two"));
        assert_eq!(posts.source_path("a"), Some(Path::new("b/a.md")));
    }

    #[test]
    fn test_policy_names() {
        let policy: FailurePolicy = serde_yaml::from_str("abort").unwrap();
        assert_eq!(policy, FailurePolicy::Abort);
        let policy: DuplicatePolicy = serde_yaml::from_str("last-wins").unwrap();
        assert_eq!(policy, DuplicatePolicy::LastWins);
    }
}
