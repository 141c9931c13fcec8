//! Owned post index handed to the display layer

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::indexer::{index_directory, IndexOptions, IndexReport, PostCollection};

/// Posts directory plus the result of the last successful indexing pass.
///
/// Created once at startup and passed by reference to whatever displays the
/// posts. A refresh is a full re-index.
#[derive(Debug)]
pub struct BlogContext {
    root: PathBuf,
    options: IndexOptions,
    report: IndexReport,
}

impl BlogContext {
    /// Create a context with an empty index. Call [`refresh`](Self::refresh) to fill it.
    pub fn new(root: impl Into<PathBuf>, options: IndexOptions) -> Self {
        Self {
            root: root.into(),
            options,
            report: IndexReport::default(),
        }
    }

    /// Create a context and run the first indexing pass
    pub fn load(root: impl Into<PathBuf>, options: IndexOptions) -> Result<Self> {
        let mut ctx = Self::new(root, options);
        ctx.refresh()?;
        Ok(ctx)
    }

    /// Re-index from scratch.
    ///
    /// The previous index is kept when the new pass fails.
    pub fn refresh(&mut self) -> Result<()> {
        let report = index_directory(&self.root, &self.options)?;
        info!(root = %self.root.display(), posts = report.posts.len(), "refreshed post index");
        self.report = report;
        Ok(())
    }

    pub fn posts(&self) -> &PostCollection {
        &self.report.posts
    }

    pub fn report(&self) -> &IndexReport {
        &self.report
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }
}
