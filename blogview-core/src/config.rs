use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::indexer::{DuplicatePolicy, FailurePolicy, IndexOptions};
use crate::lister::DEFAULT_EXTENSION;
use crate::notebook::NotebookConverter;

/// Overrides `content.root` when set
pub const CONTENT_DIR_ENV: &str = "BLOGVIEW_CONTENT_DIR";

/// Configuration for blogview, read from ~/.blogview/config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub content: ContentConfig,
    pub viewer: ViewerConfig,
    pub notebooks: NotebookConverter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root directory
    pub root: PathBuf,
    /// Posts directory, relative to the content root
    pub posts_dir: PathBuf,
    /// File name suffix of posts
    pub extension: String,
    pub on_error: FailurePolicy,
    pub on_duplicate: DuplicatePolicy,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("content"),
            posts_dir: PathBuf::from("posts"),
            extension: DEFAULT_EXTENSION.to_string(),
            on_error: FailurePolicy::default(),
            on_duplicate: DuplicatePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Heading shown above the post list
    pub title: String,
    /// Show front matter above the body on start
    pub show_front_matter: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "blog".to_string(),
            show_front_matter: false,
        }
    }
}

impl BlogConfig {
    /// Load config from ~/.blogview/config.toml.
    ///
    /// A missing file gives the defaults; a file that exists but does not
    /// parse is an error.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, falling back to defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .context(format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?
        } else {
            Self::default()
        };

        if let Ok(dir) = env::var(CONTENT_DIR_ENV) {
            if !dir.is_empty() {
                config.content.root = PathBuf::from(dir);
            }
        }

        config.expand_variables();
        Ok(config)
    }

    /// Get config file path: ~/.blogview/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".blogview/config.toml")
    }

    /// Directory that holds the posts: content root joined with posts_dir
    pub fn posts_root(&self) -> PathBuf {
        self.content.root.join(&self.content.posts_dir)
    }

    /// Indexing options derived from the content section
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            extension: self.content.extension.clone(),
            on_error: self.content.on_error,
            on_duplicate: self.content.on_duplicate,
        }
    }

    /// Expand `${HOME}` and a leading `~` in paths
    fn expand_variables(&mut self) {
        self.content.root = expand_path(&self.content.root);
        self.content.posts_dir = expand_path(&self.content.posts_dir);
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Write the config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)
            .context(format!("Failed to write config file: {:?}", path))
    }
}

fn expand_path(path: &Path) -> PathBuf {
    let home = dirs::home_dir()
        .map(|h| h.display().to_string())
        .or_else(|| env::var("HOME").ok())
        .unwrap_or_default();

    let raw = path.display().to_string();
    let expanded = raw.replace("${HOME}", &home);

    if expanded == "~" {
        PathBuf::from(home)
    } else if let Some(rest) = expanded.strip_prefix("~/") {
        Path::new(&home).join(rest)
    } else {
        PathBuf::from(expanded)
    }
}
