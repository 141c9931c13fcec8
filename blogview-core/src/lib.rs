pub mod config;
pub mod context;
pub mod error;
pub mod frontmatter;
pub mod indexer;
pub mod lister;
pub mod notebook;

pub use config::BlogConfig;
pub use context::BlogContext;
pub use error::{BlogError, Result};
pub use frontmatter::{parse, render, FrontMatter};
pub use indexer::{
    index_directory, post_key, read_post, Collision, DuplicatePolicy, FailurePolicy, IndexOptions,
    IndexReport, Post, PostCollection, SkippedFile,
};
pub use lister::list_files;
pub use notebook::{convert_notebooks, find_notebooks, ConversionReport, NotebookConverter};
