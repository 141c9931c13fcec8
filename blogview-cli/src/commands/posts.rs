//! Post index commands
//!
//! Commands: list, show, check

use anyhow::{anyhow, bail, Context, Result};
use blogview_core::{index_directory, BlogConfig, IndexReport};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::ui;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Post key (file name without extension)
    key: String,

    /// Print the front matter instead of the body
    #[arg(long)]
    front_matter: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct PostSummary<'a> {
    key: &'a str,
    title: Option<&'a str>,
    date: Option<String>,
    path: String,
}

/// Index the configured posts directory behind a spinner
fn load_index(config: &BlogConfig) -> Result<IndexReport> {
    let root = config.posts_root();
    let options = config.index_options();

    ui::with_spinner(
        format!("Indexing {}", root.display()),
        |report: &IndexReport| format!("Indexed {} posts", report.posts.len()),
        || index_directory(&root, &options),
    )
    .with_context(|| format!("Failed to index posts in {}", root.display()))
}

pub fn run_list(args: ListArgs, config: &BlogConfig) -> Result<()> {
    let report = load_index(config)?;

    match args.format {
        OutputFormat::Json => {
            let summaries: Vec<PostSummary> = report
                .posts
                .iter()
                .map(|post| PostSummary {
                    key: post.key,
                    title: post.front_matter.title(),
                    date: post.front_matter.date(),
                    path: post.path.display().to_string(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        OutputFormat::Text => {
            for post in report.posts.iter() {
                match post.front_matter.title() {
                    Some(title) => println!("{}  {}", post.key, title),
                    None => println!("{}", post.key),
                }
            }
        }
    }

    Ok(())
}

pub fn run_show(args: ShowArgs, config: &BlogConfig) -> Result<()> {
    let report = load_index(config)?;
    let post = report
        .posts
        .get(&args.key)
        .ok_or_else(|| anyhow!("No post with key '{}'", args.key))?;

    match (args.format, args.front_matter) {
        (OutputFormat::Text, false) => print!("{}", post.body),
        (OutputFormat::Text, true) => print!("{}", post.front_matter.to_yaml()?),
        (OutputFormat::Json, false) => {
            let value = serde_json::json!({
                "key": post.key,
                "path": post.path.display().to_string(),
                "front_matter": post.front_matter,
                "body": post.body,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        (OutputFormat::Json, true) => {
            println!("{}", serde_json::to_string_pretty(post.front_matter)?);
        }
    }

    Ok(())
}

pub fn run_check(config: &BlogConfig) -> Result<()> {
    let report = load_index(config)?;

    println!(
        "{} posts indexed from {}",
        report.posts.len(),
        config.posts_root().display()
    );

    for collision in &report.collisions {
        println!(
            "duplicate key '{}': {} replaced by {}",
            collision.key,
            collision.replaced.display(),
            collision.kept.display()
        );
    }

    for skipped in &report.skipped {
        println!("skipped {}: {}", skipped.path.display(), skipped.error);
    }

    if !report.skipped.is_empty() {
        bail!("{} file(s) could not be indexed", report.skipped.len());
    }

    Ok(())
}
