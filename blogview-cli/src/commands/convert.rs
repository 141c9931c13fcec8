//! Notebook conversion command

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use blogview_core::{convert_notebooks, BlogConfig};
use clap::Parser;

use crate::ui;

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Directory to search for notebooks (default: the content root)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// List the notebooks that would be converted without running the converter
    #[arg(long = "dry-run")]
    dry_run: bool,
}

pub fn run_convert(args: ConvertArgs, config: &BlogConfig) -> Result<()> {
    let root = args.dir.unwrap_or_else(|| config.content.root.clone());
    let converter = &config.notebooks;

    let pb = ui::spinner(format!("Searching {} for notebooks", root.display()));
    let result = convert_notebooks(&root, converter, args.dry_run, |notebook| {
        ui::set_message(&pb, format!("Converting {}", notebook.display()));
    });

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            ui::finish_error(pb, format!("Conversion failed: {}", e));
            return Err(e).with_context(|| format!("Failed to convert notebooks in {}", root.display()));
        }
    };

    if report.is_success() {
        ui::finish_success(pb, format!("{} notebooks handled", report.converted.len()));
    } else {
        ui::finish_error(pb, format!("{} notebooks failed", report.failed.len()));
    }

    for path in &report.converted {
        if report.dry_run {
            println!("would run: {}", converter.command_line(path));
        } else {
            println!("converted {}", path.display());
        }
    }
    for failed in &report.failed {
        println!("failed {}: {}", failed.path.display(), failed.error);
    }

    if !report.is_success() {
        bail!("{} notebook(s) failed to convert", report.failed.len());
    }

    Ok(())
}
