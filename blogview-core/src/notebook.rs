//! Notebook to markdown conversion by shelling out to an external converter
//!
//! By default every `.ipynb` under a directory is passed to
//! `jupyter nbconvert --to markdown`, which writes the markdown file next to
//! the notebook. Notebooks are converted one at a time.

use std::path::{Component, Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{BlogError, Result};
use crate::lister::list_files;

/// Directory name Jupyter uses for autosave copies
const CHECKPOINT_DIR: &str = ".ipynb_checkpoints";

/// External program used to convert a single notebook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotebookConverter {
    /// Executable to run
    pub program: String,
    /// Arguments placed before the notebook path
    pub args: Vec<String>,
    /// File name suffix of notebooks
    pub extension: String,
}

impl Default for NotebookConverter {
    fn default() -> Self {
        Self {
            program: "jupyter".to_string(),
            args: vec![
                "nbconvert".to_string(),
                "--to".to_string(),
                "markdown".to_string(),
            ],
            extension: ".ipynb".to_string(),
        }
    }
}

impl NotebookConverter {
    /// Command line for one notebook, for display
    pub fn command_line(&self, notebook: &Path) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.push(notebook.display().to_string());
        parts.join(" ")
    }

    /// Run the converter on one notebook and wait for it
    pub fn convert(&self, notebook: &Path) -> Result<()> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(notebook)
            .output()
            .map_err(|err| {
                BlogError::converter(notebook, format!("failed to start `{}`: {}", self.program, err))
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
        Err(BlogError::converter(
            notebook,
            format!("`{}` exited with {} {}", self.program, output.status, detail.trim())
                .trim_end()
                .to_string(),
        ))
    }
}

/// A notebook the converter did not manage to convert
#[derive(Debug)]
pub struct FailedConversion {
    pub path: PathBuf,
    pub error: BlogError,
}

/// Outcome of a conversion run
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Notebooks converted, or that would be converted in a dry run
    pub converted: Vec<PathBuf>,
    pub failed: Vec<FailedConversion>,
    pub dry_run: bool,
}

impl ConversionReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Find notebooks under `root`, leaving out Jupyter checkpoint copies
pub fn find_notebooks(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    Ok(list_files(root, extension)?
        .into_iter()
        .filter(|path| {
            !path
                .components()
                .any(|c| matches!(c, Component::Normal(name) if name == CHECKPOINT_DIR))
        })
        .collect())
}

/// Convert every notebook under `root`.
///
/// `on_notebook` is called before each notebook is handled, which lets the
/// caller drive a progress display. A failing notebook is recorded and the
/// run carries on with the next one.
pub fn convert_notebooks(
    root: &Path,
    converter: &NotebookConverter,
    dry_run: bool,
    mut on_notebook: impl FnMut(&Path),
) -> Result<ConversionReport> {
    let notebooks = find_notebooks(root, &converter.extension)?;
    let mut report = ConversionReport {
        dry_run,
        ..Default::default()
    };

    for notebook in notebooks {
        on_notebook(&notebook);

        if dry_run {
            info!("would run: {}", converter.command_line(&notebook));
            report.converted.push(notebook);
            continue;
        }

        info!("converting {}", notebook.display());
        match converter.convert(&notebook) {
            Ok(()) => report.converted.push(notebook),
            Err(error) => {
                warn!(path = %notebook.display(), error = %error, "notebook conversion failed");
                report.failed.push(FailedConversion {
                    path: notebook,
                    error,
                });
            }
        }
    }

    Ok(report)
}
