//! blogview CLI - terminal viewer for a markdown blog
//!
//! Entry point for the `blogview` command-line tool:
//! - Terminal viewer over the indexed posts (default command)
//! - Scripted access to the index (`list`, `show`, `check`)
//! - Notebook to markdown conversion (`convert`)
//! - Configuration management (`config`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use blogview_core::BlogConfig;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

mod commands;
mod config;
mod tracing_setup;
mod tui;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "blogview",
    author,
    version,
    about = "Browse a directory of markdown posts with YAML front matter",
    long_about = "Index markdown posts by file name, split off their YAML front matter, \
                  and read them in a terminal viewer or from scripts."
)]
struct Cli {
    /// Content root directory (overrides content.root from the config)
    #[arg(long, value_name = "DIR", global = true)]
    content_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.blogview/config.toml
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the terminal viewer (default)
    View,
    /// List post keys in index order
    List(commands::posts::ListArgs),
    /// Print one post's body or front matter
    Show(commands::posts::ShowArgs),
    /// Index all posts and report files that failed or collided
    Check,
    /// Convert notebooks to markdown
    Convert(commands::convert::ConvertArgs),
    /// Manage blogview configuration (init, show, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::View);

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        silent: matches!(command, Commands::View),
    })
    .ok();

    ui::init_quiet_mode(cli.quiet);

    let config_path = cli.config.unwrap_or_else(BlogConfig::config_path);
    let mut config = BlogConfig::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(dir) = cli.content_dir {
        config.content.root = dir;
    }
    debug!(
        config = %config_path.display(),
        posts = %config.posts_root().display(),
        "resolved configuration"
    );

    match command {
        Commands::View => tui::run(&config)?,
        Commands::List(args) => commands::run_list(args, &config)?,
        Commands::Show(args) => commands::run_show(args, &config)?,
        Commands::Check => commands::run_check(&config)?,
        Commands::Convert(args) => commands::run_convert(args, &config)?,
        Commands::Config(args) => config::run_config(args, &config, &config_path)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
