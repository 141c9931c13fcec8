use std::path::Path;

use anyhow::{Context, Result};
use blogview_core::BlogConfig;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with default values
    Init(InitArgs),
    /// Print the resolved configuration as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, config: &BlogConfig, config_path: &Path) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args, config_path),
        ConfigCommands::Show => run_show(config),
        ConfigCommands::Path => run_path(config_path),
    }
}

fn run_init(args: InitArgs, config_path: &Path) -> Result<()> {
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    BlogConfig::default()
        .save_to(config_path)
        .context("Failed to write default config")?;

    println!("✅ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", config_path);
    println!("  2. Point content.root at your blog content directory");
    println!("  3. Run: blogview check");

    Ok(())
}

fn run_show(config: &BlogConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}
