//! Tracing setup for the blogview CLI
//!
//! Usage:
//!   blogview --debug ...              # Debug logging to stderr
//!   RUST_LOG=blogview_core=debug ...  # Fine-grained log control
//!
//! The terminal viewer owns the screen, so in viewer mode log lines are
//! discarded; skipped files are shown inside the viewer instead.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets the filter to debug unless RUST_LOG is set)
    pub debug: bool,
    /// Drop all output (terminal viewer mode)
    pub silent: bool,
}

/// Initialize tracing with compact stderr output
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = if config.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .compact();

    if config.silent {
        builder
            .with_writer(std::io::sink)
            .try_init()
            .map_err(|err| anyhow!(err))
    } else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err))
    }
}
