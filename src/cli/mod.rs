//! Command-line interface for the updater.
//!
//! The binary has a single job, so there are no subcommands: running
//! `update` checks GitHub for a newer release and installs it over itself.
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet`: log verbosity on stderr (`RUST_LOG` wins)
//! - `--config <PATH>`: alternate config file (also `UPDATE_CONFIG`)
//! - `--no-progress`: never draw the download progress bar
//!
//! # Output
//!
//! User-facing results go to stdout. Diagnostics go through `tracing` to
//! stderr.

pub mod upgrade;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::GlobalConfig;
use crate::constants::{CONFIG_PATH_ENV, NO_PROGRESS_ENV};

pub use upgrade::UpgradeArgs;

/// Runtime settings derived from the global flags.
///
/// Split out of [`Cli`] so tests and embedders can run the command with
/// explicit settings instead of parsed arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: Option<String>,

    /// Disable the download progress bar.
    pub no_progress: bool,

    /// Config file to load instead of the default location.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over [`CliConfig::log_level`]. Calling this
    /// more than once is harmless; later calls are ignored.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("info"))
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Update the running binary to the latest GitHub release.
#[derive(Parser, Debug)]
#[command(
    name = "update",
    about = "Update this binary to the latest GitHub release",
    version,
    long_about = None
)]
pub struct Cli {
    /// Options of the update itself.
    #[command(flatten)]
    upgrade: UpgradeArgs,

    /// Enable debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,

    /// Path to a custom global configuration file.
    #[arg(short, long, env = CONFIG_PATH_ENV, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable the download progress bar.
    #[arg(long, env = NO_PROGRESS_ENV, value_parser = clap::builder::BoolishValueParser::new())]
    no_progress: bool,
}

impl Cli {
    /// Run with settings derived from the parsed flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("warn".to_string())
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress,
            config_path: self.config.clone(),
        }
    }

    /// Run with explicit settings.
    ///
    /// Initializes logging, loads the global config and runs the update
    /// command.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let global = GlobalConfig::load_with_optional(config.config_path.clone()).await?;
        upgrade::execute(self.upgrade, &global, config.no_progress).await
    }
}
