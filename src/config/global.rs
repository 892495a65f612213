//! Global configuration file handling.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::upgrade::UpgradeConfig;

/// User-wide configuration loaded from `config.toml`.
///
/// # Examples
///
/// ```rust,no_run
/// use update_cli::config::GlobalConfig;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = GlobalConfig::load().await?;
/// println!("Releases come from {}", config.upgrade.api_url);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Self-update settings from the `[upgrade]` section.
    #[serde(default, skip_serializing_if = "UpgradeConfig::is_default")]
    pub upgrade: UpgradeConfig,
}

impl GlobalConfig {
    /// Load the configuration from the default location.
    ///
    /// Returns the defaults when no file exists there.
    pub async fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_or_default(&path).await
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// A path that does not exist yields the defaults, same as a missing
    /// default file.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_or_default(&path).await,
            None => Self::load().await,
        }
    }

    /// Load and parse a specific configuration file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid TOML for this schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config from {}", path.display()))
    }

    async fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading global config from {}", path.display());
            Self::load_from(path).await
        } else {
            debug!("No global config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Default location of the configuration file.
    ///
    /// - Unix/macOS: `~/.update/config.toml`
    /// - Windows: `%LOCALAPPDATA%\update\config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("update")
        } else {
            crate::utils::get_home_dir()?.join(".update")
        };

        Ok(config_dir.join("config.toml"))
    }
}
