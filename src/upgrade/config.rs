use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{CURRENT_VERSION, DEFAULT_API_URL, DEFAULT_APP_NAME, DEFAULT_REPO_OWNER};

/// Identity of the application being updated.
///
/// Built once at startup and passed by reference into every operation of the
/// update flow. Nothing in the flow reads the identity from global state.
///
/// # Examples
///
/// ```rust
/// use update_cli::upgrade::AppInfo;
///
/// let info = AppInfo::new("Heidelberger", "update", "v1.0.0");
/// assert_eq!(info.repo_owner(), "Heidelberger");
/// assert_eq!(info.app_name(), "update");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    repo_owner: String,
    app_name: String,
    current_version: String,
}

impl AppInfo {
    /// Create an `AppInfo` from explicit values.
    pub fn new(
        repo_owner: impl Into<String>,
        app_name: impl Into<String>,
        current_version: impl Into<String>,
    ) -> Self {
        Self {
            repo_owner: repo_owner.into(),
            app_name: app_name.into(),
            current_version: current_version.into(),
        }
    }

    /// Build the identity of the running binary, applying config overrides.
    ///
    /// The version always comes from the compiled-in crate version; owner and
    /// name fall back to the compiled-in defaults when the config is silent.
    pub fn from_config(config: &UpgradeConfig) -> Self {
        Self::new(
            config.repo_owner.as_deref().unwrap_or(DEFAULT_REPO_OWNER),
            config.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME),
            CURRENT_VERSION,
        )
    }

    /// GitHub account publishing the releases.
    pub fn repo_owner(&self) -> &str {
        &self.repo_owner
    }

    /// Application name, also the repository name and asset prefix.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Version of the running binary, as a release tag.
    pub fn current_version(&self) -> &str {
        &self.current_version
    }
}

/// What the CLI does after an install attempt fails.
///
/// Older releases printed the error and then the success banner anyway. That
/// behaviour is still available as [`FailurePolicy::Lenient`], but the default
/// suppresses the banner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Print the error, then the success message, and exit 0.
    Lenient,
    /// Print the error without the success message and exit 0.
    #[default]
    Report,
    /// Print the error and exit with a non-zero status.
    Strict,
}

impl FailurePolicy {
    /// Whether the success banner is still printed after a failed install.
    pub fn announces_success_after_failure(self) -> bool {
        matches!(self, Self::Lenient)
    }

    /// Whether a failed install turns into a failing exit status.
    pub fn fails_process(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lenient => "lenient",
            Self::Report => "report",
            Self::Strict => "strict",
        };
        f.write_str(name)
    }
}

/// Configuration settings for self-update behavior.
///
/// Read from the `[upgrade]` section of the global config file. Every field
/// is optional in the file; missing keys take the defaults below.
///
/// ## TOML Example
/// ```toml
/// [upgrade]
/// api_url = "https://api.github.com"
/// repo_owner = "Heidelberger"
/// app_name = "update"
/// failure_policy = "report"
/// show_progress = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeConfig {
    /// Base URL of the GitHub REST API.
    ///
    /// Only needs changing for GitHub Enterprise or for tests that point the
    /// updater at a local mock server.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Override for the account publishing releases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_owner: Option<String>,

    /// Override for the application name (repository and asset prefix).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Behavior after a failed install.
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Whether to draw a download progress bar on interactive terminals.
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            repo_owner: None,
            app_name: None,
            failure_policy: FailurePolicy::default(),
            show_progress: default_show_progress(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_show_progress() -> bool {
    true
}

impl UpgradeConfig {
    /// Create a new `UpgradeConfig` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this config equals the defaults, used to skip serializing it.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
