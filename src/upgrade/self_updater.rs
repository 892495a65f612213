use tracing::{debug, info, warn};

use super::config::FailurePolicy;
use super::installer::Installer;
use super::platform::{Platform, expected_asset_name, select_asset};
use super::release::{ReleaseLookup, UpdateCheck};
use super::AppInfo;
use crate::core::UpdateError;

/// Terminal state of one [`SelfUpdater::execute`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No newer release exists.
    UpToDate,
    /// A newer release exists but has no asset for this platform.
    NoMatchingAsset {
        /// Asset name that was looked for.
        expected: String,
    },
    /// The running executable was replaced.
    Updated {
        /// Tag of the installed release.
        tag: String,
    },
    /// The release lookup failed; nothing was downloaded.
    LookupFailed(UpdateError),
    /// The download or install failed; the executable is unchanged.
    InstallFailed {
        /// Tag of the release that failed to install.
        tag: String,
        /// What went wrong.
        error: UpdateError,
    },
}

/// Severity of a line of user-facing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Neutral status information.
    Info,
    /// The update completed.
    Success,
    /// Something failed.
    Error,
}

/// One line of user-facing output produced from an [`UpdateOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Severity, used by the CLI to pick a color.
    pub kind: MessageKind,
    /// Text to print.
    pub text: String,
}

impl Message {
    fn new(kind: MessageKind, text: String) -> Self {
        Self { kind, text }
    }
}

/// Message printed when no update is installed because none applies.
pub fn up_to_date_message(app_name: &str) -> String {
    format!("Your {app_name} is up-to-date. \\o/")
}

/// Message printed after the executable was replaced.
pub fn success_message(app_name: &str) -> String {
    format!("Now you have a fresh new {app_name} \\o/")
}

/// Message printed for a failed lookup or install.
pub fn error_message(error: &UpdateError) -> String {
    format!("Error: {error}")
}

impl UpdateOutcome {
    /// Whether the run ended in an error.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::LookupFailed(_) | Self::InstallFailed { .. })
    }

    /// The error behind a failed run.
    pub fn error(&self) -> Option<&UpdateError> {
        match self {
            Self::LookupFailed(error)
            | Self::InstallFailed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Lines to show the user for this outcome.
    ///
    /// A missing platform asset reads exactly like "no update". After a failed
    /// install the success line is only added under [`FailurePolicy::Lenient`].
    pub fn messages(&self, app_name: &str, policy: FailurePolicy) -> Vec<Message> {
        match self {
            Self::UpToDate | Self::NoMatchingAsset { .. } => {
                vec![Message::new(MessageKind::Info, up_to_date_message(app_name))]
            }
            Self::Updated { .. } => {
                vec![Message::new(MessageKind::Success, success_message(app_name))]
            }
            Self::LookupFailed(error) => {
                vec![Message::new(MessageKind::Error, error_message(error))]
            }
            Self::InstallFailed { error, .. } => {
                let mut lines = vec![Message::new(MessageKind::Error, error_message(error))];
                if policy.announces_success_after_failure() {
                    lines.push(Message::new(MessageKind::Success, success_message(app_name)));
                }
                lines
            }
        }
    }
}

/// Checks for a newer release and installs it over the running executable.
///
/// `SelfUpdater` composes the three collaborators of an update in strict
/// sequence: a [`ReleaseLookup`], platform asset selection, and an
/// [`Installer`]. It never retries and never panics; every run ends in an
/// [`UpdateOutcome`].
///
/// # Examples
///
/// ```rust,no_run
/// use update_cli::upgrade::{AppInfo, GitHubReleases, Installer, SelfUpdater};
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = reqwest::Client::new();
/// let info = AppInfo::new("Heidelberger", "update", "v1.0.0");
/// let installer = Installer::new(client.clone(), &info, std::env::current_exe()?);
/// let updater = SelfUpdater::new(info, GitHubReleases::new(client), installer);
///
/// let outcome = updater.execute().await;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
pub struct SelfUpdater<L> {
    info: AppInfo,
    lookup: L,
    installer: Installer,
    platform: Platform,
}

impl<L: ReleaseLookup> SelfUpdater<L> {
    /// Create an updater for the platform this binary was compiled for.
    pub fn new(info: AppInfo, lookup: L, installer: Installer) -> Self {
        Self {
            info,
            lookup,
            installer,
            platform: Platform::current(),
        }
    }

    /// Select assets for a different platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Identity of the application being updated.
    pub fn info(&self) -> &AppInfo {
        &self.info
    }

    /// Platform used for asset selection.
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Ask the release lookup whether a newer release exists, without installing.
    pub async fn check(&self) -> Result<UpdateCheck, UpdateError> {
        self.lookup.check(&self.info).await
    }

    /// Run one update attempt.
    ///
    /// 1. Look up the latest release; stop if none is newer or the lookup fails.
    /// 2. Select the asset named `{app}-{tag}-{os}-{arch}.tar.gz`; stop if absent.
    /// 3. Download and install it over the target executable.
    pub async fn execute(&self) -> UpdateOutcome {
        info!("Starting self-update process");

        let release = match self.check().await {
            Ok(UpdateCheck::UpToDate) => {
                debug!("No newer release for {}", self.info.app_name());
                return UpdateOutcome::UpToDate;
            }
            Ok(UpdateCheck::Available(release)) => release,
            Err(error) => {
                warn!("Release lookup failed: {}", error);
                return UpdateOutcome::LookupFailed(error);
            }
        };

        let expected = expected_asset_name(self.info.app_name(), &release.tag_name, &self.platform);
        let Some(asset) = select_asset(&release.assets, &expected) else {
            warn!("Release {} has no asset named {}", release.tag_name, expected);
            return UpdateOutcome::NoMatchingAsset { expected };
        };
        debug!("Selected asset {}", asset.name);

        let result = self.installer.download_binary(&asset.download_url).await;
        match result {
            Ok(()) => {
                info!("Successfully updated to version {}", release.tag_name);
                UpdateOutcome::Updated {
                    tag: release.tag_name,
                }
            }
            Err(error) => {
                warn!("Update to {} failed: {}", release.tag_name, error);
                UpdateOutcome::InstallFailed {
                    tag: release.tag_name,
                    error,
                }
            }
        }
    }
}
