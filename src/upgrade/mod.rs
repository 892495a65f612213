//! Self-update functionality.
//!
//! This module lets the binary replace itself with the newest release
//! published on GitHub. The flow is one short, strictly sequential pipeline
//! with no retries and no background work.
//!
//! # Update Process Flow
//!
//! ```text
//! 1. Release lookup
//!    └── GET /repos/{owner}/{app}/releases/latest, compare semver tags
//!
//! 2. Asset selection
//!    └── exact match on "{app}-{tag}-{os}-{arch}.tar.gz"
//!
//! 3. Download and replace
//!    ├── stream the archive (never stored compressed)
//!    ├── gunzip + untar the single entry into a temp file beside the executable
//!    ├── chmod 0755
//!    └── rename over the executable (atomic on one filesystem)
//! ```
//!
//! A missing platform asset is reported exactly like "no update". Failures at
//! any stage end the run with a typed [`UpdateError`](crate::core::UpdateError)
//! and leave the executable untouched.
//!
//! # Components
//!
//! - [`SelfUpdater`]: runs the pipeline and returns an [`UpdateOutcome`]
//! - [`ReleaseLookup`] / [`GitHubReleases`]: release metadata source
//! - [`platform`]: Go-style platform identifiers and asset selection
//! - [`Installer`]: download-and-replace of the executable
//! - [`config`]: [`AppInfo`], [`UpgradeConfig`] and [`FailurePolicy`]
//!
//! # Example
//!
//! ```rust,no_run
//! use update_cli::upgrade::{AppInfo, GitHubReleases, Installer, SelfUpdater, UpdateOutcome};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = reqwest::Client::new();
//! let info = AppInfo::new("Heidelberger", "update", "v1.0.0");
//! let installer = Installer::new(client.clone(), &info, std::env::current_exe()?);
//! let updater = SelfUpdater::new(info, GitHubReleases::new(client), installer);
//!
//! match updater.execute().await {
//!     UpdateOutcome::Updated { tag } => println!("Updated to {tag}"),
//!     UpdateOutcome::UpToDate | UpdateOutcome::NoMatchingAsset { .. } => println!("Up to date"),
//!     other => eprintln!("Update failed: {:?}", other.error()),
//! }
//! # Ok(())
//! # }
//! ```

/// Application identity and update configuration.
pub mod config;
/// Download-and-replace of the running executable.
pub mod installer;
/// Platform identifiers and release asset selection.
pub mod platform;
/// Release metadata and the GitHub release lookup.
pub mod release;
/// The update pipeline and its outcomes.
pub mod self_updater;


pub use config::{AppInfo, FailurePolicy, UpgradeConfig};
pub use installer::{Installer, install_from_archive};
pub use platform::{Platform, expected_asset_name, select_asset};
pub use release::{GitHubReleases, Release, ReleaseAsset, ReleaseLookup, UpdateCheck};
pub use self_updater::{
    Message, MessageKind, SelfUpdater, UpdateOutcome, error_message, success_message,
    up_to_date_message,
};
