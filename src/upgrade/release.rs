use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, info, warn};

use super::AppInfo;
use crate::constants::{DEFAULT_API_URL, GITHUB_ACCEPT};
use crate::core::UpdateError;

/// A named downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// File name of the asset (e.g. `update-v1.2.0-linux-amd64.tar.gz`).
    pub name: String,
    /// Direct download link for the asset.
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// A tagged release and its assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Git tag the release was published from (e.g. `v1.2.0`).
    pub tag_name: String,
    /// Assets in the order the hosting provider lists them.
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// Result of asking the hosting provider for a newer release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCheck {
    /// The running version is the latest (or no release was published).
    UpToDate,
    /// A release newer than the running version exists.
    Available(Release),
}

/// Source of release metadata.
///
/// Implementations report either "up to date", "newer release available", or
/// a typed error. Callers must branch on all three; a failed lookup is never
/// silently treated as "up to date".
pub trait ReleaseLookup {
    /// Check whether a release newer than `info.current_version()` exists.
    fn check(
        &self,
        info: &AppInfo,
    ) -> impl Future<Output = Result<UpdateCheck, UpdateError>> + Send;
}

/// Release lookup backed by the GitHub REST API `releases/latest` endpoint.
///
/// # Examples
///
/// ```rust,no_run
/// use update_cli::upgrade::{AppInfo, GitHubReleases, ReleaseLookup, UpdateCheck};
///
/// # async fn example() -> anyhow::Result<()> {
/// let lookup = GitHubReleases::new(reqwest::Client::new());
/// let info = AppInfo::new("Heidelberger", "update", "v1.0.0");
///
/// match lookup.check(&info).await? {
///     UpdateCheck::UpToDate => println!("up to date"),
///     UpdateCheck::Available(release) => println!("new release {}", release.tag_name),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubReleases {
    client: reqwest::Client,
    api_url: String,
}

impl GitHubReleases {
    /// Create a lookup against the public GitHub API.
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_api_url(client, DEFAULT_API_URL)
    }

    /// Create a lookup against a custom API base URL (GitHub Enterprise, tests).
    pub fn with_api_url(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    fn latest_release_url(&self, info: &AppInfo) -> String {
        format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url.trim_end_matches('/'),
            info.repo_owner(),
            info.app_name()
        )
    }
}

impl ReleaseLookup for GitHubReleases {
    async fn check(&self, info: &AppInfo) -> Result<UpdateCheck, UpdateError> {
        let url = self.latest_release_url(info);
        debug!("Checking for updates from {}/{}", info.repo_owner(), info.app_name());

        // GitHub rejects API requests without a User-Agent
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, format!("{}/{}", info.app_name(), info.current_version()))
            .send()
            .await
            .map_err(UpdateError::lookup)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("No releases found for {}/{}", info.repo_owner(), info.app_name());
            return Ok(UpdateCheck::UpToDate);
        }
        if !status.is_success() {
            return Err(UpdateError::lookup(format!("GitHub API returned HTTP {status} for {url}")));
        }

        let release: Release = response
            .json()
            .await
            .map_err(|e| UpdateError::lookup(format!("Failed to parse release metadata: {e}")))?;
        debug!("Latest version: {}", release.tag_name);

        if is_newer(&release.tag_name, info.current_version())? {
            info!("Update available: {} -> {}", info.current_version(), release.tag_name);
            Ok(UpdateCheck::Available(release))
        } else {
            debug!("Already on latest version");
            Ok(UpdateCheck::UpToDate)
        }
    }
}

/// Parse a release tag or version string, ignoring a leading `v`.
pub fn parse_version(version: &str) -> Result<semver::Version, UpdateError> {
    let trimmed = version.trim().trim_start_matches(['v', 'V']);
    semver::Version::parse(trimmed)
        .map_err(|e| UpdateError::lookup(format!("Invalid version '{version}': {e}")))
}

/// Whether `latest` is a strictly newer semantic version than `current`.
pub fn is_newer(latest: &str, current: &str) -> Result<bool, UpdateError> {
    Ok(parse_version(latest)? > parse_version(current)?)
}
