//! Global constants used throughout the updater.
//!
//! This module holds the compiled-in application identity and the other
//! fixed values shared by the CLI and the update flow. Defining them
//! centrally keeps magic strings out of the call sites.

/// GitHub account that publishes the releases.
pub const DEFAULT_REPO_OWNER: &str = "Heidelberger";

/// Application name. Doubles as the GitHub repository name and the prefix of
/// every release asset.
pub const DEFAULT_APP_NAME: &str = "update";

/// Version of the running binary, in release-tag form (`v1.2.3`).
pub const CURRENT_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Base URL of the GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Media type requested from the GitHub releases endpoint.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Permission bits applied to the freshly extracted binary.
pub const BINARY_MODE: u32 = 0o755;

/// Extension of every published release archive.
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// Environment variable that overrides the global config file location.
pub const CONFIG_PATH_ENV: &str = "UPDATE_CONFIG";

/// Environment variable that disables progress bars when set to `1`.
pub const NO_PROGRESS_ENV: &str = "UPDATE_NO_PROGRESS";
