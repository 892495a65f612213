//! update-cli: a binary that keeps itself up to date from GitHub releases
//!
//! The crate looks up the latest release of a GitHub repository, picks the
//! archive built for the current platform, and swaps the running executable
//! for the binary inside it.
//!
//! # Architecture Overview
//!
//! ```text
//! cli ──► config (GlobalConfig, ~/.update/config.toml)
//!  │
//!  └──► upgrade::SelfUpdater
//!          ├── ReleaseLookup (GitHubReleases: GET releases/latest, semver compare)
//!          ├── platform (Go-style os/arch, exact asset name match)
//!          └── Installer (stream → gunzip → untar → temp file → chmod → rename)
//! ```
//!
//! # Release Layout
//!
//! Every release tag `vX.Y.Z` carries one archive per platform:
//!
//! ```text
//! update-v1.2.0-linux-amd64.tar.gz
//! update-v1.2.0-darwin-arm64.tar.gz
//! update-v1.2.0-windows-amd64.tar.gz
//! ```
//!
//! Each archive holds exactly one file: the new binary.
//!
//! # Modules
//!
//! - [`cli`]: argument parsing and command execution
//! - [`config`]: global configuration file
//! - [`constants`]: compiled-in identity and fixed values
//! - [`core`]: error types and user-facing error display
//! - [`upgrade`]: release lookup, asset selection and installation
//! - [`utils`]: platform and progress helpers

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod upgrade;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
