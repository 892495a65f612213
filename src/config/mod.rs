//! Configuration management for the updater
//!
//! The updater needs almost no configuration: its identity is compiled in.
//! A small global TOML file lets users and tests adjust how updates run.
//!
//! # Configuration File
//!
//! **Location:**
//! - Unix/macOS: `~/.update/config.toml`
//! - Windows: `%LOCALAPPDATA%\update\config.toml`
//!
//! The location can be overridden with `--config <PATH>` or the
//! `UPDATE_CONFIG` environment variable. A missing file means defaults.
//!
//! ```toml
//! [upgrade]
//! # Alternate API endpoint (GitHub Enterprise, local mocks)
//! api_url = "https://api.github.com"
//! # What happens after a failed install: lenient | report | strict
//! failure_policy = "report"
//! # Draw a progress bar while downloading
//! show_progress = true
//! ```
//!
//! # Precedence
//!
//! Command-line flags override the file; the file overrides compiled-in
//! defaults.

pub mod global;

pub use global::GlobalConfig;
