//! Test utilities for the updater
//!
//! This module provides helpers shared by unit and integration tests:
//! - [`ArchiveBuilder`] for in-memory `.tar.gz` release archives
//! - [`fixtures`] for simulated read/write failures, payloads and GitHub release JSON
//! - [`init_test_logging`] for tracing output inside tests
//!
//! # Example
//!
//! ```rust,ignore
//! use update_cli::test_utils::ArchiveBuilder;
//!
//! let archive = ArchiveBuilder::new().entry("update", b"binary").build();
//! assert!(!archive.is_empty());
//! ```

pub mod builder;
pub mod fixtures;

pub use builder::ArchiveBuilder;
pub use fixtures::{
    FailingReader, FailingWriter, pseudo_random_bytes, release_json, temp_files,
};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=update_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
