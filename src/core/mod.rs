//! Core types shared by the updater and the CLI.
//!
//! - [`UpdateError`]: the typed error taxonomy of the update flow
//! - [`ErrorContext`] and [`user_friendly_error`]: CLI-facing error display

pub mod error;

pub use error::{ErrorContext, UpdateError, user_friendly_error};
