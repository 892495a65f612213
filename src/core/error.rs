//! Error handling for the updater
//!
//! This module provides the typed error taxonomy used by the update flow and
//! the user-friendly error reporting used by the CLI. The error system follows
//! two principles:
//! 1. **Strongly-typed errors** for the update pipeline ([`UpdateError`])
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!    ([`ErrorContext`])
//!
//! # Error Kinds
//!
//! Every [`UpdateError`] variant has the same shape, a single free-text
//! `message`, and renders as `"{kind} error: {message}"`:
//!
//! - [`UpdateError::Download`] - any failure while fetching, decoding or
//!   installing a release archive
//! - [`UpdateError::Lookup`] - the release lookup could not be completed
//! - [`UpdateError::Import`], [`UpdateError::Generate`], [`UpdateError::Delete`] -
//!   reserved kinds that the update flow never raises
//!
//! # Examples
//!
//! ```rust
//! use update_cli::core::UpdateError;
//!
//! let err = UpdateError::download("connection reset by peer");
//! assert_eq!(err.to_string(), "download error: connection reset by peer");
//! ```
//!
//! Converting an escaping [`anyhow::Error`] for display:
//!
//! ```rust,no_run
//! use update_cli::core::user_friendly_error;
//!
//! let err = anyhow::anyhow!("Failed to parse config");
//! user_friendly_error(err).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Typed errors produced by the self-update flow.
///
/// All variants carry only a message. Calling code does not branch on the
/// kind beyond its display string, but the kind documents which stage failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// Fetching, decompressing, extracting or installing the release archive failed.
    #[error("download error: {message}")]
    Download {
        /// Human-readable description of the failure
        message: String,
    },

    /// Querying the hosting provider for the latest release failed.
    #[error("lookup error: {message}")]
    Lookup {
        /// Human-readable description of the failure
        message: String,
    },

    /// Importing a file failed.
    #[error("import error: {message}")]
    Import {
        /// Human-readable description of the failure
        message: String,
    },

    /// Generating output failed.
    #[error("generate error: {message}")]
    Generate {
        /// Human-readable description of the failure
        message: String,
    },

    /// Deleting an entry failed.
    #[error("delete error: {message}")]
    Delete {
        /// Human-readable description of the failure
        message: String,
    },
}

impl UpdateError {
    /// Build a [`UpdateError::Download`] from anything displayable.
    pub fn download(message: impl fmt::Display) -> Self {
        Self::Download {
            message: message.to_string(),
        }
    }

    /// Build a [`UpdateError::Lookup`] from anything displayable.
    pub fn lookup(message: impl fmt::Display) -> Self {
        Self::Lookup {
            message: message.to_string(),
        }
    }

    /// Build a [`UpdateError::Import`] from anything displayable.
    pub fn import(message: impl fmt::Display) -> Self {
        Self::Import {
            message: message.to_string(),
        }
    }

    /// Build a [`UpdateError::Generate`] from anything displayable.
    pub fn generate(message: impl fmt::Display) -> Self {
        Self::Generate {
            message: message.to_string(),
        }
    }

    /// Build a [`UpdateError::Delete`] from anything displayable.
    pub fn delete(message: impl fmt::Display) -> Self {
        Self::Delete {
            message: message.to_string(),
        }
    }

    /// The message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Download { message }
            | Self::Lookup { message }
            | Self::Import { message }
            | Self::Generate { message }
            | Self::Delete { message } => message,
        }
    }
}

/// Error wrapper that adds a suggestion and details for CLI display.
///
/// `ErrorContext` is what the binary prints when a command fails outright
/// (bad configuration, unreadable executable path, strict failure policy).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach additional details about the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// Typed [`UpdateError`]s, I/O errors and TOML parse errors found anywhere in
/// the `anyhow` chain get tailored suggestions; everything else is reported
/// with its full context chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let message = format!("{error:#}");

    if let Some(update_error) = error.downcast_ref::<UpdateError>() {
        let ctx = ErrorContext::new(message);
        return match update_error {
            UpdateError::Download { .. } => ctx
                .with_suggestion(
                    "Check your network connection and that you can write to the directory containing the executable",
                )
                .with_details("The running executable was not replaced"),
            UpdateError::Lookup { .. } => ctx
                .with_suggestion("Check your network connection or try again later")
                .with_details("GitHub may be rate limiting unauthenticated requests"),
            _ => ctx,
        };
    }

    for cause in error.chain() {
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            if io_error.kind() == std::io::ErrorKind::PermissionDenied {
                return ErrorContext::new(message)
                    .with_suggestion("Try running with elevated permissions (sudo/Administrator) or check file ownership")
                    .with_details("The updater needs write access to the directory containing the executable");
            }
        }

        if cause.downcast_ref::<toml::de::Error>().is_some() {
            return ErrorContext::new(message)
                .with_suggestion(
                    "Check the TOML syntax in your config file. Verify quotes, brackets, and key names",
                )
                .with_details("Only the [upgrade] section is read by the updater");
        }
    }

    ErrorContext::new(message)
}
