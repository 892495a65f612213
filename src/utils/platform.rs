//! Platform helpers: home directory and running-executable discovery.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Whether the binary was compiled for Windows.
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Home directory of the current user, with a platform-specific hint on failure.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Filesystem path of the running executable with symlinks resolved.
///
/// Symlinks are resolved so the update replaces the real binary and stages
/// its temporary file in the real binary's directory.
pub fn current_executable() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to get current executable path")?;
    exe.canonicalize()
        .with_context(|| format!("Failed to resolve executable path {}", exe.display()))
}
