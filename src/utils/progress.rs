//! Progress indicators for downloads.
//!
//! Progress bars are drawn only when explicitly enabled and stdout is an
//! interactive terminal. Otherwise a hidden bar is returned so callers never
//! need to branch. Whether progress is enabled is decided once by the CLI
//! (`--no-progress`, `UPDATE_NO_PROGRESS`, `show_progress` in the config).
//!
//! # Examples
//!
//! ```rust
//! use update_cli::utils::progress::download_bar;
//!
//! let bar = download_bar(Some(1024), false);
//! assert!(bar.is_hidden());
//! bar.inc(512);
//! bar.finish_and_clear();
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Style for a download with a known size.
pub fn download_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{msg:.bold.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━╸━")
}

/// Style for a download whose size the server did not announce.
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg:.bold.cyan} {bytes} ({bytes_per_sec})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Create a byte-counting bar for a download of `len` bytes.
///
/// Returns a hidden bar unless `enabled` is set and the terminal is interactive.
pub fn download_bar(len: Option<u64>, enabled: bool) -> ProgressBar {
    if !enabled || !std::io::stdout().is_terminal() {
        return ProgressBar::hidden();
    }

    match len {
        Some(len) => ProgressBar::new(len).with_style(download_style()),
        None => {
            let bar = ProgressBar::new_spinner().with_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        }
    }
}
