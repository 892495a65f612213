//! Utility modules shared by the CLI and the update flow.
//!
//! - [`platform`]: home directory and running-executable discovery
//! - [`progress`]: download progress bars

pub mod platform;
pub mod progress;

pub use platform::{current_executable, get_home_dir, is_windows};
pub use progress::download_bar;
