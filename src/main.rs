//! update CLI entry point
//!
//! Parses arguments, runs the self-update and turns any error into a
//! user-facing message with exit status 1.

use clap::Parser;
use update_cli::cli;
use update_cli::core::user_friendly_error;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute().await {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
