//! The update command: check for a newer release and install it in place.
//!
//! # Examples
//!
//! ```bash
//! # Install the latest release over the running binary
//! update
//!
//! # Only report whether a newer release exists
//! update --check
//!
//! # Exit non-zero when the install fails
//! update --failure-policy strict
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::debug;

use crate::config::GlobalConfig;
use crate::upgrade::{
    AppInfo, FailurePolicy, GitHubReleases, Installer, Message, MessageKind, SelfUpdater,
    UpdateCheck, expected_asset_name, select_asset, up_to_date_message,
};
use crate::utils::current_executable;

/// Arguments of the update command.
#[derive(Args, Debug, Clone, Default)]
pub struct UpgradeArgs {
    /// Check for a newer release without installing it.
    #[arg(long)]
    pub check: bool,

    /// What to do when the install fails.
    ///
    /// `lenient` prints the error and the success message, `report` prints
    /// only the error, `strict` prints the error and exits with status 1.
    /// Overrides `failure_policy` from the config file.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub failure_policy: Option<FailurePolicy>,
}

impl UpgradeArgs {
    /// Failure policy after applying the command-line override.
    pub fn effective_policy(&self, config: &GlobalConfig) -> FailurePolicy {
        self.failure_policy.unwrap_or(config.upgrade.failure_policy)
    }
}

/// Run the update command against the loaded configuration.
///
/// # Errors
///
/// Fails when the executable path cannot be resolved, when `--check` cannot
/// reach the release lookup, or when the run fails under
/// [`FailurePolicy::Strict`].
pub async fn execute(args: UpgradeArgs, config: &GlobalConfig, no_progress: bool) -> Result<()> {
    let info = AppInfo::from_config(&config.upgrade);
    let policy = args.effective_policy(config);
    let show_progress = progress_enabled(config, no_progress);
    debug!(
        "Updating {}/{} from {} (policy: {}, progress: {})",
        info.repo_owner(),
        info.app_name(),
        info.current_version(),
        policy,
        show_progress
    );

    let current_exe = current_executable()?;
    let client = reqwest::Client::new();
    let lookup = GitHubReleases::with_api_url(client.clone(), config.upgrade.api_url.clone());
    let installer = Installer::new(client, &info, current_exe).with_progress(show_progress);
    let updater = SelfUpdater::new(info, lookup, installer);

    if args.check {
        return check_for_updates(&updater).await;
    }

    let outcome = updater.execute().await;
    for message in outcome.messages(updater.info().app_name(), policy) {
        print_message(&message);
    }

    if policy.fails_process()
        && let Some(error) = outcome.error()
    {
        return Err(anyhow::Error::new(error.clone()).context("Self-update failed"));
    }

    Ok(())
}

async fn check_for_updates(updater: &SelfUpdater<GitHubReleases>) -> Result<()> {
    let info = updater.info();
    let check = updater.check().await.context("Failed to check for updates")?;

    match check {
        UpdateCheck::Available(release) => {
            let expected =
                expected_asset_name(info.app_name(), &release.tag_name, updater.platform());
            if select_asset(&release.assets, &expected).is_some() {
                println!(
                    "{}",
                    format!(
                        "A new version of {} is available: {} -> {}",
                        info.app_name(),
                        info.current_version(),
                        release.tag_name
                    )
                    .green()
                );
            } else {
                debug!("Release {} has no asset named {}", release.tag_name, expected);
                println!("{}", up_to_date_message(info.app_name()));
            }
        }
        UpdateCheck::UpToDate => {
            println!("{}", up_to_date_message(info.app_name()));
        }
    }

    Ok(())
}

/// Whether to draw the download bar: the config allows it and neither
/// `--no-progress` nor `UPDATE_NO_PROGRESS` turned it off.
fn progress_enabled(config: &GlobalConfig, no_progress: bool) -> bool {
    config.upgrade.show_progress && !no_progress
}

fn print_message(message: &Message) {
    match message.kind {
        MessageKind::Info => println!("{}", message.text),
        MessageKind::Success => println!("{}", message.text.green()),
        MessageKind::Error => println!("{}", message.text.red()),
    }
}
