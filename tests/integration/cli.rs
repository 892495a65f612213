//! End-to-end runs of the `update` binary.
//!
//! Every scenario here ends before the install step so the compiled test
//! binary is never replaced.

use crate::common::{
    LATEST_PATH, current_asset_name, mount_asset, mount_latest_release, write_config,
};
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use update_cli::constants::CURRENT_VERSION;
use update_cli::test_utils::{ArchiveBuilder, release_json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn update_cmd(config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("update").unwrap();
    cmd.env("UPDATE_CONFIG", config)
        .env("UPDATE_NO_PROGRESS", "1")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

async fn mount_lookup_failure(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

#[test]
fn test_help_lists_flags() {
    let mut cmd = Command::cargo_bin("update").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--check"))
        .stdout(predicate::str::contains("--failure-policy"))
        .stdout(predicate::str::contains("--no-progress"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("update").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_up_to_date_run() {
    let server = MockServer::start().await;
    mount_latest_release(&server, release_json(CURRENT_VERSION, &[])).await;
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri(), "");

    update_cmd(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Your update is up-to-date. \\o/"))
        .stdout(predicate::str::contains("fresh new").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_platform_asset_reads_as_up_to_date() {
    let server = MockServer::start().await;
    let other = "update-v9.9.9-plan9-mips.tar.gz";
    let url = mount_asset(&server, other, ArchiveBuilder::new().entry("update", b"x").build(), 0)
        .await;
    mount_latest_release(&server, release_json("v9.9.9", &[(other, url.as_str())])).await;
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri(), "");

    update_cmd(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Your update is up-to-date. \\o/"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_reports_available_release() {
    let server = MockServer::start().await;
    let asset = current_asset_name("v9.9.9");
    let url = mount_asset(&server, &asset, ArchiveBuilder::new().entry("update", b"x").build(), 0)
        .await;
    mount_latest_release(&server, release_json("v9.9.9", &[(asset.as_str(), url.as_str())]))
        .await;
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri(), "");

    update_cmd(&config)
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "A new version of update is available: {CURRENT_VERSION} -> v9.9.9"
        )));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lookup_failure_reported_with_zero_exit() {
    let server = MockServer::start().await;
    mount_lookup_failure(&server).await;
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri(), "");

    update_cmd(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: lookup error:"))
        .stdout(predicate::str::contains("500"))
        .stdout(predicate::str::contains("fresh new").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_strict_policy_fails_process() {
    let server = MockServer::start().await;
    mount_lookup_failure(&server).await;
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri(), "");

    update_cmd(&config)
        .args(["--failure-policy", "strict"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Error: lookup error:"))
        .stderr(predicate::str::contains("Self-update failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_strict_policy_from_config_file() {
    let server = MockServer::start().await;
    mount_lookup_failure(&server).await;
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri(), "failure_policy = \"strict\"\n");

    update_cmd(&config).assert().failure().code(1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_check_fails_when_lookup_fails() {
    let server = MockServer::start().await;
    mount_lookup_failure(&server).await;
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), &server.uri(), "");

    update_cmd(&config)
        .arg("--check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to check for updates"));
}

#[test]
fn test_invalid_config_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[upgrade\n").unwrap();

    update_cmd(&config)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse global config"))
        .stderr(predicate::str::contains("suggestion"));
}
