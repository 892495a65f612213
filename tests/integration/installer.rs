use crate::common::{app_info, closed_server_uri, fake_executable, mount_asset};
use tempfile::TempDir;
use update_cli::core::UpdateError;
use update_cli::test_utils::{ArchiveBuilder, temp_files};
use update_cli::upgrade::Installer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn installer(exe: &std::path::Path) -> Installer {
    Installer::new(reqwest::Client::new(), &app_info("v1.0.0"), exe)
}

#[tokio::test]
async fn test_download_replaces_executable() {
    let server = MockServer::start().await;
    let archive = ArchiveBuilder::new().entry("update", b"new binary").build();
    let url = mount_asset(&server, "update-v1.1.0-linux-amd64.tar.gz", archive, 1).await;
    let temp = TempDir::new().unwrap();
    let exe = fake_executable(temp.path());

    installer(&exe).download_binary(&url).await.unwrap();

    assert_eq!(std::fs::read(&exe).unwrap(), b"new binary");
    assert!(temp_files(temp.path(), "update").is_empty());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&exe).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

#[tokio::test]
async fn test_large_binary_streams_intact() {
    let server = MockServer::start().await;
    let payload = update_cli::test_utils::pseudo_random_bytes(2 * 1024 * 1024);
    let archive = ArchiveBuilder::new().entry("update", &payload).build();
    let url = mount_asset(&server, "update-v1.1.0-linux-amd64.tar.gz", archive, 1).await;
    let temp = TempDir::new().unwrap();
    let exe = fake_executable(temp.path());

    installer(&exe).with_progress(false).download_binary(&url).await.unwrap();

    assert_eq!(std::fs::read(&exe).unwrap(), payload);
}

#[tokio::test]
async fn test_missing_asset_is_download_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/gone.tar.gz"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let exe = fake_executable(temp.path());

    let err = installer(&exe)
        .download_binary(&format!("{}/download/gone.tar.gz", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::Download { .. }));
    assert!(err.to_string().contains("404"));
    assert_eq!(std::fs::read(&exe).unwrap(), b"old binary");
    assert!(temp_files(temp.path(), "update").is_empty());
}

#[tokio::test]
async fn test_corrupt_archive_leaves_executable() {
    let server = MockServer::start().await;
    let url = mount_asset(&server, "broken.tar.gz", b"definitely not gzip".to_vec(), 1).await;
    let temp = TempDir::new().unwrap();
    let exe = fake_executable(temp.path());

    let err = installer(&exe).download_binary(&url).await.unwrap_err();

    assert!(matches!(err, UpdateError::Download { .. }));
    assert_eq!(std::fs::read(&exe).unwrap(), b"old binary");
    assert!(temp_files(temp.path(), "update").is_empty());
}

#[tokio::test]
async fn test_truncated_archive_leaves_executable() {
    let server = MockServer::start().await;
    let payload = update_cli::test_utils::pseudo_random_bytes(256 * 1024);
    let mut archive = ArchiveBuilder::new().entry("update", &payload).build();
    archive.truncate(archive.len() / 2);
    let url = mount_asset(&server, "truncated.tar.gz", archive, 1).await;
    let temp = TempDir::new().unwrap();
    let exe = fake_executable(temp.path());

    let err = installer(&exe).download_binary(&url).await.unwrap_err();

    assert!(matches!(err, UpdateError::Download { .. }));
    assert_eq!(std::fs::read(&exe).unwrap(), b"old binary");
    assert!(temp_files(temp.path(), "update").is_empty());
}

#[tokio::test]
async fn test_unreachable_host_is_download_error() {
    let url = format!("{}/download/any.tar.gz", closed_server_uri());
    let temp = TempDir::new().unwrap();
    let exe = fake_executable(temp.path());

    let err = installer(&exe).download_binary(&url).await.unwrap_err();

    assert!(matches!(err, UpdateError::Download { .. }));
    assert!(!err.to_string().contains("while downloading"));
    assert_eq!(std::fs::read(&exe).unwrap(), b"old binary");
    assert!(temp_files(temp.path(), "update").is_empty());
}
