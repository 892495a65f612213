//! Shared helpers for the integration suite.

use std::path::{Path, PathBuf};
use update_cli::upgrade::{AppInfo, Platform, expected_asset_name};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OWNER: &str = "Heidelberger";
pub const APP: &str = "update";
pub const LATEST_PATH: &str = "/repos/Heidelberger/update/releases/latest";

/// Identity used by tests that drive the library directly.
pub fn app_info(current_version: &str) -> AppInfo {
    AppInfo::new(OWNER, APP, current_version)
}

/// Asset name the running platform would select for `tag`.
pub fn current_asset_name(tag: &str) -> String {
    expected_asset_name(APP, tag, &Platform::current())
}

/// Serve `body` as the latest release.
pub async fn mount_latest_release(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1..)
        .mount(server)
        .await;
}

/// Serve `archive` at `/download/{name}` and return its URL.
///
/// `expected` is the exact number of downloads the test allows.
pub async fn mount_asset(
    server: &MockServer,
    name: &str,
    archive: Vec<u8>,
    expected: u64,
) -> String {
    let asset_path = format!("/download/{name}");
    Mock::given(method("GET"))
        .and(path(asset_path.clone()))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/gzip")
                .set_body_bytes(archive),
        )
        .expect(expected)
        .mount(server)
        .await;
    format!("{}{asset_path}", server.uri())
}

/// Base URL of a local port with nothing listening on it.
///
/// Dropped wiremock servers return to a pool and keep answering, so the port
/// is reserved with a plain listener and released immediately.
pub fn closed_server_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Write a config file pointing the updater at `api_url`.
pub fn write_config(dir: &Path, api_url: &str, extra: &str) -> PathBuf {
    let config = dir.join("config.toml");
    std::fs::write(&config, format!("[upgrade]\napi_url = \"{api_url}\"\n{extra}")).unwrap();
    config
}

/// Scratch "executable" with known contents.
pub fn fake_executable(dir: &Path) -> PathBuf {
    let exe = dir.join(APP);
    std::fs::write(&exe, b"old binary").unwrap();
    exe
}
