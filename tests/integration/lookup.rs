use crate::common::{LATEST_PATH, app_info, closed_server_uri, mount_latest_release};
use update_cli::core::UpdateError;
use update_cli::test_utils::{init_test_logging, release_json};
use update_cli::upgrade::{GitHubReleases, ReleaseLookup, UpdateCheck};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lookup(server: &MockServer) -> GitHubReleases {
    GitHubReleases::with_api_url(reqwest::Client::new(), server.uri())
}

#[tokio::test]
async fn test_newer_release_is_available() {
    init_test_logging(None);
    let server = MockServer::start().await;
    mount_latest_release(
        &server,
        release_json("v1.2.0", &[("update-v1.2.0-linux-amd64.tar.gz", "https://example.com/a")]),
    )
    .await;

    let check = lookup(&server).check(&app_info("v1.0.0")).await.unwrap();

    let UpdateCheck::Available(release) = &check else {
        panic!("expected an available release, got {check:?}");
    };
    assert_eq!(release.tag_name, "v1.2.0");
    assert_eq!(release.assets.len(), 1);
    assert_eq!(release.assets[0].download_url, "https://example.com/a");
}

#[tokio::test]
async fn test_same_release_is_up_to_date() {
    let server = MockServer::start().await;
    mount_latest_release(&server, release_json("v1.0.0", &[])).await;

    let check = lookup(&server).check(&app_info("v1.0.0")).await.unwrap();

    assert_eq!(check, UpdateCheck::UpToDate);
}

#[tokio::test]
async fn test_older_release_is_up_to_date() {
    let server = MockServer::start().await;
    mount_latest_release(&server, release_json("v0.9.0", &[])).await;

    let check = lookup(&server).check(&app_info("v1.0.0")).await.unwrap();

    assert_eq!(check, UpdateCheck::UpToDate);
}

#[tokio::test]
async fn test_no_published_release_is_up_to_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "message": "Not Found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let check = lookup(&server).check(&app_info("v1.0.0")).await.unwrap();

    assert_eq!(check, UpdateCheck::UpToDate);
}

#[tokio::test]
async fn test_server_error_is_lookup_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = lookup(&server).check(&app_info("v1.0.0")).await.unwrap_err();

    assert!(matches!(err, UpdateError::Lookup { .. }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_malformed_payload_is_lookup_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let err = lookup(&server).check(&app_info("v1.0.0")).await.unwrap_err();

    assert!(matches!(err, UpdateError::Lookup { .. }));
    assert!(err.to_string().contains("Failed to parse release metadata"));
}

#[tokio::test]
async fn test_request_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .and(header("accept", "application/vnd.github+json"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_json("v1.0.0", &[])))
        .expect(1)
        .mount(&server)
        .await;

    let check = lookup(&server).check(&app_info("v1.0.0")).await.unwrap();

    assert_eq!(check, UpdateCheck::UpToDate);
}

#[tokio::test]
async fn test_unreachable_server_is_lookup_error() {
    let uri = closed_server_uri();

    let lookup = GitHubReleases::with_api_url(reqwest::Client::new(), uri);
    let err = lookup.check(&app_info("v1.0.0")).await.unwrap_err();

    assert!(matches!(err, UpdateError::Lookup { .. }));
}
