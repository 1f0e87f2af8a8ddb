//! Tests for `epikit deploy`.

use crate::support::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_deploy_uploads_package() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/episerver/v3/deploy"))
        .and(header("Authorization", "Bearer seeded"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let url = base_url(&server);
    let t = Test::new();
    t.store_token(&url, "editor");
    t.write("dist/site.zip", "zip bytes");

    let output = t.against(&url, &["deploy", "dist/site.zip"]);
    assert_success(&output);
    assert_stdout_contains(&output, "deployed to");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_deploy_rejection_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let url = base_url(&server);
    let t = Test::new();
    t.store_token(&url, "editor");
    t.write("site.zip", "zip bytes");

    let output = t.against(&url, &["deploy", "site.zip"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "server returned 403");
}

#[test]
fn test_deploy_requires_login() {
    let t = Test::new();
    t.write("site.zip", "zip bytes");

    let output = t.against("https://cms.example.com/", &["deploy", "site.zip"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "not authenticated");
    assert_stderr_contains(&output, "epikit login");
}

#[test]
fn test_deploy_missing_package() {
    let t = Test::new();
    t.store_token("https://cms.example.com/", "editor");

    let output = t.against("https://cms.example.com/", &["deploy", "missing.zip"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "deployment package not found");
}
