//! Tests for `epikit login` and `epikit logout`.

use crate::support::*;
use wiremock::MockServer;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_login_with_supplied_credentials_stores_token() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "editor", "s3cret").await;
    let url = base_url(&server);
    let t = Test::new();

    let output = t.login(&url, "editor", "s3cret");
    assert_success(&output);
    assert_stdout_contains(&output, "Episerver CLI Authentication tool");
    assert_stdout_contains(&output, "Attempting to login editor");
    assert_stdout_contains(&output, "logged in as editor");
    assert!(t.auth_file(&url).is_file());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_rejected_login_exits_with_code_3() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "editor", "s3cret").await;
    let url = base_url(&server);
    let t = Test::new();

    let output = t.login(&url, "editor", "wrong");
    assert_exit_code(&output, 3);
    assert_stderr_contains(&output, "invalid credentials");
    assert!(!t.auth_file(&url).exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_login_reads_answers_from_piped_stdin() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "editor", "s3cret").await;
    let url = base_url(&server);
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--domain", &url, "login"])
        .write_stdin("editor\ns3cret\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Username: ");
    assert_stdout_contains(&output, "Password: ******");
    assert!(!stdout(&output).contains("s3cret"));
    assert!(t.auth_file(&url).is_file());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_existing_session_is_kept_when_declined() {
    let server = MockServer::start().await;
    let url = base_url(&server);
    let t = Test::new();
    t.store_token(&url, "editor");

    let output = t
        .cmd()
        .args(["--domain", &url, "login"])
        .write_stdin("n\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "You are currently authenticated as editor");
    assert_stdout_contains(&output, "keeping the current session of editor");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_closed_stdin_fails() {
    let server = MockServer::start().await;
    let url = base_url(&server);
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--domain", &url, "login"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "input closed");
}

#[test]
fn test_logout_removes_credential() {
    let t = Test::new();
    let url = "https://cms.example.com/";
    t.store_token(url, "editor");

    let output = t.against(url, &["logout"]);
    assert_success(&output);
    assert_stdout_contains(&output, "logged out of https://cms.example.com/");
    assert!(!t.auth_file(url).exists());
}

#[test]
fn test_logout_without_credential_succeeds() {
    let t = Test::new();

    let output = t.against("https://cms.example.com/", &["logout"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no stored credential");
}

#[test]
fn test_credentials_are_scoped_per_host() {
    let t = Test::new();
    t.store_token("https://one.example.com/", "editor");

    let output = t.against("https://two.example.com/", &["logout"]);
    assert_success(&output);
    assert_stdout_contains(&output, "no stored credential");
    assert!(t.auth_file("https://one.example.com/").is_file());
}
