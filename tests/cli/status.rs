//! Tests for `epikit status`.

use crate::support::*;

#[test]
fn test_status_without_credential() {
    let t = Test::new();

    let output = t.against("https://cms.example.com/", &["status"]);
    assert_success(&output);
    assert_stdout_contains(&output, "https://cms.example.com/");
    assert_stdout_contains(&output, "not authenticated");
    assert_stderr_contains(&output, "epikit login");
}

#[test]
fn test_status_with_stored_credential() {
    let t = Test::new();
    let url = "https://cms.example.com/";
    t.store_token(url, "editor");

    let output = t.against(url, &["status"]);
    assert_success(&output);
    assert_stdout_contains(&output, "authenticated as editor");
    assert_stdout_contains(&output, &t.auth_file(url).display().to_string());
}

#[test]
fn test_status_reports_environment() {
    let t = Test::with_env("EPI_URL=https://int.example.com\n");

    let output = t.cmd().args(["--env", "int", "status"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "integration");
    assert_stdout_contains(&output, "https://int.example.com/");
}

#[test]
fn test_env_file_does_not_select_environment() {
    let t = Test::with_env("EPI_ENV=int\nEPI_URL=https://int.example.com\n");

    let json = t.config_json(&[]);
    assert_eq!(json["environment"], "development");
}

#[test]
fn test_process_env_selects_environment() {
    let t = Test::with_env("EPI_URL=https://int.example.com\n");

    let output = t.cmd().env("EPI_ENV", "int").arg("status").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "integration");
}
