//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("login"));
    assert!(out.contains("sync"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_exit_code(&output, 2);
}

#[test]
fn test_unknown_environment_is_rejected_by_parser() {
    let t = Test::new();

    let output = t.cmd().args(["--env", "staging", "config"]).output().unwrap();
    assert_exit_code(&output, 2);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "epikit");
}

#[test]
fn test_invalid_domain_fails_with_hint() {
    let t = Test::new();

    let output = t.cmd().args(["--domain", "not a url", "status"]).output().unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "not a valid URL");
    assert_stderr_contains(&output, "--domain");
}

#[test]
fn test_missing_root_fails() {
    let t = Test::new();

    let output = t.cmd().args(["-C", "does/not/exist", "config"]).output().unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "invalid application root directory");
}

#[test]
fn test_directory_in_place_of_auth_file_fails() {
    let t = Test::new();
    let url = "https://cms.example.com/";
    std::fs::create_dir(t.auth_file(url)).unwrap();

    let output = t.against(url, &["status"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "not of type file");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "epikit");
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.cmd().args(["--verbose", "config", "--json"]).output().unwrap();
    assert_success(&output);
    let _: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_stderr_contains(&output, "resolving configuration");
}

#[test]
fn test_global_flags_after_subcommand() {
    let t = Test::new();

    t.cmd()
        .args(["config", "--json", "--env", "prep", "--domain", "https://prep.example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"environment\": \"preproduction\""))
        .stdout(predicate::str::contains("https://prep.example.com/"));
}

#[test]
fn test_no_color_output_has_no_escape_codes() {
    let t = Test::new();

    t.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{1b}[").not());
}
