//! Tests for `epikit run`.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_run_injects_domain_override() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--domain", "https://cms.example.com", "run", "--", "sh", "-c", "echo $EPI_URL"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "https://cms.example.com");
}

#[cfg(unix)]
#[test]
fn test_run_synthesises_node_env() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--env", "prod", "run", "--", "sh", "-c", "echo $NODE_ENV"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "production");
}

#[cfg(unix)]
#[test]
fn test_run_insecure_disables_tls_checks_in_child() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--insecure", "run", "--", "sh", "-c", "echo tls=$NODE_TLS_REJECT_UNAUTHORIZED"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "tls=0");
}

#[cfg(unix)]
#[test]
fn test_run_forwards_exit_code() {
    let t = Test::new();

    let output = t.run(&["sh", "-c", "exit 4"]);
    assert_exit_code(&output, 4);
}

#[test]
fn test_run_requires_command() {
    let t = Test::new();

    let output = t.cmd().arg("run").output().unwrap();
    assert_exit_code(&output, 2);
}
