//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Variables that would leak the developer's setup into a test run.
const SCRUBBED: &[&str] = &[
    "EPI_URL",
    "EPI_ENV",
    "NODE_ENV",
    "EPI_MODEL_PATH",
    "NODE_TLS_REJECT_UNAUTHORIZED",
    "EPIKIT_LOG",
];

impl Test {
    /// Create an epikit command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the application root
    /// - NO_COLOR set so output can be matched literally
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("epikit").expect("failed to find epikit binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        for key in SCRUBBED {
            cmd.env_remove(key);
        }
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `epikit config --json`.
    pub fn config_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .cmd()
            .args(args)
            .args(["config", "--json"])
            .output()
            .expect("failed to run epikit config");
        super::assert_success(&output);
        serde_json::from_slice(&output.stdout).expect("config output is not JSON")
    }

    /// Shortcut for `epikit --domain <url> login -u <user> -p <password>`.
    pub fn login(&self, url: &str, username: &str, password: &str) -> Output {
        self.cmd()
            .args(["--domain", url, "login", "-u", username, "-p", password])
            .output()
            .expect("failed to run epikit login")
    }

    /// Shortcut for `epikit --domain <url> <args...>`.
    pub fn against(&self, url: &str, args: &[&str]) -> Output {
        self.cmd()
            .args(["--domain", url])
            .args(args)
            .output()
            .expect("failed to run epikit")
    }

    /// Shortcut for `epikit run -- <command...>`.
    pub fn run(&self, command: &[&str]) -> Output {
        self.cmd()
            .arg("run")
            .arg("--")
            .args(command)
            .output()
            .expect("failed to run epikit run")
    }
}
