//! Tests for `epikit config`.

use crate::support::*;

#[test]
fn test_defaults_without_env_files() {
    let t = Test::new();

    let config = t.config_json(&[]);
    assert_eq!(config["environment"], "development");
    assert_eq!(config["node_env"], "development");
    assert_eq!(config["epi_url"], "/");
    assert_eq!(config["spa_path"], "Spa");
    assert_eq!(config["model_dir"], "src/Models/Episerver");
    assert_eq!(config["forms_enabled"], false);
    assert_eq!(config["env_files"].as_array().unwrap().len(), 0);
}

#[test]
fn test_env_file_values_are_used() {
    let t = Test::with_env(SAMPLE_ENV);

    let config = t.config_json(&[]);
    assert_eq!(config["model_dir"], "app/Models/Episerver");
    assert!(config["source"].as_str().unwrap().ends_with("app"));
    assert_eq!(config["env_files"].as_array().unwrap().len(), 1);
}

#[test]
fn test_environment_local_file_wins() {
    let t = Test::with_env("EPI_URL=https://dev.example.com\n");
    t.write(".env.production.local", "EPI_URL=https://www.example.com\n");

    let config = t.config_json(&["--env", "prod"]);
    assert_eq!(config["environment"], "production");
    assert_eq!(config["node_env"], "production");
    assert_eq!(config["epi_url"], "https://www.example.com/");
}

#[test]
fn test_process_environment_beats_env_file() {
    let t = Test::with_env("EPI_URL=https://file.example.com/\n");

    let output = t
        .cmd()
        .env("EPI_URL", "https://process.example.com/")
        .args(["config", "--json"])
        .output()
        .unwrap();
    assert_success(&output);
    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["epi_url"], "https://process.example.com/");
}

#[test]
fn test_domain_flag_overrides_url() {
    let t = Test::with_env("EPI_URL=https://file.example.com/\n");

    let config = t.config_json(&["--domain", "https://flag.example.com"]);
    assert_eq!(config["epi_url"], "https://flag.example.com/");
    assert_eq!(config["public_url"], "https://flag.example.com/");
}

#[test]
fn test_path_mapping_file_drives_aliases() {
    let t = Test::new();
    t.write("tsconfig.json", SAMPLE_TSCONFIG);

    let config = t.config_json(&[]);
    let alias = config["resolve"]["alias"].as_object().unwrap();
    assert!(alias["app"].as_str().unwrap().ends_with("src"));
    assert!(alias["shared"].as_str().unwrap().ends_with("shared"));
}

#[test]
fn test_forms_alias_when_enabled() {
    let t = Test::with_env("EPI_FORMS_INCLUDE=true\n");

    let config = t.config_json(&[]);
    assert_eq!(config["forms_enabled"], true);
    assert!(config["resolve"]["alias"]
        .as_object()
        .unwrap()
        .contains_key("EPiServer.ContentApi.Forms"));
}

#[test]
fn test_human_output() {
    let t = Test::with_env(SAMPLE_ENV);

    let output = t.cmd().arg("config").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Configuration");
    assert_stdout_contains(&output, "app/Models/Episerver");
    assert_stdout_contains(&output, "Aliases");
}

#[test]
fn test_insecure_warns_on_stderr_only() {
    let t = Test::new();

    let output = t.cmd().args(["--insecure", "config", "--json"]).output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "certificate checks disabled");
    let _: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
}
