//! Config command.
//!
//! Prints what the build tooling would resolve for the current root and
//! environment.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{context, output, TargetArgs};
use crate::core::aliases::ResolveConfig;
use crate::core::config::Config;
use crate::error::Result;

#[derive(Serialize)]
struct Report {
    environment: String,
    env_files: Vec<PathBuf>,
    root: PathBuf,
    source: PathBuf,
    server: PathBuf,
    epi_url: String,
    public_url: String,
    spa_path: String,
    epi_path: String,
    web_path: String,
    lib_path: String,
    forms_path: String,
    forms_enabled: bool,
    node_env: String,
    model_dir: String,
    resolve: ResolveConfig,
    define: BTreeMap<String, String>,
}

impl Report {
    fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            environment: config.environment().to_string(),
            env_files: config.env_files().to_vec(),
            root: config.root_dir().to_path_buf(),
            source: config.source_dir(),
            server: config.server_dir(),
            epi_url: config.epi_url(),
            public_url: config.public_url(),
            spa_path: config.spa_path(),
            epi_path: config.epi_path(),
            web_path: config.web_path(),
            lib_path: config.lib_path(),
            forms_path: config.forms_path(),
            forms_enabled: config.is_forms_enabled(),
            node_env: config.node_env(),
            model_dir: config.model_dir(),
            resolve: config.resolve_config()?,
            define: config.define_config(),
        })
    }
}

/// Print the resolved configuration.
pub fn execute(target: &TargetArgs, json: bool) -> Result<()> {
    let config = context::load_config(target)?;
    let report = Report::new(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::section("Configuration");
    output::kv("environment", &report.environment);
    output::kv("node env", &report.node_env);
    output::kv("root", output::path(&report.root.display().to_string()));
    output::kv("source", output::path(&report.source.display().to_string()));
    output::kv("server", output::path(&report.server.display().to_string()));
    output::kv("cms", &report.epi_url);
    output::kv("public url", &report.public_url);
    output::kv("spa path", &report.spa_path);
    output::kv("epi path", &report.epi_path);
    output::kv("web path", &report.web_path);
    output::kv("lib path", &report.lib_path);
    output::kv("models", &report.model_dir);
    output::kv(
        "forms",
        if report.forms_enabled {
            report.forms_path.clone()
        } else {
            "disabled".to_string()
        },
    );

    output::section("Env files");
    if report.env_files.is_empty() {
        output::dimmed("none found");
    }
    for file in &report.env_files {
        output::list_item(&file.display().to_string());
    }

    output::section("Aliases");
    for (prefix, dir) in &report.resolve.alias {
        output::kv(prefix, output::path(&dir.display().to_string()));
    }

    output::section("Defines");
    for (key, value) in &report.define {
        output::kv(key, value);
    }
    Ok(())
}
