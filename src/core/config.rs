//! Environment driven configuration.
//!
//! [`Config`] layers, from lowest to highest precedence: the `.env`,
//! `.env.local` and `.env.<environment>.local` files under the application
//! root, the process environment, and the caller supplied overrides. Empty
//! values never shadow a lower layer. Accessors wrap [`Config::get`] with
//! the defaults the build expects.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::core::constants;
use crate::core::dotenv::{self, DotEnv};
use crate::core::environment::EnvName;
use crate::error::{ConfigError, Result};

/// A string keyed set of configuration values.
pub type Vars = BTreeMap<String, String>;

/// Resolved configuration for one application root and environment.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    environment: EnvName,
    env_files: Vec<PathBuf>,
    values: Vars,
    overrides: Vars,
}

impl Config {
    /// Resolve configuration for `root` using the current process environment.
    ///
    /// `environment` takes precedence over `EPI_ENV` (overrides, then process)
    /// and `NODE_ENV`; the first non-empty candidate is parsed, and an
    /// unrecognised name resolves to development.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidRoot` if `root` does not exist, or
    /// `ConfigError::ReadFile` if a present `.env` file cannot be read.
    pub fn new(root: impl AsRef<Path>, overrides: Vars, environment: Option<&str>) -> Result<Self> {
        Self::with_process_env(root, overrides, environment, std::env::vars().collect())
    }

    /// Resolve configuration against an explicit process environment.
    pub fn with_process_env(
        root: impl AsRef<Path>,
        overrides: Vars,
        environment: Option<&str>,
        process_env: Vars,
    ) -> Result<Self> {
        let root = root.as_ref();
        let root = if root.as_os_str().is_empty() {
            std::env::current_dir()?
        } else {
            root.to_path_buf()
        };
        if !root.exists() {
            return Err(ConfigError::InvalidRoot(root).into());
        }

        let environment = resolve_environment(environment, &overrides, &process_env);
        debug!(root = %root.display(), environment = %environment, "resolving configuration");

        let env_files = find_env_files(&root, environment);
        let mut values = Vars::new();

        for file in &env_files {
            let parsed = DotEnv::load(file)?;
            let mut layer = Vars::new();
            for (key, raw) in parsed.entries() {
                let value = dotenv::expand(raw, |name| {
                    non_empty(&process_env, name)
                        .or_else(|| non_empty(&layer, name))
                        .or_else(|| non_empty(&values, name))
                        .map(str::to_string)
                });
                layer.insert(key.clone(), value);
            }
            debug!(path = %file.display(), keys = layer.len(), "applied env file");
            merge(&mut values, layer);
        }

        merge(&mut values, process_env);
        merge(&mut values, overrides);

        let mut config = Self {
            root,
            environment,
            env_files,
            values,
            overrides: Vars::new(),
        };

        if config.value("NODE_ENV").is_none() {
            config.override_value("NODE_ENV", environment.node_env());
        }

        Ok(config)
    }

    /// Read a value: first non-empty of `key` in the resolved set, else `default`.
    pub fn get(&self, key: &str, default: &str) -> String {
        self.get_with(key, default, None)
    }

    /// Read a value, consulting a per-call override map before the resolved set.
    pub fn get_with(&self, key: &str, default: &str, local: Option<&Vars>) -> String {
        local
            .and_then(|vars| non_empty(vars, key))
            .or_else(|| self.value(key))
            .unwrap_or(default)
            .to_string()
    }

    /// The resolved, non-empty value for `key`, if any.
    pub fn value(&self, key: &str) -> Option<&str> {
        non_empty(&self.values, key)
    }

    /// Override a value within this configuration.
    ///
    /// The override is also recorded for propagation to child processes via
    /// [`Config::apply_to`].
    pub fn override_value(&mut self, key: &str, value: &str) -> &mut Self {
        debug!(key, "overriding configuration value");
        self.values.insert(key.to_string(), value.to_string());
        self.overrides.insert(key.to_string(), value.to_string());
        self
    }

    /// Values set through [`Config::override_value`].
    pub fn overrides(&self) -> &Vars {
        &self.overrides
    }

    /// Propagate overrides to a child process.
    pub fn apply_to<'a>(&self, command: &'a mut Command) -> &'a mut Command {
        command.envs(&self.overrides)
    }

    /// The application root directory.
    pub fn root_dir(&self) -> &Path {
        &self.root
    }

    /// The resolved deployment environment.
    pub fn environment(&self) -> EnvName {
        self.environment
    }

    /// `.env` files that took part in resolution, in ascending precedence.
    pub fn env_files(&self) -> &[PathBuf] {
        &self.env_files
    }

    /// Application sources, relative to the root (`SRC_PATH`, default `src`).
    pub fn source_path(&self) -> String {
        self.get("SRC_PATH", "src")
    }

    /// Absolute application source directory.
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(self.source_path())
    }

    /// Server side rendering sources (`SERVER_PATH`, default `server`).
    pub fn server_path(&self) -> String {
        self.get("SERVER_PATH", "server")
    }

    /// Absolute server side rendering directory.
    pub fn server_dir(&self) -> PathBuf {
        self.root.join(self.server_path())
    }

    /// Location of the SPA within the CMS site (`SPA_PATH`, default `Spa`).
    pub fn spa_path(&self) -> String {
        self.get("SPA_PATH", "Spa")
    }

    /// Location of the CMS project, relative to the root
    /// (`EPI_PATH`, default `../Foundation`).
    pub fn epi_path(&self) -> String {
        self.get("EPI_PATH", "../Foundation")
    }

    /// Web path the application is served from (`WEB_PATH`, default `/`).
    pub fn web_path(&self) -> String {
        self.get("WEB_PATH", "/")
    }

    /// Library output path (`LIB_PATH`, default `lib`).
    pub fn lib_path(&self) -> String {
        self.get("LIB_PATH", "lib")
    }

    /// Forms integration scripts (`EPI_FORMS_PATH`).
    pub fn forms_path(&self) -> String {
        self.get("EPI_FORMS_PATH", "Scripts/EPiServer.ContentApi.Forms")
    }

    /// Whether the forms integration is enabled (`EPI_FORMS_INCLUDE=true`).
    pub fn is_forms_enabled(&self) -> bool {
        self.get("EPI_FORMS_INCLUDE", "false").eq_ignore_ascii_case("true")
    }

    /// Runtime mode (`NODE_ENV`, default `development`).
    pub fn node_env(&self) -> String {
        self.get("NODE_ENV", "development")
    }

    /// CMS base URL (`EPI_URL`, default `/`), always with one trailing slash.
    pub fn epi_url(&self) -> String {
        ensure_trailing_slash(&self.get("EPI_URL", "/"))
    }

    /// Public URL of the application (`PUBLIC_URL`, else the CMS base URL).
    pub fn public_url(&self) -> String {
        match self.value("PUBLIC_URL") {
            Some(url) => url.to_string(),
            None => self.epi_url(),
        }
    }

    /// Generated model directory, relative to the root
    /// (`EPI_MODEL_PATH`, default `src/Models/Episerver`).
    pub fn model_dir(&self) -> String {
        self.get("EPI_MODEL_PATH", constants::MODEL_DIR)
    }

    /// Whether TLS certificate verification has been switched off.
    pub fn accept_invalid_certs(&self) -> bool {
        self.value("NODE_TLS_REJECT_UNAUTHORIZED") == Some("0")
    }

    /// Build-time constants substituted into the bundle, JSON encoded.
    pub fn define_config(&self) -> BTreeMap<String, String> {
        let json = |v: String| serde_json::Value::String(v).to_string();
        BTreeMap::from([
            ("process.env.NODE_ENV".to_string(), json(self.node_env())),
            ("process.env.EPI_URL".to_string(), json(self.get("EPI_URL", "/"))),
            ("process.env.WEB_PATH".to_string(), json(self.web_path())),
        ])
    }
}

/// Append a `/` unless the value already ends with one.
pub fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

fn resolve_environment(explicit: Option<&str>, overrides: &Vars, process_env: &Vars) -> EnvName {
    let candidate = explicit
        .filter(|v| !v.is_empty())
        .or_else(|| non_empty(overrides, "EPI_ENV"))
        .or_else(|| non_empty(process_env, "EPI_ENV"))
        .or_else(|| non_empty(process_env, "NODE_ENV"))
        .unwrap_or("");
    EnvName::parse_or(candidate, EnvName::Development)
}

fn find_env_files(root: &Path, environment: EnvName) -> Vec<PathBuf> {
    let local = format!(".env.{}.local", environment);
    constants::ENV_FILES
        .iter()
        .copied()
        .chain(std::iter::once(local.as_str()))
        .map(|name| root.join(name))
        .filter(|path| path.is_file())
        .collect()
}

fn merge(target: &mut Vars, layer: Vars) {
    for (key, value) in layer {
        if !value.is_empty() {
            target.insert(key, value);
        }
    }
}

fn non_empty<'a>(vars: &'a Vars, key: &str) -> Option<&'a str> {
    vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
}
