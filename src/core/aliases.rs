//! Module resolution settings for the bundler.
//!
//! When a TypeScript path mapping file exists it is the sole source of
//! module aliases; otherwise `app` and `app.server` are derived from the
//! configured source and server paths.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::core::config::Config;
use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Module aliases, keyed by import prefix.
pub type Aliases = BTreeMap<String, PathBuf>;

/// Bundler `resolve` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveConfig {
    pub alias: Aliases,
    pub extensions: Vec<String>,
}

impl Config {
    /// Path mapping file (`TS_CONFIG_FILE`, default `tsconfig.json`).
    pub fn ts_config_file(&self) -> PathBuf {
        normalize(
            &self
                .root_dir()
                .join(self.get("TS_CONFIG_FILE", constants::TS_CONFIG_FILE)),
        )
    }

    /// Resolve module aliases to absolute directories.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::PathMapping` if the mapping file exists but is
    /// not valid JSON.
    pub fn module_aliases(&self) -> Result<Aliases> {
        let file = self.ts_config_file();

        if !file.is_file() {
            debug!("no path mapping file, using default aliases");
            return Ok(BTreeMap::from([
                ("app".to_string(), normalize(&self.source_dir())),
                ("app.server".to_string(), normalize(&self.server_dir())),
            ]));
        }

        info!(path = %file.display(), "building aliases from path mapping file");
        let contents = std::fs::read_to_string(&file).map_err(|source| ConfigError::ReadFile {
            path: file.clone(),
            source,
        })?;
        let ts_config: Value =
            serde_json::from_str(&contents).map_err(|source| ConfigError::PathMapping {
                path: file.clone(),
                source,
            })?;

        let options = ts_config.get("compilerOptions");
        let base_url = options
            .and_then(|o| o.get("baseUrl"))
            .and_then(Value::as_str)
            .unwrap_or("");
        let base = self.root_dir().join(base_url);

        let mut aliases = Aliases::new();
        if let Some(paths) = options.and_then(|o| o.get("paths")).and_then(Value::as_object) {
            for (prefix, targets) in paths {
                let target = match targets {
                    Value::Array(items) => items.first().and_then(Value::as_str).unwrap_or(""),
                    Value::String(s) => s.as_str(),
                    _ => "",
                };
                aliases.insert(
                    strip_wildcard(prefix).to_string(),
                    normalize(&base.join(strip_wildcard(target))),
                );
            }
        }

        Ok(aliases)
    }

    /// Full bundler resolve block: aliases, forms alias when enabled, and the
    /// resolvable extensions.
    pub fn resolve_config(&self) -> Result<ResolveConfig> {
        let mut alias = self.module_aliases()?;

        if self.is_forms_enabled() {
            alias.insert(
                constants::FORMS_ALIAS.to_string(),
                normalize(&self.root_dir().join(self.forms_path())),
            );
        }

        Ok(ResolveConfig {
            alias,
            extensions: constants::RESOLVE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        })
    }
}

fn strip_wildcard(value: &str) -> &str {
    value
        .strip_suffix("/*")
        .or_else(|| value.strip_suffix("\\*"))
        .unwrap_or(value)
}

/// Lexically normalise a path, folding `.` and `..` without touching disk.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
