//! Shared setup for commands: configuration and the async runtime.

use tokio::runtime::Runtime;

use crate::cli::{output, TargetArgs};
use crate::core::config::{Config, Vars};
use crate::core::remote::parse_base_url;
use crate::error::Result;

/// Resolve the configuration for the targeted application and CMS.
///
/// # Errors
///
/// Returns `ConfigError::InvalidUrl` for a malformed `--domain`, or any
/// error raised while resolving the configuration.
pub fn load_config(target: &TargetArgs) -> Result<Config> {
    let mut overrides = Vars::new();
    if let Some(domain) = &target.domain {
        parse_base_url(domain)?;
        overrides.insert("EPI_URL".to_string(), domain.clone());
    }

    let environment = target.env.map(|env| env.as_str());
    let mut config = Config::new(&target.root, overrides, environment)?;
    if let Some(domain) = &target.domain {
        config.override_value("EPI_URL", domain);
    }

    if target.insecure {
        output::warn(
            "certificate checks disabled, this breaks identity verification of the server",
        );
        config.override_value("NODE_TLS_REJECT_UNAUTHORIZED", "0");
    }

    Ok(config)
}

/// A single threaded runtime for the network bound commands.
pub fn runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
