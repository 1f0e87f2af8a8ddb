//! Run command.
//!
//! Executes a command with the configuration overrides (such as `EPI_URL`
//! from `--domain`, or the relaxed TLS setting from `--insecure`) injected
//! as environment variables.

use std::process::Command;

use tracing::debug;

use crate::cli::{context, TargetArgs};
use crate::core::config::Config;
use crate::error::{Error, Result};

/// Run a command and return its exit code.
pub fn execute(target: &TargetArgs, command: &[String]) -> Result<u8> {
    let config = context::load_config(target)?;
    let code = run_with_overrides(&config, command)?;
    Ok(u8::try_from(code).unwrap_or(1))
}

fn run_with_overrides(config: &Config, command: &[String]) -> Result<i32> {
    let (program, args) = command.split_first().ok_or(Error::NoCommand)?;

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(config.root_dir());
    config.apply_to(&mut cmd);
    debug!(program = %program, overrides = config.overrides().len(), "spawning");

    let status = cmd.status()?;
    // Terminated by a signal: no code available
    Ok(status.code().unwrap_or(1))
}
