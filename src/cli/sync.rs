//! Sync command.
//!
//! Regenerates the TypeScript models for every content type known to the
//! CMS and removes the ones it no longer knows about.

use std::path::PathBuf;

use crate::cli::{context, output, TargetArgs};
use crate::core::remote::HttpClient;
use crate::core::sync::{ModelSync, SyncOptions};
use crate::error::Result;

/// Synchronise the model directory with the CMS.
pub fn execute(
    target: &TargetArgs,
    dir: Option<PathBuf>,
    concurrency: usize,
    schema: bool,
) -> Result<()> {
    let config = context::load_config(target)?;
    let client = HttpClient::from_config(&config)?;

    let mut options = SyncOptions::from_config(&config)?;
    if let Some(dir) = dir {
        options.output = config.root_dir().join(dir);
    }
    options.concurrency = concurrency;
    options.schema = schema;

    output::section("Episerver Model Synchronization");
    output::kv("cms", client.base_url());
    output::kv("models", output::path(&options.output.display().to_string()));
    println!();

    let report = context::runtime()?.block_on(ModelSync::new(&client, options).run())?;

    match &report.user {
        Some(user) => output::kv("user", user),
        None => output::warn("no authenticated user, models reflect anonymous access"),
    }
    for path in &report.removed {
        output::dimmed(&format!("  removed {}", path.display()));
    }
    for name in &report.skipped {
        output::warn(&format!("no details for {}, model file skipped", name));
    }
    output::success(&format!(
        "{} content types, {} files written",
        report.types,
        report.written.len()
    ));
    Ok(())
}
