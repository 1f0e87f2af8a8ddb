//! Deploy command.

use std::path::Path;

use crate::cli::{context, output, TargetArgs};
use crate::core::deploy;
use crate::core::remote::HttpClient;
use crate::error::{RemoteError, Result};

/// Upload `file` to the deployment service at `path`.
pub fn execute(target: &TargetArgs, file: &Path, path: &str) -> Result<()> {
    let config = context::load_config(target)?;
    let client = HttpClient::from_config(&config)?;

    output::progress(&format!("Uploading {}", file.display()));
    let result = context::runtime()?.block_on(deploy::deploy(&client, file, path));
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            output::progress_done(false);
            return Err(e);
        }
    };
    output::progress_done(report.is_success());

    if !report.is_success() {
        return Err(RemoteError::Status {
            status: report.status,
            reason: report.reason,
        }
        .into());
    }

    output::success(&format!("deployed to {}", client.base_url()));
    Ok(())
}
