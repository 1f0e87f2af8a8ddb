//! Status command.

use colored::Colorize;

use crate::cli::{context, output, TargetArgs};
use crate::core::remote::{AuthService, HttpClient};
use crate::error::Result;

/// Show the resolved target and whether a session is available.
pub fn execute(target: &TargetArgs) -> Result<()> {
    let config = context::load_config(target)?;
    let client = HttpClient::from_config(&config)?;

    output::section("Epikit Status");
    output::kv("environment", config.environment());
    output::kv("cms", client.base_url());
    output::kv(
        "credential",
        output::path(&client.credential_location().display().to_string()),
    );

    let rt = context::runtime()?;
    let session = rt.block_on(async {
        if client.is_authenticated().await? {
            client.current_user().await.map(Some)
        } else {
            Ok(None)
        }
    });

    let state = match &session {
        Ok(Some(Some(user))) => format!("{} as {}", "✓ authenticated".green(), user),
        Ok(Some(None)) => "✓ authenticated".green().to_string(),
        Ok(None) => format!("{} not authenticated", "✗".red()),
        Err(e) => format!("{} unknown ({})", "!".yellow(), e),
    };
    output::kv("session", state);

    if !matches!(session, Ok(Some(_))) {
        println!();
        output::hint(&format!("run: {}", output::cmd("epikit login")));
    }
    Ok(())
}
