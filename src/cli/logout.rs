//! Logout command.

use crate::cli::{context, output, TargetArgs};
use crate::core::remote::{AuthService, HttpClient};
use crate::error::Result;

/// Remove the stored credential for the configured CMS.
pub fn execute(target: &TargetArgs) -> Result<()> {
    let config = context::load_config(target)?;
    let client = HttpClient::from_config(&config)?;
    let location = client.credential_location();

    let removed = context::runtime()?.block_on(client.logout())?;
    if removed {
        output::success(&format!("logged out of {}", client.base_url()));
    } else {
        output::dimmed(&format!(
            "no stored credential at {}",
            location.display()
        ));
    }
    Ok(())
}
