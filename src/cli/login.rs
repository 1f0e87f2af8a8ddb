//! Login command.
//!
//! Interactive authentication against the configured CMS. Prompts on the
//! terminal when attached to one, otherwise reads answers line by line
//! from stdin.

use std::io;

use crate::cli::{context, output, TargetArgs};
use crate::core::auth::{Authenticator, LinePrompt, Outcome, Prompt, TermPrompt};
use crate::core::remote::HttpClient;
use crate::error::{AuthError, Result};

/// Log in and persist the credential.
pub fn execute(
    target: &TargetArgs,
    username: Option<String>,
    password: Option<String>,
    force: bool,
) -> Result<()> {
    let config = context::load_config(target)?;
    let client = HttpClient::from_config(&config)?;

    println!();
    output::header(&format!(
        " == Episerver CLI Authentication tool ({}) == ",
        client.base_url()
    ));
    println!();

    let rt = context::runtime()?;
    let outcome = if atty::is(atty::Stream::Stdin) {
        rt.block_on(authenticate(&client, TermPrompt::stdout(), username, password, force))?
    } else {
        let stdin = io::stdin();
        let prompt = LinePrompt::new(stdin.lock(), io::stdout());
        rt.block_on(authenticate(&client, prompt, username, password, force))?
    };

    match outcome {
        Outcome::Authenticated { username } => {
            output::success(&format!("logged in as {}", output::key(&username)));
            let location = client.credential_location().display().to_string();
            output::kv("credential", output::path(&location));
            Ok(())
        }
        Outcome::Kept { user } => {
            output::dimmed(&match user {
                Some(user) => format!("keeping the current session of {}", user),
                None => "keeping the current session".to_string(),
            });
            Ok(())
        }
        Outcome::Rejected { .. } => Err(AuthError::InvalidCredentials.into()),
    }
}

async fn authenticate<P: Prompt>(
    client: &HttpClient,
    prompt: P,
    username: Option<String>,
    password: Option<String>,
    force: bool,
) -> Result<Outcome> {
    Authenticator::new(client, prompt)
        .username(username)
        .password(password)
        .force(force)
        .run()
        .await
}
