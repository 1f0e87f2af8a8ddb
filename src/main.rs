//! Epikit - tooling for Episerver headless SPA projects.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use epikit::cli::output;
use epikit::cli::{execute, Cli};
use epikit::error::{AuthError, ConfigError, Error, RemoteError, StoreError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("EPIKIT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("epikit=debug")
        } else {
            EnvFilter::new("epikit=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match execute(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            let suggestion = match &e {
                Error::Remote(RemoteError::NotAuthenticated) => {
                    Some("run: epikit login".to_string())
                }
                Error::Config(ConfigError::InvalidUrl { .. }) => Some(
                    "pass a full URL with --domain or set EPI_URL, e.g. https://cms.example.com/"
                        .to_string(),
                ),
                Error::Config(ConfigError::MissingModelDir) => {
                    Some("set EPI_MODEL_PATH or pass --output".to_string())
                }
                Error::Store(StoreError::NotAFile(path)) => {
                    Some(format!("remove or rename {}", path.display()))
                }
                _ => None,
            };

            output::error(&e.to_string());
            if let Some(hint) = suggestion {
                output::hint(&hint);
            }

            match e {
                Error::Auth(AuthError::InvalidCredentials) => ExitCode::from(3),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
