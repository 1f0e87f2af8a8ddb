//! Error types for epikit.
//!
//! Errors are grouped by the concern that raises them. The top-level
//! [`Error`] wraps each group so callers can use `?` everywhere and
//! `main` can still match on the specific variant to pick a hint or an
//! exit code.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error("deployment package not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    #[error("no command specified")]
    NoCommand,

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration resolution errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid application root directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed path mapping file {}: {source}", path.display())]
    PathMapping {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("the value \"{value}\" is not a valid URL: {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("episerver models directory not set")]
    MissingModelDir,
}

/// Credential storage errors.
///
/// Only the usability check raises these; store, load and clear report
/// failure through their return value.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("auth file exists but is not of type file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("unable to determine home directory")]
    NoHomeDir,
}

/// Errors talking to the CMS.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("unexpected response payload: {0}")]
    Decode(String),

    #[error("not authenticated")]
    NotAuthenticated,
}

/// Interactive authentication failures.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("error while validating authentication status: {0}")]
    StatusCheck(String),

    #[error("login failed: {0}")]
    LoginFailed(String),

    #[error("invalid credentials or locked account")]
    InvalidCredentials,
}

/// Model synchronisation failures.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("unable to retrieve content types: {0}")]
    CatalogUnavailable(String),

    #[error("failed to write {} generated file(s): {}", .0.len(), WriteFailureList(.0))]
    WriteFailures(Vec<WriteFailure>),
}

/// A generated file that could not be written.
#[derive(Debug, Clone)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub reason: String,
}

struct WriteFailureList<'a>(&'a [WriteFailure]);

impl fmt::Display for WriteFailureList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ({})", failure.path.display(), failure.reason)?;
        }
        Ok(())
    }
}

/// Terminal interaction errors.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("input closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, Error>;
