//! Credential storage.
//!
//! Persists the token obtained at login so later commands can reuse it.
//! Tokens are scoped per endpoint: the scope is the SHA-256 hex digest of
//! the endpoint host, so two CMS instances never share a credential file.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `TokenStore` trait
//! 2. Add the implementation in a new file (e.g., `keyring.rs`)
//! 3. Re-export from this module

use std::path::PathBuf;

use reqwest::Url;
use sha2::{Digest, Sha256};

mod fs;
mod token;

pub use fs::FileStore;
pub use token::Token;

/// Token storage trait.
///
/// Implementations never fail loudly: a failed write, a missing or corrupt
/// token, and a failed delete are all reported through the return value.
pub trait TokenStore: Send + Sync {
    /// Persist `token`, replacing any previous one.
    ///
    /// # Returns
    ///
    /// `true` if the token was written.
    fn store_token(&self, token: &Token) -> bool;

    /// Load the stored token, if one exists and can be decoded.
    fn load_token(&self) -> Option<Token>;

    /// Remove the stored token.
    ///
    /// # Returns
    ///
    /// `true` if a token was removed; absence counts as failure.
    fn clear_token(&self) -> bool;

    /// Where the token lives, for display.
    fn location(&self) -> PathBuf;
}

/// Derive the storage scope for an endpoint from its host (and port).
pub fn scope_for_url(url: &Url) -> String {
    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };
    format!("{:x}", Sha256::digest(host.as_bytes()))
}
