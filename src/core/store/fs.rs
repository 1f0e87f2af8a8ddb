//! Filesystem-based credential storage.
//!
//! Stores the token as base64 of its UTF-8 JSON in a single file under the
//! home directory: `~/.<scope>.epi_auth`, or `~/.epi_auth` without a scope.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{scope_for_url, Token, TokenStore};
use crate::core::constants;
use crate::error::{Result, StoreError};

/// Filesystem-based credential storage.
#[derive(Debug, Clone)]
pub struct FileStore {
    home: PathBuf,
    scope: String,
}

impl FileStore {
    /// Create a store in the current user's home directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoHomeDir` if the home directory is unknown.
    pub fn new(scope: impl Into<String>) -> Result<Self> {
        let home = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
        Ok(Self::with_home(home, scope))
    }

    /// Create a store rooted at an explicit directory.
    pub fn with_home(home: impl Into<PathBuf>, scope: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            scope: scope.into(),
        }
    }

    /// Create a store scoped to the host of `url`.
    pub fn for_endpoint(url: &Url) -> Result<Self> {
        Self::new(scope_for_url(url))
    }

    /// The scope this store is bound to.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Deterministic storage path.
    pub fn location(&self) -> PathBuf {
        if self.scope.is_empty() {
            self.home.join(constants::AUTH_FILE)
        } else {
            self.home
                .join(format!(".{}{}", self.scope, constants::AUTH_FILE))
        }
    }

    /// Whether the storage path can be read and written.
    ///
    /// An existing path must be a regular, read/write accessible file; a
    /// missing one needs a writable parent directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotAFile` if the path exists but is not a file.
    pub fn is_usable(&self) -> Result<bool> {
        let path = self.location();

        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(is_read_write(&path)),
            Ok(_) => Err(StoreError::NotAFile(path).into()),
            Err(_) => Ok(path.parent().is_some_and(is_writable_dir)),
        }
    }

    /// Serialize `token` as base64 JSON and write it, replacing prior content.
    ///
    /// # Returns
    ///
    /// `true` if the write succeeded.
    pub fn store<T: Serialize + ?Sized>(&self, token: &T) -> bool {
        if !self.usable_or_warn() {
            return false;
        }

        let encoded = match serde_json::to_vec(token) {
            Ok(json) => STANDARD.encode(json),
            Err(e) => {
                warn!(error = %e, "failed to serialize token");
                return false;
            }
        };

        let path = self.location();
        match write_private(&path, encoded.as_bytes()) {
            Ok(()) => {
                debug!(path = %path.display(), "token stored");
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to write token");
                false
            }
        }
    }

    /// Load and decode the stored token.
    ///
    /// Returns `None` if the file is missing, unusable, or not base64 JSON.
    pub fn load<T: DeserializeOwned>(&self) -> Option<T> {
        if !self.usable_or_warn() {
            return None;
        }

        let path = self.location();
        let contents = fs::read_to_string(&path).ok()?;
        let bytes = match STANDARD.decode(contents.trim()) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "stored token is not base64");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(token) => Some(token),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "stored token is not valid json");
                None
            }
        }
    }

    /// Whether a decodable token is stored.
    pub fn has(&self) -> bool {
        self.load::<serde_json::Value>().is_some()
    }

    /// Delete the stored token.
    ///
    /// # Returns
    ///
    /// `true` if the file was removed; a missing file counts as failure.
    pub fn clear(&self) -> bool {
        if !self.usable_or_warn() {
            return false;
        }

        let path = self.location();
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "token cleared");
                true
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "failed to clear token");
                false
            }
        }
    }

    fn usable_or_warn(&self) -> bool {
        match self.is_usable() {
            Ok(usable) => usable,
            Err(e) => {
                warn!(error = %e, "credential storage unusable");
                false
            }
        }
    }
}

impl TokenStore for FileStore {
    fn store_token(&self, token: &Token) -> bool {
        self.store(token)
    }

    fn load_token(&self) -> Option<Token> {
        self.load()
    }

    fn clear_token(&self) -> bool {
        self.clear()
    }

    fn location(&self) -> PathBuf {
        FileStore::location(self)
    }
}

fn is_read_write(path: &Path) -> bool {
    fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .is_ok()
}

fn is_writable_dir(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }

    // Mode bits do not account for ACLs or the effective user.
    let probe = dir.join(format!(".epikit-probe-{}", std::process::id()));
    match fs::OpenOptions::new().write(true).create_new(true).open(&probe) {
        Ok(_) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        let mut file = fs::OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .mode(0o600)
            .open(path)?;
        file.write_all(data)?;
        file.flush()?;

        // Ensure secure permissions even when overwriting an existing file.
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    #[cfg(not(unix))]
    {
        let mut file = fs::File::create(path)?;
        file.write_all(data)?;
        file.flush()?;
    }

    Ok(())
}
