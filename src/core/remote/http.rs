//! HTTP implementation of the remote capabilities.
//!
//! Tokens are obtained from the CMS OAuth endpoint with the password grant,
//! persisted through a [`TokenStore`], refreshed with the refresh grant once
//! expired, and sent as a bearer header on every other request.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::model::is_network_error;
use super::{AuthService, DeployReport, Deployer, ModelCatalog, TypeDetail, TypeSummary};
use crate::core::config::Config;
use crate::core::constants;
use crate::core::store::{FileStore, Token, TokenStore};
use crate::error::{ConfigError, RemoteError, Result};

/// Client for one CMS instance.
pub struct HttpClient {
    base: Url,
    http: reqwest::Client,
    store: Box<dyn TokenStore>,
}

impl HttpClient {
    /// Create a client for `base`, persisting credentials in `store`.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Transport` if the HTTP client cannot be built.
    pub fn new(base: Url, store: Box<dyn TokenStore>, accept_invalid_certs: bool) -> Result<Self> {
        if accept_invalid_certs {
            warn!("certificate verification disabled");
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("epikit/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(RemoteError::Transport)?;

        Ok(Self { base, http, store })
    }

    /// Create a client for the configured CMS with a home directory store
    /// scoped to its host.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `EPI_URL` is not absolute, or
    /// `StoreError::NotAFile` if the credential path is occupied by
    /// something other than a file.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base = parse_base_url(&config.epi_url())?;
        let store = FileStore::for_endpoint(&base)?;
        store.is_usable()?;
        Self::new(base, Box::new(store), config.accept_invalid_certs())
    }

    /// The CMS base URL (always ending in `/`).
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Where the credential for this CMS is stored.
    pub fn credential_location(&self) -> PathBuf {
        self.store.location()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| {
                ConfigError::InvalidUrl {
                    value: format!("{}{}", self.base, path),
                    reason: e.to_string(),
                }
                .into()
            })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.load_token() {
            Some(token) if !token.is_expired(Utc::now()) => {
                request.bearer_auth(token.access_token)
            }
            Some(_) => {
                debug!("stored token expired, sending request anonymously");
                request
            }
            None => request,
        }
    }

    /// GET a JSON payload. `None` for non-success statuses and for the
    /// network error shape.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "GET");

        let response = self
            .authorize(self.http.get(url.clone()))
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "request failed");
            return Ok(None);
        }

        let body: Value = response.json().await.map_err(RemoteError::Transport)?;
        if is_network_error(&body) {
            warn!(url = %url, "server returned a network error payload");
            return Ok(None);
        }

        serde_json::from_value(body)
            .map(Some)
            .map_err(|e| RemoteError::Decode(format!("{}: {}", url, e)).into())
    }

    /// POST a grant to the token endpoint. `None` when the server rejects it.
    async fn request_token(&self, form: &[(&str, &str)]) -> Result<Option<Token>> {
        let url = self.endpoint(constants::TOKEN_PATH)?;
        debug!(url = %url, "requesting token");

        let response = self
            .http
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            debug!(status = status.as_u16(), "token request rejected");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            }
            .into());
        }

        let token: Token = response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(format!("token response: {}", e)))?;
        Ok(Some(token))
    }
}

#[async_trait]
impl AuthService for HttpClient {
    async fn is_authenticated(&self) -> Result<bool> {
        let Some(token) = self.store.load_token() else {
            return Ok(false);
        };
        if !token.is_expired(Utc::now()) {
            return Ok(true);
        }

        let Some(refresh) = token.refresh_token.as_deref() else {
            debug!("token expired without refresh token");
            return Ok(false);
        };

        info!("refreshing expired token");
        let grant = [
            ("grant_type", "refresh_token"),
            ("client_id", constants::CLIENT_ID),
            ("refresh_token", refresh),
        ];
        match self.request_token(&grant).await? {
            Some(fresh) => {
                if !self.store.store_token(&fresh) {
                    warn!(path = %self.store.location().display(), "refreshed token not persisted");
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn current_user(&self) -> Result<Option<String>> {
        Ok(self.store.load_token().and_then(|t| t.username))
    }

    async fn login(&self, username: &str, password: &str) -> Result<bool> {
        let grant = [
            ("grant_type", "password"),
            ("client_id", constants::CLIENT_ID),
            ("username", username),
            ("password", password),
        ];

        let Some(mut token) = self.request_token(&grant).await? else {
            return Ok(false);
        };
        if token.username.is_none() {
            token.username = Some(username.to_string());
        }
        if !self.store.store_token(&token) {
            warn!(path = %self.store.location().display(), "token not persisted");
        }
        Ok(true)
    }

    async fn logout(&self) -> Result<bool> {
        Ok(self.store.clear_token())
    }
}

#[async_trait]
impl ModelCatalog for HttpClient {
    async fn list_types(&self) -> Result<Option<Vec<TypeSummary>>> {
        self.get_json(constants::MODEL_SERVICE_PATH).await
    }

    async fn type_detail(&self, guid: &str) -> Result<Option<TypeDetail>> {
        self.get_json(&format!("{}/{}", constants::MODEL_SERVICE_PATH, guid))
            .await
    }
}

#[async_trait]
impl Deployer for HttpClient {
    async fn deploy(&self, service_path: &str, file: &Path) -> Result<DeployReport> {
        let url = self.endpoint(service_path)?;
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "package".to_string());

        let bytes = tokio::fs::read(file).await?;
        debug!(url = %url, file = %file.display(), size = bytes.len(), "uploading package");

        let form = Form::new().part(name.clone(), Part::bytes(bytes).file_name(name));
        let response = self
            .authorize(self.http.post(url))
            .multipart(form)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        let status = response.status();
        Ok(DeployReport {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown").to_string(),
        })
    }
}

/// Parse an absolute CMS base URL, normalised to end with `/`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidUrl` for relative or malformed values.
pub fn parse_base_url(value: &str) -> Result<Url> {
    let normalised = crate::core::config::ensure_trailing_slash(value);
    Url::parse(&normalised).map_err(|e| {
        ConfigError::InvalidUrl {
            value: value.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
