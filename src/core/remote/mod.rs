//! Remote CMS capabilities.
//!
//! The authenticator, synchroniser and deploy step depend on these traits
//! rather than on a concrete client, so each can be driven by a fake in
//! tests. [`HttpClient`] is the implementation that talks to a real CMS.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

mod http;
mod model;

pub use http::{parse_base_url, HttpClient};
pub use model::{is_network_error, PropertyInfo, TypeDetail, TypeSummary};

/// Authentication against the CMS token service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Whether a valid (or refreshable) credential is available.
    async fn is_authenticated(&self) -> Result<bool>;

    /// The user the current credential belongs to, if known.
    async fn current_user(&self) -> Result<Option<String>>;

    /// Exchange a username and password for a credential.
    ///
    /// # Returns
    ///
    /// `false` when the server rejects the credentials.
    async fn login(&self, username: &str, password: &str) -> Result<bool>;

    /// Forget the current credential.
    async fn logout(&self) -> Result<bool>;
}

/// Content type catalog (the model introspection service).
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// All content types. `None` when the service returned no usable data.
    async fn list_types(&self) -> Result<Option<Vec<TypeSummary>>>;

    /// Property details for one content type, by its GUID.
    async fn type_detail(&self, guid: &str) -> Result<Option<TypeDetail>>;
}

/// Outcome of an artifact upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub status: u16,
    pub reason: String,
}

impl DeployReport {
    /// Only a 200 counts as a deployed package.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Upload of a build artifact to the CMS.
#[async_trait]
pub trait Deployer: Send + Sync {
    /// Upload `file` as multipart form data to `service_path`.
    async fn deploy(&self, service_path: &str, file: &Path) -> Result<DeployReport>;
}
