//! Package deployment.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::remote::{AuthService, DeployReport, Deployer};
use crate::error::{Error, RemoteError, Result};

/// Upload a build artifact to the CMS.
///
/// The session must already be authenticated; the upload itself is not
/// retried. A non-200 response is returned as a report, not as an error.
///
/// # Errors
///
/// Returns `RemoteError::NotAuthenticated` without a valid session,
/// `Error::PackageNotFound` if `file` is not a file, or a transport error.
pub async fn deploy<S>(service: &S, file: &Path, service_path: &str) -> Result<DeployReport>
where
    S: AuthService + Deployer + ?Sized,
{
    if !service.is_authenticated().await? {
        return Err(RemoteError::NotAuthenticated.into());
    }
    if !file.is_file() {
        return Err(Error::PackageNotFound(file.to_path_buf()));
    }

    debug!(file = %file.display(), path = service_path, "deploying package");
    let report = service.deploy(service_path, file).await?;
    if report.is_success() {
        info!(file = %file.display(), "package deployed");
    } else {
        warn!(status = report.status, reason = %report.reason, "deployment rejected");
    }
    Ok(report)
}
