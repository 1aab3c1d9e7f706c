//! GitHub credential verification service implementation
//!
//! Provides concrete implementation of `AccessVerificationService` backed by the
//! GitHub API.

use crate::{missing_scopes, AccessCheck, AccessVerificationService, AuthError, AuthResult};
use async_trait::async_trait;
use github_client::{AccountApiClient, Credentials};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[cfg(test)]
#[path = "github_auth_service_tests.rs"]
mod tests;

/// GitHub credential verification service
///
/// Reads the scopes granted to a credential and compares them with
/// [`crate::REQUIRED_SCOPES`].
///
/// # Examples
///
/// ```rust,no_run
/// use auth_handler::{AccessVerificationService, GitHubAuthService};
/// use github_client::{Credentials, GitHubClient};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth_service = GitHubAuthService::new(Arc::new(GitHubClient::default()));
///
/// let credentials = Credentials::from_raw("gho_token", None);
/// let check = auth_service.check_access(&credentials).await?;
/// println!("Access: {:?}", check);
/// # Ok(())
/// # }
/// ```
pub struct GitHubAuthService {
    api: Arc<dyn AccountApiClient>,
}

impl GitHubAuthService {
    /// Create a new verification service on top of an API client
    pub fn new(api: Arc<dyn AccountApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AccessVerificationService for GitHubAuthService {
    #[instrument(skip(self, credentials))]
    async fn check_access(&self, credentials: &Credentials) -> AuthResult<AccessCheck> {
        let granted = self
            .api
            .fetch_granted_scopes(credentials)
            .await
            .map_err(|e| match e {
                github_client::Error::Unauthorized => AuthError::InvalidCredentials,
                other => AuthError::GitHubError(other),
            })?;

        let missing = missing_scopes(&granted);
        if missing.is_empty() {
            info!("Credential has all required scopes");
            return Ok(AccessCheck::Granted);
        }

        warn!(missing = ?missing, "Credential lacks required scopes");
        Ok(AccessCheck::InsufficientScope {
            missing: missing.into_iter().map(str::to_string).collect(),
        })
    }
}

impl std::fmt::Debug for GitHubAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthService").finish_non_exhaustive()
    }
}
