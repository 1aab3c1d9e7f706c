//! Authentication and authorization handling for account synchronization
//!
//! This crate owns everything that concerns the OAuth credential of a GitHub
//! account: the payload produced by a completed OAuth login, the set of scopes
//! the application needs, and the service that checks a stored credential
//! against GitHub.
//!
//! ## Architecture
//!
//! This crate defines interface traits that infrastructure implements:
//! - Business logic depends on [`AccessVerificationService`]
//! - [`GitHubAuthService`] implements it on top of [`github_client::AccountApiClient`]
//! - The application wires everything together

use async_trait::async_trait;
use github_client::Credentials;

mod github_auth_service;
mod payload;

pub use github_auth_service::GitHubAuthService;
pub use payload::GitHubAuthPayload;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// OAuth scopes the application needs: reading the user's email, managing
/// repository hooks and reading organization membership.
pub const REQUIRED_SCOPES: [&str; 3] = ["user:email", "write:repo_hook", "read:org"];

/// Result type for authentication operations
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during authentication/authorization operations
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// GitHub rejected the credential outright.
    #[error("Invalid credentials provided")]
    InvalidCredentials,

    /// Any other GitHub failure while checking the credential.
    #[error("GitHub API error: {0}")]
    GitHubError(#[source] github_client::Error),
}

/// Outcome of checking a credential that GitHub accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessCheck {
    /// Every required scope is granted.
    Granted,

    /// The credential is valid but lacks some of the required scopes.
    InsufficientScope {
        /// The required scopes that were not granted
        missing: Vec<String>,
    },
}

/// Credential verification service interface
#[async_trait]
pub trait AccessVerificationService: Send + Sync {
    /// Check a credential against the required OAuth scopes
    ///
    /// # Returns
    /// `AccessCheck::Granted` when every scope in [`REQUIRED_SCOPES`] is present
    ///
    /// # Errors
    /// - `AuthError::InvalidCredentials` if GitHub rejects the credential
    /// - `AuthError::GitHubError` if the scope lookup fails for any other reason
    async fn check_access(&self, credentials: &Credentials) -> AuthResult<AccessCheck>;
}

/// Returns the required scopes that are absent from `granted`, in the order of
/// [`REQUIRED_SCOPES`].
///
/// # Example
///
/// ```rust
/// use auth_handler::missing_scopes;
///
/// let granted = vec!["user:email".to_string(), "read:org".to_string()];
/// assert_eq!(missing_scopes(&granted), vec!["write:repo_hook"]);
/// ```
pub fn missing_scopes(granted: &[String]) -> Vec<&'static str> {
    REQUIRED_SCOPES
        .iter()
        .copied()
        .filter(|required| !granted.iter().any(|scope| scope == required))
        .collect()
}
