//! Error types for account synchronization.

use auth_handler::AuthError;
use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Result type for synchronization operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors raised by [`crate::AccountSyncService`] operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// GitHub rejected the stored credential.
    ///
    /// [`crate::AccountSyncService::full_sync`] absorbs this by flagging the
    /// account for re-authentication.
    #[error("GitHub rejected the stored credential")]
    Unauthorized,

    #[error("Account '{login}' has no stored credential")]
    MissingCredentials { login: String },

    #[error("Account '{login}' already exists")]
    AccountExists { login: String },

    #[error("GitHub request failed: {0}")]
    Upstream(#[from] github_client::Error),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] StoreError),
}

impl From<AuthError> for SyncError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => SyncError::Unauthorized,
            AuthError::GitHubError(source) => SyncError::Upstream(source),
        }
    }
}

/// Errors raised by [`crate::AccountStore`] implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Account '{login}' not found")]
    NotFound { login: String },

    /// The login cannot be used as a storage key.
    #[error("Invalid account key '{login}'")]
    InvalidKey { login: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize account '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
