use account_sync_core::SyncError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the account-sync CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error occurred while loading or saving configuration.
    ///
    /// This error is returned when there are issues with the configuration file,
    /// such as invalid TOML or file access problems.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A synchronization operation failed.
    #[error("Synchronization failed: {0}")]
    Sync(#[from] SyncError),

    /// A direct GitHub request made by the CLI failed.
    #[error("GitHub request failed: {0}")]
    GitHub(#[from] github_client::Error),

    /// Invalid command-line arguments were provided.
    ///
    /// This error is returned when the user provides invalid or incompatible
    /// command-line arguments that cannot be processed.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No stored account has the requested login.
    #[error("Account '{0}' not found")]
    AccountNotFound(String),

    #[error("Failed to render account: {0}")]
    Render(#[from] serde_json::Error),
}
