//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when reading account data
//! from the GitHub API through the github_client crate. Callers rely on
//! [`Error::Unauthorized`] being distinct from every other failure so that a
//! rejected credential can be told apart from a broken request.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::{AccountApiClient, Error};
///
/// match client.fetch_granted_scopes(&credentials).await {
///     Ok(scopes) => println!("Granted: {}", scopes.join(", ")),
///     Err(Error::Unauthorized) => eprintln!("Token was rejected, ask the user to log in again"),
///     Err(Error::RateLimitExceeded) => eprintln!("Rate limit exceeded, retry later"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic API request failure.
    ///
    /// This error occurs when a GitHub API request fails before a response is
    /// received, e.g. because of connectivity problems.
    #[error("API request failed")]
    ApiError(),

    /// GitHub client initialization failure.
    ///
    /// The contained string provides specific details about the failure, such as
    /// an unparseable API base URL.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GitHub API returned a response in an unexpected format or an
    /// unexpected status code.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code,
    /// indicating that the requested user or organization does not exist or is
    /// not visible with the current credential.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The credential was rejected by GitHub (HTTP 401).
    ///
    /// The token has been revoked, has expired or was never valid. The user
    /// needs to authorize the application again.
    #[error("The credential was rejected by GitHub")]
    Unauthorized,
}
