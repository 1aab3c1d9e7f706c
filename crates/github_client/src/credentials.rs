//! OAuth credential types.
//!
//! Every call made through [`crate::AccountApiClient`] is authenticated with the
//! OAuth token stored on the account it is made for, so the token travels with
//! the request instead of living inside the client.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;

/// GitHub OAuth access token (secure, not logged)
///
/// Serializes as a plain string so it can be persisted on the account record,
/// but never exposes its value through `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the token as a string slice
    ///
    /// # Security
    /// Use with caution - prefer passing the AccessToken itself
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Get the token length (for logging without exposing value)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if token is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Security: Don't log the actual token value
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken([REDACTED {} chars])", self.0.len())
    }
}

impl std::fmt::Display for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// The credential pair issued by the OAuth flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Token used to authenticate API calls
    pub token: AccessToken,
    /// Refresh token, when the OAuth app issues one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<AccessToken>,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(token: AccessToken, refresh_token: Option<AccessToken>) -> Self {
        Self {
            token,
            refresh_token,
        }
    }

    /// Creates a credential pair from raw token strings.
    pub fn from_raw(token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self::new(AccessToken::new(token), refresh_token.map(AccessToken::new))
    }
}
