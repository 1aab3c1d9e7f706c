//! # Models
//!
//! This module contains the GitHub API payloads used by the account
//! synchronization workflow: the authenticated user's profile, the organizations
//! the user belongs to, full organization profiles and repository listings.
//!
//! Only the fields the workflow reads are modelled; everything else GitHub
//! returns is ignored during deserialization.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Profile of the authenticated user, as returned by `GET /user`.
///
/// # Examples
///
/// ```rust
/// use github_client::models::UserProfile;
///
/// let profile: UserProfile = serde_json::from_str(r#"{
///     "id": 583231,
///     "login": "octocat",
///     "type": "User"
/// }"#).unwrap();
///
/// assert_eq!(profile.login, "octocat");
/// assert!(profile.email.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct UserProfile {
    /// The unique numeric ID of the user
    pub id: u64,
    /// The login name of the user
    pub login: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Public email address
    #[serde(default)]
    pub email: Option<String>,
    /// Link to the profile page
    #[serde(default)]
    pub html_url: Option<String>,
    /// Avatar image
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// The type of account (User, Organization or Bot)
    #[serde(rename = "type")]
    pub account_type: String,
}

/// An organization entry from `GET /user/orgs`.
///
/// The listing only carries a handful of fields; use
/// [`crate::AccountApiClient::fetch_organization_profile`] for the full profile.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct OrganizationSummary {
    /// The unique numeric ID of the organization
    pub id: u64,
    /// The login (slug) of the organization
    pub login: String,
    /// Avatar image
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Full organization profile, as returned by `GET /orgs/{org}`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct OrganizationProfile {
    /// The unique numeric ID of the organization
    pub id: u64,
    /// The login (slug) of the organization
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
}

/// A repository entry from `GET /user/repos`.
///
/// # Examples
///
/// ```rust
/// use github_client::models::Repository;
///
/// let repo = Repository::new("my-repo", "owner/my-repo", false);
///
/// assert_eq!(repo.full_name(), "owner/my-repo");
/// assert_eq!(repo.owner(), "owner");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// The full name of the repository (owner/name)
    full_name: String,
    name: String,
    #[serde(default)]
    private: bool,
}

impl Repository {
    pub fn new(name: impl Into<String>, full_name: impl Into<String>, private: bool) -> Self {
        Self {
            full_name: full_name.into(),
            name: name.into(),
            private,
        }
    }

    /// Returns the full name of the repository in `owner/name` form.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Returns the name of the repository (without owner).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owner part of the full name.
    pub fn owner(&self) -> &str {
        self.full_name
            .split_once('/')
            .map(|(owner, _)| owner)
            .unwrap_or(&self.full_name)
    }
}
