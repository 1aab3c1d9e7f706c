//! The persisted account record.
//!
//! An [`Account`] is keyed by its GitHub login and carries a snapshot of the
//! GitHub profile, the repositories the account can access, the organizations
//! a user belongs to and the OAuth credential used to act on its behalf.
//!
//! The serialized field names are the document store's wire format and must
//! not change.

use auth_handler::GitHubAuthPayload;
use github_client::{
    AccessToken, Credentials, OrganizationProfile, OrganizationSummary, UserProfile,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{SyncError, SyncResult, Timestamp};

#[cfg(test)]
#[path = "account_tests.rs"]
mod tests;

/// Whether an account is a person or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountKind {
    #[default]
    User,
    Organization,
}

impl AccountKind {
    /// Maps the `type` reported by GitHub. Anything other than
    /// `Organization`, bots included, is treated as a user.
    pub fn from_github_type(account_type: &str) -> Self {
        match account_type {
            "Organization" => AccountKind::Organization,
            _ => AccountKind::User,
        }
    }
}

/// Re-authentication state of an account's credential.
///
/// Persisted as `false`, `true` or the string `"more-rights"`. A missing or
/// `null` value reads as [`ReauthState::NotNeeded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReauthState {
    /// The credential works and carries every required scope.
    #[default]
    NotNeeded,
    /// GitHub rejected the credential.
    Required,
    /// The credential works but lacks required scopes.
    MoreRights,
}

const MORE_RIGHTS: &str = "more-rights";

impl std::fmt::Display for ReauthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReauthState::NotNeeded => write!(f, "false"),
            ReauthState::Required => write!(f, "true"),
            ReauthState::MoreRights => write!(f, "{}", MORE_RIGHTS),
        }
    }
}

impl Serialize for ReauthState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReauthState::NotNeeded => serializer.serialize_bool(false),
            ReauthState::Required => serializer.serialize_bool(true),
            ReauthState::MoreRights => serializer.serialize_str(MORE_RIGHTS),
        }
    }
}

impl<'de> Deserialize<'de> for ReauthState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Stored {
            Flag(Option<bool>),
            Text(String),
        }

        match Stored::deserialize(deserializer)? {
            Stored::Flag(Some(true)) => Ok(ReauthState::Required),
            Stored::Flag(_) => Ok(ReauthState::NotNeeded),
            Stored::Text(text) if text == MORE_RIGHTS => Ok(ReauthState::MoreRights),
            Stored::Text(text) => Err(serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(&text),
                &"a boolean or \"more-rights\"",
            )),
        }
    }
}

/// An organization a user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgMembership {
    /// Organization login
    pub name: String,
    /// Organization avatar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&OrganizationSummary> for OrgMembership {
    fn from(org: &OrganizationSummary) -> Self {
        Self {
            name: org.login.clone(),
            image: org.avatar_url.clone(),
        }
    }
}

/// A user or organization account.
///
/// # Examples
///
/// ```rust
/// use account_sync_core::{Account, AccountKind, ReauthState};
///
/// let mut account = Account::new("octo-org", 9919, AccountKind::Organization);
/// account.set_accessible_repositories(vec!["octo-org/hello".to_string()]);
///
/// assert!(account.is_organization());
/// assert_eq!(account.accessible_repositories(), ["octo-org/hello"]);
/// assert_eq!(account.needs_reauth, ReauthState::NotNeeded);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// GitHub login, the primary key
    #[serde(rename = "_id")]
    pub login: String,

    /// Numeric GitHub id, stable across renames
    #[serde(rename = "id")]
    pub external_id: u64,

    #[serde(rename = "type", default)]
    pub kind: AccountKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Profile page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Avatar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,

    /// Organizations a user belongs to. Always empty for organizations.
    #[serde(default)]
    pub orgs: Vec<OrgMembership>,

    #[serde(rename = "_accessibleRepos", default)]
    accessible_repos: Vec<String>,

    #[serde(rename = "accessibleRepos", default)]
    published_repos: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<AccessToken>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<AccessToken>,

    /// Legacy records may lack this; it is backfilled during a full sync.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default)]
    pub needs_reauth: ReauthState,
}

impl Account {
    /// Creates an empty account record.
    pub fn new(login: impl Into<String>, external_id: u64, kind: AccountKind) -> Self {
        Self {
            login: login.into(),
            external_id,
            kind,
            name: None,
            email: None,
            url: None,
            image: None,
            company: None,
            location: None,
            bio: None,
            blog: None,
            orgs: Vec::new(),
            accessible_repos: Vec::new(),
            published_repos: Vec::new(),
            token: None,
            refresh_token: None,
            created_at: None,
            needs_reauth: ReauthState::NotNeeded,
        }
    }

    /// Creates a user account from a completed OAuth login.
    pub fn from_auth_payload(payload: &GitHubAuthPayload, created_at: Timestamp) -> Self {
        let mut account = Self::new(payload.username.clone(), payload.id, AccountKind::User);
        account.name = payload.display_name.clone();
        account.email = payload.email.clone();
        account.url = payload.html_url.clone();
        account.image = payload.avatar_url.clone();
        account.set_credentials(payload.credentials());
        account.created_at = Some(created_at);
        account
    }

    pub fn is_organization(&self) -> bool {
        self.kind == AccountKind::Organization
    }

    /// Overwrites the profile fields from an organization profile.
    ///
    /// The GitHub description is stored as the bio. Login and external id are
    /// taken from the profile as well, so a renamed organization carries its
    /// new login.
    pub fn apply_organization_profile(&mut self, org: &OrganizationProfile) {
        self.login = org.login.clone();
        self.external_id = org.id;
        self.kind = AccountKind::Organization;
        self.url = org.html_url.clone();
        self.name = org.name.clone();
        self.bio = org.description.clone();
        self.email = org.email.clone();
        self.image = org.avatar_url.clone();
        self.location = org.location.clone();
        self.blog = org.blog.clone();
    }

    /// Overwrites the profile fields a user can edit on GitHub.
    pub fn apply_user_profile(&mut self, profile: &UserProfile) {
        self.email = profile.email.clone();
        self.name = profile.name.clone();
        self.company = profile.company.clone();
        self.blog = profile.blog.clone();
        self.location = profile.location.clone();
        self.bio = profile.bio.clone();
        self.kind = AccountKind::from_github_type(&profile.account_type);
    }

    /// Replaces the organization membership list.
    pub fn set_memberships(&mut self, orgs: &[OrganizationSummary]) {
        self.orgs = orgs.iter().map(OrgMembership::from).collect();
    }

    /// Repositories this account can access, as `owner/name`.
    pub fn accessible_repositories(&self) -> &[String] {
        &self.accessible_repos
    }

    /// The publicly exposed copy of [`Account::accessible_repositories`].
    pub fn published_repositories(&self) -> &[String] {
        &self.published_repos
    }

    /// Replaces both accessible repository lists.
    pub fn set_accessible_repositories(&mut self, repos: Vec<String>) {
        self.published_repos = repos.clone();
        self.accessible_repos = repos;
    }

    /// Rewrites every `old_owner/name` entry to `new_owner/name` in both
    /// repository lists. Returns true if anything changed.
    pub fn rename_repository_owner(&mut self, old_owner: &str, new_owner: &str) -> bool {
        let prefix = format!("{}/", old_owner);
        let renamed = |repo: &String| match repo.strip_prefix(&prefix) {
            Some(name) => format!("{}/{}", new_owner, name),
            None => repo.clone(),
        };

        let accessible: Vec<String> = self.accessible_repos.iter().map(renamed).collect();
        let published: Vec<String> = self.published_repos.iter().map(renamed).collect();
        let changed = accessible != self.accessible_repos || published != self.published_repos;

        self.accessible_repos = accessible;
        self.published_repos = published;
        changed
    }

    /// Stores a new credential pair. The refresh token is cleared when none
    /// is given.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.token = Some(credentials.token);
        self.refresh_token = credentials.refresh_token;
    }

    /// The stored credential, if any.
    pub fn credentials(&self) -> Option<Credentials> {
        self.token
            .clone()
            .map(|token| Credentials::new(token, self.refresh_token.clone()))
    }

    /// The stored credential, or [`SyncError::MissingCredentials`].
    pub fn require_credentials(&self) -> SyncResult<Credentials> {
        self.credentials()
            .ok_or_else(|| SyncError::MissingCredentials {
                login: self.login.clone(),
            })
    }
}
