//! OAuth login payload.

use github_client::{Credentials, UserProfile};
use secrecy::{ExposeSecret, SecretString};

/// The result of a completed GitHub OAuth login.
///
/// Carries the identity GitHub reported for the user and the freshly issued
/// token pair. The tokens stay wrapped in [`SecretString`] until they are turned
/// into persisted [`Credentials`].
///
/// # Examples
///
/// ```rust
/// use auth_handler::GitHubAuthPayload;
/// use github_client::UserProfile;
///
/// let profile = UserProfile {
///     id: 583231,
///     login: "octocat".to_string(),
///     account_type: "User".to_string(),
///     ..Default::default()
/// };
///
/// let payload = GitHubAuthPayload::from_profile(&profile, "gho_token".into(), None);
/// assert_eq!(payload.username, "octocat");
/// assert_eq!(payload.credentials().token.expose(), "gho_token");
/// ```
#[derive(Debug)]
pub struct GitHubAuthPayload {
    /// Login of the user
    pub username: String,
    /// Numeric GitHub id of the user
    pub id: u64,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub html_url: Option<String>,
    pub avatar_url: Option<String>,
    /// OAuth access token
    pub token: SecretString,
    /// OAuth refresh token, when issued
    pub refresh_token: Option<SecretString>,
}

impl GitHubAuthPayload {
    /// Builds a payload from the profile returned for a newly issued token.
    pub fn from_profile(
        profile: &UserProfile,
        token: SecretString,
        refresh_token: Option<SecretString>,
    ) -> Self {
        Self {
            username: profile.login.clone(),
            id: profile.id,
            display_name: profile.name.clone(),
            email: profile.email.clone(),
            html_url: profile.html_url.clone(),
            avatar_url: profile.avatar_url.clone(),
            token,
            refresh_token,
        }
    }

    /// Returns the token pair in its persisted form.
    pub fn credentials(&self) -> Credentials {
        Credentials::from_raw(
            self.token.expose_secret(),
            self.refresh_token
                .as_ref()
                .map(|t| t.expose_secret().to_string()),
        )
    }
}
