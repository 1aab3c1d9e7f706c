//! Crate for reading account data from the GitHub REST API.
//!
//! This crate provides a client for making requests to GitHub on behalf of a
//! user, authenticating every call with that user's OAuth token. It exposes the
//! [`AccountApiClient`] trait, which is the seam the account synchronization
//! workflow depends on, and [`GitHubClient`], the octocrab-backed implementation.

use async_trait::async_trait;
use http::StatusCode;
use octocrab::Octocrab;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, info, instrument, warn};

pub mod errors;
pub use errors::Error;

pub mod credentials;
pub use credentials::{AccessToken, Credentials};

pub mod models;
pub use models::{OrganizationProfile, OrganizationSummary, Repository, UserProfile};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// The public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Response header in which GitHub lists the scopes granted to an OAuth token.
const OAUTH_SCOPES_HEADER: &str = "x-oauth-scopes";

/// Maximum page size accepted by the GitHub list endpoints.
const PAGE_SIZE: u8 = 100;

/// Read access to the GitHub account data the synchronization workflow needs.
///
/// Every method takes the credential of the account the call is made for.
#[async_trait]
pub trait AccountApiClient: Send + Sync {
    /// Fetches the authenticated user's profile together with the organizations
    /// the user is a member of.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unauthorized` if the token is rejected, or another
    /// `Error` variant if either request fails.
    async fn fetch_user_profile(
        &self,
        credentials: &Credentials,
    ) -> Result<(UserProfile, Vec<OrganizationSummary>), Error>;

    /// Fetches the canonical profile of an organization.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the organization does not exist or is not
    /// visible with the given credential.
    async fn fetch_organization_profile(
        &self,
        login: &str,
        credentials: &Credentials,
    ) -> Result<OrganizationProfile, Error>;

    /// Fetches the OAuth scopes granted to the credential.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unauthorized` if GitHub rejects the credential. This is
    /// the only way a caller can tell a revoked token apart from a token that
    /// merely lacks scopes.
    async fn fetch_granted_scopes(&self, credentials: &Credentials) -> Result<Vec<String>, Error>;

    /// Lists the full names (`owner/repo`) of every repository the credential
    /// can access.
    async fn list_repositories(&self, credentials: &Credentials) -> Result<Vec<String>, Error>;
}

/// A client for the GitHub API that authenticates each call with the OAuth
/// token of the account the call is made for.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    api_base_url: String,
}

impl GitHubClient {
    /// Creates a client that talks to the GitHub API at `api_base_url`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use github_client::{GitHubClient, DEFAULT_API_URL};
    ///
    /// let client = GitHubClient::new(DEFAULT_API_URL);
    /// assert_eq!(client.api_base_url(), "https://api.github.com");
    /// ```
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }

    /// Returns the API endpoint this client talks to.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn client_for(&self, credentials: &Credentials) -> Result<Octocrab, Error> {
        create_token_client(&self.api_base_url, &credentials.token)
    }
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[async_trait]
impl AccountApiClient for GitHubClient {
    #[instrument(skip(self, credentials))]
    async fn fetch_user_profile(
        &self,
        credentials: &Credentials,
    ) -> Result<(UserProfile, Vec<OrganizationSummary>), Error> {
        let client = self.client_for(credentials)?;

        let profile: UserProfile = client
            .get("/user", None::<&()>)
            .await
            .map_err(|e| map_octocrab_error("Failed to get the authenticated user", e))?;

        let organizations: Vec<OrganizationSummary> =
            get_all_pages(&client, "/user/orgs", "Failed to list user organizations").await?;

        info!(
            login = profile.login,
            organization_count = organizations.len(),
            "Retrieved user profile"
        );

        Ok((profile, organizations))
    }

    #[instrument(skip(self, credentials), fields(login = %login))]
    async fn fetch_organization_profile(
        &self,
        login: &str,
        credentials: &Credentials,
    ) -> Result<OrganizationProfile, Error> {
        let client = self.client_for(credentials)?;
        let path = format!("/orgs/{}", login);

        debug!("Making API call to: {}", path);
        let result = client.get(path, None::<&()>).await;
        match result {
            Ok(org) => Ok(org),
            Err(e) => Err(map_octocrab_error("Failed to get organization", e)),
        }
    }

    #[instrument(skip(self, credentials))]
    async fn fetch_granted_scopes(&self, credentials: &Credentials) -> Result<Vec<String>, Error> {
        let client = self.client_for(credentials)?;

        // The scopes are only reported in a response header, so the raw
        // response is needed rather than a deserialized body.
        let response = client
            ._get("/user")
            .await
            .map_err(|e| map_octocrab_error("Failed to request granted scopes", e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("GitHub rejected the credential while reading granted scopes");
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            error!(
                status = status.as_u16(),
                "Unexpected status while reading granted scopes"
            );
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound);
            }
            return Err(Error::InvalidResponse);
        }

        let scopes = match response.headers().get(OAUTH_SCOPES_HEADER) {
            Some(value) => {
                let value = value.to_str().map_err(|_| {
                    error!("The granted scopes header is not valid text");
                    Error::InvalidResponse
                })?;
                parse_scopes(value)
            }
            None => Vec::new(),
        };

        debug!(scope_count = scopes.len(), "Retrieved granted scopes");
        Ok(scopes)
    }

    #[instrument(skip(self, credentials))]
    async fn list_repositories(&self, credentials: &Credentials) -> Result<Vec<String>, Error> {
        let client = self.client_for(credentials)?;

        let repositories: Vec<Repository> =
            get_all_pages(&client, "/user/repos", "Failed to list repositories").await?;

        info!(
            count = repositories.len(),
            "Retrieved accessible repositories"
        );

        Ok(repositories
            .into_iter()
            .map(|r| r.full_name().to_string())
            .collect())
    }
}

#[derive(Debug, Serialize)]
struct PageParameters {
    per_page: u8,
    page: u32,
}

/// Reads every page of a GitHub list endpoint.
async fn get_all_pages<T>(client: &Octocrab, route: &str, message: &str) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned + Send,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let parameters = PageParameters {
            per_page: PAGE_SIZE,
            page,
        };

        let batch: Vec<T> = client
            .get(route, Some(&parameters))
            .await
            .map_err(|e| map_octocrab_error(message, e))?;

        let received = batch.len();
        items.extend(batch);

        if received < usize::from(PAGE_SIZE) {
            break;
        }
        page += 1;
    }

    Ok(items)
}

/// Splits the value of the `X-OAuth-Scopes` header into scope names.
///
/// # Example
///
/// ```rust
/// use github_client::parse_scopes;
///
/// assert_eq!(
///     parse_scopes("read:org, user:email,write:repo_hook"),
///     vec!["read:org", "user:email", "write:repo_hook"]
/// );
/// assert!(parse_scopes("").is_empty());
/// ```
pub fn parse_scopes(header: &str) -> Vec<String> {
    header
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Creates an `Octocrab` client authenticated with an OAuth token.
///
/// # Errors
///
/// Returns `Error::AuthError` if the API URL cannot be parsed, or
/// `Error::ApiError` if the client cannot be built.
#[instrument(skip(token))]
pub fn create_token_client(api_base_url: &str, token: &AccessToken) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .base_uri(api_base_url)
        .map_err(|e| {
            error!(
                api_base_url = api_base_url,
                error = %e,
                "Failed to parse the GitHub API URL"
            );
            Error::AuthError(format!("Invalid GitHub API URL '{}': {}", api_base_url, e))
        })?
        .personal_token(token.expose().to_string())
        .build()
        .map_err(|_| Error::ApiError())
}

/// Translates an octocrab failure into a client error, logging the details.
fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    let mapped = match &e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code;
            if status == StatusCode::UNAUTHORIZED {
                Error::Unauthorized
            } else if status == StatusCode::NOT_FOUND {
                Error::NotFound
            } else if (status == StatusCode::FORBIDDEN
                || status == StatusCode::TOO_MANY_REQUESTS)
                && source.message.to_ascii_lowercase().contains("rate limit")
            {
                Error::RateLimitExceeded
            } else {
                Error::InvalidResponse
            }
        }
        octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => Error::InvalidResponse,
        _ => Error::ApiError(),
    };

    log_octocrab_error(message, e);
    mapped
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => error!(
            status = source.status_code.as_u16(),
            error_message = source.message,
            backtrace = backtrace.to_string(),
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Serde { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. The response body could not be deserialized.",
            message
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
