use super::*;
use github_client::{OrganizationProfile, OrganizationSummary, UserProfile};

/// Mock API client that only answers scope lookups.
struct MockScopeClient {
    /// Scopes to return, or `None` to fail
    scopes: Option<Vec<String>>,
    /// Whether a failure is reported as a rejected credential
    unauthorized: bool,
}

impl MockScopeClient {
    fn granting(scopes: &[&str]) -> Self {
        Self {
            scopes: Some(scopes.iter().map(|s| s.to_string()).collect()),
            unauthorized: false,
        }
    }

    fn rejecting() -> Self {
        Self {
            scopes: None,
            unauthorized: true,
        }
    }

    fn failing() -> Self {
        Self {
            scopes: None,
            unauthorized: false,
        }
    }
}

#[async_trait]
impl AccountApiClient for MockScopeClient {
    async fn fetch_user_profile(
        &self,
        _credentials: &Credentials,
    ) -> Result<(UserProfile, Vec<OrganizationSummary>), github_client::Error> {
        unimplemented!()
    }

    async fn fetch_organization_profile(
        &self,
        _login: &str,
        _credentials: &Credentials,
    ) -> Result<OrganizationProfile, github_client::Error> {
        unimplemented!()
    }

    async fn fetch_granted_scopes(
        &self,
        _credentials: &Credentials,
    ) -> Result<Vec<String>, github_client::Error> {
        match (&self.scopes, self.unauthorized) {
            (Some(scopes), _) => Ok(scopes.clone()),
            (None, true) => Err(github_client::Error::Unauthorized),
            (None, false) => Err(github_client::Error::InvalidResponse),
        }
    }

    async fn list_repositories(
        &self,
        _credentials: &Credentials,
    ) -> Result<Vec<String>, github_client::Error> {
        unimplemented!()
    }
}

fn credentials() -> Credentials {
    Credentials::from_raw("gho_test", None)
}

#[tokio::test]
async fn test_check_access_granted() {
    let service = GitHubAuthService::new(Arc::new(MockScopeClient::granting(&[
        "user:email",
        "write:repo_hook",
        "read:org",
    ])));

    let check = service.check_access(&credentials()).await.unwrap();

    assert_eq!(check, AccessCheck::Granted);
}

#[tokio::test]
async fn test_check_access_reports_missing_scope() {
    let service = GitHubAuthService::new(Arc::new(MockScopeClient::granting(&[
        "user:email",
        "read:org",
    ])));

    let check = service.check_access(&credentials()).await.unwrap();

    assert_eq!(
        check,
        AccessCheck::InsufficientScope {
            missing: vec!["write:repo_hook".to_string()]
        }
    );
}

#[tokio::test]
async fn test_check_access_rejected_credential() {
    let service = GitHubAuthService::new(Arc::new(MockScopeClient::rejecting()));

    let result = service.check_access(&credentials()).await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_check_access_other_failure_keeps_github_error() {
    let service = GitHubAuthService::new(Arc::new(MockScopeClient::failing()));

    let result = service.check_access(&credentials()).await;

    assert!(matches!(
        result,
        Err(AuthError::GitHubError(github_client::Error::InvalidResponse))
    ));
}
