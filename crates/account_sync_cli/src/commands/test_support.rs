//! Shared fixtures for command tests.

use account_sync_core::{Account, AccountKind, InMemoryAccountStore};
use async_trait::async_trait;
use github_client::{
    AccountApiClient, Credentials, OrganizationProfile, OrganizationSummary, UserProfile,
};
use std::sync::Arc;

use super::CommandContext;

/// GitHub API stand-in that knows a single user and every scope.
pub struct FakeGitHub {
    pub profile: UserProfile,
    pub repos: Vec<String>,
}

impl FakeGitHub {
    pub fn for_user(login: &str, external_id: u64) -> Self {
        Self {
            profile: UserProfile {
                id: external_id,
                login: login.to_string(),
                name: Some(format!("{} display", login)),
                account_type: "User".to_string(),
                ..Default::default()
            },
            repos: vec![format!("{}/hello", login)],
        }
    }
}

#[async_trait]
impl AccountApiClient for FakeGitHub {
    async fn fetch_user_profile(
        &self,
        credentials: &Credentials,
    ) -> Result<(UserProfile, Vec<OrganizationSummary>), github_client::Error> {
        if credentials.token.expose() == "gho_revoked" {
            return Err(github_client::Error::Unauthorized);
        }
        Ok((self.profile.clone(), Vec::new()))
    }

    async fn fetch_organization_profile(
        &self,
        _login: &str,
        _credentials: &Credentials,
    ) -> Result<OrganizationProfile, github_client::Error> {
        Err(github_client::Error::NotFound)
    }

    async fn fetch_granted_scopes(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<String>, github_client::Error> {
        if credentials.token.expose() == "gho_revoked" {
            return Err(github_client::Error::Unauthorized);
        }
        Ok(auth_handler::REQUIRED_SCOPES
            .iter()
            .map(|s| s.to_string())
            .collect())
    }

    async fn list_repositories(
        &self,
        _credentials: &Credentials,
    ) -> Result<Vec<String>, github_client::Error> {
        Ok(self.repos.clone())
    }
}

/// Builds a context over an in-memory store holding `accounts`.
pub fn context(api: FakeGitHub, accounts: Vec<Account>) -> CommandContext {
    CommandContext::new(
        Arc::new(api),
        Arc::new(InMemoryAccountStore::with_accounts(accounts)),
    )
}

pub fn stored_user(login: &str, external_id: u64, token: &str) -> Account {
    let mut account = Account::new(login, external_id, AccountKind::User);
    account.set_credentials(Credentials::from_raw(token, None));
    account
}
