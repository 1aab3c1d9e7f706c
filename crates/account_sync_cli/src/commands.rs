//! Command modules for the account-sync CLI.
//!
//! - `account_cmd`: storing and refreshing OAuth credentials, showing records
//! - `config_cmd`: configuration file initialization
//! - `sync_cmd`: running a full synchronization of one account

use account_sync_core::{
    AccountStore, AccountSyncService, GitHubRepositoryAccess, JsonFileAccountStore,
};
use github_client::{AccountApiClient, GitHubClient};
use std::sync::Arc;

use crate::config::AppConfig;

pub mod account_cmd;
pub mod config_cmd;
pub mod sync_cmd;

#[cfg(test)]
mod test_support;

/// Collaborators shared by the account commands.
pub struct CommandContext {
    pub api: Arc<dyn AccountApiClient>,
    pub service: AccountSyncService,
}

impl CommandContext {
    /// Wires the sync service to the given API client and store.
    pub fn new(api: Arc<dyn AccountApiClient>, store: Arc<dyn AccountStore>) -> Self {
        let access = Arc::new(GitHubRepositoryAccess::new(api.clone(), store.clone()));
        let service = AccountSyncService::new(api.clone(), access, store);
        Self { api, service }
    }

    /// Builds the production wiring: octocrab against the configured API and
    /// JSON records in the configured directory.
    pub fn from_config(config: &AppConfig) -> Self {
        let api = Arc::new(GitHubClient::new(config.github.api_url.clone()));
        let store = Arc::new(JsonFileAccountStore::new(config.storage.directory.clone()));
        Self::new(api, store)
    }
}
