//! Repository access collaborator.
//!
//! The sync workflow treats repository access as an external concern: it asks
//! a [`RepositoryAccessSync`] which repositories an account can reach, and tells
//! it when an organization changes its login so references can follow.

use async_trait::async_trait;
use github_client::{AccountApiClient, Credentials};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::{AccountStore, SyncResult};

#[cfg(test)]
#[path = "access_tests.rs"]
mod tests;

/// Repository access interface used by [`crate::AccountSyncService`].
#[async_trait]
pub trait RepositoryAccessSync: Send + Sync {
    /// Moves every repository reference owned by `old_login` to `new_login`.
    ///
    /// Runs before the old account record is removed during a rename.
    async fn reassign_ownership(&self, old_login: &str, new_login: &str) -> SyncResult<()>;

    /// Lists the repositories `login` can access, as `owner/name`.
    async fn list_accessible_repositories(
        &self,
        login: &str,
        credentials: &Credentials,
    ) -> SyncResult<Vec<String>>;
}

/// [`RepositoryAccessSync`] backed by the GitHub API and the account store.
///
/// Listing asks GitHub with the account's own credential. Ownership changes
/// rewrite the repository lists of every stored account. Ownership changes
/// run one at a time, since two renames can touch the same account.
pub struct GitHubRepositoryAccess {
    api: Arc<dyn AccountApiClient>,
    store: Arc<dyn AccountStore>,
    reassign_lock: Mutex<()>,
}

impl GitHubRepositoryAccess {
    pub fn new(api: Arc<dyn AccountApiClient>, store: Arc<dyn AccountStore>) -> Self {
        Self {
            api,
            store,
            reassign_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl RepositoryAccessSync for GitHubRepositoryAccess {
    #[instrument(skip(self))]
    async fn reassign_ownership(&self, old_login: &str, new_login: &str) -> SyncResult<()> {
        let _guard = self.reassign_lock.lock().await;

        let mut updated = 0usize;
        for mut account in self.store.list().await? {
            if account.rename_repository_owner(old_login, new_login) {
                self.store.save(&account).await?;
                updated += 1;
            }
        }

        info!(
            old_login = old_login,
            new_login = new_login,
            updated_accounts = updated,
            "Reassigned repository ownership"
        );
        Ok(())
    }

    #[instrument(skip(self, credentials))]
    async fn list_accessible_repositories(
        &self,
        login: &str,
        credentials: &Credentials,
    ) -> SyncResult<Vec<String>> {
        let repos = self.api.list_repositories(credentials).await?;
        debug!(login = login, count = repos.len(), "Listed accessible repositories");
        Ok(repos)
    }
}
