//! Account synchronization workflow.
//!
//! This module provides [`AccountSyncService`], which reconciles stored
//! accounts with their GitHub state: credential scopes, accessible
//! repositories, profile fields, organization memberships and organization
//! renames.

use auth_handler::{AccessCheck, AccessVerificationService, GitHubAuthPayload, GitHubAuthService};
use futures::future::try_join_all;
use github_client::{AccountApiClient, Credentials, OrganizationProfile, OrganizationSummary};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{
    Account, AccountKind, AccountStore, ReauthState, RepositoryAccessSync, SyncError, SyncResult,
    Timestamp,
};

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;

/// Keeps stored accounts in step with GitHub.
///
/// Every operation that changes an account persists it through the
/// [`AccountStore`] before returning. Stages run strictly in order; the only
/// concurrency is the per-organization fan-out in
/// [`AccountSyncService::sync_organization_memberships`].
///
/// # Examples
///
/// ```rust,no_run
/// use account_sync_core::{AccountSyncService, GitHubRepositoryAccess, InMemoryAccountStore};
/// use github_client::GitHubClient;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), account_sync_core::SyncError> {
/// let api = Arc::new(GitHubClient::default());
/// let store = Arc::new(InMemoryAccountStore::new());
/// let access = Arc::new(GitHubRepositoryAccess::new(api.clone(), store.clone()));
/// let service = AccountSyncService::new(api, access, store);
///
/// if let Some(account) = service.find_account("octocat").await? {
///     let account = service.full_sync(account).await?;
///     println!("needs reauth: {}", account.needs_reauth);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AccountSyncService {
    api: Arc<dyn AccountApiClient>,
    access: Arc<dyn RepositoryAccessSync>,
    store: Arc<dyn AccountStore>,
    verifier: Arc<dyn AccessVerificationService>,
}

impl AccountSyncService {
    /// Creates a service that verifies credentials through `api`.
    pub fn new(
        api: Arc<dyn AccountApiClient>,
        access: Arc<dyn RepositoryAccessSync>,
        store: Arc<dyn AccountStore>,
    ) -> Self {
        let verifier = Arc::new(GitHubAuthService::new(api.clone()));
        Self::with_verifier(api, access, store, verifier)
    }

    /// Creates a service with a custom credential verifier.
    pub fn with_verifier(
        api: Arc<dyn AccountApiClient>,
        access: Arc<dyn RepositoryAccessSync>,
        store: Arc<dyn AccountStore>,
        verifier: Arc<dyn AccessVerificationService>,
    ) -> Self {
        Self {
            api,
            access,
            store,
            verifier,
        }
    }

    /// Looks up a stored account by login.
    pub async fn find_account(&self, login: &str) -> SyncResult<Option<Account>> {
        Ok(self.store.find_by_login(login).await?)
    }

    /// Looks up a stored account by its numeric GitHub id.
    pub async fn find_account_by_external_id(
        &self,
        external_id: u64,
    ) -> SyncResult<Option<Account>> {
        Ok(self.store.find_by_external_id(external_id).await?)
    }

    /// Reconciles a GitHub organization with its stored record.
    ///
    /// The record is matched on the numeric GitHub id, never on the login:
    /// - No record: a new organization account is created with the current
    ///   time as its creation time.
    /// - Same login: the profile fields are overwritten.
    /// - Different login: the organization was renamed. Repository ownership
    ///   is reassigned first, then the old record is deleted and a new one is
    ///   created under the new login. Only the creation time and the id carry
    ///   over.
    ///
    /// The rename steps are not atomic. A failure part way leaves the earlier
    /// steps applied.
    #[instrument(skip(self, org), fields(login = %org.login, external_id = org.id))]
    pub async fn sync_or_create_account(&self, org: &OrganizationProfile) -> SyncResult<Account> {
        let (account, _previous_login) = self.sync_or_create_organization(org).await?;
        Ok(account)
    }

    /// Same as [`AccountSyncService::sync_or_create_account`], also returning
    /// the previous login when the organization was renamed.
    async fn sync_or_create_organization(
        &self,
        org: &OrganizationProfile,
    ) -> SyncResult<(Account, Option<String>)> {
        let existing = self.store.find_by_external_id(org.id).await?;
        let mut previous_login = None;

        let account = match existing {
            None => {
                info!("Creating organization account");
                let mut account = Account::new(org.login.clone(), org.id, AccountKind::Organization);
                account.created_at = Some(Timestamp::now());
                account.apply_organization_profile(org);
                account
            }
            Some(existing) if existing.login != org.login => {
                info!(previous_login = %existing.login, "Organization was renamed");
                self.access
                    .reassign_ownership(&existing.login, &org.login)
                    .await?;
                self.store.delete(&existing.login).await?;

                let mut account = Account::new(org.login.clone(), org.id, AccountKind::Organization);
                account.created_at = existing.created_at;
                account.apply_organization_profile(org);
                previous_login = Some(existing.login);
                account
            }
            Some(mut existing) => {
                debug!("Updating organization profile");
                existing.apply_organization_profile(org);
                existing
            }
        };

        self.store.save(&account).await?;
        Ok((account, previous_login))
    }

    /// Checks the account's credential against the required scopes.
    ///
    /// # Returns
    /// `true` if every required scope is granted, `false` if some are missing
    ///
    /// # Errors
    /// - `SyncError::Unauthorized` if GitHub rejects the credential or the
    ///   account has none
    /// - `SyncError::Upstream` for any other GitHub failure
    #[instrument(skip(self, account), fields(login = %account.login))]
    pub async fn verify_access(&self, account: &Account) -> SyncResult<bool> {
        let credentials = account.credentials().ok_or(SyncError::Unauthorized)?;

        match self.verifier.check_access(&credentials).await? {
            AccessCheck::Granted => Ok(true),
            AccessCheck::InsufficientScope { missing } => {
                warn!(missing = ?missing, "Credential lacks required scopes");
                Ok(false)
            }
        }
    }

    /// Refreshes the account's accessible repository lists and persists it.
    ///
    /// Organizations keep only repositories they own, compared on the exact
    /// login. Users keep everything they can access.
    #[instrument(skip(self, account), fields(login = %account.login))]
    pub async fn sync_accessible_repositories(&self, account: &mut Account) -> SyncResult<()> {
        let credentials = account.require_credentials()?;
        let mut repos = self
            .access
            .list_accessible_repositories(&account.login, &credentials)
            .await?;

        if account.is_organization() {
            let owner = account.login.as_str();
            repos.retain(|repo| repo.split('/').next() == Some(owner));
        }

        info!(count = repos.len(), "Synced accessible repositories");
        account.set_accessible_repositories(repos);
        self.store.save(account).await?;
        Ok(())
    }

    /// Replaces the account's membership list with `orgs` and reconciles
    /// every organization through [`AccountSyncService::sync_or_create_account`].
    ///
    /// The organizations are reconciled concurrently. The first failure is
    /// returned and the account itself is not persisted. Reconciliations that
    /// already completed keep their writes.
    ///
    /// Renamed organizations are also renamed in the account's own repository
    /// lists before it is saved, so the saved record keeps the reassignment.
    #[instrument(skip(self, account, orgs), fields(login = %account.login, org_count = orgs.len()))]
    pub async fn sync_organization_memberships(
        &self,
        account: &mut Account,
        orgs: &[OrganizationSummary],
    ) -> SyncResult<()> {
        let credentials = account.require_credentials()?;
        account.set_memberships(orgs);

        let reconciliations = orgs
            .iter()
            .map(|org| self.reconcile_organization(&org.login, &credentials));
        let renames = try_join_all(reconciliations).await?;

        for (old_login, new_login) in renames.into_iter().flatten() {
            if account.rename_repository_owner(&old_login, &new_login) {
                debug!(old_login = %old_login, new_login = %new_login, "Renamed repository owner");
            }
        }

        self.store.save(account).await?;
        Ok(())
    }

    /// Returns `(old_login, new_login)` if the organization was renamed.
    async fn reconcile_organization(
        &self,
        login: &str,
        credentials: &Credentials,
    ) -> SyncResult<Option<(String, String)>> {
        let profile = self
            .api
            .fetch_organization_profile(login, credentials)
            .await?;
        let (account, previous_login) = self.sync_or_create_organization(&profile).await?;
        Ok(previous_login.map(|old_login| (old_login, account.login)))
    }

    /// Refreshes a user's profile and organization memberships, clears the
    /// re-authentication flag and persists the account.
    #[instrument(skip(self, account), fields(login = %account.login))]
    pub async fn sync_profile_and_memberships(&self, account: &mut Account) -> SyncResult<()> {
        let credentials = account.require_credentials()?;
        let (profile, orgs) = self.api.fetch_user_profile(&credentials).await?;

        account.apply_user_profile(&profile);
        account.needs_reauth = ReauthState::NotNeeded;

        self.sync_organization_memberships(account, &orgs).await?;
        self.store.save(account).await?;
        Ok(())
    }

    /// Runs the complete synchronization of one account.
    ///
    /// # Behavior
    ///
    /// 1. Checks the credential. A rejected credential flags the account with
    ///    [`ReauthState::Required`], missing scopes with
    ///    [`ReauthState::MoreRights`]. Either way the account is returned
    ///    without running any further stage. Saving the flag is best effort: a
    ///    failed save is logged and the flagged account still returned.
    /// 2. Backfills the creation time of legacy records.
    /// 3. Fetches accessible repositories if none are recorded yet.
    /// 4. For users, syncs the profile and organization memberships.
    ///
    /// # Errors
    ///
    /// Any failure other than a rejected credential aborts the run. Earlier
    /// stages keep their writes.
    #[instrument(skip(self, account), fields(login = %account.login))]
    pub async fn full_sync(&self, mut account: Account) -> SyncResult<Account> {
        let reauth = match self.verify_access(&account).await {
            Ok(true) => None,
            Ok(false) => Some(ReauthState::MoreRights),
            Err(SyncError::Unauthorized) => Some(ReauthState::Required),
            Err(e) => return Err(e),
        };

        if let Some(state) = reauth {
            info!(needs_reauth = %state, "Account needs re-authentication");
            account.needs_reauth = state;
            if let Err(e) = self.store.save(&account).await {
                warn!(error = %e, "Failed to persist the re-authentication flag");
            }
            return Ok(account);
        }

        if account.created_at.is_none() {
            account.created_at = Some(Timestamp::now());
            self.store.save(&account).await?;
        }

        if account.accessible_repositories().is_empty() {
            self.sync_accessible_repositories(&mut account).await?;
        }

        if !account.is_organization() {
            self.sync_profile_and_memberships(&mut account).await?;
        }

        info!("Account synced");
        Ok(account)
    }

    /// Creates and persists a user account from a completed OAuth login.
    ///
    /// # Errors
    /// `SyncError::AccountExists` if an account with the same login is stored.
    #[instrument(skip(self, payload), fields(login = %payload.username))]
    pub async fn create_account_from_auth_result(
        &self,
        payload: &GitHubAuthPayload,
    ) -> SyncResult<Account> {
        if self.store.find_by_login(&payload.username).await?.is_some() {
            return Err(SyncError::AccountExists {
                login: payload.username.clone(),
            });
        }

        let account = Account::from_auth_payload(payload, Timestamp::now());
        self.store.save(&account).await?;

        info!(external_id = account.external_id, "Created account");
        Ok(account)
    }

    /// Stores a new credential pair on the account and persists it.
    #[instrument(skip(self, account, credentials), fields(login = %account.login))]
    pub async fn refresh_credential(
        &self,
        mut account: Account,
        credentials: Credentials,
    ) -> SyncResult<Account> {
        account.set_credentials(credentials);
        self.store.save(&account).await?;

        info!("Stored refreshed credential");
        Ok(account)
    }
}
