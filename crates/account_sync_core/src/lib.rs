//! # Account Sync Core
//!
//! This crate keeps local account records in step with GitHub. It tracks which
//! repositories a user or organization can access, which organizations a user
//! belongs to, and follows organizations across renames.
//!
//! ## Overview
//!
//! A full synchronization of an account runs these stages in order, each one
//! finishing its writes before the next starts:
//! 1. Credential check against the required OAuth scopes
//! 2. Creation time backfill for legacy records
//! 3. Accessible repository backfill
//! 4. Profile and organization membership sync (users only)
//!
//! ## Main Types
//!
//! - [`AccountSyncService`] - the synchronization workflow
//! - [`Account`] - the persisted account record
//! - [`AccountStore`] - persistence seam, with [`InMemoryAccountStore`] and
//!   [`JsonFileAccountStore`] implementations
//! - [`RepositoryAccessSync`] - repository access seam, implemented by
//!   [`GitHubRepositoryAccess`]
//!
//! ## Examples
//!
//! ```no_run
//! use account_sync_core::{AccountSyncService, GitHubRepositoryAccess, JsonFileAccountStore};
//! use github_client::GitHubClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = Arc::new(GitHubClient::default());
//! let store = Arc::new(JsonFileAccountStore::new("./accounts"));
//! let access = Arc::new(GitHubRepositoryAccess::new(api.clone(), store.clone()));
//!
//! let service = AccountSyncService::new(api, access, store);
//!
//! if let Some(account) = service.find_account("octocat").await? {
//!     let account = service.full_sync(account).await?;
//!     println!("{} can access {} repositories", account.login, account.accessible_repositories().len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The crate follows a dependency injection pattern for testability:
//! - [`github_client::AccountApiClient`] for GitHub API reads
//! - [`RepositoryAccessSync`] for repository access listing and ownership changes
//! - [`AccountStore`] for the document store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod errors;
pub use errors::{StoreError, SyncError, SyncResult};

pub mod access;
pub mod account;
pub mod store;
pub mod sync;

pub use access::{GitHubRepositoryAccess, RepositoryAccessSync};
pub use account::{Account, AccountKind, OrgMembership, ReauthState};
pub use store::{AccountStore, InMemoryAccountStore, JsonFileAccountStore};
pub use sync::AccountSyncService;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// UTC timestamp wrapper
///
/// Represents a point in time in UTC timezone. Serializes as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp for the current moment
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a DateTime<Utc>
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}
