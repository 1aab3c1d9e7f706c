//! Account persistence.
//!
//! [`AccountStore`] is the document store seam. Two implementations ship with
//! the crate: [`InMemoryAccountStore`] for tests and embedding, and
//! [`JsonFileAccountStore`] which keeps one pretty-printed JSON document per
//! account in a directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{Account, StoreError};

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

/// Document store for account records, keyed by login.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, StoreError>;

    /// Looks up an account by its numeric GitHub id.
    async fn find_by_external_id(&self, external_id: u64) -> Result<Option<Account>, StoreError>;

    async fn list(&self) -> Result<Vec<Account>, StoreError>;

    /// Inserts or replaces the record stored under `account.login`.
    async fn save(&self, account: &Account) -> Result<(), StoreError>;

    /// Removes the record stored under `login`.
    ///
    /// # Errors
    /// `StoreError::NotFound` if no such record exists.
    async fn delete(&self, login: &str) -> Result<(), StoreError>;
}

/// Account store backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `accounts`.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.login.clone(), account))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
        }
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(login).cloned())
    }

    async fn find_by_external_id(&self, external_id: u64) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|account| account.external_id == external_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|a, b| a.login.cmp(&b.login));
        Ok(accounts)
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        self.accounts
            .write()
            .await
            .insert(account.login.clone(), account.clone());
        Ok(())
    }

    async fn delete(&self, login: &str) -> Result<(), StoreError> {
        match self.accounts.write().await.remove(login) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                login: login.to_string(),
            }),
        }
    }
}

const RECORD_EXTENSION: &str = "json";

/// Distinguishes the temporary files of concurrent writes.
static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Account store keeping one `<login>.json` file per account.
///
/// Writes go to a hidden temporary file that is then renamed over the record,
/// so a crash never leaves a half-written document behind. Every write gets
/// its own temporary file, so concurrent saves of one login do not collide;
/// the last rename wins.
#[derive(Debug, Clone)]
pub struct JsonFileAccountStore {
    directory: PathBuf,
}

impl JsonFileAccountStore {
    /// Creates a store rooted at `directory`. The directory is created on the
    /// first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn record_path(&self, login: &str) -> Result<PathBuf, StoreError> {
        let valid = !login.is_empty()
            && !login.starts_with('.')
            && login
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey {
                login: login.to_string(),
            });
        }

        Ok(self
            .directory
            .join(format!("{}.{}", login, RECORD_EXTENSION)))
    }

    async fn read_record(&self, path: &Path) -> Result<Option<Account>, StoreError> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::Serialization {
                key: path.display().to_string(),
                source,
            })
    }
}

#[async_trait]
impl AccountStore for JsonFileAccountStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, StoreError> {
        let path = self.record_path(login)?;
        self.read_record(&path).await
    }

    async fn find_by_external_id(&self, external_id: u64) -> Result<Option<Account>, StoreError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|account| account.external_id == external_id))
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let io_error = |source: std::io::Error| StoreError::Io {
            path: self.directory.clone(),
            source,
        };

        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(e)),
        };

        let mut accounts = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
            let path = entry.path();
            let is_record = path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXTENSION)
                && !entry.file_name().to_string_lossy().starts_with('.');
            if !is_record {
                continue;
            }

            match self.read_record(&path).await? {
                Some(account) => accounts.push(account),
                None => warn!(path = %path.display(), "Account record vanished while listing"),
            }
        }

        accounts.sort_by(|a, b| a.login.cmp(&b.login));
        Ok(accounts)
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        let path = self.record_path(&account.login)?;
        let temp_path = self.directory.join(format!(
            ".{}.{}.{}-{}.tmp",
            account.login,
            RECORD_EXTENSION,
            std::process::id(),
            TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        let contents =
            serde_json::to_string_pretty(account).map_err(|source| StoreError::Serialization {
                key: account.login.clone(),
                source,
            })?;

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|source| StoreError::Io {
                path: self.directory.clone(),
                source,
            })?;
        tokio::fs::write(&temp_path, contents)
            .await
            .map_err(|source| StoreError::Io {
                path: temp_path.clone(),
                source,
            })?;
        tokio::fs::rename(&temp_path, &path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        debug!(login = %account.login, path = %path.display(), "Saved account record");
        Ok(())
    }

    async fn delete(&self, login: &str) -> Result<(), StoreError> {
        let path = self.record_path(login)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(login = login, "Deleted account record");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound {
                login: login.to_string(),
            }),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}
