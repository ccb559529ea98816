//! [`DataStore`] over the local ledger, settings file, and credentials.

use chrono::Utc;
use snapledger_core::ResetCategory;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::StoreError;
use crate::keychain::keys;
use crate::ledger::LedgerStore;
use crate::persistence::remove_file_if_exists;
use crate::traits::{CredentialStore, DataStore};

/// The app's local data, grouped into reset categories.
///
/// A complete reset wipes the ledger, every known credential, and the
/// settings file. The meter state (tier and daily counter) is not user data
/// and is left in place.
#[derive(Debug)]
pub struct LocalDataStore<K> {
    ledger: LedgerStore,
    settings_path: PathBuf,
    credentials: K,
}

impl<K: CredentialStore> LocalDataStore<K> {
    /// Creates a data store over its three backends.
    pub fn new(ledger: LedgerStore, settings_path: impl Into<PathBuf>, credentials: K) -> Self {
        Self {
            ledger,
            settings_path: settings_path.into(),
            credentials,
        }
    }

    /// Returns the ledger.
    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Returns the settings file path.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    fn credential_count(&self) -> Result<u64, StoreError> {
        Ok(u64::from(self.credentials.get(keys::OPENAI_API_KEY)?.is_some()))
    }

    fn all_credential_count(&self) -> Result<u64, StoreError> {
        let mut n = 0;
        for key in keys::ALL {
            n += u64::from(self.credentials.get(key)?.is_some());
        }
        Ok(n)
    }

    fn preferences_count(&self) -> u64 {
        u64::from(self.settings_path.exists())
    }

    fn wrap(category: ResetCategory, e: StoreError) -> StoreError {
        match e {
            StoreError::DeleteFailed { .. } => e,
            other => StoreError::DeleteFailed {
                category,
                reason: other.to_string(),
            },
        }
    }
}

impl<K: CredentialStore> DataStore for LocalDataStore<K> {
    fn count(&self, category: ResetCategory) -> Result<u64, StoreError> {
        let n = match category {
            ResetCategory::AllExpenses => self.ledger.expenses().len() as u64,
            ResetCategory::SampleExpenses => self.ledger.sample_count() as u64,
            ResetCategory::CachedAnalytics => self.ledger.analytics().len() as u64,
            ResetCategory::StoredCredential => self.credential_count()?,
            ResetCategory::UserPreferences => self.preferences_count(),
            ResetCategory::CompleteReset => {
                self.ledger.expenses().len() as u64
                    + self.ledger.analytics().len() as u64
                    + self.all_credential_count()?
                    + self.preferences_count()
            }
        };
        Ok(n)
    }

    fn delete(&mut self, category: ResetCategory) -> Result<(), StoreError> {
        let now = Utc::now();
        let result = match category {
            ResetCategory::AllExpenses => self.ledger.delete_all_expenses(now).map(|_| ()),
            ResetCategory::SampleExpenses => self.ledger.delete_sample_expenses(now).map(|_| ()),
            ResetCategory::CachedAnalytics => self.ledger.clear_analytics().map(|_| ()),
            ResetCategory::StoredCredential => self.credentials.clear(keys::OPENAI_API_KEY),
            ResetCategory::UserPreferences => {
                remove_file_if_exists(&self.settings_path).map(|_| ())
            }
            ResetCategory::CompleteReset => self.ledger.wipe().and_then(|()| {
                for key in keys::ALL {
                    self.credentials.clear(key)?;
                }
                remove_file_if_exists(&self.settings_path).map(|_| ())
            }),
        };
        result.map_err(|e| Self::wrap(category, e))?;
        info!(category = %category, "Local data deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCredentialStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, LocalDataStore<MemoryCredentialStore>) {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = LedgerStore::open(dir.path().join("ledger.json")).unwrap();
        ledger
            .seed_samples(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "USD", Utc::now())
            .unwrap();

        let settings_path = dir.path().join("settings.json");
        std::fs::write(&settings_path, "{}").unwrap();

        let mut credentials = MemoryCredentialStore::new();
        credentials.set(keys::OPENAI_API_KEY, "sk-test").unwrap();
        credentials.set(keys::SUPABASE_URL, "https://example.supabase.co").unwrap();

        let store = LocalDataStore::new(ledger, settings_path, credentials);
        (dir, store)
    }

    #[test]
    fn test_counts_per_category() {
        let (_dir, store) = setup();
        assert_eq!(store.count(ResetCategory::AllExpenses).unwrap(), 5);
        assert_eq!(store.count(ResetCategory::SampleExpenses).unwrap(), 5);
        assert_eq!(store.count(ResetCategory::CachedAnalytics).unwrap(), 4);
        assert_eq!(store.count(ResetCategory::StoredCredential).unwrap(), 1);
        assert_eq!(store.count(ResetCategory::UserPreferences).unwrap(), 1);
        assert_eq!(store.count(ResetCategory::CompleteReset).unwrap(), 5 + 4 + 2 + 1);
    }

    #[test]
    fn test_delete_credential_only() {
        let (_dir, mut store) = setup();
        store.delete(ResetCategory::StoredCredential).unwrap();
        assert_eq!(store.count(ResetCategory::StoredCredential).unwrap(), 0);
        assert_eq!(store.count(ResetCategory::AllExpenses).unwrap(), 5);
    }

    #[test]
    fn test_complete_reset_removes_everything() {
        let (_dir, mut store) = setup();
        store.delete(ResetCategory::CompleteReset).unwrap();
        assert_eq!(store.count(ResetCategory::CompleteReset).unwrap(), 0);
        assert!(!store.settings_path().exists());
    }

    #[test]
    fn test_keychain_failure_is_tagged_with_category() {
        let (_dir, mut store) = setup();
        store.credentials.fail_writes = true;
        let err = store.delete(ResetCategory::StoredCredential).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DeleteFailed {
                category: ResetCategory::StoredCredential,
                ..
            }
        ));
    }
}
