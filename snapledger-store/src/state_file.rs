//! File-backed meter state.
//!
//! The active tier and the daily counter share one small JSON document:
//!
//! ```json
//! { "tier": "free", "usage": { "scans_used_today": 3, "last_reset_date": "2024-03-01" } }
//! ```

use serde::{Deserialize, Serialize};
use snapledger_core::{Tier, UsageCounter};
use std::path::PathBuf;
use tracing::warn;

use crate::error::StoreError;
use crate::persistence::{read_json_file_opt, write_json_file};
use crate::traits::MeterStore;

/// On-disk meter state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterState {
    /// Active tier.
    pub tier: Tier,
    /// Daily usage counter.
    pub usage: UsageCounter,
}

/// [`MeterStore`] persisted to a JSON file.
#[derive(Debug, Clone)]
pub struct FileMeterStore {
    path: PathBuf,
}

impl FileMeterStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_state(&self) -> Result<MeterState, StoreError> {
        Ok(read_json_file_opt(&self.path)?.unwrap_or_default())
    }

    /// Read-modify-write of the state document.
    ///
    /// Only a document that fails to parse is replaced. Any other read
    /// failure aborts the write so the stored tier survives.
    fn update(&self, f: impl FnOnce(&mut MeterState)) -> Result<(), StoreError> {
        let mut state = match self.read_state() {
            Ok(state) => state,
            Err(StoreError::Serialization(e)) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt meter state, rewriting");
                MeterState::default()
            }
            Err(e) => return Err(e),
        };
        f(&mut state);
        write_json_file(&self.path, &state)
    }
}

impl MeterStore for FileMeterStore {
    fn load_counter(&self) -> Result<UsageCounter, StoreError> {
        Ok(self.read_state()?.usage)
    }

    fn save_counter(&mut self, counter: &UsageCounter) -> Result<(), StoreError> {
        self.update(|state| state.usage = *counter)
    }

    fn load_tier(&self) -> Result<Tier, StoreError> {
        Ok(self.read_state()?.tier)
    }

    fn save_tier(&mut self, tier: Tier) -> Result<(), StoreError> {
        self.update(|state| state.tier = tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_missing_file_is_zero_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileMeterStore::new(dir.path().join("state.json"));
        assert_eq!(store.load_counter().unwrap(), UsageCounter::default());
        assert_eq!(store.load_tier().unwrap(), Tier::Free);
    }

    #[test]
    fn test_tier_and_counter_share_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let mut store = FileMeterStore::new(&path);

        let counter = UsageCounter {
            scans_used_today: 7,
            last_reset_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        };
        store.save_counter(&counter).unwrap();
        store.save_tier(Tier::Premium).unwrap();

        let reopened = FileMeterStore::new(&path);
        assert_eq!(reopened.load_counter().unwrap(), counter);
        assert_eq!(reopened.load_tier().unwrap(), Tier::Premium);
    }

    #[test]
    fn test_unreadable_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        // A directory in place of the file reads as an IO error, not bad JSON.
        std::fs::create_dir(&path).unwrap();

        let mut store = FileMeterStore::new(&path);
        assert!(matches!(store.load_tier(), Err(StoreError::Io(_))));

        let result = store.save_counter(&UsageCounter::default());
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert!(path.is_dir());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_error_then_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = FileMeterStore::new(&path);
        assert!(store.load_counter().is_err());

        store.save_tier(Tier::UserSuppliedCredential).unwrap();
        assert_eq!(store.load_tier().unwrap(), Tier::UserSuppliedCredential);
        assert_eq!(store.load_counter().unwrap(), UsageCounter::default());
    }
}
