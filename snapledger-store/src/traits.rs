//! Storage contracts consumed by the metering engine.
//!
//! Each trait is a narrow, synchronous, single-key style interface. The
//! engine never retries; failures are returned to the caller.

use snapledger_core::{ResetCategory, Tier, UsageCounter};

use crate::error::StoreError;

/// Persisted counters and flags: the daily usage counter and the active tier.
///
/// A missing value is not an error; implementations return the zero value.
pub trait MeterStore {
    /// Loads the daily usage counter.
    fn load_counter(&self) -> Result<UsageCounter, StoreError>;

    /// Persists the daily usage counter.
    fn save_counter(&mut self, counter: &UsageCounter) -> Result<(), StoreError>;

    /// Loads the active tier.
    fn load_tier(&self) -> Result<Tier, StoreError>;

    /// Persists the active tier.
    fn save_tier(&mut self, tier: Tier) -> Result<(), StoreError>;
}

/// Secure credential storage keyed by name.
pub trait CredentialStore {
    /// Returns the stored value, or `None` if absent or empty.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key succeeds.
    fn clear(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Local data grouped into reset categories.
pub trait DataStore {
    /// Number of items a reset of `category` would remove.
    fn count(&self, category: ResetCategory) -> Result<u64, StoreError>;

    /// Deletes everything in `category`.
    fn delete(&mut self, category: ResetCategory) -> Result<(), StoreError>;
}
