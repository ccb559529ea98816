//! In-memory collaborators.
//!
//! Used for tests and for running the engine without touching disk or the
//! keychain. Each store can be told to fail so error paths are reachable.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use snapledger_core::{ResetCategory, Tier, UsageCounter};

use crate::error::StoreError;
use crate::traits::{CredentialStore, DataStore, MeterStore};

// ============================================================================
// Meter Store
// ============================================================================

/// [`MeterStore`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryMeterStore {
    /// Stored counter.
    pub counter: UsageCounter,
    /// Stored tier.
    pub tier: Tier,
    /// Make every read fail.
    pub fail_reads: bool,
    /// Make only the next N reads fail.
    pub fail_next_reads: Cell<u32>,
    /// Make every write fail.
    pub fail_writes: bool,
}

impl MemoryMeterStore {
    /// Creates an empty store (zero counter, free tier).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a counter and tier.
    pub fn with_state(counter: UsageCounter, tier: Tier) -> Self {
        Self {
            counter,
            tier,
            ..Self::default()
        }
    }

    fn check_read(&self) -> Result<(), StoreError> {
        let pending = self.fail_next_reads.get();
        if self.fail_reads || pending > 0 {
            self.fail_next_reads.set(pending.saturating_sub(1));
            return Err(StoreError::Unavailable("meter state unreadable".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("meter state unwritable".into()));
        }
        Ok(())
    }
}

impl MeterStore for MemoryMeterStore {
    fn load_counter(&self) -> Result<UsageCounter, StoreError> {
        self.check_read()?;
        Ok(self.counter)
    }

    fn save_counter(&mut self, counter: &UsageCounter) -> Result<(), StoreError> {
        self.check_write()?;
        self.counter = *counter;
        Ok(())
    }

    fn load_tier(&self) -> Result<Tier, StoreError> {
        self.check_read()?;
        Ok(self.tier)
    }

    fn save_tier(&mut self, tier: Tier) -> Result<(), StoreError> {
        self.check_write()?;
        self.tier = tier;
        Ok(())
    }
}

// ============================================================================
// Credential Store
// ============================================================================

/// [`CredentialStore`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    values: HashMap<String, String>,
    /// Make every write fail.
    pub fail_writes: bool,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).filter(|v| !v.is_empty()).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Keychain("keychain locked".into()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Keychain("keychain locked".into()));
        }
        self.values.remove(key);
        Ok(())
    }
}

// ============================================================================
// Data Store
// ============================================================================

/// [`DataStore`] with fixed counts and scripted failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataStore {
    counts: BTreeMap<ResetCategory, u64>,
    failing: BTreeSet<ResetCategory>,
    deleted: Vec<ResetCategory>,
}

impl MemoryDataStore {
    /// Creates a store with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the item count reported for `category`.
    #[must_use]
    pub fn with_count(mut self, category: ResetCategory, count: u64) -> Self {
        self.counts.insert(category, count);
        self
    }

    /// Makes deletion of `category` fail.
    #[must_use]
    pub fn failing_on(mut self, category: ResetCategory) -> Self {
        self.failing.insert(category);
        self
    }

    /// Categories successfully deleted, in call order.
    pub fn deleted(&self) -> &[ResetCategory] {
        &self.deleted
    }
}

impl DataStore for MemoryDataStore {
    fn count(&self, category: ResetCategory) -> Result<u64, StoreError> {
        Ok(self.counts.get(&category).copied().unwrap_or(0))
    }

    fn delete(&mut self, category: ResetCategory) -> Result<(), StoreError> {
        if self.failing.contains(&category) {
            return Err(StoreError::DeleteFailed {
                category,
                reason: "simulated failure".into(),
            });
        }
        self.counts.remove(&category);
        self.deleted.push(category);
        Ok(())
    }
}
