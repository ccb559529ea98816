//! Daily scan metering.
//!
//! The counter resets lazily: every access compares the stored day with
//! the clock's current day and zeroes the counter when they differ. There
//! is no timer, so an idle process still resets correctly on its next
//! query and several idle days collapse into a single reset.
//!
//! Unreadable state is treated as the zero value (no scans used, free
//! tier) for that read only and is never written back. Failed writes are
//! returned to the caller.

use snapledger_core::{Clock, RemainingScans, SystemClock, Tier, UsageCounter, UsageStatus};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::traits::MeterStore;

/// Tracks daily scan consumption against the active tier's quota.
#[derive(Debug)]
pub struct UsageMeter<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: MeterStore> UsageMeter<S> {
    /// Creates a meter on the wall clock.
    pub fn with_system_clock(store: S) -> Self {
        Self::new(store, SystemClock)
    }
}

impl<S: MeterStore, C: Clock> UsageMeter<S, C> {
    /// Creates a meter over `store`, reading the date from `clock`.
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    // ========================================================================
    // Tier
    // ========================================================================

    /// Returns the active tier, defaulting to free when unreadable.
    pub fn tier(&self) -> Tier {
        self.store.load_tier().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read tier, assuming free");
            Tier::Free
        })
    }

    /// Overwrites the active tier.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the tier could not be persisted.
    pub fn set_tier(&mut self, tier: Tier) -> Result<(), StoreError> {
        self.store.save_tier(tier)?;
        info!(tier = %tier, "Tier changed");
        Ok(())
    }

    // ========================================================================
    // Counter
    // ========================================================================

    /// Loads the counter and applies the midnight rollover.
    fn effective_counter(&mut self) -> UsageCounter {
        let today = self.clock.today();
        let mut counter = match self.store.load_counter() {
            Ok(counter) => counter,
            Err(e) => {
                // Nothing is written back: the stored state may still be intact.
                warn!(error = %e, "Failed to read usage counter, assuming zero");
                return UsageCounter::new(today);
            }
        };

        if counter.roll_over(today) {
            debug!(date = %today, "Daily scan counter reset");
            if let Err(e) = self.store.save_counter(&counter) {
                warn!(error = %e, "Failed to persist counter reset");
            }
        }
        counter
    }

    /// Scans used today, after rollover.
    pub fn scans_used_today(&mut self) -> u32 {
        self.effective_counter().scans_used_today
    }

    /// Scans left today; [`RemainingScans::Unlimited`] for unbounded tiers.
    pub fn remaining_scans_today(&mut self) -> RemainingScans {
        let used = self.scans_used_today();
        self.tier().quota().remaining(used)
    }

    /// Returns true if a scan is permitted right now.
    pub fn can_scan_now(&mut self) -> bool {
        match self.remaining_scans_today() {
            RemainingScans::Unlimited => true,
            RemainingScans::Count(n) => n > 0,
        }
    }

    /// Counts one granted scan.
    ///
    /// Call exactly once per granted scan, after checking
    /// [`can_scan_now`](Self::can_scan_now). The quota is not re-checked here.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the counter could not be persisted.
    pub fn record_scan(&mut self) -> Result<(), StoreError> {
        let mut counter = self.effective_counter();
        counter.record_scan();
        self.store.save_counter(&counter)?;
        debug!(scans_used_today = counter.scans_used_today, "Scan recorded");
        Ok(())
    }

    /// Returns a display snapshot of the meter.
    pub fn status(&mut self) -> UsageStatus {
        let counter = self.effective_counter();
        let tier = self.tier();
        UsageStatus {
            tier,
            scans_used_today: counter.scans_used_today,
            remaining: tier.quota().remaining(counter.scans_used_today),
            date: counter.last_reset_date.unwrap_or_else(|| self.clock.today()),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

// ============================================================================
// Tests
// ============================================================================
