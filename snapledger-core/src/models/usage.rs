//! Daily scan usage.
//!
//! - [`UsageCounter`] - Persisted scans-used-today counter
//! - [`UsageStatus`] - Read-only view for display

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::tier::{RemainingScans, Tier};

// ============================================================================
// Usage Counter
// ============================================================================

/// Scans consumed on a single calendar day.
///
/// The zero state has no `last_reset_date`; the first access stamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageCounter {
    /// Scans granted since `last_reset_date` began.
    pub scans_used_today: u32,
    /// Calendar day (local time) the counter belongs to.
    pub last_reset_date: Option<NaiveDate>,
}

impl UsageCounter {
    /// Creates a zeroed counter stamped with `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            scans_used_today: 0,
            last_reset_date: Some(today),
        }
    }

    /// Resets the counter if it belongs to a day other than `today`.
    ///
    /// Returns true when a reset happened. Any number of elapsed days
    /// collapses into a single reset.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.last_reset_date == Some(today) {
            return false;
        }
        self.scans_used_today = 0;
        self.last_reset_date = Some(today);
        true
    }

    /// Counts one granted scan.
    pub fn record_scan(&mut self) {
        self.scans_used_today = self.scans_used_today.saturating_add(1);
    }
}

// ============================================================================
// Usage Status
// ============================================================================

/// Point-in-time view of the meter, after rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageStatus {
    /// Active tier.
    pub tier: Tier,
    /// Scans used today.
    pub scans_used_today: u32,
    /// Scans left today.
    pub remaining: RemainingScans,
    /// The day the numbers refer to.
    pub date: NaiveDate,
}

impl UsageStatus {
    /// Returns true if another scan would be permitted.
    pub fn can_scan(&self) -> bool {
        !self.remaining.is_exhausted()
    }
}
