//! Trait definitions for SnapLedger.
//!
//! The rule engine reads "today" through [`Clock`] so that tests can move
//! time forward without waiting.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, Days, Local, NaiveDate, Utc};

/// Source of the current date and time.
pub trait Clock {
    /// Current calendar day in the device's local time zone.
    fn today(&self) -> NaiveDate;

    /// Current instant.
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock.
///
/// Clones share the same date, so a test can keep a handle after moving
/// the clock into a meter.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Rc<Cell<NaiveDate>>,
}

impl FixedClock {
    /// Creates a clock fixed at `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Rc::new(Cell::new(today)),
        }
    }

    /// Sets the current day.
    pub fn set(&self, today: NaiveDate) {
        self.today.set(today);
    }

    /// Moves the clock forward by whole days.
    pub fn advance_days(&self, days: u64) {
        let current = self.today.get();
        self.today
            .set(current.checked_add_days(Days::new(days)).unwrap_or(current));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_shared_between_clones() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let clock = FixedClock::new(start);
        let handle = clock.clone();

        handle.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        handle.set(start);
        assert_eq!(clock.today(), start);
    }
}
