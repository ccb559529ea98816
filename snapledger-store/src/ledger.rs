//! Local expense ledger.
//!
//! Expenses and a cache of per-category totals live in one JSON file. The
//! cache is derived data: it is rebuilt whenever expenses change and can be
//! cleared independently.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use snapledger_core::{Expense, NewExpense};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{read_json_file_opt, write_json_file};

/// Sample receipts: merchant, amount in cents, category, days before today.
const SAMPLE_EXPENSES: &[(&str, i64, &str, u64)] = &[
    ("Blue Bottle Coffee", 575, "Food & Drink", 0),
    ("Whole Foods Market", 8_642, "Groceries", 1),
    ("Shell", 4_810, "Transport", 3),
    ("Office Depot", 2_399, "Office", 6),
    ("Lyft", 1_875, "Transport", 9),
];

/// On-disk ledger document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    /// Next identifier to assign.
    pub next_id: u64,
    /// Saved expenses, oldest first.
    pub expenses: Vec<Expense>,
    /// Cached total cents per spending category.
    pub analytics: BTreeMap<String, i64>,
    /// When the cache was last rebuilt.
    pub analytics_updated_at: Option<DateTime<Utc>>,
}

impl Ledger {
    fn rebuild_analytics(&mut self, now: DateTime<Utc>) {
        self.analytics.clear();
        for expense in &self.expenses {
            *self.analytics.entry(expense.category.clone()).or_insert(0) += expense.amount_cents;
        }
        self.analytics_updated_at = Some(now);
    }
}

/// Ledger bound to its file.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
    ledger: Ledger,
}

impl LedgerStore {
    /// Opens the ledger at `path`; a missing file yields an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    /// The ledger holds user data, so it is never silently replaced.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let ledger = read_json_file_opt(&path)?.unwrap_or_default();
        debug!(path = %path.display(), "Ledger opened");
        Ok(Self { path, ledger })
    }

    /// Returns all expenses, oldest first.
    pub fn expenses(&self) -> &[Expense] {
        &self.ledger.expenses
    }

    /// Number of sample expenses.
    pub fn sample_count(&self) -> usize {
        self.ledger.expenses.iter().filter(|e| e.is_sample).count()
    }

    /// Returns the cached per-category totals.
    pub fn analytics(&self) -> &BTreeMap<String, i64> {
        &self.ledger.analytics
    }

    /// Writes the ledger to disk.
    ///
    /// # Errors
    ///
    /// Returns the IO or serialization error.
    pub fn save(&self) -> Result<(), StoreError> {
        write_json_file(&self.path, &self.ledger)
    }

    /// Saves a new expense and refreshes the analytics cache.
    ///
    /// # Errors
    ///
    /// Returns the error if the ledger could not be written; the in-memory
    /// ledger keeps the entry.
    pub fn add(&mut self, new: NewExpense, now: DateTime<Utc>) -> Result<Expense, StoreError> {
        let expense = self.push(new, now);
        self.ledger.rebuild_analytics(now);
        self.save()?;
        info!(id = expense.id, merchant = %expense.merchant, "Expense saved");
        Ok(expense)
    }

    fn push(&mut self, new: NewExpense, now: DateTime<Utc>) -> Expense {
        self.ledger.next_id += 1;
        let expense = Expense {
            id: self.ledger.next_id,
            merchant: new.merchant,
            amount_cents: new.amount_cents,
            currency: new.currency,
            date: new.date,
            category: new.category,
            is_sample: new.is_sample,
            created_at: now,
        };
        self.ledger.expenses.push(expense.clone());
        expense
    }

    /// Adds the built-in sample expenses, dated relative to `today`.
    ///
    /// Returns the number added.
    ///
    /// # Errors
    ///
    /// Returns the error if the ledger could not be written.
    pub fn seed_samples(
        &mut self,
        today: NaiveDate,
        currency: &str,
        now: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        for &(merchant, amount_cents, category, days_ago) in SAMPLE_EXPENSES {
            let date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);
            self.push(
                NewExpense {
                    merchant: merchant.to_string(),
                    amount_cents,
                    currency: currency.to_string(),
                    date,
                    category: category.to_string(),
                    is_sample: true,
                },
                now,
            );
        }
        self.ledger.rebuild_analytics(now);
        self.save()?;
        info!(count = SAMPLE_EXPENSES.len(), "Sample expenses added");
        Ok(SAMPLE_EXPENSES.len())
    }

    /// Deletes every expense. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns the error if the ledger could not be written.
    pub fn delete_all_expenses(&mut self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let removed = self.ledger.expenses.len();
        self.ledger.expenses.clear();
        self.ledger.rebuild_analytics(now);
        self.save()?;
        Ok(removed)
    }

    /// Deletes sample expenses only. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns the error if the ledger could not be written.
    pub fn delete_sample_expenses(&mut self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let before = self.ledger.expenses.len();
        self.ledger.expenses.retain(|e| !e.is_sample);
        let removed = before - self.ledger.expenses.len();
        self.ledger.rebuild_analytics(now);
        self.save()?;
        Ok(removed)
    }

    /// Clears the analytics cache. Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns the error if the ledger could not be written.
    pub fn clear_analytics(&mut self) -> Result<usize, StoreError> {
        let removed = self.ledger.analytics.len();
        self.ledger.analytics.clear();
        self.ledger.analytics_updated_at = None;
        self.save()?;
        Ok(removed)
    }

    /// Replaces the ledger with an empty one, including the id sequence.
    ///
    /// # Errors
    ///
    /// Returns the error if the ledger could not be written.
    pub fn wipe(&mut self) -> Result<(), StoreError> {
        self.ledger = Ledger::default();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn coffee() -> NewExpense {
        NewExpense {
            merchant: "Corner Cafe".into(),
            amount_cents: 450,
            currency: "USD".into(),
            date: today(),
            category: "Food & Drink".into(),
            is_sample: false,
        }
    }

    #[test]
    fn test_add_assigns_ids_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let mut store = LedgerStore::open(&path).unwrap();

        let first = store.add(coffee(), Utc::now()).unwrap();
        let second = store.add(coffee(), Utc::now()).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let reopened = LedgerStore::open(&path).unwrap();
        assert_eq!(reopened.expenses().len(), 2);
        assert_eq!(reopened.analytics().get("Food & Drink"), Some(&900));
    }

    #[test]
    fn test_ids_not_reused_until_wipe() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::open(dir.path().join("ledger.json")).unwrap();

        store.add(coffee(), Utc::now()).unwrap();
        store.delete_all_expenses(Utc::now()).unwrap();
        assert_eq!(store.add(coffee(), Utc::now()).unwrap().id, 2);

        store.wipe().unwrap();
        assert_eq!(store.add(coffee(), Utc::now()).unwrap().id, 1);
    }

    #[test]
    fn test_sample_expenses_are_separable() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::open(dir.path().join("ledger.json")).unwrap();
        store.add(coffee(), Utc::now()).unwrap();
        let seeded = store.seed_samples(today(), "USD", Utc::now()).unwrap();

        assert_eq!(store.sample_count(), seeded);
        assert_eq!(store.delete_sample_expenses(Utc::now()).unwrap(), seeded);
        assert_eq!(store.expenses().len(), 1);
        assert_eq!(store.analytics().len(), 1);
    }

    #[test]
    fn test_clear_analytics_keeps_expenses() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::open(dir.path().join("ledger.json")).unwrap();
        store.seed_samples(today(), "USD", Utc::now()).unwrap();

        let entries = store.analytics().len();
        assert!(entries > 0);
        assert_eq!(store.clear_analytics().unwrap(), entries);
        assert!(store.analytics().is_empty());
        assert_eq!(store.expenses().len(), SAMPLE_EXPENSES.len());
    }

    #[test]
    fn test_corrupt_ledger_is_not_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "{ broken").unwrap();

        assert!(LedgerStore::open(&path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ broken");
    }
}
