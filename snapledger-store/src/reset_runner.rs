//! Executes a selective data reset against a [`DataStore`].
//!
//! Deletion is best-effort and non-atomic: categories are deleted in
//! selection order, the first failure stops the run, and categories deleted
//! before the failure are not restored.

use snapledger_core::{ResetCounts, ResetFailure, ResetReport, ResetSelection};
use tracing::{info, warn};

use crate::traits::DataStore;

/// Runs resets against a data store.
#[derive(Debug)]
pub struct ResetRunner<D> {
    store: D,
}

impl<D: DataStore> ResetRunner<D> {
    /// Creates a runner over `store`.
    pub fn new(store: D) -> Self {
        Self { store }
    }

    /// Queries the current item count of every selected category.
    ///
    /// Categories whose count cannot be read are left out.
    pub fn query_counts(&self, selection: &ResetSelection) -> ResetCounts {
        selection
            .iter()
            .filter_map(|category| match self.store.count(category) {
                Ok(n) => Some((category, n)),
                Err(e) => {
                    warn!(category = %category, error = %e, "Failed to count items");
                    None
                }
            })
            .collect()
    }

    /// Describes the selection with fresh counts, for confirmation prompts.
    pub fn summarize(&self, selection: &ResetSelection) -> String {
        selection.summarize(&self.query_counts(selection))
    }

    /// Deletes every selected category, stopping at the first failure.
    pub fn execute(&mut self, selection: &ResetSelection) -> ResetReport {
        let mut report = ResetReport::default();
        let mut pending = selection.iter();

        for category in pending.by_ref() {
            match self.store.delete(category) {
                Ok(()) => {
                    info!(category = %category, "Reset category deleted");
                    report.deleted.push(category);
                }
                Err(e) => {
                    warn!(category = %category, error = %e, "Reset aborted");
                    report.failed = Some(ResetFailure {
                        category,
                        error: e.to_string(),
                    });
                    break;
                }
            }
        }

        report.not_attempted = pending.collect();
        report
    }

    /// Returns the data store.
    pub fn store(&self) -> &D {
        &self.store
    }
}
