//! Selective data reset.
//!
//! A reset is described by a [`ResetSelection`]: a set of [`ResetCategory`]
//! values where [`ResetCategory::CompleteReset`] excludes every other
//! category. The selection only says *what* was requested; deletion is
//! carried out by the data store.
//!
//! Categories are processed in declaration order, which is also the
//! iteration order of the selection.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Item counts per category, as last queried from the data store.
pub type ResetCounts = BTreeMap<ResetCategory, u64>;

// ============================================================================
// Reset Category
// ============================================================================

/// Independently deletable bucket of locally stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetCategory {
    /// Every stored expense.
    AllExpenses,
    /// Expenses created as sample data.
    SampleExpenses,
    /// Precomputed analytics totals.
    CachedAnalytics,
    /// The user-supplied vision API key.
    StoredCredential,
    /// User preferences.
    UserPreferences,
    /// Everything above.
    CompleteReset,
}

impl ResetCategory {
    /// Returns the human label.
    pub fn label(self) -> &'static str {
        match self {
            Self::AllExpenses => "All Expenses",
            Self::SampleExpenses => "Sample Expenses",
            Self::CachedAnalytics => "Cached Analytics",
            Self::StoredCredential => "Stored API Key",
            Self::UserPreferences => "User Preferences",
            Self::CompleteReset => "Complete Reset",
        }
    }

    /// Returns a one-line explanation of what gets removed.
    pub fn description(self) -> &'static str {
        match self {
            Self::AllExpenses => "Delete every saved expense and receipt",
            Self::SampleExpenses => "Delete only the demo expenses",
            Self::CachedAnalytics => "Clear precomputed spending totals",
            Self::StoredCredential => "Remove the OpenAI API key from the keychain",
            Self::UserPreferences => "Restore default settings",
            Self::CompleteReset => "Erase all local data and settings",
        }
    }

    /// Returns true if the data cannot be regenerated after deletion.
    pub fn is_destructive(self) -> bool {
        match self {
            Self::AllExpenses | Self::StoredCredential | Self::CompleteReset => true,
            Self::SampleExpenses | Self::CachedAnalytics | Self::UserPreferences => false,
        }
    }

    /// Returns the name used on the command line.
    pub fn cli_name(self) -> &'static str {
        match self {
            Self::AllExpenses => "all-expenses",
            Self::SampleExpenses => "sample-expenses",
            Self::CachedAnalytics => "cached-analytics",
            Self::StoredCredential => "stored-credential",
            Self::UserPreferences => "user-preferences",
            Self::CompleteReset => "complete-reset",
        }
    }

    /// Parses a command-line category name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownCategory`] for unrecognized names.
    pub fn from_cli_name(name: &str) -> Result<Self, CoreError> {
        let normalized = name.trim().to_lowercase().replace('_', "-");
        Self::all()
            .iter()
            .copied()
            .find(|c| c.cli_name() == normalized)
            .or(match normalized.as_str() {
                "all" | "everything" => Some(Self::CompleteReset),
                "samples" => Some(Self::SampleExpenses),
                "analytics" => Some(Self::CachedAnalytics),
                "credential" | "api-key" => Some(Self::StoredCredential),
                "preferences" | "settings" => Some(Self::UserPreferences),
                _ => None,
            })
            .ok_or_else(|| CoreError::UnknownCategory(name.to_string()))
    }

    /// All categories, in processing order.
    pub fn all() -> &'static [ResetCategory] {
        &[
            Self::AllExpenses,
            Self::SampleExpenses,
            Self::CachedAnalytics,
            Self::StoredCredential,
            Self::UserPreferences,
            Self::CompleteReset,
        ]
    }
}

impl std::fmt::Display for ResetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Reset Selection
// ============================================================================

/// A consistent set of selected reset categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSelection {
    categories: BTreeSet<ResetCategory>,
}

impl ResetSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selection after (de)selecting `category`.
    ///
    /// Selecting `CompleteReset` yields `{CompleteReset}`. Selecting anything
    /// else drops `CompleteReset`. Deselecting removes only `category`.
    #[must_use]
    pub fn toggle(&self, category: ResetCategory, selected: bool) -> Self {
        let categories = match (selected, category) {
            (true, ResetCategory::CompleteReset) => BTreeSet::from([ResetCategory::CompleteReset]),
            (true, other) => {
                let mut next = self.categories.clone();
                next.insert(other);
                next.remove(&ResetCategory::CompleteReset);
                next
            }
            (false, other) => {
                let mut next = self.categories.clone();
                next.remove(&other);
                next
            }
        };
        Self { categories }
    }

    /// Builds a selection by selecting each category in turn.
    pub fn from_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = ResetCategory>,
    {
        categories
            .into_iter()
            .fold(Self::new(), |sel, c| sel.toggle(c, true))
    }

    /// Returns true if `category` is selected.
    pub fn contains(&self, category: ResetCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of selected categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if any selected category is destructive.
    pub fn is_destructive(&self) -> bool {
        self.categories.iter().any(|c| c.is_destructive())
    }

    /// Iterates the selection in processing order.
    pub fn iter(&self) -> impl Iterator<Item = ResetCategory> + '_ {
        self.categories.iter().copied()
    }

    /// Describes the selection for a confirmation prompt.
    ///
    /// One line per category: its label and the item count from `counts`.
    pub fn summarize(&self, counts: &ResetCounts) -> String {
        self.iter()
            .map(|category| {
                let count = match counts.get(&category) {
                    Some(1) => "1 item".to_string(),
                    Some(n) => format!("{n} items"),
                    None => "unknown".to_string(),
                };
                format!("• {}: {count}", category.label())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Reset Report
// ============================================================================

/// A category whose deletion failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetFailure {
    /// The failed category.
    pub category: ResetCategory,
    /// Error reported by the data store.
    pub error: String,
}

/// Outcome of executing a reset.
///
/// Deletion stops at the first failure; already-deleted categories stay
/// deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    /// Categories deleted successfully, in order.
    pub deleted: Vec<ResetCategory>,
    /// The first failure, if any.
    pub failed: Option<ResetFailure>,
    /// Categories skipped after the failure.
    pub not_attempted: Vec<ResetCategory>,
}

impl ResetReport {
    /// Returns true if every selected category was deleted.
    pub fn is_complete(&self) -> bool {
        self.failed.is_none() && self.not_attempted.is_empty()
    }
}
