//! Domain models for SnapLedger.
//!
//! ## Submodules
//!
//! - [`tier`] - Tiers, quotas, and purchase outcomes
//! - [`usage`] - Daily usage counter and status
//! - [`reset`] - Reset categories, selection rule, and reports
//! - [`scan`] - Scan requests and gate decisions
//! - [`expense`] - Stored expenses and amount helpers

mod expense;
mod reset;
mod scan;
mod tier;
mod usage;

pub use expense::{DEFAULT_CURRENCY, Expense, NewExpense, format_amount, parse_amount_cents};
pub use reset::{ResetCategory, ResetCounts, ResetFailure, ResetReport, ResetSelection};
pub use scan::{BlockReason, ScanDecision, ScanRequest, ScanSource};
pub use tier::{FREE_DAILY_SCANS, PurchaseOutcome, Quota, RemainingScans, Tier};
pub use usage::{UsageCounter, UsageStatus};
#[cfg(test)]
mod serde_tests;
