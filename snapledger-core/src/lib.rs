// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `SnapLedger` Core
//!
//! Core types, rules, and traits for the `SnapLedger` expense tracker.
//!
//! This crate holds everything that does not touch storage:
//!
//! - Domain models (tiers, quotas, usage counter, reset categories)
//! - The pure selection rule for data resets
//! - Error types
//! - The [`Clock`] abstraction used for daily rollover
//!
//! ## Key Types
//!
//! ### Metering
//! - [`Tier`] - Active subscription level
//! - [`Quota`] - Scans per day for a tier
//! - [`RemainingScans`] - Scans left today
//! - [`UsageCounter`] - Persisted daily counter
//! - [`UsageStatus`] - Read-only meter view
//!
//! ### Gating
//! - [`ScanRequest`] - A request to run the scan pipeline
//! - [`ScanDecision`] - Proceed or block
//! - [`PurchaseOutcome`] - Billing result
//!
//! ### Reset
//! - [`ResetCategory`] - Deletable bucket of local data
//! - [`ResetSelection`] - Consistent category selection
//! - [`ResetReport`] - Outcome of a best-effort reset

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Metering
    FREE_DAILY_SCANS,
    Quota,
    RemainingScans,
    Tier,
    UsageCounter,
    UsageStatus,
    // Gating
    BlockReason,
    PurchaseOutcome,
    ScanDecision,
    ScanRequest,
    ScanSource,
    // Reset
    ResetCategory,
    ResetCounts,
    ResetFailure,
    ResetReport,
    ResetSelection,
    // Expenses
    DEFAULT_CURRENCY,
    Expense,
    NewExpense,
    format_amount,
    parse_amount_cents,
};

// Re-export traits
pub use traits::{Clock, FixedClock, SystemClock};
