//! JSON output formatting.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use snapledger_core::{
    Expense, Quota, RemainingScans, ResetCategory, ResetCounts, ResetReport, ResetSelection,
    ScanDecision, Tier, UsageStatus,
};

// ============================================================================
// Output Types
// ============================================================================

/// Meter status.
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub tier: Tier,
    pub tier_name: &'static str,
    pub date: NaiveDate,
    pub scans_used_today: u32,
    /// `None` when the tier is not metered.
    pub daily_quota: Option<u32>,
    pub remaining: RemainingScans,
    pub can_scan: bool,
    pub has_credential: bool,
    pub expense_count: usize,
}

impl StatusOutput {
    /// Builds the output from a meter status.
    pub fn new(status: &UsageStatus, has_credential: bool, expense_count: usize) -> Self {
        Self {
            tier: status.tier,
            tier_name: status.tier.display_name(),
            date: status.date,
            scans_used_today: status.scans_used_today,
            daily_quota: match status.tier.quota() {
                Quota::Daily(n) => Some(n),
                Quota::Unlimited => None,
            },
            remaining: status.remaining,
            can_scan: status.can_scan(),
            has_credential,
            expense_count,
        }
    }
}

/// Result of a scan attempt.
#[derive(Debug, Serialize)]
pub struct ScanOutput {
    /// `proceed` or `block`.
    pub decision: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense: Option<Expense>,
    pub remaining: RemainingScans,
}

impl ScanOutput {
    /// Builds the output for a decision and, when it proceeded, the saved expense.
    pub fn new(
        decision: ScanDecision,
        expense: Option<Expense>,
        remaining: RemainingScans,
    ) -> Self {
        match decision {
            ScanDecision::Proceed => Self {
                decision: "proceed",
                reason: None,
                message: None,
                expense,
                remaining,
            },
            ScanDecision::Block(reason) => Self {
                decision: "block",
                reason: Some(reason.code()),
                message: Some(reason.upgrade_prompt()),
                expense: None,
                remaining,
            },
        }
    }
}

/// Reset preview or outcome.
#[derive(Debug, Serialize)]
pub struct ResetOutput {
    pub selection: Vec<ResetCategory>,
    pub counts: ResetCounts,
    pub destructive: bool,
    pub executed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ResetReport>,
}

impl ResetOutput {
    /// Builds the output for a selection and its counts.
    pub fn new(
        selection: &ResetSelection,
        counts: ResetCounts,
        report: Option<ResetReport>,
    ) -> Self {
        Self {
            selection: selection.iter().collect(),
            counts,
            destructive: selection.is_destructive(),
            executed: report.is_some(),
            report,
        }
    }
}

/// Credential presence.
#[derive(Debug, Serialize)]
pub struct CredentialOutput {
    pub stored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked: Option<String>,
    pub tier: Tier,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}
