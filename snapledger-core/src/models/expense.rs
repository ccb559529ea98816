//! Stored expenses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Currency used when none is configured.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A saved receipt entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Ledger-assigned identifier.
    pub id: u64,
    /// Merchant name as extracted from the receipt.
    pub merchant: String,
    /// Total in minor units (cents).
    pub amount_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Purchase date printed on the receipt.
    pub date: NaiveDate,
    /// Spending category (free text).
    pub category: String,
    /// Demo data seeded for first-run.
    #[serde(default)]
    pub is_sample: bool,
    /// When the entry was saved.
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Formats the amount with its currency, e.g. `USD 12.34`.
    pub fn formatted_amount(&self) -> String {
        format_amount(self.amount_cents, &self.currency)
    }
}

/// Input for a new expense; the ledger assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Merchant name.
    pub merchant: String,
    /// Total in minor units.
    pub amount_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Purchase date.
    pub date: NaiveDate,
    /// Spending category.
    pub category: String,
    /// Demo data flag.
    pub is_sample: bool,
}

/// Parses a decimal amount such as `12.34` or `7` into cents.
///
/// # Errors
///
/// Returns [`CoreError::InvalidAmount`] for malformed input, more than two
/// decimal places, or values that overflow.
pub fn parse_amount_cents(input: &str) -> Result<i64, CoreError> {
    let invalid = || CoreError::InvalidAmount(input.to_string());
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if frac.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    let cents = whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(frac))
        .ok_or_else(invalid)?;
    Ok(if negative { -cents } else { cents })
}

/// Formats minor units as `CUR 12.34`.
pub fn format_amount(amount_cents: i64, currency: &str) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let abs = amount_cents.unsigned_abs();
    format!("{currency} {sign}{}.{:02}", abs / 100, abs % 100)
}
