//! Subscription tiers and their daily scan quotas.
//!
//! - [`Tier`] - The active subscription level
//! - [`Quota`] - Scans permitted per calendar day
//! - [`RemainingScans`] - What is left of today's quota
//! - [`PurchaseOutcome`] - Result reported by the billing collaborator

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Scans per calendar day on the free tier.
pub const FREE_DAILY_SCANS: u32 = 10;

// ============================================================================
// Tier
// ============================================================================

/// Subscription level governing the scan quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Free tier with a daily scan allowance.
    #[default]
    Free,
    /// Paid tier without a local quota.
    Premium,
    /// Scans run against the user's own vision API key.
    UserSuppliedCredential,
}

impl Tier {
    /// Returns the daily quota for this tier.
    pub fn quota(self) -> Quota {
        match self {
            Self::Free => Quota::Daily(FREE_DAILY_SCANS),
            // The user's own key is bounded only by the vendor's rate limits.
            Self::Premium | Self::UserSuppliedCredential => Quota::Unlimited,
        }
    }

    /// Returns the display name for this tier.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Premium => "Premium",
            Self::UserSuppliedCredential => "Own API Key",
        }
    }

    /// Returns the name used on the command line.
    pub fn cli_name(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
            Self::UserSuppliedCredential => "own-key",
        }
    }

    /// Parses a command-line tier name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownTier`] for unrecognized names.
    pub fn from_cli_name(name: &str) -> Result<Self, CoreError> {
        match name.trim().to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "premium" | "pro" => Ok(Self::Premium),
            "own-key" | "own_key" | "byok" | "user_supplied_credential" => {
                Ok(Self::UserSuppliedCredential)
            }
            _ => Err(CoreError::UnknownTier(name.to_string())),
        }
    }

    /// Returns all tiers.
    pub fn all() -> &'static [Tier] {
        &[Self::Free, Self::Premium, Self::UserSuppliedCredential]
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Quota
// ============================================================================

/// Maximum scans permitted per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quota {
    /// A fixed number of scans per day.
    Daily(u32),
    /// No local limit.
    Unlimited,
}

impl Quota {
    /// Returns true if this quota never runs out.
    pub fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Returns what is left after `used` scans, clamped at zero.
    pub fn remaining(self, used: u32) -> RemainingScans {
        match self {
            Self::Daily(limit) => RemainingScans::Count(limit.saturating_sub(used)),
            Self::Unlimited => RemainingScans::Unlimited,
        }
    }
}

/// Scans left for the current calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainingScans {
    /// A finite number of scans.
    Count(u32),
    /// The tier is not metered.
    Unlimited,
}

impl RemainingScans {
    /// Returns true if no scans are left.
    pub fn is_exhausted(self) -> bool {
        matches!(self, Self::Count(0))
    }
}

impl std::fmt::Display for RemainingScans {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

// ============================================================================
// Purchase Outcome
// ============================================================================

/// Result of a premium purchase as reported by the billing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    /// The store confirmed the purchase.
    Confirmed {
        /// Store transaction identifier, when known.
        transaction_id: Option<String>,
    },
    /// The user backed out.
    Cancelled,
    /// Awaiting approval (e.g. parental approval).
    Pending,
    /// The store reported an error.
    Failed {
        /// Store-provided reason.
        reason: String,
    },
}

impl PurchaseOutcome {
    /// Returns true only for a confirmed purchase.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_quota_is_ten() {
        assert_eq!(Tier::Free.quota(), Quota::Daily(10));
    }

    #[test]
    fn test_paid_tiers_are_unlimited() {
        assert!(Tier::Premium.quota().is_unlimited());
        assert!(Tier::UserSuppliedCredential.quota().is_unlimited());
    }

    #[test]
    fn test_remaining_clamps_at_zero() {
        assert_eq!(Quota::Daily(10).remaining(3), RemainingScans::Count(7));
        assert_eq!(Quota::Daily(10).remaining(10), RemainingScans::Count(0));
        assert_eq!(Quota::Daily(10).remaining(14), RemainingScans::Count(0));
        assert_eq!(Quota::Unlimited.remaining(9999), RemainingScans::Unlimited);
    }

    #[test]
    fn test_remaining_exhausted() {
        assert!(RemainingScans::Count(0).is_exhausted());
        assert!(!RemainingScans::Count(1).is_exhausted());
        assert!(!RemainingScans::Unlimited.is_exhausted());
    }

    #[test]
    fn test_cli_names() {
        for tier in Tier::all() {
            assert_eq!(Tier::from_cli_name(tier.cli_name()).unwrap(), *tier);
        }
        assert_eq!(Tier::from_cli_name("BYOK").unwrap(), Tier::UserSuppliedCredential);
        assert!(matches!(
            Tier::from_cli_name("gold"),
            Err(CoreError::UnknownTier(_))
        ));
    }

    #[test]
    fn test_default_tier_is_free() {
        assert_eq!(Tier::default(), Tier::Free);
    }

    #[test]
    fn test_only_confirmed_purchase_counts() {
        assert!(PurchaseOutcome::Confirmed { transaction_id: None }.is_confirmed());
        assert!(!PurchaseOutcome::Cancelled.is_confirmed());
        assert!(!PurchaseOutcome::Pending.is_confirmed());
        assert!(!PurchaseOutcome::Failed { reason: "declined".into() }.is_confirmed());
    }
}
