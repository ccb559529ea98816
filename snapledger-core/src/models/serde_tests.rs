//! Serde tests for persisted and emitted core types.
//!
//! The persisted names are part of the on-disk state format.

use chrono::NaiveDate;

use crate::{
    BlockReason, PurchaseOutcome, RemainingScans, ResetCategory, ResetSelection, ScanDecision,
    Tier, UsageCounter,
};

#[test]
fn test_tier_wire_names() {
    let cases = [
        (Tier::Free, r#""free""#),
        (Tier::Premium, r#""premium""#),
        (Tier::UserSuppliedCredential, r#""user_supplied_credential""#),
    ];
    for (tier, json) in cases {
        assert_eq!(serde_json::to_string(&tier).unwrap(), json);
        assert_eq!(serde_json::from_str::<Tier>(json).unwrap(), tier);
    }
}

#[test]
fn test_tier_invalid_deserialize() {
    let result: Result<Tier, _> = serde_json::from_str(r#""platinum""#);
    assert!(result.is_err());
}

#[test]
fn test_usage_counter_missing_fields_default() {
    let counter: UsageCounter = serde_json::from_str("{}").unwrap();
    assert_eq!(counter, UsageCounter::default());

    let counter: UsageCounter =
        serde_json::from_str(r#"{"scans_used_today":4,"last_reset_date":"2024-03-01"}"#).unwrap();
    assert_eq!(counter.scans_used_today, 4);
    assert_eq!(counter.last_reset_date, NaiveDate::from_ymd_opt(2024, 3, 1));
}

#[test]
fn test_remaining_scans_json() {
    assert_eq!(
        serde_json::to_value(RemainingScans::Count(3)).unwrap(),
        serde_json::json!({"count": 3})
    );
    assert_eq!(
        serde_json::to_value(RemainingScans::Unlimited).unwrap(),
        serde_json::json!("unlimited")
    );
}

#[test]
fn test_scan_decision_json() {
    assert_eq!(
        serde_json::to_value(ScanDecision::Proceed).unwrap(),
        serde_json::json!({"decision": "proceed"})
    );
    assert_eq!(
        serde_json::to_value(ScanDecision::Block(BlockReason::DailyLimitReached)).unwrap(),
        serde_json::json!({"decision": "block", "reason": "daily_limit_reached"})
    );
}

#[test]
fn test_purchase_outcome_tagged() {
    let outcome: PurchaseOutcome =
        serde_json::from_str(r#"{"status":"confirmed","transaction_id":"tx-1"}"#).unwrap();
    assert_eq!(
        outcome,
        PurchaseOutcome::Confirmed {
            transaction_id: Some("tx-1".into())
        }
    );
    let outcome: PurchaseOutcome = serde_json::from_str(r#"{"status":"cancelled"}"#).unwrap();
    assert_eq!(outcome, PurchaseOutcome::Cancelled);
}

#[test]
fn test_reset_selection_serializes_in_order() {
    let sel = ResetSelection::from_categories([
        ResetCategory::UserPreferences,
        ResetCategory::AllExpenses,
    ]);
    let json = serde_json::to_value(&sel).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"categories": ["all_expenses", "user_preferences"]})
    );
}
