//! Metering and reset-selection rules exercised through the public API.

use chrono::NaiveDate;
use snapledger_core::{
    Clock, FixedClock, Quota, RemainingScans, ResetCategory, ResetCounts, ResetReport,
    ResetSelection, Tier, UsageCounter,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Quotas
// ============================================================================

#[test]
fn test_quota_per_tier() {
    assert_eq!(Tier::Free.quota(), Quota::Daily(10));
    assert_eq!(Tier::Premium.quota(), Quota::Unlimited);
    assert_eq!(Tier::UserSuppliedCredential.quota(), Quota::Unlimited);
}

#[test]
fn test_remaining_is_quota_minus_used_clamped() {
    for used in 0..=12 {
        let expected = RemainingScans::Count(10u32.saturating_sub(used));
        assert_eq!(Tier::Free.quota().remaining(used), expected, "used = {used}");
    }
    assert_eq!(Tier::Premium.quota().remaining(9999), RemainingScans::Unlimited);
}

#[test]
fn test_free_tier_exhausted_after_ten_scans() {
    let clock = FixedClock::new(day(2024, 3, 1));
    let mut counter = UsageCounter::new(clock.today());

    for _ in 0..10 {
        assert!(!Tier::Free.quota().remaining(counter.scans_used_today).is_exhausted());
        counter.record_scan();
    }
    assert!(Tier::Free.quota().remaining(counter.scans_used_today).is_exhausted());
    assert!(!Tier::Premium.quota().remaining(counter.scans_used_today).is_exhausted());
}

// ============================================================================
// Rollover
// ============================================================================

#[test]
fn test_same_day_rollover_is_idempotent() {
    let today = day(2024, 3, 1);
    let mut counter = UsageCounter::new(today);
    counter.record_scan();
    counter.record_scan();

    assert!(!counter.roll_over(today));
    assert!(!counter.roll_over(today));
    assert_eq!(counter.scans_used_today, 2);
}

#[test]
fn test_rollover_after_any_number_of_days() {
    for gap in [1u64, 2, 7, 31, 400] {
        let clock = FixedClock::new(day(2024, 2, 28));
        let mut counter = UsageCounter::new(clock.today());
        for _ in 0..10 {
            counter.record_scan();
        }

        clock.advance_days(gap);
        assert!(counter.roll_over(clock.today()), "gap = {gap}");
        assert_eq!(counter.scans_used_today, 0);
        assert_eq!(counter.last_reset_date, Some(clock.today()));
    }
}

#[test]
fn test_rollover_across_year_boundary() {
    let clock = FixedClock::new(day(2024, 12, 31));
    let mut counter = UsageCounter::new(clock.today());
    counter.record_scan();

    clock.advance_days(1);
    assert_eq!(clock.today(), day(2025, 1, 1));
    assert!(counter.roll_over(clock.today()));
    assert_eq!(counter.scans_used_today, 0);
}

// ============================================================================
// Reset selection
// ============================================================================

#[test]
fn test_complete_reset_excludes_everything_else() {
    let selection = ResetSelection::new()
        .toggle(ResetCategory::AllExpenses, true)
        .toggle(ResetCategory::SampleExpenses, true)
        .toggle(ResetCategory::CompleteReset, true);

    assert_eq!(
        selection.iter().collect::<Vec<_>>(),
        vec![ResetCategory::CompleteReset]
    );
}

#[test]
fn test_selection_never_mixes_complete_reset() {
    // Every sequence of single toggles keeps the exclusivity invariant.
    let all = ResetCategory::all();
    let mut selection = ResetSelection::new();
    for (i, category) in all.iter().cycle().take(all.len() * 4).enumerate() {
        selection = selection.toggle(*category, i % 3 != 0);
        if selection.contains(ResetCategory::CompleteReset) {
            assert_eq!(selection.len(), 1);
        }
    }
}

#[test]
fn test_deselect_only_removes_that_category() {
    let selection = ResetSelection::new()
        .toggle(ResetCategory::CachedAnalytics, true)
        .toggle(ResetCategory::UserPreferences, true)
        .toggle(ResetCategory::CachedAnalytics, false);

    assert_eq!(
        selection.iter().collect::<Vec<_>>(),
        vec![ResetCategory::UserPreferences]
    );
}

#[test]
fn test_toggle_does_not_mutate_the_original() {
    let original = ResetSelection::new().toggle(ResetCategory::AllExpenses, true);
    let _next = original.toggle(ResetCategory::CompleteReset, true);
    assert!(original.contains(ResetCategory::AllExpenses));
    assert!(!original.contains(ResetCategory::CompleteReset));
}

#[test]
fn test_summary_lists_counts_in_processing_order() {
    let selection = ResetSelection::from_categories([
        ResetCategory::StoredCredential,
        ResetCategory::AllExpenses,
    ]);
    let counts: ResetCounts = [
        (ResetCategory::AllExpenses, 12),
        (ResetCategory::StoredCredential, 1),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        selection.summarize(&counts),
        "• All Expenses: 12 items\n• Stored API Key: 1 item"
    );
}

#[test]
fn test_empty_report_is_complete() {
    assert!(ResetReport::default().is_complete());
}
