//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use chrono::{NaiveDate, TimeZone, Utc};
    use snapledger_core::{
        BlockReason, Expense, PurchaseOutcome, RemainingScans, ResetCategory, ResetFailure,
        ResetReport, Tier, UsageStatus,
    };

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn expense(id: u64, merchant: &str, is_sample: bool) -> Expense {
        Expense {
            id,
            merchant: merchant.to_string(),
            amount_cents: 1_234,
            currency: "USD".to_string(),
            date: day(),
            category: "Office".to_string(),
            is_sample,
            created_at: Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_progress_bar_boundary_values() {
        let formatter = TextFormatter::new(false);

        let test_cases = vec![
            (0.0, "░░░░░░░░░░"),
            (10.0, "█░░░░░░░░░"),
            (25.0, "███░░░░░░░"), // 2.5 rounds to 3 blocks
            (50.0, "█████░░░░░"),
            (100.0, "██████████"),
        ];

        for (percent, expected) in test_cases {
            let bar = formatter.progress_bar(percent);
            assert_eq!(bar, expected, "Failed for {percent}%");
        }
    }

    #[test]
    fn test_progress_bar_with_colors() {
        let formatter = TextFormatter::new(true);

        // One scan left out of ten - critical
        assert!(formatter.progress_bar(10.0).contains("\x1b[31m"));
        // Half gone - still green
        assert!(formatter.progress_bar(50.0).contains("\x1b[32m"));
    }

    #[test]
    fn test_format_status_free_tier() {
        let formatter = TextFormatter::new(false);
        let status = UsageStatus {
            tier: Tier::Free,
            scans_used_today: 4,
            remaining: RemainingScans::Count(6),
            date: day(),
        };

        let output = formatter.format_status(&status, false, 3);

        assert!(output.contains("SnapLedger (Free)"));
        assert!(output.contains("6 of 10 left"));
        assert!(output.contains("midnight"));
        assert!(output.contains("API key:  not set"));
        assert!(output.contains("Expenses: 3"));
    }

    #[test]
    fn test_format_status_unlimited_tier() {
        let formatter = TextFormatter::new(false);
        let status = UsageStatus {
            tier: Tier::UserSuppliedCredential,
            scans_used_today: 42,
            remaining: RemainingScans::Unlimited,
            date: day(),
        };

        let output = formatter.format_status(&status, true, 0);

        assert!(output.contains("Own API Key"));
        assert!(output.contains("unlimited (42 today)"));
        assert!(output.contains("API key:  stored"));
        assert!(!output.contains("midnight"));
    }

    #[test]
    fn test_format_blocked_has_upgrade_paths() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_blocked(BlockReason::DailyLimitReached);

        assert!(output.starts_with("Scan blocked"));
        assert!(output.contains("Premium"));
        assert!(output.contains("credential set"));
    }

    #[test]
    fn test_format_expenses_marks_samples() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_expenses(&[
            expense(1, "Office Depot", false),
            expense(2, "Blue Bottle Coffee", true),
        ]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("USD 12.34"));
        assert!(!lines[2].contains("(sample)"));
        assert!(lines[3].contains("(sample)"));
    }

    #[test]
    fn test_format_expenses_empty() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_expenses(&[]), "No expenses yet");
    }

    #[test]
    fn test_format_purchase_outcomes() {
        let formatter = TextFormatter::new(false);

        let confirmed = formatter.format_purchase(
            &PurchaseOutcome::Confirmed {
                transaction_id: None,
            },
            Tier::Premium,
        );
        assert!(confirmed.contains("Purchase confirmed"));
        assert!(confirmed.contains("Tier: Premium"));

        let failed = formatter.format_purchase(
            &PurchaseOutcome::Failed {
                reason: "card declined".into(),
            },
            Tier::Free,
        );
        assert!(failed.contains("Purchase failed: card declined"));
        assert!(failed.contains("Tier: Free"));
    }

    #[test]
    fn test_format_tier_change() {
        let formatter = TextFormatter::new(false);
        assert_eq!(
            formatter.format_tier(Tier::Premium, Some(Tier::Free)),
            "Tier: Free → Premium"
        );
        assert_eq!(
            formatter.format_tier(Tier::Free, Some(Tier::Free)),
            "Tier: Free"
        );
    }

    #[test]
    fn test_format_reset_report_partial() {
        let formatter = TextFormatter::new(false);
        let report = ResetReport {
            deleted: vec![ResetCategory::AllExpenses],
            failed: Some(ResetFailure {
                category: ResetCategory::CachedAnalytics,
                error: "disk full".into(),
            }),
            not_attempted: vec![ResetCategory::UserPreferences],
        };

        let output = formatter.format_reset_report(&report);

        assert!(output.contains("✓ All Expenses"));
        assert!(output.contains("✗ Cached Analytics: disk full"));
        assert!(output.contains("(not attempted)"));
        assert!(output.contains("Reset incomplete"));
    }

    #[test]
    fn test_format_reset_preview_warns_when_destructive() {
        let formatter = TextFormatter::new(false);
        let summary = "• Sample Expenses: 5 items";

        assert!(!formatter.format_reset_preview(summary, false).contains("cannot be undone"));
        assert!(formatter.format_reset_preview(summary, true).contains("cannot be undone"));
    }

    #[test]
    fn test_reset_category_list_covers_all() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_reset_categories();
        assert_eq!(output.lines().count(), ResetCategory::all().len());
        assert!(output.contains("complete-reset"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::{JsonFormatter, ResetOutput, ScanOutput, StatusOutput};
    use chrono::NaiveDate;
    use snapledger_core::{
        BlockReason, RemainingScans, ResetCategory, ResetCounts, ResetSelection, ScanDecision,
        Tier, UsageStatus,
    };

    #[test]
    fn test_format_pretty_json() {
        let formatter = JsonFormatter::new(true);

        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();

        // Pretty output should have newlines
        assert!(output.contains('\n'));
        assert!(output.contains("  ")); // Indentation
    }

    #[test]
    fn test_format_compact_json() {
        let formatter = JsonFormatter::new(false);

        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();

        assert_eq!(output, r#"{"key":"value"}"#);
    }

    #[test]
    fn test_status_output() {
        let status = UsageStatus {
            tier: Tier::Free,
            scans_used_today: 10,
            remaining: RemainingScans::Count(0),
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        };
        let output = JsonFormatter::new(false)
            .format(&StatusOutput::new(&status, false, 7))
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["tier"], "free");
        assert_eq!(parsed["daily_quota"], 10);
        assert_eq!(parsed["remaining"]["count"], 0);
        assert_eq!(parsed["can_scan"], false);
        assert_eq!(parsed["date"], "2024-03-10");
    }

    #[test]
    fn test_status_output_unlimited() {
        let status = UsageStatus {
            tier: Tier::Premium,
            scans_used_today: 9999,
            remaining: RemainingScans::Unlimited,
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        };
        let output = JsonFormatter::new(false)
            .format(&StatusOutput::new(&status, false, 0))
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed["daily_quota"].is_null());
        assert_eq!(parsed["remaining"], "unlimited");
        assert_eq!(parsed["can_scan"], true);
    }

    #[test]
    fn test_blocked_scan_output() {
        let output = ScanOutput::new(
            ScanDecision::Block(BlockReason::DailyLimitReached),
            None,
            RemainingScans::Count(0),
        );
        let parsed: serde_json::Value =
            serde_json::from_str(&JsonFormatter::new(false).format(&output).unwrap()).unwrap();

        assert_eq!(parsed["decision"], "block");
        assert_eq!(parsed["reason"], "daily_limit_reached");
        assert!(parsed["message"].as_str().unwrap().contains("Premium"));
        assert!(parsed.get("expense").is_none());
    }

    #[test]
    fn test_reset_preview_output() {
        let selection = ResetSelection::new()
            .toggle(ResetCategory::SampleExpenses, true)
            .toggle(ResetCategory::CachedAnalytics, true);
        let counts: ResetCounts = [(ResetCategory::SampleExpenses, 5)].into_iter().collect();

        let output = ResetOutput::new(&selection, counts, None);
        let parsed: serde_json::Value =
            serde_json::from_str(&JsonFormatter::new(false).format(&output).unwrap()).unwrap();

        assert_eq!(
            parsed["selection"],
            serde_json::json!(["sample_expenses", "cached_analytics"])
        );
        assert_eq!(parsed["counts"]["sample_expenses"], 5);
        assert_eq!(parsed["destructive"], false);
        assert_eq!(parsed["executed"], false);
        assert!(parsed.get("report").is_none());
    }
}
