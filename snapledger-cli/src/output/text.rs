//! Text output formatting with progress bars and colors.

use snapledger_core::{
    BlockReason, Expense, FREE_DAILY_SCANS, PurchaseOutcome, RemainingScans, ResetCategory,
    ResetReport, Tier, UsageStatus,
};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    /// Formats the meter status.
    pub fn format_status(
        &self,
        status: &UsageStatus,
        has_credential: bool,
        expense_count: usize,
    ) -> String {
        let mut lines = Vec::new();

        lines.push(format!("SnapLedger ({})", self.bold(status.tier.display_name())));
        lines.push(self.format_scans(status.remaining, status.scans_used_today));
        if !status.tier.quota().is_unlimited() {
            lines.push(format!("         {}", self.dim("Resets at local midnight")));
        }

        let key = if has_credential {
            self.green("stored")
        } else {
            self.dim("not set")
        };
        lines.push(format!("API key:  {key}"));
        lines.push(format!("Expenses: {expense_count}"));

        lines.join("\n")
    }

    /// Formats the scans line.
    fn format_scans(&self, remaining: RemainingScans, used: u32) -> String {
        match remaining {
            RemainingScans::Count(left) => {
                let total = left + used.min(FREE_DAILY_SCANS);
                let percent = if total == 0 {
                    0.0
                } else {
                    f64::from(left) / f64::from(total) * 100.0
                };
                let bar = self.progress_bar(percent);
                let text = self.color_for_percent(percent, &format!("{left} of {total} left"));
                format!("Scans:    {bar} {text}")
            }
            RemainingScans::Unlimited => {
                format!("Scans:    {} ({used} today)", self.cyan("unlimited"))
            }
        }
    }

    /// Formats a progress bar.
    pub fn progress_bar(&self, percent_remaining: f64) -> String {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let filled = ((percent_remaining / 100.0) * self.bar_width as f64).round() as usize;
        let filled = filled.min(self.bar_width);
        let empty = self.bar_width - filled;

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_percent(percent_remaining, &bar)
    }

    /// Formats the message shown when a scan is refused.
    pub fn format_blocked(&self, reason: BlockReason) -> String {
        format!(
            "{}\n{}\n\n{}",
            self.red("Scan blocked: daily limit reached"),
            reason.upgrade_prompt(),
            self.dim(concat!(
                "  snapledger purchase confirmed    # after buying Premium\n",
                "  snapledger credential set <key> --use",
            )),
        )
    }

    /// Formats a saved expense and what is left of today's quota.
    pub fn format_scan_saved(&self, expense: &Expense, remaining: RemainingScans) -> String {
        format!(
            "{} {} {} ({}, {})\nScans left today: {}",
            self.green("✓"),
            self.bold(&expense.merchant),
            expense.formatted_amount(),
            expense.category,
            expense.date.format("%Y-%m-%d"),
            remaining
        )
    }

    /// Formats the expense table.
    pub fn format_expenses(&self, expenses: &[Expense]) -> String {
        if expenses.is_empty() {
            return self.dim("No expenses yet");
        }

        let mut lines = Vec::new();
        lines.push(format!(
            "{:<5} {:<11} {:<22} {:>14}  {}",
            self.bold("ID"),
            self.bold("Date"),
            self.bold("Merchant"),
            self.bold("Amount"),
            self.bold("Category")
        ));
        lines.push("─".repeat(70));

        for expense in expenses {
            let marker = if expense.is_sample {
                format!(" {}", self.dim("(sample)"))
            } else {
                String::new()
            };
            lines.push(format!(
                "{:<5} {:<11} {:<22} {:>14}  {}{}",
                expense.id,
                expense.date.format("%Y-%m-%d"),
                truncate(&expense.merchant, 22),
                expense.formatted_amount(),
                expense.category,
                marker
            ));
        }

        lines.join("\n")
    }

    /// Formats a tier change.
    pub fn format_tier(&self, tier: Tier, previous: Option<Tier>) -> String {
        match previous {
            Some(previous) if previous != tier => format!(
                "Tier: {} → {}",
                self.dim(previous.display_name()),
                self.bold(tier.display_name())
            ),
            _ => format!("Tier: {}", self.bold(tier.display_name())),
        }
    }

    /// Formats the result of applying a purchase outcome.
    pub fn format_purchase(&self, outcome: &PurchaseOutcome, tier: Tier) -> String {
        let headline = match outcome {
            PurchaseOutcome::Confirmed { .. } => self.green("Purchase confirmed"),
            PurchaseOutcome::Cancelled => self.yellow("Purchase cancelled"),
            PurchaseOutcome::Pending => self.yellow("Purchase pending approval"),
            PurchaseOutcome::Failed { reason } => {
                format!("{}: {reason}", self.red("Purchase failed"))
            }
        };
        format!("{headline}\n{}", self.format_tier(tier, None))
    }

    /// Formats the reset categories with their descriptions.
    pub fn format_reset_categories(&self) -> String {
        ResetCategory::all()
            .iter()
            .map(|c| {
                let name = format!("{:<18}", c.cli_name());
                let name = if c.is_destructive() {
                    self.red(&name)
                } else {
                    name
                };
                format!("{name} {}", c.description())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats the confirmation summary shown before a reset.
    pub fn format_reset_preview(&self, summary: &str, destructive: bool) -> String {
        let mut lines = vec![self.bold("The following data will be deleted:"), summary.to_string()];
        if destructive {
            lines.push(String::new());
            lines.push(self.red("This cannot be undone."));
        }
        lines.join("\n")
    }

    /// Formats the outcome of a reset.
    pub fn format_reset_report(&self, report: &ResetReport) -> String {
        let mut lines = Vec::new();

        for category in &report.deleted {
            lines.push(format!("{} {}", self.green("✓"), category.label()));
        }
        if let Some(failure) = &report.failed {
            lines.push(format!(
                "{} {}: {}",
                self.red("✗"),
                failure.category.label(),
                failure.error
            ));
        }
        for category in &report.not_attempted {
            lines.push(format!("{} {} (not attempted)", self.dim("−"), category.label()));
        }

        if report.is_complete() {
            lines.push(self.green("Reset complete"));
        } else {
            lines.push(
                self.yellow("Reset incomplete: data deleted before the failure stays deleted"),
            );
        }

        lines.join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        if percent < 20.0 {
            self.red(text)
        } else if percent < 50.0 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Shortens `text` to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_full() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.progress_bar(100.0), "██████████");
    }

    #[test]
    fn test_progress_bar_empty() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.progress_bar(0.0), "░░░░░░░░░░");
    }

    #[test]
    fn test_color_for_percent() {
        let formatter = TextFormatter::new(true);
        assert!(formatter.color_for_percent(10.0, "x").contains(RED));
        assert!(formatter.color_for_percent(30.0, "x").contains(YELLOW));
        assert!(formatter.color_for_percent(80.0, "x").contains(GREEN));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Shell", 22), "Shell");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn test_scans_line_free_tier() {
        let formatter = TextFormatter::new(false);
        let line = formatter.format_scans(RemainingScans::Count(7), 3);
        assert_eq!(line, "Scans:    ███████░░░ 7 of 10 left");
    }

    #[test]
    fn test_scans_line_over_quota_after_downgrade() {
        // 14 scans recorded as premium, then switched back to free.
        let formatter = TextFormatter::new(false);
        let line = formatter.format_scans(RemainingScans::Count(0), 14);
        assert!(line.ends_with("0 of 10 left"));
    }
}
