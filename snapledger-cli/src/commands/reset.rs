//! Reset command - delete selected categories of local data.
//!
//! Categories are added one at a time through the selection rule, so a
//! complete reset always ends up alone. Without `--yes` only the summary is
//! printed.

use anyhow::Result;
use clap::Args;
use snapledger_core::{ResetCategory, ResetSelection};
use snapledger_store::ResetRunner;
use tracing::info;

use crate::app::App;
use crate::output::{JsonFormatter, ResetOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the reset command.
#[derive(Args)]
pub struct ResetArgs {
    /// Category to delete (repeatable), e.g. all-expenses, sample-expenses,
    /// cached-analytics, stored-credential, user-preferences, complete-reset.
    #[arg(long = "category", short = 'c')]
    pub categories: Vec<String>,

    /// Delete without asking.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// List the categories and exit.
    #[arg(long)]
    pub list: bool,
}

/// Builds a selection by toggling each named category on in turn.
pub fn build_selection(names: &[String]) -> Result<ResetSelection> {
    names.iter().try_fold(ResetSelection::new(), |selection, name| {
        let category = ResetCategory::from_cli_name(name)?;
        Ok(selection.toggle(category, true))
    })
}

/// Runs the reset command.
pub fn run(args: &ResetArgs, app: &App, cli: &Cli) -> Result<ExitCode> {
    if args.list {
        let formatter = TextFormatter::new(app.use_colors(cli));
        println!("{}", formatter.format_reset_categories());
        return Ok(ExitCode::Success);
    }

    let selection = build_selection(&args.categories)?;
    if selection.is_empty() {
        anyhow::bail!("No categories selected. Use -c <category>, or --list to see them.");
    }

    let mut runner = ResetRunner::new(app.data_store()?);
    let counts = runner.query_counts(&selection);
    let needs_confirmation = app.settings.confirm_resets || selection.is_destructive();

    if needs_confirmation && !args.yes {
        match cli.format {
            OutputFormat::Text => {
                let formatter = TextFormatter::new(app.use_colors(cli));
                let summary = selection.summarize(&counts);
                println!(
                    "{}",
                    formatter.format_reset_preview(&summary, selection.is_destructive())
                );
                println!();
                println!("Re-run with --yes to delete.");
            }
            OutputFormat::Json => {
                let output = ResetOutput::new(&selection, counts, None);
                println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
            }
        }
        return Ok(ExitCode::Success);
    }

    info!(categories = selection.len(), "Running reset");
    let report = runner.execute(&selection);
    let complete = report.is_complete();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(app.use_colors(cli));
            println!("{}", formatter.format_reset_report(&report));
        }
        OutputFormat::Json => {
            let output = ResetOutput::new(&selection, counts, Some(report));
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    if complete {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::ResetIncomplete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_build_selection_uses_processing_order() {
        let selection = build_selection(&names(&["user-preferences", "all-expenses"])).unwrap();
        let categories: Vec<_> = selection.iter().collect();
        assert_eq!(
            categories,
            vec![ResetCategory::AllExpenses, ResetCategory::UserPreferences]
        );
    }

    #[test]
    fn test_complete_reset_wins() {
        let selection = build_selection(&names(&[
            "all-expenses",
            "sample-expenses",
            "complete-reset",
        ]))
        .unwrap();
        let categories: Vec<_> = selection.iter().collect();
        assert_eq!(categories, vec![ResetCategory::CompleteReset]);
    }

    #[test]
    fn test_later_category_clears_complete_reset() {
        let selection =
            build_selection(&names(&["complete-reset", "cached-analytics"])).unwrap();
        let categories: Vec<_> = selection.iter().collect();
        assert_eq!(categories, vec![ResetCategory::CachedAnalytics]);
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        assert!(build_selection(&names(&["receipts"])).is_err());
    }
}
