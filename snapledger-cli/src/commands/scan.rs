//! Scan command - gate, save the expense, count the scan.
//!
//! The quota is checked before anything else runs. A scan is counted only
//! after its expense has been saved, so a failed save never burns quota.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use snapledger_core::{
    Clock, Expense, NewExpense, ScanDecision, ScanRequest, ScanSource, parse_amount_cents,
};
use snapledger_store::{CredentialStore, LedgerStore, MeterStore, TierGate};
use tracing::{info, warn};

use crate::app::App;
use crate::output::{JsonFormatter, ScanOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Category used when none is given.
const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Receipt image origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum SourceArg {
    /// Photo taken with the camera.
    #[default]
    Camera,
    /// Image picked from the photo library.
    PhotoLibrary,
    /// Entry typed in by hand.
    Manual,
}

impl From<SourceArg> for ScanSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Camera => ScanSource::Camera,
            SourceArg::PhotoLibrary => ScanSource::PhotoLibrary,
            SourceArg::Manual => ScanSource::Manual,
        }
    }
}

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Merchant printed on the receipt.
    #[arg(long, short)]
    pub merchant: String,

    /// Receipt total, e.g. 12.34.
    #[arg(long, short, allow_hyphen_values = true)]
    pub amount: String,

    /// Spending category.
    #[arg(long, short)]
    pub category: Option<String>,

    /// Receipt date (YYYY-MM-DD). Defaults to today.
    #[arg(long, short)]
    pub date: Option<NaiveDate>,

    /// Where the receipt image came from.
    #[arg(long, short, default_value = "camera")]
    pub source: SourceArg,
}

/// Runs the scan command.
pub fn run(args: &ScanArgs, app: &App, cli: &Cli) -> Result<ExitCode> {
    let merchant = args.merchant.trim();
    if merchant.is_empty() {
        anyhow::bail!("Merchant must not be empty");
    }
    let amount_cents = parse_amount_cents(&args.amount)?;

    let mut gate = app.gate();
    let request = ScanRequest::new(args.source.into());
    let decision = gate.evaluate(&request);

    let reason = match decision {
        ScanDecision::Proceed => {
            let mut ledger = app.ledger()?;
            let new = NewExpense {
                merchant: merchant.to_string(),
                amount_cents,
                currency: app.settings.currency.clone(),
                date: args.date.unwrap_or_else(|| gate.meter().clock().today()),
                category: args
                    .category
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                is_sample: false,
            };
            let expense = save_and_count(&mut gate, &mut ledger, new)?;

            let remaining = gate.meter_mut().remaining_scans_today();
            info!(id = expense.id, remaining = %remaining, "Scan completed");

            match cli.format {
                OutputFormat::Text => {
                    let formatter = TextFormatter::new(app.use_colors(cli));
                    println!("{}", formatter.format_scan_saved(&expense, remaining));
                }
                OutputFormat::Json => {
                    let output = ScanOutput::new(decision, Some(expense), remaining);
                    println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
                }
            }
            return Ok(ExitCode::Success);
        }
        ScanDecision::Block(reason) => reason,
    };

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                let formatter = TextFormatter::new(app.use_colors(cli));
                eprintln!("{}", formatter.format_blocked(reason));
            }
        }
        OutputFormat::Json => {
            let remaining = gate.meter_mut().remaining_scans_today();
            let output = ScanOutput::new(decision, None, remaining);
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(ExitCode::QuotaExhausted)
}

/// Saves the expense, then counts the scan.
///
/// The counter is only touched once the expense is on disk.
pub fn save_and_count<S, K, C>(
    gate: &mut TierGate<S, K, C>,
    ledger: &mut LedgerStore,
    new: NewExpense,
) -> Result<Expense>
where
    S: MeterStore,
    K: CredentialStore,
    C: Clock,
{
    let now = gate.meter().clock().now();
    let expense = ledger.add(new, now).context("Failed to save expense")?;

    if let Err(e) = gate.record_scan() {
        warn!(
            id = expense.id,
            error = %e,
            transient = e.is_transient(),
            "Expense saved but scan not counted"
        );
        return Err(e).context("Failed to record scan");
    }
    Ok(expense)
}
