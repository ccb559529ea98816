// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! SnapLedger CLI - receipt scanning with a daily scan quota.
//!
//! # Examples
//!
//! ```bash
//! # Show tier and today's scans
//! snapledger
//!
//! # Save a scanned receipt (counts against the free quota)
//! snapledger scan --merchant "Corner Cafe" --amount 4.50
//!
//! # Switch to your own OpenAI key
//! snapledger credential set sk-... --use
//!
//! # Apply a store purchase result
//! snapledger purchase confirmed --transaction-id 1000000123
//!
//! # Preview, then run, a data reset
//! snapledger reset -c all-expenses -c cached-analytics
//! snapledger reset -c all-expenses -c cached-analytics --yes
//!
//! # JSON output
//! snapledger status --format json --pretty
//! ```

mod app;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use snapledger_store::LogLevel;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use app::App;
use commands::{config, credential, expenses, purchase, reset, scan, status, tier};

// ============================================================================
// CLI Definition
// ============================================================================

/// SnapLedger CLI - receipt scanning expense tracker.
#[derive(Parser)]
#[command(name = "snapledger")]
#[command(about = "Receipt-scanning expense tracker")]
#[command(long_about = r#"
SnapLedger turns receipts into expenses.

Tiers:
  • Free          10 scans per day, resets at local midnight
  • Premium       unlimited scans
  • Own API Key   unlimited scans billed to your OpenAI key

Examples:
  snapledger                                   # Tier and scans left today
  snapledger scan --merchant Shell --amount 48.10
  snapledger tier premium                      # Switch tier
  snapledger reset -c sample-expenses --yes    # Delete sample data
  snapledger --format json status              # JSON output
"#)]
#[command(version)]
#[command(author = "SnapLedger Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'status' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Directory for the ledger, meter state, and settings.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show tier and today's scan usage (default if no command specified).
    #[command(visible_alias = "s")]
    Status,

    /// Scan a receipt: check the quota, save the expense, count the scan.
    Scan(scan::ScanArgs),

    /// Show or change the active tier.
    Tier(tier::TierArgs),

    /// Apply a premium purchase result.
    Purchase(purchase::PurchaseArgs),

    /// Manage your own OpenAI API key.
    #[command(visible_alias = "key")]
    Credential(credential::CredentialArgs),

    /// List or seed expenses.
    #[command(visible_alias = "e")]
    Expenses(expenses::ExpensesArgs),

    /// Delete selected categories of local data.
    Reset(reset::ResetArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The scan was blocked by the daily quota.
    QuotaExhausted = 2,
    /// A reset stopped before every category was deleted.
    ResetIncomplete = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn log_filter(verbose: bool, level: LogLevel) -> EnvFilter {
    if verbose {
        EnvFilter::new("snapledger=debug,info")
    } else {
        EnvFilter::new(format!("snapledger={level}"))
    }
}

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return; // No logging in quiet mode
    }

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(log_filter(verbose, level))
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings carry the configured log level, so load them first.
    let app = App::load(cli.data_dir.as_deref()).await;
    setup_logging(cli.verbose, cli.quiet, app.settings.log_level);

    let result = match &cli.command {
        Some(Commands::Status) | None => status::run(&app, &cli),
        Some(Commands::Scan(args)) => scan::run(args, &app, &cli),
        Some(Commands::Tier(args)) => tier::run(args, &app, &cli),
        Some(Commands::Purchase(args)) => purchase::run(args, &app, &cli),
        Some(Commands::Credential(args)) => credential::run(args, &app, &cli),
        Some(Commands::Expenses(args)) => expenses::run(args, &app, &cli).await,
        Some(Commands::Reset(args)) => reset::run(args, &app, &cli),
        Some(Commands::Config(args)) => config::run(args, &app, &cli).await,
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}
