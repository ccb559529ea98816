//! Expenses command - inspect the ledger and seed sample data.

use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Args, Subcommand};
use tracing::info;

use crate::app::App;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the expenses command.
#[derive(Args)]
pub struct ExpensesArgs {
    #[command(subcommand)]
    pub action: ExpensesAction,
}

/// Expenses subcommands.
#[derive(Subcommand)]
pub enum ExpensesAction {
    /// List saved expenses, newest first.
    #[command(visible_alias = "ls")]
    List {
        /// Show at most this many.
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Only sample expenses.
        #[arg(long)]
        samples: bool,
    },

    /// Add a handful of sample expenses to explore the app with.
    SeedSamples,
}

/// Runs the expenses command.
pub async fn run(args: &ExpensesArgs, app: &App, cli: &Cli) -> Result<ExitCode> {
    match &args.action {
        ExpensesAction::List { limit, samples } => list(*limit, *samples, app, cli),
        ExpensesAction::SeedSamples => seed_samples(app, cli).await,
    }
}

fn list(limit: Option<usize>, samples: bool, app: &App, cli: &Cli) -> Result<ExitCode> {
    let ledger = app.ledger()?;
    let expenses: Vec<_> = ledger
        .expenses()
        .iter()
        .rev()
        .filter(|e| !samples || e.is_sample)
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(app.use_colors(cli));
            println!("{}", formatter.format_expenses(&expenses));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&expenses)?);
        }
    }

    Ok(ExitCode::Success)
}

async fn seed_samples(app: &App, cli: &Cli) -> Result<ExitCode> {
    let mut ledger = app.ledger()?;
    let added = ledger.seed_samples(Local::now().date_naive(), &app.settings.currency, Utc::now())?;

    app.settings_store.update(|s| s.samples_offered = true).await;
    app.settings_store.save().await?;
    info!(added, "Samples seeded");

    match cli.format {
        OutputFormat::Text => {
            println!("Added {added} sample expenses");
            if !cli.quiet {
                println!("Remove them later with `snapledger reset -c sample-expenses --yes`.");
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({ "added": added });
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(ExitCode::Success)
}
