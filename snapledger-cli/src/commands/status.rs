//! Status command - tier and today's scan usage.

use anyhow::Result;
use tracing::info;

use crate::app::App;
use crate::output::{JsonFormatter, StatusOutput, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the status command.
pub fn run(app: &App, cli: &Cli) -> Result<ExitCode> {
    let mut gate = app.gate();
    let status = gate.meter_mut().status();
    let has_credential = gate.has_user_supplied_credential();
    let expense_count = app.ledger()?.expenses().len();

    info!(tier = %status.tier, used = status.scans_used_today, "Status read");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(app.use_colors(cli));
            println!("{}", formatter.format_status(&status, has_credential, expense_count));

            if expense_count == 0 && !app.settings.samples_offered && !cli.quiet {
                println!();
                println!("Tip: run `snapledger expenses seed-samples` to try it with sample data.");
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = StatusOutput::new(&status, has_credential, expense_count);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(ExitCode::Success)
}
