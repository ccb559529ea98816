//! Tier command - show or change the active tier.

use anyhow::Result;
use clap::Args;
use snapledger_core::Tier;
use tracing::info;

use crate::app::App;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the tier command.
#[derive(Args)]
pub struct TierArgs {
    /// New tier: free, premium, or own-key. Omit to show the current tier.
    pub tier: Option<String>,
}

/// Runs the tier command.
pub fn run(args: &TierArgs, app: &App, cli: &Cli) -> Result<ExitCode> {
    let mut gate = app.gate();
    let previous = gate.tier();

    let tier = match &args.tier {
        Some(name) => {
            let tier = Tier::from_cli_name(name)?;
            gate.set_tier(tier)?;
            info!(from = %previous, to = %tier, "Tier changed");
            tier
        }
        None => previous,
    };

    let missing_key =
        tier == Tier::UserSuppliedCredential && !gate.has_user_supplied_credential();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(app.use_colors(cli));
            println!("{}", formatter.format_tier(tier, Some(previous)));
            if missing_key && !cli.quiet {
                println!("No API key stored yet. Add one with `snapledger credential set <key>`.");
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "tier": tier,
                "previous": previous,
                "changed": tier != previous,
                "credential_missing": missing_key,
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(ExitCode::Success)
}
