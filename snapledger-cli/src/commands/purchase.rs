//! Purchase command - apply a premium purchase result.
//!
//! The store front reports how a purchase ended; only a confirmed purchase
//! changes the tier.

use anyhow::Result;
use clap::{Args, Subcommand};
use snapledger_core::PurchaseOutcome;

use crate::app::App;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the purchase command.
#[derive(Args)]
pub struct PurchaseArgs {
    #[command(subcommand)]
    pub outcome: OutcomeArg,
}

/// How the purchase ended.
#[derive(Subcommand, Clone)]
pub enum OutcomeArg {
    /// The store confirmed the purchase.
    Confirmed {
        /// Store transaction identifier.
        #[arg(long)]
        transaction_id: Option<String>,
    },
    /// The user backed out.
    Cancelled,
    /// Awaiting approval.
    Pending,
    /// The store reported an error.
    Failed {
        /// Store-provided reason.
        #[arg(long, default_value = "unknown error")]
        reason: String,
    },
}

impl From<OutcomeArg> for PurchaseOutcome {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::Confirmed { transaction_id } => Self::Confirmed { transaction_id },
            OutcomeArg::Cancelled => Self::Cancelled,
            OutcomeArg::Pending => Self::Pending,
            OutcomeArg::Failed { reason } => Self::Failed { reason },
        }
    }
}

/// Runs the purchase command.
pub fn run(args: &PurchaseArgs, app: &App, cli: &Cli) -> Result<ExitCode> {
    let outcome = PurchaseOutcome::from(args.outcome.clone());

    let mut gate = app.gate();
    let previous = gate.tier();
    let tier = gate.apply_purchase_outcome(&outcome)?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(app.use_colors(cli));
            println!("{}", formatter.format_purchase(&outcome, tier));
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "outcome": outcome,
                "tier": tier,
                "changed": tier != previous,
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_mapping() {
        let outcome = PurchaseOutcome::from(OutcomeArg::Confirmed {
            transaction_id: Some("1000000123".into()),
        });
        assert!(outcome.is_confirmed());

        let outcome = PurchaseOutcome::from(OutcomeArg::Failed {
            reason: "declined".into(),
        });
        assert_eq!(
            outcome,
            PurchaseOutcome::Failed {
                reason: "declined".into()
            }
        );
    }
}
