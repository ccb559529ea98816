//! Credential command - manage the user's own OpenAI API key.

use anyhow::Result;
use clap::{Args, Subcommand};
use snapledger_core::Tier;
use snapledger_store::mask_secret;
use tracing::info;

use crate::app::App;
use crate::output::{CredentialOutput, JsonFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the credential command.
#[derive(Args)]
pub struct CredentialArgs {
    #[command(subcommand)]
    pub action: CredentialAction,
}

/// Credential subcommands.
#[derive(Subcommand)]
pub enum CredentialAction {
    /// Store the key in the system keychain.
    Set {
        /// The API key.
        value: String,

        /// Also switch to the own-key tier.
        #[arg(long = "use")]
        use_it: bool,
    },

    /// Remove the stored key. The tier is left unchanged.
    Clear,

    /// Show whether a key is stored (masked).
    Show,
}

/// Runs the credential command.
pub fn run(args: &CredentialArgs, app: &App, cli: &Cli) -> Result<ExitCode> {
    let mut gate = app.gate();

    match &args.action {
        CredentialAction::Set { value, use_it } => {
            gate.set_user_supplied_credential(value)?;
            if *use_it {
                gate.set_tier(Tier::UserSuppliedCredential)?;
                info!("Switched to own-key tier");
            }
            if cli.format == OutputFormat::Text {
                println!("API key stored");
            }
        }
        CredentialAction::Clear => {
            gate.clear_user_supplied_credential()?;
            if cli.format == OutputFormat::Text {
                println!("API key removed");
                if gate.tier() == Tier::UserSuppliedCredential && !cli.quiet {
                    println!("Tier is still Own API Key. Switch with `snapledger tier free`.");
                }
            }
        }
        CredentialAction::Show => {}
    }

    let stored = gate.user_supplied_credential();

    match cli.format {
        OutputFormat::Text => {
            if matches!(args.action, CredentialAction::Show) {
                match &stored {
                    Some(value) => println!("API key: {}", mask_secret(value)),
                    None => println!("API key: not set"),
                }
            }
        }
        OutputFormat::Json => {
            let output = CredentialOutput {
                stored: stored.is_some(),
                masked: stored.as_deref().map(mask_secret),
                tier: gate.tier(),
            };
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(ExitCode::Success)
}
