//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use snapledger_store::LogLevel;
use tracing::info;

use crate::app::App;
use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show file locations.
    Path,

    /// Set the log level.
    SetLogLevel {
        /// error, warn, info, debug, or trace.
        level: String,
    },

    /// Set the currency for new expenses.
    SetCurrency {
        /// ISO 4217 code, e.g. EUR.
        code: String,
    },

    /// Ask (or stop asking) before resets.
    Confirm {
        /// on or off.
        #[arg(
            action = clap::ArgAction::Set,
            value_parser = clap::builder::BoolishValueParser::new()
        )]
        enabled: bool,
    },
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, app: &App, cli: &Cli) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(app, cli).await?,
        ConfigAction::Path => show_paths(app, cli)?,
        ConfigAction::SetLogLevel { level } => set_log_level(level, app).await?,
        ConfigAction::SetCurrency { code } => set_currency(code, app).await?,
        ConfigAction::Confirm { enabled } => set_confirm(*enabled, app).await?,
    }
    Ok(ExitCode::Success)
}

async fn show_config(app: &App, cli: &Cli) -> Result<()> {
    let settings = app.settings_store.get().await;

    match cli.format {
        OutputFormat::Text => {
            println!("SnapLedger Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Log level:        {}", settings.log_level);
            println!("Currency:         {}", settings.currency);
            println!("Colored output:   {}", settings.color_output);
            println!("Confirm resets:   {}", settings.confirm_resets);
            match &settings.ledger_path {
                Some(path) => println!("Ledger override:  {}", path.display()),
                None => println!("Ledger override:  none"),
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

fn show_paths(app: &App, cli: &Cli) -> Result<()> {
    let paths = &app.paths;

    match cli.format {
        OutputFormat::Text => {
            println!("SnapLedger Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", paths.config_dir.display());
            println!("Data dir:      {}", paths.data_dir.display());
            println!("Settings file: {}", paths.settings.display());
            println!("State file:    {}", paths.state.display());
            println!("Ledger file:   {}", paths.ledger.display());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "config_dir": paths.config_dir.display().to_string(),
                "data_dir": paths.data_dir.display().to_string(),
                "settings_file": paths.settings.display().to_string(),
                "state_file": paths.state.display().to_string(),
                "ledger_file": paths.ledger.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

async fn set_log_level(level: &str, app: &App) -> Result<()> {
    let level = LogLevel::parse(level).ok_or_else(|| {
        let names: Vec<String> = LogLevel::all().iter().map(ToString::to_string).collect();
        anyhow::anyhow!("Unknown log level: {}. Use: {}", level, names.join(", "))
    })?;

    app.settings_store.set_log_level(level).await;
    app.settings_store.save().await?;

    info!(level = %level, "Log level updated");
    println!("Log level set to: {level}");

    Ok(())
}

async fn set_currency(code: &str, app: &App) -> Result<()> {
    app.settings_store.set_currency(code).await?;
    app.settings_store.save().await?;

    let currency = app.settings_store.currency().await;
    info!(currency = %currency, "Currency updated");
    println!("Currency set to: {currency}");

    Ok(())
}

async fn set_confirm(enabled: bool, app: &App) -> Result<()> {
    app.settings_store.set_confirm_resets(enabled).await;
    app.settings_store.save().await?;

    println!(
        "Reset confirmation {}",
        if enabled { "enabled" } else { "disabled" }
    );
    println!("Destructive categories always need --yes.");

    Ok(())
}
