//! Composition root: resolves file locations and builds the engine.

use anyhow::{Context, Result};
use snapledger_core::SystemClock;
use snapledger_store::{
    FileMeterStore, KeychainCredentialStore, LedgerStore, LocalDataStore, Settings, SettingsStore,
    TierGate, UsageMeter, default_config_dir, default_data_dir, default_ledger_path,
    default_settings_path, default_state_path,
};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::Cli;

/// The gate as wired for the command line.
pub type CliGate = TierGate<FileMeterStore, KeychainCredentialStore, SystemClock>;

// ============================================================================
// Paths
// ============================================================================

/// Where each piece of local state lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Directory holding the settings file.
    pub config_dir: PathBuf,
    /// Directory holding the ledger and meter state.
    pub data_dir: PathBuf,
    /// User settings.
    pub settings: PathBuf,
    /// Tier and daily counter.
    pub state: PathBuf,
    /// Expense ledger.
    pub ledger: PathBuf,
}

impl AppPaths {
    /// Platform defaults, or everything under `data_dir` when given.
    pub fn resolve(data_dir: Option<&Path>) -> Self {
        match data_dir {
            Some(dir) => Self {
                config_dir: dir.to_path_buf(),
                data_dir: dir.to_path_buf(),
                settings: dir.join("settings.json"),
                state: dir.join("state.json"),
                ledger: dir.join("ledger.json"),
            },
            None => Self {
                config_dir: default_config_dir(),
                data_dir: default_data_dir(),
                settings: default_settings_path(),
                state: default_state_path(),
                ledger: default_ledger_path(),
            },
        }
    }

    /// Applies the ledger override from settings.
    ///
    /// An explicit data directory wins over the setting.
    pub fn with_settings(mut self, settings: &Settings, explicit_dir: bool) -> Self {
        if !explicit_dir {
            if let Some(ledger) = &settings.ledger_path {
                self.ledger.clone_from(ledger);
            }
        }
        self
    }
}

// ============================================================================
// App
// ============================================================================

/// Loaded settings plus resolved paths.
pub struct App {
    /// Resolved file locations.
    pub paths: AppPaths,
    /// Settings snapshot taken at startup.
    pub settings: Settings,
    /// Backing store, for commands that change settings.
    pub settings_store: SettingsStore,
}

impl App {
    /// Loads settings and resolves paths.
    pub async fn load(data_dir: Option<&Path>) -> Self {
        let paths = AppPaths::resolve(data_dir);
        let settings_store = SettingsStore::load(paths.settings.clone()).await;
        let settings = settings_store.get().await;
        let paths = paths.with_settings(&settings, data_dir.is_some());
        debug!(state = %paths.state.display(), ledger = %paths.ledger.display(), "Paths resolved");

        Self {
            paths,
            settings,
            settings_store,
        }
    }

    /// Builds the tier gate over the state file and the system keychain.
    pub fn gate(&self) -> CliGate {
        let meter = UsageMeter::with_system_clock(FileMeterStore::new(&self.paths.state));
        TierGate::new(meter, KeychainCredentialStore::new())
    }

    /// Opens the expense ledger.
    pub fn ledger(&self) -> Result<LedgerStore> {
        LedgerStore::open(&self.paths.ledger)
            .with_context(|| format!("Failed to open ledger at {}", self.paths.ledger.display()))
    }

    /// Builds the data store used by resets.
    pub fn data_store(&self) -> Result<LocalDataStore<KeychainCredentialStore>> {
        Ok(LocalDataStore::new(
            self.ledger()?,
            &self.paths.settings,
            KeychainCredentialStore::new(),
        ))
    }

    /// Whether text output should use ANSI colors.
    pub fn use_colors(&self, cli: &Cli) -> bool {
        !cli.no_color && self.settings.color_output
    }
}
