//! User preferences store.
//!
//! Manages user settings with persistence.

use serde::{Deserialize, Serialize};
use snapledger_core::DEFAULT_CURRENCY;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{load_json, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level.
    pub log_level: LogLevel,

    /// ISO 4217 currency for new expenses.
    pub currency: String,

    /// Ledger file override (default: platform data dir).
    pub ledger_path: Option<PathBuf>,

    /// Colored terminal output.
    pub color_output: bool,

    /// Ask before every reset. Destructive categories always ask.
    #[serde(alias = "confirm_destructive_resets")]
    pub confirm_resets: bool,

    /// Whether first-run sample data has been offered.
    pub samples_offered: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            ledger_path: None,
            color_output: true,
            confirm_resets: true,
            samples_offered: false,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl LogLevel {
    /// All levels, least verbose first.
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Parses a level name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::all().iter().copied().find(|l| l.to_string() == name)
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl SettingsStore {
    /// Loads settings from a path.
    ///
    /// A missing or unreadable file yields default settings.
    pub async fn load(path: PathBuf) -> Self {
        let settings = if path.exists() {
            info!(path = %path.display(), "Loading settings");
            load_json(&path).await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load settings, using defaults");
                Settings::default()
            })
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            Settings::default()
        };
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
        }
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings in memory. Call [`save`](Self::save) to persist.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        f(&mut settings);
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    // ========================================================================
    // Convenience Methods
    // ========================================================================

    /// Sets the log level.
    pub async fn set_log_level(&self, level: LogLevel) {
        self.update(|s| s.log_level = level).await;
    }

    /// Gets the currency for new expenses.
    pub async fn currency(&self) -> String {
        self.settings.read().await.currency.clone()
    }

    /// Sets the currency for new expenses.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] unless `code` is three ASCII letters.
    pub async fn set_currency(&self, code: &str) -> Result<(), StoreError> {
        let code = code.trim().to_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(StoreError::Config(format!("Invalid currency code: {code}")));
        }
        self.update(|s| s.currency = code).await;
        Ok(())
    }

    /// Sets whether every reset needs `--yes`.
    pub async fn set_confirm_resets(&self, value: bool) {
        self.update(|s| s.confirm_resets = value).await;
    }
}

// ============================================================================
// Tests
// ============================================================================
