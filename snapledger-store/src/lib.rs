// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # SnapLedger Store
//!
//! Metering engine and local persistence for the SnapLedger application.
//!
//! This crate provides:
//!
//! - **UsageMeter**: daily scan quota with lazy midnight rollover
//! - **TierGate**: scan decisions and tier transitions
//! - **ResetRunner**: best-effort selective data reset
//! - **SettingsStore**: user preferences with persistence
//! - Storage collaborators: JSON files, system keychain, and in-memory
//!
//! ## Usage
//!
//! ```ignore
//! use snapledger_core::{ScanRequest, ScanDecision};
//! use snapledger_store::{
//!     FileMeterStore, KeychainCredentialStore, TierGate, UsageMeter, default_state_path,
//! };
//!
//! let meter = UsageMeter::with_system_clock(FileMeterStore::new(default_state_path()));
//! let mut gate = TierGate::new(meter, KeychainCredentialStore::new());
//!
//! if gate.evaluate(&ScanRequest::default()) == ScanDecision::Proceed {
//!     // run the scan pipeline, save the expense...
//!     gate.record_scan()?;
//! }
//! ```

pub mod data_store;
pub mod error;
pub mod keychain;
pub mod ledger;
pub mod memory;
pub mod persistence;
pub mod reset_runner;
pub mod settings_store;
pub mod state_file;
pub mod tier_gate;
pub mod traits;
pub mod usage_meter;

pub use data_store::LocalDataStore;
pub use error::StoreError;
pub use keychain::{KeychainCredentialStore, keys, mask_secret};
pub use ledger::{Ledger, LedgerStore};
pub use memory::{MemoryCredentialStore, MemoryDataStore, MemoryMeterStore};
pub use persistence::{
    default_config_dir, default_data_dir, default_ledger_path, default_settings_path,
    default_state_path, load_json, save_json,
};
pub use reset_runner::ResetRunner;
pub use settings_store::{LogLevel, Settings, SettingsStore};
pub use state_file::{FileMeterStore, MeterState};
pub use tier_gate::TierGate;
pub use traits::{CredentialStore, DataStore, MeterStore};
pub use usage_meter::UsageMeter;
