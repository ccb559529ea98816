//! Secure credential storage using the system keychain.
//!
//! This module provides synchronous access to the system's secure credential storage:
//! - macOS: Keychain Services
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KDE Wallet)
//!
//! ## Usage
//!
//! ```ignore
//! use snapledger_store::{CredentialStore, KeychainCredentialStore, keys};
//!
//! let mut store = KeychainCredentialStore::new();
//! store.set(keys::OPENAI_API_KEY, "sk-xxxxx")?;
//!
//! if let Some(key) = store.get(keys::OPENAI_API_KEY)? {
//!     println!("Got key: {}", &key[..8]);
//! }
//!
//! store.clear(keys::OPENAI_API_KEY)?;
//! ```

use keyring::Entry;
use tracing::debug;

use crate::error::StoreError;
use crate::traits::CredentialStore;

/// Service name prefix for `SnapLedger` credentials.
const SERVICE_PREFIX: &str = "SnapLedger";

/// Account name used for every entry.
const ACCOUNT: &str = "credential";

/// Well-known credential names.
pub mod keys {
    /// The user's own `OpenAI` API key.
    pub const OPENAI_API_KEY: &str = "openai_api_key";
    /// Sync backend URL.
    pub const SUPABASE_URL: &str = "supabase_url";
    /// Sync backend anonymous key.
    pub const SUPABASE_ANON_KEY: &str = "supabase_anon_key";

    /// Every key a complete reset removes.
    pub const ALL: &[&str] = &[OPENAI_API_KEY, SUPABASE_URL, SUPABASE_ANON_KEY];
}

/// Returns the keychain service name for a credential key.
fn service_name(key: &str) -> String {
    format!("{SERVICE_PREFIX}-{key}")
}

/// Masks a secret for display, keeping a short prefix.
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() <= 8 {
        return "••••".to_string();
    }
    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}••••")
}

/// [`CredentialStore`] backed by the system keychain.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeychainCredentialStore;

impl KeychainCredentialStore {
    /// Creates a keychain-backed store.
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &str) -> Result<Entry, StoreError> {
        Entry::new(&service_name(key), ACCOUNT)
            .map_err(|e| StoreError::Keychain(format!("Failed to create keychain entry: {e}")))
    }
}

impl CredentialStore for KeychainCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match Self::entry(key)?.get_password() {
            Ok(value) if !value.is_empty() => {
                debug!(key = key, "Credential retrieved from keychain");
                Ok(Some(value))
            }
            // Empty password or no entry both mean "not found"
            Ok(_) | Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::Keychain(format!("Failed to read {key}: {e}"))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::entry(key)?
            .set_password(value)
            .map_err(|e| StoreError::Keychain(format!("Failed to store {key}: {e}")))?;
        debug!(key = key, "Credential stored in keychain");
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) => {
                debug!(key = key, "Credential deleted from keychain");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted, that's fine
            Err(e) => Err(StoreError::Keychain(format!("Failed to delete {key}: {e}"))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
