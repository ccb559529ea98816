//! Scan gating and tier transitions.
//!
//! [`TierGate::evaluate`] is the single decision point to consult before
//! running the scan pipeline. Tier changes only happen through explicit
//! calls; nothing here demotes a tier on its own.

use snapledger_core::{
    BlockReason, Clock, CoreError, PurchaseOutcome, ScanDecision, ScanRequest, SystemClock, Tier,
};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::keychain::keys;
use crate::traits::{CredentialStore, MeterStore};
use crate::usage_meter::UsageMeter;

/// Decides whether scans may run and manages the active tier.
#[derive(Debug)]
pub struct TierGate<S, K, C = SystemClock> {
    meter: UsageMeter<S, C>,
    credentials: K,
}

impl<S: MeterStore, K: CredentialStore, C: Clock> TierGate<S, K, C> {
    /// Creates a gate over a meter and a credential store.
    pub fn new(meter: UsageMeter<S, C>, credentials: K) -> Self {
        Self { meter, credentials }
    }

    // ========================================================================
    // Decisions
    // ========================================================================

    /// Decides the consequence of a scan request.
    pub fn evaluate(&mut self, request: &ScanRequest) -> ScanDecision {
        if self.meter.can_scan_now() {
            debug!(source = %request.source, "Scan permitted");
            ScanDecision::Proceed
        } else {
            info!(
                source = %request.source,
                tier = %self.meter.tier(),
                "Scan blocked: daily limit reached"
            );
            ScanDecision::Block(BlockReason::DailyLimitReached)
        }
    }

    /// Counts one granted scan. See [`UsageMeter::record_scan`].
    ///
    /// # Errors
    ///
    /// Returns the storage error if the counter could not be persisted.
    pub fn record_scan(&mut self) -> Result<(), StoreError> {
        self.meter.record_scan()
    }

    // ========================================================================
    // Tier Transitions
    // ========================================================================

    /// Returns the active tier.
    pub fn tier(&self) -> Tier {
        self.meter.tier()
    }

    /// Overwrites the active tier.
    ///
    /// Selecting [`Tier::UserSuppliedCredential`] does not require a stored
    /// credential.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the tier could not be persisted.
    pub fn set_tier(&mut self, tier: Tier) -> Result<(), StoreError> {
        self.meter.set_tier(tier)
    }

    /// Switches to premium. Call only after billing confirmed the purchase.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the tier could not be persisted.
    pub fn confirm_premium_purchase(&mut self) -> Result<(), StoreError> {
        self.meter.set_tier(Tier::Premium)
    }

    /// Applies a billing result. Only a confirmed purchase changes the tier.
    ///
    /// Returns the tier in effect afterwards.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the tier could not be persisted.
    pub fn apply_purchase_outcome(
        &mut self,
        outcome: &PurchaseOutcome,
    ) -> Result<Tier, StoreError> {
        match outcome {
            PurchaseOutcome::Confirmed { transaction_id } => {
                info!(transaction_id = ?transaction_id, "Premium purchase confirmed");
                self.confirm_premium_purchase()?;
            }
            PurchaseOutcome::Failed { reason } => {
                warn!(reason = %reason, "Premium purchase failed, tier unchanged");
            }
            PurchaseOutcome::Cancelled | PurchaseOutcome::Pending => {
                debug!(outcome = ?outcome, "Premium purchase not completed, tier unchanged");
            }
        }
        Ok(self.tier())
    }

    // ========================================================================
    // User-Supplied Credential
    // ========================================================================

    /// Stores the user's own API key. Does not change the tier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyCredential`] for blank input, or the
    /// credential store's error.
    pub fn set_user_supplied_credential(&mut self, value: &str) -> Result<(), StoreError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CoreError::EmptyCredential.into());
        }
        self.credentials.set(keys::OPENAI_API_KEY, value)?;
        info!("User-supplied API key stored");
        Ok(())
    }

    /// Removes the user's own API key. Does not change the tier.
    ///
    /// # Errors
    ///
    /// Returns the credential store's error.
    pub fn clear_user_supplied_credential(&mut self) -> Result<(), StoreError> {
        self.credentials.clear(keys::OPENAI_API_KEY)?;
        info!("User-supplied API key removed");
        Ok(())
    }

    /// Returns the stored API key, treating read failures as absent.
    pub fn user_supplied_credential(&self) -> Option<String> {
        self.credentials
            .get(keys::OPENAI_API_KEY)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to read API key");
                None
            })
    }

    /// Returns true if a non-empty API key is stored.
    pub fn has_user_supplied_credential(&self) -> bool {
        self.user_supplied_credential().is_some()
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the meter.
    pub fn meter(&self) -> &UsageMeter<S, C> {
        &self.meter
    }

    /// Returns the meter mutably.
    pub fn meter_mut(&mut self) -> &mut UsageMeter<S, C> {
        &mut self.meter
    }
}

// ============================================================================
// Tests
// ============================================================================
