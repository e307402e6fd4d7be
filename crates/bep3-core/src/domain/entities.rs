//! # Domain Entities
//!
//! Asset configuration, per-attempt swap parameters, and the swap attempt
//! entity whose state transitions the orchestrator drives.

use super::errors::{Hash, SwapError, SwapId, TxHash};
use super::value_objects::{AttemptState, SwapDirection, SwapIdPair};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Static per-asset configuration, loaded once at process start.
///
/// "Origin" fields describe the foreign chain (the origin leg of an
/// incoming swap); "dest" fields describe the home chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Denomination on the foreign chain (e.g. `BUSD-BD1`).
    pub origin_denom: String,
    /// Denomination on the home chain (e.g. `busd`).
    pub dest_denom: String,
    /// Deputy hot wallet on the foreign chain, bech32.
    pub origin_deputy_address: String,
    /// Deputy hot wallet on the home chain, bech32.
    pub dest_deputy_address: String,
    /// Integer scaling between the two chains' smallest units.
    pub conversion_factor: u64,
}

/// Immutable asset table keyed by canonical symbol.
///
/// A `BTreeMap` keeps iteration order deterministic for the deputy loader.
#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    assets: BTreeMap<String, AssetInfo>,
}

impl AssetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset under its canonical symbol.
    pub fn insert(&mut self, symbol: impl Into<String>, info: AssetInfo) {
        self.assets.insert(symbol.into(), info);
    }

    /// Look up an asset, failing with `UnsupportedAsset` for unknown symbols.
    pub fn get(&self, symbol: &str) -> Result<&AssetInfo, SwapError> {
        self.assets
            .get(symbol)
            .ok_or_else(|| SwapError::UnsupportedAsset(symbol.to_string()))
    }

    /// Whether the symbol is configured.
    pub fn contains(&self, symbol: &str) -> bool {
        self.assets.contains_key(symbol)
    }

    /// Iterate assets in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AssetInfo)> {
        self.assets.iter()
    }

    /// Number of configured assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Transient parameters for one create-swap submission.
///
/// The secret itself is carried separately as a
/// [`SecureSecret`](super::secure_secret::SecureSecret) and never stored
/// in the params.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapParams {
    /// Escrow creator's address on the origin chain, bech32.
    pub sender: String,
    /// Escrow recipient (the deputy) on the origin chain, bech32.
    pub recipient: String,
    /// Deputy's address on the other chain, bech32.
    pub sender_other_chain: String,
    /// Final recipient's address on the other chain, bech32.
    pub recipient_other_chain: String,
    /// Amount in the origin chain's smallest unit.
    pub amount: u64,
    /// Origin chain denomination.
    pub denom: String,
    /// Unix seconds at commitment-hash creation.
    pub timestamp: u64,
    /// `SHA256(secret || timestamp_be)`; must be recomputed identically by
    /// both legs.
    pub random_number_hash: Hash,
    /// Number of blocks the escrow stays claimable.
    pub height_span: u64,
}

/// One end-to-end swap attempt, tracked through the lifecycle states.
#[derive(Clone, Debug)]
pub struct SwapAttempt {
    /// Correlation ID attached to every log line of this attempt.
    pub id: Uuid,
    /// Direction relative to the home chain.
    pub direction: SwapDirection,
    /// Asset symbol being swapped.
    pub asset: String,
    /// Both precomputed leg identifiers.
    pub swap_ids: SwapIdPair,
    /// Current lifecycle state.
    pub state: AttemptState,
}

impl SwapAttempt {
    /// Start a new attempt in `Building`.
    pub fn new(direction: SwapDirection, asset: impl Into<String>, swap_ids: SwapIdPair) -> Self {
        Self {
            id: Uuid::new_v4(),
            direction,
            asset: asset.into(),
            swap_ids,
            state: AttemptState::Building,
        }
    }

    /// Transition to the next lifecycle state.
    pub fn transition_to(&mut self, next: AttemptState) -> Result<(), SwapError> {
        if !self.state.can_transition_to(next) {
            return Err(SwapError::InvalidTransition {
                from: format!("{:?}", self.state),
                to: format!("{next:?}"),
            });
        }
        self.state = next;
        Ok(())
    }

    /// Mark the attempt failed. Valid from any non-terminal state.
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = AttemptState::Failed;
        }
    }

    /// Origin-leg swap ID.
    pub fn origin_swap_id(&self) -> SwapId {
        self.swap_ids.origin
    }

    /// Destination-leg swap ID.
    pub fn dest_swap_id(&self) -> SwapId {
        self.swap_ids.dest
    }
}

/// Result of a completed (or confirmation-ambiguous) swap attempt.
#[derive(Clone, Debug)]
pub struct SwapOutcome {
    /// Attempt correlation ID.
    pub attempt_id: Uuid,
    /// Direction relative to the home chain.
    pub direction: SwapDirection,
    /// Asset symbol.
    pub asset: String,
    /// Origin-leg swap ID.
    pub origin_swap_id: SwapId,
    /// Destination-leg swap ID.
    pub dest_swap_id: SwapId,
    /// Hash of the create-swap transaction.
    pub create_tx: TxHash,
    /// Hash of the claim transaction.
    pub claim_tx: TxHash,
    /// Raw log returned by the claim confirmation.
    pub raw_log: String,
}
