//! # Domain Invariants
//!
//! Checks the orchestrator runs before trusting either chain leg.

use super::errors::{Hash, Secret, SwapError, SwapId};
use super::value_objects::SwapIdPair;
use crate::algorithms::secret::verify_commitment;

/// Invariant: the commitment hash must be reproducible from the secret and
/// timestamp. A mismatch means the claim is guaranteed to fail on chain.
/// Delegates to [`verify_commitment`] so the byte layout has exactly one
/// definition.
pub fn invariant_commitment_match(
    secret: &Secret,
    timestamp: u64,
    expected: &Hash,
) -> Result<(), SwapError> {
    if !verify_commitment(secret, timestamp, expected) {
        return Err(SwapError::CommitmentMismatch {
            swap_id: hex::encode(expected),
        });
    }
    Ok(())
}

/// Invariant: the destination chain must assign exactly the swap ID derived
/// locally before submission. This equality is the sole correctness check
/// available to the initiator before claiming.
pub fn invariant_relayed_id_match(expected: &SwapId, assigned: &SwapId) -> Result<(), SwapError> {
    if expected != assigned {
        return Err(SwapError::RelayedIdMismatch {
            expected: hex::encode(expected),
            got: hex::encode(assigned),
        });
    }
    Ok(())
}

/// Invariant: the two legs of one attempt must never share an identifier;
/// the operand swap in the derivation exists to prevent exactly that.
pub fn invariant_distinct_legs(pair: &SwapIdPair) -> Result<(), SwapError> {
    if pair.origin == pair.dest {
        return Err(SwapError::SwapIdCollision(hex::encode(pair.origin)));
    }
    Ok(())
}
