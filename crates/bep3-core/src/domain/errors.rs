//! # Domain Errors
//!
//! Error taxonomy for BEP3 swap orchestration.
//!
//! Lifecycle variants (`ChainRejected`, `RelayTimeout`, `ClaimRejected`,
//! `ConfirmationTimeout`) carry the swap direction, asset symbol and swap
//! IDs so a failed attempt can be investigated by hand. None of them are
//! retried internally: a retry needs a fresh commitment hash and therefore
//! a fresh attempt.

use super::value_objects::{ChainSide, SwapDirection};
use thiserror::Error;

/// Hash type (32-byte SHA-256).
pub type Hash = [u8; 32];

/// Secret type (32-byte random number).
pub type Secret = [u8; 32];

/// Swap identifier (32-byte SHA-256), one per chain leg.
pub type SwapId = [u8; 32];

/// Transaction hash (32-byte).
pub type TxHash = [u8; 32];

/// Swap orchestration error types.
#[derive(Debug, Error)]
pub enum SwapError {
    /// Requested asset symbol is not in the registry.
    #[error("asset not supported: {0}")]
    UnsupportedAsset(String),

    /// The origin chain rejected (or failed to accept) the create-swap tx.
    #[error("{direction} {asset} swap: create rejected by {chain} chain: {reason}")]
    ChainRejected {
        /// Swap direction of the failed attempt.
        direction: SwapDirection,
        /// Asset symbol.
        asset: String,
        /// Chain that rejected the submission.
        chain: ChainSide,
        /// Underlying adapter error, verbatim.
        reason: String,
    },

    /// Destination swap was not observed after the relay wait.
    #[error(
        "{direction} {asset} swap: destination swap {dest_swap_id} not relayed \
         within {waited_secs}s (origin swap {origin_swap_id})"
    )]
    RelayTimeout {
        /// Swap direction of the failed attempt.
        direction: SwapDirection,
        /// Asset symbol.
        asset: String,
        /// Origin-leg swap ID, hex.
        origin_swap_id: String,
        /// Destination-leg swap ID, hex.
        dest_swap_id: String,
        /// How long the attempt waited for the deputy.
        waited_secs: u64,
    },

    /// The destination chain rejected the claim-swap tx.
    #[error("{direction} {asset} swap: claim of {dest_swap_id} rejected: {reason}")]
    ClaimRejected {
        /// Swap direction of the failed attempt.
        direction: SwapDirection,
        /// Asset symbol.
        asset: String,
        /// Destination-leg swap ID, hex.
        dest_swap_id: String,
        /// Underlying adapter error, verbatim.
        reason: String,
    },

    /// Claim was accepted by the node but not confirmed within the bound.
    /// The claim may still succeed later; callers must treat the outcome
    /// as unknown, not as a failed claim.
    #[error(
        "{direction} {asset} swap: claim tx {tx_hash} unconfirmed after \
         {timeout_secs}s; the claim may still succeed"
    )]
    ConfirmationTimeout {
        /// Swap direction of the attempt.
        direction: SwapDirection,
        /// Asset symbol.
        asset: String,
        /// Claim transaction hash, hex.
        tx_hash: String,
        /// Confirmation bound that elapsed.
        timeout_secs: u64,
    },

    /// Transport-level failure talking to a chain node.
    #[error("transport error: {0}")]
    Transport(String),

    /// The chain's node rejected a submitted transaction.
    #[error("transaction rejected: {0}")]
    TxRejected(String),

    /// Transaction status not available within the query bound.
    #[error("tx {0} not confirmed within bound")]
    TxStatusTimeout(String),

    /// Address is not valid bech32.
    #[error("invalid bech32 address {address}: {reason}")]
    InvalidAddress {
        /// The offending address string.
        address: String,
        /// Decoder error, verbatim.
        reason: String,
    },

    /// The relayed swap's commitment hash differs from the one committed
    /// locally. Both legs must recompute the hash bit-exactly.
    #[error("commitment hash mismatch for swap {swap_id}")]
    CommitmentMismatch {
        /// Swap ID whose record mismatched, hex.
        swap_id: String,
    },

    /// Chain assigned a different swap ID than the one derived locally.
    #[error("relayed swap mismatch: expected {expected}, chain assigned {got}")]
    RelayedIdMismatch {
        /// Locally derived swap ID, hex.
        expected: String,
        /// Chain-assigned swap ID, hex.
        got: String,
    },

    /// Origin and destination legs derived to the same identifier.
    #[error("swap ID collision between legs: {0}")]
    SwapIdCollision(String),

    /// Swap exists on chain but is no longer claimable.
    #[error("swap is not claimable: {0}")]
    NotClaimable(String),

    /// Invalid swap attempt state transition.
    #[error("invalid attempt transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: String,
        /// Attempted state.
        to: String,
    },

    /// Amount does not fit the chain's smallest-unit range.
    #[error("amount out of range: {0}")]
    InvalidAmount(String),

    /// One or more deputy hot-wallet transfers failed. Remaining transfers
    /// were still attempted; each failure is listed as "symbol: reason".
    #[error("deputy load failed for {} of {total} assets: {failures:?}", failures.len())]
    DeputyLoadFailed {
        /// Number of assets the loader attempted.
        total: usize,
        /// Per-asset failures, "symbol: reason".
        failures: Vec<String>,
    },
}
