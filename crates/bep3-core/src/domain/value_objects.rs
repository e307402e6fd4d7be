//! # Domain Value Objects
//!
//! Immutable value types for BEP3 swap orchestration.

use super::errors::SwapId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two chains a swap pair spans, named from the orchestrator's point
/// of view: the home chain is where the local wallet lives, the foreign
/// chain is the other ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainSide {
    /// The chain holding the local signing wallet.
    Home,
    /// The counterparty ledger.
    Foreign,
}

impl ChainSide {
    /// The opposite side.
    pub fn other(&self) -> ChainSide {
        match self {
            ChainSide::Home => ChainSide::Foreign,
            ChainSide::Foreign => ChainSide::Home,
        }
    }
}

impl fmt::Display for ChainSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainSide::Home => f.write_str("home"),
            ChainSide::Foreign => f.write_str("foreign"),
        }
    }
}

/// Direction of a swap relative to the home chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapDirection {
    /// Escrow created on the foreign chain, claim lands on the home chain.
    Incoming,
    /// Escrow created on the home chain, claim lands on the foreign chain.
    Outgoing,
}

impl SwapDirection {
    /// Chain the create-swap transaction is submitted to.
    pub fn origin_side(&self) -> ChainSide {
        match self {
            SwapDirection::Incoming => ChainSide::Foreign,
            SwapDirection::Outgoing => ChainSide::Home,
        }
    }

    /// Chain the claim transaction is submitted to.
    pub fn dest_side(&self) -> ChainSide {
        self.origin_side().other()
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapDirection::Incoming => f.write_str("incoming"),
            SwapDirection::Outgoing => f.write_str("outgoing"),
        }
    }
}

/// Swap attempt state machine.
///
/// The create -> relay-wait -> claim ordering is enforced here rather than
/// by incidental statement order in the orchestrator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptState {
    /// Parameters and swap IDs being computed; nothing on chain yet.
    #[default]
    Building,
    /// Create-swap accepted by the origin chain's submission layer.
    OriginSubmitted,
    /// Waiting out the bounded deputy relay window.
    AwaitingRelay,
    /// Claim submitted on the destination chain.
    ClaimSubmitted,
    /// Claim confirmed; swap done.
    Completed,
    /// Attempt failed; a fresh attempt needs a fresh commitment hash.
    Failed,
}

impl AttemptState {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: AttemptState) -> bool {
        match (self, next) {
            (Self::Building, Self::OriginSubmitted) => true,
            (Self::OriginSubmitted, Self::AwaitingRelay) => true,
            (Self::AwaitingRelay, Self::ClaimSubmitted) => true,
            (Self::ClaimSubmitted, Self::Completed) => true,
            // Any non-terminal state may fail.
            (from, Self::Failed) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Chain-side view of an escrow's state. The orchestrator only observes
/// this through queries; it never owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapStatus {
    /// Escrow live, claimable with the secret.
    Open,
    /// Secret revealed, escrow paid out.
    Completed,
    /// Liveness window elapsed, refundable to the sender.
    Expired,
}

/// The two deterministic identifiers of one swap attempt, one per leg.
///
/// The legs share a commitment hash but never an ID: the sender /
/// sender-other-chain operands swap order between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapIdPair {
    /// ID assigned by the chain the escrow is created on.
    pub origin: SwapId,
    /// ID the destination chain will assign once the deputy relays.
    pub dest: SwapId,
}
