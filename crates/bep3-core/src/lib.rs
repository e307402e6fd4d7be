//! # BEP3 Cross-Chain Swap Core
//!
//! Orchestration of HTLC atomic swaps between two chains bridged by a
//! deputy relayer.
//!
//! ## Purpose
//!
//! Drive both legs of a BEP3 swap without ever holding chain-side state:
//! - Deterministic swap-ID derivation for both chain legs
//! - SHA-256 commitment hashes binding a secret to a timestamp
//! - The create / relay-wait / claim lifecycle for both swap directions
//! - One-shot pre-funding of the deputy's hot wallets
//!
//! ## Trust Model
//!
//! | Party | Role |
//! |-------|------|
//! | Initiator | Generates the secret, creates the origin escrow, claims the destination escrow |
//! | Deputy | Out-of-band relayer mirroring swaps between the chains; only depended upon, never implemented here |
//! | Chains | Provide atomic, final execution of their own HTLC primitives |
//!
//! ## Module Structure
//!
//! ```text
//! bep3-core/
//! ├── domain/          # Asset registry, swap params, attempt state machine, errors
//! ├── algorithms/      # Secret generation, commitment hashes, swap-ID derivation
//! ├── ports/           # SwapApi, ChainAdapter
//! ├── adapters/        # Simulated chain + deputy for local runs
//! └── service.rs       # The swap orchestrator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use algorithms::{
    decode_bech32_address, derive_swap_id, encode_bech32_address, generate_secret,
    random_number_hash, swap_id_pair, verify_commitment,
};
pub use domain::{
    invariant_commitment_match, invariant_distinct_legs, invariant_relayed_id_match, AssetInfo,
    AssetRegistry, AttemptState, ChainSide, Hash, Secret, SecureSecret, SwapAttempt,
    SwapDirection, SwapError, SwapId, SwapIdPair, SwapOutcome, SwapParams, SwapStatus, TxHash,
};
pub use ports::{ChainAdapter, MockChainAdapter, SwapApi, SwapRecord, TxStatus};
pub use service::{SwapConfig, SwapService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
