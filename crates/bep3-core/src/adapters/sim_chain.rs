//! Simulated Chain Adapter
//!
//! In-memory HTLC ledger implementing the [`ChainAdapter`] port. Assigns
//! swap IDs exactly as a real chain would and verifies the revealed secret
//! against the stored commitment hash on claim, so orchestration bugs
//! (wrong operand order, regenerated commitment hashes) fail here the same
//! way they would fail on chain.

use crate::algorithms::{derive_swap_id, verify_commitment};
use crate::domain::{Hash, Secret, SwapError, SwapId, SwapParams, SwapStatus, TxHash};
use crate::ports::outbound::{ChainAdapter, SwapRecord, TxStatus};
use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Full snapshot of one simulated escrow, consumed by the deputy when
/// mirroring it to the other chain.
#[derive(Clone, Debug)]
pub struct EscrowSnapshot {
    /// Chain-assigned swap ID.
    pub swap_id: SwapId,
    /// Commitment hash the escrow is locked to.
    pub random_number_hash: Hash,
    /// Escrow creator on this chain.
    pub sender: String,
    /// Escrow recipient on this chain.
    pub recipient: String,
    /// Creator's counterpart address on the other chain.
    pub sender_other_chain: String,
    /// Recipient's counterpart address on the other chain.
    pub recipient_other_chain: String,
    /// Escrowed amount.
    pub amount: u64,
    /// Denomination.
    pub denom: String,
    /// Commitment timestamp, unix seconds.
    pub timestamp: u64,
    /// Liveness window in blocks.
    pub height_span: u64,
    /// Current escrow state.
    pub status: SwapStatus,
}

#[derive(Default)]
struct SimState {
    swaps: HashMap<SwapId, EscrowSnapshot>,
    tx_logs: HashMap<TxHash, String>,
    transfers: Vec<(String, u64, String)>,
}

/// In-memory simulated chain.
pub struct SimChain {
    name: String,
    address: String,
    state: RwLock<SimState>,
}

impl SimChain {
    /// Create a simulated chain with a moniker for logs and the local
    /// wallet's address.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            state: RwLock::new(SimState::default()),
        }
    }

    /// Chain moniker.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an escrow with this ID exists.
    pub fn has_swap(&self, swap_id: SwapId) -> bool {
        self.state.read().swaps.contains_key(&swap_id)
    }

    /// Snapshot every escrow on this chain.
    pub fn snapshots(&self) -> Vec<EscrowSnapshot> {
        self.state.read().swaps.values().cloned().collect()
    }

    /// Install an escrow mirrored from the other chain. Returns `false`
    /// if the ID already exists (relay is idempotent).
    pub fn install_escrow(&self, snapshot: EscrowSnapshot) -> bool {
        let mut state = self.state.write();
        if state.swaps.contains_key(&snapshot.swap_id) {
            return false;
        }
        debug!(
            chain = %self.name,
            swap_id = %hex::encode(snapshot.swap_id),
            "escrow installed by relay"
        );
        state.swaps.insert(snapshot.swap_id, snapshot);
        true
    }

    /// All transfers received, as `(to, amount, denom)`.
    pub fn recorded_transfers(&self) -> Vec<(String, u64, String)> {
        self.state.read().transfers.clone()
    }

    fn record_tx(state: &mut SimState, tag: &str, payload: &[u8], raw_log: String) -> TxHash {
        let mut hasher = Sha256::new();
        hasher.update(tag.as_bytes());
        hasher.update(payload);
        let tx_hash: TxHash = hasher.finalize().into();
        state.tx_logs.insert(tx_hash, raw_log);
        tx_hash
    }
}

#[async_trait]
impl ChainAdapter for SimChain {
    fn address(&self) -> &str {
        &self.address
    }

    async fn create_swap(&self, params: &SwapParams) -> Result<TxHash, SwapError> {
        let swap_id = derive_swap_id(
            &params.random_number_hash,
            &params.sender,
            &params.sender_other_chain,
        )?;

        let mut state = self.state.write();
        if state.swaps.contains_key(&swap_id) {
            return Err(SwapError::TxRejected(format!(
                "swap {} already exists",
                hex::encode(swap_id)
            )));
        }

        debug!(
            chain = %self.name,
            swap_id = %hex::encode(swap_id),
            amount = params.amount,
            denom = %params.denom,
            "escrow created"
        );

        state.swaps.insert(
            swap_id,
            EscrowSnapshot {
                swap_id,
                random_number_hash: params.random_number_hash,
                sender: params.sender.clone(),
                recipient: params.recipient.clone(),
                sender_other_chain: params.sender_other_chain.clone(),
                recipient_other_chain: params.recipient_other_chain.clone(),
                amount: params.amount,
                denom: params.denom.clone(),
                timestamp: params.timestamp,
                height_span: params.height_span,
                status: SwapStatus::Open,
            },
        );

        Ok(Self::record_tx(
            &mut state,
            "create",
            &swap_id,
            format!("create swap {}", hex::encode(swap_id)),
        ))
    }

    async fn claim_swap(&self, swap_id: SwapId, secret: Secret) -> Result<TxHash, SwapError> {
        let mut state = self.state.write();
        let swap = state.swaps.get_mut(&swap_id).ok_or_else(|| {
            SwapError::TxRejected(format!("swap {} not found", hex::encode(swap_id)))
        })?;

        if swap.status != SwapStatus::Open {
            return Err(SwapError::TxRejected(format!(
                "swap {} is {:?}, not open",
                hex::encode(swap_id),
                swap.status
            )));
        }
        if !verify_commitment(&secret, swap.timestamp, &swap.random_number_hash) {
            return Err(SwapError::TxRejected(format!(
                "secret does not match commitment of swap {}",
                hex::encode(swap_id)
            )));
        }

        swap.status = SwapStatus::Completed;
        debug!(
            chain = %self.name,
            swap_id = %hex::encode(swap_id),
            "escrow claimed"
        );

        Ok(Self::record_tx(
            &mut state,
            "claim",
            &swap_id,
            format!("claim swap {}", hex::encode(swap_id)),
        ))
    }

    async fn query_swap(&self, swap_id: SwapId) -> Result<Option<SwapRecord>, SwapError> {
        let state = self.state.read();
        Ok(state.swaps.get(&swap_id).map(|swap| SwapRecord {
            swap_id: swap.swap_id,
            random_number_hash: swap.random_number_hash,
            sender: swap.sender.clone(),
            recipient: swap.recipient.clone(),
            amount: swap.amount,
            denom: swap.denom.clone(),
            status: swap.status,
        }))
    }

    async fn transfer(&self, to: &str, amount: u64, denom: &str) -> Result<TxHash, SwapError> {
        let mut state = self.state.write();
        state
            .transfers
            .push((to.to_string(), amount, denom.to_string()));

        debug!(chain = %self.name, to, amount, denom, "transfer");

        Ok(Self::record_tx(
            &mut state,
            "transfer",
            format!("{to}/{amount}/{denom}").as_bytes(),
            format!("transfer {amount}{denom} to {to}"),
        ))
    }

    async fn check_tx_status(
        &self,
        tx_hash: TxHash,
        timeout: Duration,
    ) -> Result<TxStatus, SwapError> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(raw_log) = self.state.read().tx_logs.get(&tx_hash) {
                return Ok(TxStatus {
                    confirmed: true,
                    raw_log: raw_log.clone(),
                });
            }
            if Instant::now() >= deadline {
                return Err(SwapError::TxStatusTimeout(hex::encode(tx_hash)));
            }
            tokio::time::sleep(STATUS_POLL_INTERVAL).await;
        }
    }
}
