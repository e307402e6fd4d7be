//! # Outbound Ports
//!
//! The chain adapter contract the orchestrator consumes, one
//! implementation per chain, plus a mock for sequencing tests.

use crate::domain::{Hash, Secret, SwapError, SwapId, SwapParams, SwapStatus, TxHash};
use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Chain-side record of an escrow, as returned by `query_swap`.
#[derive(Clone, Debug)]
pub struct SwapRecord {
    /// Swap ID assigned by the chain.
    pub swap_id: SwapId,
    /// Commitment hash the escrow is locked to.
    pub random_number_hash: Hash,
    /// Escrow creator on that chain, bech32.
    pub sender: String,
    /// Escrow recipient on that chain, bech32.
    pub recipient: String,
    /// Escrowed amount in the chain's smallest unit.
    pub amount: u64,
    /// Chain denomination.
    pub denom: String,
    /// Current escrow state.
    pub status: SwapStatus,
}

/// Result of a transaction status query.
#[derive(Clone, Debug)]
pub struct TxStatus {
    /// Whether the transaction is confirmed in a block.
    pub confirmed: bool,
    /// Raw log attached to the transaction result.
    pub raw_log: String,
}

/// External chain client - outbound port. One instance per chain.
///
/// Adapters never retry a submission on their own: the commitment hash is
/// caller-controlled and must not be regenerated on a retry. The signing
/// identity behind an adapter must not receive concurrent mutating calls
/// without external sequencing, since chains require strictly increasing
/// sequence numbers per signer.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Address of the signing identity on this chain, bech32.
    /// The credentials themselves stay opaque behind the adapter.
    fn address(&self) -> &str;

    /// Submit an HTLC-create transaction.
    async fn create_swap(&self, params: &SwapParams) -> Result<TxHash, SwapError>;

    /// Submit a claim revealing the secret for an open escrow.
    async fn claim_swap(&self, swap_id: SwapId, secret: Secret) -> Result<TxHash, SwapError>;

    /// Query an escrow by its chain-assigned ID.
    async fn query_swap(&self, swap_id: SwapId) -> Result<Option<SwapRecord>, SwapError>;

    /// Transfer funds to an address. Used by the deputy loader only.
    async fn transfer(&self, to: &str, amount: u64, denom: &str) -> Result<TxHash, SwapError>;

    /// Wait for a transaction to confirm, bounded by `timeout`.
    /// Fails with [`SwapError::TxStatusTimeout`] once the bound elapses.
    async fn check_tx_status(&self, tx_hash: TxHash, timeout: Duration)
        -> Result<TxStatus, SwapError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Mock chain adapter recording every call, with injectable failures.
///
/// `set_relay_source` makes `query_swap` answer with a record mirrored from
/// another mock's last create-swap, standing in for the deputy.
#[derive(Default)]
pub struct MockChainAdapter {
    address: String,
    fail_create: AtomicBool,
    fail_claim: AtomicBool,
    fail_status: AtomicBool,
    unconfirmed: AtomicBool,
    fail_transfer_denoms: RwLock<HashSet<String>>,
    relay_source: RwLock<Option<Arc<MockChainAdapter>>>,
    relayed_id: RwLock<Option<SwapId>>,
    relayed_hash: RwLock<Option<Hash>>,
    relayed_status: RwLock<Option<SwapStatus>>,
    created: RwLock<Vec<SwapParams>>,
    claims: RwLock<Vec<(SwapId, Secret)>>,
    transfers: RwLock<Vec<(String, u64, String)>>,
    query_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl MockChainAdapter {
    /// Create a mock with the given signing address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Make every `create_swap` fail with a transport error.
    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Make every `claim_swap` fail with a transport error.
    pub fn set_fail_claim(&self, fail: bool) {
        self.fail_claim.store(fail, Ordering::SeqCst);
    }

    /// Make transfers of the given denom fail.
    pub fn fail_transfers_for(&self, denom: impl Into<String>) {
        self.fail_transfer_denoms.write().insert(denom.into());
    }

    /// Answer queries by mirroring `source`'s last created swap.
    pub fn set_relay_source(&self, source: Arc<MockChainAdapter>) {
        *self.relay_source.write() = Some(source);
    }

    /// Make the relayed record carry this chain-assigned ID instead of
    /// echoing the queried one.
    pub fn set_relayed_id(&self, swap_id: SwapId) {
        *self.relayed_id.write() = Some(swap_id);
    }

    /// Make the relayed record carry this commitment hash instead of the
    /// one from the mirrored create-swap.
    pub fn set_relayed_hash(&self, hash: Hash) {
        *self.relayed_hash.write() = Some(hash);
    }

    /// Make the relayed record report this escrow status instead of open.
    pub fn set_relayed_status(&self, status: SwapStatus) {
        *self.relayed_status.write() = Some(status);
    }

    /// Make every `check_tx_status` fail with a status timeout.
    pub fn set_status_timeout(&self, fail: bool) {
        self.fail_status.store(fail, Ordering::SeqCst);
    }

    /// Make `check_tx_status` report the transaction as still pending.
    pub fn set_unconfirmed(&self, unconfirmed: bool) {
        self.unconfirmed.store(unconfirmed, Ordering::SeqCst);
    }

    /// Number of create-swap calls received.
    pub fn create_count(&self) -> usize {
        self.created.read().len()
    }

    /// Number of claim calls received.
    pub fn claim_count(&self) -> usize {
        self.claims.read().len()
    }

    /// Number of query calls received.
    pub fn query_count(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Number of transfer calls received.
    pub fn transfer_count(&self) -> usize {
        self.transfers.read().len()
    }

    /// Number of tx status calls received.
    pub fn status_count(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// Parameters of the last create-swap, if any.
    pub fn last_created(&self) -> Option<SwapParams> {
        self.created.read().last().cloned()
    }

    /// All recorded claims.
    pub fn recorded_claims(&self) -> Vec<(SwapId, Secret)> {
        self.claims.read().clone()
    }

    /// All recorded transfers as `(to, amount, denom)`.
    pub fn recorded_transfers(&self) -> Vec<(String, u64, String)> {
        self.transfers.read().clone()
    }
}

fn mock_tx_hash(tag: &str, payload: &[u8]) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(tag.as_bytes());
    hasher.update(payload);
    hasher.finalize().into()
}

#[async_trait]
impl ChainAdapter for MockChainAdapter {
    fn address(&self) -> &str {
        &self.address
    }

    async fn create_swap(&self, params: &SwapParams) -> Result<TxHash, SwapError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(SwapError::Transport("injected create failure".to_string()));
        }
        self.created.write().push(params.clone());
        Ok(mock_tx_hash("create", &params.random_number_hash))
    }

    async fn claim_swap(&self, swap_id: SwapId, secret: Secret) -> Result<TxHash, SwapError> {
        if self.fail_claim.load(Ordering::SeqCst) {
            return Err(SwapError::Transport("injected claim failure".to_string()));
        }
        self.claims.write().push((swap_id, secret));
        Ok(mock_tx_hash("claim", &swap_id))
    }

    async fn query_swap(&self, swap_id: SwapId) -> Result<Option<SwapRecord>, SwapError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);

        let source = self.relay_source.read().clone();
        let Some(source) = source else {
            return Ok(None);
        };
        let Some(params) = source.last_created() else {
            return Ok(None);
        };

        Ok(Some(SwapRecord {
            swap_id: (*self.relayed_id.read()).unwrap_or(swap_id),
            random_number_hash: (*self.relayed_hash.read())
                .unwrap_or(params.random_number_hash),
            sender: params.sender_other_chain.clone(),
            recipient: params.recipient_other_chain.clone(),
            amount: params.amount,
            denom: params.denom.clone(),
            status: (*self.relayed_status.read()).unwrap_or(SwapStatus::Open),
        }))
    }

    async fn transfer(&self, to: &str, amount: u64, denom: &str) -> Result<TxHash, SwapError> {
        if self.fail_transfer_denoms.read().contains(denom) {
            return Err(SwapError::Transport(format!(
                "injected transfer failure for {denom}"
            )));
        }
        self.transfers
            .write()
            .push((to.to_string(), amount, denom.to_string()));
        Ok(mock_tx_hash("transfer", denom.as_bytes()))
    }

    async fn check_tx_status(
        &self,
        tx_hash: TxHash,
        _timeout: Duration,
    ) -> Result<TxStatus, SwapError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(SwapError::TxStatusTimeout(hex::encode(tx_hash)));
        }
        let confirmed = !self.unconfirmed.load(Ordering::SeqCst);
        Ok(TxStatus {
            confirmed,
            raw_log: if confirmed { "mock: confirmed" } else { "mock: pending" }.to_string(),
        })
    }
}
