//! Simulated Deputy Relayer
//!
//! Mirrors open escrows from one simulated chain to the other, assigning
//! the destination-leg ID with the operand order swapped. Stands in for
//! the out-of-band deputy during integration tests and local runs.

use super::sim_chain::{EscrowSnapshot, SimChain};
use crate::algorithms::derive_swap_id;
use crate::domain::{SwapError, SwapStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// One-directional relay between two simulated chains.
pub struct SimDeputy {
    origin: Arc<SimChain>,
    dest: Arc<SimChain>,
}

impl SimDeputy {
    /// Watch `origin` and mirror its open escrows onto `dest`.
    pub fn new(origin: Arc<SimChain>, dest: Arc<SimChain>) -> Self {
        Self { origin, dest }
    }

    /// Relay every open escrow not yet mirrored. Returns how many were
    /// relayed this pass.
    pub fn run_once(&self) -> Result<usize, SwapError> {
        let mut relayed = 0;

        for snapshot in self.origin.snapshots() {
            if snapshot.status != SwapStatus::Open {
                continue;
            }

            // Destination leg: operand order swaps relative to the origin.
            let dest_id = derive_swap_id(
                &snapshot.random_number_hash,
                &snapshot.sender_other_chain,
                &snapshot.sender,
            )?;
            if self.dest.has_swap(dest_id) {
                continue;
            }

            let mirrored = EscrowSnapshot {
                swap_id: dest_id,
                random_number_hash: snapshot.random_number_hash,
                sender: snapshot.sender_other_chain.clone(),
                recipient: snapshot.recipient_other_chain.clone(),
                sender_other_chain: snapshot.sender.clone(),
                recipient_other_chain: snapshot.recipient.clone(),
                amount: snapshot.amount,
                denom: snapshot.denom.clone(),
                timestamp: snapshot.timestamp,
                height_span: snapshot.height_span,
                status: SwapStatus::Open,
            };

            if self.dest.install_escrow(mirrored) {
                info!(
                    from = %self.origin.name(),
                    to = %self.dest.name(),
                    dest_swap_id = %hex::encode(dest_id),
                    "deputy relayed swap"
                );
                relayed += 1;
            }
        }

        Ok(relayed)
    }

    /// Spawn the deputy as a background task relaying every `interval`.
    pub fn spawn(self, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                if let Err(e) = self.run_once() {
                    warn!(error = %e, "deputy relay pass failed");
                }
                tokio::time::sleep(interval).await;
            }
        })
    }
}
