//! Swap Orchestration Service - Core business logic
//!
//! Drives one swap attempt through the lifecycle state machine:
//! create on the origin chain, wait out the bounded deputy relay window,
//! verify the relayed escrow, claim on the destination chain. Also hosts
//! the one-shot deputy hot-wallet loader, which shares the chain adapter
//! port but is not part of the swap lifecycle.
//!
//! Nothing here retries a create or claim: resubmitting with the same
//! timestamp would be rejected, and regenerating the commitment hash would
//! silently diverge the two legs. A failed attempt is terminal; callers
//! start a fresh attempt instead.

use crate::algorithms::{generate_secret, random_number_hash, swap_id_pair};
use crate::domain::{
    invariant_commitment_match, invariant_distinct_legs, invariant_relayed_id_match, AssetInfo,
    AssetRegistry, AttemptState, ChainSide, SwapAttempt, SwapDirection, SwapError, SwapOutcome,
    SwapParams, SwapStatus, TxHash,
};
use crate::ports::inbound::SwapApi;
use crate::ports::outbound::ChainAdapter;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Timing and liveness configuration for the orchestrator.
///
/// The relay wait is deliberately a single coarse, bounded delay rather
/// than a poll loop: the deputy's timing is outside this system's control.
#[derive(Clone, Debug)]
pub struct SwapConfig {
    /// How long to wait for the deputy to witness and relay a swap.
    pub relay_wait: Duration,
    /// Bound on the claim confirmation poll.
    pub confirm_timeout: Duration,
    /// Escrow liveness window, in blocks, for incoming swaps.
    pub incoming_height_span: u64,
    /// Escrow liveness window, in blocks, for outgoing swaps.
    pub outgoing_height_span: u64,
    /// Delay between deputy loader transfers on the home chain,
    /// respecting block-time and sequence-number constraints.
    pub home_load_delay: Duration,
    /// Delay between deputy loader transfers on the foreign chain.
    pub foreign_load_delay: Duration,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            relay_wait: Duration::from_secs(45),
            confirm_timeout: Duration::from_secs(15),
            incoming_height_span: 10_001,
            outgoing_height_span: 250,
            home_load_delay: Duration::from_secs(7),
            foreign_load_delay: Duration::from_secs(2),
        }
    }
}

/// The swap orchestrator.
///
/// Holds one adapter per chain, constructed once and passed in - there is
/// no ambient client state. The service itself is shareable, but two
/// concurrent attempts mutating through the same signing identity need an
/// external serialization point (see [`ChainAdapter`]).
pub struct SwapService {
    home: Arc<dyn ChainAdapter>,
    foreign: Arc<dyn ChainAdapter>,
    assets: AssetRegistry,
    config: SwapConfig,
}

/// Per-direction wiring of adapters and address roles.
struct LegPlan<'a> {
    origin: &'a Arc<dyn ChainAdapter>,
    dest: &'a Arc<dyn ChainAdapter>,
    sender: String,
    recipient: String,
    sender_other_chain: String,
    recipient_other_chain: String,
    denom: String,
    height_span: u64,
}

impl SwapService {
    /// Create a service over the two chain adapters.
    pub fn new(
        home: Arc<dyn ChainAdapter>,
        foreign: Arc<dyn ChainAdapter>,
        assets: AssetRegistry,
        config: SwapConfig,
    ) -> Self {
        Self {
            home,
            foreign,
            assets,
            config,
        }
    }

    fn adapter(&self, side: ChainSide) -> &Arc<dyn ChainAdapter> {
        match side {
            ChainSide::Home => &self.home,
            ChainSide::Foreign => &self.foreign,
        }
    }

    /// Resolve adapters and address roles for one direction.
    ///
    /// Incoming: escrow on the foreign chain, sender is the local foreign
    /// wallet, recipient is the foreign deputy; the claim lands at home.
    /// Outgoing mirrors every role.
    fn plan_legs<'a>(&'a self, direction: SwapDirection, asset: &AssetInfo) -> LegPlan<'a> {
        let origin = self.adapter(direction.origin_side());
        let dest = self.adapter(direction.dest_side());

        match direction {
            SwapDirection::Incoming => LegPlan {
                origin,
                dest,
                sender: origin.address().to_string(),
                recipient: asset.origin_deputy_address.clone(),
                sender_other_chain: asset.dest_deputy_address.clone(),
                recipient_other_chain: dest.address().to_string(),
                denom: asset.origin_denom.clone(),
                height_span: self.config.incoming_height_span,
            },
            SwapDirection::Outgoing => LegPlan {
                origin,
                dest,
                sender: origin.address().to_string(),
                recipient: asset.dest_deputy_address.clone(),
                sender_other_chain: asset.origin_deputy_address.clone(),
                recipient_other_chain: dest.address().to_string(),
                denom: asset.dest_denom.clone(),
                height_span: self.config.outgoing_height_span,
            },
        }
    }
}

#[async_trait]
impl SwapApi for SwapService {
    async fn execute_swap(
        &self,
        direction: SwapDirection,
        asset: &str,
        amount: u64,
    ) -> Result<SwapOutcome, SwapError> {
        // Building: registry lookup happens before any network call.
        let asset_info = self.assets.get(asset)?;
        let plan = self.plan_legs(direction, asset_info);

        let (secret, timestamp) = generate_secret();
        let hash = random_number_hash(secret.as_bytes(), timestamp);
        let swap_ids = swap_id_pair(&hash, &plan.sender, &plan.sender_other_chain)?;
        invariant_distinct_legs(&swap_ids)?;

        let mut attempt = SwapAttempt::new(direction, asset, swap_ids);

        // Both expected IDs are logged before anything is submitted, so an
        // operator can verify the legs independently of this process.
        info!(
            attempt = %attempt.id,
            %direction,
            asset,
            amount,
            origin_swap_id = %hex::encode(swap_ids.origin),
            "expected origin-chain swap ID"
        );
        info!(
            attempt = %attempt.id,
            dest_swap_id = %hex::encode(swap_ids.dest),
            "expected destination-chain swap ID"
        );

        let params = SwapParams {
            sender: plan.sender.clone(),
            recipient: plan.recipient.clone(),
            sender_other_chain: plan.sender_other_chain.clone(),
            recipient_other_chain: plan.recipient_other_chain.clone(),
            amount,
            denom: plan.denom.clone(),
            timestamp,
            random_number_hash: hash,
            height_span: plan.height_span,
        };

        let create_tx = match plan.origin.create_swap(&params).await {
            Ok(tx) => tx,
            Err(e) => {
                attempt.fail();
                return Err(SwapError::ChainRejected {
                    direction,
                    asset: asset.to_string(),
                    chain: direction.origin_side(),
                    reason: e.to_string(),
                });
            }
        };
        attempt.transition_to(AttemptState::OriginSubmitted)?;
        info!(
            attempt = %attempt.id,
            create_tx = %hex::encode(create_tx),
            "create swap accepted by origin chain"
        );

        // AwaitingRelay: one bounded, scheduler-yielding wait sized for the
        // deputy's witness-and-relay latency. Not a poll loop.
        attempt.transition_to(AttemptState::AwaitingRelay)?;
        info!(
            attempt = %attempt.id,
            wait_secs = self.config.relay_wait.as_secs(),
            "waiting for deputy to witness and relay the swap"
        );
        tokio::time::sleep(self.config.relay_wait).await;

        // The post-wait check is authoritative: claiming a swap the chain
        // does not have is guaranteed to fail, so a missing record is a
        // hard failure, not a warning.
        let record = plan.dest.query_swap(swap_ids.dest).await?;
        let record = match record {
            Some(record) => record,
            None => {
                attempt.fail();
                return Err(SwapError::RelayTimeout {
                    direction,
                    asset: asset.to_string(),
                    origin_swap_id: hex::encode(swap_ids.origin),
                    dest_swap_id: hex::encode(swap_ids.dest),
                    waited_secs: self.config.relay_wait.as_secs(),
                });
            }
        };

        invariant_relayed_id_match(&swap_ids.dest, &record.swap_id).inspect_err(|_| {
            attempt.fail();
        })?;
        invariant_commitment_match(&secret.reveal(), timestamp, &record.random_number_hash)
            .inspect_err(|_| attempt.fail())?;
        if record.status != SwapStatus::Open {
            attempt.fail();
            return Err(SwapError::NotClaimable(hex::encode(swap_ids.dest)));
        }

        let claim_tx = match plan.dest.claim_swap(swap_ids.dest, secret.reveal()).await {
            Ok(tx) => tx,
            Err(e) => {
                attempt.fail();
                return Err(SwapError::ClaimRejected {
                    direction,
                    asset: asset.to_string(),
                    dest_swap_id: hex::encode(swap_ids.dest),
                    reason: e.to_string(),
                });
            }
        };
        attempt.transition_to(AttemptState::ClaimSubmitted)?;
        info!(
            attempt = %attempt.id,
            claim_tx = %hex::encode(claim_tx),
            "claim submitted on destination chain"
        );

        // The confirmation bound elapsing does not mean the claim failed;
        // the ambiguity is surfaced to the caller as its own error.
        let confirmation_timeout = SwapError::ConfirmationTimeout {
            direction,
            asset: asset.to_string(),
            tx_hash: hex::encode(claim_tx),
            timeout_secs: self.config.confirm_timeout.as_secs(),
        };
        let status = match plan
            .dest
            .check_tx_status(claim_tx, self.config.confirm_timeout)
            .await
        {
            Ok(status) if status.confirmed => status,
            Ok(_) | Err(SwapError::TxStatusTimeout(_)) => {
                attempt.fail();
                return Err(confirmation_timeout);
            }
            Err(e) => {
                attempt.fail();
                return Err(e);
            }
        };

        attempt.transition_to(AttemptState::Completed)?;
        info!(
            attempt = %attempt.id,
            raw_log = %status.raw_log,
            "swap completed"
        );

        Ok(SwapOutcome {
            attempt_id: attempt.id,
            direction,
            asset: asset.to_string(),
            origin_swap_id: swap_ids.origin,
            dest_swap_id: swap_ids.dest,
            create_tx,
            claim_tx,
            raw_log: status.raw_log,
        })
    }

    async fn load_deputies(&self, side: ChainSide, amount: u64) -> Result<Vec<TxHash>, SwapError> {
        let adapter = self.adapter(side);
        let delay = match side {
            ChainSide::Home => self.config.home_load_delay,
            ChainSide::Foreign => self.config.foreign_load_delay,
        };

        let mut tx_hashes = Vec::new();
        let mut failures = Vec::new();

        for (i, (symbol, info)) in self.assets.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(delay).await;
            }

            // Home-chain amounts are in the home chain's smallest unit;
            // foreign transfers take the amount as given.
            let (deputy, denom, scaled) = match side {
                ChainSide::Home => (
                    &info.dest_deputy_address,
                    &info.dest_denom,
                    amount.checked_mul(info.conversion_factor),
                ),
                ChainSide::Foreign => {
                    (&info.origin_deputy_address, &info.origin_denom, Some(amount))
                }
            };
            let Some(scaled) = scaled else {
                warn!(asset = %symbol, "deputy load amount overflows the conversion factor");
                failures.push(format!("{symbol}: amount overflow"));
                continue;
            };

            match adapter.transfer(deputy, scaled, denom).await {
                Ok(tx) => {
                    info!(
                        asset = %symbol,
                        %denom,
                        tx = %hex::encode(tx),
                        "loaded deputy hot wallet"
                    );
                    tx_hashes.push(tx);
                }
                Err(e) => {
                    warn!(asset = %symbol, error = %e, "deputy load transfer failed");
                    failures.push(format!("{symbol}: {e}"));
                }
            }
        }

        if failures.is_empty() {
            Ok(tx_hashes)
        } else {
            Err(SwapError::DeputyLoadFailed {
                total: self.assets.len(),
                failures,
            })
        }
    }

    fn is_asset_supported(&self, symbol: &str) -> bool {
        self.assets.contains(symbol)
    }
}
