//! # BEP3 Swap Runner
//!
//! Wires the orchestrator to two simulated chains bridged by a simulated
//! deputy, loads the deputy hot wallets, then runs one swap in each
//! direction. Serves as both a smoke test and a worked example of the
//! full lifecycle.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load configuration (defaults + environment overrides)
//! 3. Bring up both simulated chains and the two deputy relay tasks
//! 4. Load the deputy hot wallets on both chains
//! 5. Run one incoming and one outgoing swap

mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use bep3_core::adapters::{SimChain, SimDeputy};
use bep3_core::{ChainSide, SwapApi, SwapDirection, SwapService};

use crate::config::{load_config, RunnerConfig};

/// Relay interval and wait used for local simulated runs; the defaults in
/// [`bep3_core::SwapConfig`] are sized for real chains.
const SIM_RELAY_WAIT: Duration = Duration::from_secs(2);
const SIM_RELAY_INTERVAL: Duration = Duration::from_millis(500);
const SIM_LOAD_DELAY: Duration = Duration::from_millis(200);

fn simulated_timing(config: &mut RunnerConfig) {
    if std::env::var("BEP3_RELAY_WAIT_SECS").is_err() {
        config.swap.relay_wait = SIM_RELAY_WAIT;
    }
    if std::env::var("BEP3_RELAY_INTERVAL_SECS").is_err() {
        config.deputy_relay_interval = SIM_RELAY_INTERVAL;
    }
    config.swap.home_load_delay = SIM_LOAD_DELAY;
    config.swap.foreign_load_delay = SIM_LOAD_DELAY;
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = load_config();
    config.validate().context("invalid configuration")?;
    simulated_timing(&mut config);
    info!(
        assets = config.assets.len(),
        relay_wait_secs = config.swap.relay_wait.as_secs(),
        "starting BEP3 swap runner"
    );

    // Simulated chains stand in for the configured RPC endpoints; the
    // deputy tasks mirror open escrows in both directions.
    info!(
        home = %config.home_endpoint,
        foreign = %config.foreign_endpoint,
        "running against simulated chains in place of the configured endpoints"
    );
    let home = Arc::new(SimChain::new("kava", &config.home_wallet));
    let foreign = Arc::new(SimChain::new("bnb", &config.foreign_wallet));
    let _relay_in = SimDeputy::new(foreign.clone(), home.clone()).spawn(config.deputy_relay_interval);
    let _relay_out = SimDeputy::new(home.clone(), foreign.clone()).spawn(config.deputy_relay_interval);

    let service = SwapService::new(
        home.clone(),
        foreign.clone(),
        config.assets.clone(),
        config.swap.clone(),
    );

    // Pre-fund the deputy hot wallets on both chains. Failures here are
    // reported but do not abort the run; swaps against an unfunded deputy
    // will fail on their own with a clearer error.
    for side in [ChainSide::Home, ChainSide::Foreign] {
        match service.load_deputies(side, config.deputy_load_amount).await {
            Ok(txs) => info!(%side, transfers = txs.len(), "deputy hot wallets loaded"),
            Err(e) => warn!(%side, error = %e, "deputy loading incomplete"),
        }
    }

    let incoming = service
        .execute_swap(SwapDirection::Incoming, "busd", 10_200_005)
        .await
        .context("incoming busd swap failed")?;
    info!(
        origin_swap_id = %hex::encode(incoming.origin_swap_id),
        dest_swap_id = %hex::encode(incoming.dest_swap_id),
        "incoming swap completed"
    );

    let outgoing = service
        .execute_swap(SwapDirection::Outgoing, "busd", 500_005)
        .await
        .context("outgoing busd swap failed")?;
    info!(
        origin_swap_id = %hex::encode(outgoing.origin_swap_id),
        dest_swap_id = %hex::encode(outgoing.dest_swap_id),
        "outgoing swap completed"
    );

    info!("runner finished");
    Ok(())
}
