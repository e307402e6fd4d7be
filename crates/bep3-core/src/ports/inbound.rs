//! # Inbound Ports
//!
//! API trait defining what the swap orchestrator can do for callers.

use crate::domain::{ChainSide, SwapDirection, SwapError, SwapOutcome, TxHash};
use async_trait::async_trait;

/// Swap orchestration API - inbound port.
#[async_trait]
pub trait SwapApi: Send + Sync {
    /// Drive one swap attempt end-to-end: build parameters, create the
    /// origin escrow, wait out the relay window, and claim on the
    /// destination chain.
    async fn execute_swap(
        &self,
        direction: SwapDirection,
        asset: &str,
        amount: u64,
    ) -> Result<SwapOutcome, SwapError>;

    /// Pre-fund every configured asset's deputy hot wallet on one chain.
    /// Best-effort: failures are collected and reported at the end, they
    /// do not abort the remaining transfers.
    async fn load_deputies(&self, side: ChainSide, amount: u64) -> Result<Vec<TxHash>, SwapError>;

    /// Whether the asset symbol is configured.
    fn is_asset_supported(&self, symbol: &str) -> bool;
}
