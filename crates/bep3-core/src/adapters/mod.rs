//! # Adapters Layer (Hexagonal Architecture)
//!
//! Outbound-port implementations: an in-memory simulated chain and the
//! deputy that mirrors escrows between two of them.

mod sim_chain;
mod sim_deputy;

pub use sim_chain::{EscrowSnapshot, SimChain};
pub use sim_deputy::SimDeputy;
