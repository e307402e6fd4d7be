//! # Ports Module
//!
//! Hexagonal architecture ports (inbound API, outbound chain adapters).

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
