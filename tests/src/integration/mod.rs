//! Cross-module integration tests.

pub mod deputy_loader;
pub mod swap_flows;
