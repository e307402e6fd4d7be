//! # BEP3 Swap Test Suite
//!
//! Unified test crate covering the full swap lifecycle across modules.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── swap_flows.rs     # Create / relay / claim, both directions
//!     └── deputy_loader.rs  # Hot-wallet pre-funding flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p bep3-tests
//!
//! # By area
//! cargo test -p bep3-tests integration::swap_flows
//! cargo test -p bep3-tests integration::deputy_loader
//! ```

pub mod integration;
