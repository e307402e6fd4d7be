//! # Algorithms Module
//!
//! Pure computation: secret generation, commitment hashing, and swap-ID
//! derivation. Everything here must stay bit-exact with the chains' own
//! verification or claims will always fail.

pub mod secret;
pub mod swap_id;

pub use secret::{generate_secret, random_number_hash, verify_commitment};
pub use swap_id::{decode_bech32_address, derive_swap_id, encode_bech32_address, swap_id_pair};
