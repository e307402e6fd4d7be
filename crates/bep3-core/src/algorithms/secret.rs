//! # Secret Generation and Commitment Hashing
//!
//! The secret must come from a CSPRNG: a guessable secret lets an adversary
//! race the legitimate claimant once the escrow exists. The timestamp is
//! folded into the commitment hash so a secret can never be reused across
//! swaps and chains can prune stale commitments.

use crate::domain::{Hash, Secret, SecureSecret};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Generate a fresh 32-byte secret and the unix timestamp it is
/// committed at.
pub fn generate_secret() -> (SecureSecret, u64) {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs();

    (SecureSecret::new(bytes), timestamp)
}

/// Commitment hash: `SHA256(secret || timestamp)` with the timestamp as
/// 8 big-endian bytes, matching the chains' HTLC verification byte-exactly.
pub fn random_number_hash(secret: &Secret, timestamp: u64) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    hasher.update(timestamp.to_be_bytes());
    hasher.finalize().into()
}

/// Verify that a revealed secret and timestamp reproduce a commitment hash.
pub fn verify_commitment(secret: &Secret, timestamp: u64, expected: &Hash) -> bool {
    random_number_hash(secret, timestamp) == *expected
}
