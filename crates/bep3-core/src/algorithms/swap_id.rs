//! # Swap-ID Derivation
//!
//! Each chain leg gets a deterministic identifier:
//!
//! ```text
//! SwapID = SHA256(randomNumberHash || senderBytes || lowercase(senderOtherChain))
//! ```
//!
//! The local sender enters as its decoded bech32 payload (canonical binary
//! form); the other chain's sender enters as its lowercased display string.
//! Hashing the display form of the local sender instead silently desyncs
//! the two legs' notion of the ID.
//!
//! The derivation runs twice per swap with the operands swapped, so the
//! two escrows sharing one commitment hash can never collide on an ID.

use crate::domain::{Hash, SwapError, SwapId, SwapIdPair};
use bech32::{FromBase32, ToBase32, Variant};
use sha2::{Digest, Sha256};

/// Decode a bech32 address into its canonical payload bytes.
pub fn decode_bech32_address(address: &str) -> Result<Vec<u8>, SwapError> {
    let (_hrp, data, _variant) =
        bech32::decode(address).map_err(|e| SwapError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

    Vec::<u8>::from_base32(&data).map_err(|e| SwapError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Encode payload bytes as a bech32 address with the given prefix.
pub fn encode_bech32_address(prefix: &str, payload: &[u8]) -> Result<String, SwapError> {
    bech32::encode(prefix, payload.to_base32(), Variant::Bech32).map_err(|e| {
        SwapError::InvalidAddress {
            address: format!("{prefix}1..."),
            reason: e.to_string(),
        }
    })
}

/// Derive the swap ID one chain assigns to its leg of a swap.
pub fn derive_swap_id(
    random_number_hash: &Hash,
    sender: &str,
    sender_other_chain: &str,
) -> Result<SwapId, SwapError> {
    let sender_bytes = decode_bech32_address(sender)?;

    let mut hasher = Sha256::new();
    hasher.update(random_number_hash);
    hasher.update(&sender_bytes);
    hasher.update(sender_other_chain.to_lowercase().as_bytes());
    Ok(hasher.finalize().into())
}

/// Derive both leg identifiers for one swap attempt.
///
/// `sender` is the escrow creator on the origin chain and
/// `sender_other_chain` is the deputy's address on the destination chain.
/// The destination leg swaps the operand roles.
pub fn swap_id_pair(
    random_number_hash: &Hash,
    sender: &str,
    sender_other_chain: &str,
) -> Result<SwapIdPair, SwapError> {
    Ok(SwapIdPair {
        origin: derive_swap_id(random_number_hash, sender, sender_other_chain)?,
        dest: derive_swap_id(random_number_hash, sender_other_chain, sender)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::secret::random_number_hash;

    const BNB_SENDER: &str = "bnb10rr5f8m73rxgnz9afvnfn7fn9pwhfskem5kn0x";
    const KAVA_DEPUTY: &str = "kava1j9je7f6s0v6k7dmgv6u5k5ru202f5ffsc7af04";

    fn test_hash() -> Hash {
        random_number_hash(&[0x42u8; 32], 1_700_000_000)
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_bech32_address("not-an-address"),
            Err(SwapError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let payload = [0xA7u8; 20];
        let address = encode_bech32_address("kava", &payload).unwrap();
        assert!(address.starts_with("kava1"));
        assert_eq!(decode_bech32_address(&address).unwrap(), payload);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let hash = test_hash();
        let a = derive_swap_id(&hash, BNB_SENDER, KAVA_DEPUTY).unwrap();
        let b = derive_swap_id(&hash, BNB_SENDER, KAVA_DEPUTY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_operand_order_sensitivity() {
        let hash = test_hash();
        let forward = derive_swap_id(&hash, BNB_SENDER, KAVA_DEPUTY).unwrap();
        let reversed = derive_swap_id(&hash, KAVA_DEPUTY, BNB_SENDER).unwrap();
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_hashes_binary_sender_and_lowercased_other() {
        // Independent recomputation of the concatenation layout.
        let hash = test_hash();
        let sender_bytes = decode_bech32_address(BNB_SENDER).unwrap();

        let mut hasher = Sha256::new();
        hasher.update(hash);
        hasher.update(&sender_bytes);
        hasher.update(KAVA_DEPUTY.to_lowercase().as_bytes());
        let expected: SwapId = hasher.finalize().into();

        assert_eq!(
            derive_swap_id(&hash, BNB_SENDER, KAVA_DEPUTY).unwrap(),
            expected
        );
    }

    #[test]
    fn test_other_chain_address_is_case_insensitive() {
        let hash = test_hash();
        let lower = derive_swap_id(&hash, BNB_SENDER, KAVA_DEPUTY).unwrap();
        let upper = derive_swap_id(&hash, BNB_SENDER, &KAVA_DEPUTY.to_uppercase()).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_pair_swaps_operands_between_legs() {
        let hash = test_hash();
        let pair = swap_id_pair(&hash, BNB_SENDER, KAVA_DEPUTY).unwrap();

        assert_eq!(
            pair.origin,
            derive_swap_id(&hash, BNB_SENDER, KAVA_DEPUTY).unwrap()
        );
        assert_eq!(
            pair.dest,
            derive_swap_id(&hash, KAVA_DEPUTY, BNB_SENDER).unwrap()
        );
        assert_ne!(pair.origin, pair.dest);
    }

    #[test]
    fn test_commitment_hash_changes_both_legs() {
        let pair_a = swap_id_pair(&test_hash(), BNB_SENDER, KAVA_DEPUTY).unwrap();
        let other_hash = random_number_hash(&[0x42u8; 32], 1_700_000_001);
        let pair_b = swap_id_pair(&other_hash, BNB_SENDER, KAVA_DEPUTY).unwrap();

        assert_ne!(pair_a.origin, pair_b.origin);
        assert_ne!(pair_a.dest, pair_b.dest);
    }
}
