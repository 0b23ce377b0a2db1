// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Hash functions used by the account mapping.
//!
//! BLAKE2b-256 derives native account ids from compressed public keys;
//! Keccak-256 derives EVM addresses and EIP-191/712 digests.

use alloy_primitives::B256;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

/// BLAKE2b-256 of any byte-like value.
pub fn blake2_256<T: AsRef<[u8]>>(data: T) -> [u8; 32] {
    Blake2b256::digest(data.as_ref()).into()
}

/// Keccak-256 of any byte-like value.
pub fn keccak256<T: AsRef<[u8]>>(data: T) -> B256 {
    alloy_primitives::keccak256(data)
}
