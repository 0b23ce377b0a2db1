// Path: crates/crypto/src/sign/mod.rs
//! Signature schemes used by EVM wallets.

/// secp256k1 recovery, key compression, and EVM address derivation.
pub mod ecdsa;
/// EIP-712 structured-data signing digests.
pub mod eip712;
