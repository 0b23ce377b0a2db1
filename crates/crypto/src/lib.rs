// Path: crates/crypto/src/lib.rs
//! # EVM Account Mapping Crypto Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]
//! # EVM Account Mapping Cryptography
//!
//! The primitives behind the account mapping: BLAKE2b and Keccak hashing,
//! the SS58 address codec, secp256k1 public-key recovery and compression,
//! and EIP-712 signing digests.

pub mod address;
pub mod algorithms;
pub mod error;
pub mod sign;
