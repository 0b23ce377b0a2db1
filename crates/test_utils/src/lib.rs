// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # EVM Account Mapping Test Utilities
//!
//! In-memory stand-ins for the SDK's collaborators: a scripted chain that
//! emulates the account mapping pallet, a wallet backed by a local secp256k1
//! key, native dev signers, and shared fixtures.

pub mod assertions;
pub mod chain;
pub mod fixtures;
pub mod randomness;
pub mod signer;
pub mod wallet;

pub use chain::MockChain;
pub use signer::{DevKeypair, MockInjectedSigner};
pub use wallet::LocalWallet;
