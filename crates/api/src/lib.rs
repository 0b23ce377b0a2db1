// Path: crates/api/src/lib.rs

//! # EVM Account Mapping API Crate Lints
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
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # EVM Account Mapping API
//!
//! The external collaborators of the SDK, expressed as traits: the chain
//! client, the EVM wallet, and the native-chain signers. The SDK is written
//! against these traits only, so any node client or wallet transport can be
//! plugged in.

/// The chain client trait and the status subscription handle.
pub mod chain;
/// Re-exports all core error types from the central `evm-mapping-types` crate.
pub mod error;
/// Native-chain signers for directly signed submissions.
pub mod signer;
/// The EVM wallet provider trait.
pub mod wallet;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::chain::{ChainApi, StatusStream, StatusSubscription};
    pub use crate::error::{
        ChainError, CoreError, CryptoError, DomainError, ErrorCode, SignAndSendError,
        TransactionError, WalletError,
    };
    pub use crate::signer::{InjectedSigner, NativeKeypair, Signer};
    pub use crate::wallet::WalletProvider;
}
