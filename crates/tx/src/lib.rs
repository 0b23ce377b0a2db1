// Path: crates/tx/src/lib.rs
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

//! # EVM Account Mapping
//!
//! Lets the holder of an EVM wallet derive the native-chain account mapped
//! to their key and dispatch native-chain calls authorized by an EIP-712
//! signature.
//!
//! The flow is: [`mapping::get_mapping_account`] recovers the wallet's public
//! key and derives its SS58 address; [`system::nonce::build_call_descriptor`]
//! binds a call to the account's mapping nonce; [`eip712::build_call_payload`]
//! wraps it for `eth_signTypedData_v4`; and [`submit::TransactionSubmitter`]
//! submits the signed meta-call and settles it through [`submit::status`].

pub mod eip712;
pub mod mapping;
pub mod submit;
pub mod system;

pub use mapping::{derive_compressed_pubkey, derive_mapped_address, get_mapping_account};
pub use submit::TransactionSubmitter;
