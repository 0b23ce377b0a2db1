// Path: crates/crypto/src/error.rs
//! Local error types for the `evm-mapping-crypto` crate.

// Re-export the canonical error type from the types crate.
pub use evm_mapping_types::error::CryptoError;
