// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # EVM Account Mapping Types
//!
//! This crate is the foundational library for the EVM account mapping SDK,
//! containing the core data structures, error types, and configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `evm-mapping-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This structure prevents
//! circular dependencies and provides a stable, canonical definition for shared
//! types like `MappingAccount`, `SubstrateCallDescriptor`, `TypedDataPayload`,
//! and the various error enums.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::CoreError> = std::result::Result<T, E>;

/// Core application-level data structures like `MappingAccount` and `TypedDataPayload`.
pub mod app;
/// The canonical SCALE codec helpers used for on-chain values.
pub mod codec;
/// Shared configuration structures.
pub mod config;
/// A unified set of all error types used across the SDK.
pub mod error;
/// Well-known pallet, constant, and storage names of the account mapping pallet.
pub mod keys;
