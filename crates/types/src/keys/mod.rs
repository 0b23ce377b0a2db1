// Path: crates/types/src/keys/mod.rs
//! Defines constants for well-known runtime metadata names.
//!
//! These constants provide a single source of truth for the pallet, constant,
//! storage, and call names of the account mapping pallet. Using these constants
//! prevents typos and ensures the domain builder, the nonce lookup, and the
//! meta-call wrapper all address the same runtime items.

/// The runtime name of the account mapping pallet.
pub const MAPPING_PALLET: &str = "EvmAccountMapping";

/// The pallet constant holding the EIP-712 domain name (SCALE `Vec<u8>`).
pub const EIP712_NAME_CONST: &str = "EIP712Name";
/// The pallet constant holding the EIP-712 domain version (SCALE `Vec<u8>`).
pub const EIP712_VERSION_CONST: &str = "EIP712Version";
/// The pallet constant holding the EIP-712 chain id (SCALE `U256`, little endian).
///
/// Its absence is the capability check for the account mapping protocol.
pub const EIP712_CHAIN_ID_CONST: &str = "EIP712ChainID";
/// The pallet constant holding the EIP-712 verifying contract (SCALE `H160`).
pub const EIP712_VERIFYING_CONTRACT_CONST: &str = "EIP712VerifyingContractAddress";

/// The storage map of meta-call nonces, keyed by `AccountId32`.
pub const ACCOUNT_NONCE_STORAGE: &str = "AccountNonce";

/// The unsigned wrapper call that dispatches an EIP-712 authorized call.
pub const META_CALL: &str = "meta_call";

/// The pallet that emits dispatch outcome events.
pub const SYSTEM_PALLET: &str = "system";
/// The event emitted by the system pallet when an extrinsic fails to dispatch.
pub const EXTRINSIC_FAILED_EVENT: &str = "ExtrinsicFailed";
