// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use evm_mapping_types::error::{
    ChainError, ConfigError, CoreError, CryptoError, DomainError, ErrorCode, SignAndSendError,
    TransactionError, WalletError,
};
pub use evm_mapping_types::Result;
