// Path: crates/api/src/wallet/mod.rs
//! Defines the `WalletProvider` trait for EVM wallets.

use alloy_primitives::Address;
use async_trait::async_trait;
use evm_mapping_types::app::{EvmSignature, TypedDataPayload};
use evm_mapping_types::error::WalletError;

/// An EVM wallet able to produce recoverable secp256k1 signatures.
///
/// A user declining a prompt must be reported as [`WalletError::Rejected`]
/// with the wallet's reason verbatim, so the SDK can classify cancellations.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Signs `message` with the EIP-191 personal-message scheme
    /// (`personal_sign`).
    async fn sign_message(
        &self,
        account: Address,
        message: &str,
    ) -> Result<EvmSignature, WalletError>;

    /// Signs an EIP-712 payload (`eth_signTypedData_v4`) with `payload.account`.
    async fn sign_typed_data(&self, payload: &TypedDataPayload)
        -> Result<EvmSignature, WalletError>;
}
