// Path: crates/test_utils/src/wallet.rs
//! A wallet provider backed by an in-process secp256k1 key.

use alloy_primitives::Address;
use async_trait::async_trait;
use evm_mapping_api::wallet::WalletProvider;
use evm_mapping_crypto::sign::ecdsa::{eip191_hash, evm_address, sign_prehash};
use evm_mapping_crypto::sign::eip712::typed_data_signing_hash;
use evm_mapping_types::app::{EvmSignature, TypedDataPayload};
use evm_mapping_types::error::{CryptoError, WalletError};
use k256::ecdsa::SigningKey;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// An EVM wallet that signs locally, the way `personal_sign` and
/// `eth_signTypedData_v4` do in a browser wallet.
pub struct LocalWallet {
    key: SigningKey,
    address: Address,
    rejection: Mutex<Option<String>>,
    typed_requests: AtomicUsize,
}

impl LocalWallet {
    /// Creates a wallet for `key`.
    pub fn new(key: SigningKey) -> Result<Self, CryptoError> {
        let address = evm_address(key.verifying_key())?;
        Ok(Self {
            key,
            address,
            rejection: Mutex::new(None),
            typed_requests: AtomicUsize::new(0),
        })
    }

    /// Creates a wallet from a hex-encoded private key.
    pub fn from_hex(private_key: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(private_key.trim_start_matches("0x"))
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Self::new(key)
    }

    /// The EVM address of the wallet's key.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The wallet's signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.key
    }

    /// Makes every following request fail as if the user declined it with `reason`.
    pub fn reject_with(&self, reason: &str) {
        if let Ok(mut rejection) = self.rejection.lock() {
            *rejection = Some(reason.to_string());
        }
    }

    /// Accepts requests again.
    pub fn approve(&self) {
        if let Ok(mut rejection) = self.rejection.lock() {
            *rejection = None;
        }
    }

    /// How many typed-data signing requests reached the wallet.
    pub fn typed_data_requests(&self) -> usize {
        self.typed_requests.load(Ordering::SeqCst)
    }

    fn check_rejection(&self) -> Result<(), WalletError> {
        let rejection = self
            .rejection
            .lock()
            .map_err(|e| WalletError::Provider(e.to_string()))?;
        match rejection.as_ref() {
            Some(reason) => Err(WalletError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletProvider for LocalWallet {
    async fn sign_message(
        &self,
        account: Address,
        message: &str,
    ) -> Result<EvmSignature, WalletError> {
        self.check_rejection()?;
        if account != self.address {
            return Err(WalletError::Provider(format!(
                "unknown account {}",
                account
            )));
        }
        sign_prehash(&self.key, &eip191_hash(message))
            .map_err(|e| WalletError::Provider(e.to_string()))
    }

    async fn sign_typed_data(
        &self,
        payload: &TypedDataPayload,
    ) -> Result<EvmSignature, WalletError> {
        self.typed_requests.fetch_add(1, Ordering::SeqCst);
        self.check_rejection()?;
        if payload.account != self.address {
            return Err(WalletError::Provider(format!(
                "unknown account {}",
                payload.account
            )));
        }
        let digest =
            typed_data_signing_hash(payload).map_err(|e| WalletError::Provider(e.to_string()))?;
        sign_prehash(&self.key, &digest).map_err(|e| WalletError::Provider(e.to_string()))
    }
}
