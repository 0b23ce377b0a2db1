// Path: crates/test_utils/src/signer.rs
//! Native-chain signers for tests: an in-process dev keypair and a scripted
//! extension signer.

use async_trait::async_trait;
use evm_mapping_api::signer::{InjectedSigner, NativeKeypair, Signer};
use evm_mapping_crypto::algorithms::hash::blake2_256;
use evm_mapping_crypto::sign::ecdsa::{compress, sign_prehash};
use evm_mapping_types::app::AccountId32;
use evm_mapping_types::error::{ChainError, CryptoError};
use k256::ecdsa::SigningKey;
use std::sync::{Arc, Mutex};

/// A development keypair derived from a keyring seed such as `//Alice`.
///
/// Uses the chain's ECDSA scheme: the account id is the BLAKE2b-256 hash of
/// the compressed public key, and payloads are signed over their BLAKE2b-256 hash.
pub struct DevKeypair {
    key: SigningKey,
    account_id: AccountId32,
}

impl DevKeypair {
    /// Derives a keypair from a seed phrase.
    pub fn from_seed(seed: &str) -> Result<Self, CryptoError> {
        let secret = blake2_256(seed.as_bytes());
        let key = SigningKey::from_slice(&secret)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        let pubkey = compress(key.verifying_key())?;
        Ok(Self {
            key,
            account_id: AccountId32(blake2_256(pubkey.as_bytes())),
        })
    }

    /// The well-known `//Alice` dev account, used by faucet-style flows.
    pub fn alice() -> Result<Self, CryptoError> {
        Self::from_seed("//Alice")
    }

    /// Wraps the keypair as a [`Signer`].
    pub fn into_signer(self) -> Signer {
        Signer::Keypair(Arc::new(self))
    }
}

impl NativeKeypair for DevKeypair {
    fn account_id(&self) -> AccountId32 {
        self.account_id
    }

    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let digest: alloy_primitives::B256 = blake2_256(payload).into();
        Ok(sign_prehash(&self.key, &digest)?.as_bytes().to_vec())
    }
}

/// An extension signer that approves or declines according to a script.
#[derive(Default)]
pub struct MockInjectedSigner {
    rejection: Mutex<Option<String>>,
    requests: Mutex<Vec<String>>,
}

impl MockInjectedSigner {
    /// A signer that approves every request.
    pub fn approving() -> Self {
        Self::default()
    }

    /// A signer that declines every request with `reason`.
    pub fn rejecting(reason: &str) -> Self {
        Self {
            rejection: Mutex::new(Some(reason.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The addresses signing was requested for, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Wraps the signer as a [`Signer`] for `address`.
    pub fn into_signer(self, address: &str) -> Signer {
        Signer::Injected {
            address: address.to_string(),
            signer: Arc::new(self),
        }
    }
}

#[async_trait]
impl InjectedSigner for MockInjectedSigner {
    async fn sign_payload(&self, address: &str, payload: &[u8]) -> Result<Vec<u8>, ChainError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(address.to_string());
        }
        let rejection = self
            .rejection
            .lock()
            .map_err(|e| ChainError::Rpc(e.to_string()))?
            .clone();
        match rejection {
            Some(reason) => Err(ChainError::Rejected(reason)),
            None => Ok(blake2_256(payload).to_vec()),
        }
    }
}
