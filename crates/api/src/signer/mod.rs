// Path: crates/api/src/signer/mod.rs
//! Native-chain signers used for directly signed submissions.

use async_trait::async_trait;
use evm_mapping_types::app::AccountId32;
use evm_mapping_types::error::{ChainError, CryptoError};
use std::fmt;
use std::sync::Arc;

/// A native-chain keypair held in process, such as a development keyring seed.
pub trait NativeKeypair: Send + Sync {
    /// The account the keypair signs for.
    fn account_id(&self) -> AccountId32;

    /// Signs an extrinsic signing payload.
    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// A signer held outside the process, typically a browser extension.
#[async_trait]
pub trait InjectedSigner: Send + Sync {
    /// Asks the extension to sign `payload` for `address`.
    ///
    /// A user declining must be reported as [`ChainError::Rejected`] with the
    /// extension's reason verbatim.
    async fn sign_payload(&self, address: &str, payload: &[u8]) -> Result<Vec<u8>, ChainError>;
}

/// The signer of a natively submitted call.
#[derive(Clone)]
pub enum Signer {
    /// A keypair held in process.
    Keypair(Arc<dyn NativeKeypair>),
    /// An external signer together with the SS58 address it signs for.
    Injected {
        /// The SS58 address of the signing account.
        address: String,
        /// The external signer.
        signer: Arc<dyn InjectedSigner>,
    },
}

impl Signer {
    /// A stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Keypair(_) => "keypair",
            Self::Injected { .. } => "injected",
        }
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keypair(pair) => f
                .debug_tuple("Keypair")
                .field(&pair.account_id())
                .finish(),
            Self::Injected { address, .. } => f
                .debug_struct("Injected")
                .field("address", address)
                .finish_non_exhaustive(),
        }
    }
}
