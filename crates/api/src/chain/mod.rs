// Path: crates/api/src/chain/mod.rs
//! Defines the `ChainApi` trait used to read pallet constants and storage,
//! encode calls, and submit extrinsics.

use crate::signer::Signer;
use async_trait::async_trait;
use evm_mapping_types::app::{RuntimeCall, SubmissionUpdate};
use evm_mapping_types::error::ChainError;
use futures::stream::{BoxStream, StreamExt};
use std::fmt;

/// The stream of status updates produced by one submission, in emission order.
pub type StatusStream = BoxStream<'static, Result<SubmissionUpdate, ChainError>>;

type Unsubscribe = Box<dyn FnOnce() + Send + 'static>;

/// An open status subscription for one submitted extrinsic.
///
/// The subscription is released exactly once: either by an explicit call to
/// [`StatusSubscription::unsubscribe`] or when the handle is dropped.
pub struct StatusSubscription {
    updates: StatusStream,
    unsubscribe: Option<Unsubscribe>,
}

impl StatusSubscription {
    /// Wraps a status stream together with the action that releases it on the node.
    pub fn new(updates: StatusStream, unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self {
            updates,
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Waits for the next status update. `None` means the node closed the stream.
    pub async fn next(&mut self) -> Option<Result<SubmissionUpdate, ChainError>> {
        self.updates.next().await
    }

    /// Releases the subscription now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for StatusSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for StatusSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusSubscription")
            .field("released", &self.unsubscribe.is_none())
            .finish_non_exhaustive()
    }
}

/// A client for a chain that runs the account mapping pallet.
///
/// Every method is a single round trip; implementations must not retry.
#[async_trait]
pub trait ChainApi: Send + Sync {
    /// Reads a pallet constant as its raw SCALE bytes. `Ok(None)` if the runtime
    /// does not declare it.
    async fn constant(&self, pallet: &str, name: &str) -> Result<Option<Vec<u8>>, ChainError>;

    /// Reads a storage map entry as its raw SCALE bytes. `key` is the SCALE
    /// encoding of the map key. `Ok(None)` if the entry is absent.
    async fn storage(
        &self,
        pallet: &str,
        item: &str,
        key: &[u8],
    ) -> Result<Option<Vec<u8>>, ChainError>;

    /// Encodes a call to its canonical bytes, pallet and call indices included.
    fn encode_call(&self, call: &RuntimeCall) -> Result<Vec<u8>, ChainError>;

    /// Signs the call with a native signer and submits it.
    ///
    /// A signer that declines must surface as [`ChainError::Rejected`] before
    /// any subscription is created, carrying the signer's reason verbatim.
    async fn sign_and_submit(
        &self,
        call: &RuntimeCall,
        signer: &Signer,
    ) -> Result<StatusSubscription, ChainError>;

    /// Submits the call as an unsigned extrinsic.
    ///
    /// A pool rejection (for example an outdated mapping nonce) surfaces as
    /// [`ChainError::Rejected`] with the node's message verbatim.
    async fn submit_unsigned(&self, call: &RuntimeCall) -> Result<StatusSubscription, ChainError>;
}
