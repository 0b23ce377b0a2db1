// Path: crates/test_utils/src/chain.rs
//! An in-memory chain that emulates the account mapping pallet.
//!
//! Constants and storage are plain maps. Each submission consumes the next
//! scripted outcome (a status sequence or an up-front rejection); with no
//! script queued, the call is included in a block without failure. Meta-calls
//! are checked against the stored mapping nonce, which is bumped on success.

use alloy_primitives::{Bytes, B256, U256};
use async_trait::async_trait;
use evm_mapping_api::chain::{ChainApi, StatusSubscription};
use evm_mapping_api::signer::Signer;
use evm_mapping_types::app::{
    AccountId32, EventRecord, MetaCallArgs, RuntimeCall, SubmissionUpdate, TxStatus,
};
use evm_mapping_types::codec::{from_bytes_canonical, to_bytes_canonical};
use evm_mapping_types::error::ChainError;
use evm_mapping_types::keys::{
    ACCOUNT_NONCE_STORAGE, EIP712_CHAIN_ID_CONST, EIP712_NAME_CONST,
    EIP712_VERIFYING_CONTRACT_CONST, EIP712_VERSION_CONST, EXTRINSIC_FAILED_EVENT, MAPPING_PALLET,
    META_CALL, SYSTEM_PALLET,
};
use futures::StreamExt;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::fixtures::sample_domain;

/// The pool's message for a meta-call whose nonce was already used.
pub const OUTDATED_NONCE_MESSAGE: &str = "1010: Invalid Transaction: Transaction is outdated";
/// The pool's message for a meta-call whose nonce is ahead of the chain.
pub const FUTURE_NONCE_MESSAGE: &str =
    "1010: Invalid Transaction: Transaction will be valid in the future";

/// One scripted submission outcome.
#[derive(Clone, Debug)]
enum Script {
    Updates(Vec<SubmissionUpdate>),
    Reject(String),
}

/// A submission the chain received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    /// The submitted call.
    pub call: RuntimeCall,
    /// Its canonical encoding.
    pub encoded: Vec<u8>,
    /// The native signature, `None` for unsigned submissions.
    pub signature: Option<Vec<u8>>,
}

/// Status updates for a call included in `block` without failure.
pub fn in_block_updates(block: B256) -> Vec<SubmissionUpdate> {
    vec![
        SubmissionUpdate::status(TxStatus::Ready),
        SubmissionUpdate::status(TxStatus::Broadcast),
        SubmissionUpdate {
            status: TxStatus::InBlock(block),
            events: vec![EventRecord::new(SYSTEM_PALLET, "ExtrinsicSuccess", vec![])],
        },
        SubmissionUpdate::status(TxStatus::Finalized(block)),
    ]
}

/// Status updates for a call included in `block` whose dispatch failed with
/// the SCALE-encoded `dispatch_error`.
pub fn failed_updates(block: B256, dispatch_error: Vec<u8>) -> Vec<SubmissionUpdate> {
    vec![
        SubmissionUpdate::status(TxStatus::Ready),
        SubmissionUpdate {
            status: TxStatus::InBlock(block),
            events: vec![EventRecord::new(
                SYSTEM_PALLET,
                EXTRINSIC_FAILED_EVENT,
                vec![Bytes::from(dispatch_error), Bytes::from(vec![0u8; 4])],
            )],
        },
    ]
}

/// Status updates for a call the pool dropped as invalid.
pub fn invalid_updates() -> Vec<SubmissionUpdate> {
    vec![
        SubmissionUpdate::status(TxStatus::Ready),
        SubmissionUpdate::status(TxStatus::Invalid),
    ]
}

fn lock<T>(m: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>, ChainError> {
    m.lock().map_err(|e| ChainError::Rpc(format!("mock chain poisoned: {}", e)))
}

/// An in-memory [`ChainApi`].
pub struct MockChain {
    constants: Mutex<HashMap<(String, String), Vec<u8>>>,
    storage: Mutex<HashMap<(String, String, Vec<u8>), Vec<u8>>>,
    call_indices: Mutex<HashMap<(String, String), [u8; 2]>>,
    scripts: Mutex<VecDeque<Script>>,
    submissions: Mutex<Vec<Submission>>,
    unsubscribed: Arc<AtomicUsize>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    /// A chain without the mapping pallet's constants, with the standard call
    /// indices registered.
    pub fn new() -> Self {
        let chain = Self {
            constants: Mutex::new(HashMap::new()),
            storage: Mutex::new(HashMap::new()),
            call_indices: Mutex::new(HashMap::new()),
            scripts: Mutex::new(VecDeque::new()),
            submissions: Mutex::new(Vec::new()),
            unsubscribed: Arc::new(AtomicUsize::new(0)),
        };
        chain.register_call("System", "remark", [0x00, 0x07]);
        chain.register_call("Balances", "transfer_keep_alive", [0x05, 0x03]);
        chain.register_call(MAPPING_PALLET, META_CALL, [0x50, 0x00]);
        chain
    }

    /// A chain running the mapping pallet with the sample domain constants.
    pub fn with_mapping_pallet() -> Self {
        let chain = Self::new();
        let domain = sample_domain();
        chain.set_constant(
            EIP712_NAME_CONST,
            to_bytes_canonical(&domain.name.into_bytes()),
        );
        chain.set_constant(
            EIP712_VERSION_CONST,
            to_bytes_canonical(&domain.version.into_bytes()),
        );
        let chain_id: [u8; 32] = U256::from(domain.chain_id.unwrap_or_default()).to_le_bytes();
        chain.set_constant(EIP712_CHAIN_ID_CONST, to_bytes_canonical(&chain_id));
        let contract: [u8; 20] = domain
            .verifying_contract
            .map(<[u8; 20]>::from)
            .unwrap_or_default();
        chain.set_constant(EIP712_VERIFYING_CONTRACT_CONST, to_bytes_canonical(&contract));
        chain
    }

    /// Registers the pallet and call indices used to encode `pallet.call`.
    pub fn register_call(&self, pallet: &str, call: &str, index: [u8; 2]) {
        if let Ok(mut calls) = self.call_indices.lock() {
            calls.insert((pallet.to_string(), call.to_string()), index);
        }
    }

    /// Sets a mapping pallet constant to raw SCALE bytes.
    pub fn set_constant(&self, name: &str, raw: Vec<u8>) {
        if let Ok(mut constants) = self.constants.lock() {
            constants.insert((MAPPING_PALLET.to_string(), name.to_string()), raw);
        }
    }

    /// Removes a mapping pallet constant.
    pub fn remove_constant(&self, name: &str) {
        if let Ok(mut constants) = self.constants.lock() {
            constants.remove(&(MAPPING_PALLET.to_string(), name.to_string()));
        }
    }

    /// Sets the stored mapping nonce of `account`.
    pub fn set_mapping_nonce(&self, account: &AccountId32, nonce: u64) {
        if let Ok(mut storage) = self.storage.lock() {
            storage.insert(nonce_key(account), to_bytes_canonical(&nonce));
        }
    }

    /// The stored mapping nonce of `account`, zero if absent.
    pub fn mapping_nonce(&self, account: &AccountId32) -> u64 {
        self.storage
            .lock()
            .ok()
            .and_then(|s| s.get(&nonce_key(account)).cloned())
            .and_then(|raw| from_bytes_canonical(&raw).ok())
            .unwrap_or_default()
    }

    /// Queues the status sequence of the next submission.
    pub fn script_updates(&self, updates: Vec<SubmissionUpdate>) {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.push_back(Script::Updates(updates));
        }
    }

    /// Makes the next submission fail up front with `reason`.
    pub fn script_rejection(&self, reason: &str) {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.push_back(Script::Reject(reason.to_string()));
        }
    }

    /// Every submission received so far, in order.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// How many status subscriptions were released.
    pub fn unsubscribe_count(&self) -> usize {
        self.unsubscribed.load(Ordering::SeqCst)
    }

    fn next_script(&self) -> Result<Script, ChainError> {
        Ok(lock(&self.scripts)?
            .pop_front()
            .unwrap_or_else(|| Script::Updates(in_block_updates(B256::repeat_byte(0x11)))))
    }

    fn subscription(&self, updates: Vec<SubmissionUpdate>) -> StatusSubscription {
        let counter = self.unsubscribed.clone();
        StatusSubscription::new(
            futures::stream::iter(updates.into_iter().map(Ok)).boxed(),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        )
    }

    fn record(&self, submission: Submission) -> Result<(), ChainError> {
        lock(&self.submissions)?.push(submission);
        Ok(())
    }

    /// Applies the pallet's nonce rule to a meta-call, returning the caller
    /// account if the call would be accepted.
    fn check_meta_call(&self, call: &RuntimeCall) -> Result<Option<AccountId32>, ChainError> {
        if call.pallet != MAPPING_PALLET || call.call != META_CALL {
            return Ok(None);
        }
        let args: MetaCallArgs = from_bytes_canonical(&call.args).map_err(ChainError::Decode)?;
        let expected = self.mapping_nonce(&args.who);
        if args.nonce < expected {
            return Err(ChainError::Rejected(OUTDATED_NONCE_MESSAGE.to_string()));
        }
        if args.nonce > expected {
            return Err(ChainError::Rejected(FUTURE_NONCE_MESSAGE.to_string()));
        }
        Ok(Some(args.who))
    }

    fn settle_script(
        &self,
        script: Script,
        meta_caller: Option<AccountId32>,
    ) -> Result<StatusSubscription, ChainError> {
        match script {
            Script::Reject(reason) => Err(ChainError::Rejected(reason)),
            Script::Updates(updates) => {
                let succeeded = updates.iter().any(|u| {
                    matches!(u.status, TxStatus::InBlock(_))
                        && !u
                            .events
                            .iter()
                            .any(|e| e.is(SYSTEM_PALLET, EXTRINSIC_FAILED_EVENT))
                });
                if let (true, Some(who)) = (succeeded, meta_caller) {
                    let next = self.mapping_nonce(&who) + 1;
                    self.set_mapping_nonce(&who, next);
                }
                Ok(self.subscription(updates))
            }
        }
    }
}

fn nonce_key(account: &AccountId32) -> (String, String, Vec<u8>) {
    (
        MAPPING_PALLET.to_string(),
        ACCOUNT_NONCE_STORAGE.to_string(),
        to_bytes_canonical(account),
    )
}

#[async_trait]
impl ChainApi for MockChain {
    async fn constant(&self, pallet: &str, name: &str) -> Result<Option<Vec<u8>>, ChainError> {
        Ok(lock(&self.constants)?
            .get(&(pallet.to_string(), name.to_string()))
            .cloned())
    }

    async fn storage(
        &self,
        pallet: &str,
        item: &str,
        key: &[u8],
    ) -> Result<Option<Vec<u8>>, ChainError> {
        Ok(lock(&self.storage)?
            .get(&(pallet.to_string(), item.to_string(), key.to_vec()))
            .cloned())
    }

    fn encode_call(&self, call: &RuntimeCall) -> Result<Vec<u8>, ChainError> {
        let index = lock(&self.call_indices)?
            .get(&(call.pallet.clone(), call.call.clone()))
            .copied()
            .ok_or_else(|| ChainError::UnknownCall {
                pallet: call.pallet.clone(),
                call: call.call.clone(),
            })?;
        Ok([index.as_slice(), call.args.as_slice()].concat())
    }

    async fn sign_and_submit(
        &self,
        call: &RuntimeCall,
        signer: &Signer,
    ) -> Result<StatusSubscription, ChainError> {
        let encoded = self.encode_call(call)?;
        let signature = match signer {
            Signer::Keypair(pair) => pair
                .sign(&encoded)
                .map_err(|e| ChainError::Rejected(e.to_string()))?,
            Signer::Injected { address, signer } => signer.sign_payload(address, &encoded).await?,
        };
        self.record(Submission {
            call: call.clone(),
            encoded,
            signature: Some(signature),
        })?;
        let script = self.next_script()?;
        self.settle_script(script, None)
    }

    async fn submit_unsigned(&self, call: &RuntimeCall) -> Result<StatusSubscription, ChainError> {
        let encoded = self.encode_call(call)?;
        self.record(Submission {
            call: call.clone(),
            encoded,
            signature: None,
        })?;
        let meta_caller = self.check_meta_call(call)?;
        let script = self.next_script()?;
        self.settle_script(script, meta_caller)
    }
}
