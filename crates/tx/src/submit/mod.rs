// Path: crates/tx/src/submit/mod.rs

//! Submission of native and wallet-authorized (meta) calls.
//!
//! Both paths settle on the first terminal status through [`status::settle`].
//! A signer or wallet that declines fails before any subscription exists, so
//! nothing is left to release.

pub mod status;

use crate::eip712::{build_call_payload, build_domain};
use crate::system::nonce::build_call_descriptor;
use dashmap::DashMap;
use evm_mapping_crypto::address::ss58_decode;
use evm_mapping_api::chain::ChainApi;
use evm_mapping_api::signer::Signer;
use evm_mapping_api::wallet::WalletProvider;
use evm_mapping_telemetry::time::Timer;
use evm_mapping_telemetry::{error_metrics, submission_metrics};
use evm_mapping_types::app::{
    AccountId32, EvmSignature, InBlockResult, MappingAccount, MetaCallArgs, RuntimeCall,
    SubmissionOutcome, SubstrateCallDescriptor,
};
use evm_mapping_types::codec::to_bytes_canonical;
use evm_mapping_types::config::MappingConfig;
use evm_mapping_types::error::{
    ChainError, ErrorCode, SignAndSendError, TransactionError, WalletError,
};
use evm_mapping_types::keys::{MAPPING_PALLET, META_CALL};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use self::status::settle;

const NATIVE: &str = "native";
const META: &str = "meta";

/// Builds the `EvmAccountMapping::meta_call` that dispatches `descriptor`.
///
/// The dispatching account is decoded from `descriptor.who`, the address the
/// signature is bound to.
pub fn meta_call(
    descriptor: &SubstrateCallDescriptor,
    signature: EvmSignature,
) -> Result<RuntimeCall, TransactionError> {
    let (_, who) = ss58_decode(&descriptor.who)?;
    let args = MetaCallArgs {
        who,
        call_data: descriptor.call_data.to_vec(),
        nonce: descriptor.nonce,
        signature,
        extra: None,
    };
    Ok(RuntimeCall::new(
        MAPPING_PALLET,
        META_CALL,
        to_bytes_canonical(&args),
    ))
}

fn is_stale_nonce(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("outdated") || message.contains("stale")
}

/// Maps a pool or signer rejection to the caller-facing error.
fn classify_chain_error(error: ChainError) -> TransactionError {
    match error {
        ChainError::Rejected(message) if is_stale_nonce(&message) => {
            TransactionError::StaleNonce(message)
        }
        ChainError::Rejected(message) => SignAndSendError::from_rejection(message).into(),
        other => other.into(),
    }
}

fn classify_wallet_error(error: WalletError) -> TransactionError {
    match error {
        WalletError::Rejected(message) => SignAndSendError::from_rejection(message).into(),
        other => other.into(),
    }
}

/// Submits calls and reports their terminal outcome.
///
/// With `serialize_meta_calls` set, meta-calls of the same account run one at
/// a time, so two concurrent calls never sign the same nonce.
pub struct TransactionSubmitter<C: ?Sized> {
    chain: Arc<C>,
    serialize_meta_calls: bool,
    account_locks: DashMap<AccountId32, Arc<Mutex<()>>>,
}

impl<C: ChainApi + ?Sized> TransactionSubmitter<C> {
    /// Creates a submitter with default settings.
    pub fn new(chain: Arc<C>) -> Self {
        Self::with_config(chain, &MappingConfig::default())
    }

    /// Creates a submitter configured by `config`.
    pub fn with_config(chain: Arc<C>, config: &MappingConfig) -> Self {
        debug!(
            target: "submit",
            serialize_meta_calls = config.serialize_meta_calls,
            "creating transaction submitter"
        );
        Self {
            chain,
            serialize_meta_calls: config.serialize_meta_calls,
            account_locks: DashMap::new(),
        }
    }

    /// The chain this submitter talks to.
    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Signs `call` with a native signer, submits it, and waits for inclusion.
    pub async fn submit_native(
        &self,
        call: &RuntimeCall,
        signer: &Signer,
    ) -> Result<InBlockResult, TransactionError> {
        submission_metrics().inc_submissions(NATIVE);
        info!(
            target: "submit",
            pallet = %call.pallet,
            call = %call.call,
            signer = signer.kind(),
            "submitting native call"
        );
        let settled = self.settle_native(call, signer).await;
        finish(NATIVE, settled)
    }

    /// Dispatches `call` as `account` on the wallet's authority.
    ///
    /// Reads the mapping nonce and the EIP-712 domain, has the wallet sign the
    /// `SubstrateCall` payload, and submits the resulting meta-call unsigned.
    /// A nonce consumed in the meantime surfaces as
    /// [`TransactionError::StaleNonce`]; the caller can rebuild and retry.
    pub async fn submit_meta<W: WalletProvider + ?Sized>(
        &self,
        call: &RuntimeCall,
        wallet: &W,
        account: &MappingAccount,
    ) -> Result<InBlockResult, TransactionError> {
        let _lock = self.lock_account(account.account_id()).await;
        match self.authorize(call, wallet, account).await {
            Ok((descriptor, signature)) => self.submit_authorized(&descriptor, signature).await,
            Err(e) => {
                submission_metrics().inc_submissions(META);
                finish(META, Err(e))
            }
        }
    }

    /// Submits a meta-call for a descriptor the wallet has already signed.
    ///
    /// The call is dispatched as the account encoded in `descriptor.who`.
    pub async fn submit_authorized(
        &self,
        descriptor: &SubstrateCallDescriptor,
        signature: EvmSignature,
    ) -> Result<InBlockResult, TransactionError> {
        submission_metrics().inc_submissions(META);
        info!(
            target: "submit",
            who = %descriptor.who,
            nonce = descriptor.nonce,
            "submitting meta call"
        );
        let settled = match meta_call(descriptor, signature) {
            Ok(call) => self.settle_meta(&call).await,
            Err(e) => Err(e),
        };
        finish(META, settled)
    }

    async fn authorize<W: WalletProvider + ?Sized>(
        &self,
        call: &RuntimeCall,
        wallet: &W,
        account: &MappingAccount,
    ) -> Result<(SubstrateCallDescriptor, EvmSignature), TransactionError> {
        let descriptor = build_call_descriptor(&*self.chain, account.address(), call).await?;
        let domain = build_domain(&*self.chain).await?;
        let payload = build_call_payload(account.evm_address(), domain, descriptor.clone());
        let signature = wallet
            .sign_typed_data(&payload)
            .await
            .map_err(classify_wallet_error)?;
        Ok((descriptor, signature))
    }

    async fn settle_native(
        &self,
        call: &RuntimeCall,
        signer: &Signer,
    ) -> Result<SubmissionOutcome, TransactionError> {
        let subscription = self
            .chain
            .sign_and_submit(call, signer)
            .await
            .map_err(classify_chain_error)?;
        let _timer = Timer::new(submission_metrics(), NATIVE);
        settle(subscription).await
    }

    async fn settle_meta(&self, call: &RuntimeCall) -> Result<SubmissionOutcome, TransactionError> {
        let subscription = self
            .chain
            .submit_unsigned(call)
            .await
            .map_err(classify_chain_error)?;
        let _timer = Timer::new(submission_metrics(), META);
        settle(subscription).await
    }

    /// Holds the account's lock when meta-calls are serialized.
    ///
    /// The returned handle releases the map entry when dropped, including when
    /// the caller abandons the submission midway.
    async fn lock_account(&self, who: &AccountId32) -> AccountLock<'_, C> {
        let mut held = AccountLock {
            submitter: self,
            who: *who,
            guard: None,
        };
        if self.serialize_meta_calls {
            let lock = self.account_locks.entry(*who).or_default().clone();
            held.guard = Some(lock.lock_owned().await);
        }
        held
    }
}

impl<C: ?Sized> TransactionSubmitter<C> {
    fn release_lock(&self, who: &AccountId32) {
        if self.serialize_meta_calls {
            self.account_locks
                .remove_if(who, |_, lock| Arc::strong_count(lock) == 1);
        }
    }
}

struct AccountLock<'a, C: ?Sized> {
    submitter: &'a TransactionSubmitter<C>,
    who: AccountId32,
    guard: Option<OwnedMutexGuard<()>>,
}

impl<C: ?Sized> Drop for AccountLock<'_, C> {
    fn drop(&mut self) {
        // The guard must go first or the entry still looks shared.
        self.guard.take();
        self.submitter.release_lock(&self.who);
    }
}

/// Records the outcome of a settled (or failed) submission.
fn finish(
    kind: &'static str,
    settled: Result<SubmissionOutcome, TransactionError>,
) -> Result<InBlockResult, TransactionError> {
    let outcome = match &settled {
        Ok(outcome) => outcome.label(),
        Err(e) if e.is_cancelled() => SubmissionOutcome::Cancelled.label(),
        Err(_) => "error",
    };
    submission_metrics().inc_outcome(kind, outcome);

    let result = settled.and_then(SubmissionOutcome::into_result);
    match &result {
        Ok(included) => info!(
            target: "submit",
            kind,
            block_hash = %included.block_hash,
            events = included.events.len(),
            "call included"
        ),
        Err(e) => {
            error_metrics().inc_error("transaction", e.code());
            warn!(target: "submit", kind, outcome, error = %e, "submission did not succeed");
        }
    }
    result
}

#[cfg(test)]
mod tests;
