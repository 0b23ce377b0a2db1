// Path: crates/tx/src/submit/status/mod.rs

//! Turns the status stream of a submission into exactly one outcome.
//!
//! Settlement happens on the first `InBlock` (or `Invalid`) update, not on
//! finality: an included call can in principle still be reorganized out.

use evm_mapping_api::chain::StatusSubscription;
use evm_mapping_types::app::{
    DispatchErrorPayload, InBlockResult, SubmissionOutcome, SubmissionUpdate, TxStatus,
};
use evm_mapping_types::error::TransactionError;
use evm_mapping_types::keys::{EXTRINSIC_FAILED_EVENT, SYSTEM_PALLET};
use tracing::trace;

/// Interprets one status update. Returns `None` for non-terminal statuses.
///
/// An in-block update carrying `system.ExtrinsicFailed` is a failure whose
/// payload is the event's first field, the chain's `DispatchError`.
pub fn resolve(update: &SubmissionUpdate) -> Option<SubmissionOutcome> {
    match &update.status {
        TxStatus::InBlock(block_hash) => {
            let failure = update
                .events
                .iter()
                .rev()
                .find(|e| e.is(SYSTEM_PALLET, EXTRINSIC_FAILED_EVENT));
            Some(match failure {
                Some(event) => SubmissionOutcome::Failed(DispatchErrorPayload(
                    event.data.first().cloned().unwrap_or_default(),
                )),
                None => SubmissionOutcome::Included(InBlockResult {
                    block_hash: *block_hash,
                    events: update.events.clone(),
                }),
            })
        }
        TxStatus::Invalid => Some(SubmissionOutcome::Invalid),
        TxStatus::Ready | TxStatus::Broadcast | TxStatus::Finalized(_) => None,
    }
}

/// Drives `subscription` to its first terminal outcome and releases it.
///
/// Updates after the terminal one are never read. A stream that ends first
/// yields [`TransactionError::SubscriptionClosed`].
pub async fn settle(mut subscription: StatusSubscription) -> Result<SubmissionOutcome, TransactionError> {
    while let Some(update) = subscription.next().await {
        let update = update?;
        trace!(target: "submit", status = update.status.label(), "status update");
        if let Some(outcome) = resolve(&update) {
            subscription.unsubscribe();
            return Ok(outcome);
        }
    }
    Err(TransactionError::SubscriptionClosed)
}

#[cfg(test)]
mod tests;
