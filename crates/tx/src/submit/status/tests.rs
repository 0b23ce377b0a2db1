//! Tests for status resolution and settlement.

use super::*;
use alloy_primitives::{Bytes, B256};
use evm_mapping_types::app::EventRecord;
use evm_mapping_types::error::ChainError;
use futures::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn subscription(
    updates: Vec<Result<SubmissionUpdate, ChainError>>,
) -> (StatusSubscription, Arc<AtomicUsize>) {
    let released = Arc::new(AtomicUsize::new(0));
    let counter = released.clone();
    let sub = StatusSubscription::new(futures::stream::iter(updates).boxed(), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (sub, released)
}

fn in_block(events: Vec<EventRecord>) -> SubmissionUpdate {
    SubmissionUpdate {
        status: TxStatus::InBlock(B256::repeat_byte(7)),
        events,
    }
}

#[test]
fn test_non_terminal_statuses_resolve_to_none() {
    for status in [
        TxStatus::Ready,
        TxStatus::Broadcast,
        TxStatus::Finalized(B256::ZERO),
    ] {
        assert_eq!(resolve(&SubmissionUpdate::status(status)), None);
    }
}

#[test]
fn test_in_block_without_failure_is_included() {
    let events = vec![EventRecord::new("balances", "Withdraw", vec![])];
    match resolve(&in_block(events.clone())) {
        Some(SubmissionOutcome::Included(result)) => {
            assert_eq!(result.block_hash, B256::repeat_byte(7));
            assert_eq!(result.events, events);
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[test]
fn test_extrinsic_failed_is_detected() {
    let failed = EventRecord::new(
        "system",
        "ExtrinsicFailed",
        vec![Bytes::from(vec![0x03, 0x05]), Bytes::from(vec![0x00])],
    );
    let outcome = resolve(&in_block(vec![failed])).unwrap();
    assert_eq!(
        outcome,
        SubmissionOutcome::Failed(DispatchErrorPayload(Bytes::from(vec![0x03, 0x05])))
    );
    assert!(matches!(
        outcome.into_result(),
        Err(TransactionError::ExtrinsicFailed(_))
    ));

    // Only `system` emits the dispatch failure.
    let lookalike = EventRecord::new("utility", "ExtrinsicFailed", vec![]);
    assert!(matches!(
        resolve(&in_block(vec![lookalike])),
        Some(SubmissionOutcome::Included(_))
    ));
}

#[test]
fn test_invalid_is_terminal() {
    let outcome = resolve(&SubmissionUpdate::status(TxStatus::Invalid)).unwrap();
    assert_eq!(
        outcome.into_result().unwrap_err(),
        TransactionError::Invalid("Invalid transaction".to_string())
    );
}

#[tokio::test]
async fn test_settles_once_and_releases() {
    let (sub, released) = subscription(vec![
        Ok(SubmissionUpdate::status(TxStatus::Ready)),
        Ok(in_block(vec![])),
        // Never read: settlement stops at the first terminal update.
        Ok(SubmissionUpdate::status(TxStatus::Invalid)),
    ]);
    let outcome = settle(sub).await.unwrap();
    assert_eq!(outcome.label(), "included");
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_closed_stream_without_terminal_status() {
    let (sub, released) = subscription(vec![
        Ok(SubmissionUpdate::status(TxStatus::Ready)),
        Ok(SubmissionUpdate::status(TxStatus::Broadcast)),
    ]);
    assert_eq!(
        settle(sub).await.unwrap_err(),
        TransactionError::SubscriptionClosed
    );
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stream_error_releases_subscription() {
    let (sub, released) = subscription(vec![
        Ok(SubmissionUpdate::status(TxStatus::Ready)),
        Err(ChainError::Rpc("connection reset".to_string())),
    ]);
    assert!(matches!(
        settle(sub).await,
        Err(TransactionError::Chain(ChainError::Rpc(_)))
    ));
    assert_eq!(released.load(Ordering::SeqCst), 1);
}
