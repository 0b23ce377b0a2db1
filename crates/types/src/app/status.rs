// Path: crates/types/src/app/status.rs
//! Submission status updates and the terminal outcomes derived from them.

use crate::error::{SignAndSendError, TransactionError};
use alloy_primitives::{Bytes, B256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle status of a submitted extrinsic as reported by the node.
///
/// `Ready → Broadcast → InBlock → Finalized`, or `Invalid`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    /// Accepted into the transaction pool.
    Ready,
    /// Gossiped to peers.
    Broadcast,
    /// Included in the block with the given hash.
    InBlock(B256),
    /// The including block was finalized.
    Finalized(B256),
    /// Rejected by the pool as invalid.
    Invalid,
}

impl TxStatus {
    /// A stable, lowercase label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Broadcast => "broadcast",
            Self::InBlock(_) => "in_block",
            Self::Finalized(_) => "finalized",
            Self::Invalid => "invalid",
        }
    }
}

/// A runtime event emitted while applying an extrinsic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// The emitting pallet, in lower camel case (e.g. `system`).
    pub section: String,
    /// The event name (e.g. `ExtrinsicFailed`).
    pub method: String,
    /// The SCALE-encoded event fields, in declaration order.
    pub data: Vec<Bytes>,
}

impl EventRecord {
    /// Creates an event record.
    pub fn new(section: &str, method: &str, data: Vec<Bytes>) -> Self {
        Self {
            section: section.to_string(),
            method: method.to_string(),
            data,
        }
    }

    /// Returns true if this event was emitted by `section` with name `method`.
    pub fn is(&self, section: &str, method: &str) -> bool {
        self.section == section && self.method == method
    }
}

/// One status update of a submission together with the events emitted so far.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionUpdate {
    /// The reported status.
    pub status: TxStatus,
    /// The events attached to this status.
    pub events: Vec<EventRecord>,
}

impl SubmissionUpdate {
    /// Creates an update carrying no events.
    pub fn status(status: TxStatus) -> Self {
        Self {
            status,
            events: Vec::new(),
        }
    }
}

/// The result of a call that reached a block without a dispatch failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InBlockResult {
    /// The hash of the including block.
    pub block_hash: B256,
    /// Every event emitted for the extrinsic.
    pub events: Vec<EventRecord>,
}

/// The chain-reported `DispatchError`, kept as its SCALE encoding.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchErrorPayload(pub Bytes);

impl fmt::Display for DispatchErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for DispatchErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DispatchErrorPayload({})", self)
    }
}

/// The terminal result of a submission. Reached exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Included in a block without a failure event.
    Included(InBlockResult),
    /// Included in a block, but the dispatch failed.
    Failed(DispatchErrorPayload),
    /// Rejected by the pool before inclusion.
    Invalid,
    /// The signer declined before anything was broadcast.
    Cancelled,
}

impl SubmissionOutcome {
    /// A stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Included(_) => "included",
            Self::Failed(_) => "failed",
            Self::Invalid => "invalid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Converts the outcome into the caller-facing result.
    pub fn into_result(self) -> Result<InBlockResult, TransactionError> {
        match self {
            Self::Included(result) => Ok(result),
            Self::Failed(payload) => Err(TransactionError::ExtrinsicFailed(payload)),
            Self::Invalid => Err(TransactionError::Invalid("Invalid transaction".to_string())),
            Self::Cancelled => Err(TransactionError::SignAndSend(
                SignAndSendError::from_rejection("Cancelled"),
            )),
        }
    }
}
