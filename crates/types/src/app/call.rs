// Path: crates/types/src/app/call.rs
//! Runtime calls and the descriptor an EVM wallet signs to authorize one.

use super::account::{AccountId32, EvmSignature};
use alloy_primitives::Bytes;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A runtime call that has not been dispatched yet.
///
/// The call is addressed by pallet and call name; `args` holds the call
/// arguments already SCALE-encoded in declaration order. Turning this into the
/// canonical call bytes (pallet and call indices included) is the job of the
/// chain client, which owns the runtime metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeCall {
    /// The pallet name as it appears in runtime metadata.
    pub pallet: String,
    /// The call name as it appears in runtime metadata.
    pub call: String,
    /// The SCALE-encoded call arguments.
    pub args: Vec<u8>,
}

impl RuntimeCall {
    /// Creates a call from its pallet, name, and encoded arguments.
    pub fn new(pallet: impl Into<String>, call: impl Into<String>, args: Vec<u8>) -> Self {
        Self {
            pallet: pallet.into(),
            call: call.into(),
            args,
        }
    }
}

/// The message of a `SubstrateCall` EIP-712 payload.
///
/// `nonce` is the mapping pallet's meta-call nonce at build time. A descriptor
/// is single-use: once a call carrying it has been included, resubmitting it is
/// rejected as stale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubstrateCallDescriptor {
    /// The SS58 address of the mapped account the call is dispatched as.
    pub who: String,
    /// The canonical encoding of the call.
    pub call_data: Bytes,
    /// The mapping nonce the signature is bound to.
    pub nonce: u64,
}

/// The arguments of `EvmAccountMapping::meta_call`, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct MetaCallArgs {
    /// The mapped account the inner call is dispatched as.
    pub who: AccountId32,
    /// The canonical encoding of the inner call.
    pub call_data: Vec<u8>,
    /// The mapping nonce the signature is bound to.
    pub nonce: u64,
    /// The EIP-712 signature over the `SubstrateCall` payload.
    pub signature: EvmSignature,
    /// Opaque extension data; always `None` for wallet-authorized calls.
    pub extra: Option<Vec<u8>>,
}
