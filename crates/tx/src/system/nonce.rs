// Path: crates/tx/src/system/nonce.rs

//! Binding a pending call to the caller's mapping nonce.
//!
//! The nonce is read fresh for every call and is not reserved: two builders
//! running concurrently for one account observe the same value, and only the
//! first of their calls to be included is accepted. See
//! [`crate::submit::TransactionSubmitter`] for opt-in serialization.

use alloy_primitives::Bytes;
use evm_mapping_api::chain::ChainApi;
use evm_mapping_crypto::address::ss58_decode;
use evm_mapping_types::app::{AccountId32, RuntimeCall, SubstrateCallDescriptor};
use evm_mapping_types::codec;
use evm_mapping_types::error::{ChainError, TransactionError};
use evm_mapping_types::keys::{ACCOUNT_NONCE_STORAGE, MAPPING_PALLET};
use tracing::debug;

/// Generates the storage map key of an account's mapping nonce.
fn get_mapping_nonce_key(account_id: &AccountId32) -> Vec<u8> {
    codec::to_bytes_canonical(account_id)
}

/// Reads the mapping nonce of `account_id`. An absent entry means zero.
pub async fn get_mapping_nonce<C: ChainApi + ?Sized>(
    chain: &C,
    account_id: &AccountId32,
) -> Result<u64, TransactionError> {
    let key = get_mapping_nonce_key(account_id);
    match chain
        .storage(MAPPING_PALLET, ACCOUNT_NONCE_STORAGE, &key)
        .await?
    {
        Some(raw) => Ok(codec::from_bytes_canonical(&raw).map_err(ChainError::Decode)?),
        None => Ok(0),
    }
}

/// Packages `call`, to be dispatched as the mapped account `who` (SS58), into
/// a descriptor ready for EIP-712 signing.
pub async fn build_call_descriptor<C: ChainApi + ?Sized>(
    chain: &C,
    who: &str,
    call: &RuntimeCall,
) -> Result<SubstrateCallDescriptor, TransactionError> {
    let (_, account_id) = ss58_decode(who)?;
    let nonce = get_mapping_nonce(chain, &account_id).await?;
    let call_data = chain.encode_call(call)?;
    debug!(
        target: "mapping",
        who,
        nonce,
        call = %format!("{}.{}", call.pallet, call.call),
        "built call descriptor"
    );
    Ok(SubstrateCallDescriptor {
        who: who.to_string(),
        call_data: Bytes::from(call_data),
        nonce,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use evm_mapping_test_utils::fixtures::{DEV0_ACCOUNT_ID, DEV0_ADDRESS_PREFIX_30};
    use evm_mapping_test_utils::MockChain;

    fn dev0() -> AccountId32 {
        DEV0_ACCOUNT_ID.parse().unwrap()
    }

    #[tokio::test]
    async fn test_absent_nonce_is_zero() {
        let chain = MockChain::with_mapping_pallet();
        assert_eq!(get_mapping_nonce(&chain, &dev0()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_descriptor_binds_current_nonce_and_encoding() {
        let chain = MockChain::with_mapping_pallet();
        chain.set_mapping_nonce(&dev0(), 7);
        let call = RuntimeCall::new("System", "remark", vec![0x08, 0xde, 0xad]);

        let descriptor = build_call_descriptor(&chain, DEV0_ADDRESS_PREFIX_30, &call)
            .await
            .unwrap();
        assert_eq!(descriptor.who, DEV0_ADDRESS_PREFIX_30);
        assert_eq!(descriptor.nonce, 7);
        assert_eq!(
            descriptor.call_data.to_vec(),
            vec![0x00, 0x07, 0x08, 0xde, 0xad]
        );
    }

    #[tokio::test]
    async fn test_concurrent_builders_observe_the_same_nonce() {
        let chain = MockChain::with_mapping_pallet();
        chain.set_mapping_nonce(&dev0(), 2);
        let call = RuntimeCall::new("System", "remark", vec![0x00]);
        let (a, b) = tokio::join!(
            build_call_descriptor(&chain, DEV0_ADDRESS_PREFIX_30, &call),
            build_call_descriptor(&chain, DEV0_ADDRESS_PREFIX_30, &call)
        );
        assert_eq!(a.unwrap().nonce, b.unwrap().nonce);
    }

    #[tokio::test]
    async fn test_invalid_inputs() {
        let chain = MockChain::with_mapping_pallet();
        let call = RuntimeCall::new("System", "remark", vec![0x00]);
        assert!(matches!(
            build_call_descriptor(&chain, "not-an-address", &call).await,
            Err(TransactionError::Crypto(_))
        ));

        let unknown = RuntimeCall::new("Nope", "nothing", vec![]);
        assert!(matches!(
            build_call_descriptor(&chain, DEV0_ADDRESS_PREFIX_30, &unknown).await,
            Err(TransactionError::Chain(ChainError::UnknownCall { .. }))
        ));
    }
}
