//! Tests for error classification, meta-call construction, and account locks.

use super::*;
use crate::mapping::mapping_account_from_pubkey;
use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use evm_mapping_test_utils::fixtures::{
    DEV0_ACCOUNT_ID, DEV0_ADDRESS_PREFIX_30, DEV0_COMPRESSED_PUBKEY, DEV0_EVM_ADDRESS,
    DEV0_PRIVATE_KEY,
};
use evm_mapping_test_utils::{LocalWallet, MockChain};
use evm_mapping_types::app::TypedDataPayload;
use evm_mapping_types::codec::from_bytes_canonical;
use evm_mapping_types::error::CryptoError;
use std::time::Duration;

#[test]
fn test_stale_nonce_rejections() {
    for message in [
        "1010: Invalid Transaction: Transaction is outdated",
        "Stale nonce",
    ] {
        assert_eq!(
            classify_chain_error(ChainError::Rejected(message.to_string())),
            TransactionError::StaleNonce(message.to_string())
        );
    }
}

#[test]
fn test_other_rejections_are_sign_and_send_errors() {
    let error = classify_chain_error(ChainError::Rejected("Cancelled".to_string()));
    assert!(error.is_cancelled());
    assert_eq!(error.code(), "TX_CANCELLED");

    let error = classify_chain_error(ChainError::Rejected("1014: Priority is too low".to_string()));
    assert!(!error.is_cancelled());
    assert_eq!(error.to_string(), "Sign and send failed: 1014: Priority is too low");

    assert_eq!(
        classify_chain_error(ChainError::Rpc("timeout".to_string())),
        TransactionError::Chain(ChainError::Rpc("timeout".to_string()))
    );
}

#[test]
fn test_wallet_rejection_is_cancellation_aware() {
    assert!(classify_wallet_error(WalletError::Rejected("Cancelled by user".to_string())).is_cancelled());
    assert!(matches!(
        classify_wallet_error(WalletError::Provider("locked".to_string())),
        TransactionError::Wallet(WalletError::Provider(_))
    ));
}

fn dev0_descriptor(nonce: u64) -> SubstrateCallDescriptor {
    SubstrateCallDescriptor {
        who: DEV0_ADDRESS_PREFIX_30.to_string(),
        call_data: Bytes::from(vec![0x00, 0x07, 0x00]),
        nonce,
    }
}

fn dev0_account() -> MappingAccount {
    mapping_account_from_pubkey(
        DEV0_EVM_ADDRESS,
        DEV0_COMPRESSED_PUBKEY.parse().unwrap(),
        30,
    )
    .unwrap()
}

/// A wallet whose prompt is never answered.
struct UnansweredWallet;

#[async_trait]
impl WalletProvider for UnansweredWallet {
    async fn sign_message(&self, _: Address, _: &str) -> Result<EvmSignature, WalletError> {
        futures::future::pending().await
    }

    async fn sign_typed_data(&self, _: &TypedDataPayload) -> Result<EvmSignature, WalletError> {
        futures::future::pending().await
    }
}

#[test]
fn test_meta_call_carries_descriptor_and_signature() {
    let signature = EvmSignature([0x42; 65]);
    let call = meta_call(&dev0_descriptor(9), signature).unwrap();
    assert_eq!(call.pallet, MAPPING_PALLET);
    assert_eq!(call.call, META_CALL);

    let args: MetaCallArgs = from_bytes_canonical(&call.args).unwrap();
    assert_eq!(args.who, DEV0_ACCOUNT_ID.parse::<AccountId32>().unwrap());
    assert_eq!(args.call_data, vec![0x00, 0x07, 0x00]);
    assert_eq!(args.nonce, 9);
    assert_eq!(args.signature, signature);
    assert_eq!(args.extra, None);
}

#[test]
fn test_meta_call_rejects_undecodable_who() {
    let mut descriptor = dev0_descriptor(0);
    descriptor.who = "not-an-address".to_string();
    assert!(matches!(
        meta_call(&descriptor, EvmSignature([0x42; 65])),
        Err(TransactionError::Crypto(CryptoError::InvalidAddress(_)))
    ));
}

#[tokio::test]
async fn test_authorized_call_is_dispatched_as_the_signed_account() {
    let chain = Arc::new(MockChain::with_mapping_pallet());
    let submitter = TransactionSubmitter::new(chain.clone());
    submitter
        .submit_authorized(&dev0_descriptor(0), EvmSignature([0x42; 65]))
        .await
        .unwrap();

    let submissions = chain.submissions();
    assert_eq!(submissions.len(), 1);
    let args: MetaCallArgs = from_bytes_canonical(&submissions[0].call.args).unwrap();
    assert_eq!(args.who, DEV0_ACCOUNT_ID.parse::<AccountId32>().unwrap());

    // A checksum mismatch never reaches the chain.
    let mut descriptor = dev0_descriptor(1);
    descriptor.who.pop();
    descriptor.who.push('Y');
    let err = submitter
        .submit_authorized(&descriptor, EvmSignature([0x42; 65]))
        .await
        .unwrap_err();
    assert!(matches!(err, TransactionError::Crypto(_)));
    assert_eq!(chain.submissions().len(), 1);
}

#[tokio::test]
async fn test_abandoned_meta_call_releases_account_lock() {
    let chain = Arc::new(MockChain::with_mapping_pallet());
    let config = MappingConfig {
        serialize_meta_calls: true,
        ..MappingConfig::default()
    };
    let submitter = TransactionSubmitter::with_config(chain.clone(), &config);
    let account = dev0_account();
    let call = RuntimeCall::new("System", "remark", vec![0x00]);

    let pending = tokio::time::timeout(
        Duration::from_millis(50),
        submitter.submit_meta(&call, &UnansweredWallet, &account),
    )
    .await;
    assert!(pending.is_err());
    assert!(submitter.account_locks.is_empty());
    assert!(chain.submissions().is_empty());

    // The account is not left locked for the next call.
    let wallet = LocalWallet::from_hex(DEV0_PRIVATE_KEY).unwrap();
    submitter.submit_meta(&call, &wallet, &account).await.unwrap();
    assert!(submitter.account_locks.is_empty());
}
