//! Tests for the payload builders and the on-chain domain.

use super::*;
use evm_mapping_crypto::sign::eip712::typed_data_signing_hash;
use evm_mapping_test_utils::fixtures::{
    sample_domain, DEV0_ADDRESS_PREFIX_30, DEV0_EVM_ADDRESS, SAMPLE_CHAIN_ID,
};
use evm_mapping_test_utils::MockChain;

#[test]
fn test_certificate_payload_shape() {
    let payload = build_certificate_payload(DEV0_EVM_ADDRESS, vec![0xde, 0xad, 0xbe, 0xef], 100);
    let json = payload.to_json().unwrap();

    assert_eq!(json["primaryType"], "IssueQueryCertificate");
    assert_eq!(json["domain"]["name"], "Phat Query Certificate");
    assert_eq!(json["domain"]["version"], "1");
    assert_eq!(
        json["domain"]["salt"],
        "0x0ea813d1592526d672ea2576d7a07914cef2ca301b35c5eed941f7c897512a00"
    );
    assert!(json["domain"].get("chainId").is_none());
    assert_eq!(
        json["message"]["timeToLive"],
        "The Certificate will be valid till block 100."
    );
    assert_eq!(json["message"]["encodedCert"], "0xdeadbeef");
    assert_eq!(json["types"]["EIP712Domain"][2]["name"], "salt");
    assert_eq!(json["types"]["EIP712Domain"][2]["type"], "bytes32");

    // The reference digest was computed independently of this crate.
    assert_eq!(
        hex::encode(typed_data_signing_hash(&payload).unwrap()),
        "e86a8a239b3a54a01c5ed5245215a35a3e921bfa3410181cc652fecf68f47f65"
    );
}

#[test]
fn test_query_payload_shape() {
    let payload = build_query_payload(DEV0_EVM_ADDRESS, vec![0x01, 0x02]);
    let json = payload.to_json().unwrap();
    assert_eq!(json["primaryType"], "PhatContractQuery");
    assert_eq!(json["domain"]["name"], "Phat Contract Query");
    assert_eq!(json["message"]["description"], QUERY_DESCRIPTION);
    assert_eq!(json["message"]["encodedQuery"], "0x0102");
    assert_eq!(json["types"]["PhatContractQuery"][1]["type"], "bytes");
    assert!(typed_data_signing_hash(&payload).is_ok());
}

#[test]
fn test_call_payload_roundtrips_descriptor() {
    let descriptor = SubstrateCallDescriptor {
        who: DEV0_ADDRESS_PREFIX_30.to_string(),
        call_data: Bytes::from(vec![0x00, 0x07, 0x00]),
        nonce: 9,
    };
    let payload = build_call_payload(DEV0_EVM_ADDRESS, sample_domain(), descriptor.clone());
    let json = payload.to_json().unwrap();
    assert_eq!(json["primaryType"], "SubstrateCall");
    assert_eq!(json["domain"]["chainId"], SAMPLE_CHAIN_ID);
    assert_eq!(
        json["types"]["EIP712Domain"][3]["name"],
        "verifyingContract"
    );
    assert_eq!(json["types"]["SubstrateCall"][2]["type"], "uint64");

    let back = TypedDataPayload::from_json(json).unwrap();
    assert_eq!(back.substrate_call(), Some(&descriptor));
    assert!(typed_data_signing_hash(&back).is_ok());
}

#[tokio::test]
async fn test_build_domain_reads_pallet_constants() {
    let chain = MockChain::with_mapping_pallet();
    assert_eq!(build_domain(&chain).await.unwrap(), sample_domain());
    assert!(supports_account_mapping(&chain).await.unwrap());
}

#[tokio::test]
async fn test_missing_constants_mean_unsupported_chain() {
    let chain = MockChain::new();
    assert!(!supports_account_mapping(&chain).await.unwrap());
    assert_eq!(
        build_domain(&chain).await.unwrap_err(),
        DomainError::Unavailable {
            constant: EIP712_CHAIN_ID_CONST
        }
    );

    let chain = MockChain::with_mapping_pallet();
    chain.remove_constant(EIP712_VERSION_CONST);
    assert_eq!(
        build_domain(&chain).await.unwrap_err(),
        DomainError::Unavailable {
            constant: EIP712_VERSION_CONST
        }
    );
}

#[tokio::test]
async fn test_malformed_constants_are_decode_errors() {
    let chain = MockChain::with_mapping_pallet();
    chain.set_constant(EIP712_CHAIN_ID_CONST, vec![0x01, 0x02]);
    assert!(matches!(
        build_domain(&chain).await,
        Err(DomainError::Decode {
            constant: EIP712_CHAIN_ID_CONST,
            ..
        })
    ));

    let chain = MockChain::with_mapping_pallet();
    chain.set_constant(EIP712_CHAIN_ID_CONST, [0xffu8; 32].to_vec());
    assert!(matches!(
        build_domain(&chain).await,
        Err(DomainError::Decode { .. })
    ));

    let chain = MockChain::with_mapping_pallet();
    chain.set_constant(EIP712_NAME_CONST, codec::to_bytes_canonical(&vec![0xffu8, 0xfe]));
    assert!(matches!(
        build_domain(&chain).await,
        Err(DomainError::Decode {
            constant: EIP712_NAME_CONST,
            ..
        })
    ));
}
