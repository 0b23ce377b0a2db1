// Path: crates/crypto/src/sign/eip712/mod.rs
//! EIP-712 signing digests for the account mapping payloads.
//!
//! The message structs are declared once with `sol!` so the digest always
//! agrees with what `eth_signTypedData_v4` computes in the wallet.

use crate::error::CryptoError;
use alloy_primitives::{B256, U256};
use alloy_sol_types::{sol, SolStruct};
use evm_mapping_types::app::{
    Eip712Domain, EvmSignature, TypeTable, TypedDataPayload, TypedMessage, EIP712_DOMAIN_TYPE,
};
use k256::ecdsa::VerifyingKey;
use std::borrow::Cow;

mod typed {
    use super::sol;

    sol! {
        struct IssueQueryCertificate {
            string description;
            string timeToLive;
            bytes encodedCert;
        }

        struct PhatContractQuery {
            string description;
            bytes encodedQuery;
        }

        struct SubstrateCall {
            string who;
            bytes callData;
            uint64 nonce;
        }
    }
}

/// Converts a domain into the `alloy-sol-types` representation.
pub fn sol_domain(domain: &Eip712Domain) -> alloy_sol_types::Eip712Domain {
    alloy_sol_types::Eip712Domain::new(
        Some(Cow::Owned(domain.name.clone())),
        Some(Cow::Owned(domain.version.clone())),
        domain.chain_id.map(U256::from),
        domain.verifying_contract,
        domain.salt,
    )
}

/// The `EIP712Domain` type-table entry implied by the fields present in `domain`.
pub fn domain_type_fields(domain: &Eip712Domain) -> Vec<(&'static str, &'static str)> {
    let mut fields = vec![("name", "string"), ("version", "string")];
    if domain.chain_id.is_some() {
        fields.push(("chainId", "uint256"));
    }
    if domain.verifying_contract.is_some() {
        fields.push(("verifyingContract", "address"));
    }
    if domain.salt.is_some() {
        fields.push(("salt", "bytes32"));
    }
    fields
}

fn encode_type(name: &str, table: &TypeTable) -> Option<String> {
    let fields = table.get(name)?;
    let members: Vec<String> = fields
        .iter()
        .map(|f| format!("{} {}", f.ty, f.name))
        .collect();
    Some(format!("{}({})", name, members.join(",")))
}

fn check_type_table(payload: &TypedDataPayload, expected: &str) -> Result<(), CryptoError> {
    let primary = payload.primary_type();
    let declared = encode_type(primary, &payload.types).ok_or_else(|| {
        CryptoError::Deserialization(format!("type table has no entry for {}", primary))
    })?;
    if declared != expected {
        return Err(CryptoError::Deserialization(format!(
            "type table declares {} but the message encodes as {}",
            declared, expected
        )));
    }

    let domain_expected: Vec<String> = domain_type_fields(&payload.domain)
        .into_iter()
        .map(|(name, ty)| format!("{} {}", ty, name))
        .collect();
    let domain_expected = format!("{}({})", EIP712_DOMAIN_TYPE, domain_expected.join(","));
    match encode_type(EIP712_DOMAIN_TYPE, &payload.types) {
        Some(declared) if declared == domain_expected => Ok(()),
        Some(declared) => Err(CryptoError::Deserialization(format!(
            "domain type {} does not match the domain fields {}",
            declared, domain_expected
        ))),
        None => Err(CryptoError::Deserialization(format!(
            "type table has no {} entry",
            EIP712_DOMAIN_TYPE
        ))),
    }
}

/// Computes the EIP-712 digest a wallet signs for `payload`:
/// `keccak256(0x1901 || domainSeparator || hashStruct(message))`.
///
/// The payload's type table must describe exactly the message and domain it
/// carries; otherwise the wallet would hash something else.
pub fn typed_data_signing_hash(payload: &TypedDataPayload) -> Result<B256, CryptoError> {
    let domain = sol_domain(&payload.domain);
    match &payload.message {
        TypedMessage::IssueQueryCertificate(m) => {
            let msg = typed::IssueQueryCertificate {
                description: m.description.clone(),
                timeToLive: m.time_to_live.clone(),
                encodedCert: m.encoded_cert.clone(),
            };
            check_type_table(payload, &typed::IssueQueryCertificate::eip712_encode_type())?;
            Ok(msg.eip712_signing_hash(&domain))
        }
        TypedMessage::PhatContractQuery(m) => {
            let msg = typed::PhatContractQuery {
                description: m.description.clone(),
                encodedQuery: m.encoded_query.clone(),
            };
            check_type_table(payload, &typed::PhatContractQuery::eip712_encode_type())?;
            Ok(msg.eip712_signing_hash(&domain))
        }
        TypedMessage::SubstrateCall(m) => {
            let msg = typed::SubstrateCall {
                who: m.who.clone(),
                callData: m.call_data.clone(),
                nonce: m.nonce,
            };
            check_type_table(payload, &typed::SubstrateCall::eip712_encode_type())?;
            Ok(msg.eip712_signing_hash(&domain))
        }
    }
}

/// Recovers the public key that signed `payload`.
pub fn recover_typed_data_signer(
    payload: &TypedDataPayload,
    signature: &EvmSignature,
) -> Result<VerifyingKey, CryptoError> {
    let digest = typed_data_signing_hash(payload)?;
    super::ecdsa::recover_pubkey(&digest, signature)
}
