// Path: crates/tx/src/eip712/mod.rs

//! Builders for the three EIP-712 payloads understood by the chain and its
//! off-chain workers.
//!
//! Certificate and query payloads use fixed domains separated by a salt; the
//! call-authorization domain is read from the mapping pallet's constants.

use alloy_primitives::{b256, Address, Bytes, B256, U256};
use evm_mapping_api::chain::ChainApi;
use evm_mapping_crypto::sign::eip712::domain_type_fields;
use evm_mapping_types::app::{
    Eip712Domain, IssueQueryCertificate, PhatContractQuery, SubstrateCallDescriptor, TypeField,
    TypeTable, TypedDataPayload, TypedMessage, EIP712_DOMAIN_TYPE,
};
use evm_mapping_types::codec;
use evm_mapping_types::error::{ChainError, DomainError};
use evm_mapping_types::keys::{
    EIP712_CHAIN_ID_CONST, EIP712_NAME_CONST, EIP712_VERIFYING_CONTRACT_CONST,
    EIP712_VERSION_CONST, MAPPING_PALLET,
};
use tracing::debug;

/// `keccak256("phala/phat-contract")`, the salt of the certificate and query domains.
pub const SALT: B256 = b256!("0ea813d1592526d672ea2576d7a07914cef2ca301b35c5eed941f7c897512a00");

/// The domain name of certificate payloads.
pub const CERTIFICATE_DOMAIN_NAME: &str = "Phat Query Certificate";
/// The domain name of query payloads.
pub const QUERY_DOMAIN_NAME: &str = "Phat Contract Query";
/// The version shared by the certificate and query domains.
pub const DOMAIN_VERSION: &str = "1";

/// The wallet-facing explanation of a certificate payload.
pub const CERTIFICATE_DESCRIPTION: &str = "You are signing a Certificate that can be used to query Phat Contracts using your identity without further prompts.";
/// The wallet-facing explanation of a query payload.
pub const QUERY_DESCRIPTION: &str =
    "You are signing a query request that would be sent to a Phat Contract.";

/// The primary type of certificate payloads.
pub const CERTIFICATE_TYPE: &str = "IssueQueryCertificate";
/// The primary type of query payloads.
pub const QUERY_TYPE: &str = "PhatContractQuery";
/// The primary type of call-authorization payloads.
pub const CALL_TYPE: &str = "SubstrateCall";

fn salted_domain(name: &str) -> Eip712Domain {
    Eip712Domain {
        name: name.to_string(),
        version: DOMAIN_VERSION.to_string(),
        chain_id: None,
        verifying_contract: None,
        salt: Some(SALT),
    }
}

/// The fixed domain of certificate payloads.
pub fn certificate_domain() -> Eip712Domain {
    salted_domain(CERTIFICATE_DOMAIN_NAME)
}

/// The fixed domain of query payloads.
pub fn query_domain() -> Eip712Domain {
    salted_domain(QUERY_DOMAIN_NAME)
}

/// Builds the type table for `domain` plus one message struct.
fn type_table(domain: &Eip712Domain, primary: &str, fields: &[(&str, &str)]) -> TypeTable {
    let mut types = TypeTable::new();
    types.insert(
        EIP712_DOMAIN_TYPE.to_string(),
        domain_type_fields(domain)
            .into_iter()
            .map(|(name, ty)| TypeField::new(name, ty))
            .collect(),
    );
    types.insert(
        primary.to_string(),
        fields
            .iter()
            .map(|(name, ty)| TypeField::new(name, ty))
            .collect(),
    );
    types
}

/// The human-readable validity statement of a certificate.
pub fn certificate_time_to_live(ttl_block: u32) -> String {
    format!("The Certificate will be valid till block {}.", ttl_block)
}

/// Builds an `IssueQueryCertificate` payload for `encoded_cert`, valid until
/// block `ttl_block`.
pub fn build_certificate_payload(
    account: Address,
    encoded_cert: impl Into<Bytes>,
    ttl_block: u32,
) -> TypedDataPayload {
    let domain = certificate_domain();
    let types = type_table(
        &domain,
        CERTIFICATE_TYPE,
        &[
            ("description", "string"),
            ("timeToLive", "string"),
            ("encodedCert", "bytes"),
        ],
    );
    TypedDataPayload {
        account,
        domain,
        types,
        message: TypedMessage::IssueQueryCertificate(IssueQueryCertificate {
            description: CERTIFICATE_DESCRIPTION.to_string(),
            time_to_live: certificate_time_to_live(ttl_block),
            encoded_cert: encoded_cert.into(),
        }),
    }
}

/// Builds a `PhatContractQuery` payload for `encoded_query`.
pub fn build_query_payload(account: Address, encoded_query: impl Into<Bytes>) -> TypedDataPayload {
    let domain = query_domain();
    let types = type_table(
        &domain,
        QUERY_TYPE,
        &[("description", "string"), ("encodedQuery", "bytes")],
    );
    TypedDataPayload {
        account,
        domain,
        types,
        message: TypedMessage::PhatContractQuery(PhatContractQuery {
            description: QUERY_DESCRIPTION.to_string(),
            encoded_query: encoded_query.into(),
        }),
    }
}

/// Builds a `SubstrateCall` payload authorizing `descriptor` under `domain`.
pub fn build_call_payload(
    account: Address,
    domain: Eip712Domain,
    descriptor: SubstrateCallDescriptor,
) -> TypedDataPayload {
    let types = type_table(
        &domain,
        CALL_TYPE,
        &[("who", "string"), ("callData", "bytes"), ("nonce", "uint64")],
    );
    TypedDataPayload {
        account,
        domain,
        types,
        message: TypedMessage::SubstrateCall(descriptor),
    }
}

async fn required_constant<C: ChainApi + ?Sized>(
    chain: &C,
    constant: &'static str,
) -> Result<Vec<u8>, DomainError> {
    chain
        .constant(MAPPING_PALLET, constant)
        .await?
        .ok_or(DomainError::Unavailable { constant })
}

fn decode_string(constant: &'static str, raw: &[u8]) -> Result<String, DomainError> {
    let bytes: Vec<u8> =
        codec::from_bytes_canonical(raw).map_err(|reason| DomainError::Decode { constant, reason })?;
    String::from_utf8(bytes).map_err(|e| DomainError::Decode {
        constant,
        reason: e.to_string(),
    })
}

fn decode_chain_id(raw: &[u8]) -> Result<u64, DomainError> {
    let constant = EIP712_CHAIN_ID_CONST;
    let le: [u8; 32] =
        codec::from_bytes_canonical(raw).map_err(|reason| DomainError::Decode { constant, reason })?;
    u64::try_from(U256::from_le_bytes(le)).map_err(|_| DomainError::Decode {
        constant,
        reason: "chain id does not fit in 64 bits".to_string(),
    })
}

fn decode_address(raw: &[u8]) -> Result<Address, DomainError> {
    let bytes: [u8; 20] = codec::from_bytes_canonical(raw).map_err(|reason| DomainError::Decode {
        constant: EIP712_VERIFYING_CONTRACT_CONST,
        reason,
    })?;
    Ok(Address::from(bytes))
}

/// Reads the call-authorization domain from the mapping pallet's constants.
///
/// A missing constant means the chain does not run the mapping pallet and
/// yields [`DomainError::Unavailable`]; callers should not retry.
pub async fn build_domain<C: ChainApi + ?Sized>(chain: &C) -> Result<Eip712Domain, DomainError> {
    let chain_id = decode_chain_id(&required_constant(chain, EIP712_CHAIN_ID_CONST).await?)?;
    let name = decode_string(
        EIP712_NAME_CONST,
        &required_constant(chain, EIP712_NAME_CONST).await?,
    )?;
    let version = decode_string(
        EIP712_VERSION_CONST,
        &required_constant(chain, EIP712_VERSION_CONST).await?,
    )?;
    let verifying_contract =
        decode_address(&required_constant(chain, EIP712_VERIFYING_CONTRACT_CONST).await?)?;

    debug!(target: "eip712", %name, %version, chain_id, %verifying_contract, "built call domain");
    Ok(Eip712Domain {
        name,
        version,
        chain_id: Some(chain_id),
        verifying_contract: Some(verifying_contract),
        salt: None,
    })
}

/// Returns true if the chain runs the account mapping pallet.
pub async fn supports_account_mapping<C: ChainApi + ?Sized>(chain: &C) -> Result<bool, ChainError> {
    Ok(chain
        .constant(MAPPING_PALLET, EIP712_CHAIN_ID_CONST)
        .await?
        .is_some())
}

#[cfg(test)]
mod tests;
