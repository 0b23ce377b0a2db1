// Path: crates/types/src/app/eip712.rs
//! EIP-712 structured-data payloads in the `eth_signTypedData_v4` wire shape.

use super::call::SubstrateCallDescriptor;
use crate::error::CryptoError;
use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// The reserved type name of the domain separator struct.
pub const EIP712_DOMAIN_TYPE: &str = "EIP712Domain";

/// An EIP-712 domain.
///
/// Only the fields that are `Some` take part in the domain separator, in the
/// canonical order `name, version, chainId, verifyingContract, salt`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    /// The user-readable signing domain name.
    pub name: String,
    /// The current major version of the signing domain.
    pub version: String,
    /// The EIP-155 chain id the signature is valid for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// The contract (or pallet pseudo-address) that verifies the signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<Address>,
    /// A fixed disambiguating salt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<B256>,
}

/// One `{ name, type }` entry of an EIP-712 type table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeField {
    /// The member name.
    pub name: String,
    /// The declared Solidity type.
    #[serde(rename = "type")]
    pub ty: String,
}

impl TypeField {
    /// Creates a type-table entry.
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }
}

/// The `types` object of a typed-data payload, keyed by struct name.
pub type TypeTable = BTreeMap<String, Vec<TypeField>>;

/// The message of an `IssueQueryCertificate` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueQueryCertificate {
    /// Human-readable explanation shown by the wallet.
    pub description: String,
    /// Human-readable validity statement.
    pub time_to_live: String,
    /// The SCALE-encoded certificate body.
    pub encoded_cert: Bytes,
}

/// The message of a `PhatContractQuery` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhatContractQuery {
    /// Human-readable explanation shown by the wallet.
    pub description: String,
    /// The SCALE-encoded query.
    pub encoded_query: Bytes,
}

/// The three message kinds understood by the verifying pallet and workers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypedMessage {
    /// A query certificate issued by the wallet holder.
    IssueQueryCertificate(IssueQueryCertificate),
    /// A signed contract query.
    PhatContractQuery(PhatContractQuery),
    /// An authorization for a native-chain call.
    SubstrateCall(SubstrateCallDescriptor),
}

impl TypedMessage {
    /// The EIP-712 `primaryType` of this message.
    pub fn primary_type(&self) -> &'static str {
        match self {
            Self::IssueQueryCertificate(_) => "IssueQueryCertificate",
            Self::PhatContractQuery(_) => "PhatContractQuery",
            Self::SubstrateCall(_) => "SubstrateCall",
        }
    }
}

/// A typed-data payload ready to hand to a wallet for signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedDataPayload {
    /// The EVM account expected to sign.
    pub account: Address,
    /// The signing domain.
    pub domain: Eip712Domain,
    /// The type table, including the `EIP712Domain` entry.
    pub types: TypeTable,
    /// The message; its variant determines `primaryType`.
    pub message: TypedMessage,
}

impl TypedDataPayload {
    /// The EIP-712 `primaryType` of the payload.
    pub fn primary_type(&self) -> &'static str {
        self.message.primary_type()
    }

    /// Returns the call descriptor if this is a `SubstrateCall` payload.
    pub fn substrate_call(&self) -> Option<&SubstrateCallDescriptor> {
        match &self.message {
            TypedMessage::SubstrateCall(call) => Some(call),
            _ => None,
        }
    }

    /// Serializes the payload to its `eth_signTypedData_v4` JSON form.
    pub fn to_json(&self) -> Result<serde_json::Value, CryptoError> {
        serde_json::to_value(self).map_err(|e| CryptoError::Deserialization(e.to_string()))
    }

    /// Parses a payload from its `eth_signTypedData_v4` JSON form.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CryptoError> {
        serde_json::from_value(value).map_err(|e| CryptoError::Deserialization(e.to_string()))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TypedDataWire {
    account: Address,
    domain: Eip712Domain,
    types: TypeTable,
    primary_type: String,
    message: serde_json::Value,
}

impl Serialize for TypedDataPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::Error;
        let message = match &self.message {
            TypedMessage::IssueQueryCertificate(m) => serde_json::to_value(m),
            TypedMessage::PhatContractQuery(m) => serde_json::to_value(m),
            TypedMessage::SubstrateCall(m) => serde_json::to_value(m),
        }
        .map_err(S::Error::custom)?;
        TypedDataWire {
            account: self.account,
            domain: self.domain.clone(),
            types: self.types.clone(),
            primary_type: self.primary_type().to_string(),
            message,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypedDataPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        let wire = TypedDataWire::deserialize(deserializer)?;
        let message = match wire.primary_type.as_str() {
            "IssueQueryCertificate" => serde_json::from_value(wire.message)
                .map(TypedMessage::IssueQueryCertificate),
            "PhatContractQuery" => {
                serde_json::from_value(wire.message).map(TypedMessage::PhatContractQuery)
            }
            "SubstrateCall" => serde_json::from_value(wire.message).map(TypedMessage::SubstrateCall),
            other => {
                return Err(D::Error::custom(format!(
                    "unsupported primaryType: {}",
                    other
                )))
            }
        }
        .map_err(D::Error::custom)?;
        if !wire.types.contains_key(&wire.primary_type) {
            return Err(D::Error::custom(format!(
                "type table has no entry for primaryType {}",
                wire.primary_type
            )));
        }
        Ok(Self {
            account: wire.account,
            domain: wire.domain,
            types: wire.types,
            message,
        })
    }
}
