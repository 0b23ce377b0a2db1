// Path: crates/cli/src/commands/typed_data.rs

use crate::util::{parse_hex_bytes, to_pretty_json};
use alloy_primitives::Address;
use anyhow::Result;
use clap::Subcommand;
use evm_mapping_crypto::sign::eip712::typed_data_signing_hash;
use evm_mapping_tx::eip712::{build_call_payload, build_certificate_payload, build_query_payload};
use evm_mapping_types::app::{Eip712Domain, SubstrateCallDescriptor, TypedDataPayload};

#[derive(Subcommand, Debug)]
pub enum TypedDataCommands {
    /// An `IssueQueryCertificate` payload.
    Certificate {
        /// The signing EVM account.
        #[clap(long)]
        account: Address,
        /// The SCALE-encoded certificate body, hex-encoded.
        #[clap(long)]
        encoded_cert: String,
        /// The last block the certificate is valid for.
        #[clap(long)]
        ttl_block: u32,
        /// Print the EIP-712 signing hash instead of the payload.
        #[clap(long)]
        digest: bool,
    },
    /// A `PhatContractQuery` payload.
    Query {
        #[clap(long)]
        account: Address,
        /// The encoded query, hex-encoded.
        #[clap(long)]
        encoded_query: String,
        #[clap(long)]
        digest: bool,
    },
    /// A `SubstrateCall` payload under an explicit domain.
    Call {
        #[clap(long)]
        account: Address,
        /// The SS58 address the call is dispatched as.
        #[clap(long)]
        who: String,
        /// The canonical call encoding, hex-encoded.
        #[clap(long)]
        call_data: String,
        /// The mapping nonce.
        #[clap(long)]
        nonce: u64,
        /// The domain name (the pallet's `EIP712Name`).
        #[clap(long, default_value = "Substrate")]
        name: String,
        /// The domain version (the pallet's `EIP712Version`).
        #[clap(long, default_value = "1")]
        version: String,
        #[clap(long)]
        chain_id: u64,
        #[clap(long)]
        verifying_contract: Address,
        #[clap(long)]
        digest: bool,
    },
}

fn render(payload: &TypedDataPayload, digest: bool) -> Result<String> {
    if digest {
        return Ok(typed_data_signing_hash(payload)?.to_string());
    }
    to_pretty_json(&payload.to_json()?)
}

pub fn run(command: TypedDataCommands) -> Result<String> {
    match command {
        TypedDataCommands::Certificate {
            account,
            encoded_cert,
            ttl_block,
            digest,
        } => {
            let payload =
                build_certificate_payload(account, parse_hex_bytes(&encoded_cert)?, ttl_block);
            render(&payload, digest)
        }
        TypedDataCommands::Query {
            account,
            encoded_query,
            digest,
        } => {
            let payload = build_query_payload(account, parse_hex_bytes(&encoded_query)?);
            render(&payload, digest)
        }
        TypedDataCommands::Call {
            account,
            who,
            call_data,
            nonce,
            name,
            version,
            chain_id,
            verifying_contract,
            digest,
        } => {
            let domain = Eip712Domain {
                name,
                version,
                chain_id: Some(chain_id),
                verifying_contract: Some(verifying_contract),
                salt: None,
            };
            let descriptor = SubstrateCallDescriptor {
                who,
                call_data: parse_hex_bytes(&call_data)?.into(),
                nonce,
            };
            render(&build_call_payload(account, domain, descriptor), digest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evm_mapping_test_utils::fixtures::{
        DEV0_EVM_ADDRESS, SAMPLE_CHAIN_ID, SAMPLE_VERIFYING_CONTRACT,
    };

    fn call(digest: bool) -> TypedDataCommands {
        TypedDataCommands::Call {
            account: DEV0_EVM_ADDRESS,
            who: "5C4hrfjw9DjXZTzV3MwzrrAr9P1MJhSrvWGWqi1eSuyUpnhM".to_string(),
            call_data: "0x0001ab".to_string(),
            nonce: 3,
            name: "Substrate".to_string(),
            version: "1".to_string(),
            chain_id: SAMPLE_CHAIN_ID,
            verifying_contract: SAMPLE_VERIFYING_CONTRACT,
            digest,
        }
    }

    #[test]
    fn test_call_digest_matches_reference() {
        assert_eq!(
            run(call(true)).unwrap(),
            "0x9b308cb2adb03200600df76bf6c573a3997f94794c82f7871a77791898d279ef"
        );
    }

    #[test]
    fn test_call_payload_json() {
        let json: serde_json::Value = serde_json::from_str(&run(call(false)).unwrap()).unwrap();
        assert_eq!(json["primaryType"], "SubstrateCall");
        assert_eq!(json["message"]["callData"], "0x0001ab");
        assert_eq!(json["message"]["nonce"], 3);
    }

    #[test]
    fn test_certificate_digest_matches_reference() {
        let out = run(TypedDataCommands::Certificate {
            account: DEV0_EVM_ADDRESS,
            encoded_cert: "deadbeef".to_string(),
            ttl_block: 100,
            digest: true,
        })
        .unwrap();
        assert_eq!(
            out,
            "0xe86a8a239b3a54a01c5ed5245215a35a3e921bfa3410181cc652fecf68f47f65"
        );
    }

    #[test]
    fn test_query_rejects_bad_hex() {
        assert!(run(TypedDataCommands::Query {
            account: DEV0_EVM_ADDRESS,
            encoded_query: "0xzz".to_string(),
            digest: false,
        })
        .is_err());
    }
}
