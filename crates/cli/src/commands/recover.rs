// Path: crates/cli/src/commands/recover.rs

use crate::util::to_pretty_json;
use anyhow::{anyhow, Result};
use clap::Parser;
use evm_mapping_tx::mapping::recover_mapping_account;
use evm_mapping_types::app::EvmSignature;
use evm_mapping_types::config::MappingConfig;

#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// The 65-byte `personal_sign` signature, hex-encoded.
    #[clap(long)]
    pub signature: String,
    /// The signed message; defaults to the configured challenge message.
    #[clap(long)]
    pub message: Option<String>,
    /// The SS58 prefix; defaults to the configured prefix.
    #[clap(long)]
    pub prefix: Option<u16>,
}

pub fn run(args: RecoverArgs, config: &MappingConfig) -> Result<String> {
    let signature: EvmSignature = args
        .signature
        .parse()
        .map_err(|e| anyhow!("Invalid signature: {}", e))?;
    let message = args
        .message
        .as_deref()
        .unwrap_or(&config.challenge_message);
    let prefix = args.prefix.unwrap_or(config.ss58_prefix);
    let account = recover_mapping_account(message, &signature, prefix)?;
    log::info!("recovered {} for {}", account.address(), account.evm_address());
    to_pretty_json(&account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use evm_mapping_crypto::sign::ecdsa::{eip191_hash, sign_prehash};
    use evm_mapping_test_utils::fixtures::{
        DEV0_ADDRESS_PREFIX_30, DEV0_EVM_ADDRESS, DEV0_PRIVATE_KEY,
    };
    use k256::ecdsa::SigningKey;

    fn sign(message: &str) -> String {
        let bytes = hex::decode(DEV0_PRIVATE_KEY.trim_start_matches("0x")).unwrap();
        let key = SigningKey::from_slice(&bytes).unwrap();
        let signature = sign_prehash(&key, &eip191_hash(message)).unwrap();
        hex::encode(signature.as_bytes())
    }

    #[test]
    fn test_recovers_from_default_challenge() {
        let config = MappingConfig::default();
        let out = run(
            RecoverArgs {
                signature: sign(&config.challenge_message),
                message: None,
                prefix: None,
            },
            &config,
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["address"], DEV0_ADDRESS_PREFIX_30);
        assert_eq!(
            json["evmAddress"].as_str().unwrap().to_lowercase(),
            DEV0_EVM_ADDRESS.to_string().to_lowercase()
        );
        assert_eq!(json["ss58Prefix"], 30);
    }

    #[test]
    fn test_wrong_message_recovers_a_different_account() {
        let config = MappingConfig::default();
        let out = run(
            RecoverArgs {
                signature: sign("something else"),
                message: None,
                prefix: None,
            },
            &config,
        )
        .unwrap();
        assert!(!out.contains(DEV0_ADDRESS_PREFIX_30));
    }
}
