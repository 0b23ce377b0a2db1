// Path: crates/cli/src/commands/address.rs

use anyhow::{anyhow, Result};
use clap::Parser;
use evm_mapping_tx::mapping::{derive_mapped_address, mapped_account_id};
use evm_mapping_types::app::CompressedPubkey;
use evm_mapping_types::config::MappingConfig;

#[derive(Parser, Debug)]
pub struct AddressArgs {
    /// The 33-byte compressed secp256k1 public key, hex-encoded.
    #[clap(long)]
    pub pubkey: String,
    /// The SS58 prefix; defaults to the configured prefix.
    #[clap(long)]
    pub prefix: Option<u16>,
}

pub fn run(args: AddressArgs, config: &MappingConfig) -> Result<String> {
    let pubkey: CompressedPubkey = args
        .pubkey
        .parse()
        .map_err(|e| anyhow!("Invalid public key: {}", e))?;
    let prefix = args.prefix.unwrap_or(config.ss58_prefix);
    let address = derive_mapped_address(&pubkey, prefix)?;
    Ok(format!(
        "Address:    {}\nAccount ID: 0x{}\nPrefix:     {}",
        address,
        hex::encode(mapped_account_id(&pubkey).0),
        prefix
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use evm_mapping_test_utils::fixtures::{
        DEV0_ACCOUNT_ID, DEV0_ADDRESS_PREFIX_30, DEV0_ADDRESS_PREFIX_42, DEV0_COMPRESSED_PUBKEY,
    };

    fn args(prefix: Option<u16>) -> AddressArgs {
        AddressArgs {
            pubkey: DEV0_COMPRESSED_PUBKEY.to_string(),
            prefix,
        }
    }

    #[test]
    fn test_uses_configured_prefix_by_default() {
        let out = run(args(None), &MappingConfig::default()).unwrap();
        assert!(out.contains(DEV0_ADDRESS_PREFIX_30));
        assert!(out.contains(DEV0_ACCOUNT_ID));

        let out = run(args(Some(42)), &MappingConfig::default()).unwrap();
        assert!(out.contains(DEV0_ADDRESS_PREFIX_42));
    }

    #[test]
    fn test_rejects_uncompressed_key() {
        let bad = AddressArgs {
            pubkey: format!("04{}", "11".repeat(64)),
            prefix: None,
        };
        assert!(run(bad, &MappingConfig::default()).is_err());
    }
}
