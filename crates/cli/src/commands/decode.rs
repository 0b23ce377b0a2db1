// Path: crates/cli/src/commands/decode.rs

use anyhow::{Context, Result};
use clap::Parser;
use evm_mapping_crypto::address::ss58_decode;

#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// The SS58 address to decode.
    pub address: String,
}

pub fn run(args: DecodeArgs) -> Result<String> {
    let (prefix, account_id) =
        ss58_decode(&args.address).with_context(|| format!("cannot decode {}", args.address))?;
    Ok(format!(
        "Prefix:     {}\nAccount ID: 0x{}",
        prefix,
        hex::encode(account_id.0)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use evm_mapping_test_utils::fixtures::{DEV0_ACCOUNT_ID, DEV0_ADDRESS_PREFIX_30};

    #[test]
    fn test_decode_mapped_address() {
        let out = run(DecodeArgs {
            address: DEV0_ADDRESS_PREFIX_30.to_string(),
        })
        .unwrap();
        assert_eq!(out, format!("Prefix:     30\nAccount ID: {}", DEV0_ACCOUNT_ID));
    }

    #[test]
    fn test_decode_rejects_corrupted_checksum() {
        let mut corrupted = DEV0_ADDRESS_PREFIX_30.to_string();
        corrupted.pop();
        corrupted.push('e');
        assert!(run(DecodeArgs { address: corrupted }).is_err());
    }
}
