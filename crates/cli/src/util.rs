// Path: crates/cli/src/util.rs

use anyhow::{Context, Result};
use evm_mapping_types::config::MappingConfig;
use std::path::Path;

/// Loads the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<MappingConfig> {
    match path {
        Some(path) => {
            log::debug!("loading config from {}", path.display());
            MappingConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        }
        None => Ok(MappingConfig::default()),
    }
}

/// Decodes a hex argument, with or without a `0x` prefix.
pub fn parse_hex_bytes(s: &str) -> Result<Vec<u8>> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s)).with_context(|| format!("invalid hex: {}", s))
}

/// Renders a value as pretty JSON.
pub fn to_pretty_json(value: &impl serde::Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
