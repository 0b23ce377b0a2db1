// Path: crates/types/src/config/mod.rs

//! Shared configuration for the account mapping SDK.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The SS58 prefix used when the caller does not pick one.
pub const DEFAULT_SS58_PREFIX: u16 = 30;

/// The personal message signed to expose the wallet's public key.
pub const DEFAULT_CHALLENGE_MESSAGE: &str = "Allows to access the pubkey address.";

/// The highest prefix the two-byte SS58 address format can carry.
pub const MAX_SS58_PREFIX: u16 = 16383;

/// Runtime options for address derivation and meta-call submission.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MappingConfig {
    /// The SS58 address-version prefix for derived addresses.
    #[serde(default = "default_ss58_prefix")]
    pub ss58_prefix: u16,
    /// The personal message signed during public-key recovery.
    #[serde(default = "default_challenge_message")]
    pub challenge_message: String,
    /// If true, meta-calls from one mapped account are submitted one at a time,
    /// holding a per-account lock from nonce lookup until the call settles.
    #[serde(default)]
    pub serialize_meta_calls: bool,
}

fn default_ss58_prefix() -> u16 {
    DEFAULT_SS58_PREFIX
}
fn default_challenge_message() -> String {
    DEFAULT_CHALLENGE_MESSAGE.to_string()
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            ss58_prefix: default_ss58_prefix(),
            challenge_message: default_challenge_message(),
            serialize_meta_calls: false,
        }
    }
}

impl MappingConfig {
    /// Parses and validates a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ss58_prefix > MAX_SS58_PREFIX {
            return Err(ConfigError::Invalid(format!(
                "ss58_prefix {} exceeds {}",
                self.ss58_prefix, MAX_SS58_PREFIX
            )));
        }
        if self.challenge_message.is_empty() {
            return Err(ConfigError::Invalid(
                "challenge_message must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
