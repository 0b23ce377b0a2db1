// Path: crates/types/src/app/account.rs
//! Identity types linking an EVM wallet to its mapped native-chain account.

use super::decode_hex_array;
use crate::error::CryptoError;
use alloy_primitives::Address;
use parity_scale_codec::{Decode, Encode};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of a SEC1-compressed secp256k1 public key.
pub const COMPRESSED_PUBKEY_LEN: usize = 33;
/// The length of an `r || s || v` recoverable ECDSA signature.
pub const SIGNATURE_LEN: usize = 65;

macro_rules! hex_newtype_serde {
    ($ty:ident) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($ty), self)
            }
        }

        impl AsRef<[u8]> for $ty {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }
    };
}

/// A 32-byte native-chain account identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Encode, Decode)]
pub struct AccountId32(pub [u8; 32]);

impl FromStr for AccountId32 {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex_array(s)
            .map(Self)
            .map_err(CryptoError::InvalidAddress)
    }
}

hex_newtype_serde!(AccountId32);

/// A SEC1-compressed secp256k1 public key (`0x02`/`0x03` prefix + x coordinate).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressedPubkey(pub [u8; COMPRESSED_PUBKEY_LEN]);

impl CompressedPubkey {
    /// Builds a key from a byte slice, checking length and SEC1 prefix.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; COMPRESSED_PUBKEY_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "compressed public key must be {} bytes, got {}",
                COMPRESSED_PUBKEY_LEN,
                bytes.len()
            ))
        })?;
        if arr[0] != 0x02 && arr[0] != 0x03 {
            return Err(CryptoError::InvalidKey(format!(
                "invalid SEC1 prefix 0x{:02x} for a compressed key",
                arr[0]
            )));
        }
        Ok(Self(arr))
    }

    /// Returns the raw 33 bytes.
    pub fn as_bytes(&self) -> &[u8; COMPRESSED_PUBKEY_LEN] {
        &self.0
    }
}

impl FromStr for CompressedPubkey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; COMPRESSED_PUBKEY_LEN] =
            decode_hex_array(s).map_err(CryptoError::InvalidKey)?;
        Self::from_slice(&bytes)
    }
}

hex_newtype_serde!(CompressedPubkey);

/// A 65-byte recoverable ECDSA signature as returned by EVM wallets.
///
/// The recovery byte `v` may be encoded as `0/1` or as `27/28`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub struct EvmSignature(pub [u8; SIGNATURE_LEN]);

impl EvmSignature {
    /// Builds a signature from a byte slice, checking only the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        bytes.try_into().map(Self).map_err(|_| {
            CryptoError::InvalidSignature(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            ))
        })
    }

    /// The `r || s` half of the signature.
    pub fn rs(&self) -> &[u8] {
        let (rs, _) = self.0.split_at(64);
        rs
    }

    /// The raw recovery byte.
    pub fn v(&self) -> u8 {
        self.0[64]
    }

    /// Returns the raw 65 bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl FromStr for EvmSignature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex_array(s)
            .map(Self)
            .map_err(CryptoError::InvalidSignature)
    }
}

hex_newtype_serde!(EvmSignature);

/// The native-chain account deterministically mapped to an EVM wallet.
///
/// Produced by a successful signature-recovery round trip and immutable
/// afterwards. The SDK never caches it; the application owns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingAccount {
    evm_address: Address,
    compressed_pubkey: CompressedPubkey,
    address: String,
    account_id: AccountId32,
    ss58_prefix: u16,
}

impl MappingAccount {
    /// Assembles a mapping account from already-derived parts.
    pub fn new(
        evm_address: Address,
        compressed_pubkey: CompressedPubkey,
        account_id: AccountId32,
        address: String,
        ss58_prefix: u16,
    ) -> Self {
        Self {
            evm_address,
            compressed_pubkey,
            address,
            account_id,
            ss58_prefix,
        }
    }

    /// The 20-byte EVM address of the wallet.
    pub fn evm_address(&self) -> Address {
        self.evm_address
    }

    /// The compressed public key recovered from the wallet signature.
    pub fn compressed_pubkey(&self) -> &CompressedPubkey {
        &self.compressed_pubkey
    }

    /// The SS58-encoded native address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The raw 32-byte native account id (`blake2_256(compressed_pubkey)`).
    pub fn account_id(&self) -> &AccountId32 {
        &self.account_id
    }

    /// The SS58 address-version prefix used to encode [`Self::address`].
    pub fn ss58_prefix(&self) -> u16 {
        self.ss58_prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_pubkey_parsing() {
        let hex_key = "0x038318535b54105d4a7aae60c08fc45f9687181b4fdfc625bd1a753fa7397fed75";
        let key: CompressedPubkey = hex_key.parse().unwrap();
        assert_eq!(key.to_string(), hex_key);

        // Missing prefix is accepted, wrong SEC1 tag is not.
        assert!(hex_key
            .trim_start_matches("0x")
            .parse::<CompressedPubkey>()
            .is_ok());
        let bad = format!("0x04{}", &hex_key[4..]);
        assert!(matches!(
            bad.parse::<CompressedPubkey>(),
            Err(CryptoError::InvalidKey(_))
        ));
        assert!("0x02ab".parse::<CompressedPubkey>().is_err());
    }

    #[test]
    fn test_signature_parts() {
        let mut raw = [0u8; SIGNATURE_LEN];
        raw[64] = 28;
        let sig = EvmSignature(raw);
        assert_eq!(sig.rs().len(), 64);
        assert_eq!(sig.v(), 28);
        assert!(EvmSignature::from_slice(&raw[..64]).is_err());
    }

    #[test]
    fn test_mapping_account_serde_shape() {
        let account = MappingAccount::new(
            Address::ZERO,
            CompressedPubkey([2u8; COMPRESSED_PUBKEY_LEN]),
            AccountId32([1u8; 32]),
            "5C4hrfjw9DjXZTzV3MwzrrAr9P1MJhSrvWGWqi1eSuyUpnhM".to_string(),
            42,
        );
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("evmAddress").is_some());
        assert!(json.get("compressedPubkey").is_some());
        assert_eq!(
            json["address"],
            "5C4hrfjw9DjXZTzV3MwzrrAr9P1MJhSrvWGWqi1eSuyUpnhM"
        );
        let back: MappingAccount = serde_json::from_value(json).unwrap();
        assert_eq!(back, account);
    }
}
