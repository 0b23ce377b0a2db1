// Path: crates/crypto/src/address/mod.rs
//! The SS58 address codec.
//!
//! An SS58 address is `base58(prefix || account_id || checksum)`, where the
//! prefix takes one byte below 64 and two bytes up to 16383, and the checksum
//! is the first two bytes of `blake2b_512("SS58PRE" || prefix || account_id)`.

use crate::error::CryptoError;
use blake2::{Blake2b512, Digest};
use evm_mapping_types::app::AccountId32;

const SS58_CONTEXT: &[u8] = b"SS58PRE";
const CHECKSUM_LEN: usize = 2;
const ACCOUNT_ID_LEN: usize = 32;

/// The highest address-version prefix the two-byte format can carry.
pub const MAX_PREFIX: u16 = 0b0011_1111_1111_1111;

fn ss58_checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Blake2b512::new();
    hasher.update(SS58_CONTEXT);
    hasher.update(data);
    let digest = hasher.finalize();
    let mut checksum = [0u8; CHECKSUM_LEN];
    checksum
        .iter_mut()
        .zip(digest.iter())
        .for_each(|(c, d)| *c = *d);
    checksum
}

fn prefix_bytes(prefix: u16) -> Result<Vec<u8>, CryptoError> {
    match prefix {
        0..=63 => Ok(vec![prefix as u8]),
        64..=MAX_PREFIX => {
            let first = (((prefix & 0b1111_1100) >> 2) as u8) | 0b0100_0000;
            let second = ((prefix >> 8) as u8) | (((prefix & 0b0000_0011) as u8) << 6);
            Ok(vec![first, second])
        }
        _ => Err(CryptoError::InvalidAddress(format!(
            "SS58 prefix {} exceeds {}",
            prefix, MAX_PREFIX
        ))),
    }
}

/// Encodes a 32-byte account id as an SS58 address.
pub fn ss58_encode(account_id: &[u8; ACCOUNT_ID_LEN], prefix: u16) -> Result<String, CryptoError> {
    let mut data = prefix_bytes(prefix)?;
    data.extend_from_slice(account_id);
    let checksum = ss58_checksum(&data);
    data.extend_from_slice(&checksum);
    Ok(bs58::encode(data).into_string())
}

/// Decodes an SS58 address into its prefix and account id, verifying the checksum.
pub fn ss58_decode(address: &str) -> Result<(u16, AccountId32), CryptoError> {
    let data = bs58::decode(address)
        .into_vec()
        .map_err(|e| CryptoError::InvalidAddress(format!("invalid base58: {}", e)))?;

    let (prefix, prefix_len) = match data.as_slice() {
        [first @ 0..=63, ..] => (u16::from(*first), 1),
        [first @ 64..=127, second, ..] => {
            let lower = ((u16::from(*first) << 2) | (u16::from(*second) >> 6)) & 0xff;
            let upper = u16::from(*second) & 0b0011_1111;
            (lower | (upper << 8), 2)
        }
        _ => {
            return Err(CryptoError::InvalidAddress(
                "unsupported SS58 address format".to_string(),
            ))
        }
    };

    let expected_len = prefix_len + ACCOUNT_ID_LEN + CHECKSUM_LEN;
    if data.len() != expected_len {
        return Err(CryptoError::InvalidAddress(format!(
            "expected {} address bytes, got {}",
            expected_len,
            data.len()
        )));
    }

    let (body, checksum) = data.split_at(data.len() - CHECKSUM_LEN);
    if ss58_checksum(body) != checksum {
        return Err(CryptoError::InvalidAddress("bad SS58 checksum".to_string()));
    }

    let account: [u8; ACCOUNT_ID_LEN] = body
        .get(prefix_len..)
        .and_then(|id| id.try_into().ok())
        .ok_or_else(|| CryptoError::InvalidAddress("truncated account id".to_string()))?;
    Ok((prefix, AccountId32(account)))
}
