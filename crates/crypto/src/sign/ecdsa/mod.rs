// Path: crates/crypto/src/sign/ecdsa/mod.rs
//! secp256k1 public-key recovery as performed by EVM wallets.
//!
//! Wallet signatures are 65 bytes `r || s || v`. The recovery byte is accepted
//! either raw (`0`/`1`) or in the legacy Ethereum form (`27`/`28`).

use crate::error::CryptoError;
use alloy_primitives::{Address, B256};
use evm_mapping_types::app::{CompressedPubkey, EvmSignature};
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

const LEGACY_V_OFFSET: u8 = 27;

/// The EIP-191 personal-message digest:
/// `keccak256("\x19Ethereum Signed Message:\n" || len || message)`.
pub fn eip191_hash<T: AsRef<[u8]>>(message: T) -> B256 {
    alloy_primitives::eip191_hash_message(message)
}

/// Maps a wallet `v` byte to a k256 recovery id.
pub fn recovery_id(v: u8) -> Result<RecoveryId, CryptoError> {
    let raw = if v >= LEGACY_V_OFFSET {
        v - LEGACY_V_OFFSET
    } else {
        v
    };
    RecoveryId::from_byte(raw)
        .filter(|id| !id.is_x_reduced())
        .ok_or_else(|| CryptoError::Recovery(format!("invalid recovery byte {}", v)))
}

/// Recovers the public key that produced `signature` over `prehash`.
pub fn recover_pubkey(prehash: &B256, signature: &EvmSignature) -> Result<VerifyingKey, CryptoError> {
    let sig = Signature::from_slice(signature.rs())
        .map_err(|e| CryptoError::Recovery(format!("invalid signature scalars: {}", e)))?;
    let mut recid = recovery_id(signature.v())?;

    // k256 only accepts low-s signatures; flip the parity bit when normalizing.
    let sig = match sig.normalize_s() {
        Some(normalized) => {
            recid = RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced());
            normalized
        }
        None => sig,
    };

    VerifyingKey::recover_from_prehash(prehash.as_slice(), &sig, recid)
        .map_err(|e| CryptoError::Recovery(format!("recovery failed: {}", e)))
}

/// Compresses a public key to its 33-byte SEC1 form.
pub fn compress(key: &VerifyingKey) -> Result<CompressedPubkey, CryptoError> {
    CompressedPubkey::from_slice(key.to_encoded_point(true).as_bytes())
}

/// Recovers and compresses in one step.
pub fn recover_compressed_pubkey(
    prehash: &B256,
    signature: &EvmSignature,
) -> Result<CompressedPubkey, CryptoError> {
    compress(&recover_pubkey(prehash, signature)?)
}

/// Parses a compressed public key back into a verifying key.
pub fn decompress(key: &CompressedPubkey) -> Result<VerifyingKey, CryptoError> {
    VerifyingKey::from_sec1_bytes(key.as_bytes())
        .map_err(|e| CryptoError::InvalidKey(format!("not a secp256k1 point: {}", e)))
}

/// The EVM address of a public key: the last 20 bytes of `keccak256(x || y)`.
pub fn evm_address(key: &VerifyingKey) -> Result<Address, CryptoError> {
    let point = key.to_encoded_point(false);
    let xy = point
        .as_bytes()
        .get(1..)
        .ok_or_else(|| CryptoError::InvalidKey("empty encoded point".to_string()))?;
    Ok(Address::from_word(alloy_primitives::keccak256(xy)))
}

/// Signs a 32-byte digest the way an EVM wallet does, with a legacy `v` of 27/28.
pub fn sign_prehash(key: &SigningKey, prehash: &B256) -> Result<EvmSignature, CryptoError> {
    let (sig, recid) = key
        .sign_prehash_recoverable(prehash.as_slice())
        .map_err(|e| CryptoError::OperationFailed(format!("signing failed: {}", e)))?;
    let mut bytes = sig.to_bytes().to_vec();
    bytes.push(recid.to_byte() + LEGACY_V_OFFSET);
    EvmSignature::from_slice(&bytes)
}

#[cfg(test)]
mod tests;
