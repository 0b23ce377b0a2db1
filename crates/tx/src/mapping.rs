// Path: crates/tx/src/mapping.rs

//! Derivation of the native-chain account mapped to an EVM wallet.
//!
//! The mapped account id is `blake2_256(compressed_pubkey)`. The public key
//! is not derivable from the EVM address alone, so it is recovered from a
//! personal-message signature produced by the wallet.

use alloy_primitives::Address;
use evm_mapping_api::wallet::WalletProvider;
use evm_mapping_crypto::address::ss58_encode;
use evm_mapping_crypto::algorithms::hash::blake2_256;
use evm_mapping_crypto::sign::ecdsa::{compress, eip191_hash, evm_address, recover_pubkey};
use evm_mapping_types::app::{AccountId32, CompressedPubkey, EvmSignature, MappingAccount};
use evm_mapping_types::config::{MappingConfig, DEFAULT_CHALLENGE_MESSAGE};
use evm_mapping_types::error::{CoreError, CryptoError};
use tracing::{debug, info};

/// Recovers the signer of a personal-message signature.
///
/// Returns the compressed public key together with the EVM address it hashes to.
pub fn recover_signer(
    message: &str,
    signature: &EvmSignature,
) -> Result<(CompressedPubkey, Address), CryptoError> {
    let key = recover_pubkey(&eip191_hash(message), signature)?;
    Ok((compress(&key)?, evm_address(&key)?))
}

/// Asks the wallet to sign `message` (the default challenge if `None`) and
/// recovers the compressed public key of `account` from the signature.
///
/// Fails with [`CryptoError::Recovery`] if the signature does not recover, or
/// recovers to a key that does not belong to `account`.
pub async fn derive_compressed_pubkey<W: WalletProvider + ?Sized>(
    wallet: &W,
    account: Address,
    message: Option<&str>,
) -> Result<CompressedPubkey, CoreError> {
    let message = message.unwrap_or(DEFAULT_CHALLENGE_MESSAGE);
    let signature = wallet.sign_message(account, message).await?;
    let (pubkey, signer) = recover_signer(message, &signature)?;
    if signer != account {
        return Err(CryptoError::Recovery(format!(
            "signature recovers to {} but {} was requested",
            signer, account
        ))
        .into());
    }
    debug!(target: "mapping", %account, pubkey = %pubkey, "recovered compressed public key");
    Ok(pubkey)
}

/// The native account id mapped to a compressed public key.
pub fn mapped_account_id(compressed_pubkey: &CompressedPubkey) -> AccountId32 {
    AccountId32(blake2_256(compressed_pubkey.as_bytes()))
}

/// Encodes the native account mapped to `compressed_pubkey` as an SS58 address.
///
/// Pure and deterministic. Fails only for a prefix outside the SS58 range.
pub fn derive_mapped_address(
    compressed_pubkey: &CompressedPubkey,
    ss58_prefix: u16,
) -> Result<String, CryptoError> {
    ss58_encode(&mapped_account_id(compressed_pubkey).0, ss58_prefix)
}

/// Assembles a [`MappingAccount`] from an already-recovered public key.
pub fn mapping_account_from_pubkey(
    evm_address: Address,
    compressed_pubkey: CompressedPubkey,
    ss58_prefix: u16,
) -> Result<MappingAccount, CryptoError> {
    let account_id = mapped_account_id(&compressed_pubkey);
    let address = ss58_encode(&account_id.0, ss58_prefix)?;
    Ok(MappingAccount::new(
        evm_address,
        compressed_pubkey,
        account_id,
        address,
        ss58_prefix,
    ))
}

/// Builds the mapping account of `account` without a wallet, from a signature
/// over `message` that was produced earlier.
pub fn recover_mapping_account(
    message: &str,
    signature: &EvmSignature,
    ss58_prefix: u16,
) -> Result<MappingAccount, CryptoError> {
    let (pubkey, signer) = recover_signer(message, signature)?;
    mapping_account_from_pubkey(signer, pubkey, ss58_prefix)
}

/// Derives the mapping account of `account` through the wallet, using the
/// challenge message and SS58 prefix from `config`.
pub async fn get_mapping_account<W: WalletProvider + ?Sized>(
    wallet: &W,
    account: Address,
    config: &MappingConfig,
) -> Result<MappingAccount, CoreError> {
    let pubkey =
        derive_compressed_pubkey(wallet, account, Some(&config.challenge_message)).await?;
    let mapping = mapping_account_from_pubkey(account, pubkey, config.ss58_prefix)?;
    info!(
        target: "mapping",
        evm_address = %account,
        address = mapping.address(),
        ss58_prefix = config.ss58_prefix,
        "derived mapping account"
    );
    Ok(mapping)
}
