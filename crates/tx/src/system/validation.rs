// Path: crates/tx/src/system/validation.rs

//! Signature validation for call authorizations.
//!
//! Mirrors the check the mapping pallet performs on `meta_call`, so a caller
//! can reject a bad signature before paying for a submission.

use crate::eip712::build_call_payload;
use alloy_primitives::Address;
use evm_mapping_crypto::sign::ecdsa::compress;
use evm_mapping_crypto::sign::eip712::recover_typed_data_signer;
use evm_mapping_types::app::{CompressedPubkey, Eip712Domain, EvmSignature, SubstrateCallDescriptor};
use evm_mapping_types::error::{CryptoError, TransactionError};

/// Verifies that `signature` over the `SubstrateCall` payload for `descriptor`
/// was produced by the key `expected`.
pub fn verify_call_authorization(
    domain: &Eip712Domain,
    descriptor: &SubstrateCallDescriptor,
    signature: &EvmSignature,
    expected: &CompressedPubkey,
) -> Result<(), TransactionError> {
    // The signing account does not take part in the digest.
    let payload = build_call_payload(Address::ZERO, domain.clone(), descriptor.clone());
    let signer = compress(&recover_typed_data_signer(&payload, signature)?)?;
    if &signer != expected {
        return Err(CryptoError::InvalidSignature(format!(
            "call authorization was signed by {}, expected {}",
            signer, expected
        ))
        .into());
    }
    Ok(())
}
