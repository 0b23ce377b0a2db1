//! Tests for secp256k1 recovery

use super::*;
use k256::ecdsa::SigningKey;

// Hardhat / Anvil development account #0.
const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const DEV_COMPRESSED: &str = "0x038318535b54105d4a7aae60c08fc45f9687181b4fdfc625bd1a753fa7397fed75";
const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

fn dev_key() -> SigningKey {
    SigningKey::from_slice(&hex::decode(DEV_KEY).unwrap()).unwrap()
}

#[test]
fn test_recover_personal_message() {
    let key = dev_key();
    let digest = eip191_hash("Allows to access the pubkey address.");
    let sig = sign_prehash(&key, &digest).unwrap();
    assert!(sig.v() == 27 || sig.v() == 28);

    let compressed = recover_compressed_pubkey(&digest, &sig).unwrap();
    assert_eq!(compressed.to_string(), DEV_COMPRESSED);

    let recovered = recover_pubkey(&digest, &sig).unwrap();
    assert_eq!(
        evm_address(&recovered).unwrap(),
        DEV_ADDRESS.parse::<Address>().unwrap()
    );
}

#[test]
fn test_raw_and_legacy_v_recover_the_same_key() {
    let key = dev_key();
    let digest = eip191_hash(b"hello");
    let legacy = sign_prehash(&key, &digest).unwrap();
    let mut raw = legacy.0;
    raw[64] -= 27;
    let raw = EvmSignature(raw);
    assert_eq!(
        recover_compressed_pubkey(&digest, &legacy).unwrap(),
        recover_compressed_pubkey(&digest, &raw).unwrap()
    );
}

#[test]
fn test_wrong_hash_recovers_a_different_key() {
    let key = dev_key();
    let sig = sign_prehash(&key, &eip191_hash(b"hello")).unwrap();
    // Hashing without the EIP-191 envelope yields some other key, or none.
    let other = recover_compressed_pubkey(&alloy_primitives::keccak256(b"hello"), &sig);
    assert_ne!(other.ok().map(|k| k.to_string()), Some(DEV_COMPRESSED.to_string()));
}

#[test]
fn test_invalid_signatures_are_rejected() {
    let digest = eip191_hash(b"hello");
    // Zero scalars.
    assert!(matches!(
        recover_pubkey(&digest, &EvmSignature([0u8; 65])),
        Err(CryptoError::Recovery(_))
    ));
    // Bad recovery byte.
    let mut bytes = sign_prehash(&dev_key(), &digest).unwrap().0;
    bytes[64] = 5;
    assert!(matches!(
        recover_pubkey(&digest, &EvmSignature(bytes)),
        Err(CryptoError::Recovery(_))
    ));
}

#[test]
fn test_compress_decompress() {
    let compressed: CompressedPubkey = DEV_COMPRESSED.parse().unwrap();
    let key = decompress(&compressed).unwrap();
    assert_eq!(compress(&key).unwrap(), compressed);
    assert_eq!(
        key,
        *dev_key().verifying_key()
    );
}

#[test]
fn test_random_keys_roundtrip() {
    let mut rng = rand::thread_rng();
    for _ in 0..8 {
        let key = SigningKey::random(&mut rng);
        let digest = eip191_hash(b"roundtrip");
        let sig = sign_prehash(&key, &digest).unwrap();
        assert_eq!(
            recover_compressed_pubkey(&digest, &sig).unwrap(),
            compress(key.verifying_key()).unwrap()
        );
    }
}
