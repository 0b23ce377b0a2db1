// Path: crates/test_utils/src/fixtures/mod.rs
//! Known keys, addresses, and domain parameters shared by tests.

use alloy_primitives::{address, Address};
use evm_mapping_types::app::Eip712Domain;

/// Private key of Hardhat / Anvil development account #0.
pub const DEV0_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
/// EVM address of development account #0.
pub const DEV0_EVM_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
/// Compressed public key of development account #0.
pub const DEV0_COMPRESSED_PUBKEY: &str =
    "0x038318535b54105d4a7aae60c08fc45f9687181b4fdfc625bd1a753fa7397fed75";
/// Native account id mapped to development account #0.
pub const DEV0_ACCOUNT_ID: &str =
    "0x61d50346eed10404dbbf5854e7f0ce6d23c8f2aec63503283a190a4c330bbccf";
/// Mapped address of development account #0 under prefix 30.
pub const DEV0_ADDRESS_PREFIX_30: &str = "42q4gHfQKRdeTwSPGXf5PmwbhnX5hLv7EuZpr34zoyXX84Xd";
/// Mapped address of development account #0 under prefix 42.
pub const DEV0_ADDRESS_PREFIX_42: &str = "5EGynCAEvv8NLeHx8vDMvb8hTcEcMYUMWCDQEEncNEfNWB2W";

/// Private key of Hardhat / Anvil development account #1.
pub const DEV1_PRIVATE_KEY: &str =
    "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
/// EVM address of development account #1.
pub const DEV1_EVM_ADDRESS: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
/// Compressed public key of development account #1.
pub const DEV1_COMPRESSED_PUBKEY: &str =
    "0x02ba5734d8f7091719471e7f7ed6b9df170dc70cc661ca05e688601ad984f068b0";
/// Mapped address of development account #1 under prefix 30.
pub const DEV1_ADDRESS_PREFIX_30: &str = "45LKYDs1rhqPTeVGz22utjnmMgnBDV3Z6zmhhv1ipi7fpfLM";

/// The domain name the mock mapping pallet declares.
pub const SAMPLE_DOMAIN_NAME: &str = "Substrate";
/// The domain version the mock mapping pallet declares.
pub const SAMPLE_DOMAIN_VERSION: &str = "1";
/// The EIP-155 chain id the mock mapping pallet declares.
pub const SAMPLE_CHAIN_ID: u64 = 1;
/// The verifying contract pseudo-address the mock mapping pallet declares.
pub const SAMPLE_VERIFYING_CONTRACT: Address =
    address!("0000000000000000000000000000000000000001");

/// The call-authorization domain of the mock mapping pallet.
pub fn sample_domain() -> Eip712Domain {
    Eip712Domain {
        name: SAMPLE_DOMAIN_NAME.to_string(),
        version: SAMPLE_DOMAIN_VERSION.to_string(),
        chain_id: Some(SAMPLE_CHAIN_ID),
        verifying_contract: Some(SAMPLE_VERIFYING_CONTRACT),
        salt: None,
    }
}
