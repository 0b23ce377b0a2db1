// Path: crates/test_utils/src/randomness/mod.rs
//! Deterministic keys for reproducible tests

use k256::ecdsa::SigningKey;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic secp256k1 key generator for tests
pub struct TestRng {
    rng: StdRng,
}

impl TestRng {
    /// Create a new test RNG with the specified seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a fresh signing key
    pub fn signing_key(&mut self) -> SigningKey {
        SigningKey::random(&mut self.rng)
    }
}

impl Default for TestRng {
    fn default() -> Self {
        Self::new(12345)
    }
}
