// Path: crates/types/src/codec.rs

//! Defines the canonical, deterministic binary codec for on-chain values.
//!
//! This module provides simple wrappers around `parity-scale-codec` (SCALE), which is
//! the encoding used by Substrate runtimes for constants, storage values, and call
//! arguments. Centralizing the codec here keeps every component decoding pallet
//! constants and encoding `meta_call` arguments in exactly the same way.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into its canonical SCALE byte representation.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Vec<u8> {
    v.encode()
}

/// Decodes a value from a canonical SCALE byte representation.
///
/// This function fails fast on any decoding error, including trailing bytes,
/// returning a descriptive string.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}
