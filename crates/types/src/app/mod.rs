// Path: crates/types/src/app/mod.rs
//! Core application-level data structures shared by every crate of the SDK.

/// Account identities: mapping accounts, compressed keys, and signatures.
pub mod account;
/// Runtime calls and the signable meta-call descriptor.
pub mod call;
/// EIP-712 domains, type tables, and typed-data payloads.
pub mod eip712;
/// Submission status updates, events, and terminal outcomes.
pub mod status;

pub use account::*;
pub use call::*;
pub use eip712::*;
pub use status::*;

/// Parses a hex string with an optional `0x` prefix into a fixed-size byte array.
pub(crate) fn decode_hex_array<const N: usize>(s: &str) -> Result<[u8; N], String> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|e| e.to_string())?;
    let got = bytes.len();
    bytes
        .try_into()
        .map_err(|_| format!("expected {} bytes, got {}", N, got))
}
