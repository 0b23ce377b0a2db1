// Path: crates/tx/src/system/mod.rs
//! Core, non-optional logic shared by every meta-call: nonce binding and
//! signature validation.

pub mod nonce;
pub mod validation;
