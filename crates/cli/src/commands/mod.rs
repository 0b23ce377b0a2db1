// Path: crates/cli/src/commands/mod.rs

pub mod address;
pub mod decode;
pub mod recover;
pub mod typed_data;
