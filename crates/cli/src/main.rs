// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # EVM Account Mapping CLI
//!
//! Offline developer tools for the account mapping protocol. Nothing here
//! talks to a node: every command is a pure function of its arguments and
//! the optional configuration file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod util;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "evm-mapping",
    version,
    about = "Developer tools for EVM account mapping.",
    long_about = "Derive the native account mapped to an EVM key, recover it from a wallet signature, and build the EIP-712 payloads wallets are asked to sign."
)]
struct Cli {
    /// Path to a TOML file with `ss58_prefix` and `challenge_message`.
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive the mapped SS58 address of a compressed public key.
    Address(address::AddressArgs),

    /// Recover the mapping account from a personal-message signature.
    Recover(recover::RecoverArgs),

    /// Print an `eth_signTypedData_v4` payload.
    TypedData {
        #[clap(subcommand)]
        command: typed_data::TypedDataCommands,
    },

    /// Decode an SS58 address into its prefix and account id.
    Decode(decode::DecodeArgs),
}

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

fn log_env() -> env_logger::Env<'static> {
    env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(log_env()).init();

    let config = util::load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Address(args) => address::run(args, &config)?,
        Commands::Recover(args) => recover::run(args, &config)?,
        Commands::TypedData { command } => typed_data::run(command)?,
        Commands::Decode(args) => decode::run(args)?,
    };
    println!("{}", output);
    Ok(())
}
