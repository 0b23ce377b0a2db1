// Path: crates/types/src/error/mod.rs
//! Core error types for the EVM account mapping SDK.
//!
//! No error in this module is retried by the SDK itself; every failure is
//! surfaced to the immediate caller.

use crate::app::DispatchErrorPayload;
use std::fmt;
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors related to keys, signatures, hashing, and address encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature did not recover to a valid secp256k1 public key.
    #[error("Public key recovery failed: {0}")]
    Recovery(String),
    /// The provided key material is malformed.
    #[error("Invalid cryptographic key: {0}")]
    InvalidKey(String),
    /// The provided signature material is malformed.
    #[error("Invalid signature format: {0}")]
    InvalidSignature(String),
    /// An SS58 or hex account address could not be decoded.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    /// A typed-data payload could not be (de)serialized.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// A generic failure in an underlying cryptographic library.
    #[error("Cryptographic operation failed: {0}")]
    OperationFailed(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::Recovery(_) => "CRYPTO_RECOVERY_FAILED",
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::InvalidAddress(_) => "CRYPTO_INVALID_ADDRESS",
            Self::Deserialization(_) => "CRYPTO_DESERIALIZATION_ERROR",
            Self::OperationFailed(_) => "CRYPTO_OPERATION_FAILED",
        }
    }
}

/// Errors reported by the chain client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The transport or node returned an error.
    #[error("RPC error: {0}")]
    Rpc(String),
    /// The node or signer rejected a submission before it entered the pool.
    #[error("Submission rejected: {0}")]
    Rejected(String),
    /// The runtime metadata does not know the requested call.
    #[error("Unknown call {pallet}.{call}")]
    UnknownCall {
        /// The pallet name.
        pallet: String,
        /// The call name.
        call: String,
    },
    /// A value returned by the node could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ErrorCode for ChainError {
    fn code(&self) -> &'static str {
        match self {
            Self::Rpc(_) => "CHAIN_RPC_ERROR",
            Self::Rejected(_) => "CHAIN_SUBMISSION_REJECTED",
            Self::UnknownCall { .. } => "CHAIN_UNKNOWN_CALL",
            Self::Decode(_) => "CHAIN_DECODE_ERROR",
        }
    }
}

/// Errors reported by the EVM wallet provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The user or the wallet declined the signing request.
    #[error("Signing request rejected: {0}")]
    Rejected(String),
    /// The wallet does not support the requested method.
    #[error("Unsupported wallet method: {0}")]
    Unsupported(String),
    /// Any other provider failure.
    #[error("Wallet provider error: {0}")]
    Provider(String),
}

impl ErrorCode for WalletError {
    fn code(&self) -> &'static str {
        match self {
            Self::Rejected(_) => "WALLET_REJECTED",
            Self::Unsupported(_) => "WALLET_UNSUPPORTED",
            Self::Provider(_) => "WALLET_PROVIDER_ERROR",
        }
    }
}

/// Errors building the call-authorization EIP-712 domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A mapping pallet constant is missing: the chain does not implement the
    /// account mapping protocol. This is a capability answer, not a transient failure.
    #[error("EIP-712 domain unavailable: constant {constant} not found, the account mapping pallet is probably not deployed")]
    Unavailable {
        /// The missing constant.
        constant: &'static str,
    },
    /// A constant exists but its value is malformed.
    #[error("Failed to decode constant {constant}: {reason}")]
    Decode {
        /// The malformed constant.
        constant: &'static str,
        /// Why decoding failed.
        reason: String,
    },
    /// The constant lookup itself failed.
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
}

impl ErrorCode for DomainError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "DOMAIN_UNAVAILABLE",
            Self::Decode { .. } => "DOMAIN_DECODE_ERROR",
            Self::Chain(_) => "DOMAIN_CHAIN_ERROR",
        }
    }
}

/// The substring that marks a rejection as a user cancellation.
pub const CANCELLED_MARKER: &str = "Cancelled";

/// A signing or submission request rejected before anything was broadcast.
///
/// `cancelled` is fixed at construction from the rejection reason so callers
/// can tell "user declined" from a genuine failure without string matching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct SignAndSendError {
    message: String,
    cancelled: bool,
}

impl SignAndSendError {
    /// Classifies a rejection reason.
    pub fn from_rejection(reason: impl fmt::Display) -> Self {
        let message = reason.to_string();
        let cancelled = message.contains(CANCELLED_MARKER);
        Self { message, cancelled }
    }

    /// True if the rejection was a user cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// The rejection reason, verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SignAndSendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cancelled {
            write!(f, "Signing cancelled: {}", self.message)
        } else {
            write!(f, "Sign and send failed: {}", self.message)
        }
    }
}

/// Errors building, authorizing, submitting, or settling a call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    /// The chain rejected the call because its mapping nonce is outdated.
    /// Rebuild the descriptor and sign again.
    #[error("Stale nonce: {0}")]
    StaleNonce(String),
    /// The call was included but its dispatch failed.
    #[error("Extrinsic failed: {0}")]
    ExtrinsicFailed(DispatchErrorPayload),
    /// The pool reported the submission as invalid.
    #[error("Invalid transaction: {0}")]
    Invalid(String),
    /// Signing or submission was rejected before broadcast.
    #[error(transparent)]
    SignAndSend(#[from] SignAndSendError),
    /// The status stream ended before a terminal status arrived.
    #[error("Status subscription closed before the call was included")]
    SubscriptionClosed,
    /// The EIP-712 domain could not be built.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    /// A chain client call failed.
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
    /// A key, signature, or address was malformed.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
    /// The wallet failed for a reason other than a rejection.
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),
}

impl ErrorCode for TransactionError {
    fn code(&self) -> &'static str {
        match self {
            Self::StaleNonce(_) => "TX_STALE_NONCE",
            Self::ExtrinsicFailed(_) => "TX_EXTRINSIC_FAILED",
            Self::Invalid(_) => "TX_INVALID",
            Self::SignAndSend(e) if e.is_cancelled() => "TX_CANCELLED",
            Self::SignAndSend(_) => "TX_SIGN_AND_SEND_FAILED",
            Self::SubscriptionClosed => "TX_SUBSCRIPTION_CLOSED",
            Self::Domain(_) => "TX_DOMAIN_ERROR",
            Self::Chain(_) => "TX_CHAIN_ERROR",
            Self::Crypto(_) => "TX_CRYPTO_ERROR",
            Self::Wallet(_) => "TX_WALLET_ERROR",
        }
    }
}

impl TransactionError {
    /// True if the user declined signing.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::SignAndSend(e) if e.is_cancelled())
    }
}

/// Errors loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration was not valid TOML for the expected schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but is out of range.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CONFIG_IO_ERROR",
            Self::Parse(_) => "CONFIG_PARSE_ERROR",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }
}

/// A unified error for application code that drives several components.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A cryptographic error.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
    /// A wallet error.
    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),
    /// A chain client error.
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
    /// A domain construction error.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    /// A transaction error.
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),
    /// A configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl ErrorCode for CoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::Crypto(e) => e.code(),
            Self::Wallet(e) => e.code(),
            Self::Chain(e) => e.code(),
            Self::Domain(e) => e.code(),
            Self::Transaction(e) => e.code(),
            Self::Config(e) => e.code(),
        }
    }
}
