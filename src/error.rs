//! Unified error types for the Para/Miden bridge
//!
//! Every component fails fast and lets its error reach the orchestrator's
//! caller. Errors carry a stable [`ErrorCode`] so hosts can tell user
//! cancellation and configuration mistakes apart from infrastructure
//! failures.

use serde::{Deserialize, Serialize};

/// Main error type for all bridge operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid signature length: {0} hex chars")]
    InvalidSignatureLength(usize),

    #[error("accountSeed is required when using private storage mode")]
    MissingSeed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No EVM wallets provided")]
    NoCompatibleWallet,

    #[error("Wallet not found in jwt data: {0}")]
    WalletNotFound(String),

    #[error("Invalid jwt token: {0}")]
    InvalidToken(String),

    #[error("User cancelled signing")]
    UserCancelled,

    #[error("Remote signer error: {0}")]
    RemoteSigner(String),

    #[error("Remote ledger error: {0}")]
    RemoteLedger(String),
}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    EncodingError,
    InvalidSignatureLength,
    MissingSeed,
    InvalidConfig,
    NoCompatibleWallet,
    WalletNotFound,
    InvalidToken,
    UserCancelled,
    RemoteSignerError,
    RemoteLedgerError,
}

/// Coarse error class, used to decide between retrying, re-prompting and
/// reporting a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed caller data (bad hex, unknown wallet, broken token)
    Input,
    /// Invalid or incomplete configuration
    Configuration,
    /// The user declined a prompt
    UserAction,
    /// Remote signer or ledger failure
    Infrastructure,
}

impl BridgeError {
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }

    pub fn remote_signer(err: impl std::fmt::Display) -> Self {
        Self::RemoteSigner(err.to_string())
    }

    pub fn remote_ledger(err: impl std::fmt::Display) -> Self {
        Self::RemoteLedger(err.to_string())
    }

    /// Map a ledger client failure, keeping a bridge error raised by the
    /// signing relay underneath it (e.g. a declined signature)
    pub fn from_ledger(err: ProviderError) -> Self {
        match err.downcast::<BridgeError>() {
            Ok(inner) => *inner,
            Err(other) => Self::remote_ledger(other),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Encoding(_) => ErrorCode::EncodingError,
            Self::InvalidSignatureLength(_) => ErrorCode::InvalidSignatureLength,
            Self::MissingSeed => ErrorCode::MissingSeed,
            Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Self::NoCompatibleWallet => ErrorCode::NoCompatibleWallet,
            Self::WalletNotFound(_) => ErrorCode::WalletNotFound,
            Self::InvalidToken(_) => ErrorCode::InvalidToken,
            Self::UserCancelled => ErrorCode::UserCancelled,
            Self::RemoteSigner(_) => ErrorCode::RemoteSignerError,
            Self::RemoteLedger(_) => ErrorCode::RemoteLedgerError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encoding(_)
            | Self::InvalidSignatureLength(_)
            | Self::NoCompatibleWallet
            | Self::WalletNotFound(_)
            | Self::InvalidToken(_) => ErrorKind::Input,
            Self::MissingSeed | Self::InvalidConfig(_) => ErrorKind::Configuration,
            Self::UserCancelled => ErrorKind::UserAction,
            Self::RemoteSigner(_) | Self::RemoteLedger(_) => ErrorKind::Infrastructure,
        }
    }

    /// Whether a caller may reasonably retry the whole operation.
    ///
    /// Nothing inside the crate retries on its own: a repeated signing
    /// request would prompt the user twice.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Infrastructure
    }
}

/// Serializable error payload for JSON consumers (CLI, FFI hosts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&BridgeError> for ErrorReport {
    fn from(err: &BridgeError) -> Self {
        Self {
            code: err.code(),
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Error type returned by injected collaborators (wallet provider, ledger client).
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

// Conversions from common error types

impl From<hex::FromHexError> for BridgeError {
    fn from(e: hex::FromHexError) -> Self {
        BridgeError::Encoding(format!("Invalid hex: {}", e))
    }
}

impl From<base64::DecodeError> for BridgeError {
    fn from(e: base64::DecodeError) -> Self {
        BridgeError::Encoding(format!("Invalid base64: {}", e))
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::Encoding(format!("JSON parse error: {}", e))
    }
}
