//! Miden Para Bridge
//!
//! Lets a Para-custodied EVM wallet control a Miden ledger account.
//!
//! # Architecture
//!
//! This crate provides:
//! - **crypto**: EVM public key -> RPO-256 commitment
//! - **signing**: signing relay from the ledger to the remote EVM signer
//! - **wallet**: wallet provider port and public key resolution
//! - **confirm**: user confirmation port (account selection, signing approval)
//! - **account**: account descriptor, ledger ports and reconciliation
//! - **bridge**: orchestration into a ready-to-use ledger client
//! - **ffi**: C-ABI exports of the offline operations
//!
//! The wallet provider, the ledger client and the confirmation UI are
//! injected through traits; nothing here talks to the network directly.
//!
//! # Security
//!
//! Account seeds are wiped from memory on drop (`zeroize`), and the log
//! macros redact seeds and tokens.
//!
//! # Example
//!
//! ```rust,ignore
//! use miden_para::{build_bridge_client, AutoApprove, BridgeConfig};
//!
//! let mut bridge = build_bridge_client(
//!     provider,
//!     Arc::new(AutoApprove),
//!     &factory,
//!     &wallets,
//!     &BridgeConfig::default(),
//!     None,
//! )
//! .await?;
//! println!("Bridged account: {}", bridge.account_id());
//! let tx_id = bridge.submit_transaction(&request).await?;
//! ```

pub mod account;
pub mod bridge;
pub mod confirm;
pub mod crypto;
pub mod error;
pub mod ffi;
pub mod signing;
pub mod types;
pub mod utils;
pub mod wallet;

#[cfg(test)]
mod test_utils;

// Re-export key types for convenience
pub use error::{BridgeError, BridgeResult, ErrorCode, ErrorKind, ErrorReport, ProviderError};
pub use types::*;

pub use account::{
    ensure_account, AccountConfig, AccountDescriptor, AccountId, ClientSettings, LedgerClient,
    LedgerClientFactory,
};
pub use bridge::{build_bridge_client, BridgeClient};
pub use confirm::{AutoApprove, ChannelConfirmation, ConfirmationPort, Prompt};
pub use crypto::{derive_commitment, Commitment};
pub use signing::{
    adapt_signature, custom_sign_confirm_step, CustomSignConfirmStep, SigningCallback,
    SigningRelay,
};
pub use utils::config::BridgeConfig;
pub use wallet::{get_uncompressed_public_key_from_wallet, WalletProvider};
