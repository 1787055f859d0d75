//! Wallet Provider Module
//!
//! The remote auth provider (Para) custodies the EVM keys. This module
//! defines the port the bridge talks to and resolves the uncompressed
//! public key of a wallet, falling back to the provider's JWT when the
//! wallet object does not carry one.

pub mod jwt;
pub mod public_key;

pub use jwt::{ConnectedWallet, ParaJwtData, ParaJwtPayload};
pub use public_key::get_uncompressed_public_key_from_wallet;

use crate::error::ProviderError;
use crate::types::Wallet;
use serde::{Deserialize, Serialize};

/// Successful signature from the remote signer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureResponse {
    /// Hex-encoded raw signature
    pub signature: String,
}

/// Token issued by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtResponse {
    /// Compact `header.payload.signature` token
    pub token: String,
}

/// Remote wallet / auth provider.
///
/// Implementations wrap the provider SDK or its HTTP API. Errors are
/// reported as-is and surface as `RemoteSigner` errors.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Sign base64-encoded message bytes with the given wallet
    async fn sign_message(
        &self,
        wallet_id: &str,
        message_base64: &str,
    ) -> Result<SignatureResponse, ProviderError>;

    /// Issue a session JWT describing the connected wallets
    async fn issue_jwt(&self) -> Result<JwtResponse, ProviderError>;
}

/// Keep only EVM-compatible wallets, preserving order
pub fn evm_wallets(wallets: &[Wallet]) -> Vec<Wallet> {
    wallets.iter().filter(|w| w.is_evm()).cloned().collect()
}
