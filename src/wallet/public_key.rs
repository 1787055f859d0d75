//! Public key resolution for provider wallets

use super::jwt::ParaJwtPayload;
use super::WalletProvider;
use crate::error::{BridgeError, BridgeResult};
use crate::types::Wallet;
use crate::utils::logging::{LogEntry, LogLevel};

/// Retrieve the uncompressed public key for a wallet.
///
/// Uses the wallet's inline key when present without contacting the
/// provider; otherwise issues a JWT and reads the key from the token's
/// connected-wallet list.
pub async fn get_uncompressed_public_key_from_wallet<W: WalletProvider>(
    provider: &W,
    wallet: &Wallet,
) -> BridgeResult<String> {
    if let Some(public_key) = wallet.public_key.as_deref().filter(|k| !k.is_empty()) {
        return Ok(public_key.to_string());
    }

    crate::log_debug!("wallet", "Wallet has no inline key, reading session token", wallet_id = wallet.id);

    let response = provider.issue_jwt().await.map_err(BridgeError::remote_signer)?;
    let payload = ParaJwtPayload::from_token(&response.token)?;
    let connected = payload.find_wallet(&wallet.id)?;

    let public_key = connected
        .public_key
        .clone()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| BridgeError::invalid_token(format!("wallet {} has no public key", wallet.id)))?;

    // token claims are not echoed, even partially
    LogEntry::new(LogLevel::Debug, "wallet", "Public key read from session token")
        .field("wallet_id", &wallet.id)
        .redacted_field("public_key", &public_key)
        .log();

    Ok(public_key)
}
