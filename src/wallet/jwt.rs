//! Para session JWT payload
//!
//! Only the payload segment is read; the token comes straight from the
//! provider over an authenticated channel, so its signature is not checked
//! here.

use crate::error::{BridgeError, BridgeResult};
use base64::alphabet;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::{DecodePaddingMode, GeneralPurpose};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// URL-safe alphabet, padding optional. Standard-alphabet segments are
/// mapped onto it before decoding.
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Wallet entry inside the token's `data.connectedWallets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedWallet {
    pub id: String,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParaJwtData {
    #[serde(default)]
    pub connected_wallets: Vec<ConnectedWallet>,
}

/// Decoded token payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParaJwtPayload {
    #[serde(default)]
    pub data: Option<ParaJwtData>,
}

impl ParaJwtPayload {
    /// Decode the second segment of a compact JWT
    pub fn from_token(token: &str) -> BridgeResult<Self> {
        let segment = token
            .split('.')
            .nth(1)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BridgeError::invalid_token("missing payload segment"))?;

        let json = decode_segment(segment)?;
        serde_json::from_slice(&json)
            .map_err(|e| BridgeError::invalid_token(format!("payload is not JSON: {}", e)))
    }

    pub fn connected_wallets(&self) -> BridgeResult<&[ConnectedWallet]> {
        self.data
            .as_ref()
            .map(|d| d.connected_wallets.as_slice())
            .ok_or_else(|| BridgeError::invalid_token("payload has no data"))
    }

    /// Find a connected wallet by id
    pub fn find_wallet(&self, wallet_id: &str) -> BridgeResult<&ConnectedWallet> {
        self.connected_wallets()?
            .iter()
            .find(|w| w.id == wallet_id)
            .ok_or_else(|| BridgeError::WalletNotFound(wallet_id.to_string()))
    }
}

fn decode_segment(segment: &str) -> BridgeResult<Vec<u8>> {
    let normalized: String = segment
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    SEGMENT_ENGINE
        .decode(normalized)
        .map_err(|e| BridgeError::invalid_token(format!("payload is not base64: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

    fn token_with(engine: &GeneralPurpose, payload: &serde_json::Value) -> String {
        [
            engine.encode(br#"{"alg":"none"}"#),
            engine.encode(payload.to_string()),
            String::new(),
        ]
        .join(".")
    }

    #[test]
    fn test_standard_base64_with_padding() {
        let payload = serde_json::json!({
            "data": {"connectedWallets": [{"id": "w1", "publicKey": "0xfromjwt"}]}
        });
        let token = token_with(&STANDARD, &payload);

        let decoded = ParaJwtPayload::from_token(&token).unwrap();
        let wallet = decoded.find_wallet("w1").unwrap();
        assert_eq!(wallet.public_key.as_deref(), Some("0xfromjwt"));
    }

    #[test]
    fn test_url_safe_without_padding() {
        let payload = serde_json::json!({
            "data": {"connectedWallets": [{"id": "w?>", "publicKey": "0x04ff", "type": "EVM"}]}
        });
        let token = token_with(&URL_SAFE_NO_PAD, &payload);

        let decoded = ParaJwtPayload::from_token(&token).unwrap();
        let wallet = decoded.find_wallet("w?>").unwrap();
        assert_eq!(wallet.kind.as_deref(), Some("EVM"));
    }

    #[test]
    fn test_missing_wallet() {
        let token = token_with(&STANDARD, &serde_json::json!({"data": {"connectedWallets": []}}));
        let decoded = ParaJwtPayload::from_token(&token).unwrap();
        assert_eq!(
            decoded.find_wallet("missing"),
            Err(BridgeError::WalletNotFound("missing".into()))
        );
    }

    #[test]
    fn test_missing_data_is_invalid_token() {
        let token = token_with(&STANDARD, &serde_json::json!({"sub": "user"}));
        let decoded = ParaJwtPayload::from_token(&token).unwrap();
        assert!(matches!(decoded.find_wallet("w1"), Err(BridgeError::InvalidToken(_))));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(ParaJwtPayload::from_token("onlyonepart"), Err(BridgeError::InvalidToken(_))));
        assert!(matches!(ParaJwtPayload::from_token("a..c"), Err(BridgeError::InvalidToken(_))));
        assert!(matches!(ParaJwtPayload::from_token("a.!!!.c"), Err(BridgeError::InvalidToken(_))));

        let not_json = format!("a.{}.c", STANDARD.encode("plain text"));
        assert!(matches!(ParaJwtPayload::from_token(&not_json), Err(BridgeError::InvalidToken(_))));
    }
}
