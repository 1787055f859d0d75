//! Bridge Configuration
//!
//! Caller-supplied options for building a bridged client:
//! - Ledger RPC endpoint and note transport URL
//! - Client-level and account-level seeds
//! - Account type and storage mode
//! - Signing confirmation toggle
//!
//! Loaded from camelCase JSON and validated before any remote call.

use crate::account::{AccountConfig, ClientSettings};
use crate::error::{BridgeError, BridgeResult};
use crate::types::{AccountStorageMode, AccountType};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Note relay used when the caller does not supply one
pub const DEFAULT_NOTE_TRANSPORT_URL: &str = "https://transport.miden.io";

/// Public testnet RPC endpoint
pub const TESTNET_ENDPOINT: &str = "https://rpc.testnet.miden.io";

/// Options recognized when building a bridged client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Ledger RPC URL; the ledger client picks its own default when absent
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Note relay URL
    #[serde(default)]
    pub note_transport_url: Option<String>,
    /// Older spelling of `noteTransportUrl`, read but never written back
    #[serde(default, skip_serializing)]
    pub node_transport_url: Option<String>,
    /// Client-level entropy, passed through to the ledger client
    #[serde(default)]
    pub seed: Option<String>,
    /// Account-level entropy; required for private storage
    #[serde(default)]
    pub account_seed: Option<String>,
    #[serde(default, rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub storage_mode: AccountStorageMode,
    #[serde(default = "default_show_signing_modal")]
    pub show_signing_modal: bool,
}

fn default_show_signing_modal() -> bool {
    true
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            note_transport_url: None,
            node_transport_url: None,
            seed: None,
            account_seed: None,
            account_type: AccountType::default(),
            storage_mode: AccountStorageMode::default(),
            show_signing_modal: true,
        }
    }
}

impl BridgeConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> BridgeResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| BridgeError::invalid_config(format!("JSON parse error: {}", e)))
    }

    /// Read and parse a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> BridgeResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::invalid_config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Effective note transport URL: `noteTransportUrl`, then the legacy
    /// `nodeTransportUrl`, then the default. Empty strings count as unset.
    pub fn note_transport_url(&self) -> &str {
        [&self.note_transport_url, &self.node_transport_url]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_NOTE_TRANSPORT_URL)
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> BridgeResult<()> {
        if let Some(endpoint) = self.endpoint.as_deref() {
            validate_url(endpoint, "endpoint")?;
        }
        validate_url(self.note_transport_url(), "noteTransportUrl")?;
        self.account_config().validate()
    }

    pub fn account_config(&self) -> AccountConfig {
        AccountConfig {
            account_type: self.account_type,
            storage_mode: self.storage_mode,
            account_seed: self.account_seed.clone(),
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            note_transport_url: self.note_transport_url().to_string(),
            seed: self.seed.clone(),
        }
    }
}

/// Validate a remote URL: https everywhere, plain http only for local development
fn validate_url(raw: &str, name: &str) -> BridgeResult<()> {
    let parsed = Url::parse(raw)
        .map_err(|e| BridgeError::invalid_config(format!("{} is not a valid URL: {}", name, e)))?;

    match parsed.scheme() {
        "https" => {}
        "http" => {
            let host = parsed.host_str().unwrap_or_default();
            if host != "localhost" && host != "127.0.0.1" {
                return Err(BridgeError::invalid_config(format!(
                    "{} must use https for remote hosts",
                    name
                )));
            }
            crate::log_warn!("config", "HTTP allowed for local development only", url = raw);
        }
        other => {
            return Err(BridgeError::invalid_config(format!(
                "{} uses unsupported scheme '{}'",
                name, other
            )));
        }
    }

    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(BridgeError::invalid_config(format!(
            "{} must not embed credentials",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert!(config.show_signing_modal);
        assert_eq!(config.storage_mode, AccountStorageMode::Public);
        assert_eq!(config.note_transport_url(), DEFAULT_NOTE_TRANSPORT_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json() {
        let config = BridgeConfig::from_json_str(
            r#"{
                "endpoint": "https://rpc.testnet.miden.io",
                "storageMode": "private",
                "accountSeed": "hello",
                "type": "RegularAccountUpdatableCode",
                "showSigningModal": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.endpoint.as_deref(), Some(TESTNET_ENDPOINT));
        assert_eq!(config.storage_mode, AccountStorageMode::Private);
        assert_eq!(config.account_type, AccountType::RegularAccountUpdatableCode);
        assert!(!config.show_signing_modal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_legacy_transport_alias() {
        let config =
            BridgeConfig::from_json_str(r#"{"nodeTransportUrl": "https://notes.example.org"}"#)
                .unwrap();
        assert_eq!(config.note_transport_url(), "https://notes.example.org");
        assert_eq!(config.client_settings().note_transport_url, "https://notes.example.org");
    }

    #[test]
    fn test_both_transport_keys_prefer_note() {
        let config = BridgeConfig::from_json_str(
            r#"{"noteTransportUrl": "https://notes.example.org",
                "nodeTransportUrl": "https://legacy.example.org"}"#,
        )
        .unwrap();
        assert_eq!(config.note_transport_url(), "https://notes.example.org");

        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("nodeTransportUrl").is_none());
    }

    #[test]
    fn test_empty_note_key_falls_back_to_legacy() {
        let config = BridgeConfig::from_json_str(
            r#"{"noteTransportUrl": "", "nodeTransportUrl": "https://legacy.example.org"}"#,
        )
        .unwrap();
        assert_eq!(config.note_transport_url(), "https://legacy.example.org");

        let config = BridgeConfig::from_json_str(r#"{"noteTransportUrl": "", "nodeTransportUrl": ""}"#)
            .unwrap();
        assert_eq!(config.note_transport_url(), DEFAULT_NOTE_TRANSPORT_URL);
    }

    #[test]
    fn test_private_without_seed_is_rejected() {
        let config = BridgeConfig {
            storage_mode: AccountStorageMode::Private,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(BridgeError::MissingSeed));
    }

    #[test]
    fn test_endpoint_validation() {
        let mut config = BridgeConfig {
            endpoint: Some("http://rpc.example.org".into()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BridgeError::InvalidConfig(_))));

        config.endpoint = Some("http://localhost:57291".into());
        assert!(config.validate().is_ok());

        config.endpoint = Some("https://user:pw@rpc.example.org".into());
        assert!(config.validate().is_err());

        config.endpoint = Some("not a url".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = BridgeConfig::from_json_str(r#"{"storageMode": "offchain"}"#).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidConfig(_)));
    }
}
