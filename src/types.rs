//! Shared types for the bridge
//!
//! Data structures that cross module boundaries are defined here
//! for consistent serialization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BridgeError;

// =============================================================================
// Account Types
// =============================================================================

/// Ledger account kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    FungibleFaucet,
    NonFungibleFaucet,
    RegularAccountImmutableCode,
    RegularAccountUpdatableCode,
}

impl AccountType {
    /// Two-bit code embedded in the account id prefix
    pub fn code(&self) -> u8 {
        match self {
            AccountType::RegularAccountImmutableCode => 0b00,
            AccountType::RegularAccountUpdatableCode => 0b01,
            AccountType::FungibleFaucet => 0b10,
            AccountType::NonFungibleFaucet => 0b11,
        }
    }

    pub fn is_faucet(&self) -> bool {
        matches!(self, AccountType::FungibleFaucet | AccountType::NonFungibleFaucet)
    }
}

impl Default for AccountType {
    fn default() -> Self {
        AccountType::RegularAccountImmutableCode
    }
}

impl FromStr for AccountType {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FungibleFaucet" | "fungible-faucet" => Ok(AccountType::FungibleFaucet),
            "NonFungibleFaucet" | "non-fungible-faucet" => Ok(AccountType::NonFungibleFaucet),
            "RegularAccountImmutableCode" | "regular-immutable" => {
                Ok(AccountType::RegularAccountImmutableCode)
            }
            "RegularAccountUpdatableCode" | "regular-updatable" => {
                Ok(AccountType::RegularAccountUpdatableCode)
            }
            other => Err(BridgeError::invalid_config(format!("unknown account type '{}'", other))),
        }
    }
}

/// Where the account state lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStorageMode {
    Public,
    Private,
    Network,
}

impl AccountStorageMode {
    /// Two-bit code embedded in the account id prefix
    pub fn code(&self) -> u8 {
        match self {
            AccountStorageMode::Public => 0b00,
            AccountStorageMode::Network => 0b01,
            AccountStorageMode::Private => 0b10,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, AccountStorageMode::Private)
    }
}

impl Default for AccountStorageMode {
    fn default() -> Self {
        AccountStorageMode::Public
    }
}

impl fmt::Display for AccountStorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStorageMode::Public => write!(f, "public"),
            AccountStorageMode::Private => write!(f, "private"),
            AccountStorageMode::Network => write!(f, "network"),
        }
    }
}

impl FromStr for AccountStorageMode {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(AccountStorageMode::Public),
            "private" => Ok(AccountStorageMode::Private),
            "network" => Ok(AccountStorageMode::Network),
            other => Err(BridgeError::invalid_config(format!("unknown storage mode '{}'", other))),
        }
    }
}

/// Authentication scheme installed on the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthScheme {
    /// ECDSA over secp256k1 with keccak256 message hashing
    EcdsaK256Keccak,
}

impl AuthScheme {
    /// Scheme identifier, also the leading byte of serialized signatures
    pub fn id(&self) -> u8 {
        match self {
            AuthScheme::EcdsaK256Keccak => 1,
        }
    }
}

// =============================================================================
// Wallet Types
// =============================================================================

/// Kind of wallet exposed by the auth provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WalletKind {
    Evm,
    Solana,
    Cosmos,
}

/// Wallet as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WalletKind,
    /// Uncompressed public key, when the provider includes it inline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl Wallet {
    pub fn evm(id: impl Into<String>, public_key: Option<String>) -> Self {
        Self {
            id: id.into(),
            kind: WalletKind::Evm,
            public_key,
        }
    }

    pub fn is_evm(&self) -> bool {
        self.kind == WalletKind::Evm
    }
}

// =============================================================================
// Transaction Summary Types
// =============================================================================

/// Asset carried by a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AssetSummary {
    #[serde(rename_all = "camelCase")]
    Fungible { faucet_id: String, amount: u64 },
    #[serde(rename_all = "camelCase")]
    NonFungible { faucet_id: String, data_hash: String },
}

/// Visibility of an output note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Public,
    Private,
    Encrypted,
}

/// Note consumed by the transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputNoteSummary {
    pub id: String,
    pub sender: String,
    #[serde(default)]
    pub assets: Vec<AssetSummary>,
}

/// Note created by the transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputNoteSummary {
    pub id: String,
    pub note_type: NoteType,
    #[serde(default)]
    pub assets: Vec<AssetSummary>,
}

/// Human-readable view of a pending transaction, shown before signing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxSummary {
    #[serde(default)]
    pub input_notes: Vec<InputNoteSummary>,
    #[serde(default)]
    pub output_notes: Vec<OutputNoteSummary>,
}

impl TxSummary {
    pub fn is_empty(&self) -> bool {
        self.input_notes.is_empty() && self.output_notes.is_empty()
    }

    /// Total number of assets moved in and out
    pub fn asset_count(&self) -> usize {
        let inputs: usize = self.input_notes.iter().map(|n| n.assets.len()).sum();
        let outputs: usize = self.output_notes.iter().map(|n| n.assets.len()).sum();
        inputs + outputs
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// Envelope for JSON results handed to hosts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<crate::error::ErrorReport>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: &BridgeError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"code":"encoding_error","kind":"input","message":"Serialization failed"}}"#.to_string()
        })
    }
}
