//! Ledger Account Module
//!
//! Builds the descriptor of the account bridged to an EVM key and makes
//! sure the ledger client knows about it:
//! - [`seed`]: account-level entropy
//! - [`descriptor`]: account id derivation and components
//! - [`ledger`]: ports to the ledger client
//! - [`reconciler`]: import-or-create flow

pub mod descriptor;
pub mod ledger;
pub mod reconciler;
pub mod seed;

pub use descriptor::{AccountComponent, AccountDescriptor, AccountId};
pub use ledger::{AccountRecord, ClientSettings, LedgerClient, LedgerClientFactory};
pub use reconciler::ensure_account;
pub use seed::{account_seed_from_str, AccountSeed, ACCOUNT_SEED_LEN};

use crate::error::{BridgeError, BridgeResult};
use crate::types::{AccountStorageMode, AccountType};
use serde::{Deserialize, Serialize};

/// Account-level settings of a bridged account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountConfig {
    #[serde(default, rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub storage_mode: AccountStorageMode,
    #[serde(default)]
    pub account_seed: Option<String>,
}

impl AccountConfig {
    /// Private accounts need a non-default seed
    pub fn validate(&self) -> BridgeResult<()> {
        if self.storage_mode.is_private() && self.seed().map_or(true, |s| s.is_default()) {
            return Err(BridgeError::MissingSeed);
        }
        Ok(())
    }

    /// Seed derived from `account_seed`, if any
    pub fn seed(&self) -> Option<AccountSeed> {
        account_seed_from_str(self.account_seed.as_deref())
    }

    /// Seed used for id derivation, all zeros when none is configured
    pub fn effective_seed(&self) -> AccountSeed {
        self.seed().unwrap_or_else(AccountSeed::default_zero)
    }
}
