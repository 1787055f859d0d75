//! Ports to the ledger client

use super::descriptor::{AccountDescriptor, AccountId};
use crate::error::ProviderError;
use crate::signing::SigningCallback;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Connection settings handed to the ledger client factory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSettings {
    /// RPC endpoint; `None` lets the client use its default network
    pub endpoint: Option<String>,
    pub note_transport_url: String,
    /// Client-level entropy
    pub seed: Option<String>,
}

/// Account as tracked by the ledger client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: AccountId,
    pub nonce: u64,
}

/// Ledger client used by the bridge.
///
/// Mutating calls take `&mut self`; a client is driven by one flow at a time.
#[allow(async_fn_in_trait)]
pub trait LedgerClient {
    /// Bring local state up to date with the network
    async fn sync_state(&mut self) -> Result<(), ProviderError>;

    /// Locally tracked account, if any
    async fn get_account(&self, id: &AccountId) -> Result<Option<AccountRecord>, ProviderError>;

    /// Track a new account built from a descriptor
    async fn new_account(
        &mut self,
        descriptor: &AccountDescriptor,
        overwrite: bool,
    ) -> Result<(), ProviderError>;

    /// Import a public account from the network. Fails when the network
    /// does not know the id.
    async fn import_account_by_id(&mut self, id: &AccountId) -> Result<(), ProviderError>;

    /// Submit a transaction request for an account, returning the
    /// transaction id
    async fn submit_transaction(
        &mut self,
        account_id: &AccountId,
        request: &[u8],
    ) -> Result<String, ProviderError>;
}

/// Creates ledger clients bound to a signing hook
#[allow(async_fn_in_trait)]
pub trait LedgerClientFactory {
    type Client: LedgerClient;

    async fn create_client(
        &self,
        settings: &ClientSettings,
        signer: Arc<dyn SigningCallback>,
    ) -> Result<Self::Client, ProviderError>;
}
