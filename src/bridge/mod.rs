//! Bridge orchestration
//!
//! Turns a set of provider wallets into a ready-to-use ledger client:
//! pick an EVM wallet, resolve its public key, bind a signing relay to it,
//! create the ledger client and reconcile the bridged account.


use crate::account::{ensure_account, AccountId, LedgerClient, LedgerClientFactory};
use crate::confirm::ConfirmationPort;
use crate::crypto::derive_commitment;
use crate::error::{BridgeError, BridgeResult};
use crate::signing::{CustomSignConfirmStep, SigningCallback, SigningRelay};
use crate::types::Wallet;
use crate::utils::config::BridgeConfig;
use crate::wallet::{evm_wallets, get_uncompressed_public_key_from_wallet, WalletProvider};
use std::fmt;
use std::sync::Arc;

/// Ledger client bound to a provider wallet
pub struct BridgeClient<C> {
    client: C,
    account_id: AccountId,
    wallet_id: String,
    public_key: String,
}

impl<C> fmt::Debug for BridgeClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeClient")
            .field("account_id", &self.account_id)
            .field("wallet_id", &self.wallet_id)
            .finish_non_exhaustive()
    }
}

impl<C: LedgerClient> BridgeClient<C> {
    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn wallet_id(&self) -> &str {
        &self.wallet_id
    }

    /// Uncompressed public key of the bridged wallet
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn into_parts(self) -> (C, AccountId) {
        (self.client, self.account_id)
    }

    /// Submit a transaction request on behalf of the bridged account
    pub async fn submit_transaction(&mut self, request: &[u8]) -> BridgeResult<String> {
        let tx_id = self
            .client
            .submit_transaction(&self.account_id, request)
            .await
            .map_err(BridgeError::from_ledger)?;

        crate::log_info!(
            "bridge",
            "Transaction submitted",
            account_id = self.account_id,
            tx_id = tx_id
        );
        Ok(tx_id)
    }
}

/// Build a ledger client whose account is controlled by a provider EVM wallet.
///
/// Fails before any remote call when the configuration is invalid. With
/// several EVM wallets the user picks one through `confirmation`; an
/// out-of-range answer selects the first wallet.
pub async fn build_bridge_client<W, P, F>(
    provider: Arc<W>,
    confirmation: Arc<P>,
    factory: &F,
    wallets: &[Wallet],
    config: &BridgeConfig,
    custom_step: Option<CustomSignConfirmStep>,
) -> BridgeResult<BridgeClient<F::Client>>
where
    W: WalletProvider + Send + Sync + 'static,
    P: ConfirmationPort + Send + Sync + 'static,
    F: LedgerClientFactory,
{
    config.validate()?;

    let candidates = evm_wallets(wallets);
    if candidates.is_empty() {
        return Err(BridgeError::NoCompatibleWallet);
    }

    let mut public_keys = Vec::with_capacity(candidates.len());
    for wallet in &candidates {
        public_keys.push(get_uncompressed_public_key_from_wallet(provider.as_ref(), wallet).await?);
    }

    let index = if public_keys.len() > 1 {
        let selected = confirmation.select_account(&public_keys).await?;
        if selected < public_keys.len() {
            selected
        } else {
            crate::log_warn!("bridge", "Selection out of range, using first wallet", index = selected);
            0
        }
    } else {
        0
    };

    let wallet = &candidates[index];
    let public_key = public_keys.swap_remove(index);
    derive_commitment(&public_key)?;

    crate::log_info!(
        "bridge",
        "Bridging wallet",
        wallet_id = wallet.id,
        public_key = public_key,
        storage_mode = config.storage_mode
    );

    let relay = SigningRelay::new(provider, confirmation, wallet.id.clone())
        .with_signing_modal(config.show_signing_modal)
        .with_custom_step(custom_step);
    let signer: Arc<dyn SigningCallback> = Arc::new(relay);

    let mut client = factory
        .create_client(&config.client_settings(), signer)
        .await
        .map_err(BridgeError::from_ledger)?;

    let account_id = ensure_account(&mut client, &public_key, &config.account_config()).await?;

    Ok(BridgeClient {
        client,
        account_id,
        wallet_id: wallet.id.clone(),
        public_key,
    })
}
