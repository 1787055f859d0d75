//! Import-or-create reconciliation of the bridged account

use super::descriptor::{AccountDescriptor, AccountId};
use super::ledger::LedgerClient;
use super::AccountConfig;
use crate::crypto::derive_commitment;
use crate::error::{BridgeError, BridgeResult};

/// Make sure the ledger client tracks the account bound to `public_key`.
///
/// Syncs, derives the descriptor, imports public/network accounts from the
/// network (a missing remote account is not an error), creates the account
/// locally when still unknown and syncs again. Calling it again for the
/// same key and config returns the same id without creating anything.
pub async fn ensure_account<C: LedgerClient>(
    client: &mut C,
    public_key: &str,
    config: &AccountConfig,
) -> BridgeResult<AccountId> {
    client.sync_state().await.map_err(BridgeError::from_ledger)?;

    let commitment = derive_commitment(public_key)?;
    config.validate()?;

    let descriptor = AccountDescriptor::build(commitment, config)?;
    let account_id = descriptor.id();

    crate::log_debug!(
        "account",
        "Reconciling account",
        account_id = account_id,
        commitment = commitment,
        storage_mode = config.storage_mode
    );

    if !config.storage_mode.is_private() {
        if let Err(e) = client.import_account_by_id(&account_id).await {
            crate::log_debug!("account", "Account not imported", account_id = account_id, reason = e);
        }
    }

    let existing = client
        .get_account(&account_id)
        .await
        .map_err(BridgeError::from_ledger)?;

    if existing.is_none() {
        client
            .new_account(&descriptor, false)
            .await
            .map_err(BridgeError::from_ledger)?;
        crate::log_info!("account", "Created account", account_id = account_id);
    }

    client.sync_state().await.map_err(BridgeError::from_ledger)?;

    Ok(account_id)
}
