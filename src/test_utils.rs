//! In-memory collaborators shared by the unit tests

use crate::account::{
    AccountDescriptor, AccountId, AccountRecord, ClientSettings, LedgerClient, LedgerClientFactory,
};
use crate::confirm::ConfirmationPort;
use crate::error::{BridgeResult, ProviderError};
use crate::signing::SigningCallback;
use crate::types::TxSummary;
use crate::wallet::{JwtResponse, SignatureResponse, WalletProvider};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Uncompressed key string with X = `[n; 32]` and Y = `[n + 1; 32]`
pub fn test_public_key(n: u8) -> String {
    format!(
        "0x04{}{}",
        hex::encode([n; 32]),
        hex::encode([n.wrapping_add(1); 32])
    )
}

/// Compact token whose payload is `{"data": {"connectedWallets": wallets}}`
pub fn jwt_with_wallets(wallets: serde_json::Value) -> String {
    let payload = serde_json::json!({ "data": { "connectedWallets": wallets } });
    format!(
        "{}.{}.",
        STANDARD.encode(br#"{"alg":"ES256","typ":"JWT"}"#),
        STANDARD.encode(payload.to_string())
    )
}

// =============================================================================
// Wallet provider
// =============================================================================

pub struct MockWalletProvider {
    signature: String,
    token: Option<String>,
    fail_signing: bool,
    sign_calls: Mutex<Vec<(String, String)>>,
    jwt_calls: AtomicUsize,
}

impl MockWalletProvider {
    pub fn new(signature: &str) -> Self {
        Self {
            signature: signature.to_string(),
            token: None,
            fail_signing: false,
            sign_calls: Mutex::new(Vec::new()),
            jwt_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_signing: true,
            ..Self::new("")
        }
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// `(wallet_id, message_base64)` of every signing request
    pub fn sign_calls(&self) -> Vec<(String, String)> {
        self.sign_calls.lock().unwrap().clone()
    }

    pub fn jwt_calls(&self) -> usize {
        self.jwt_calls.load(Ordering::SeqCst)
    }
}

impl WalletProvider for MockWalletProvider {
    async fn sign_message(
        &self,
        wallet_id: &str,
        message_base64: &str,
    ) -> Result<SignatureResponse, ProviderError> {
        self.sign_calls
            .lock()
            .unwrap()
            .push((wallet_id.to_string(), message_base64.to_string()));

        if self.fail_signing {
            return Err("signer unavailable".into());
        }
        Ok(SignatureResponse {
            signature: self.signature.clone(),
        })
    }

    async fn issue_jwt(&self) -> Result<JwtResponse, ProviderError> {
        self.jwt_calls.fetch_add(1, Ordering::SeqCst);
        match &self.token {
            Some(token) => Ok(JwtResponse {
                token: token.clone(),
            }),
            None => Err("no active session".into()),
        }
    }
}

// =============================================================================
// Confirmation
// =============================================================================

pub struct ScriptedConfirmation {
    approve: bool,
    selection: usize,
    signing_prompts: AtomicUsize,
    selection_prompts: Mutex<Vec<Vec<String>>>,
}

impl ScriptedConfirmation {
    pub fn approving() -> Self {
        Self {
            approve: true,
            selection: 0,
            signing_prompts: AtomicUsize::new(0),
            selection_prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn declining() -> Self {
        Self {
            approve: false,
            ..Self::approving()
        }
    }

    pub fn selecting(mut self, index: usize) -> Self {
        self.selection = index;
        self
    }

    pub fn signing_prompts(&self) -> usize {
        self.signing_prompts.load(Ordering::SeqCst)
    }

    /// Candidate lists of every selection prompt shown
    pub fn selection_prompts(&self) -> Vec<Vec<String>> {
        self.selection_prompts.lock().unwrap().clone()
    }
}

impl ConfirmationPort for ScriptedConfirmation {
    async fn confirm_signing(&self, _summary: &TxSummary) -> BridgeResult<bool> {
        self.signing_prompts.fetch_add(1, Ordering::SeqCst);
        Ok(self.approve)
    }

    async fn select_account(&self, candidates: &[String]) -> BridgeResult<usize> {
        self.selection_prompts.lock().unwrap().push(candidates.to_vec());
        Ok(self.selection)
    }
}

// =============================================================================
// Ledger
// =============================================================================

pub struct MockLedger {
    signer: Option<Arc<dyn SigningCallback>>,
    remote: HashSet<AccountId>,
    local: HashMap<AccountId, AccountRecord>,
    created: Vec<AccountId>,
    submitted: Vec<(AccountId, Vec<u8>)>,
    imports: usize,
    syncs: usize,
    fail_sync: bool,
    fail_create: bool,
}

impl MockLedger {
    pub fn new() -> Self {
        Self {
            signer: None,
            remote: HashSet::new(),
            local: HashMap::new(),
            created: Vec::new(),
            submitted: Vec::new(),
            imports: 0,
            syncs: 0,
            fail_sync: false,
            fail_create: false,
        }
    }

    pub fn with_signer(mut self, signer: Arc<dyn SigningCallback>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Pretend the network already knows this account
    pub fn with_remote_account(mut self, id: AccountId) -> Self {
        self.remote.insert(id);
        self
    }

    pub fn failing_sync(mut self) -> Self {
        self.fail_sync = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn created(&self) -> Vec<AccountId> {
        self.created.clone()
    }

    /// Account id and signature of every submitted transaction
    pub fn submitted(&self) -> &[(AccountId, Vec<u8>)] {
        &self.submitted
    }

    pub fn imports(&self) -> usize {
        self.imports
    }

    pub fn syncs(&self) -> usize {
        self.syncs
    }
}

impl LedgerClient for MockLedger {
    async fn sync_state(&mut self) -> Result<(), ProviderError> {
        if self.fail_sync {
            return Err("node unreachable".into());
        }
        self.syncs += 1;
        Ok(())
    }

    async fn get_account(&self, id: &AccountId) -> Result<Option<AccountRecord>, ProviderError> {
        Ok(self.local.get(id).cloned())
    }

    async fn new_account(
        &mut self,
        descriptor: &AccountDescriptor,
        overwrite: bool,
    ) -> Result<(), ProviderError> {
        if self.fail_create {
            return Err("store is read-only".into());
        }
        let id = descriptor.id();
        if self.local.contains_key(&id) && !overwrite {
            return Err("account already tracked".into());
        }
        self.local.insert(id, AccountRecord { id, nonce: 0 });
        self.created.push(id);
        Ok(())
    }

    async fn import_account_by_id(&mut self, id: &AccountId) -> Result<(), ProviderError> {
        self.imports += 1;
        if !self.remote.contains(id) {
            return Err("account not found on network".into());
        }
        self.local.insert(*id, AccountRecord { id: *id, nonce: 1 });
        Ok(())
    }

    async fn submit_transaction(
        &mut self,
        account_id: &AccountId,
        request: &[u8],
    ) -> Result<String, ProviderError> {
        let record = self
            .local
            .get_mut(account_id)
            .ok_or("account is not tracked")?;
        let signer = self.signer.as_ref().ok_or("no signer configured")?;

        let signature = signer.sign(&[], request).await?;
        record.nonce += 1;
        self.submitted.push((*account_id, signature.clone()));
        Ok(format!("0x{}", hex::encode(crate::utils::crypto::keccak256(&signature))))
    }
}

/// Factory that hands out [`MockLedger`]s and records how it was called
#[derive(Default)]
pub struct MockLedgerFactory {
    remote: Vec<AccountId>,
    fail: bool,
    settings: Mutex<Vec<ClientSettings>>,
}

impl MockLedgerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remote_account(mut self, id: AccountId) -> Self {
        self.remote.push(id);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Settings passed to every `create_client` call
    pub fn settings(&self) -> Vec<ClientSettings> {
        self.settings.lock().unwrap().clone()
    }
}

impl LedgerClientFactory for MockLedgerFactory {
    type Client = MockLedger;

    async fn create_client(
        &self,
        settings: &ClientSettings,
        signer: Arc<dyn SigningCallback>,
    ) -> Result<MockLedger, ProviderError> {
        self.settings.lock().unwrap().push(settings.clone());
        if self.fail {
            return Err("cannot open store".into());
        }

        let mut ledger = MockLedger::new().with_signer(signer);
        for id in &self.remote {
            ledger = ledger.with_remote_account(*id);
        }
        Ok(ledger)
    }
}
