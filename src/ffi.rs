//! FFI Layer
//!
//! C-ABI exports of the offline bridge operations for native hosts. Every
//! function follows the same pattern:
//! - Input: JSON string (null-terminated C string)
//! - Output: JSON string (must be freed with `miden_para_free_string`)
//!
//! The output is an [`ApiResponse`]: `success: false` carries an `error`
//! object with a stable `code`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::account::{AccountConfig, AccountDescriptor};
use crate::crypto::{compressed_public_key, derive_commitment};
use crate::error::{BridgeError, BridgeResult};
use crate::signing::adapt_signature;
use crate::types::{AccountStorageMode, AccountType, ApiResponse};
use crate::utils::config::BridgeConfig;
use serde::{Deserialize, Serialize};

// =============================================================================
// Memory Management
// =============================================================================

/// Free a string returned by any miden_para_* function
///
/// # Safety
/// The pointer must have been returned by a miden_para_* function and not
/// freed before.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn miden_para_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    drop(CString::from_raw(s));
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Run `handler` on the request string and encode its result
fn respond<T, F>(input: *const c_char, handler: F) -> *mut c_char
where
    T: Serialize,
    F: FnOnce(&str) -> BridgeResult<T>,
{
    if input.is_null() {
        return error_response(&BridgeError::encoding("Null input pointer"));
    }

    // Safety: non-null pointers come from the host as NUL-terminated strings
    let c_str = unsafe { CStr::from_ptr(input) };
    let result = c_str
        .to_str()
        .map_err(|_| BridgeError::encoding("Invalid UTF-8 string"))
        .and_then(handler);

    match result {
        Ok(data) => string_to_ptr(ApiResponse::ok(data).to_json()),
        Err(e) => error_response(&e),
    }
}

fn error_response(error: &BridgeError) -> *mut c_char {
    string_to_ptr(ApiResponse::<()>::err(error).to_json())
}

fn string_to_ptr(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        Err(_) => c"{\"success\":false,\"error\":{\"code\":\"encoding_error\",\"kind\":\"input\",\"message\":\"String conversion failed\"}}"
            .to_owned()
            .into_raw(),
    }
}

// =============================================================================
// Requests and Responses
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicKeyRequest {
    public_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentResponse {
    pub commitment: String,
    pub compressed_public_key: String,
}

#[derive(Debug, Deserialize)]
struct SignatureRequest {
    signature: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignatureResponse {
    pub signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountIdRequest {
    public_key: String,
    #[serde(flatten)]
    account: AccountConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdResponse {
    pub account_id: String,
    pub commitment: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub storage_mode: AccountStorageMode,
}

// =============================================================================
// Operations
// =============================================================================

/// Commitment and tagged compressed key for an uncompressed public key
pub fn commitment_for(public_key: &str) -> BridgeResult<CommitmentResponse> {
    Ok(CommitmentResponse {
        commitment: derive_commitment(public_key)?.to_hex(),
        compressed_public_key: format!("0x{}", hex::encode(compressed_public_key(public_key)?)),
    })
}

/// Ledger-format signature for a hex signature
pub fn adapted_signature_for(signature: &str) -> BridgeResult<SignatureResponse> {
    Ok(SignatureResponse {
        signature: format!("0x{}", hex::encode(adapt_signature(signature)?)),
    })
}

/// Account id the bridge would use for a key and account settings
pub fn account_id_for(public_key: &str, config: &AccountConfig) -> BridgeResult<AccountIdResponse> {
    config.validate()?;
    let commitment = derive_commitment(public_key)?;
    let descriptor = AccountDescriptor::build(commitment, config)?;

    Ok(AccountIdResponse {
        account_id: descriptor.id().to_string(),
        commitment: commitment.to_hex(),
        account_type: descriptor.account_type(),
        storage_mode: descriptor.storage_mode(),
    })
}

// =============================================================================
// Exports
// =============================================================================

/// Derive the key commitment
///
/// # Input
/// `{"publicKey": "0x04..."}`
///
/// # Output
/// `{"commitment": "0x...", "compressedPublicKey": "0x02..."}`
#[unsafe(no_mangle)]
pub extern "C" fn miden_para_derive_commitment(input: *const c_char) -> *mut c_char {
    respond(input, |json| {
        let request: PublicKeyRequest = serde_json::from_str(json)?;
        commitment_for(&request.public_key)
    })
}

/// Serialize a remote signature for the ledger
///
/// # Input
/// `{"signature": "<hex>"}`
#[unsafe(no_mangle)]
pub extern "C" fn miden_para_adapt_signature(input: *const c_char) -> *mut c_char {
    respond(input, |json| {
        let request: SignatureRequest = serde_json::from_str(json)?;
        adapted_signature_for(&request.signature)
    })
}

/// Compute the bridged account id
///
/// # Input
/// `{"publicKey": "0x04...", "type"?: ..., "storageMode"?: ..., "accountSeed"?: ...}`
#[unsafe(no_mangle)]
pub extern "C" fn miden_para_account_id(input: *const c_char) -> *mut c_char {
    respond(input, |json| {
        let request: AccountIdRequest = serde_json::from_str(json)?;
        account_id_for(&request.public_key, &request.account)
    })
}

/// Validate a bridge configuration and return it with defaults applied
#[unsafe(no_mangle)]
pub extern "C" fn miden_para_validate_config(input: *const c_char) -> *mut c_char {
    respond(input, |json| {
        let mut config = BridgeConfig::from_json_str(json)?;
        config.validate()?;
        config.note_transport_url = Some(config.note_transport_url().to_string());
        Ok(config)
    })
}
