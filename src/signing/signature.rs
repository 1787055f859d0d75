//! Para signature -> ledger signature serialization
//!
//! The ledger deserializes an auth signature as
//! `scheme id (1 byte) || raw signature || pad (1 byte)`.

use crate::error::{BridgeError, BridgeResult};
use crate::types::AuthScheme;
use crate::utils::crypto::strip_hex_prefix;

/// Trailing byte the ledger's ECDSA deserializer currently expects.
///
/// Works around an extra byte in the upstream signature serialization;
/// drop it once the ledger crypto library stops reading it.
pub const SIGNATURE_PADDING: u8 = 0;

/// Serialize a hex signature from the remote signer into ledger format.
///
/// Odd-length input fails with [`BridgeError::InvalidSignatureLength`]
/// before any decoding is attempted.
pub fn adapt_signature(hex_signature: &str) -> BridgeResult<Vec<u8>> {
    let body = strip_hex_prefix(hex_signature);
    if body.len() % 2 != 0 {
        return Err(BridgeError::InvalidSignatureLength(body.len()));
    }

    let sig_bytes = hex::decode(body)?;

    let mut serialized = Vec::with_capacity(sig_bytes.len() + 2);
    serialized.push(AuthScheme::EcdsaK256Keccak.id());
    serialized.extend_from_slice(&sig_bytes);
    serialized.push(SIGNATURE_PADDING);
    Ok(serialized)
}
