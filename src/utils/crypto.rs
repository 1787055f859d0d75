//! Hashing and hex helpers shared by the codec, relay and adapter.

use crate::error::{BridgeError, BridgeResult};
use tiny_keccak::{Hasher, Keccak};

/// Keccak256 hash (the message digest applied before remote signing)
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Strip an optional `0x`/`0X` prefix
pub fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Decode hex into a fixed-size array, reporting the field name on failure
pub fn decode_hex_array<const N: usize>(value: &str, what: &str) -> BridgeResult<[u8; N]> {
    let bytes = hex::decode(strip_hex_prefix(value))
        .map_err(|e| BridgeError::encoding(format!("{} is not valid hex: {}", what, e)))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        BridgeError::encoding(format!("{} must be {} bytes, got {}", what, N, b.len()))
    })
}
