//! EVM public key -> ledger commitment
//!
//! The ledger's ECDSA auth component is seeded with an RPO-256 commitment
//! over the compressed public key. Para hands out uncompressed keys
//! (`0x04 || X || Y`), so the key is compressed here by hand: the tag byte
//! is 2 for even Y and 3 for odd Y, followed by the 32 bytes of X.

use super::felt::{bytes_to_field_elements, PACKED_KEY_LEN};
use crate::error::{BridgeError, BridgeResult};
use crate::utils::crypto::strip_hex_prefix;
use miden_crypto::hash::rpo::{Rpo256, RpoDigest};
use miden_crypto::Felt;
use std::fmt;

/// Hex length of X or Y
const COORD_HEX_LEN: usize = 64;

/// Uncompressed SEC1 point marker
const UNCOMPRESSED_MARKER: &str = "04";

/// Parsed uncompressed secp256k1 public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncompressedPublicKey {
    x_hex: String,
    y_hex: String,
}

impl UncompressedPublicKey {
    /// Parse `0x04{x}{y}` (or `04{x}{y}`) where x and y are 64 hex chars each
    pub fn parse(public_key: &str) -> BridgeResult<Self> {
        let body = strip_hex_prefix(public_key.trim());
        let coords = body.strip_prefix(UNCOMPRESSED_MARKER).ok_or_else(|| {
            BridgeError::encoding("public key must start with the 0x04 uncompressed marker")
        })?;

        if coords.len() != 2 * COORD_HEX_LEN {
            return Err(BridgeError::encoding(format!(
                "public key must carry {} hex chars after the marker, got {}",
                2 * COORD_HEX_LEN,
                coords.len()
            )));
        }
        if !coords.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BridgeError::encoding("public key contains non-hex characters"));
        }

        let (x, y) = coords.split_at(COORD_HEX_LEN);
        Ok(Self {
            x_hex: x.to_ascii_lowercase(),
            y_hex: y.to_ascii_lowercase(),
        })
    }

    pub fn x_hex(&self) -> &str {
        &self.x_hex
    }

    pub fn y_hex(&self) -> &str {
        &self.y_hex
    }

    /// Point-compression tag derived from Y
    pub fn compression_tag(&self) -> BridgeResult<u8> {
        compression_tag(&self.y_hex)
    }

    /// Tag byte followed by the raw X coordinate
    pub fn compressed(&self) -> BridgeResult<[u8; PACKED_KEY_LEN]> {
        let mut bytes = [0u8; PACKED_KEY_LEN];
        bytes[0] = self.compression_tag()?;
        hex::decode_to_slice(&self.x_hex, &mut bytes[1..])?;
        Ok(bytes)
    }
}

/// Compression tag for a hex-encoded Y coordinate.
///
/// Only the final nibble is inspected; its low bit is the low bit of Y.
pub fn compression_tag(y_hex: &str) -> BridgeResult<u8> {
    let last = y_hex
        .chars()
        .last()
        .ok_or_else(|| BridgeError::encoding("empty Y coordinate"))?;
    let nibble = last
        .to_digit(16)
        .ok_or_else(|| BridgeError::encoding(format!("'{}' is not a hex digit", last)))?;

    Ok(if nibble % 2 == 0 { 2 } else { 3 })
}

/// RPO-256 commitment to a public key, used as the account's auth seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitment(RpoDigest);

impl Commitment {
    pub fn from_digest(digest: RpoDigest) -> Self {
        Self(digest)
    }

    pub fn digest(&self) -> RpoDigest {
        self.0
    }

    pub fn elements(&self) -> &[Felt] {
        self.0.as_elements()
    }

    /// Little-endian bytes of the four digest elements
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.as_bytes()
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Tagged compressed key bytes for an uncompressed hex public key
pub fn compressed_public_key(public_key: &str) -> BridgeResult<[u8; PACKED_KEY_LEN]> {
    UncompressedPublicKey::parse(public_key)?.compressed()
}

/// Derive the ledger commitment for an uncompressed EVM public key.
///
/// Pure: the same key always yields the same commitment.
pub fn derive_commitment(public_key: &str) -> BridgeResult<Commitment> {
    let compressed = compressed_public_key(public_key)?;
    let elements = bytes_to_field_elements(&compressed)?;
    Ok(Commitment(Rpo256::hash_elements(&elements)))
}
