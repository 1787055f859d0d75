//! Byte <-> field element codec
//!
//! RPO-256 absorbs Goldilocks field elements, not bytes. A tagged
//! (compressed) public key is 33 bytes and is packed as eight
//! little-endian u32 words plus one element for the trailing byte.

use crate::error::{BridgeError, BridgeResult};
use miden_crypto::Felt;

/// Length of a tagged, compressed public key
pub const PACKED_KEY_LEN: usize = 33;

/// Number of field elements a packed key occupies
pub const PACKED_KEY_ELEMENTS: usize = 9;

/// Convert a 33-byte buffer into 9 field elements.
///
/// Bytes `0..32` become eight little-endian u32 words, byte 32 becomes the
/// ninth element holding its raw value.
pub fn bytes_to_field_elements(bytes: &[u8]) -> BridgeResult<[Felt; PACKED_KEY_ELEMENTS]> {
    if bytes.len() != PACKED_KEY_LEN {
        return Err(BridgeError::encoding(format!(
            "expected {} bytes, got {}",
            PACKED_KEY_LEN,
            bytes.len()
        )));
    }

    let mut elements = [Felt::new(0); PACKED_KEY_ELEMENTS];
    for (slot, chunk) in elements.iter_mut().zip(bytes[..32].chunks_exact(4)) {
        let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        *slot = Felt::new(word as u64);
    }
    elements[8] = Felt::new(bytes[32] as u64);

    Ok(elements)
}

/// Inverse of [`bytes_to_field_elements`].
pub fn field_elements_to_bytes(
    elements: &[Felt; PACKED_KEY_ELEMENTS],
) -> BridgeResult<[u8; PACKED_KEY_LEN]> {
    let mut bytes = [0u8; PACKED_KEY_LEN];

    for (i, element) in elements[..8].iter().enumerate() {
        let value = element.as_int();
        let word = u32::try_from(value).map_err(|_| {
            BridgeError::encoding(format!("element {} ({}) does not fit in 4 bytes", i, value))
        })?;
        bytes[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }

    let tail = elements[8].as_int();
    bytes[32] = u8::try_from(tail)
        .map_err(|_| BridgeError::encoding(format!("tail element ({}) does not fit in a byte", tail)))?;

    Ok(bytes)
}

/// Pack a 4-byte aligned buffer as little-endian u32 words, one element each.
pub fn bytes_to_words(bytes: &[u8]) -> BridgeResult<Vec<Felt>> {
    if bytes.len() % 4 != 0 {
        return Err(BridgeError::encoding(format!(
            "buffer length {} is not a multiple of 4",
            bytes.len()
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|c| Felt::new(u32::from_le_bytes([c[0], c[1], c[2], c[3]]) as u64))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> [u8; 33] {
        let mut bytes = [0u8; 33];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        bytes
    }

    #[test]
    fn test_little_endian_words() {
        let elements = bytes_to_field_elements(&sample()).unwrap();

        assert_eq!(elements[0].as_int(), 0x04030201);
        assert_eq!(elements[1].as_int(), 0x08070605);
        assert_eq!(elements[7].as_int(), 0x201f1e1d);
        assert_eq!(elements[8].as_int(), 33);
    }

    #[test]
    fn test_max_bytes_stay_below_modulus() {
        let elements = bytes_to_field_elements(&[0xff; 33]).unwrap();
        assert!(elements[..8].iter().all(|e| e.as_int() == u32::MAX as u64));
        assert_eq!(elements[8].as_int(), 0xff);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(matches!(bytes_to_field_elements(&[0u8; 32]), Err(BridgeError::Encoding(_))));
        assert!(matches!(bytes_to_field_elements(&[0u8; 34]), Err(BridgeError::Encoding(_))));
        assert!(bytes_to_field_elements(&[]).is_err());
    }

    #[test]
    fn test_inverse_recovers_buffer() {
        let bytes = sample();
        let elements = bytes_to_field_elements(&bytes).unwrap();
        assert_eq!(field_elements_to_bytes(&elements).unwrap(), bytes);
    }

    #[test]
    fn test_inverse_rejects_oversized_elements() {
        let mut elements = bytes_to_field_elements(&sample()).unwrap();
        elements[3] = Felt::new(1 << 32);
        assert!(field_elements_to_bytes(&elements).is_err());

        let mut elements = bytes_to_field_elements(&sample()).unwrap();
        elements[8] = Felt::new(256);
        assert!(field_elements_to_bytes(&elements).is_err());
    }

    #[test]
    fn test_bytes_to_words() {
        let words = bytes_to_words(&[1, 0, 0, 0, 0, 0, 0, 1]).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].as_int(), 1);
        assert_eq!(words[1].as_int(), 1 << 24);

        assert!(bytes_to_words(&[1, 2, 3]).is_err());
    }
}
