//! Key encoding and commitment derivation
//!
//! - [`felt`]: byte buffers <-> Goldilocks field elements
//! - [`commitment`]: uncompressed EVM key -> RPO-256 commitment

pub mod commitment;
pub mod felt;

pub use commitment::{
    compressed_public_key, compression_tag, derive_commitment, Commitment, UncompressedPublicKey,
};
pub use felt::{bytes_to_field_elements, bytes_to_words, field_elements_to_bytes};
