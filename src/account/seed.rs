//! Account seed buffer

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const ACCOUNT_SEED_LEN: usize = 32;

/// 32 bytes of account-level entropy, wiped on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccountSeed([u8; ACCOUNT_SEED_LEN]);

impl AccountSeed {
    pub fn new(bytes: [u8; ACCOUNT_SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// All-zero seed used when the caller supplies none
    pub fn default_zero() -> Self {
        Self([0u8; ACCOUNT_SEED_LEN])
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_SEED_LEN] {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Debug for AccountSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default() {
            f.write_str("AccountSeed(default)")
        } else {
            f.write_str("AccountSeed([REDACTED])")
        }
    }
}

/// Turn a human seed string into a seed buffer.
///
/// UTF-8 bytes are copied left-aligned, zero-padded and truncated to 32
/// bytes. `None` and the empty string both mean "no seed".
pub fn account_seed_from_str(seed: Option<&str>) -> Option<AccountSeed> {
    let seed = seed.filter(|s| !s.is_empty())?;

    let mut bytes = [0u8; ACCOUNT_SEED_LEN];
    let src = seed.as_bytes();
    let len = src.len().min(ACCOUNT_SEED_LEN);
    bytes[..len].copy_from_slice(&src[..len]);

    Some(AccountSeed(bytes))
}
