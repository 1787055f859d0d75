//! Account descriptor and id derivation

use super::seed::AccountSeed;
use super::AccountConfig;
use crate::crypto::{bytes_to_words, Commitment};
use crate::error::{BridgeError, BridgeResult};
use crate::types::{AccountStorageMode, AccountType, AuthScheme};
use crate::utils::crypto::strip_hex_prefix;
use miden_crypto::hash::rpo::Rpo256;
use miden_crypto::Felt;
use std::fmt;
use std::str::FromStr;

const ID_VERSION: u8 = 0;
const SUFFIX_MASK: u64 = 0x7fff_ffff_ffff_ff00;
const ID_HEX_LEN: usize = 30;

/// Ledger account identifier.
///
/// The low byte of `prefix` carries the storage mode (bits 6-7), the
/// account type (bits 4-5) and the id version (bits 0-3). `suffix` keeps
/// its top bit and low byte clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId {
    prefix: u64,
    suffix: u64,
}

impl AccountId {
    /// Derive the id for a seed, auth commitment and account settings
    pub fn derive(
        seed: &AccountSeed,
        commitment: &Commitment,
        account_type: AccountType,
        storage_mode: AccountStorageMode,
        scheme: AuthScheme,
    ) -> BridgeResult<Self> {
        let mut elements = bytes_to_words(seed.as_bytes())?;
        elements.extend_from_slice(commitment.elements());
        elements.extend([
            Felt::new(account_type.code() as u64),
            Felt::new(storage_mode.code() as u64),
            Felt::new(scheme.id() as u64),
        ]);

        let digest = Rpo256::hash_elements(&elements);
        let words = digest.as_elements();

        let metadata = (storage_mode.code() << 6) | (account_type.code() << 4) | ID_VERSION;
        let prefix = (words[0].as_int() & !0xff) | metadata as u64;
        let suffix = words[1].as_int() & SUFFIX_MASK;

        Ok(Self { prefix, suffix })
    }

    pub fn prefix(&self) -> u64 {
        self.prefix
    }

    pub fn suffix(&self) -> u64 {
        self.suffix
    }

    pub fn type_code(&self) -> u8 {
        ((self.prefix >> 4) & 0b11) as u8
    }

    pub fn storage_code(&self) -> u8 {
        ((self.prefix >> 6) & 0b11) as u8
    }

    pub fn account_type(&self) -> AccountType {
        match self.type_code() {
            0b00 => AccountType::RegularAccountImmutableCode,
            0b01 => AccountType::RegularAccountUpdatableCode,
            0b10 => AccountType::FungibleFaucet,
            _ => AccountType::NonFungibleFaucet,
        }
    }

    /// Storage mode encoded in the id, `None` for the reserved code
    pub fn storage_mode(&self) -> Option<AccountStorageMode> {
        match self.storage_code() {
            0b00 => Some(AccountStorageMode::Public),
            0b01 => Some(AccountStorageMode::Network),
            0b10 => Some(AccountStorageMode::Private),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("0x{:016x}{:014x}", self.prefix, self.suffix >> 8)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for AccountId {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = strip_hex_prefix(s.trim());
        if body.len() != ID_HEX_LEN {
            return Err(BridgeError::encoding(format!(
                "account id must be {} hex chars, got {}",
                ID_HEX_LEN,
                body.len()
            )));
        }

        let parse = |part: &str| {
            u64::from_str_radix(part, 16)
                .map_err(|e| BridgeError::encoding(format!("account id is not valid hex: {}", e)))
        };
        let prefix = parse(&body[..16])?;
        let suffix = parse(&body[16..])? << 8;

        if suffix & !SUFFIX_MASK != 0 {
            return Err(BridgeError::encoding("account id suffix has its top bit set"));
        }

        let id = Self { prefix, suffix };
        if id.storage_mode().is_none() {
            return Err(BridgeError::encoding("account id has an unknown storage mode"));
        }
        Ok(id)
    }
}

/// Component installed on a bridged account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountComponent {
    /// Auth component that verifies signatures against a key commitment
    AuthFromCommitment {
        commitment: Commitment,
        scheme: AuthScheme,
    },
    BasicWallet,
}

/// Everything the ledger needs to create the bridged account
#[derive(Debug, Clone)]
pub struct AccountDescriptor {
    id: AccountId,
    seed: AccountSeed,
    commitment: Commitment,
    account_type: AccountType,
    storage_mode: AccountStorageMode,
    components: Vec<AccountComponent>,
}

impl AccountDescriptor {
    /// Build the descriptor for a commitment. The config must already be
    /// validated; a missing seed falls back to the all-zero seed.
    pub fn build(commitment: Commitment, config: &AccountConfig) -> BridgeResult<Self> {
        let scheme = AuthScheme::EcdsaK256Keccak;
        let seed = config.effective_seed();
        let id = AccountId::derive(
            &seed,
            &commitment,
            config.account_type,
            config.storage_mode,
            scheme,
        )?;

        Ok(Self {
            id,
            seed,
            commitment,
            account_type: config.account_type,
            storage_mode: config.storage_mode,
            components: vec![
                AccountComponent::AuthFromCommitment { commitment, scheme },
                AccountComponent::BasicWallet,
            ],
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn seed(&self) -> &AccountSeed {
        &self.seed
    }

    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn storage_mode(&self) -> AccountStorageMode {
        self.storage_mode
    }

    pub fn components(&self) -> &[AccountComponent] {
        &self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::derive_commitment;
    use crate::test_utils::test_public_key;

    fn commitment() -> Commitment {
        derive_commitment(&test_public_key(1)).unwrap()
    }

    fn config(storage_mode: AccountStorageMode, seed: Option<&str>) -> AccountConfig {
        AccountConfig {
            account_type: AccountType::RegularAccountUpdatableCode,
            storage_mode,
            account_seed: seed.map(String::from),
        }
    }

    #[test]
    fn test_id_is_deterministic() {
        let cfg = config(AccountStorageMode::Public, Some("seed"));
        let a = AccountDescriptor::build(commitment(), &cfg).unwrap();
        let b = AccountDescriptor::build(commitment(), &cfg).unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_id_carries_type_and_storage_bits() {
        let cfg = config(AccountStorageMode::Private, Some("seed"));
        let id = AccountDescriptor::build(commitment(), &cfg).unwrap().id();

        assert_eq!(id.account_type(), AccountType::RegularAccountUpdatableCode);
        assert_eq!(id.storage_mode(), Some(AccountStorageMode::Private));
        assert_eq!(id.prefix() & 0x0f, 0);
        assert_eq!(id.suffix() & 0xff, 0);
        assert_eq!(id.suffix() >> 63, 0);
    }

    #[test]
    fn test_different_seeds_give_different_ids() {
        let a = AccountDescriptor::build(commitment(), &config(AccountStorageMode::Public, Some("one")))
            .unwrap();
        let b = AccountDescriptor::build(commitment(), &config(AccountStorageMode::Public, Some("two")))
            .unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_display_round_trips() {
        let id = AccountDescriptor::build(commitment(), &config(AccountStorageMode::Network, None))
            .unwrap()
            .id();
        let shown = id.to_string();
        assert_eq!(shown.len(), 32);
        assert!(shown.starts_with("0x"));
        assert_eq!(shown.parse::<AccountId>().unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("0x1234".parse::<AccountId>().is_err());
        assert!(format!("0x{}", "zz".repeat(15)).parse::<AccountId>().is_err());
        // storage code 3 is reserved
        assert!(format!("0x{:016x}{:014x}", 0xc0u64, 0u64).parse::<AccountId>().is_err());
        // suffix top bit set
        assert!(format!("0x{:016x}{:014x}", 0u64, 0x80_0000_0000_0000u64).parse::<AccountId>().is_err());
    }

    #[test]
    fn test_components() {
        let c = commitment();
        let descriptor = AccountDescriptor::build(c, &config(AccountStorageMode::Public, None)).unwrap();
        assert_eq!(
            descriptor.components(),
            &[
                AccountComponent::AuthFromCommitment {
                    commitment: c,
                    scheme: AuthScheme::EcdsaK256Keccak
                },
                AccountComponent::BasicWallet,
            ]
        );
        assert!(descriptor.seed().is_default());
    }
}
