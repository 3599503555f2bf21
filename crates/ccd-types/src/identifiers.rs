//! # Identifiers
//!
//! Opaque fixed-length identifiers with validated textual encodings.
//!
//! | Identifier | Bytes | Text |
//! |------------|-------|------|
//! | `BlockHash`, `TransactionHash`, `ModuleReference`, `StateHash` | 32 | hex |
//! | `CredentialRegistrationId` | 48 | hex |
//! | `AccountAddress` | 32 | Base58Check, version byte 1 |
//!
//! Equality and ordering are defined on the underlying bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ValidationError;

/// Length of every hash-like identifier.
pub const HASH_LEN: usize = 32;

/// Length of a credential registration id.
pub const CRED_ID_LEN: usize = 48;

/// Version byte prefixed to account addresses before Base58Check encoding.
pub const ACCOUNT_ADDRESS_VERSION: u8 = 1;

fn decode_hex(input: &str) -> Result<Vec<u8>, ValidationError> {
    hex::decode(input).map_err(|e| ValidationError::InvalidHex(format!("{input}: {e}")))
}

fn fixed<const N: usize>(kind: &'static str, bytes: &[u8]) -> Result<[u8; N], ValidationError> {
    bytes.try_into().map_err(|_| ValidationError::InvalidLength {
        kind,
        expected: N,
        actual: bytes.len(),
    })
}

macro_rules! hash_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; HASH_LEN]);

        impl $name {
            /// Wrap raw bytes.
            pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
                Self(bytes)
            }

            /// Build from a byte slice, failing unless it is exactly 32 bytes.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
                fixed::<HASH_LEN>($kind, bytes).map(Self)
            }

            /// Parse a 64 character hex string.
            pub fn from_hex(input: &str) -> Result<Self, ValidationError> {
                Self::from_slice(&decode_hex(input)?)
            }

            /// Underlying bytes.
            pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
                &self.0
            }

            /// Lowercase hex encoding.
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

hash_identifier!(
    /// Hash of a block.
    BlockHash,
    "block hash"
);
hash_identifier!(
    /// Hash of a block item (transaction, credential deployment or update).
    TransactionHash,
    "transaction hash"
);
hash_identifier!(
    /// Reference to a deployed smart contract module.
    ModuleReference,
    "module reference"
);
hash_identifier!(
    /// Hash of a block's state.
    StateHash,
    "state hash"
);

/// Account address: 32 bytes rendered as Base58Check with version byte 1.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountAddress([u8; HASH_LEN]);

impl AccountAddress {
    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from a byte slice, failing unless it is exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        fixed::<HASH_LEN>("account address", bytes).map(Self)
    }

    /// Parse a Base58Check string, verifying checksum and version byte.
    pub fn from_base58(input: &str) -> Result<Self, ValidationError> {
        let decoded = bs58::decode(input)
            .with_check(None)
            .into_vec()
            .map_err(|e| ValidationError::InvalidBase58(format!("{input}: {e}")))?;
        let (version, payload) = decoded
            .split_first()
            .ok_or_else(|| ValidationError::InvalidBase58(format!("{input}: empty payload")))?;
        if *version != ACCOUNT_ADDRESS_VERSION {
            return Err(ValidationError::InvalidVersionByte {
                expected: ACCOUNT_ADDRESS_VERSION,
                actual: *version,
            });
        }
        Self::from_slice(payload)
    }

    /// Base58Check encoding. A pure function of the bytes.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0)
            .with_check_version(ACCOUNT_ADDRESS_VERSION)
            .into_string()
    }

    /// Underlying bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_base58())
    }
}

impl FromStr for AccountAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_base58(&s).map_err(serde::de::Error::custom)
    }
}

/// Smart contract instance address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContractAddress {
    /// Instance index.
    pub index: u64,
    /// Instance subindex.
    pub subindex: u64,
}

impl ContractAddress {
    /// Create a contract address.
    pub const fn new(index: u64, subindex: u64) -> Self {
        Self { index, subindex }
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.index, self.subindex)
    }
}

/// Either an account or a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "address")]
pub enum Address {
    /// Account address.
    Account(AccountAddress),
    /// Contract instance address.
    Contract(ContractAddress),
}

/// Credential registration id (48 bytes).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CredentialRegistrationId([u8; CRED_ID_LEN]);

impl CredentialRegistrationId {
    /// Build from a byte slice, failing unless it is exactly 48 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
        fixed::<CRED_ID_LEN>("credential registration id", bytes).map(Self)
    }

    /// Parse a 96 character hex string.
    pub fn from_hex(input: &str) -> Result<Self, ValidationError> {
        Self::from_slice(&decode_hex(input)?)
    }

    /// Underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for CredentialRegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for CredentialRegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CredentialRegistrationId({})", self.to_hex())
    }
}

impl Serialize for CredentialRegistrationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CredentialRegistrationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Variable-length opaque bytes (keys, parameters, events, memos), shown as hex.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexBytes(Vec<u8>);

impl HexBytes {
    /// Wrap raw bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parse a hex string of any even length.
    pub fn from_hex(input: &str) -> Result<Self, ValidationError> {
        decode_hex(input).map(Self)
    }

    /// Underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the raw bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexBytes({})", self.to_hex())
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_block_hash_rejects_wrong_length() {
        let err = BlockHash::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidLength {
                kind: "block hash",
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn test_block_hash_rejects_bad_hex() {
        let err = BlockHash::from_hex(&"zz".repeat(32)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidHex(_)));
    }

    #[test]
    fn test_hash_ordering_follows_bytes() {
        let low = TransactionHash::new([0u8; 32]);
        let mut high_bytes = [0u8; 32];
        high_bytes[0] = 1;
        let high = TransactionHash::new(high_bytes);
        assert!(low < high);
        assert_eq!(low, TransactionHash::from_hex(&low.to_hex()).unwrap());
    }

    #[test]
    fn test_account_address_checksum_mismatch() {
        let encoded = AccountAddress::new([7u8; 32]).to_base58();
        // Swap the final character for a different base58 digit.
        let mut corrupted = encoded.clone();
        let last = corrupted.pop().unwrap();
        corrupted.push(if last == '2' { '3' } else { '2' });

        let err = AccountAddress::from_base58(&corrupted).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidBase58(_)));
    }

    #[test]
    fn test_account_address_wrong_version() {
        let encoded = bs58::encode([9u8; 32]).with_check_version(2).into_string();
        let err = AccountAddress::from_base58(&encoded).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidVersionByte {
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_account_address_wrong_payload_length() {
        let encoded = bs58::encode([9u8; 20]).with_check_version(1).into_string();
        let err = AccountAddress::from_base58(&encoded).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidLength { actual: 20, .. }));
    }

    #[test]
    fn test_account_address_serde_uses_base58() {
        let address = AccountAddress::new([3u8; 32]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address.to_base58()));
        let back: AccountAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }

    #[test]
    fn test_credential_id_length() {
        assert!(CredentialRegistrationId::from_slice(&[1u8; 48]).is_ok());
        assert!(CredentialRegistrationId::from_slice(&[1u8; 32]).is_err());
    }

    #[test]
    fn test_contract_address_display() {
        assert_eq!(ContractAddress::new(5, 0).to_string(), "<5,0>");
    }

    proptest! {
        #[test]
        fn prop_account_address_encoding_is_deterministic(bytes in any::<[u8; 32]>()) {
            let address = AccountAddress::new(bytes);
            let first = address.to_base58();
            prop_assert_eq!(&first, &AccountAddress::new(bytes).to_base58());
            prop_assert_eq!(AccountAddress::from_base58(&first).unwrap(), address);
        }
    }
}
