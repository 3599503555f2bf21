//! # Wire Shapes
//!
//! Serde mirrors of the node's request and response messages as they cross
//! the transport boundary (JSON values, camelCase keys).
//!
//! Conventions:
//! - Message-typed fields are `Option<T>`: the node may omit them, and only
//!   translation decides whether absence is an error in context.
//! - Single-value wrapper messages (ids, amounts, energy, timestamps in
//!   milliseconds) are collapsed to their scalar.
//! - A oneof is an externally tagged enum. A message holding nothing but the
//!   oneof is the enum itself; otherwise the enum sits in a field named after
//!   the oneof. Every response enum ends with an `Unrecognized` catch-all so
//!   that decoding succeeds and translation can report the unknown variant
//!   with its path.
//! - Numeric protobuf enums stay `i32` until translation.
//! - A response that is itself a single-value wrapper arrives as [`Wrapped`].

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

pub mod account;
pub mod chain_parameters;
pub mod common;
pub mod consensus;
pub mod contracts;
pub mod node;
pub mod requests;
pub mod rewards;
pub mod summary;
pub mod updates;

/// Raw bytes, hex encoded on the wire.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bytes(#[serde_as(as = "Hex")] pub Vec<u8>);

impl Bytes {
    /// Underlying bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Response message carrying a single value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wrapped<T: Default> {
    /// The value.
    pub value: T,
}

/// Message without fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_are_hex_strings() {
        let json = serde_json::to_value(Bytes(vec![0xab, 0x01])).unwrap();
        assert_eq!(json, serde_json::json!("ab01"));
        let back: Bytes = serde_json::from_value(json).unwrap();
        assert_eq!(back.as_slice(), &[0xab, 0x01]);
    }

    #[test]
    fn test_wrapped_defaults_missing_value() {
        let wrapped: Wrapped<u64> = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(wrapped.value, 0);
        let wrapped: Wrapped<Bytes> =
            serde_json::from_value(serde_json::json!({ "value": "0a0b" })).unwrap();
        assert_eq!(wrapped.value.as_slice(), &[0x0a, 0x0b]);
    }

    #[test]
    fn test_empty_is_object() {
        assert_eq!(serde_json::to_value(Empty {}).unwrap(), serde_json::json!({}));
    }
}
