//! # Error Types
//!
//! Validation failures raised by typed constructors before any node call is made.

use thiserror::Error;

/// Malformed caller input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input is not valid hexadecimal.
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    /// Byte length does not match the identifier's fixed size.
    #[error("Invalid length for {kind}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Identifier being constructed
        kind: &'static str,
        /// Required byte length
        expected: usize,
        /// Supplied byte length
        actual: usize,
    },

    /// Input is not a valid checksummed Base58 string.
    #[error("Invalid base58 address: {0}")]
    InvalidBase58(String),

    /// Base58 payload carries the wrong version byte.
    #[error("Invalid address version byte: expected {expected}, got {actual}")]
    InvalidVersionByte {
        /// Required version byte
        expected: u8,
        /// Decoded version byte
        actual: u8,
    },

    /// Input is not a valid IPv4 or IPv6 address.
    #[error("Invalid IP address: {0}")]
    InvalidIp(String),

    /// Port outside 0..=65535.
    #[error("Invalid port: {0}")]
    InvalidPort(i64),

    /// Transaction expiry already passed when submitting.
    #[error("Transaction expiry {expiry} is in the past")]
    ExpiryInPast {
        /// Expiry in seconds since the Unix epoch
        expiry: i64,
    },

    /// Height range where the lower bound exceeds the upper bound.
    #[error("Invalid range: from {from} is greater than to {to}")]
    InvalidRange {
        /// Lower bound
        from: u64,
        /// Upper bound
        to: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = ValidationError::InvalidLength {
            kind: "block hash",
            expected: 32,
            actual: 31,
        };
        assert!(err.to_string().contains("block hash"));
        assert!(err.to_string().contains("31"));

        let err = ValidationError::InvalidPort(70000);
        assert_eq!(err.to_string(), "Invalid port: 70000");
    }
}
