//! # Domain Errors
//!
//! | Error | Raised by | Retried here |
//! |-------|-----------|--------------|
//! | `TranslationError` | wire translation | never |
//! | `RpcError` | transport | never |
//! | `ValidationError` | typed inputs, before any call | never |
//! | `ClientError::Timeout` | bounded waits only | never |

use std::fmt;
use std::time::Duration;

use ccd_types::ValidationError;
use thiserror::Error;

/// What went wrong while translating a wire message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationErrorKind {
    /// A field required in this context was absent.
    MissingField,
    /// A tagged union carried a discriminant this library does not know.
    UnknownVariant,
    /// A numeric enum carried an unknown code.
    UnknownEnumValue(i32),
    /// The message did not decode, or carried invalid identifier bytes.
    Malformed(String),
}

impl fmt::Display for TranslationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => f.write_str("missing required field"),
            Self::UnknownVariant => f.write_str("unknown variant"),
            Self::UnknownEnumValue(code) => write!(f, "unknown enum value {code}"),
            Self::Malformed(reason) => write!(f, "malformed: {reason}"),
        }
    }
}

/// Wire message that could not be mapped to the domain model.
///
/// Always a protocol mismatch between node and library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Translation failed at {path}: {kind}")]
pub struct TranslationError {
    /// Dotted path of the offending field.
    pub path: String,
    /// Failure kind.
    pub kind: TranslationErrorKind,
}

impl TranslationError {
    /// Required field absent.
    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: TranslationErrorKind::MissingField,
        }
    }

    /// Unknown tagged union discriminant.
    pub fn unknown_variant(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: TranslationErrorKind::UnknownVariant,
        }
    }

    /// Unknown numeric enum code.
    pub fn unknown_enum_value(path: impl Into<String>, code: i32) -> Self {
        Self {
            path: path.into(),
            kind: TranslationErrorKind::UnknownEnumValue(code),
        }
    }

    /// Undecodable message or invalid bytes.
    pub fn malformed(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            kind: TranslationErrorKind::Malformed(reason.to_string()),
        }
    }
}

/// Standard RPC status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum RpcCode {
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    ResourceExhausted,
    FailedPrecondition,
    Aborted,
    OutOfRange,
    Unimplemented,
    Internal,
    Unavailable,
    DataLoss,
    Unauthenticated,
}

impl RpcCode {
    /// Canonical upper snake case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::Aborted => "ABORTED",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
            Self::DataLoss => "DATA_LOSS",
            Self::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for RpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport or status failure reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("RPC failed with {code}: {message}")]
pub struct RpcError {
    /// Status code.
    pub code: RpcCode,
    /// Status message.
    pub message: String,
}

impl RpcError {
    /// Create an RPC error.
    pub fn new(code: RpcCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Error returned by every client operation.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Wire message could not be translated.
    #[error(transparent)]
    Translation(#[from] TranslationError),

    /// Transport reported a failure.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Caller input rejected before any call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A bounded wait ran out of time. The subscription is released.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// A subscription ended before the awaited condition held.
    #[error("Stream ended unexpectedly")]
    UnexpectedEndOfStream,

    /// The caller cancelled a bounded wait.
    #[error("Operation cancelled")]
    Cancelled,

    /// The node reports no block at a height it already reported finalized.
    #[error("No finalized block at height {height}")]
    MissingFinalizedBlock {
        /// Height that was probed
        height: u64,
    },
}

impl ClientError {
    /// Whether this is an RPC error with the given code.
    pub fn is_rpc(&self, code: RpcCode) -> bool {
        matches!(self, Self::Rpc(err) if err.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_error_carries_path() {
        let err = TranslationError::missing("AccountInfo.address");
        assert!(err.to_string().contains("AccountInfo.address"));
        assert!(err.to_string().contains("missing"));

        let err = TranslationError::unknown_enum_value("BlockItemSummary.transactionType", 99);
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_rpc_error_display() {
        let err = RpcError::new(RpcCode::NotFound, "no such block");
        assert_eq!(err.to_string(), "RPC failed with NOT_FOUND: no such block");
    }

    #[test]
    fn test_client_error_conversions() {
        let err: ClientError = RpcError::new(RpcCode::NotFound, "x").into();
        assert!(err.is_rpc(RpcCode::NotFound));
        assert!(!err.is_rpc(RpcCode::Internal));

        let err: ClientError = ValidationError::InvalidPort(-3).into();
        assert!(err.to_string().contains("-3"));
    }

    #[test]
    fn test_timeout_display() {
        let err = ClientError::Timeout(Duration::from_millis(1500));
        assert!(err.to_string().contains("1.5s"));
    }
}
