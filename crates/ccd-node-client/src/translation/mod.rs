//! # Wire Translation
//!
//! Pure, total functions from wire shapes to the `ccd-types` domain model.
//!
//! Every function either returns exactly one domain value or a
//! [`TranslationError`] naming the offending field. Absent-but-required
//! fields go through [`require`]; unknown oneof cases and enum codes are
//! errors, never defaults.
//!
//! ## Numeric normalisation
//!
//! | Wire | Domain |
//! |------|--------|
//! | `AmountFraction` (parts per hundred thousand) | `f64` in `[0, 1]` |
//! | `MintRate { mantissa, exponent }` | `mantissa * 10^-exponent` |
//! | `ExchangeRate` used as a factor | `numerator / denominator` |
//! | amounts | `CcdAmount` (exact `u64`) |
//! | protocol version code | `ProtocolVersion(code + 1)` |

use std::time::Duration;

use ccd_types::{
    AccountAddress, BlockHash, CcdAmount, CredentialRegistrationId, HexBytes, ModuleReference,
    ProtocolVersion, StateHash, Timestamp, TransactionHash, ValidationError,
};
use chrono::{TimeZone, Utc};
use serde::de::DeserializeOwned;

use crate::domain::{RpcMethod, TranslationError};
use crate::wire::common::{AmountFraction, MintRate, ProtocolVersionCode};
use crate::wire::Bytes;

pub mod account;
pub mod chain_parameters;
pub mod common;
pub mod consensus;
pub mod contracts;
pub mod node;
pub mod rewards;
pub mod summary;
pub mod updates;

/// Result of a translation.
pub type TranslationResult<T> = Result<T, TranslationError>;

/// Field path, rendered only when an error is raised.
pub trait FieldPath: Copy {
    /// Dotted path.
    fn render(self) -> String;
}

impl FieldPath for &str {
    fn render(self) -> String {
        self.to_string()
    }
}

impl FieldPath for (&str, &str) {
    fn render(self) -> String {
        format!("{}.{}", self.0, self.1)
    }
}

/// Unwrap a field the context requires.
pub fn require<T>(value: Option<T>, path: impl FieldPath) -> TranslationResult<T> {
    value.ok_or_else(|| TranslationError::missing(path.render()))
}

/// Decode a transport reply into its wire shape.
pub fn decode<T: DeserializeOwned>(method: RpcMethod, value: serde_json::Value) -> TranslationResult<T> {
    serde_json::from_value(value).map_err(|e| TranslationError::malformed(method.name(), e))
}

/// Identifier built from raw wire bytes.
pub trait WireIdentifier: Sized {
    /// Validate the bytes.
    fn from_wire(bytes: &[u8]) -> Result<Self, ValidationError>;
}

macro_rules! wire_identifier {
    ($($ty:ty),+) => {
        $(impl WireIdentifier for $ty {
            fn from_wire(bytes: &[u8]) -> Result<Self, ValidationError> {
                <$ty>::from_slice(bytes)
            }
        })+
    };
}

wire_identifier!(
    BlockHash,
    TransactionHash,
    ModuleReference,
    StateHash,
    AccountAddress,
    CredentialRegistrationId
);

/// Parse identifier bytes.
pub fn ident<T: WireIdentifier>(bytes: &Bytes, path: impl FieldPath) -> TranslationResult<T> {
    T::from_wire(bytes.as_slice()).map_err(|e| TranslationError::malformed(path.render(), e))
}

/// Parse a required identifier field.
pub fn required_ident<T: WireIdentifier>(
    bytes: Option<Bytes>,
    path: impl FieldPath,
) -> TranslationResult<T> {
    ident(&require(bytes, path)?, path)
}

/// Parse every identifier of a list.
pub fn idents<T: WireIdentifier>(list: Vec<Bytes>, path: impl FieldPath) -> TranslationResult<Vec<T>> {
    list.iter().map(|bytes| ident(bytes, path)).collect()
}

/// Opaque bytes.
pub fn hex(bytes: Bytes) -> HexBytes {
    HexBytes::new(bytes.0)
}

/// Required opaque bytes.
pub fn required_hex(bytes: Option<Bytes>, path: impl FieldPath) -> TranslationResult<HexBytes> {
    require(bytes, path).map(hex)
}

/// Required amount in micro CCD.
pub fn amount(value: Option<u64>, path: impl FieldPath) -> TranslationResult<CcdAmount> {
    require(value, path).map(CcdAmount::from_micro_ccd)
}

/// Milliseconds since the Unix epoch.
pub fn timestamp_from_millis(millis: i64, path: impl FieldPath) -> TranslationResult<Timestamp> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| TranslationError::malformed(path.render(), format!("timestamp {millis} out of range")))
}

/// Required timestamp.
pub fn timestamp(value: Option<i64>, path: impl FieldPath) -> TranslationResult<Timestamp> {
    timestamp_from_millis(require(value, path)?, path)
}

/// Optional timestamp.
pub fn optional_timestamp(value: Option<i64>, path: impl FieldPath) -> TranslationResult<Option<Timestamp>> {
    value.map(|millis| timestamp_from_millis(millis, path)).transpose()
}

/// Required duration in milliseconds.
pub fn duration(value: Option<u64>, path: impl FieldPath) -> TranslationResult<Duration> {
    require(value, path).map(Duration::from_millis)
}

/// Parts per hundred thousand as a fraction.
pub fn fraction_value(value: AmountFraction) -> f64 {
    f64::from(value.parts_per_hundred_thousand) / 100_000.0
}

/// Required fraction.
pub fn fraction(value: Option<AmountFraction>, path: impl FieldPath) -> TranslationResult<f64> {
    require(value, path).map(fraction_value)
}

/// `mantissa * 10^-exponent`.
pub fn mint_rate_value(rate: MintRate) -> f64 {
    f64::from(rate.mantissa) / 10f64.powf(f64::from(rate.exponent))
}

/// Required mint rate.
pub fn mint_rate(value: Option<MintRate>, path: impl FieldPath) -> TranslationResult<f64> {
    require(value, path).map(mint_rate_value)
}

/// Domain protocol version from its wire code.
pub fn protocol_version(code: ProtocolVersionCode, path: impl FieldPath) -> TranslationResult<ProtocolVersion> {
    u32::try_from(code)
        .ok()
        .and_then(|code| code.checked_add(1))
        .map(ProtocolVersion)
        .ok_or_else(|| TranslationError::unknown_enum_value(path.render(), code))
}

/// Translate every element of a list.
pub fn each<W, D>(
    list: Vec<W>,
    translate: impl Fn(W) -> TranslationResult<D>,
) -> TranslationResult<Vec<D>> {
    list.into_iter().map(translate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TranslationErrorKind;
    use proptest::prelude::*;

    #[test]
    fn test_require_reports_nested_path() {
        let err = require::<u32>(None, ("ChainParametersV1.level1Keys", "threshold")).unwrap_err();
        assert_eq!(err.path, "ChainParametersV1.level1Keys.threshold");
        assert_eq!(err.kind, TranslationErrorKind::MissingField);
        assert_eq!(require(Some(3), "x"), Ok(3));
    }

    #[test]
    fn test_ident_rejects_short_hash() {
        let err = ident::<BlockHash>(&Bytes(vec![1, 2, 3]), "BlockInfo.hash").unwrap_err();
        assert_eq!(err.path, "BlockInfo.hash");
        assert!(matches!(err.kind, TranslationErrorKind::Malformed(_)));
    }

    #[test]
    fn test_mint_rate() {
        let rate = MintRate {
            mantissa: 7555,
            exponent: 10,
        };
        assert!((mint_rate_value(rate) - 7.555e-7).abs() < 1e-18);
    }

    #[test]
    fn test_protocol_version_is_one_based() {
        assert_eq!(protocol_version(5, "v"), Ok(ProtocolVersion(6)));
        assert!(protocol_version(-1, "v").is_err());
    }

    #[test]
    fn test_timestamp_millis() {
        let ts = timestamp(Some(1_700_000_000_123), "t").unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_123);
        assert!(timestamp(None, "t").is_err());
    }

    #[test]
    fn test_decode_failure_names_method() {
        let err = decode::<Bytes>(RpcMethod::GetBlockInfo, serde_json::json!(17)).unwrap_err();
        assert_eq!(err.path, "GetBlockInfo");
    }

    proptest! {
        #[test]
        fn prop_fraction_is_normalised(ppht in 0u32..=100_000) {
            let value = fraction_value(AmountFraction { parts_per_hundred_thousand: ppht });
            prop_assert!((0.0..=1.0).contains(&value));
            prop_assert_eq!(value, fraction_value(AmountFraction { parts_per_hundred_thousand: ppht }));
            prop_assert!((value * 100_000.0 - f64::from(ppht)).abs() < 1e-6);
        }
    }
}
