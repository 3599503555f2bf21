//! Shapes reused across messages.

use serde::{Deserialize, Serialize};

use super::{Bytes, Empty};

/// Fixed-point fraction over 100 000.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AmountFraction {
    /// Numerator.
    pub parts_per_hundred_thousand: u32,
}

/// Rate encoded as `mantissa * 10^-exponent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MintRate {
    /// Mantissa.
    pub mantissa: u32,
    /// Negative power of ten.
    pub exponent: u32,
}

/// Ratio of two integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeRate {
    /// Numerator.
    pub numerator: u64,
    /// Denominator.
    pub denominator: u64,
}

/// Contract instance address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractAddress {
    /// Index.
    pub index: u64,
    /// Subindex.
    pub subindex: u64,
}

/// Account or contract address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Address {
    /// Account address bytes.
    Account(Bytes),
    /// Contract address.
    Contract(ContractAddress),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Commission rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommissionRates {
    /// Finalization reward commission.
    pub finalization: Option<AmountFraction>,
    /// Baking reward commission.
    pub baking: Option<AmountFraction>,
    /// Transaction fee commission.
    pub transaction: Option<AmountFraction>,
}

/// Inclusive fraction range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclusiveRangeAmountFraction {
    /// Lower bound.
    pub min: Option<AmountFraction>,
    /// Upper bound.
    pub max: Option<AmountFraction>,
}

/// Commission bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommissionRanges {
    /// Finalization reward commission range.
    pub finalization: Option<InclusiveRangeAmountFraction>,
    /// Baking reward commission range.
    pub baking: Option<InclusiveRangeAmountFraction>,
    /// Transaction fee commission range.
    pub transaction: Option<InclusiveRangeAmountFraction>,
}

/// Delegation target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DelegationTarget {
    /// Passive delegation.
    Passive(Empty),
    /// Baker id.
    Baker(u64),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Reduction of a stake.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StakeReduce {
    /// Stake after the change.
    pub new_stake: Option<u64>,
    /// Effective time in milliseconds.
    pub effective_time: Option<i64>,
}

/// Pending stake change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StakePendingChange {
    /// Stake reduction.
    Reduce(StakeReduce),
    /// Stake removal, effective at the given millisecond timestamp.
    Remove(i64),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Open status codes.
pub mod open_status {
    /// Open for all.
    pub const OPEN_FOR_ALL: i32 = 0;
    /// Closed for new delegators.
    pub const CLOSED_FOR_NEW: i32 = 1;
    /// Closed for all.
    pub const CLOSED_FOR_ALL: i32 = 2;
}

/// Baker pool configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BakerPoolInfo {
    /// Open status code.
    pub open_status: i32,
    /// Metadata URL.
    pub url: String,
    /// Commission rates.
    pub commission_rates: Option<CommissionRates>,
}

/// Protocol versions are 0-indexed on the wire: code 0 is protocol 1.
pub type ProtocolVersionCode = i32;
