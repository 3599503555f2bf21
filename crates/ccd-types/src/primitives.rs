//! # Primitive Value Objects
//!
//! Amounts, energy, rates and small enums shared by the entity modules.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point in time with millisecond precision.
pub type Timestamp = DateTime<Utc>;

/// Baker (validator) identifier. Equal to the baker's account index.
pub type BakerId = u64;

/// Delegator identifier. Equal to the delegator's account index.
pub type DelegatorId = u64;

/// Account index.
pub type AccountIndex = u64;

/// Sequence number of an account's transactions.
pub type Nonce = u64;

/// Index of a genesis block (increments on every protocol update).
pub type GenesisIndex = u32;

/// Epoch number.
pub type Epoch = u64;

/// Consensus round.
pub type Round = u64;

/// Amount of CCD in micro CCD. Exact integer arithmetic, never floating point.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CcdAmount(u64);

impl CcdAmount {
    /// Zero CCD.
    pub const ZERO: Self = Self(0);

    /// Amount from micro CCD.
    pub const fn from_micro_ccd(micro_ccd: u64) -> Self {
        Self(micro_ccd)
    }

    /// Amount in micro CCD.
    pub const fn micro_ccd(&self) -> u64 {
        self.0
    }

    /// Subtraction clamped at zero.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Addition clamped at `u64::MAX`.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Debug for CcdAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CcdAmount({})", self.0)
    }
}

impl fmt::Display for CcdAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:06} CCD", self.0 / 1_000_000, self.0 % 1_000_000)
    }
}

/// Amount of energy (execution cost unit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Energy(pub u64);

/// Exact ratio of two integers, used for exchange rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Numerator.
    pub numerator: u64,
    /// Denominator.
    pub denominator: u64,
}

/// Inclusive range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InclusiveRange<T> {
    /// Lower bound.
    pub min: T,
    /// Upper bound.
    pub max: T,
}

/// Commission rates charged by a pool, each a fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionRates {
    /// Fraction of transaction fees.
    pub transaction_commission: f64,
    /// Fraction of baking rewards.
    pub baking_commission: f64,
    /// Fraction of finalization rewards.
    pub finalization_commission: f64,
}

/// Allowed commission ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionRanges {
    /// Transaction fee commission range.
    pub transaction_commission: InclusiveRange<f64>,
    /// Baking reward commission range.
    pub baking_commission: InclusiveRange<f64>,
    /// Finalization reward commission range.
    pub finalization_commission: InclusiveRange<f64>,
}

/// Whether a baker pool accepts delegators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpenStatus {
    /// New delegators may join.
    OpenForAll,
    /// Existing delegators stay, no new ones.
    ClosedForNew,
    /// No delegators at all.
    ClosedForAll,
}

/// Protocol version of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(pub u32);

impl ProtocolVersion {
    /// First protocol version with the BFT consensus (rounds, epochs, no slots).
    pub const P6: Self = Self(6);

    /// Whether blocks of this version are produced by the BFT consensus.
    pub fn has_bft_consensus(self) -> bool {
        self >= Self::P6
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Duration serialized as whole milliseconds.
pub mod duration_millis {
    use super::*;
    use serde::{Deserializer, Serializer};

    /// Serialize as milliseconds.
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    /// Deserialize from milliseconds.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
