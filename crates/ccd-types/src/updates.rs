//! # Chain Updates
//!
//! Payloads of update instructions. Pending updates reuse the same type.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chain_parameters::{
    AuthorizationsV0, AuthorizationsV1, CooldownParameters, FinalizationCommitteeParameters,
    GasRewardsV0, GasRewardsV1, HigherLevelKeys, MintDistributionV0, MintDistributionV1,
    PoolParameters, TimeParameters, TimeoutParameters, TransactionFeeDistribution,
    ValidatorScoreParameters,
};
use crate::identifiers::{AccountAddress, HexBytes};
use crate::node::{ArInfo, IpInfo};
use crate::primitives::{duration_millis, CcdAmount, Energy, ExchangeRate, Timestamp};

/// Protocol update announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolUpdate {
    /// Human readable message.
    pub message: String,
    /// URL of the specification.
    pub specification_url: String,
    /// Hash of the specification.
    pub specification_hash: HexBytes,
    /// Auxiliary data.
    pub specification_auxiliary_data: HexBytes,
}

/// Update of root or level 1 keys, signed with root or level 1 keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyUpdate {
    /// Replace the root keys.
    RootKeys(HigherLevelKeys),
    /// Replace the level 1 keys.
    Level1Keys(HigherLevelKeys),
    /// Replace the level 2 keys (before protocol 4).
    Level2KeysV0(AuthorizationsV0),
    /// Replace the level 2 keys (from protocol 4).
    Level2KeysV1(AuthorizationsV1),
}

/// Payload of a chain update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UpdatePayload {
    /// Protocol update.
    Protocol(ProtocolUpdate),
    /// New election difficulty.
    ElectionDifficulty(f64),
    /// New euro per energy rate.
    EuroPerEnergy(ExchangeRate),
    /// New micro CCD per euro rate.
    MicroCcdPerEuro(ExchangeRate),
    /// New foundation account.
    FoundationAccount(AccountAddress),
    /// New mint distribution (before protocol 4).
    MintDistributionV0(MintDistributionV0),
    /// New mint distribution (from protocol 4).
    MintDistributionV1(MintDistributionV1),
    /// New transaction fee distribution.
    TransactionFeeDistribution(TransactionFeeDistribution),
    /// New GAS rewards (before protocol 6).
    GasRewardsV0(GasRewardsV0),
    /// New GAS rewards (from protocol 6).
    GasRewardsV1(GasRewardsV1),
    /// New minimum baker stake (before protocol 4).
    BakerStakeThreshold(CcdAmount),
    /// New pool parameters.
    PoolParameters(PoolParameters),
    /// New anonymity revoker.
    AddAnonymityRevoker(ArInfo),
    /// New identity provider.
    AddIdentityProvider(IpInfo),
    /// New cooldown parameters.
    CooldownParameters(CooldownParameters),
    /// New time parameters.
    TimeParameters(TimeParameters),
    /// New timeout parameters.
    TimeoutParameters(TimeoutParameters),
    /// New minimum block time.
    MinBlockTime(#[serde(with = "duration_millis")] Duration),
    /// New block energy limit.
    BlockEnergyLimit(Energy),
    /// New finalization committee parameters.
    FinalizationCommitteeParameters(FinalizationCommitteeParameters),
    /// New validator score parameters.
    ValidatorScoreParameters(ValidatorScoreParameters),
    /// Key update signed by the root keys.
    Root(KeyUpdate),
    /// Key update signed by the level 1 keys.
    Level1(KeyUpdate),
    /// Queued key update. The queue does not record the signing level.
    Keys(KeyUpdate),
}

/// Update queued for a future time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingUpdate {
    /// When the update takes effect.
    pub effective_time: Timestamp,
    /// The update.
    pub effect: UpdatePayload,
}
