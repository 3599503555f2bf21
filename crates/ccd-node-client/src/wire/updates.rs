//! Update instruction payloads and pending updates.

use serde::{Deserialize, Serialize};

use super::chain_parameters::{
    AuthorizationsV0, AuthorizationsV1, CooldownParametersCpv1, FinalizationCommitteeParameters,
    GasRewards, GasRewardsCpv2, HigherLevelKeys, MintDistributionCpv0, MintDistributionCpv1,
    PoolParametersCpv1, TimeParametersCpv1, TimeoutParameters, TransactionFeeDistribution,
    ValidatorScoreParameters,
};
use super::common::{AmountFraction, ExchangeRate};
use super::node::{ArInfo, IpInfo};
use super::Bytes;

/// Protocol update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ProtocolUpdate {
    pub message: String,
    pub specification_url: String,
    pub specification_hash: Option<Bytes>,
    pub specification_auxiliary_data: Bytes,
}

/// Minimum stake for bakers, before protocol 4.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BakerStakeThreshold {
    /// Threshold.
    pub baker_stake_threshold: Option<u64>,
}

/// Key set replaced by a root or level 1 update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum KeyUpdate {
    RootKeysUpdate(HigherLevelKeys),
    Level1KeysUpdate(HigherLevelKeys),
    Level2KeysUpdateV0(AuthorizationsV0),
    Level2KeysUpdateV1(AuthorizationsV1),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Payload of an update instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum UpdatePayload {
    ProtocolUpdate(ProtocolUpdate),
    ElectionDifficultyUpdate(AmountFraction),
    EuroPerEnergyUpdate(ExchangeRate),
    MicroCcdPerEuroUpdate(ExchangeRate),
    FoundationAccountUpdate(Bytes),
    MintDistributionUpdate(MintDistributionCpv0),
    TransactionFeeDistributionUpdate(TransactionFeeDistribution),
    GasRewardsUpdate(GasRewards),
    BakerStakeThresholdUpdate(BakerStakeThreshold),
    RootUpdate(KeyUpdate),
    Level1Update(KeyUpdate),
    AddAnonymityRevokerUpdate(ArInfo),
    AddIdentityProviderUpdate(IpInfo),
    CooldownParametersCpv1Update(CooldownParametersCpv1),
    PoolParametersCpv1Update(PoolParametersCpv1),
    TimeParametersCpv1Update(TimeParametersCpv1),
    MintDistributionCpv1Update(MintDistributionCpv1),
    GasRewardsCpv2Update(GasRewardsCpv2),
    TimeoutParametersUpdate(TimeoutParameters),
    MinBlockTimeUpdate(u64),
    BlockEnergyLimitUpdate(u64),
    FinalizationCommitteeParametersUpdate(FinalizationCommitteeParameters),
    ValidatorScoreParametersUpdate(ValidatorScoreParameters),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Effect of a queued update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum PendingUpdateEffect {
    RootKeys(HigherLevelKeys),
    Level1Keys(HigherLevelKeys),
    Level2KeysCpv0(AuthorizationsV0),
    Level2KeysCpv1(AuthorizationsV1),
    Protocol(ProtocolUpdate),
    ElectionDifficulty(AmountFraction),
    EuroPerEnergy(ExchangeRate),
    MicroCcdPerEuro(ExchangeRate),
    FoundationAccount(Bytes),
    MintDistributionCpv0(MintDistributionCpv0),
    MintDistributionCpv1(MintDistributionCpv1),
    TransactionFeeDistribution(TransactionFeeDistribution),
    GasRewards(GasRewards),
    PoolParametersCpv0(BakerStakeThreshold),
    PoolParametersCpv1(PoolParametersCpv1),
    AddAnonymityRevoker(ArInfo),
    AddIdentityProvider(IpInfo),
    CooldownParameters(CooldownParametersCpv1),
    TimeParameters(TimeParametersCpv1),
    GasRewardsCpv2(GasRewardsCpv2),
    TimeoutParameters(TimeoutParameters),
    MinBlockTime(u64),
    BlockEnergyLimit(u64),
    FinalizationCommitteeParameters(FinalizationCommitteeParameters),
    ValidatorScoreParameters(ValidatorScoreParameters),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Update waiting for its effective time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PendingUpdate {
    pub effective_time: Option<i64>,
    pub effect: Option<PendingUpdateEffect>,
}
