//! Chain parameter messages, and the authorization structures shared with
//! key updates.

use serde::{Deserialize, Serialize};

use super::common::{AmountFraction, CommissionRanges, ExchangeRate, MintRate};
use super::Bytes;

/// Keys and threshold authorizing one kind of update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessStructure {
    /// Indices into the key list.
    pub access_public_keys: Vec<u32>,
    /// Threshold.
    pub access_threshold: Option<u32>,
}

/// Level 2 keys up to protocol 3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AuthorizationsV0 {
    pub keys: Vec<Bytes>,
    pub emergency: Option<AccessStructure>,
    pub protocol: Option<AccessStructure>,
    pub parameter_consensus: Option<AccessStructure>,
    pub parameter_euro_per_energy: Option<AccessStructure>,
    #[serde(rename = "parameterMicroCCDPerEuro")]
    pub parameter_micro_ccd_per_euro: Option<AccessStructure>,
    pub parameter_foundation_account: Option<AccessStructure>,
    pub parameter_mint_distribution: Option<AccessStructure>,
    pub parameter_transaction_fee_distribution: Option<AccessStructure>,
    pub parameter_gas_rewards: Option<AccessStructure>,
    pub pool_parameters: Option<AccessStructure>,
    pub add_anonymity_revoker: Option<AccessStructure>,
    pub add_identity_provider: Option<AccessStructure>,
}

/// Level 2 keys from protocol 4.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthorizationsV1 {
    /// Keys shared with the earlier layout.
    pub v0: Option<AuthorizationsV0>,
    /// Cooldown parameter updates.
    pub parameter_cooldown: Option<AccessStructure>,
    /// Time parameter updates.
    pub parameter_time: Option<AccessStructure>,
}

/// Root or level 1 keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HigherLevelKeys {
    /// Keys.
    pub keys: Vec<Bytes>,
    /// Threshold.
    pub threshold: Option<u32>,
}

/// Transaction fee split.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionFeeDistribution {
    /// Baker share.
    pub baker: Option<AmountFraction>,
    /// GAS account share.
    pub gas_account: Option<AmountFraction>,
}

/// GAS rewards up to protocol 5.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct GasRewards {
    pub baker: Option<AmountFraction>,
    pub finalization_proof: Option<AmountFraction>,
    pub account_creation: Option<AmountFraction>,
    pub chain_update: Option<AmountFraction>,
}

/// GAS rewards from protocol 6.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct GasRewardsCpv2 {
    pub baker: Option<AmountFraction>,
    pub account_creation: Option<AmountFraction>,
    pub chain_update: Option<AmountFraction>,
}

/// Mint distribution up to protocol 3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct MintDistributionCpv0 {
    pub mint_per_slot: Option<MintRate>,
    pub baking_reward: Option<AmountFraction>,
    pub finalization_reward: Option<AmountFraction>,
}

/// Mint distribution from protocol 4.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct MintDistributionCpv1 {
    pub baking_reward: Option<AmountFraction>,
    pub finalization_reward: Option<AmountFraction>,
}

/// Cooldowns in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CooldownParametersCpv1 {
    /// Pool owner cooldown.
    pub pool_owner_cooldown: Option<u64>,
    /// Delegator cooldown.
    pub delegator_cooldown: Option<u64>,
}

/// Pay day parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeParametersCpv1 {
    /// Reward period length in epochs.
    pub reward_period_length: Option<u64>,
    /// Mint rate per pay day.
    pub mint_per_payday: Option<MintRate>,
}

/// Pool parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PoolParametersCpv1 {
    pub passive_finalization_commission: Option<AmountFraction>,
    pub passive_baking_commission: Option<AmountFraction>,
    pub passive_transaction_commission: Option<AmountFraction>,
    pub commission_bounds: Option<CommissionRanges>,
    pub minimum_equity_capital: Option<u64>,
    pub capital_bound: Option<AmountFraction>,
    pub leverage_bound: Option<ExchangeRate>,
}

/// Round timeout parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeoutParameters {
    /// Base timeout (ms).
    pub timeout_base: Option<u64>,
    /// Growth factor.
    pub timeout_increase: Option<ExchangeRate>,
    /// Shrink factor.
    pub timeout_decrease: Option<ExchangeRate>,
}

/// Consensus parameters from protocol 6.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsensusParametersV1 {
    /// Timeouts.
    pub timeout_parameters: Option<TimeoutParameters>,
    /// Minimum block time (ms).
    pub min_block_time: Option<u64>,
    /// Block energy limit.
    pub block_energy_limit: Option<u64>,
}

/// Finalization committee parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct FinalizationCommitteeParameters {
    pub minimum_finalizers: u32,
    pub maximum_finalizers: u32,
    pub finalizer_relative_stake_threshold: Option<AmountFraction>,
}

/// Validator score parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorScoreParameters {
    /// Missed rounds before suspension.
    pub maximum_missed_rounds: u64,
}

/// Parameters up to protocol 3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ChainParametersV0 {
    pub election_difficulty: Option<AmountFraction>,
    pub euro_per_energy: Option<ExchangeRate>,
    pub micro_ccd_per_euro: Option<ExchangeRate>,
    pub baker_cooldown_epochs: Option<u64>,
    pub account_creation_limit: Option<u32>,
    pub mint_distribution: Option<MintDistributionCpv0>,
    pub transaction_fee_distribution: Option<TransactionFeeDistribution>,
    pub gas_rewards: Option<GasRewards>,
    pub foundation_account: Option<Bytes>,
    pub minimum_threshold_for_baking: Option<u64>,
    pub root_keys: Option<HigherLevelKeys>,
    pub level1_keys: Option<HigherLevelKeys>,
    pub level2_keys: Option<AuthorizationsV0>,
}

/// Parameters for protocols 4 and 5.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ChainParametersV1 {
    pub election_difficulty: Option<AmountFraction>,
    pub euro_per_energy: Option<ExchangeRate>,
    pub micro_ccd_per_euro: Option<ExchangeRate>,
    pub cooldown_parameters: Option<CooldownParametersCpv1>,
    pub time_parameters: Option<TimeParametersCpv1>,
    pub account_creation_limit: Option<u32>,
    pub mint_distribution: Option<MintDistributionCpv1>,
    pub transaction_fee_distribution: Option<TransactionFeeDistribution>,
    pub gas_rewards: Option<GasRewards>,
    pub foundation_account: Option<Bytes>,
    pub pool_parameters: Option<PoolParametersCpv1>,
    pub root_keys: Option<HigherLevelKeys>,
    pub level1_keys: Option<HigherLevelKeys>,
    pub level2_keys: Option<AuthorizationsV1>,
}

/// Parameters from protocol 6. Protocol 8 adds validator scoring on top.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ChainParametersV2 {
    pub consensus_parameters: Option<ConsensusParametersV1>,
    pub euro_per_energy: Option<ExchangeRate>,
    pub micro_ccd_per_euro: Option<ExchangeRate>,
    pub cooldown_parameters: Option<CooldownParametersCpv1>,
    pub time_parameters: Option<TimeParametersCpv1>,
    pub account_creation_limit: Option<u32>,
    pub mint_distribution: Option<MintDistributionCpv1>,
    pub transaction_fee_distribution: Option<TransactionFeeDistribution>,
    pub gas_rewards: Option<GasRewardsCpv2>,
    pub foundation_account: Option<Bytes>,
    pub pool_parameters: Option<PoolParametersCpv1>,
    pub root_keys: Option<HigherLevelKeys>,
    pub level1_keys: Option<HigherLevelKeys>,
    pub level2_keys: Option<AuthorizationsV1>,
    pub finalization_committee_parameters: Option<FinalizationCommitteeParameters>,
    /// Present only in the V3 layout.
    pub validator_score_parameters: Option<ValidatorScoreParameters>,
}

/// Chain parameters by layout version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChainParameters {
    /// Layout 0.
    V0(ChainParametersV0),
    /// Layout 1.
    V1(ChainParametersV1),
    /// Layout 2.
    V2(ChainParametersV2),
    /// Layout 3, the V2 fields plus validator scoring.
    V3(ChainParametersV2),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}
