//! # Chain Parameters
//!
//! Four versions with growing field coverage. Each version is its own record
//! so a value carries exactly the fields its version defines.
//!
//! | Version | Adds |
//! |---------|------|
//! | V0 | election difficulty, baker cooldown epochs, stake threshold, mint per slot |
//! | V1 | cooldown, time and pool parameters; drops V0-only stake fields |
//! | V2 | timeout, block time/energy and finalization committee; drops election difficulty |
//! | V3 | validator score parameters |

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::identifiers::{AccountAddress, HexBytes};
use crate::primitives::{
    duration_millis, CcdAmount, CommissionRanges, CommissionRates, Energy, ExchangeRate,
};

/// Public key authorised to sign chain updates.
pub type UpdatePublicKey = HexBytes;

/// Threshold and key indices allowed to sign one kind of chain update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessStructure {
    /// Indices into the level 2 key list.
    pub authorized_keys: Vec<u32>,
    /// Signatures required.
    pub threshold: u32,
}

/// Level 2 keys before protocol 4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct AuthorizationsV0 {
    pub keys: Vec<UpdatePublicKey>,
    pub emergency: AccessStructure,
    pub protocol: AccessStructure,
    pub election_difficulty: AccessStructure,
    pub euro_per_energy: AccessStructure,
    pub micro_ccd_per_euro: AccessStructure,
    pub foundation_account: AccessStructure,
    pub mint_distribution: AccessStructure,
    pub transaction_fee_distribution: AccessStructure,
    pub gas_rewards: AccessStructure,
    pub pool_parameters: AccessStructure,
    pub add_anonymity_revoker: AccessStructure,
    pub add_identity_provider: AccessStructure,
}

/// Level 2 keys from protocol 4: V0 plus cooldown and time parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationsV1 {
    /// Structures shared with V0.
    pub v0: AuthorizationsV0,
    /// Cooldown parameter updates.
    pub cooldown_parameters: AccessStructure,
    /// Time parameter updates.
    pub time_parameters: AccessStructure,
}

/// Either version of the level 2 keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authorizations {
    /// Before protocol 4.
    V0(AuthorizationsV0),
    /// From protocol 4.
    V1(AuthorizationsV1),
}

/// Root or level 1 keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HigherLevelKeys {
    /// Keys.
    pub keys: Vec<UpdatePublicKey>,
    /// Signatures required.
    pub threshold: u32,
}

/// Fields present in every version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParametersCommon {
    /// Euro per unit of energy.
    pub euro_per_energy: ExchangeRate,
    /// Micro CCD per euro.
    pub micro_ccd_per_euro: ExchangeRate,
    /// Maximum account creations per block.
    pub account_creation_limit: u32,
    /// Foundation account.
    pub foundation_account: AccountAddress,
    /// Root keys.
    pub root_keys: HigherLevelKeys,
    /// Level 1 keys.
    pub level1_keys: HigherLevelKeys,
}

/// Distribution of transaction fees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionFeeDistribution {
    /// Fraction to the baker.
    pub baker: f64,
    /// Fraction to the GAS account.
    pub gas_account: f64,
}

/// GAS account reward fractions before protocol 6.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasRewardsV0 {
    /// Fraction paid to the baker.
    pub baker: f64,
    /// Fraction paid for including a finalization proof.
    pub finalization_proof: f64,
    /// Fraction paid for account creations.
    pub account_creation: f64,
    /// Fraction paid for chain updates.
    pub chain_update: f64,
}

/// GAS account reward fractions from protocol 6 (no finalization proof).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasRewardsV1 {
    /// Fraction paid to the baker.
    pub baker: f64,
    /// Fraction paid for account creations.
    pub account_creation: f64,
    /// Fraction paid for chain updates.
    pub chain_update: f64,
}

/// Mint distribution before protocol 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MintDistributionV0 {
    /// Mint rate per slot.
    pub mint_per_slot: f64,
    /// Fraction to bakers.
    pub baking_reward: f64,
    /// Fraction to finalizers.
    pub finalization_reward: f64,
}

/// Mint distribution from protocol 4 (minting moved to pay days).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MintDistributionV1 {
    /// Fraction to bakers.
    pub baking_reward: f64,
    /// Fraction to finalizers.
    pub finalization_reward: f64,
}

/// Reward parameters shared by every version.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardParametersCommon {
    /// Transaction fee distribution.
    pub transaction_fee_distribution: TransactionFeeDistribution,
}

/// Reward parameters of V0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardParametersV0 {
    /// Shared part.
    pub common: RewardParametersCommon,
    /// Mint distribution.
    pub mint_distribution: MintDistributionV0,
    /// GAS rewards.
    pub gas_rewards: GasRewardsV0,
}

/// Reward parameters of V1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardParametersV1 {
    /// Shared part.
    pub common: RewardParametersCommon,
    /// Mint distribution.
    pub mint_distribution: MintDistributionV1,
    /// GAS rewards.
    pub gas_rewards: GasRewardsV0,
}

/// Reward parameters of V2 and V3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardParametersV2 {
    /// Shared part.
    pub common: RewardParametersCommon,
    /// Mint distribution.
    pub mint_distribution: MintDistributionV1,
    /// GAS rewards.
    pub gas_rewards: GasRewardsV1,
}

/// Cooldown periods (in seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownParameters {
    /// Pool owner cooldown.
    pub pool_owner_cooldown: u64,
    /// Delegator cooldown.
    pub delegator_cooldown: u64,
}

/// Pay day parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeParameters {
    /// Reward period length in epochs.
    pub reward_period_length: u64,
    /// Mint rate per pay day.
    pub mint_per_payday: f64,
}

/// Pool parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolParameters {
    /// Commissions of passive delegation.
    pub passive_commissions: CommissionRates,
    /// Commission bounds for pools.
    pub commission_bounds: CommissionRanges,
    /// Minimum equity capital of a pool.
    pub minimum_equity_capital: CcdAmount,
    /// Maximum fraction of total stake a pool may hold.
    pub capital_bound: f64,
    /// Maximum ratio of pool capital to equity capital.
    pub leverage_bound: ExchangeRate,
}

/// Round timeout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeoutParameters {
    /// Base timeout.
    #[serde(with = "duration_millis")]
    pub timeout_base: Duration,
    /// Factor applied on a timeout.
    pub timeout_increase: f64,
    /// Factor applied on a successful round.
    pub timeout_decrease: f64,
}

/// Consensus parameters introduced with protocol 6.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsensusParameters {
    /// Timeout parameters.
    pub timeout_parameters: TimeoutParameters,
    /// Minimum time between blocks.
    #[serde(with = "duration_millis")]
    pub min_block_time: Duration,
    /// Maximum energy per block.
    pub block_energy_limit: Energy,
}

/// Finalization committee sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalizationCommitteeParameters {
    /// Minimum number of finalizers.
    pub min_finalizers: u32,
    /// Maximum number of finalizers.
    pub max_finalizers: u32,
    /// Stake fraction required to be a finalizer.
    pub finalizer_relative_stake_threshold: f64,
}

/// Validator suspension parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorScoreParameters {
    /// Missed rounds before a validator is suspended.
    pub max_missed_rounds: u64,
}

/// Chain parameters before protocol 4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainParametersV0 {
    /// Shared fields.
    pub common: ChainParametersCommon,
    /// Election difficulty.
    pub election_difficulty: f64,
    /// Baker cooldown in epochs.
    pub baker_cooldown_epochs: u64,
    /// Minimum stake to bake.
    pub minimum_threshold_for_baking: CcdAmount,
    /// Reward parameters.
    pub reward_parameters: RewardParametersV0,
    /// Level 2 keys.
    pub level2_keys: AuthorizationsV0,
}

/// Chain parameters of protocols 4 and 5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainParametersV1 {
    /// Shared fields.
    pub common: ChainParametersCommon,
    /// Election difficulty.
    pub election_difficulty: f64,
    /// Pay day parameters.
    pub time_parameters: TimeParameters,
    /// Cooldown parameters.
    pub cooldown_parameters: CooldownParameters,
    /// Pool parameters.
    pub pool_parameters: PoolParameters,
    /// Reward parameters.
    pub reward_parameters: RewardParametersV1,
    /// Level 2 keys.
    pub level2_keys: AuthorizationsV1,
}

/// Chain parameters of protocols 6 and 7.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainParametersV2 {
    /// Shared fields.
    pub common: ChainParametersCommon,
    /// Pay day parameters.
    pub time_parameters: TimeParameters,
    /// Cooldown parameters.
    pub cooldown_parameters: CooldownParameters,
    /// Pool parameters.
    pub pool_parameters: PoolParameters,
    /// Reward parameters.
    pub reward_parameters: RewardParametersV2,
    /// Level 2 keys.
    pub level2_keys: AuthorizationsV1,
    /// Timeout, block time and energy limit.
    pub consensus_parameters: ConsensusParameters,
    /// Finalization committee.
    pub finalization_committee_parameters: FinalizationCommitteeParameters,
}

/// Chain parameters from protocol 8.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainParametersV3 {
    /// Everything defined by V2.
    pub v2: ChainParametersV2,
    /// Validator score parameters.
    pub validator_score_parameters: ValidatorScoreParameters,
}

/// Chain parameters tagged by version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "version")]
pub enum ChainParameters {
    /// Version 0.
    V0(ChainParametersV0),
    /// Version 1.
    V1(ChainParametersV1),
    /// Version 2.
    V2(ChainParametersV2),
    /// Version 3.
    V3(ChainParametersV3),
}

impl ChainParameters {
    /// Fields shared by every version.
    pub fn common(&self) -> &ChainParametersCommon {
        match self {
            Self::V0(p) => &p.common,
            Self::V1(p) => &p.common,
            Self::V2(p) => &p.common,
            Self::V3(p) => &p.v2.common,
        }
    }

    /// Version number.
    pub fn version(&self) -> u8 {
        match self {
            Self::V0(_) => 0,
            Self::V1(_) => 1,
            Self::V2(_) => 2,
            Self::V3(_) => 3,
        }
    }

    /// Pay day parameters, absent before V1.
    pub fn time_parameters(&self) -> Option<&TimeParameters> {
        match self {
            Self::V0(_) => None,
            Self::V1(p) => Some(&p.time_parameters),
            Self::V2(p) => Some(&p.time_parameters),
            Self::V3(p) => Some(&p.v2.time_parameters),
        }
    }
}
