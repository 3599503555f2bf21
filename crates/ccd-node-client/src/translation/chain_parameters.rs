//! Chain parameters V0..V3 and the parameter records shared with chain
//! update payloads.

use ccd_types::{
    AccessStructure, AuthorizationsV0, AuthorizationsV1, ChainParameters, ChainParametersCommon,
    ChainParametersV0, ChainParametersV1, ChainParametersV2, ChainParametersV3, CommissionRates,
    ConsensusParameters, CooldownParameters, Energy, FinalizationCommitteeParameters, GasRewardsV0,
    GasRewardsV1, HigherLevelKeys, MintDistributionV0, MintDistributionV1, PoolParameters,
    RewardParametersCommon, RewardParametersV0, RewardParametersV1, RewardParametersV2,
    TimeParameters, TimeoutParameters, TransactionFeeDistribution, ValidatorScoreParameters,
};

use super::common::{commission_ranges, exchange_rate, ratio};
use super::{amount, duration, fraction, hex, mint_rate, require, required_ident, TranslationResult};
use crate::domain::TranslationError;
use crate::wire::chain_parameters as wire;
use crate::wire::common::ExchangeRate;
use crate::wire::Bytes;

/// Chain parameters in effect at a block.
pub fn chain_parameters(params: wire::ChainParameters) -> TranslationResult<ChainParameters> {
    match params {
        wire::ChainParameters::V0(v0) => chain_parameters_v0(v0).map(ChainParameters::V0),
        wire::ChainParameters::V1(v1) => chain_parameters_v1(v1).map(ChainParameters::V1),
        wire::ChainParameters::V2(v2) => chain_parameters_v2(v2, "ChainParametersV2").map(ChainParameters::V2),
        wire::ChainParameters::V3(mut v3) => {
            let scores = v3.validator_score_parameters.take();
            Ok(ChainParameters::V3(ChainParametersV3 {
                v2: chain_parameters_v2(v3, "ChainParametersV3")?,
                validator_score_parameters: validator_score_parameters(
                    scores,
                    "ChainParametersV3.validatorScoreParameters",
                )?,
            }))
        }
        wire::ChainParameters::Unrecognized(_) => Err(TranslationError::unknown_variant("ChainParameters")),
    }
}

fn chain_parameters_v0(params: wire::ChainParametersV0) -> TranslationResult<ChainParametersV0> {
    const P: &str = "ChainParametersV0";
    Ok(ChainParametersV0 {
        common: common(
            CommonFields {
                euro_per_energy: params.euro_per_energy,
                micro_ccd_per_euro: params.micro_ccd_per_euro,
                account_creation_limit: params.account_creation_limit,
                foundation_account: params.foundation_account,
                root_keys: params.root_keys,
                level1_keys: params.level1_keys,
            },
            P,
        )?,
        election_difficulty: fraction(params.election_difficulty, (P, "electionDifficulty"))?,
        baker_cooldown_epochs: require(params.baker_cooldown_epochs, (P, "bakerCooldownEpochs"))?,
        minimum_threshold_for_baking: amount(
            params.minimum_threshold_for_baking,
            (P, "minimumThresholdForBaking"),
        )?,
        reward_parameters: RewardParametersV0 {
            common: reward_common(params.transaction_fee_distribution, P)?,
            mint_distribution: mint_distribution_v0(
                params.mint_distribution,
                "ChainParametersV0.mintDistribution",
            )?,
            gas_rewards: gas_rewards_v0(params.gas_rewards, "ChainParametersV0.gasRewards")?,
        },
        level2_keys: authorizations_v0(params.level2_keys, "ChainParametersV0.level2Keys")?,
    })
}

fn chain_parameters_v1(params: wire::ChainParametersV1) -> TranslationResult<ChainParametersV1> {
    const P: &str = "ChainParametersV1";
    Ok(ChainParametersV1 {
        common: common(
            CommonFields {
                euro_per_energy: params.euro_per_energy,
                micro_ccd_per_euro: params.micro_ccd_per_euro,
                account_creation_limit: params.account_creation_limit,
                foundation_account: params.foundation_account,
                root_keys: params.root_keys,
                level1_keys: params.level1_keys,
            },
            P,
        )?,
        election_difficulty: fraction(params.election_difficulty, (P, "electionDifficulty"))?,
        time_parameters: time_parameters(params.time_parameters, "ChainParametersV1.timeParameters")?,
        cooldown_parameters: cooldown_parameters(
            params.cooldown_parameters,
            "ChainParametersV1.cooldownParameters",
        )?,
        pool_parameters: pool_parameters(params.pool_parameters, "ChainParametersV1.poolParameters")?,
        reward_parameters: RewardParametersV1 {
            common: reward_common(params.transaction_fee_distribution, P)?,
            mint_distribution: mint_distribution_v1(
                params.mint_distribution,
                "ChainParametersV1.mintDistribution",
            )?,
            gas_rewards: gas_rewards_v0(params.gas_rewards, "ChainParametersV1.gasRewards")?,
        },
        level2_keys: authorizations_v1(params.level2_keys, "ChainParametersV1.level2Keys")?,
    })
}

fn chain_parameters_v2(params: wire::ChainParametersV2, p: &str) -> TranslationResult<ChainParametersV2> {
    Ok(ChainParametersV2 {
        common: common(
            CommonFields {
                euro_per_energy: params.euro_per_energy,
                micro_ccd_per_euro: params.micro_ccd_per_euro,
                account_creation_limit: params.account_creation_limit,
                foundation_account: params.foundation_account,
                root_keys: params.root_keys,
                level1_keys: params.level1_keys,
            },
            p,
        )?,
        time_parameters: time_parameters(params.time_parameters, &format!("{p}.timeParameters"))?,
        cooldown_parameters: cooldown_parameters(
            params.cooldown_parameters,
            &format!("{p}.cooldownParameters"),
        )?,
        pool_parameters: pool_parameters(params.pool_parameters, &format!("{p}.poolParameters"))?,
        reward_parameters: RewardParametersV2 {
            common: reward_common(params.transaction_fee_distribution, p)?,
            mint_distribution: mint_distribution_v1(params.mint_distribution, &format!("{p}.mintDistribution"))?,
            gas_rewards: gas_rewards_v1(params.gas_rewards, &format!("{p}.gasRewards"))?,
        },
        level2_keys: authorizations_v1(params.level2_keys, &format!("{p}.level2Keys"))?,
        consensus_parameters: consensus_parameters(
            params.consensus_parameters,
            &format!("{p}.consensusParameters"),
        )?,
        finalization_committee_parameters: finalization_committee_parameters(
            params.finalization_committee_parameters,
            &format!("{p}.finalizationCommitteeParameters"),
        )?,
    })
}

struct CommonFields {
    euro_per_energy: Option<ExchangeRate>,
    micro_ccd_per_euro: Option<ExchangeRate>,
    account_creation_limit: Option<u32>,
    foundation_account: Option<Bytes>,
    root_keys: Option<wire::HigherLevelKeys>,
    level1_keys: Option<wire::HigherLevelKeys>,
}

fn common(fields: CommonFields, p: &str) -> TranslationResult<ChainParametersCommon> {
    Ok(ChainParametersCommon {
        euro_per_energy: exchange_rate(fields.euro_per_energy, (p, "euroPerEnergy"))?,
        micro_ccd_per_euro: exchange_rate(fields.micro_ccd_per_euro, (p, "microCcdPerEuro"))?,
        account_creation_limit: require(fields.account_creation_limit, (p, "accountCreationLimit"))?,
        foundation_account: required_ident(fields.foundation_account, (p, "foundationAccount"))?,
        root_keys: higher_level_keys(fields.root_keys, &format!("{p}.rootKeys"))?,
        level1_keys: higher_level_keys(fields.level1_keys, &format!("{p}.level1Keys"))?,
    })
}

fn reward_common(
    distribution: Option<wire::TransactionFeeDistribution>,
    p: &str,
) -> TranslationResult<RewardParametersCommon> {
    Ok(RewardParametersCommon {
        transaction_fee_distribution: transaction_fee_distribution(
            distribution,
            &format!("{p}.transactionFeeDistribution"),
        )?,
    })
}

/// Root or level 1 keys.
pub fn higher_level_keys(
    keys: Option<wire::HigherLevelKeys>,
    path: &str,
) -> TranslationResult<HigherLevelKeys> {
    let keys = require(keys, path)?;
    Ok(HigherLevelKeys {
        threshold: require(keys.threshold, (path, "threshold"))?,
        keys: keys.keys.into_iter().map(hex).collect(),
    })
}

fn access_structure(access: Option<wire::AccessStructure>, path: (&str, &str)) -> TranslationResult<AccessStructure> {
    let access = require(access, path)?;
    Ok(AccessStructure {
        threshold: require(access.access_threshold, path)?,
        authorized_keys: access.access_public_keys,
    })
}

/// Level 2 keys before protocol 4.
pub fn authorizations_v0(auth: Option<wire::AuthorizationsV0>, path: &str) -> TranslationResult<AuthorizationsV0> {
    let auth = require(auth, path)?;
    Ok(AuthorizationsV0 {
        keys: auth.keys.into_iter().map(hex).collect(),
        emergency: access_structure(auth.emergency, (path, "emergency"))?,
        protocol: access_structure(auth.protocol, (path, "protocol"))?,
        election_difficulty: access_structure(auth.parameter_consensus, (path, "parameterConsensus"))?,
        euro_per_energy: access_structure(auth.parameter_euro_per_energy, (path, "parameterEuroPerEnergy"))?,
        micro_ccd_per_euro: access_structure(
            auth.parameter_micro_ccd_per_euro,
            (path, "parameterMicroCCDPerEuro"),
        )?,
        foundation_account: access_structure(
            auth.parameter_foundation_account,
            (path, "parameterFoundationAccount"),
        )?,
        mint_distribution: access_structure(
            auth.parameter_mint_distribution,
            (path, "parameterMintDistribution"),
        )?,
        transaction_fee_distribution: access_structure(
            auth.parameter_transaction_fee_distribution,
            (path, "parameterTransactionFeeDistribution"),
        )?,
        gas_rewards: access_structure(auth.parameter_gas_rewards, (path, "parameterGasRewards"))?,
        pool_parameters: access_structure(auth.pool_parameters, (path, "poolParameters"))?,
        add_anonymity_revoker: access_structure(auth.add_anonymity_revoker, (path, "addAnonymityRevoker"))?,
        add_identity_provider: access_structure(auth.add_identity_provider, (path, "addIdentityProvider"))?,
    })
}

/// Level 2 keys from protocol 4.
pub fn authorizations_v1(auth: Option<wire::AuthorizationsV1>, path: &str) -> TranslationResult<AuthorizationsV1> {
    let auth = require(auth, path)?;
    Ok(AuthorizationsV1 {
        v0: authorizations_v0(auth.v0, &format!("{path}.v0"))?,
        cooldown_parameters: access_structure(auth.parameter_cooldown, (path, "parameterCooldown"))?,
        time_parameters: access_structure(auth.parameter_time, (path, "parameterTime"))?,
    })
}

/// Transaction fee split.
pub fn transaction_fee_distribution(
    distribution: Option<wire::TransactionFeeDistribution>,
    path: &str,
) -> TranslationResult<TransactionFeeDistribution> {
    let distribution = require(distribution, path)?;
    Ok(TransactionFeeDistribution {
        baker: fraction(distribution.baker, (path, "baker"))?,
        gas_account: fraction(distribution.gas_account, (path, "gasAccount"))?,
    })
}

/// GAS rewards before protocol 6.
pub fn gas_rewards_v0(rewards: Option<wire::GasRewards>, path: &str) -> TranslationResult<GasRewardsV0> {
    let rewards = require(rewards, path)?;
    Ok(GasRewardsV0 {
        baker: fraction(rewards.baker, (path, "baker"))?,
        finalization_proof: fraction(rewards.finalization_proof, (path, "finalizationProof"))?,
        account_creation: fraction(rewards.account_creation, (path, "accountCreation"))?,
        chain_update: fraction(rewards.chain_update, (path, "chainUpdate"))?,
    })
}

/// GAS rewards from protocol 6.
pub fn gas_rewards_v1(rewards: Option<wire::GasRewardsCpv2>, path: &str) -> TranslationResult<GasRewardsV1> {
    let rewards = require(rewards, path)?;
    Ok(GasRewardsV1 {
        baker: fraction(rewards.baker, (path, "baker"))?,
        account_creation: fraction(rewards.account_creation, (path, "accountCreation"))?,
        chain_update: fraction(rewards.chain_update, (path, "chainUpdate"))?,
    })
}

/// Mint distribution before protocol 4.
pub fn mint_distribution_v0(
    mint: Option<wire::MintDistributionCpv0>,
    path: &str,
) -> TranslationResult<MintDistributionV0> {
    let mint = require(mint, path)?;
    Ok(MintDistributionV0 {
        mint_per_slot: mint_rate(mint.mint_per_slot, (path, "mintPerSlot"))?,
        baking_reward: fraction(mint.baking_reward, (path, "bakingReward"))?,
        finalization_reward: fraction(mint.finalization_reward, (path, "finalizationReward"))?,
    })
}

/// Mint distribution from protocol 4.
pub fn mint_distribution_v1(
    mint: Option<wire::MintDistributionCpv1>,
    path: &str,
) -> TranslationResult<MintDistributionV1> {
    let mint = require(mint, path)?;
    Ok(MintDistributionV1 {
        baking_reward: fraction(mint.baking_reward, (path, "bakingReward"))?,
        finalization_reward: fraction(mint.finalization_reward, (path, "finalizationReward"))?,
    })
}

/// Cooldown periods.
pub fn cooldown_parameters(
    cooldown: Option<wire::CooldownParametersCpv1>,
    path: &str,
) -> TranslationResult<CooldownParameters> {
    let cooldown = require(cooldown, path)?;
    Ok(CooldownParameters {
        pool_owner_cooldown: require(cooldown.pool_owner_cooldown, (path, "poolOwnerCooldown"))?,
        delegator_cooldown: require(cooldown.delegator_cooldown, (path, "delegatorCooldown"))?,
    })
}

/// Pay day parameters.
pub fn time_parameters(time: Option<wire::TimeParametersCpv1>, path: &str) -> TranslationResult<TimeParameters> {
    let time = require(time, path)?;
    Ok(TimeParameters {
        reward_period_length: require(time.reward_period_length, (path, "rewardPeriodLength"))?,
        mint_per_payday: mint_rate(time.mint_per_payday, (path, "mintPerPayday"))?,
    })
}

/// Pool parameters.
pub fn pool_parameters(pool: Option<wire::PoolParametersCpv1>, path: &str) -> TranslationResult<PoolParameters> {
    let pool = require(pool, path)?;
    Ok(PoolParameters {
        passive_commissions: CommissionRates {
            transaction_commission: fraction(
                pool.passive_transaction_commission,
                (path, "passiveTransactionCommission"),
            )?,
            baking_commission: fraction(pool.passive_baking_commission, (path, "passiveBakingCommission"))?,
            finalization_commission: fraction(
                pool.passive_finalization_commission,
                (path, "passiveFinalizationCommission"),
            )?,
        },
        commission_bounds: commission_ranges(pool.commission_bounds, &format!("{path}.commissionBounds"))?,
        minimum_equity_capital: amount(pool.minimum_equity_capital, (path, "minimumEquityCapital"))?,
        capital_bound: fraction(pool.capital_bound, (path, "capitalBound"))?,
        leverage_bound: exchange_rate(pool.leverage_bound, (path, "leverageBound"))?,
    })
}

/// Round timeout parameters. Growth and shrink factors become plain ratios.
pub fn timeout_parameters(
    timeout: Option<wire::TimeoutParameters>,
    path: &str,
) -> TranslationResult<TimeoutParameters> {
    let timeout = require(timeout, path)?;
    Ok(TimeoutParameters {
        timeout_base: duration(timeout.timeout_base, (path, "timeoutBase"))?,
        timeout_increase: ratio(timeout.timeout_increase, (path, "timeoutIncrease"))?,
        timeout_decrease: ratio(timeout.timeout_decrease, (path, "timeoutDecrease"))?,
    })
}

fn consensus_parameters(
    consensus: Option<wire::ConsensusParametersV1>,
    path: &str,
) -> TranslationResult<ConsensusParameters> {
    let consensus = require(consensus, path)?;
    Ok(ConsensusParameters {
        timeout_parameters: timeout_parameters(consensus.timeout_parameters, &format!("{path}.timeoutParameters"))?,
        min_block_time: duration(consensus.min_block_time, (path, "minBlockTime"))?,
        block_energy_limit: Energy(require(consensus.block_energy_limit, (path, "blockEnergyLimit"))?),
    })
}

/// Finalization committee sizing.
pub fn finalization_committee_parameters(
    params: Option<wire::FinalizationCommitteeParameters>,
    path: &str,
) -> TranslationResult<FinalizationCommitteeParameters> {
    let params = require(params, path)?;
    Ok(FinalizationCommitteeParameters {
        min_finalizers: params.minimum_finalizers,
        max_finalizers: params.maximum_finalizers,
        finalizer_relative_stake_threshold: fraction(
            params.finalizer_relative_stake_threshold,
            (path, "finalizerRelativeStakeThreshold"),
        )?,
    })
}

/// Validator suspension parameters.
pub fn validator_score_parameters(
    params: Option<wire::ValidatorScoreParameters>,
    path: &str,
) -> TranslationResult<ValidatorScoreParameters> {
    let params = require(params, path)?;
    Ok(ValidatorScoreParameters {
        max_missed_rounds: params.maximum_missed_rounds,
    })
}
