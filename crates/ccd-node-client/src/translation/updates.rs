//! Update instruction payloads and pending updates.
//!
//! Both arrive in their own wire shapes but map onto the single
//! [`UpdatePayload`] domain type.

use ccd_types::{CcdAmount, Energy, KeyUpdate, PendingUpdate, ProtocolUpdate, UpdatePayload};

use super::chain_parameters::{
    authorizations_v0, authorizations_v1, cooldown_parameters, finalization_committee_parameters,
    gas_rewards_v0, gas_rewards_v1, higher_level_keys, mint_distribution_v0, mint_distribution_v1,
    pool_parameters, time_parameters, timeout_parameters, transaction_fee_distribution,
    validator_score_parameters,
};
use super::common::exchange_rate;
use super::node::{ar_info, ip_info};
use super::{fraction_value, hex, ident, require, required_hex, timestamp, TranslationResult};
use crate::domain::TranslationError;
use crate::wire::updates as wire;

fn protocol_update(update: wire::ProtocolUpdate, path: &str) -> TranslationResult<ProtocolUpdate> {
    Ok(ProtocolUpdate {
        message: update.message,
        specification_url: update.specification_url,
        specification_hash: required_hex(update.specification_hash, (path, "specificationHash"))?,
        specification_auxiliary_data: hex(update.specification_auxiliary_data),
    })
}

fn key_update(update: wire::KeyUpdate, path: &str) -> TranslationResult<KeyUpdate> {
    match update {
        wire::KeyUpdate::RootKeysUpdate(keys) => higher_level_keys(Some(keys), path).map(KeyUpdate::RootKeys),
        wire::KeyUpdate::Level1KeysUpdate(keys) => higher_level_keys(Some(keys), path).map(KeyUpdate::Level1Keys),
        wire::KeyUpdate::Level2KeysUpdateV0(auth) => authorizations_v0(Some(auth), path).map(KeyUpdate::Level2KeysV0),
        wire::KeyUpdate::Level2KeysUpdateV1(auth) => authorizations_v1(Some(auth), path).map(KeyUpdate::Level2KeysV1),
        wire::KeyUpdate::Unrecognized(_) => Err(TranslationError::unknown_variant(path)),
    }
}

/// Payload of an enqueued update instruction.
pub fn update_payload(payload: wire::UpdatePayload) -> TranslationResult<UpdatePayload> {
    use wire::UpdatePayload as W;
    const P: &str = "UpdatePayload";

    let payload = match payload {
        W::ProtocolUpdate(update) => UpdatePayload::Protocol(protocol_update(update, "UpdatePayload.protocolUpdate")?),
        W::ElectionDifficultyUpdate(difficulty) => UpdatePayload::ElectionDifficulty(fraction_value(difficulty)),
        W::EuroPerEnergyUpdate(rate) => UpdatePayload::EuroPerEnergy(exchange_rate(Some(rate), P)?),
        W::MicroCcdPerEuroUpdate(rate) => UpdatePayload::MicroCcdPerEuro(exchange_rate(Some(rate), P)?),
        W::FoundationAccountUpdate(account) => {
            UpdatePayload::FoundationAccount(ident(&account, (P, "foundationAccountUpdate"))?)
        }
        W::MintDistributionUpdate(mint) => {
            UpdatePayload::MintDistributionV0(mint_distribution_v0(Some(mint), "UpdatePayload.mintDistributionUpdate")?)
        }
        W::TransactionFeeDistributionUpdate(fees) => UpdatePayload::TransactionFeeDistribution(
            transaction_fee_distribution(Some(fees), "UpdatePayload.transactionFeeDistributionUpdate")?,
        ),
        W::GasRewardsUpdate(gas) => {
            UpdatePayload::GasRewardsV0(gas_rewards_v0(Some(gas), "UpdatePayload.gasRewardsUpdate")?)
        }
        W::BakerStakeThresholdUpdate(threshold) => UpdatePayload::BakerStakeThreshold(CcdAmount::from_micro_ccd(
            require(threshold.baker_stake_threshold, (P, "bakerStakeThresholdUpdate.bakerStakeThreshold"))?,
        )),
        W::RootUpdate(update) => UpdatePayload::Root(key_update(update, "UpdatePayload.rootUpdate")?),
        W::Level1Update(update) => UpdatePayload::Level1(key_update(update, "UpdatePayload.level1Update")?),
        W::AddAnonymityRevokerUpdate(info) => {
            UpdatePayload::AddAnonymityRevoker(ar_info(info, "UpdatePayload.addAnonymityRevokerUpdate")?)
        }
        W::AddIdentityProviderUpdate(info) => {
            UpdatePayload::AddIdentityProvider(ip_info(info, "UpdatePayload.addIdentityProviderUpdate")?)
        }
        W::CooldownParametersCpv1Update(cooldown) => UpdatePayload::CooldownParameters(cooldown_parameters(
            Some(cooldown),
            "UpdatePayload.cooldownParametersCpv1Update",
        )?),
        W::PoolParametersCpv1Update(pool) => {
            UpdatePayload::PoolParameters(pool_parameters(Some(pool), "UpdatePayload.poolParametersCpv1Update")?)
        }
        W::TimeParametersCpv1Update(time) => {
            UpdatePayload::TimeParameters(time_parameters(Some(time), "UpdatePayload.timeParametersCpv1Update")?)
        }
        W::MintDistributionCpv1Update(mint) => UpdatePayload::MintDistributionV1(mint_distribution_v1(
            Some(mint),
            "UpdatePayload.mintDistributionCpv1Update",
        )?),
        W::GasRewardsCpv2Update(gas) => {
            UpdatePayload::GasRewardsV1(gas_rewards_v1(Some(gas), "UpdatePayload.gasRewardsCpv2Update")?)
        }
        W::TimeoutParametersUpdate(timeout) => UpdatePayload::TimeoutParameters(timeout_parameters(
            Some(timeout),
            "UpdatePayload.timeoutParametersUpdate",
        )?),
        W::MinBlockTimeUpdate(millis) => UpdatePayload::MinBlockTime(std::time::Duration::from_millis(millis)),
        W::BlockEnergyLimitUpdate(energy) => UpdatePayload::BlockEnergyLimit(Energy(energy)),
        W::FinalizationCommitteeParametersUpdate(params) => UpdatePayload::FinalizationCommitteeParameters(
            finalization_committee_parameters(Some(params), "UpdatePayload.finalizationCommitteeParametersUpdate")?,
        ),
        W::ValidatorScoreParametersUpdate(params) => UpdatePayload::ValidatorScoreParameters(
            validator_score_parameters(Some(params), "UpdatePayload.validatorScoreParametersUpdate")?,
        ),
        W::Unrecognized(_) => return Err(TranslationError::unknown_variant(P)),
    };
    Ok(payload)
}

fn pending_effect(effect: wire::PendingUpdateEffect) -> TranslationResult<UpdatePayload> {
    use wire::PendingUpdateEffect as W;
    const P: &str = "PendingUpdate.effect";

    let payload = match effect {
        W::RootKeys(keys) => UpdatePayload::Root(KeyUpdate::RootKeys(higher_level_keys(Some(keys), P)?)),
        W::Level1Keys(keys) => UpdatePayload::Level1(KeyUpdate::Level1Keys(higher_level_keys(Some(keys), P)?)),
        W::Level2KeysCpv0(auth) => UpdatePayload::Keys(KeyUpdate::Level2KeysV0(authorizations_v0(Some(auth), P)?)),
        W::Level2KeysCpv1(auth) => UpdatePayload::Keys(KeyUpdate::Level2KeysV1(authorizations_v1(Some(auth), P)?)),
        W::Protocol(update) => UpdatePayload::Protocol(protocol_update(update, P)?),
        W::ElectionDifficulty(difficulty) => UpdatePayload::ElectionDifficulty(fraction_value(difficulty)),
        W::EuroPerEnergy(rate) => UpdatePayload::EuroPerEnergy(exchange_rate(Some(rate), P)?),
        W::MicroCcdPerEuro(rate) => UpdatePayload::MicroCcdPerEuro(exchange_rate(Some(rate), P)?),
        W::FoundationAccount(account) => UpdatePayload::FoundationAccount(ident(&account, P)?),
        W::MintDistributionCpv0(mint) => UpdatePayload::MintDistributionV0(mint_distribution_v0(Some(mint), P)?),
        W::MintDistributionCpv1(mint) => UpdatePayload::MintDistributionV1(mint_distribution_v1(Some(mint), P)?),
        W::TransactionFeeDistribution(fees) => {
            UpdatePayload::TransactionFeeDistribution(transaction_fee_distribution(Some(fees), P)?)
        }
        W::GasRewards(gas) => UpdatePayload::GasRewardsV0(gas_rewards_v0(Some(gas), P)?),
        W::PoolParametersCpv0(threshold) => UpdatePayload::BakerStakeThreshold(CcdAmount::from_micro_ccd(require(
            threshold.baker_stake_threshold,
            (P, "poolParametersCpv0.bakerStakeThreshold"),
        )?)),
        W::PoolParametersCpv1(pool) => UpdatePayload::PoolParameters(pool_parameters(Some(pool), P)?),
        W::AddAnonymityRevoker(info) => UpdatePayload::AddAnonymityRevoker(ar_info(info, P)?),
        W::AddIdentityProvider(info) => UpdatePayload::AddIdentityProvider(ip_info(info, P)?),
        W::CooldownParameters(cooldown) => UpdatePayload::CooldownParameters(cooldown_parameters(Some(cooldown), P)?),
        W::TimeParameters(time) => UpdatePayload::TimeParameters(time_parameters(Some(time), P)?),
        W::GasRewardsCpv2(gas) => UpdatePayload::GasRewardsV1(gas_rewards_v1(Some(gas), P)?),
        W::TimeoutParameters(timeout) => UpdatePayload::TimeoutParameters(timeout_parameters(Some(timeout), P)?),
        W::MinBlockTime(millis) => UpdatePayload::MinBlockTime(std::time::Duration::from_millis(millis)),
        W::BlockEnergyLimit(energy) => UpdatePayload::BlockEnergyLimit(Energy(energy)),
        W::FinalizationCommitteeParameters(params) => {
            UpdatePayload::FinalizationCommitteeParameters(finalization_committee_parameters(Some(params), P)?)
        }
        W::ValidatorScoreParameters(params) => {
            UpdatePayload::ValidatorScoreParameters(validator_score_parameters(Some(params), P)?)
        }
        W::Unrecognized(_) => return Err(TranslationError::unknown_variant(P)),
    };
    Ok(payload)
}

/// Update waiting for its effective time.
pub fn pending_update(update: wire::PendingUpdate) -> TranslationResult<PendingUpdate> {
    Ok(PendingUpdate {
        effective_time: timestamp(update.effective_time, "PendingUpdate.effectiveTime")?,
        effect: pending_effect(require(update.effect, "PendingUpdate.effect")?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TranslationErrorKind;
    use crate::wire::chain_parameters::{HigherLevelKeys, MintDistributionCpv0};
    use crate::wire::common::{AmountFraction, MintRate};
    use crate::wire::Bytes;
    use std::time::Duration;

    #[test]
    fn test_mint_distribution_update_is_v0() {
        let payload = wire::UpdatePayload::MintDistributionUpdate(MintDistributionCpv0 {
            mint_per_slot: Some(MintRate {
                mantissa: 1,
                exponent: 1,
            }),
            baking_reward: Some(AmountFraction {
                parts_per_hundred_thousand: 50_000,
            }),
            finalization_reward: Some(AmountFraction {
                parts_per_hundred_thousand: 25_000,
            }),
        });
        let UpdatePayload::MintDistributionV0(mint) = update_payload(payload).unwrap() else {
            panic!("expected v0 mint distribution");
        };
        assert_eq!(mint.mint_per_slot, 0.1);
        assert_eq!(mint.baking_reward, 0.5);
    }

    #[test]
    fn test_pending_level1_keys() {
        let update = wire::PendingUpdate {
            effective_time: Some(10_000),
            effect: Some(wire::PendingUpdateEffect::Level1Keys(HigherLevelKeys {
                keys: vec![Bytes(vec![4; 32])],
                threshold: Some(1),
            })),
        };
        let pending = pending_update(update).unwrap();
        assert_eq!(pending.effective_time.timestamp_millis(), 10_000);
        assert!(matches!(pending.effect, UpdatePayload::Level1(KeyUpdate::Level1Keys(_))));
    }

    #[test]
    fn test_min_block_time() {
        assert_eq!(
            update_payload(wire::UpdatePayload::MinBlockTimeUpdate(2_000)),
            Ok(UpdatePayload::MinBlockTime(Duration::from_secs(2)))
        );
    }

    #[test]
    fn test_protocol_update_requires_hash() {
        let update = wire::UpdatePayload::ProtocolUpdate(wire::ProtocolUpdate {
            message: "P7".to_string(),
            specification_url: "https://example.invalid/p7".to_string(),
            specification_hash: None,
            specification_auxiliary_data: Bytes::default(),
        });
        let err = update_payload(update).unwrap_err();
        assert_eq!(err.path, "UpdatePayload.protocolUpdate.specificationHash");
    }

    #[test]
    fn test_unknown_payload() {
        let payload: wire::UpdatePayload =
            serde_json::from_value(serde_json::json!({ "createPltUpdate": {} })).unwrap();
        assert_eq!(update_payload(payload).unwrap_err().kind, TranslationErrorKind::UnknownVariant);
    }
}
