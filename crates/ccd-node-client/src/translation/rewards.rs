//! Tokenomics, pool status, reward period data and special events.

use ccd_types::{
    AccountAmount, BakerInfo, BakerPoolPendingChange, BakerPoolStatus, BakerRewardPeriodInfo,
    BlockSpecialEvent, CcdAmount, CurrentPaydayStatus, DelegatorInfo, DelegatorRewardPeriodInfo,
    PassiveDelegationStatus, RewardStatus, RewardStatusCommon,
};

use super::common::{baker_pool_info, commission_rates, stake_pending_change};
use super::{
    amount, each, mint_rate, protocol_version, require, required_hex, required_ident, timestamp,
    TranslationResult,
};
use crate::domain::TranslationError;
use crate::wire::account::BakerInfo as WireBakerInfo;
use crate::wire::common::ProtocolVersionCode;
use crate::wire::rewards as wire;

struct CommonFields {
    total_amount: Option<u64>,
    total_encrypted_amount: Option<u64>,
    baking_reward_account: Option<u64>,
    finalization_reward_account: Option<u64>,
    gas_account: Option<u64>,
    protocol_version: ProtocolVersionCode,
}

fn reward_common(fields: CommonFields, p: &str) -> TranslationResult<RewardStatusCommon> {
    Ok(RewardStatusCommon {
        protocol_version: protocol_version(fields.protocol_version, (p, "protocolVersion"))?,
        total_amount: amount(fields.total_amount, (p, "totalAmount"))?,
        total_encrypted_amount: amount(fields.total_encrypted_amount, (p, "totalEncryptedAmount"))?,
        baking_reward_account: amount(fields.baking_reward_account, (p, "bakingRewardAccount"))?,
        finalization_reward_account: amount(
            fields.finalization_reward_account,
            (p, "finalizationRewardAccount"),
        )?,
        gas_account: amount(fields.gas_account, (p, "gasAccount"))?,
    })
}

/// Tokenomics at a block.
pub fn reward_status(info: wire::TokenomicsInfo) -> TranslationResult<RewardStatus> {
    match info {
        wire::TokenomicsInfo::V0(v0) => reward_common(
            CommonFields {
                total_amount: v0.total_amount,
                total_encrypted_amount: v0.total_encrypted_amount,
                baking_reward_account: v0.baking_reward_account,
                finalization_reward_account: v0.finalization_reward_account,
                gas_account: v0.gas_account,
                protocol_version: v0.protocol_version,
            },
            "TokenomicsInfo.v0",
        )
        .map(RewardStatus::V0),
        wire::TokenomicsInfo::V1(v1) => {
            const P: &str = "TokenomicsInfo.v1";
            Ok(RewardStatus::V1 {
                common: reward_common(
                    CommonFields {
                        total_amount: v1.total_amount,
                        total_encrypted_amount: v1.total_encrypted_amount,
                        baking_reward_account: v1.baking_reward_account,
                        finalization_reward_account: v1.finalization_reward_account,
                        gas_account: v1.gas_account,
                        protocol_version: v1.protocol_version,
                    },
                    P,
                )?,
                foundation_transaction_rewards: amount(
                    v1.foundation_transaction_rewards,
                    (P, "foundationTransactionRewards"),
                )?,
                next_payday_time: timestamp(v1.next_payday_time, (P, "nextPaydayTime"))?,
                next_payday_mint_rate: mint_rate(v1.next_payday_mint_rate, (P, "nextPaydayMintRate"))?,
                total_staked_capital: amount(v1.total_staked_capital, (P, "totalStakedCapital"))?,
            })
        }
        wire::TokenomicsInfo::Unrecognized(_) => Err(TranslationError::unknown_variant("TokenomicsInfo")),
    }
}

fn pool_pending_change(change: Option<wire::PoolPendingChange>) -> TranslationResult<BakerPoolPendingChange> {
    const P: &str = "PoolInfoResponse.equityPendingChange";
    match change {
        None => Ok(BakerPoolPendingChange::NoChange),
        Some(wire::PoolPendingChange::Reduce(reduce)) => Ok(BakerPoolPendingChange::ReduceBakerCapital {
            baker_equity_capital: amount(reduce.reduced_equity_capital, (P, "reduce.reducedEquityCapital"))?,
            effective_time: timestamp(reduce.effective_time, (P, "reduce.effectiveTime"))?,
        }),
        Some(wire::PoolPendingChange::Remove(remove)) => Ok(BakerPoolPendingChange::RemovePool {
            effective_time: timestamp(remove.effective_time, (P, "remove.effectiveTime"))?,
        }),
        Some(wire::PoolPendingChange::Unrecognized(_)) => Err(TranslationError::unknown_variant(P)),
    }
}

fn current_payday(info: wire::PoolCurrentPaydayInfo) -> TranslationResult<CurrentPaydayStatus> {
    const P: &str = "PoolInfoResponse.currentPaydayInfo";
    Ok(CurrentPaydayStatus {
        blocks_baked: info.blocks_baked,
        finalization_live: info.finalization_live,
        transaction_fees_earned: amount(info.transaction_fees_earned, (P, "transactionFeesEarned"))?,
        effective_stake: amount(info.effective_stake, (P, "effectiveStake"))?,
        lottery_power: info.lottery_power,
        baker_equity_capital: amount(info.baker_equity_capital, (P, "bakerEquityCapital"))?,
        delegated_capital: amount(info.delegated_capital, (P, "delegatedCapital"))?,
        commission_rates: commission_rates(info.commission_rates, "PoolInfoResponse.currentPaydayInfo.commissionRates")?,
        is_primed_for_suspension: info.is_primed_for_suspension.unwrap_or(false),
        missed_rounds: info.missed_rounds.unwrap_or(0),
    })
}

/// Status of a baker pool. Pools of removed bakers have no capital fields.
pub fn pool_status(info: wire::PoolInfoResponse) -> TranslationResult<BakerPoolStatus> {
    Ok(BakerPoolStatus {
        baker_id: require(info.baker, "PoolInfoResponse.baker")?,
        baker_address: required_ident(info.address, "PoolInfoResponse.address")?,
        baker_equity_capital: info.equity_capital.map(CcdAmount::from_micro_ccd),
        delegated_capital: info.delegated_capital.map(CcdAmount::from_micro_ccd),
        delegated_capital_cap: info.delegated_capital_cap.map(CcdAmount::from_micro_ccd),
        pool_info: info
            .pool_info
            .map(|pool| baker_pool_info(pool, "PoolInfoResponse.poolInfo"))
            .transpose()?,
        baker_stake_pending_change: pool_pending_change(info.equity_pending_change)?,
        current_payday_status: info.current_payday_info.map(current_payday).transpose()?,
        all_pool_total_capital: amount(info.all_pool_total_capital, "PoolInfoResponse.allPoolTotalCapital")?,
        is_suspended: info.is_suspended.unwrap_or(false),
    })
}

/// Status of passive delegation.
pub fn passive_delegation_status(info: wire::PassiveDelegationInfo) -> TranslationResult<PassiveDelegationStatus> {
    const P: &str = "PassiveDelegationInfo";
    Ok(PassiveDelegationStatus {
        delegated_capital: amount(info.delegated_capital, (P, "delegatedCapital"))?,
        commission_rates: commission_rates(info.commission_rates, "PassiveDelegationInfo.commissionRates")?,
        current_payday_transaction_fees_earned: amount(
            info.current_payday_transaction_fees_earned,
            (P, "currentPaydayTransactionFeesEarned"),
        )?,
        current_payday_delegated_capital: amount(
            info.current_payday_delegated_capital,
            (P, "currentPaydayDelegatedCapital"),
        )?,
        all_pool_total_capital: amount(info.all_pool_total_capital, (P, "allPoolTotalCapital"))?,
    })
}

/// Item of a pool delegator stream.
pub fn delegator_info(info: wire::DelegatorInfo) -> TranslationResult<DelegatorInfo> {
    Ok(DelegatorInfo {
        account: required_ident(info.account, "DelegatorInfo.account")?,
        stake: amount(info.stake, "DelegatorInfo.stake")?,
        pending_change: stake_pending_change(info.pending_change, "DelegatorInfo.pendingChange")?,
    })
}

/// Item of a reward period delegator stream.
pub fn delegator_reward_period_info(
    info: wire::DelegatorRewardPeriodInfo,
) -> TranslationResult<DelegatorRewardPeriodInfo> {
    Ok(DelegatorRewardPeriodInfo {
        account: required_ident(info.account, "DelegatorRewardPeriodInfo.account")?,
        stake: amount(info.stake, "DelegatorRewardPeriodInfo.stake")?,
    })
}

fn baker_info(info: Option<WireBakerInfo>, path: &str) -> TranslationResult<BakerInfo> {
    let info = require(info, path)?;
    Ok(BakerInfo {
        baker_id: require(info.baker_id, (path, "bakerId"))?,
        election_key: required_hex(info.election_key, (path, "electionKey"))?,
        signature_key: required_hex(info.signature_key, (path, "signatureKey"))?,
        aggregation_key: required_hex(info.aggregation_key, (path, "aggregationKey"))?,
    })
}

/// Item of the reward period baker stream.
pub fn baker_reward_period_info(info: wire::BakerRewardPeriodInfo) -> TranslationResult<BakerRewardPeriodInfo> {
    const P: &str = "BakerRewardPeriodInfo";
    Ok(BakerRewardPeriodInfo {
        baker: baker_info(info.baker, "BakerRewardPeriodInfo.baker")?,
        effective_stake: amount(info.effective_stake, (P, "effectiveStake"))?,
        commission_rates: commission_rates(info.commission_rates, "BakerRewardPeriodInfo.commissionRates")?,
        equity_capital: amount(info.equity_capital, (P, "equityCapital"))?,
        delegated_capital: amount(info.delegated_capital, (P, "delegatedCapital"))?,
        is_finalizer: info.is_finalizer,
    })
}

fn account_amounts(amounts: Option<wire::AccountAmounts>, path: &str) -> TranslationResult<Vec<AccountAmount>> {
    each(require(amounts, path)?.entries, |entry| {
        Ok(AccountAmount {
            account: required_ident(entry.account, (path, "account"))?,
            amount: amount(entry.amount, (path, "amount"))?,
        })
    })
}

/// Special event of a block: minting, rewards and validator suspensions.
pub fn block_special_event(event: wire::BlockSpecialEvent) -> TranslationResult<BlockSpecialEvent> {
    use wire::BlockSpecialEvent as W;
    const P: &str = "BlockSpecialEvent";

    let event = match event {
        W::BakingRewards(rewards) => BlockSpecialEvent::BakingRewards {
            baking_rewards: account_amounts(rewards.baker_rewards, "BlockSpecialEvent.bakingRewards.bakerRewards")?,
            remainder: amount(rewards.remainder, (P, "bakingRewards.remainder"))?,
        },
        W::Mint(mint) => BlockSpecialEvent::Mint {
            mint_baking_reward: amount(mint.mint_baking_reward, (P, "mint.mintBakingReward"))?,
            mint_finalization_reward: amount(mint.mint_finalization_reward, (P, "mint.mintFinalizationReward"))?,
            mint_platform_development_charge: amount(
                mint.mint_platform_development_charge,
                (P, "mint.mintPlatformDevelopmentCharge"),
            )?,
            foundation_account: required_ident(mint.foundation_account, (P, "mint.foundationAccount"))?,
        },
        W::FinalizationRewards(rewards) => BlockSpecialEvent::FinalizationRewards {
            finalization_rewards: account_amounts(
                rewards.finalization_rewards,
                "BlockSpecialEvent.finalizationRewards.finalizationRewards",
            )?,
            remainder: amount(rewards.remainder, (P, "finalizationRewards.remainder"))?,
        },
        W::BlockReward(reward) => BlockSpecialEvent::BlockReward {
            transaction_fees: amount(reward.transaction_fees, (P, "blockReward.transactionFees"))?,
            old_gas_account: amount(reward.old_gas_account, (P, "blockReward.oldGasAccount"))?,
            new_gas_account: amount(reward.new_gas_account, (P, "blockReward.newGasAccount"))?,
            baker_reward: amount(reward.baker_reward, (P, "blockReward.bakerReward"))?,
            foundation_charge: amount(reward.foundation_charge, (P, "blockReward.foundationCharge"))?,
            baker: required_ident(reward.baker, (P, "blockReward.baker"))?,
            foundation_account: required_ident(reward.foundation_account, (P, "blockReward.foundationAccount"))?,
        },
        W::PaydayFoundationReward(reward) => BlockSpecialEvent::PaydayFoundationReward {
            foundation_account: required_ident(
                reward.foundation_account,
                (P, "paydayFoundationReward.foundationAccount"),
            )?,
            development_charge: amount(reward.development_charge, (P, "paydayFoundationReward.developmentCharge"))?,
        },
        W::PaydayAccountReward(reward) => BlockSpecialEvent::PaydayAccountReward {
            account: required_ident(reward.account, (P, "paydayAccountReward.account"))?,
            transaction_fees: amount(reward.transaction_fees, (P, "paydayAccountReward.transactionFees"))?,
            baker_reward: amount(reward.baker_reward, (P, "paydayAccountReward.bakerReward"))?,
            finalization_reward: amount(reward.finalization_reward, (P, "paydayAccountReward.finalizationReward"))?,
        },
        W::BlockAccrueReward(reward) => BlockSpecialEvent::BlockAccrueReward {
            transaction_fees: amount(reward.transaction_fees, (P, "blockAccrueReward.transactionFees"))?,
            old_gas_account: amount(reward.old_gas_account, (P, "blockAccrueReward.oldGasAccount"))?,
            new_gas_account: amount(reward.new_gas_account, (P, "blockAccrueReward.newGasAccount"))?,
            baker_reward: amount(reward.baker_reward, (P, "blockAccrueReward.bakerReward"))?,
            passive_reward: amount(reward.passive_reward, (P, "blockAccrueReward.passiveReward"))?,
            foundation_charge: amount(reward.foundation_charge, (P, "blockAccrueReward.foundationCharge"))?,
            baker: require(reward.baker, (P, "blockAccrueReward.baker"))?,
        },
        W::PaydayPoolReward(reward) => BlockSpecialEvent::PaydayPoolReward {
            pool_owner: reward.pool_owner,
            transaction_fees: amount(reward.transaction_fees, (P, "paydayPoolReward.transactionFees"))?,
            baker_reward: amount(reward.baker_reward, (P, "paydayPoolReward.bakerReward"))?,
            finalization_reward: amount(reward.finalization_reward, (P, "paydayPoolReward.finalizationReward"))?,
        },
        W::ValidatorSuspended(suspension) => BlockSpecialEvent::ValidatorSuspended {
            baker_id: require(suspension.baker_id, (P, "validatorSuspended.bakerId"))?,
            account: required_ident(suspension.account, (P, "validatorSuspended.account"))?,
        },
        W::ValidatorPrimedForSuspension(suspension) => BlockSpecialEvent::ValidatorPrimedForSuspension {
            baker_id: require(suspension.baker_id, (P, "validatorPrimedForSuspension.bakerId"))?,
            account: required_ident(suspension.account, (P, "validatorPrimedForSuspension.account"))?,
        },
        W::Unrecognized(_) => return Err(TranslationError::unknown_variant(P)),
    };
    Ok(event)
}
