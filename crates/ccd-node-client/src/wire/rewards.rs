//! Tokenomics, pool and reward messages.

use serde::{Deserialize, Serialize};

use super::account::BakerInfo;
use super::common::{BakerPoolInfo, CommissionRates, ProtocolVersionCode, StakePendingChange};
use super::Bytes;

/// Reward status up to protocol 3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TokenomicsV0 {
    pub total_amount: Option<u64>,
    pub total_encrypted_amount: Option<u64>,
    pub baking_reward_account: Option<u64>,
    pub finalization_reward_account: Option<u64>,
    pub gas_account: Option<u64>,
    pub protocol_version: ProtocolVersionCode,
}

/// Reward status from protocol 4.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TokenomicsV1 {
    pub total_amount: Option<u64>,
    pub total_encrypted_amount: Option<u64>,
    pub baking_reward_account: Option<u64>,
    pub finalization_reward_account: Option<u64>,
    pub gas_account: Option<u64>,
    pub foundation_transaction_rewards: Option<u64>,
    pub next_payday_time: Option<i64>,
    pub next_payday_mint_rate: Option<super::common::MintRate>,
    pub total_staked_capital: Option<u64>,
    pub protocol_version: ProtocolVersionCode,
}

/// Reward status by version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum TokenomicsInfo {
    V0(TokenomicsV0),
    V1(TokenomicsV1),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Equity capital reduction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PoolReduce {
    pub reduced_equity_capital: Option<u64>,
    pub effective_time: Option<i64>,
}

/// Pool removal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PoolRemove {
    pub effective_time: Option<i64>,
}

/// Pending change to a pool's equity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum PoolPendingChange {
    Reduce(PoolReduce),
    Remove(PoolRemove),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Pool status in the current pay day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PoolCurrentPaydayInfo {
    pub blocks_baked: u64,
    pub finalization_live: bool,
    pub transaction_fees_earned: Option<u64>,
    pub effective_stake: Option<u64>,
    pub lottery_power: f64,
    pub baker_equity_capital: Option<u64>,
    pub delegated_capital: Option<u64>,
    pub commission_rates: Option<CommissionRates>,
    pub is_primed_for_suspension: Option<bool>,
    pub missed_rounds: Option<u64>,
}

/// Baker pool status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PoolInfoResponse {
    pub baker: Option<u64>,
    pub address: Option<Bytes>,
    pub equity_capital: Option<u64>,
    pub delegated_capital: Option<u64>,
    pub delegated_capital_cap: Option<u64>,
    pub pool_info: Option<BakerPoolInfo>,
    pub equity_pending_change: Option<PoolPendingChange>,
    pub current_payday_info: Option<PoolCurrentPaydayInfo>,
    pub all_pool_total_capital: Option<u64>,
    pub is_suspended: Option<bool>,
}

/// Passive delegation status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PassiveDelegationInfo {
    pub delegated_capital: Option<u64>,
    pub commission_rates: Option<CommissionRates>,
    pub current_payday_transaction_fees_earned: Option<u64>,
    pub current_payday_delegated_capital: Option<u64>,
    pub all_pool_total_capital: Option<u64>,
}

/// Delegator of a pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct DelegatorInfo {
    pub account: Option<Bytes>,
    pub stake: Option<u64>,
    pub pending_change: Option<StakePendingChange>,
}

/// Delegator fixed for a reward period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct DelegatorRewardPeriodInfo {
    pub account: Option<Bytes>,
    pub stake: Option<u64>,
}

/// Baker fixed for a reward period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerRewardPeriodInfo {
    pub baker: Option<BakerInfo>,
    pub effective_stake: Option<u64>,
    pub commission_rates: Option<CommissionRates>,
    pub equity_capital: Option<u64>,
    pub delegated_capital: Option<u64>,
    pub is_finalizer: bool,
}

/// Amount paid to an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AccountAmountsEntry {
    pub account: Option<Bytes>,
    pub amount: Option<u64>,
}

/// Amounts paid to accounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AccountAmounts {
    pub entries: Vec<AccountAmountsEntry>,
}

/// Baking rewards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakingRewards {
    pub baker_rewards: Option<AccountAmounts>,
    pub remainder: Option<u64>,
}

/// Minting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Mint {
    pub mint_baking_reward: Option<u64>,
    pub mint_finalization_reward: Option<u64>,
    pub mint_platform_development_charge: Option<u64>,
    pub foundation_account: Option<Bytes>,
}

/// Finalization rewards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct FinalizationRewards {
    pub finalization_rewards: Option<AccountAmounts>,
    pub remainder: Option<u64>,
}

/// Block reward up to protocol 3.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BlockReward {
    pub transaction_fees: Option<u64>,
    pub old_gas_account: Option<u64>,
    pub new_gas_account: Option<u64>,
    pub baker_reward: Option<u64>,
    pub foundation_charge: Option<u64>,
    pub baker: Option<Bytes>,
    pub foundation_account: Option<Bytes>,
}

/// Foundation pay day reward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PaydayFoundationReward {
    pub foundation_account: Option<Bytes>,
    pub development_charge: Option<u64>,
}

/// Account pay day reward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PaydayAccountReward {
    pub account: Option<Bytes>,
    pub transaction_fees: Option<u64>,
    pub baker_reward: Option<u64>,
    pub finalization_reward: Option<u64>,
}

/// Rewards accrued by a block from protocol 4.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BlockAccrueReward {
    pub transaction_fees: Option<u64>,
    pub old_gas_account: Option<u64>,
    pub new_gas_account: Option<u64>,
    pub baker_reward: Option<u64>,
    pub passive_reward: Option<u64>,
    pub foundation_charge: Option<u64>,
    pub baker: Option<u64>,
}

/// Pool pay day reward. No pool owner means passive delegation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PaydayPoolReward {
    pub pool_owner: Option<u64>,
    pub transaction_fees: Option<u64>,
    pub baker_reward: Option<u64>,
    pub finalization_reward: Option<u64>,
}

/// Validator suspension event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ValidatorSuspension {
    pub baker_id: Option<u64>,
    pub account: Option<Bytes>,
}

/// Event emitted by the chain itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum BlockSpecialEvent {
    BakingRewards(BakingRewards),
    Mint(Mint),
    FinalizationRewards(FinalizationRewards),
    BlockReward(BlockReward),
    PaydayFoundationReward(PaydayFoundationReward),
    PaydayAccountReward(PaydayAccountReward),
    BlockAccrueReward(BlockAccrueReward),
    PaydayPoolReward(PaydayPoolReward),
    ValidatorSuspended(ValidatorSuspension),
    ValidatorPrimedForSuspension(ValidatorSuspension),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}
