//! # Tokenomics, Pools and Rewards

use serde::{Deserialize, Serialize};

use crate::account::{BakerPoolInfo, StakePendingChange};
use crate::identifiers::{AccountAddress, HexBytes};
use crate::primitives::{BakerId, CcdAmount, CommissionRates, ProtocolVersion, Timestamp};

/// Supply figures present in every reward status version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardStatusCommon {
    /// Protocol version.
    pub protocol_version: ProtocolVersion,
    /// Total CCD in existence.
    pub total_amount: CcdAmount,
    /// Total CCD in encrypted balances.
    pub total_encrypted_amount: CcdAmount,
    /// Baking reward account.
    pub baking_reward_account: CcdAmount,
    /// Finalization reward account.
    pub finalization_reward_account: CcdAmount,
    /// GAS account.
    pub gas_account: CcdAmount,
}

/// Tokenomics of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "version")]
pub enum RewardStatus {
    /// Before protocol 4.
    V0(RewardStatusCommon),
    /// From protocol 4, with pay days.
    V1 {
        /// Supply figures.
        common: RewardStatusCommon,
        /// Foundation share of transaction rewards.
        foundation_transaction_rewards: CcdAmount,
        /// Next pay day.
        next_payday_time: Timestamp,
        /// Mint rate at the next pay day.
        next_payday_mint_rate: f64,
        /// Total staked capital.
        total_staked_capital: CcdAmount,
    },
}

impl RewardStatus {
    /// Supply figures.
    pub fn common(&self) -> &RewardStatusCommon {
        match self {
            Self::V0(common) | Self::V1 { common, .. } => common,
        }
    }
}

/// Pending change to a baker pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BakerPoolPendingChange {
    /// No change.
    NoChange,
    /// Equity capital is reduced.
    ReduceBakerCapital {
        /// Equity after the change.
        baker_equity_capital: CcdAmount,
        /// When the change takes effect.
        effective_time: Timestamp,
    },
    /// The pool is closed.
    RemovePool {
        /// When the change takes effect.
        effective_time: Timestamp,
    },
}

/// Status of a pool in the current reward period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPaydayStatus {
    /// Blocks baked this period.
    pub blocks_baked: u64,
    /// Whether the baker took part in finalization.
    pub finalization_live: bool,
    /// Transaction fees earned.
    pub transaction_fees_earned: CcdAmount,
    /// Effective stake.
    pub effective_stake: CcdAmount,
    /// Lottery power.
    pub lottery_power: f64,
    /// Equity capital.
    pub baker_equity_capital: CcdAmount,
    /// Delegated capital.
    pub delegated_capital: CcdAmount,
    /// Commission rates.
    pub commission_rates: CommissionRates,
    /// Whether the baker will be suspended at the next snapshot.
    pub is_primed_for_suspension: bool,
    /// Rounds missed this period.
    pub missed_rounds: u64,
}

/// Status of a baker pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakerPoolStatus {
    /// Baker id.
    pub baker_id: BakerId,
    /// Baker account.
    pub baker_address: AccountAddress,
    /// Equity capital, absent once the pool is removed.
    pub baker_equity_capital: Option<CcdAmount>,
    /// Delegated capital, absent once the pool is removed.
    pub delegated_capital: Option<CcdAmount>,
    /// Maximum delegated capital, absent once the pool is removed.
    pub delegated_capital_cap: Option<CcdAmount>,
    /// Pool configuration.
    pub pool_info: Option<BakerPoolInfo>,
    /// Pending change.
    pub baker_stake_pending_change: BakerPoolPendingChange,
    /// Current reward period status, absent if not a baker this period.
    pub current_payday_status: Option<CurrentPaydayStatus>,
    /// Total capital of all pools.
    pub all_pool_total_capital: CcdAmount,
    /// Whether the baker is suspended.
    pub is_suspended: bool,
}

/// Status of passive delegation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveDelegationStatus {
    /// Delegated capital.
    pub delegated_capital: CcdAmount,
    /// Commission rates.
    pub commission_rates: CommissionRates,
    /// Transaction fees earned this period.
    pub current_payday_transaction_fees_earned: CcdAmount,
    /// Delegated capital this period.
    pub current_payday_delegated_capital: CcdAmount,
    /// Total capital of all pools.
    pub all_pool_total_capital: CcdAmount,
}

/// Delegator of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatorInfo {
    /// Delegator account.
    pub account: AccountAddress,
    /// Stake.
    pub stake: CcdAmount,
    /// Pending stake change.
    pub pending_change: Option<StakePendingChange>,
}

/// Delegator of a pool in the current reward period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegatorRewardPeriodInfo {
    /// Delegator account.
    pub account: AccountAddress,
    /// Stake.
    pub stake: CcdAmount,
}

/// Baker keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakerInfo {
    /// Baker id.
    pub baker_id: BakerId,
    /// Election verify key.
    pub election_key: HexBytes,
    /// Signature verify key.
    pub signature_key: HexBytes,
    /// Aggregation verify key.
    pub aggregation_key: HexBytes,
}

/// Baker in the current reward period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakerRewardPeriodInfo {
    /// Keys.
    pub baker: BakerInfo,
    /// Effective stake.
    pub effective_stake: CcdAmount,
    /// Commission rates.
    pub commission_rates: CommissionRates,
    /// Equity capital.
    pub equity_capital: CcdAmount,
    /// Delegated capital.
    pub delegated_capital: CcdAmount,
    /// Whether the baker is a finalizer.
    pub is_finalizer: bool,
}

/// Amount paid to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAmount {
    /// Account.
    pub account: AccountAddress,
    /// Amount.
    pub amount: CcdAmount,
}

/// Event produced by the block itself rather than by a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockSpecialEvent {
    /// Baking rewards paid (before protocol 4).
    BakingRewards {
        /// Per baker account.
        baking_rewards: Vec<AccountAmount>,
        /// Left in the baking reward account.
        remainder: CcdAmount,
    },
    /// Minting.
    Mint {
        /// Minted to the baking reward account.
        mint_baking_reward: CcdAmount,
        /// Minted to the finalization reward account.
        mint_finalization_reward: CcdAmount,
        /// Minted to the foundation.
        mint_platform_development_charge: CcdAmount,
        /// Foundation account.
        foundation_account: AccountAddress,
    },
    /// Finalization rewards paid (before protocol 4).
    FinalizationRewards {
        /// Per finalizer account.
        finalization_rewards: Vec<AccountAmount>,
        /// Left in the finalization reward account.
        remainder: CcdAmount,
    },
    /// Block reward (before protocol 4).
    BlockReward {
        /// Transaction fees in the block.
        transaction_fees: CcdAmount,
        /// GAS account before.
        old_gas_account: CcdAmount,
        /// GAS account after.
        new_gas_account: CcdAmount,
        /// Paid to the baker.
        baker_reward: CcdAmount,
        /// Paid to the foundation.
        foundation_charge: CcdAmount,
        /// Baker account.
        baker: AccountAddress,
        /// Foundation account.
        foundation_account: AccountAddress,
    },
    /// Foundation reward at a pay day.
    PaydayFoundationReward {
        /// Foundation account.
        foundation_account: AccountAddress,
        /// Amount.
        development_charge: CcdAmount,
    },
    /// Account reward at a pay day.
    PaydayAccountReward {
        /// Account.
        account: AccountAddress,
        /// Transaction fee reward.
        transaction_fees: CcdAmount,
        /// Baking reward.
        baker_reward: CcdAmount,
        /// Finalization reward.
        finalization_reward: CcdAmount,
    },
    /// Rewards accrued by a block (from protocol 4).
    BlockAccrueReward {
        /// Transaction fees in the block.
        transaction_fees: CcdAmount,
        /// GAS account before.
        old_gas_account: CcdAmount,
        /// GAS account after.
        new_gas_account: CcdAmount,
        /// Accrued to the baker pool.
        baker_reward: CcdAmount,
        /// Accrued to passive delegation.
        passive_reward: CcdAmount,
        /// Accrued to the foundation.
        foundation_charge: CcdAmount,
        /// Baker.
        baker: BakerId,
    },
    /// Pool reward at a pay day.
    PaydayPoolReward {
        /// Pool owner, absent for passive delegation.
        pool_owner: Option<BakerId>,
        /// Transaction fee reward.
        transaction_fees: CcdAmount,
        /// Baking reward.
        baker_reward: CcdAmount,
        /// Finalization reward.
        finalization_reward: CcdAmount,
    },
    /// A validator was suspended.
    ValidatorSuspended {
        /// Baker id.
        baker_id: BakerId,
        /// Baker account.
        account: AccountAddress,
    },
    /// A validator will be suspended at the next snapshot.
    ValidatorPrimedForSuspension {
        /// Baker id.
        baker_id: BakerId,
        /// Baker account.
        account: AccountAddress,
    },
}
