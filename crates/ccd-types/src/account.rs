//! # Accounts
//!
//! `AccountInfo` is a closed sum over staking roles. Fields specific to one
//! role live only on that variant; `Unknown` absorbs staking shapes this
//! library does not yet understand.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identifiers::{AccountAddress, CredentialRegistrationId, HexBytes, TransactionHash};
use crate::primitives::{AccountIndex, BakerId, CcdAmount, CommissionRates, Nonce, OpenStatus, Timestamp};

/// Encrypted balance of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountEncryptedAmount {
    /// Encrypted self amount.
    pub self_amount: HexBytes,
    /// Index of the first incoming amount.
    pub start_index: u64,
    /// Incoming encrypted amounts.
    pub incoming_amounts: Vec<HexBytes>,
    /// Aggregated amount, if any incoming amounts were aggregated.
    pub aggregated_amount: Option<HexBytes>,
    /// Number of aggregated amounts.
    pub num_aggregated: Option<u32>,
}

/// One scheduled release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Release time.
    pub timestamp: Timestamp,
    /// Released amount.
    pub amount: CcdAmount,
    /// Transactions that contributed to the release.
    pub transactions: Vec<TransactionHash>,
}

/// Locked amounts released over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountReleaseSchedule {
    /// Total still locked.
    pub total: CcdAmount,
    /// Pending releases.
    pub schedule: Vec<Release>,
}

/// State of a cooldown entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CooldownStatus {
    /// Cooling down, released at the end time.
    Cooldown,
    /// Waiting for the next pay day to start cooling down.
    PreCooldown,
    /// Waiting for the pay day after next.
    PrePreCooldown,
}

/// Stake in cooldown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Expected release time.
    pub end_time: Timestamp,
    /// Amount in cooldown.
    pub amount: CcdAmount,
    /// Cooldown stage.
    pub status: CooldownStatus,
}

/// Credential keys and signature threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPublicKeys {
    /// Ed25519 verify keys by index.
    pub keys: BTreeMap<u32, HexBytes>,
    /// Signatures required.
    pub threshold: u32,
}

/// Attribute disclosure policy of a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Credential creation month.
    pub created_at: NaiveDate,
    /// Credential expiry month.
    pub valid_to: NaiveDate,
    /// Revealed attributes by attribute tag.
    pub revealed_attributes: BTreeMap<u32, HexBytes>,
}

/// Credential deployed on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AccountCredential {
    /// Created directly by an identity provider.
    Initial {
        /// Identity provider.
        ip_identity: u32,
        /// Registration id.
        cred_id: CredentialRegistrationId,
        /// Keys.
        keys: CredentialPublicKeys,
        /// Disclosure policy.
        policy: Policy,
    },
    /// Deployed by the account holder.
    Normal {
        /// Identity provider.
        ip_identity: u32,
        /// Registration id.
        cred_id: CredentialRegistrationId,
        /// Keys.
        keys: CredentialPublicKeys,
        /// Disclosure policy.
        policy: Policy,
        /// Anonymity revocation threshold.
        ar_threshold: u32,
        /// Encrypted identity shares by anonymity revoker.
        ar_data: BTreeMap<u32, HexBytes>,
    },
}

/// Part of an account shared by every staking role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfoCommon {
    /// Canonical address.
    pub address: AccountAddress,
    /// Next nonce.
    pub nonce: Nonce,
    /// Public balance.
    pub amount: CcdAmount,
    /// Account index.
    pub index: AccountIndex,
    /// Credential signature threshold.
    pub threshold: u32,
    /// Encryption public key.
    pub encryption_key: HexBytes,
    /// Encrypted balance.
    pub encrypted_amount: AccountEncryptedAmount,
    /// Release schedule.
    pub release_schedule: AccountReleaseSchedule,
    /// Credentials by index.
    pub credentials: BTreeMap<u32, AccountCredential>,
    /// Stake in cooldown.
    pub cooldowns: Vec<Cooldown>,
    /// Balance not locked by stake, schedule or cooldown.
    pub available_balance: CcdAmount,
}

/// Pending change to a stake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakePendingChange {
    /// Stake is reduced.
    Reduce {
        /// Stake after the change.
        new_stake: CcdAmount,
        /// When the change takes effect.
        effective_time: Timestamp,
    },
    /// Stake is removed.
    Remove {
        /// When the change takes effect.
        effective_time: Timestamp,
    },
}

/// Pool configuration of a baker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakerPoolInfo {
    /// Delegation status.
    pub open_status: OpenStatus,
    /// Metadata URL.
    pub metadata_url: String,
    /// Commission rates.
    pub commission_rates: CommissionRates,
}

/// Baker details of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBakerDetails {
    /// Baker id.
    pub baker_id: BakerId,
    /// Whether rewards are restaked.
    pub restake_earnings: bool,
    /// Staked amount.
    pub staked_amount: CcdAmount,
    /// Election verify key.
    pub election_verify_key: HexBytes,
    /// Signature verify key.
    pub signature_verify_key: HexBytes,
    /// Aggregation verify key.
    pub aggregation_verify_key: HexBytes,
    /// Pending stake change.
    pub pending_change: Option<StakePendingChange>,
    /// Pool configuration, present from protocol 4.
    pub pool_info: Option<BakerPoolInfo>,
    /// Whether the baker is suspended.
    pub is_suspended: bool,
}

/// Target of a delegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelegationTarget {
    /// Passive delegation.
    Passive,
    /// A specific baker pool.
    Baker(BakerId),
}

/// Delegation details of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDelegationDetails {
    /// Whether rewards are restaked.
    pub restake_earnings: bool,
    /// Staked amount.
    pub staked_amount: CcdAmount,
    /// Delegation target.
    pub target: DelegationTarget,
    /// Pending stake change.
    pub pending_change: Option<StakePendingChange>,
}

/// Account state, tagged by staking role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountInfo {
    /// Not staking.
    Simple(AccountInfoCommon),
    /// Baker account.
    Baker {
        /// Shared part.
        common: AccountInfoCommon,
        /// Baker details.
        baker: AccountBakerDetails,
    },
    /// Delegator account.
    Delegator {
        /// Shared part.
        common: AccountInfoCommon,
        /// Delegation details.
        delegation: AccountDelegationDetails,
    },
    /// Staking information of a shape this library does not understand.
    Unknown(AccountInfoCommon),
}

impl AccountInfo {
    /// Fields shared by every variant.
    pub fn common(&self) -> &AccountInfoCommon {
        match self {
            Self::Simple(common) | Self::Unknown(common) => common,
            Self::Baker { common, .. } | Self::Delegator { common, .. } => common,
        }
    }

    /// Staked amount for bakers and delegators.
    pub fn staked_amount(&self) -> Option<CcdAmount> {
        match self {
            Self::Baker { baker, .. } => Some(baker.staked_amount),
            Self::Delegator { delegation, .. } => Some(delegation.staked_amount),
            Self::Simple(_) | Self::Unknown(_) => None,
        }
    }
}

/// Balance at the holder's disposal when the node does not report it:
/// the public balance minus the larger of the staked and the scheduled amount.
pub fn derive_available_balance(
    amount: CcdAmount,
    staked: Option<CcdAmount>,
    scheduled: CcdAmount,
) -> CcdAmount {
    let locked = staked.unwrap_or(CcdAmount::ZERO).max(scheduled);
    amount.saturating_sub(locked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ccd(micro: u64) -> CcdAmount {
        CcdAmount::from_micro_ccd(micro)
    }

    #[test]
    fn test_available_balance_uses_larger_lock() {
        assert_eq!(derive_available_balance(ccd(100), Some(ccd(30)), ccd(50)), ccd(50));
        assert_eq!(derive_available_balance(ccd(100), Some(ccd(70)), ccd(50)), ccd(30));
        assert_eq!(derive_available_balance(ccd(100), None, ccd(0)), ccd(100));
    }

    #[test]
    fn test_available_balance_saturates() {
        assert_eq!(derive_available_balance(ccd(10), Some(ccd(30)), ccd(0)), CcdAmount::ZERO);
    }
}
