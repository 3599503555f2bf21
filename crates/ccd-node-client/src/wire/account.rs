//! Account messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::{BakerPoolInfo, DelegationTarget, StakePendingChange};
use super::Bytes;

/// Encrypted balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncryptedBalance {
    /// Encrypted self amount.
    pub self_amount: Option<Bytes>,
    /// Index of the first incoming amount.
    pub start_index: u64,
    /// Aggregated amount.
    pub aggregated_amount: Option<Bytes>,
    /// Number of aggregated amounts.
    pub num_aggregated: Option<u32>,
    /// Incoming amounts.
    pub incoming_amounts: Vec<Bytes>,
}

/// One scheduled release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Release {
    /// Release time (ms).
    pub timestamp: Option<i64>,
    /// Amount.
    pub amount: Option<u64>,
    /// Contributing transactions.
    pub transactions: Vec<Bytes>,
}

/// Release schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseSchedule {
    /// Total locked.
    pub total: Option<u64>,
    /// Releases.
    pub schedules: Vec<Release>,
}

/// Cooldown status codes.
pub mod cooldown_status {
    /// Cooling down.
    pub const COOLDOWN: i32 = 0;
    /// Waiting for the next pay day.
    pub const PRE_COOLDOWN: i32 = 1;
    /// Waiting for the pay day after next.
    pub const PRE_PRE_COOLDOWN: i32 = 2;
}

/// Stake in cooldown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Cooldown {
    /// End time (ms).
    pub end_time: Option<i64>,
    /// Amount.
    pub amount: Option<u64>,
    /// Status code.
    pub status: i32,
}

/// Year and month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearMonth {
    /// Year.
    pub year: u32,
    /// Month, 1 to 12.
    pub month: u32,
}

/// Credential policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Policy {
    /// Creation month.
    pub created_at: Option<YearMonth>,
    /// Expiry month.
    pub valid_to: Option<YearMonth>,
    /// Revealed attributes by tag.
    pub attributes: BTreeMap<u32, Bytes>,
}

/// Account verify key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountVerifyKey {
    /// Ed25519 key.
    Ed25519Key(Bytes),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Credential keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialPublicKeys {
    /// Keys by index.
    pub keys: BTreeMap<u32, AccountVerifyKey>,
    /// Threshold.
    pub threshold: Option<u32>,
}

/// Initial credential.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InitialCredentialValues {
    /// Keys.
    pub keys: Option<CredentialPublicKeys>,
    /// Registration id.
    pub cred_id: Option<Bytes>,
    /// Identity provider.
    pub ip_id: Option<u32>,
    /// Policy.
    pub policy: Option<Policy>,
}

/// Anonymity revocation data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChainArData {
    /// Encrypted share of the credential holder id.
    pub enc_id_cred_pub_share: Bytes,
}

/// Normal credential.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NormalCredentialValues {
    /// Keys.
    pub keys: Option<CredentialPublicKeys>,
    /// Registration id.
    pub cred_id: Option<Bytes>,
    /// Identity provider.
    pub ip_id: Option<u32>,
    /// Policy.
    pub policy: Option<Policy>,
    /// Anonymity revocation threshold.
    pub ar_threshold: Option<u32>,
    /// Revocation data by anonymity revoker.
    pub ar_data: BTreeMap<u32, ChainArData>,
}

/// Credential values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CredentialValues {
    /// Initial credential.
    Initial(InitialCredentialValues),
    /// Normal credential.
    Normal(NormalCredentialValues),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Credential on an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountCredential {
    /// Values.
    pub credential_values: Option<CredentialValues>,
}

/// Baker keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BakerInfo {
    /// Baker id.
    pub baker_id: Option<u64>,
    /// Election key.
    pub election_key: Option<Bytes>,
    /// Signature key.
    pub signature_key: Option<Bytes>,
    /// Aggregation key.
    pub aggregation_key: Option<Bytes>,
}

/// Baker staking details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BakerStakingInfo {
    /// Staked amount.
    pub staked_amount: Option<u64>,
    /// Restake flag.
    pub restake_earnings: bool,
    /// Keys.
    pub baker_info: Option<BakerInfo>,
    /// Pending change.
    pub pending_change: Option<StakePendingChange>,
    /// Pool configuration.
    pub pool_info: Option<BakerPoolInfo>,
    /// Suspension flag.
    pub is_suspended: bool,
}

/// Delegator staking details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DelegatorStakingInfo {
    /// Staked amount.
    pub staked_amount: Option<u64>,
    /// Restake flag.
    pub restake_earnings: bool,
    /// Target.
    pub target: Option<DelegationTarget>,
    /// Pending change.
    pub pending_change: Option<StakePendingChange>,
}

/// Staking role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StakingInfo {
    /// Baker.
    Baker(BakerStakingInfo),
    /// Delegator.
    Delegator(DelegatorStakingInfo),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Account state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountInfo {
    /// Next nonce.
    pub sequence_number: Option<u64>,
    /// Public balance.
    pub amount: Option<u64>,
    /// Release schedule.
    pub schedule: Option<ReleaseSchedule>,
    /// Credentials by index.
    pub creds: BTreeMap<u32, AccountCredential>,
    /// Signature threshold.
    pub threshold: Option<u32>,
    /// Encrypted balance.
    pub encrypted_balance: Option<EncryptedBalance>,
    /// Encryption key.
    pub encryption_key: Option<Bytes>,
    /// Account index.
    pub index: Option<u64>,
    /// Staking role, absent when not staking.
    pub stake: Option<StakingInfo>,
    /// Address bytes.
    pub address: Option<Bytes>,
    /// Cooldowns.
    pub cooldowns: Vec<Cooldown>,
    /// Available balance, absent on older nodes.
    pub available_balance: Option<u64>,
}

/// Next nonce of an account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NextAccountSequenceNumber {
    /// Next nonce.
    pub sequence_number: Option<u64>,
    /// Whether all transactions are finalized.
    pub all_final: bool,
}

/// Global cryptographic parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CryptographicParameters {
    /// Genesis string.
    pub genesis_string: String,
    /// Bulletproof generators.
    pub bulletproof_generators: Bytes,
    /// On-chain commitment key.
    pub on_chain_commitment_key: Bytes,
}
