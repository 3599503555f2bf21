//! Block item outcomes: reject reasons, baker and delegation events,
//! account transaction effects and item status.

use serde::{Deserialize, Serialize};

use super::common::{Address, AmountFraction, ContractAddress, DelegationTarget};
use super::contracts::ContractTraceElement;
use super::updates::UpdatePayload;
use super::{Bytes, Empty};

/// Init or receive method that does not exist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InvalidMethod {
    pub module_ref: Option<Bytes>,
    pub init_name: Option<String>,
    pub receive_name: Option<String>,
}

/// Amount exceeding the sender's balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AmountTooLarge {
    pub address: Option<Address>,
    pub amount: Option<u64>,
}

/// Init function rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct RejectedInit {
    pub reject_reason: i32,
}

/// Receive function rejection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct RejectedReceive {
    pub reject_reason: i32,
    pub contract_address: Option<ContractAddress>,
    pub receive_name: Option<String>,
    pub parameter: Option<Bytes>,
}

/// List of credential registration ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialRegistrationIds {
    /// Ids.
    pub ids: Vec<Bytes>,
}

/// Why a transaction had no effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum RejectReason {
    ModuleNotWf(Empty),
    ModuleHashAlreadyExists(Bytes),
    InvalidAccountReference(Bytes),
    InvalidInitMethod(InvalidMethod),
    InvalidReceiveMethod(InvalidMethod),
    InvalidModuleReference(Bytes),
    InvalidContractAddress(ContractAddress),
    RuntimeFailure(Empty),
    AmountTooLarge(AmountTooLarge),
    SerializationFailure(Empty),
    OutOfEnergy(Empty),
    RejectedInit(RejectedInit),
    RejectedReceive(RejectedReceive),
    InvalidProof(Empty),
    AlreadyABaker(u64),
    NotABaker(Bytes),
    InsufficientBalanceForBakerStake(Empty),
    StakeUnderMinimumThresholdForBaking(Empty),
    BakerInCooldown(Empty),
    DuplicateAggregationKey(Bytes),
    NonExistentCredentialId(Empty),
    KeyIndexAlreadyInUse(Empty),
    InvalidAccountThreshold(Empty),
    InvalidCredentialKeySignThreshold(Empty),
    InvalidEncryptedAmountTransferProof(Empty),
    InvalidTransferToPublicProof(Empty),
    EncryptedAmountSelfTransfer(Bytes),
    InvalidIndexOnEncryptedTransfer(Empty),
    ZeroScheduledAmount(Empty),
    NonIncreasingSchedule(Empty),
    FirstScheduledReleaseExpired(Empty),
    ScheduledSelfTransfer(Bytes),
    InvalidCredentials(Empty),
    DuplicateCredIds(CredentialRegistrationIds),
    NonExistentCredIds(CredentialRegistrationIds),
    RemoveFirstCredential(Empty),
    CredentialHolderDidNotSign(Empty),
    NotAllowedMultipleCredentials(Empty),
    NotAllowedToReceiveEncrypted(Empty),
    NotAllowedToHandleEncrypted(Empty),
    MissingBakerAddParameters(Empty),
    FinalizationRewardCommissionNotInRange(Empty),
    BakingRewardCommissionNotInRange(Empty),
    TransactionFeeCommissionNotInRange(Empty),
    AlreadyADelegator(Empty),
    InsufficientBalanceForDelegationStake(Empty),
    MissingDelegationAddParameters(Empty),
    InsufficientDelegationStake(Empty),
    DelegatorInCooldown(Empty),
    NotADelegator(Bytes),
    DelegationTargetNotABaker(u64),
    StakeOverMaximumThresholdForPool(Empty),
    PoolWouldBecomeOverDelegated(Empty),
    PoolClosed(Empty),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Baker keys registered or updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerKeysEvent {
    pub baker_id: Option<u64>,
    pub account: Option<Bytes>,
    pub sign_key: Option<Bytes>,
    pub election_key: Option<Bytes>,
    pub aggregation_key: Option<Bytes>,
}

/// Baker added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerAdded {
    pub keys_event: Option<BakerKeysEvent>,
    pub stake: Option<u64>,
    pub restake_earnings: bool,
}

/// Baker stake changed in one direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerStakeChanged {
    pub baker_id: Option<u64>,
    pub new_stake: Option<u64>,
}

/// Restake flag changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerRestakeEarningsUpdated {
    pub baker_id: Option<u64>,
    pub restake_earnings: bool,
}

/// Pool open status changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerSetOpenStatus {
    pub baker_id: Option<u64>,
    pub open_status: i32,
}

/// Pool metadata URL changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerSetMetadataUrl {
    pub baker_id: Option<u64>,
    pub url: String,
}

/// Transaction fee commission changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerSetTransactionFeeCommission {
    pub baker_id: Option<u64>,
    pub transaction_fee_commission: Option<AmountFraction>,
}

/// Baking reward commission changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerSetBakingRewardCommission {
    pub baker_id: Option<u64>,
    pub baking_reward_commission: Option<AmountFraction>,
}

/// Finalization reward commission changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerSetFinalizationRewardCommission {
    pub baker_id: Option<u64>,
    pub finalization_reward_commission: Option<AmountFraction>,
}

/// Event naming only a baker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerIdEvent {
    pub baker_id: Option<u64>,
}

/// Event naming only a delegator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct DelegatorIdEvent {
    pub delegator_id: Option<u64>,
}

/// Baker configuration event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum BakerEvent {
    BakerAdded(BakerAdded),
    BakerRemoved(u64),
    BakerStakeIncreased(BakerStakeChanged),
    BakerStakeDecreased(BakerStakeChanged),
    BakerRestakeEarningsUpdated(BakerRestakeEarningsUpdated),
    BakerKeysUpdated(BakerKeysEvent),
    BakerSetOpenStatus(BakerSetOpenStatus),
    BakerSetMetadataUrl(BakerSetMetadataUrl),
    BakerSetTransactionFeeCommission(BakerSetTransactionFeeCommission),
    BakerSetBakingRewardCommission(BakerSetBakingRewardCommission),
    BakerSetFinalizationRewardCommission(BakerSetFinalizationRewardCommission),
    DelegationRemoved(DelegatorIdEvent),
    BakerSuspended(BakerIdEvent),
    BakerResumed(BakerIdEvent),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Delegation stake changed in one direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct DelegationStakeChanged {
    pub delegator_id: Option<u64>,
    pub new_stake: Option<u64>,
}

/// Delegator restake flag changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct DelegationSetRestakeEarnings {
    pub delegator_id: Option<u64>,
    pub restake_earnings: bool,
}

/// Delegation target changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct DelegationSetDelegationTarget {
    pub delegator_id: Option<u64>,
    pub delegation_target: Option<DelegationTarget>,
}

/// Delegation configuration event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum DelegationEvent {
    DelegationStakeIncreased(DelegationStakeChanged),
    DelegationStakeDecreased(DelegationStakeChanged),
    DelegationSetRestakeEarnings(DelegationSetRestakeEarnings),
    DelegationSetDelegationTarget(DelegationSetDelegationTarget),
    DelegationAdded(u64),
    DelegationRemoved(u64),
    BakerRemoved(BakerIdEvent),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Transaction type codes.
pub mod transaction_type {
    #![allow(missing_docs)]
    pub const DEPLOY_MODULE: i32 = 0;
    pub const INIT_CONTRACT: i32 = 1;
    pub const UPDATE: i32 = 2;
    pub const TRANSFER: i32 = 3;
    pub const ADD_BAKER: i32 = 4;
    pub const REMOVE_BAKER: i32 = 5;
    pub const UPDATE_BAKER_STAKE: i32 = 6;
    pub const UPDATE_BAKER_RESTAKE_EARNINGS: i32 = 7;
    pub const UPDATE_BAKER_KEYS: i32 = 8;
    pub const UPDATE_CREDENTIAL_KEYS: i32 = 9;
    pub const ENCRYPTED_AMOUNT_TRANSFER: i32 = 10;
    pub const TRANSFER_TO_ENCRYPTED: i32 = 11;
    pub const TRANSFER_TO_PUBLIC: i32 = 12;
    pub const TRANSFER_WITH_SCHEDULE: i32 = 13;
    pub const UPDATE_CREDENTIALS: i32 = 14;
    pub const REGISTER_DATA: i32 = 15;
    pub const TRANSFER_WITH_MEMO: i32 = 16;
    pub const ENCRYPTED_AMOUNT_TRANSFER_WITH_MEMO: i32 = 17;
    pub const TRANSFER_WITH_SCHEDULE_AND_MEMO: i32 = 18;
    pub const CONFIGURE_BAKER: i32 = 19;
    pub const CONFIGURE_DELEGATION: i32 = 20;
    pub const TOKEN_UPDATE: i32 = 21;
}

/// Rejected transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NoEffects {
    pub transaction_type: Option<i32>,
    pub reject_reason: Option<RejectReason>,
}

/// Contract initialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ContractInitialized {
    pub contract_version: i32,
    pub origin_ref: Option<Bytes>,
    pub address: Option<ContractAddress>,
    pub amount: Option<u64>,
    pub init_name: Option<String>,
    pub events: Vec<Bytes>,
}

/// Contract update trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct ContractUpdateIssued {
    pub effects: Vec<ContractTraceElement>,
}

/// Plain transfer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AccountTransfer {
    pub amount: Option<u64>,
    pub receiver: Option<Bytes>,
    pub memo: Option<Bytes>,
}

/// Baker stake change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerStakeUpdatedData {
    pub baker_id: Option<u64>,
    pub new_stake: Option<u64>,
    pub increased: bool,
}

/// Baker stake update, absent when the stake did not change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct BakerStakeUpdated {
    pub update: Option<BakerStakeUpdatedData>,
}

/// Encrypted amounts consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EncryptedAmountRemovedEvent {
    pub account: Option<Bytes>,
    pub new_amount: Option<Bytes>,
    pub input_amount: Option<Bytes>,
    pub up_to_index: u64,
}

/// Encrypted amount received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NewEncryptedAmountEvent {
    pub receiver: Option<Bytes>,
    pub new_index: u64,
    pub encrypted_amount: Option<Bytes>,
}

/// Encrypted transfer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct EncryptedAmountTransferred {
    pub removed: Option<EncryptedAmountRemovedEvent>,
    pub added: Option<NewEncryptedAmountEvent>,
    pub memo: Option<Bytes>,
}

/// Public balance moved to the encrypted balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EncryptedSelfAmountAddedEvent {
    pub account: Option<Bytes>,
    pub new_amount: Option<Bytes>,
    pub amount: Option<u64>,
}

/// Encrypted balance moved to the public balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TransferredToPublic {
    pub removed: Option<EncryptedAmountRemovedEvent>,
    pub amount: Option<u64>,
}

/// Release in a new schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct NewRelease {
    pub timestamp: Option<i64>,
    pub amount: Option<u64>,
}

/// Transfer with a release schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct TransferredWithSchedule {
    pub receiver: Option<Bytes>,
    pub amount: Vec<NewRelease>,
    pub memo: Option<Bytes>,
}

/// Credentials added or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CredentialsUpdated {
    pub new_cred_ids: Vec<Bytes>,
    pub removed_cred_ids: Vec<Bytes>,
    pub new_threshold: Option<u32>,
}

/// Baker configuration events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct BakerConfigured {
    pub events: Vec<BakerEvent>,
}

/// Delegation configuration events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct DelegationConfigured {
    pub events: Vec<DelegationEvent>,
}

/// Effects of an account transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum AccountTransactionEffects {
    None(NoEffects),
    ModuleDeployed(Bytes),
    ContractInitialized(ContractInitialized),
    ContractUpdateIssued(ContractUpdateIssued),
    AccountTransfer(AccountTransfer),
    BakerAdded(BakerAdded),
    BakerRemoved(u64),
    BakerStakeUpdated(BakerStakeUpdated),
    BakerRestakeEarningsUpdated(BakerRestakeEarningsUpdated),
    BakerKeysUpdated(BakerKeysEvent),
    EncryptedAmountTransferred(EncryptedAmountTransferred),
    TransferredToEncrypted(EncryptedSelfAmountAddedEvent),
    TransferredToPublic(TransferredToPublic),
    TransferredWithSchedule(TransferredWithSchedule),
    CredentialKeysUpdated(Bytes),
    CredentialsUpdated(CredentialsUpdated),
    DataRegistered(Bytes),
    BakerConfigured(BakerConfigured),
    DelegationConfigured(DelegationConfigured),
    /// Unknown variant, including token effects.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Account transaction outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct AccountTransactionDetails {
    pub cost: Option<u64>,
    pub sender: Option<Bytes>,
    pub effects: Option<AccountTransactionEffects>,
}

/// Credential type codes.
pub mod credential_type {
    /// Initial credential.
    pub const INITIAL: i32 = 0;
    /// Normal credential.
    pub const NORMAL: i32 = 1;
}

/// Account created by a credential deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AccountCreationDetails {
    pub credential_type: i32,
    pub address: Option<Bytes>,
    pub reg_id: Option<Bytes>,
}

/// Chain update enqueued.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct UpdateDetails {
    pub effective_time: Option<i64>,
    pub payload: Option<UpdatePayload>,
}

/// Kind-specific part of a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum BlockItemSummaryDetails {
    AccountTransaction(AccountTransactionDetails),
    AccountCreation(AccountCreationDetails),
    Update(UpdateDetails),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Outcome of a block item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BlockItemSummary {
    pub index: Option<u64>,
    pub energy_cost: Option<u64>,
    pub hash: Option<Bytes>,
    pub details: Option<BlockItemSummaryDetails>,
}

/// Outcome in a specific block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BlockItemSummaryInBlock {
    pub block_hash: Option<Bytes>,
    pub outcome: Option<BlockItemSummary>,
}

/// Item committed to live blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Committed {
    pub outcomes: Vec<BlockItemSummaryInBlock>,
}

/// Item in a finalized block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Finalized {
    pub outcome: Option<BlockItemSummaryInBlock>,
}

/// Status of a block item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum BlockItemStatus {
    Received(Empty),
    Committed(Committed),
    Finalized(Finalized),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}
