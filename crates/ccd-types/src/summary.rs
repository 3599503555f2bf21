//! # Block Item Summaries
//!
//! Outcome of a block item (account transaction, credential deployment or
//! chain update) once it is part of a block, and the status of an item as
//! the node reports it.
//!
//! Events carry the sender implicitly: the account that triggered a baker or
//! delegation event is the `sender` of the enclosing account transaction.

use serde::{Deserialize, Serialize};

use crate::contracts::{ContractTraceEvent, ContractVersion};
use crate::identifiers::{
    AccountAddress, BlockHash, ContractAddress, CredentialRegistrationId, HexBytes,
    ModuleReference, TransactionHash,
};
use crate::account::DelegationTarget;
use crate::primitives::{BakerId, CcdAmount, DelegatorId, Energy, OpenStatus, Timestamp};
use crate::reject_reason::RejectReason;
use crate::updates::UpdatePayload;

/// Kind of an account transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Deploy a Wasm module.
    DeployModule,
    /// Create a contract instance.
    InitContract,
    /// Update a contract instance.
    Update,
    /// Simple transfer.
    Transfer,
    /// Add a baker (before protocol 4).
    AddBaker,
    /// Remove a baker (before protocol 4).
    RemoveBaker,
    /// Change baker stake (before protocol 4).
    UpdateBakerStake,
    /// Change baker restake flag (before protocol 4).
    UpdateBakerRestakeEarnings,
    /// Change baker keys (before protocol 4).
    UpdateBakerKeys,
    /// Change credential keys.
    UpdateCredentialKeys,
    /// Encrypted transfer.
    EncryptedAmountTransfer,
    /// Move public balance to encrypted balance.
    TransferToEncrypted,
    /// Move encrypted balance to public balance.
    TransferToPublic,
    /// Transfer with release schedule.
    TransferWithSchedule,
    /// Add or remove credentials.
    UpdateCredentials,
    /// Register data on chain.
    RegisterData,
    /// Simple transfer with memo.
    TransferWithMemo,
    /// Encrypted transfer with memo.
    EncryptedAmountTransferWithMemo,
    /// Scheduled transfer with memo.
    TransferWithScheduleAndMemo,
    /// Configure a baker (from protocol 4).
    ConfigureBaker,
    /// Configure a delegator (from protocol 4).
    ConfigureDelegation,
    /// Protocol level token operation.
    TokenUpdate,
}

/// Keys registered for a baker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakerKeysEvent {
    /// Baker id.
    pub baker_id: BakerId,
    /// Baker account.
    pub account: AccountAddress,
    /// Signature verify key.
    pub sign_key: HexBytes,
    /// Election verify key.
    pub election_key: HexBytes,
    /// Aggregation verify key.
    pub aggregation_key: HexBytes,
}

/// Effect on a baker, from a baker configuration transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BakerEvent {
    /// A baker was added.
    Added {
        /// Registered keys.
        keys: BakerKeysEvent,
        /// Initial stake.
        stake: CcdAmount,
        /// Whether rewards are restaked.
        restake_earnings: bool,
    },
    /// A baker was removed.
    Removed {
        /// Baker id.
        baker_id: BakerId,
    },
    /// Stake increased.
    StakeIncreased {
        /// Baker id.
        baker_id: BakerId,
        /// Stake after the change.
        new_stake: CcdAmount,
    },
    /// Stake decreased.
    StakeDecreased {
        /// Baker id.
        baker_id: BakerId,
        /// Stake after the change.
        new_stake: CcdAmount,
    },
    /// Restake flag changed.
    RestakeEarningsUpdated {
        /// Baker id.
        baker_id: BakerId,
        /// New flag.
        restake_earnings: bool,
    },
    /// Keys changed.
    KeysUpdated(BakerKeysEvent),
    /// Pool open status changed.
    SetOpenStatus {
        /// Baker id.
        baker_id: BakerId,
        /// New status.
        open_status: OpenStatus,
    },
    /// Pool metadata URL changed.
    SetMetadataUrl {
        /// Baker id.
        baker_id: BakerId,
        /// New URL.
        url: String,
    },
    /// Transaction fee commission changed.
    SetTransactionFeeCommission {
        /// Baker id.
        baker_id: BakerId,
        /// New commission.
        commission: f64,
    },
    /// Baking reward commission changed.
    SetBakingRewardCommission {
        /// Baker id.
        baker_id: BakerId,
        /// New commission.
        commission: f64,
    },
    /// Finalization reward commission changed.
    SetFinalizationRewardCommission {
        /// Baker id.
        baker_id: BakerId,
        /// New commission.
        commission: f64,
    },
    /// The account stopped delegating in order to become a baker.
    DelegationRemoved {
        /// Former delegator id.
        delegator_id: DelegatorId,
    },
    /// Baker suspended itself.
    Suspended {
        /// Baker id.
        baker_id: BakerId,
    },
    /// Baker resumed.
    Resumed {
        /// Baker id.
        baker_id: BakerId,
    },
}

/// Effect on a delegator, from a delegation configuration transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelegationEvent {
    /// Stake increased.
    StakeIncreased {
        /// Delegator id.
        delegator_id: DelegatorId,
        /// Stake after the change.
        new_stake: CcdAmount,
    },
    /// Stake decreased.
    StakeDecreased {
        /// Delegator id.
        delegator_id: DelegatorId,
        /// Stake after the change.
        new_stake: CcdAmount,
    },
    /// Restake flag changed.
    SetRestakeEarnings {
        /// Delegator id.
        delegator_id: DelegatorId,
        /// New flag.
        restake_earnings: bool,
    },
    /// Delegation target changed.
    SetDelegationTarget {
        /// Delegator id.
        delegator_id: DelegatorId,
        /// New target.
        target: DelegationTarget,
    },
    /// A delegator was added.
    Added {
        /// Delegator id.
        delegator_id: DelegatorId,
    },
    /// A delegator was removed.
    Removed {
        /// Delegator id.
        delegator_id: DelegatorId,
    },
    /// The account stopped baking in order to delegate.
    BakerRemoved {
        /// Former baker id.
        baker_id: BakerId,
    },
}

/// Stake change of a baker (before protocol 4).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakerStakeUpdate {
    /// Baker id.
    pub baker_id: BakerId,
    /// Stake after the change.
    pub new_stake: CcdAmount,
    /// Whether the stake went up.
    pub increased: bool,
}

/// Encrypted amounts consumed by a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedAmountRemoved {
    /// Remaining encrypted balance.
    pub new_amount: HexBytes,
    /// Encrypted amount that was consumed.
    pub input_amount: HexBytes,
    /// Incoming amounts up to this index were consumed.
    pub up_to_index: u64,
}

/// Encrypted amount received by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEncryptedAmount {
    /// Receiver.
    pub receiver: AccountAddress,
    /// Index of the new incoming amount.
    pub new_index: u64,
    /// The encrypted amount.
    pub encrypted_amount: HexBytes,
}

/// One release of a scheduled transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRelease {
    /// Release time.
    pub timestamp: Timestamp,
    /// Amount released.
    pub amount: CcdAmount,
}

/// What an account transaction did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccountTransactionEffects {
    /// The transaction was rejected.
    None {
        /// Kind of the rejected transaction, absent if it could not be parsed.
        transaction_type: Option<TransactionType>,
        /// Reason for rejection.
        reject_reason: RejectReason,
    },
    /// A module was deployed.
    ModuleDeployed {
        /// Module reference.
        module_ref: ModuleReference,
    },
    /// A contract instance was created.
    ContractInitialized {
        /// Runtime version.
        contract_version: ContractVersion,
        /// Source module.
        origin_ref: ModuleReference,
        /// New instance.
        address: ContractAddress,
        /// Initial balance.
        amount: CcdAmount,
        /// Init function name.
        init_name: String,
        /// Logged events.
        events: Vec<HexBytes>,
    },
    /// A contract instance was updated.
    ContractUpdateIssued {
        /// Execution trace.
        effects: Vec<ContractTraceEvent>,
    },
    /// Simple transfer.
    AccountTransfer {
        /// Amount.
        amount: CcdAmount,
        /// Receiver.
        receiver: AccountAddress,
        /// Attached memo.
        memo: Option<HexBytes>,
    },
    /// A baker was added (before protocol 4).
    BakerAdded {
        /// Registered keys.
        keys: BakerKeysEvent,
        /// Initial stake.
        stake: CcdAmount,
        /// Whether rewards are restaked.
        restake_earnings: bool,
    },
    /// A baker was removed (before protocol 4).
    BakerRemoved {
        /// Baker id.
        baker_id: BakerId,
    },
    /// Baker stake changed (before protocol 4). Absent when unchanged.
    BakerStakeUpdated(Option<BakerStakeUpdate>),
    /// Baker restake flag changed (before protocol 4).
    BakerRestakeEarningsUpdated {
        /// Baker id.
        baker_id: BakerId,
        /// New flag.
        restake_earnings: bool,
    },
    /// Baker keys changed (before protocol 4).
    BakerKeysUpdated(BakerKeysEvent),
    /// Encrypted transfer.
    EncryptedAmountTransferred {
        /// Consumed from the sender.
        removed: EncryptedAmountRemoved,
        /// Added to the receiver.
        added: NewEncryptedAmount,
        /// Attached memo.
        memo: Option<HexBytes>,
    },
    /// Public balance moved to the encrypted balance.
    TransferredToEncrypted {
        /// Account.
        account: AccountAddress,
        /// New encrypted self amount.
        new_amount: HexBytes,
        /// Amount moved.
        amount: CcdAmount,
    },
    /// Encrypted balance moved to the public balance.
    TransferredToPublic {
        /// Consumed encrypted amounts.
        removed: EncryptedAmountRemoved,
        /// Amount moved.
        amount: CcdAmount,
    },
    /// Transfer with a release schedule.
    TransferredWithSchedule {
        /// Receiver.
        receiver: AccountAddress,
        /// Releases.
        amount: Vec<NewRelease>,
        /// Attached memo.
        memo: Option<HexBytes>,
    },
    /// Credential keys changed.
    CredentialKeysUpdated {
        /// Credential.
        cred_id: CredentialRegistrationId,
    },
    /// Credentials added or removed.
    CredentialsUpdated {
        /// Added credentials.
        new_cred_ids: Vec<CredentialRegistrationId>,
        /// Removed credentials.
        removed_cred_ids: Vec<CredentialRegistrationId>,
        /// New account threshold.
        new_threshold: u32,
    },
    /// Data registered.
    DataRegistered {
        /// Registered data.
        data: HexBytes,
    },
    /// Baker configured (from protocol 4).
    BakerConfigured {
        /// Events in order.
        events: Vec<BakerEvent>,
    },
    /// Delegation configured (from protocol 4).
    DelegationConfigured {
        /// Events in order.
        events: Vec<DelegationEvent>,
    },
}

impl AccountTransactionEffects {
    /// Whether the transaction was rejected.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::None { .. })
    }
}

/// How an account was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialType {
    /// Created by an identity provider.
    Initial,
    /// Created by the account holder.
    Normal,
}

/// Outcome specific to the kind of block item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockItemSummaryDetails {
    /// Account transaction.
    AccountTransaction {
        /// Fee paid.
        cost: CcdAmount,
        /// Sender.
        sender: AccountAddress,
        /// Effects.
        effects: AccountTransactionEffects,
    },
    /// Credential deployment creating an account.
    AccountCreation {
        /// Credential type.
        credential_type: CredentialType,
        /// New account.
        address: AccountAddress,
        /// Registration id of the credential.
        reg_id: CredentialRegistrationId,
    },
    /// Chain update.
    Update {
        /// When the update takes effect.
        effective_time: Timestamp,
        /// The update.
        payload: UpdatePayload,
    },
}

/// Outcome of a block item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockItemSummary {
    /// Index within the block.
    pub index: u64,
    /// Energy consumed.
    pub energy_cost: Energy,
    /// Hash of the item.
    pub hash: TransactionHash,
    /// Kind-specific outcome.
    pub details: BlockItemSummaryDetails,
}

impl BlockItemSummary {
    /// Sender, for account transactions.
    pub fn sender(&self) -> Option<&AccountAddress> {
        match &self.details {
            BlockItemSummaryDetails::AccountTransaction { sender, .. } => Some(sender),
            _ => None,
        }
    }

    /// Reject reason, if this is a rejected account transaction.
    pub fn reject_reason(&self) -> Option<&RejectReason> {
        match &self.details {
            BlockItemSummaryDetails::AccountTransaction {
                effects: AccountTransactionEffects::None { reject_reason, .. },
                ..
            } => Some(reject_reason),
            _ => None,
        }
    }
}

/// A summary paired with the block it is in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockItemSummaryInBlock {
    /// Block.
    pub block_hash: BlockHash,
    /// Outcome in that block.
    pub summary: BlockItemSummary,
}

/// Status of a block item as seen by the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockItemStatus {
    /// Received, not yet in any block.
    Received,
    /// In one or more non-finalized blocks.
    Committed(Vec<BlockItemSummaryInBlock>),
    /// In a finalized block.
    Finalized(BlockItemSummaryInBlock),
}

impl BlockItemStatus {
    /// The finalized outcome, if any.
    pub fn finalized(&self) -> Option<&BlockItemSummaryInBlock> {
        match self {
            Self::Finalized(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Consume into the finalized outcome, if any.
    pub fn into_finalized(self) -> Option<BlockItemSummaryInBlock> {
        match self {
            Self::Finalized(outcome) => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(effects: AccountTransactionEffects) -> BlockItemSummary {
        BlockItemSummary {
            index: 0,
            energy_cost: Energy(501),
            hash: TransactionHash::new([3u8; 32]),
            details: BlockItemSummaryDetails::AccountTransaction {
                cost: CcdAmount::from_micro_ccd(100),
                sender: AccountAddress::new([1u8; 32]),
                effects,
            },
        }
    }

    #[test]
    fn test_reject_reason_only_for_rejected() {
        let rejected = summary(AccountTransactionEffects::None {
            transaction_type: Some(TransactionType::Transfer),
            reject_reason: RejectReason::OutOfEnergy,
        });
        assert_eq!(rejected.reject_reason(), Some(&RejectReason::OutOfEnergy));

        let ok = summary(AccountTransactionEffects::DataRegistered {
            data: HexBytes::new(vec![1, 2]),
        });
        assert!(ok.reject_reason().is_none());
        assert!(ok.sender().is_some());
    }

    #[test]
    fn test_status_finalized_accessor() {
        let outcome = BlockItemSummaryInBlock {
            block_hash: BlockHash::new([9u8; 32]),
            summary: summary(AccountTransactionEffects::DataRegistered {
                data: HexBytes::new(vec![]),
            }),
        };
        assert!(BlockItemStatus::Received.finalized().is_none());
        assert!(BlockItemStatus::Committed(vec![outcome.clone()]).finalized().is_none());
        let status = BlockItemStatus::Finalized(outcome.clone());
        assert_eq!(status.into_finalized(), Some(outcome));
    }
}
