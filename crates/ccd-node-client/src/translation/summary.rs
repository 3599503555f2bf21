//! Block item summaries, their effects and reject reasons, and item status.

use ccd_types::{
    AccountTransactionEffects, BakerEvent, BakerKeysEvent, BakerStakeUpdate, BlockItemStatus,
    BlockItemSummary, BlockItemSummaryDetails, BlockItemSummaryInBlock, CredentialType, DelegationEvent,
    EncryptedAmountRemoved, Energy, NewEncryptedAmount, NewRelease, RejectReason, TransactionType,
};

use super::common::{address, delegation_target, open_status, required_contract_address};
use super::contracts::{contract_version, trace_event};
use super::updates::update_payload;
use super::{
    amount, each, fraction, hex, ident, idents, require, required_hex, required_ident, timestamp,
    FieldPath, TranslationResult,
};
use crate::domain::TranslationError;
use crate::wire::summary::{self as wire, transaction_type as tt};

/// Why a transaction had no effect. Every known reason maps to exactly one
/// domain variant.
pub fn reject_reason(reason: wire::RejectReason) -> TranslationResult<RejectReason> {
    use wire::RejectReason as W;
    const P: &str = "RejectReason";

    let reason = match reason {
        W::ModuleNotWf(_) => RejectReason::ModuleNotWf,
        W::ModuleHashAlreadyExists(module) => {
            RejectReason::ModuleHashAlreadyExists(ident(&module, (P, "moduleHashAlreadyExists"))?)
        }
        W::InvalidAccountReference(account) => {
            RejectReason::InvalidAccountReference(ident(&account, (P, "invalidAccountReference"))?)
        }
        W::InvalidInitMethod(method) => RejectReason::InvalidInitMethod {
            module_ref: required_ident(method.module_ref, "RejectReason.invalidInitMethod.moduleRef")?,
            init_name: require(method.init_name, "RejectReason.invalidInitMethod.initName")?,
        },
        W::InvalidReceiveMethod(method) => RejectReason::InvalidReceiveMethod {
            module_ref: required_ident(method.module_ref, "RejectReason.invalidReceiveMethod.moduleRef")?,
            receive_name: require(method.receive_name, "RejectReason.invalidReceiveMethod.receiveName")?,
        },
        W::InvalidModuleReference(module) => {
            RejectReason::InvalidModuleReference(ident(&module, (P, "invalidModuleReference"))?)
        }
        W::InvalidContractAddress(contract) => {
            RejectReason::InvalidContractAddress(super::common::contract_address(contract))
        }
        W::RuntimeFailure(_) => RejectReason::RuntimeFailure,
        W::AmountTooLarge(too_large) => {
            const Q: &str = "RejectReason.amountTooLarge";
            RejectReason::AmountTooLarge {
                address: address(require(too_large.address, (Q, "address"))?, (Q, "address"))?,
                amount: amount(too_large.amount, (Q, "amount"))?,
            }
        }
        W::SerializationFailure(_) => RejectReason::SerializationFailure,
        W::OutOfEnergy(_) => RejectReason::OutOfEnergy,
        W::RejectedInit(rejected) => RejectReason::RejectedInit {
            reject_reason: rejected.reject_reason,
        },
        W::RejectedReceive(rejected) => {
            const Q: &str = "RejectReason.rejectedReceive";
            RejectReason::RejectedReceive {
                reject_reason: rejected.reject_reason,
                contract_address: required_contract_address(rejected.contract_address, (Q, "contractAddress"))?,
                receive_name: require(rejected.receive_name, (Q, "receiveName"))?,
                parameter: required_hex(rejected.parameter, (Q, "parameter"))?,
            }
        }
        W::InvalidProof(_) => RejectReason::InvalidProof,
        W::AlreadyABaker(baker) => RejectReason::AlreadyABaker(baker),
        W::NotABaker(account) => RejectReason::NotABaker(ident(&account, (P, "notABaker"))?),
        W::InsufficientBalanceForBakerStake(_) => RejectReason::InsufficientBalanceForBakerStake,
        W::StakeUnderMinimumThresholdForBaking(_) => RejectReason::StakeUnderMinimumThresholdForBaking,
        W::BakerInCooldown(_) => RejectReason::BakerInCooldown,
        W::DuplicateAggregationKey(key) => RejectReason::DuplicateAggregationKey(hex(key)),
        W::NonExistentCredentialId(_) => RejectReason::NonExistentCredentialId,
        W::KeyIndexAlreadyInUse(_) => RejectReason::KeyIndexAlreadyInUse,
        W::InvalidAccountThreshold(_) => RejectReason::InvalidAccountThreshold,
        W::InvalidCredentialKeySignThreshold(_) => RejectReason::InvalidCredentialKeySignThreshold,
        W::InvalidEncryptedAmountTransferProof(_) => RejectReason::InvalidEncryptedAmountTransferProof,
        W::InvalidTransferToPublicProof(_) => RejectReason::InvalidTransferToPublicProof,
        W::EncryptedAmountSelfTransfer(account) => {
            RejectReason::EncryptedAmountSelfTransfer(ident(&account, (P, "encryptedAmountSelfTransfer"))?)
        }
        W::InvalidIndexOnEncryptedTransfer(_) => RejectReason::InvalidIndexOnEncryptedTransfer,
        W::ZeroScheduledAmount(_) => RejectReason::ZeroScheduledAmount,
        W::NonIncreasingSchedule(_) => RejectReason::NonIncreasingSchedule,
        W::FirstScheduledReleaseExpired(_) => RejectReason::FirstScheduledReleaseExpired,
        W::ScheduledSelfTransfer(account) => {
            RejectReason::ScheduledSelfTransfer(ident(&account, (P, "scheduledSelfTransfer"))?)
        }
        W::InvalidCredentials(_) => RejectReason::InvalidCredentials,
        W::DuplicateCredIds(ids) => RejectReason::DuplicateCredIds(idents(ids.ids, (P, "duplicateCredIds"))?),
        W::NonExistentCredIds(ids) => {
            RejectReason::NonExistentCredIds(idents(ids.ids, (P, "nonExistentCredIds"))?)
        }
        W::RemoveFirstCredential(_) => RejectReason::RemoveFirstCredential,
        W::CredentialHolderDidNotSign(_) => RejectReason::CredentialHolderDidNotSign,
        W::NotAllowedMultipleCredentials(_) => RejectReason::NotAllowedMultipleCredentials,
        W::NotAllowedToReceiveEncrypted(_) => RejectReason::NotAllowedToReceiveEncrypted,
        W::NotAllowedToHandleEncrypted(_) => RejectReason::NotAllowedToHandleEncrypted,
        W::MissingBakerAddParameters(_) => RejectReason::MissingBakerAddParameters,
        W::FinalizationRewardCommissionNotInRange(_) => RejectReason::FinalizationRewardCommissionNotInRange,
        W::BakingRewardCommissionNotInRange(_) => RejectReason::BakingRewardCommissionNotInRange,
        W::TransactionFeeCommissionNotInRange(_) => RejectReason::TransactionFeeCommissionNotInRange,
        W::AlreadyADelegator(_) => RejectReason::AlreadyADelegator,
        W::InsufficientBalanceForDelegationStake(_) => RejectReason::InsufficientBalanceForDelegationStake,
        W::MissingDelegationAddParameters(_) => RejectReason::MissingDelegationAddParameters,
        W::InsufficientDelegationStake(_) => RejectReason::InsufficientDelegationStake,
        W::DelegatorInCooldown(_) => RejectReason::DelegatorInCooldown,
        W::NotADelegator(account) => RejectReason::NotADelegator(ident(&account, (P, "notADelegator"))?),
        W::DelegationTargetNotABaker(baker) => RejectReason::DelegationTargetNotABaker(baker),
        W::StakeOverMaximumThresholdForPool(_) => RejectReason::StakeOverMaximumThresholdForPool,
        W::PoolWouldBecomeOverDelegated(_) => RejectReason::PoolWouldBecomeOverDelegated,
        W::PoolClosed(_) => RejectReason::PoolClosed,
        W::Unrecognized(_) => return Err(TranslationError::unknown_variant(P)),
    };
    Ok(reason)
}

/// Transaction type code.
pub fn transaction_type(code: i32, path: impl FieldPath) -> TranslationResult<TransactionType> {
    let kind = match code {
        tt::DEPLOY_MODULE => TransactionType::DeployModule,
        tt::INIT_CONTRACT => TransactionType::InitContract,
        tt::UPDATE => TransactionType::Update,
        tt::TRANSFER => TransactionType::Transfer,
        tt::ADD_BAKER => TransactionType::AddBaker,
        tt::REMOVE_BAKER => TransactionType::RemoveBaker,
        tt::UPDATE_BAKER_STAKE => TransactionType::UpdateBakerStake,
        tt::UPDATE_BAKER_RESTAKE_EARNINGS => TransactionType::UpdateBakerRestakeEarnings,
        tt::UPDATE_BAKER_KEYS => TransactionType::UpdateBakerKeys,
        tt::UPDATE_CREDENTIAL_KEYS => TransactionType::UpdateCredentialKeys,
        tt::ENCRYPTED_AMOUNT_TRANSFER => TransactionType::EncryptedAmountTransfer,
        tt::TRANSFER_TO_ENCRYPTED => TransactionType::TransferToEncrypted,
        tt::TRANSFER_TO_PUBLIC => TransactionType::TransferToPublic,
        tt::TRANSFER_WITH_SCHEDULE => TransactionType::TransferWithSchedule,
        tt::UPDATE_CREDENTIALS => TransactionType::UpdateCredentials,
        tt::REGISTER_DATA => TransactionType::RegisterData,
        tt::TRANSFER_WITH_MEMO => TransactionType::TransferWithMemo,
        tt::ENCRYPTED_AMOUNT_TRANSFER_WITH_MEMO => TransactionType::EncryptedAmountTransferWithMemo,
        tt::TRANSFER_WITH_SCHEDULE_AND_MEMO => TransactionType::TransferWithScheduleAndMemo,
        tt::CONFIGURE_BAKER => TransactionType::ConfigureBaker,
        tt::CONFIGURE_DELEGATION => TransactionType::ConfigureDelegation,
        tt::TOKEN_UPDATE => TransactionType::TokenUpdate,
        other => return Err(TranslationError::unknown_enum_value(path.render(), other)),
    };
    Ok(kind)
}

fn baker_keys(keys: Option<wire::BakerKeysEvent>, path: &str) -> TranslationResult<BakerKeysEvent> {
    let keys = require(keys, path)?;
    Ok(BakerKeysEvent {
        baker_id: require(keys.baker_id, (path, "bakerId"))?,
        account: required_ident(keys.account, (path, "account"))?,
        sign_key: required_hex(keys.sign_key, (path, "signKey"))?,
        election_key: required_hex(keys.election_key, (path, "electionKey"))?,
        aggregation_key: required_hex(keys.aggregation_key, (path, "aggregationKey"))?,
    })
}

fn baker_event(event: wire::BakerEvent) -> TranslationResult<BakerEvent> {
    use wire::BakerEvent as W;
    const P: &str = "BakerEvent";

    let event = match event {
        W::BakerAdded(added) => BakerEvent::Added {
            keys: baker_keys(added.keys_event, "BakerEvent.bakerAdded.keysEvent")?,
            stake: amount(added.stake, "BakerEvent.bakerAdded.stake")?,
            restake_earnings: added.restake_earnings,
        },
        W::BakerRemoved(baker_id) => BakerEvent::Removed { baker_id },
        W::BakerStakeIncreased(change) => BakerEvent::StakeIncreased {
            baker_id: require(change.baker_id, (P, "bakerStakeIncreased.bakerId"))?,
            new_stake: amount(change.new_stake, (P, "bakerStakeIncreased.newStake"))?,
        },
        W::BakerStakeDecreased(change) => BakerEvent::StakeDecreased {
            baker_id: require(change.baker_id, (P, "bakerStakeDecreased.bakerId"))?,
            new_stake: amount(change.new_stake, (P, "bakerStakeDecreased.newStake"))?,
        },
        W::BakerRestakeEarningsUpdated(updated) => BakerEvent::RestakeEarningsUpdated {
            baker_id: require(updated.baker_id, (P, "bakerRestakeEarningsUpdated.bakerId"))?,
            restake_earnings: updated.restake_earnings,
        },
        W::BakerKeysUpdated(keys) => BakerEvent::KeysUpdated(baker_keys(Some(keys), "BakerEvent.bakerKeysUpdated")?),
        W::BakerSetOpenStatus(status) => BakerEvent::SetOpenStatus {
            baker_id: require(status.baker_id, (P, "bakerSetOpenStatus.bakerId"))?,
            open_status: open_status(status.open_status, (P, "bakerSetOpenStatus.openStatus"))?,
        },
        W::BakerSetMetadataUrl(url) => BakerEvent::SetMetadataUrl {
            baker_id: require(url.baker_id, (P, "bakerSetMetadataUrl.bakerId"))?,
            url: url.url,
        },
        W::BakerSetTransactionFeeCommission(set) => BakerEvent::SetTransactionFeeCommission {
            baker_id: require(set.baker_id, (P, "bakerSetTransactionFeeCommission.bakerId"))?,
            commission: fraction(
                set.transaction_fee_commission,
                (P, "bakerSetTransactionFeeCommission.transactionFeeCommission"),
            )?,
        },
        W::BakerSetBakingRewardCommission(set) => BakerEvent::SetBakingRewardCommission {
            baker_id: require(set.baker_id, (P, "bakerSetBakingRewardCommission.bakerId"))?,
            commission: fraction(
                set.baking_reward_commission,
                (P, "bakerSetBakingRewardCommission.bakingRewardCommission"),
            )?,
        },
        W::BakerSetFinalizationRewardCommission(set) => BakerEvent::SetFinalizationRewardCommission {
            baker_id: require(set.baker_id, (P, "bakerSetFinalizationRewardCommission.bakerId"))?,
            commission: fraction(
                set.finalization_reward_commission,
                (P, "bakerSetFinalizationRewardCommission.finalizationRewardCommission"),
            )?,
        },
        W::DelegationRemoved(removed) => BakerEvent::DelegationRemoved {
            delegator_id: require(removed.delegator_id, (P, "delegationRemoved.delegatorId"))?,
        },
        W::BakerSuspended(suspended) => BakerEvent::Suspended {
            baker_id: require(suspended.baker_id, (P, "bakerSuspended.bakerId"))?,
        },
        W::BakerResumed(resumed) => BakerEvent::Resumed {
            baker_id: require(resumed.baker_id, (P, "bakerResumed.bakerId"))?,
        },
        W::Unrecognized(_) => return Err(TranslationError::unknown_variant(P)),
    };
    Ok(event)
}

fn delegation_event(event: wire::DelegationEvent) -> TranslationResult<DelegationEvent> {
    use wire::DelegationEvent as W;
    const P: &str = "DelegationEvent";

    let event = match event {
        W::DelegationStakeIncreased(change) => DelegationEvent::StakeIncreased {
            delegator_id: require(change.delegator_id, (P, "delegationStakeIncreased.delegatorId"))?,
            new_stake: amount(change.new_stake, (P, "delegationStakeIncreased.newStake"))?,
        },
        W::DelegationStakeDecreased(change) => DelegationEvent::StakeDecreased {
            delegator_id: require(change.delegator_id, (P, "delegationStakeDecreased.delegatorId"))?,
            new_stake: amount(change.new_stake, (P, "delegationStakeDecreased.newStake"))?,
        },
        W::DelegationSetRestakeEarnings(set) => DelegationEvent::SetRestakeEarnings {
            delegator_id: require(set.delegator_id, (P, "delegationSetRestakeEarnings.delegatorId"))?,
            restake_earnings: set.restake_earnings,
        },
        W::DelegationSetDelegationTarget(set) => DelegationEvent::SetDelegationTarget {
            delegator_id: require(set.delegator_id, (P, "delegationSetDelegationTarget.delegatorId"))?,
            target: delegation_target(set.delegation_target, (P, "delegationSetDelegationTarget.delegationTarget"))?,
        },
        W::DelegationAdded(delegator_id) => DelegationEvent::Added { delegator_id },
        W::DelegationRemoved(delegator_id) => DelegationEvent::Removed { delegator_id },
        W::BakerRemoved(removed) => DelegationEvent::BakerRemoved {
            baker_id: require(removed.baker_id, (P, "bakerRemoved.bakerId"))?,
        },
        W::Unrecognized(_) => return Err(TranslationError::unknown_variant(P)),
    };
    Ok(event)
}

fn encrypted_amount_removed(
    removed: Option<wire::EncryptedAmountRemovedEvent>,
    path: &str,
) -> TranslationResult<EncryptedAmountRemoved> {
    let removed = require(removed, path)?;
    Ok(EncryptedAmountRemoved {
        new_amount: required_hex(removed.new_amount, (path, "newAmount"))?,
        input_amount: required_hex(removed.input_amount, (path, "inputAmount"))?,
        up_to_index: removed.up_to_index,
    })
}

/// Effects of an account transaction. Effects this client does not model,
/// such as token updates, are reported as unknown variants.
pub fn effects(effects: wire::AccountTransactionEffects) -> TranslationResult<AccountTransactionEffects> {
    use wire::AccountTransactionEffects as W;
    const P: &str = "AccountTransactionEffects";

    let effects = match effects {
        W::None(none) => AccountTransactionEffects::None {
            transaction_type: none
                .transaction_type
                .map(|code| transaction_type(code, (P, "none.transactionType")))
                .transpose()?,
            reject_reason: reject_reason(require(none.reject_reason, (P, "none.rejectReason"))?)?,
        },
        W::ModuleDeployed(module) => AccountTransactionEffects::ModuleDeployed {
            module_ref: ident(&module, (P, "moduleDeployed"))?,
        },
        W::ContractInitialized(init) => {
            const Q: &str = "AccountTransactionEffects.contractInitialized";
            AccountTransactionEffects::ContractInitialized {
                contract_version: contract_version(init.contract_version, (Q, "contractVersion"))?,
                origin_ref: required_ident(init.origin_ref, (Q, "originRef"))?,
                address: required_contract_address(init.address, (Q, "address"))?,
                amount: amount(init.amount, (Q, "amount"))?,
                init_name: require(init.init_name, (Q, "initName"))?,
                events: init.events.into_iter().map(hex).collect(),
            }
        }
        W::ContractUpdateIssued(issued) => AccountTransactionEffects::ContractUpdateIssued {
            effects: each(issued.effects, trace_event)?,
        },
        W::AccountTransfer(transfer) => AccountTransactionEffects::AccountTransfer {
            amount: amount(transfer.amount, (P, "accountTransfer.amount"))?,
            receiver: required_ident(transfer.receiver, (P, "accountTransfer.receiver"))?,
            memo: transfer.memo.map(hex),
        },
        W::BakerAdded(added) => AccountTransactionEffects::BakerAdded {
            keys: baker_keys(added.keys_event, "AccountTransactionEffects.bakerAdded.keysEvent")?,
            stake: amount(added.stake, (P, "bakerAdded.stake"))?,
            restake_earnings: added.restake_earnings,
        },
        W::BakerRemoved(baker_id) => AccountTransactionEffects::BakerRemoved { baker_id },
        W::BakerStakeUpdated(updated) => AccountTransactionEffects::BakerStakeUpdated(
            updated
                .update
                .map(|update| -> TranslationResult<_> {
                    Ok(BakerStakeUpdate {
                        baker_id: require(update.baker_id, (P, "bakerStakeUpdated.update.bakerId"))?,
                        new_stake: amount(update.new_stake, (P, "bakerStakeUpdated.update.newStake"))?,
                        increased: update.increased,
                    })
                })
                .transpose()?,
        ),
        W::BakerRestakeEarningsUpdated(updated) => AccountTransactionEffects::BakerRestakeEarningsUpdated {
            baker_id: require(updated.baker_id, (P, "bakerRestakeEarningsUpdated.bakerId"))?,
            restake_earnings: updated.restake_earnings,
        },
        W::BakerKeysUpdated(keys) => AccountTransactionEffects::BakerKeysUpdated(baker_keys(
            Some(keys),
            "AccountTransactionEffects.bakerKeysUpdated",
        )?),
        W::EncryptedAmountTransferred(transferred) => {
            const Q: &str = "AccountTransactionEffects.encryptedAmountTransferred";
            let added = require(transferred.added, (Q, "added"))?;
            AccountTransactionEffects::EncryptedAmountTransferred {
                removed: encrypted_amount_removed(transferred.removed, &format!("{Q}.removed"))?,
                added: NewEncryptedAmount {
                    receiver: required_ident(added.receiver, (Q, "added.receiver"))?,
                    new_index: added.new_index,
                    encrypted_amount: required_hex(added.encrypted_amount, (Q, "added.encryptedAmount"))?,
                },
                memo: transferred.memo.map(hex),
            }
        }
        W::TransferredToEncrypted(added) => AccountTransactionEffects::TransferredToEncrypted {
            account: required_ident(added.account, (P, "transferredToEncrypted.account"))?,
            new_amount: required_hex(added.new_amount, (P, "transferredToEncrypted.newAmount"))?,
            amount: amount(added.amount, (P, "transferredToEncrypted.amount"))?,
        },
        W::TransferredToPublic(transferred) => AccountTransactionEffects::TransferredToPublic {
            removed: encrypted_amount_removed(
                transferred.removed,
                "AccountTransactionEffects.transferredToPublic.removed",
            )?,
            amount: amount(transferred.amount, (P, "transferredToPublic.amount"))?,
        },
        W::TransferredWithSchedule(scheduled) => AccountTransactionEffects::TransferredWithSchedule {
            receiver: required_ident(scheduled.receiver, (P, "transferredWithSchedule.receiver"))?,
            amount: each(scheduled.amount, |release| {
                Ok(NewRelease {
                    timestamp: timestamp(release.timestamp, (P, "transferredWithSchedule.amount.timestamp"))?,
                    amount: amount(release.amount, (P, "transferredWithSchedule.amount.amount"))?,
                })
            })?,
            memo: scheduled.memo.map(hex),
        },
        W::CredentialKeysUpdated(cred_id) => AccountTransactionEffects::CredentialKeysUpdated {
            cred_id: ident(&cred_id, (P, "credentialKeysUpdated"))?,
        },
        W::CredentialsUpdated(updated) => AccountTransactionEffects::CredentialsUpdated {
            new_cred_ids: idents(updated.new_cred_ids, (P, "credentialsUpdated.newCredIds"))?,
            removed_cred_ids: idents(updated.removed_cred_ids, (P, "credentialsUpdated.removedCredIds"))?,
            new_threshold: require(updated.new_threshold, (P, "credentialsUpdated.newThreshold"))?,
        },
        W::DataRegistered(data) => AccountTransactionEffects::DataRegistered { data: hex(data) },
        W::BakerConfigured(configured) => AccountTransactionEffects::BakerConfigured {
            events: each(configured.events, baker_event)?,
        },
        W::DelegationConfigured(configured) => AccountTransactionEffects::DelegationConfigured {
            events: each(configured.events, delegation_event)?,
        },
        W::Unrecognized(_) => return Err(TranslationError::unknown_variant(P)),
    };
    Ok(effects)
}

/// Credential type code.
pub fn credential_type(code: i32, path: impl FieldPath) -> TranslationResult<CredentialType> {
    match code {
        wire::credential_type::INITIAL => Ok(CredentialType::Initial),
        wire::credential_type::NORMAL => Ok(CredentialType::Normal),
        other => Err(TranslationError::unknown_enum_value(path.render(), other)),
    }
}

fn details(details: wire::BlockItemSummaryDetails) -> TranslationResult<BlockItemSummaryDetails> {
    match details {
        wire::BlockItemSummaryDetails::AccountTransaction(tx) => Ok(BlockItemSummaryDetails::AccountTransaction {
            cost: amount(tx.cost, "BlockItemSummary.accountTransaction.cost")?,
            sender: required_ident(tx.sender, "BlockItemSummary.accountTransaction.sender")?,
            effects: effects(require(tx.effects, "BlockItemSummary.accountTransaction.effects")?)?,
        }),
        wire::BlockItemSummaryDetails::AccountCreation(creation) => Ok(BlockItemSummaryDetails::AccountCreation {
            credential_type: credential_type(
                creation.credential_type,
                "BlockItemSummary.accountCreation.credentialType",
            )?,
            address: required_ident(creation.address, "BlockItemSummary.accountCreation.address")?,
            reg_id: required_ident(creation.reg_id, "BlockItemSummary.accountCreation.regId")?,
        }),
        wire::BlockItemSummaryDetails::Update(update) => Ok(BlockItemSummaryDetails::Update {
            effective_time: timestamp(update.effective_time, "BlockItemSummary.update.effectiveTime")?,
            payload: update_payload(require(update.payload, "BlockItemSummary.update.payload")?)?,
        }),
        wire::BlockItemSummaryDetails::Unrecognized(_) => {
            Err(TranslationError::unknown_variant("BlockItemSummary.details"))
        }
    }
}

/// Outcome of a block item.
pub fn block_item_summary(summary: wire::BlockItemSummary) -> TranslationResult<BlockItemSummary> {
    Ok(BlockItemSummary {
        index: require(summary.index, "BlockItemSummary.index")?,
        energy_cost: Energy(require(summary.energy_cost, "BlockItemSummary.energyCost")?),
        hash: required_ident(summary.hash, "BlockItemSummary.hash")?,
        details: details(require(summary.details, "BlockItemSummary.details")?)?,
    })
}

fn summary_in_block(outcome: wire::BlockItemSummaryInBlock) -> TranslationResult<BlockItemSummaryInBlock> {
    Ok(BlockItemSummaryInBlock {
        block_hash: required_ident(outcome.block_hash, "BlockItemSummaryInBlock.blockHash")?,
        summary: block_item_summary(require(outcome.outcome, "BlockItemSummaryInBlock.outcome")?)?,
    })
}

/// Status of a block item.
pub fn block_item_status(status: wire::BlockItemStatus) -> TranslationResult<BlockItemStatus> {
    match status {
        wire::BlockItemStatus::Received(_) => Ok(BlockItemStatus::Received),
        wire::BlockItemStatus::Committed(committed) => {
            each(committed.outcomes, summary_in_block).map(BlockItemStatus::Committed)
        }
        wire::BlockItemStatus::Finalized(finalized) => {
            summary_in_block(require(finalized.outcome, "BlockItemStatus.finalized.outcome")?)
                .map(BlockItemStatus::Finalized)
        }
        wire::BlockItemStatus::Unrecognized(_) => Err(TranslationError::unknown_variant("BlockItemStatus")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TranslationErrorKind;
    use crate::wire::common::{Address as WireAddress, ContractAddress as WireContract};
    use crate::wire::{Bytes, Empty};
    use ccd_types::{Address, CcdAmount, ContractAddress};
    use serde_json::json;

    fn hash(byte: u8) -> Option<Bytes> {
        Some(Bytes(vec![byte; 32]))
    }

    #[test]
    fn test_amount_too_large_carries_contents() {
        let reason = reject_reason(wire::RejectReason::AmountTooLarge(wire::AmountTooLarge {
            address: Some(WireAddress::Contract(WireContract { index: 4, subindex: 0 })),
            amount: Some(17),
        }))
        .unwrap();
        assert_eq!(
            reason,
            RejectReason::AmountTooLarge {
                address: Address::Contract(ContractAddress::new(4, 0)),
                amount: CcdAmount::from_micro_ccd(17),
            }
        );
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["tag"], "AmountTooLarge");
        assert_eq!(json["contents"]["amount"], 17);
    }

    #[test]
    fn test_unit_reasons() {
        assert_eq!(
            reject_reason(wire::RejectReason::PoolClosed(Empty {})),
            Ok(RejectReason::PoolClosed)
        );
        assert_eq!(
            reject_reason(wire::RejectReason::DelegationTargetNotABaker(12)),
            Ok(RejectReason::DelegationTargetNotABaker(12))
        );
    }

    #[test]
    fn test_unknown_reject_reason() {
        let reason: wire::RejectReason = serde_json::from_value(json!({ "tokenHolderFailed": {} })).unwrap();
        let err = reject_reason(reason).unwrap_err();
        assert_eq!(err.path, "RejectReason");
        assert_eq!(err.kind, TranslationErrorKind::UnknownVariant);
    }

    #[test]
    fn test_token_effects_are_unknown() {
        let effects_value: wire::AccountTransactionEffects =
            serde_json::from_value(json!({ "tokenUpdateEffect": { "events": [] } })).unwrap();
        assert_eq!(
            effects(effects_value).unwrap_err().kind,
            TranslationErrorKind::UnknownVariant
        );
    }

    #[test]
    fn test_transaction_type_codes() {
        assert_eq!(transaction_type(3, "t"), Ok(TransactionType::Transfer));
        assert_eq!(transaction_type(21, "t"), Ok(TransactionType::TokenUpdate));
        assert_eq!(
            transaction_type(99, "t").unwrap_err().kind,
            TranslationErrorKind::UnknownEnumValue(99)
        );
    }

    fn transfer_summary() -> wire::BlockItemSummary {
        wire::BlockItemSummary {
            index: Some(0),
            energy_cost: Some(501),
            hash: hash(7),
            details: Some(wire::BlockItemSummaryDetails::AccountTransaction(
                wire::AccountTransactionDetails {
                    cost: Some(1_000),
                    sender: hash(1),
                    effects: Some(wire::AccountTransactionEffects::AccountTransfer(wire::AccountTransfer {
                        amount: Some(250),
                        receiver: hash(2),
                        memo: None,
                    })),
                },
            )),
        }
    }

    #[test]
    fn test_finalized_status() {
        let status = wire::BlockItemStatus::Finalized(wire::Finalized {
            outcome: Some(wire::BlockItemSummaryInBlock {
                block_hash: hash(9),
                outcome: Some(transfer_summary()),
            }),
        });
        let status = block_item_status(status).unwrap();
        let outcome = status.finalized().unwrap();
        assert_eq!(outcome.summary.energy_cost, Energy(501));
        assert!(outcome.summary.reject_reason().is_none());
        assert!(outcome.summary.sender().is_some());
    }

    #[test]
    fn test_rejected_transaction_summary() {
        let mut summary = transfer_summary();
        summary.details = Some(wire::BlockItemSummaryDetails::AccountTransaction(
            wire::AccountTransactionDetails {
                cost: Some(10),
                sender: hash(1),
                effects: Some(wire::AccountTransactionEffects::None(wire::NoEffects {
                    transaction_type: Some(3),
                    reject_reason: Some(wire::RejectReason::OutOfEnergy(Empty {})),
                })),
            },
        ));
        let summary = block_item_summary(summary).unwrap();
        assert_eq!(summary.reject_reason(), Some(&RejectReason::OutOfEnergy));
    }

    #[test]
    fn test_committed_status_lists_blocks() {
        let status = wire::BlockItemStatus::Committed(wire::Committed {
            outcomes: vec![
                wire::BlockItemSummaryInBlock {
                    block_hash: hash(3),
                    outcome: Some(transfer_summary()),
                },
                wire::BlockItemSummaryInBlock {
                    block_hash: hash(4),
                    outcome: Some(transfer_summary()),
                },
            ],
        });
        let BlockItemStatus::Committed(outcomes) = block_item_status(status).unwrap() else {
            panic!("expected committed");
        };
        assert_eq!(outcomes.len(), 2);
    }

    #[test]
    fn test_baker_configured_events() {
        let configured = wire::AccountTransactionEffects::BakerConfigured(wire::BakerConfigured {
            events: vec![
                wire::BakerEvent::BakerSetOpenStatus(wire::BakerSetOpenStatus {
                    baker_id: Some(4),
                    open_status: 2,
                }),
                wire::BakerEvent::BakerSuspended(wire::BakerIdEvent { baker_id: Some(4) }),
            ],
        });
        let AccountTransactionEffects::BakerConfigured { events } = effects(configured).unwrap() else {
            panic!("expected baker configured");
        };
        assert_eq!(events[1], BakerEvent::Suspended { baker_id: 4 });
    }

    #[test]
    fn test_account_creation_unknown_credential_type() {
        let summary = wire::BlockItemSummary {
            index: Some(1),
            energy_cost: Some(0),
            hash: hash(1),
            details: Some(wire::BlockItemSummaryDetails::AccountCreation(wire::AccountCreationDetails {
                credential_type: 5,
                address: hash(2),
                reg_id: Some(Bytes(vec![3; 48])),
            })),
        };
        let err = block_item_summary(summary).unwrap_err();
        assert_eq!(err.path, "BlockItemSummary.accountCreation.credentialType");
    }
}
