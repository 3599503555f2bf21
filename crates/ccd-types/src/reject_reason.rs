//! # Reject Reasons
//!
//! Why a transaction was included in a block but had no effect.

use serde::{Deserialize, Serialize};

use crate::identifiers::{
    AccountAddress, Address, ContractAddress, CredentialRegistrationId, HexBytes, ModuleReference,
};
use crate::primitives::{BakerId, CcdAmount};

/// Reason a transaction was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "contents")]
pub enum RejectReason {
    /// Module failed validation.
    ModuleNotWf,
    /// A module with this reference already exists.
    ModuleHashAlreadyExists(ModuleReference),
    /// Referenced account does not exist.
    InvalidAccountReference(AccountAddress),
    /// Init function not found in the module.
    InvalidInitMethod {
        /// Module.
        module_ref: ModuleReference,
        /// Init function name.
        init_name: String,
    },
    /// Receive function not found in the module.
    InvalidReceiveMethod {
        /// Module.
        module_ref: ModuleReference,
        /// Receive function name.
        receive_name: String,
    },
    /// Referenced module does not exist.
    InvalidModuleReference(ModuleReference),
    /// Referenced contract instance does not exist.
    InvalidContractAddress(ContractAddress),
    /// Runtime error in the contract.
    RuntimeFailure,
    /// Sender cannot afford the amount.
    AmountTooLarge {
        /// Account or contract lacking funds.
        address: Address,
        /// Requested amount.
        amount: CcdAmount,
    },
    /// Payload could not be deserialized.
    SerializationFailure,
    /// Energy ran out.
    OutOfEnergy,
    /// Contract init rejected.
    RejectedInit {
        /// Contract-defined reason code.
        reject_reason: i32,
    },
    /// Contract receive rejected.
    RejectedReceive {
        /// Contract-defined reason code.
        reject_reason: i32,
        /// Contract.
        contract_address: ContractAddress,
        /// Entrypoint.
        receive_name: String,
        /// Parameter passed.
        parameter: HexBytes,
    },
    /// Proof verification failed.
    InvalidProof,
    /// Account is already a baker.
    AlreadyABaker(BakerId),
    /// Account is not a baker.
    NotABaker(AccountAddress),
    /// Balance cannot cover the baker stake.
    InsufficientBalanceForBakerStake,
    /// Stake below the baking threshold.
    StakeUnderMinimumThresholdForBaking,
    /// Baker is in cooldown.
    BakerInCooldown,
    /// Aggregation key already in use.
    DuplicateAggregationKey(HexBytes),
    /// Credential does not exist.
    NonExistentCredentialId,
    /// Key index already in use.
    KeyIndexAlreadyInUse,
    /// Account threshold invalid.
    InvalidAccountThreshold,
    /// Credential key sign threshold invalid.
    InvalidCredentialKeySignThreshold,
    /// Encrypted transfer proof invalid.
    InvalidEncryptedAmountTransferProof,
    /// Transfer to public proof invalid.
    InvalidTransferToPublicProof,
    /// Encrypted transfer to self.
    EncryptedAmountSelfTransfer(AccountAddress),
    /// Encrypted transfer index invalid.
    InvalidIndexOnEncryptedTransfer,
    /// Scheduled transfer with a zero amount.
    ZeroScheduledAmount,
    /// Release schedule not strictly increasing.
    NonIncreasingSchedule,
    /// First release already expired.
    FirstScheduledReleaseExpired,
    /// Scheduled transfer to self.
    ScheduledSelfTransfer(AccountAddress),
    /// Credentials invalid.
    InvalidCredentials,
    /// Credential ids already in use.
    DuplicateCredIds(Vec<CredentialRegistrationId>),
    /// Credential ids do not exist.
    NonExistentCredIds(Vec<CredentialRegistrationId>),
    /// Attempt to remove the first credential.
    RemoveFirstCredential,
    /// Credential holder did not sign.
    CredentialHolderDidNotSign,
    /// Account does not allow multiple credentials.
    NotAllowedMultipleCredentials,
    /// Account does not allow encrypted transfers in.
    NotAllowedToReceiveEncrypted,
    /// Account does not allow encrypted transfers.
    NotAllowedToHandleEncrypted,
    /// Baker configuration lacks required parameters.
    MissingBakerAddParameters,
    /// Finalization reward commission out of range.
    FinalizationRewardCommissionNotInRange,
    /// Baking reward commission out of range.
    BakingRewardCommissionNotInRange,
    /// Transaction fee commission out of range.
    TransactionFeeCommissionNotInRange,
    /// Account is already a delegator.
    AlreadyADelegator,
    /// Balance cannot cover the delegation stake.
    InsufficientBalanceForDelegationStake,
    /// Delegation configuration lacks required parameters.
    MissingDelegationAddParameters,
    /// Delegation stake too small.
    InsufficientDelegationStake,
    /// Delegator is in cooldown.
    DelegatorInCooldown,
    /// Account is not a delegator.
    NotADelegator(AccountAddress),
    /// Delegation target is not a baker.
    DelegationTargetNotABaker(BakerId),
    /// Stake would exceed the pool's capital bound.
    StakeOverMaximumThresholdForPool,
    /// Pool would exceed its leverage bound.
    PoolWouldBecomeOverDelegated,
    /// Pool is closed for new delegators.
    PoolClosed,
}
