//! Request messages sent to the node.
//!
//! Requests are only ever built by the facade, so their enums carry no
//! catch-all variant.

use std::collections::BTreeMap;

use ccd_types as domain;
use serde::{Deserialize, Serialize};

use super::common::{Address, ContractAddress};
use super::{Bytes, Empty};

/// Height relative to a genesis index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct RelativeHeight {
    pub genesis_index: u32,
    pub height: u64,
    pub restrict: bool,
}

/// Block selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum BlockHashInput {
    Best(Empty),
    LastFinal(Empty),
    Given(Bytes),
    AbsoluteHeight(u64),
    RelativeHeight(RelativeHeight),
}

/// Account selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum AccountIdentifierInput {
    Address(Bytes),
    CredId(Bytes),
    AccountIndex(u64),
}

/// Account lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AccountInfoRequest {
    pub block_hash: BlockHashInput,
    pub account_identifier: AccountIdentifierInput,
}

/// Contract instance lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InstanceInfoRequest {
    pub block_hash: BlockHashInput,
    pub address: ContractAddress,
}

/// Module source lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ModuleSourceRequest {
    pub block_hash: BlockHashInput,
    pub module_ref: Bytes,
}

/// Dry run of a contract entrypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InvokeInstanceRequest {
    pub block_hash: BlockHashInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoker: Option<Address>,
    pub instance: ContractAddress,
    pub amount: u64,
    pub entrypoint: String,
    pub parameter: Bytes,
    pub energy: u64,
}

/// Pool lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PoolInfoRequest {
    pub block_hash: BlockHashInput,
    pub baker: u64,
}

/// Single key lookup in contract state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct InstanceStateLookupRequest {
    pub block_hash: BlockHashInput,
    pub address: ContractAddress,
    pub key: Bytes,
}

/// Blocks at a height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum BlocksAtHeightRequest {
    Absolute(AbsoluteHeight),
    Relative(RelativeHeight),
}

/// Absolute height.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteHeight {
    /// Height.
    pub height: u64,
}

/// Epoch relative to a genesis index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct RelativeEpoch {
    pub genesis_index: u32,
    pub epoch: u64,
}

/// Epoch selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum EpochRequest {
    RelativeEpoch(RelativeEpoch),
    BlockHash(BlockHashInput),
}

/// Ancestors of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AncestorsRequest {
    pub block_hash: BlockHashInput,
    pub amount: u64,
}

/// Delegators of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PoolDelegatorsRequest {
    pub block_hash: BlockHashInput,
    pub baker: u64,
}

/// Serialized payload of a block item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum RawPayload {
    RawPayload(Bytes),
}

/// Signatures by key index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureMap {
    /// Signatures.
    pub signatures: BTreeMap<u32, Bytes>,
}

/// Signatures by credential index, then key index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTransactionSignature {
    /// Signatures.
    pub signatures: BTreeMap<u32, SignatureMap>,
}

/// Account transaction header. Expiry is in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AccountTransactionHeader {
    pub sender: Bytes,
    pub sequence_number: u64,
    pub energy_amount: u64,
    pub expiry: u64,
}

/// Signed account transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct AccountTransaction {
    pub signature: AccountTransactionSignature,
    pub header: AccountTransactionHeader,
    pub payload: RawPayload,
}

/// Credential deployment. Expiry is in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CredentialDeployment {
    pub message_expiry: u64,
    pub payload: RawPayload,
}

/// Update instruction header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct UpdateInstructionHeader {
    pub sequence_number: u64,
    pub effective_time: u64,
    pub timeout: u64,
}

/// Signed chain update instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct UpdateInstruction {
    pub header: UpdateInstructionHeader,
    pub payload: RawPayload,
    pub signatures: SignatureMap,
}

/// Block item submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum SendBlockItemRequest {
    AccountTransaction(AccountTransaction),
    CredentialDeployment(CredentialDeployment),
    UpdateInstruction(UpdateInstruction),
}

/// Start of a network dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct DumpRequest {
    pub file: String,
    pub raw: bool,
}

// =============================================================================
// Conversions from caller inputs
// =============================================================================

impl From<domain::BlockSelector> for BlockHashInput {
    fn from(selector: domain::BlockSelector) -> Self {
        match selector {
            domain::BlockSelector::LastFinal => Self::LastFinal(Empty {}),
            domain::BlockSelector::Given(hash) => Self::Given(Bytes::from(hash.as_bytes().as_slice())),
        }
    }
}

impl From<domain::AccountIdentifier> for AccountIdentifierInput {
    fn from(account: domain::AccountIdentifier) -> Self {
        match account {
            domain::AccountIdentifier::Address(address) => Self::Address(Bytes::from(address.as_bytes().as_slice())),
            domain::AccountIdentifier::CredId(cred_id) => Self::CredId(Bytes::from(cred_id.as_bytes())),
            domain::AccountIdentifier::Index(index) => Self::AccountIndex(index),
        }
    }
}

impl From<domain::BlocksAtHeightRequest> for BlocksAtHeightRequest {
    fn from(request: domain::BlocksAtHeightRequest) -> Self {
        match request {
            domain::BlocksAtHeightRequest::Absolute { height } => Self::Absolute(AbsoluteHeight { height }),
            domain::BlocksAtHeightRequest::Relative {
                genesis_index,
                height,
                restrict,
            } => Self::Relative(RelativeHeight {
                genesis_index,
                height,
                restrict,
            }),
        }
    }
}

impl From<domain::EpochRequest> for EpochRequest {
    fn from(request: domain::EpochRequest) -> Self {
        match request {
            domain::EpochRequest::Block(selector) => Self::BlockHash(selector.into()),
            domain::EpochRequest::Relative { genesis_index, epoch } => {
                Self::RelativeEpoch(RelativeEpoch { genesis_index, epoch })
            }
        }
    }
}

impl From<domain::ContractAddress> for ContractAddress {
    fn from(address: domain::ContractAddress) -> Self {
        Self {
            index: address.index,
            subindex: address.subindex,
        }
    }
}

impl From<domain::Address> for Address {
    fn from(address: domain::Address) -> Self {
        match address {
            domain::Address::Account(account) => Self::Account(Bytes::from(account.as_bytes().as_slice())),
            domain::Address::Contract(contract) => Self::Contract(contract.into()),
        }
    }
}

fn seconds(time: domain::Timestamp) -> u64 {
    u64::try_from(time.timestamp()).unwrap_or_default()
}

fn signature_map(signatures: &BTreeMap<u32, domain::HexBytes>) -> SignatureMap {
    SignatureMap {
        signatures: signatures
            .iter()
            .map(|(index, signature)| (*index, Bytes::from(signature.as_bytes())))
            .collect(),
    }
}

impl From<&domain::AccountTransactionSubmission> for AccountTransaction {
    fn from(submission: &domain::AccountTransactionSubmission) -> Self {
        Self {
            signature: AccountTransactionSignature {
                signatures: submission
                    .signature
                    .iter()
                    .map(|(credential, keys)| (*credential, signature_map(keys)))
                    .collect(),
            },
            header: AccountTransactionHeader {
                sender: Bytes::from(submission.header.sender.as_bytes().as_slice()),
                sequence_number: submission.header.nonce,
                energy_amount: submission.header.energy_amount.0,
                expiry: seconds(submission.header.expiry),
            },
            payload: RawPayload::RawPayload(Bytes::from(submission.payload.as_bytes())),
        }
    }
}

impl CredentialDeployment {
    /// Deployment expiring at `expiry`.
    pub fn new(payload: &domain::HexBytes, expiry: domain::Timestamp) -> Self {
        Self {
            message_expiry: seconds(expiry),
            payload: RawPayload::RawPayload(Bytes::from(payload.as_bytes())),
        }
    }
}

impl From<&domain::UpdateInstruction> for UpdateInstruction {
    fn from(instruction: &domain::UpdateInstruction) -> Self {
        Self {
            header: UpdateInstructionHeader {
                sequence_number: instruction.header.sequence_number,
                effective_time: instruction.header.effective_time,
                timeout: instruction.header.timeout,
            },
            payload: RawPayload::RawPayload(Bytes::from(instruction.payload.as_bytes())),
            signatures: signature_map(&instruction.signatures),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_hash_input_shape() {
        let input = BlockHashInput::LastFinal(Empty {});
        assert_eq!(serde_json::to_value(input).unwrap(), json!({ "lastFinal": {} }));
        let input = BlockHashInput::Given(Bytes(vec![0xff]));
        assert_eq!(serde_json::to_value(input).unwrap(), json!({ "given": "ff" }));
    }

    #[test]
    fn test_relative_blocks_at_height_shape() {
        let request = BlocksAtHeightRequest::Relative(RelativeHeight {
            genesis_index: 1,
            height: 10,
            restrict: true,
        });
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({ "relative": { "genesisIndex": 1, "height": 10, "restrict": true } })
        );
    }

    #[test]
    fn test_selector_conversion() {
        let hash = domain::BlockHash::new([7; 32]);
        assert_eq!(
            BlockHashInput::from(domain::BlockSelector::Given(hash)),
            BlockHashInput::Given(Bytes(vec![7; 32]))
        );
        assert_eq!(
            BlockHashInput::from(domain::BlockSelector::LastFinal),
            BlockHashInput::LastFinal(Empty {})
        );
    }

    #[test]
    fn test_account_index_conversion() {
        let input = AccountIdentifierInput::from(domain::AccountIdentifier::Index(12));
        assert_eq!(serde_json::to_value(input).unwrap(), json!({ "accountIndex": 12 }));
    }

    #[test]
    fn test_invoke_without_invoker_omits_field() {
        let request = InvokeInstanceRequest {
            block_hash: BlockHashInput::Best(Empty {}),
            invoker: None,
            instance: ContractAddress { index: 3, subindex: 0 },
            amount: 0,
            entrypoint: "c.view".to_string(),
            parameter: Bytes::default(),
            energy: 1000,
        };
        let json = serde_json::to_value(request).unwrap();
        assert!(json.get("invoker").is_none());
        assert_eq!(json["entrypoint"], "c.view");
    }
}
