//! # Request Inputs
//!
//! Caller-facing inputs of node queries and submissions. Constructors here
//! validate eagerly so a malformed input never reaches the transport.

use std::collections::BTreeMap;
use std::net::IpAddr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::identifiers::{AccountAddress, BlockHash, CredentialRegistrationId, HexBytes};
use crate::primitives::{AccountIndex, Energy, Epoch, GenesisIndex, Nonce, Timestamp};

/// Block a query is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockSelector {
    /// The last finalized block at the time the node handles the query.
    #[default]
    LastFinal,
    /// A specific block.
    Given(BlockHash),
}

impl From<BlockHash> for BlockSelector {
    fn from(hash: BlockHash) -> Self {
        Self::Given(hash)
    }
}

impl From<Option<BlockHash>> for BlockSelector {
    fn from(hash: Option<BlockHash>) -> Self {
        hash.map_or(Self::LastFinal, Self::Given)
    }
}

/// Ways to name an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountIdentifier {
    /// By address.
    Address(AccountAddress),
    /// By the registration id of any of its credentials.
    CredId(CredentialRegistrationId),
    /// By account index.
    Index(AccountIndex),
}

impl From<AccountAddress> for AccountIdentifier {
    fn from(address: AccountAddress) -> Self {
        Self::Address(address)
    }
}

impl From<CredentialRegistrationId> for AccountIdentifier {
    fn from(cred_id: CredentialRegistrationId) -> Self {
        Self::CredId(cred_id)
    }
}

impl From<AccountIndex> for AccountIdentifier {
    fn from(index: AccountIndex) -> Self {
        Self::Index(index)
    }
}

/// Which height to list blocks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlocksAtHeightRequest {
    /// Height counted from the first genesis block.
    Absolute {
        /// Height.
        height: u64,
    },
    /// Height counted from the genesis block of a given era.
    Relative {
        /// Era.
        genesis_index: GenesisIndex,
        /// Height within the era.
        height: u64,
        /// Only return blocks of that era.
        restrict: bool,
    },
}

impl From<u64> for BlocksAtHeightRequest {
    fn from(height: u64) -> Self {
        Self::Absolute { height }
    }
}

/// Epoch to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpochRequest {
    /// The epoch of a block.
    Block(BlockSelector),
    /// An epoch within an era.
    Relative {
        /// Era.
        genesis_index: GenesisIndex,
        /// Epoch within the era.
        epoch: Epoch,
    },
}

impl Default for EpochRequest {
    fn default() -> Self {
        Self::Block(BlockSelector::LastFinal)
    }
}

/// Parse a textual IPv4 or IPv6 address.
pub fn parse_ip(input: &str) -> Result<IpAddr, ValidationError> {
    input
        .parse()
        .map_err(|_| ValidationError::InvalidIp(input.to_string()))
}

/// Check a port number is within `0..=65535`.
pub fn parse_port(port: i64) -> Result<u16, ValidationError> {
    u16::try_from(port).map_err(|_| ValidationError::InvalidPort(port))
}

/// Signatures on an account transaction, by credential index then key index.
pub type AccountTransactionSignature = BTreeMap<u32, BTreeMap<u32, HexBytes>>;

/// Header of an account transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTransactionHeader {
    /// Sender.
    pub sender: AccountAddress,
    /// Sender nonce.
    pub nonce: Nonce,
    /// Energy allotted.
    pub energy_amount: Energy,
    /// Expiry.
    pub expiry: Timestamp,
}

/// Signed account transaction with an already serialized payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTransactionSubmission {
    /// Header.
    pub header: AccountTransactionHeader,
    /// Serialized payload.
    pub payload: HexBytes,
    /// Signatures on the transaction's signing digest.
    pub signature: AccountTransactionSignature,
}

impl AccountTransactionSubmission {
    /// Reject a submission whose expiry has already passed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_expiry(self.header.expiry)
    }
}

/// Reject an expiry that is already in the past.
pub fn check_expiry(expiry: Timestamp) -> Result<(), ValidationError> {
    if expiry < Utc::now() {
        return Err(ValidationError::ExpiryInPast {
            expiry: expiry.timestamp(),
        });
    }
    Ok(())
}

/// Header of an update instruction. Times are seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInstructionHeader {
    /// Update sequence number.
    pub sequence_number: u64,
    /// When the update takes effect, 0 for immediately.
    pub effective_time: u64,
    /// When the instruction expires.
    pub timeout: u64,
}

/// Signed chain update with an already serialized payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInstruction {
    /// Header.
    pub header: UpdateInstructionHeader,
    /// Serialized payload.
    pub payload: HexBytes,
    /// Signatures by update key index.
    pub signatures: BTreeMap<u32, HexBytes>,
}
