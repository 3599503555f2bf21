//! # Consensus Entities
//!
//! Blocks, consensus status, election data and finalization records.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::identifiers::{AccountAddress, BlockHash, HexBytes, StateHash};
use crate::primitives::{
    duration_millis, BakerId, Energy, Epoch, GenesisIndex, Nonce, ProtocolVersion, Round,
    Timestamp,
};

/// A finalized block.
///
/// For a fixed chain no two distinct finalized blocks share a height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FinalizedBlockInfo {
    /// Block hash.
    pub hash: BlockHash,
    /// Absolute height.
    pub height: u64,
}

/// A block that arrived at the node (not necessarily finalized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrivedBlockInfo {
    /// Block hash.
    pub hash: BlockHash,
    /// Absolute height.
    pub height: u64,
}

/// Consensus-specific position of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockConsensusPosition {
    /// Before protocol 6: slot based.
    V0 {
        /// Slot number.
        slot: u64,
    },
    /// From protocol 6: round and epoch.
    V1 {
        /// Round.
        round: Round,
        /// Epoch.
        epoch: Epoch,
    },
}

/// Summary of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block hash.
    pub hash: BlockHash,
    /// Parent block.
    pub parent: BlockHash,
    /// Last finalized block when this block was baked.
    pub last_finalized: BlockHash,
    /// Absolute height.
    pub height: u64,
    /// Baker, absent for genesis blocks.
    pub baker: Option<BakerId>,
    /// Time the block was verified.
    pub arrive_time: Option<Timestamp>,
    /// Time the block was received.
    pub receive_time: Option<Timestamp>,
    /// Nominal block time.
    pub slot_time: Timestamp,
    /// Whether the block is finalized.
    pub finalized: bool,
    /// Number of block items.
    pub transaction_count: u64,
    /// Serialized size of the block items.
    pub transactions_size: u64,
    /// Energy consumed by the block items.
    pub transaction_energy_cost: Energy,
    /// Genesis index of the era containing the block.
    pub genesis_index: GenesisIndex,
    /// Height relative to the era's genesis block.
    pub era_block_height: u64,
    /// Protocol version.
    pub protocol_version: ProtocolVersion,
    /// Hash of the block state.
    pub state_hash: StateHash,
    /// Slot, or round and epoch.
    pub position: BlockConsensusPosition,
}

/// Status of the BFT consensus (protocol 6 onwards).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BftStatus {
    /// Current timeout duration.
    #[serde(with = "duration_millis")]
    pub current_timeout_duration: Duration,
    /// Current round.
    pub current_round: Round,
    /// Current epoch.
    pub current_epoch: Epoch,
    /// Time after which the epoch transition is triggered.
    pub trigger_block_time: Timestamp,
}

/// Version-specific part of the consensus status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsensusVersionStatus {
    /// Before protocol 6.
    V0 {
        /// Slot duration.
        #[serde(with = "duration_millis")]
        slot_duration: Duration,
    },
    /// From protocol 6.
    V1(BftStatus),
}

/// Node's view of consensus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusStatus {
    /// Best block.
    pub best_block: BlockHash,
    /// Genesis block of the chain.
    pub genesis_block: BlockHash,
    /// Genesis block of the current era.
    pub current_era_genesis_block: BlockHash,
    /// Last finalized block.
    pub last_finalized_block: BlockHash,
    /// Epoch duration.
    #[serde(with = "duration_millis")]
    pub epoch_duration: Duration,
    /// Height of the best block.
    pub best_block_height: u64,
    /// Height of the last finalized block.
    pub last_finalized_block_height: u64,
    /// Number of finalizations.
    pub finalization_count: u64,
    /// Number of verified blocks.
    pub blocks_verified_count: u64,
    /// Number of received blocks.
    pub blocks_received_count: u64,
    /// Moving average of arrive latency (seconds).
    pub block_arrive_latency_ema: f64,
    /// Moving deviation of arrive latency.
    pub block_arrive_latency_emsd: f64,
    /// Moving average of receive latency (seconds).
    pub block_receive_latency_ema: f64,
    /// Moving deviation of receive latency.
    pub block_receive_latency_emsd: f64,
    /// Moving average of transactions per block.
    pub transactions_per_block_ema: f64,
    /// Moving deviation of transactions per block.
    pub transactions_per_block_emsd: f64,
    /// Moving average of the receive period.
    pub block_receive_period_ema: Option<f64>,
    /// Moving deviation of the receive period.
    pub block_receive_period_emsd: Option<f64>,
    /// Moving average of the arrive period.
    pub block_arrive_period_ema: Option<f64>,
    /// Moving deviation of the arrive period.
    pub block_arrive_period_emsd: Option<f64>,
    /// Moving average of the finalization period.
    pub finalization_period_ema: Option<f64>,
    /// Moving deviation of the finalization period.
    pub finalization_period_emsd: Option<f64>,
    /// Chain genesis time.
    pub genesis_time: Timestamp,
    /// Genesis time of the current era.
    pub current_era_genesis_time: Timestamp,
    /// Time the last block was received.
    pub block_last_received_time: Option<Timestamp>,
    /// Time the last block arrived.
    pub block_last_arrived_time: Option<Timestamp>,
    /// Time of the last finalization.
    pub last_finalized_time: Option<Timestamp>,
    /// Current genesis index.
    pub genesis_index: GenesisIndex,
    /// Current protocol version.
    pub protocol_version: ProtocolVersion,
    /// Slot duration or BFT status depending on the protocol.
    pub version: ConsensusVersionStatus,
}

/// Tree of live branches rooted at the last finalized block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Block at this node of the tree.
    pub block_hash: BlockHash,
    /// Child branches.
    pub children: Vec<Branch>,
}

/// Election information for one baker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakerElectionInfo {
    /// Baker id.
    pub baker: BakerId,
    /// Baker's account.
    pub account: AccountAddress,
    /// Relative lottery power.
    pub lottery_power: f64,
}

/// Election parameters of a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionInfo {
    /// Leadership election nonce.
    pub election_nonce: HexBytes,
    /// Election difficulty; absent from protocol 6.
    pub election_difficulty: Option<f64>,
    /// Bakers eligible in the block's epoch.
    pub bakers: Vec<BakerElectionInfo>,
}

/// Finalizer participating in a finalization record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizationSummaryParty {
    /// Baker id.
    pub baker: BakerId,
    /// Voting weight.
    pub weight: u64,
    /// Whether the party signed.
    pub signed: bool,
}

/// Finalization record contained in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizationSummary {
    /// Finalized block.
    pub block: BlockHash,
    /// Finalization index.
    pub index: u64,
    /// Finalization delay.
    pub delay: u64,
    /// Finalizers.
    pub finalizers: Vec<FinalizationSummaryParty>,
}

/// Finalization data of a block, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockFinalizationSummary {
    /// The block contains no finalization record.
    None,
    /// The block contains a record.
    Record(FinalizationSummary),
}

/// Next sequence numbers for each chain update queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct NextUpdateSequenceNumbers {
    pub root_keys: u64,
    pub level1_keys: u64,
    pub level2_keys: u64,
    pub protocol: u64,
    pub election_difficulty: u64,
    pub euro_per_energy: u64,
    pub micro_ccd_per_euro: u64,
    pub foundation_account: u64,
    pub mint_distribution: u64,
    pub transaction_fee_distribution: u64,
    pub gas_rewards: u64,
    pub pool_parameters: u64,
    pub add_anonymity_revoker: u64,
    pub add_identity_provider: u64,
    pub cooldown_parameters: u64,
    pub time_parameters: u64,
    pub timeout_parameters: u64,
    pub min_block_time: u64,
    pub block_energy_limit: u64,
    pub finalization_committee_parameters: u64,
    pub validator_score_parameters: u64,
}

/// Next nonce to use for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextAccountNonce {
    /// Next nonce.
    pub nonce: Nonce,
    /// Whether every transaction of the account is finalized.
    pub all_final: bool,
}

/// A baker that won (or was expected to win) a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningBaker {
    /// Round.
    pub round: Round,
    /// Winner.
    pub winner: BakerId,
    /// Whether the winner produced a block in the round.
    pub present: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalized_block_info_serializes_hash_as_hex() {
        let info = FinalizedBlockInfo {
            hash: BlockHash::new([0xab; 32]),
            height: 5,
        };
        let json = serde_json::to_value(info).unwrap();
        assert_eq!(json["height"], 5);
        assert_eq!(json["hash"], "ab".repeat(32));
    }
}
