//! Consensus and block messages.

use serde::{Deserialize, Serialize};

use super::common::{AmountFraction, ProtocolVersionCode};
use super::{Bytes, Empty};

/// Protocol version code from which consensus runs the BFT protocol.
pub const PROTOCOL_VERSION_6: ProtocolVersionCode = 5;

/// Consensus status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ConsensusInfo {
    pub best_block: Option<Bytes>,
    pub genesis_block: Option<Bytes>,
    pub genesis_time: Option<i64>,
    pub slot_duration: Option<u64>,
    pub epoch_duration: Option<u64>,
    pub last_finalized_block: Option<Bytes>,
    pub best_block_height: Option<u64>,
    pub last_finalized_block_height: Option<u64>,
    pub blocks_received_count: Option<u64>,
    pub block_last_received_time: Option<i64>,
    pub block_receive_latency_ema: Option<f64>,
    pub block_receive_latency_emsd: Option<f64>,
    pub block_receive_period_ema: Option<f64>,
    pub block_receive_period_emsd: Option<f64>,
    pub blocks_verified_count: Option<u64>,
    pub block_last_arrived_time: Option<i64>,
    pub block_arrive_latency_ema: Option<f64>,
    pub block_arrive_latency_emsd: Option<f64>,
    pub block_arrive_period_ema: Option<f64>,
    pub block_arrive_period_emsd: Option<f64>,
    pub transactions_per_block_ema: Option<f64>,
    pub transactions_per_block_emsd: Option<f64>,
    pub finalization_count: Option<u64>,
    pub last_finalized_time: Option<i64>,
    pub finalization_period_ema: Option<f64>,
    pub finalization_period_emsd: Option<f64>,
    pub protocol_version: ProtocolVersionCode,
    pub genesis_index: Option<u32>,
    pub current_era_genesis_block: Option<Bytes>,
    pub current_era_genesis_time: Option<i64>,
    pub current_timeout_duration: Option<u64>,
    pub current_round: Option<u64>,
    pub current_epoch: Option<u64>,
    pub trigger_block_time: Option<i64>,
}

/// Block summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BlockInfo {
    pub hash: Option<Bytes>,
    pub height: Option<u64>,
    pub parent_block: Option<Bytes>,
    pub last_finalized_block: Option<Bytes>,
    pub genesis_index: Option<u32>,
    pub era_block_height: Option<u64>,
    pub receive_time: Option<i64>,
    pub arrive_time: Option<i64>,
    pub slot_number: Option<u64>,
    pub slot_time: Option<i64>,
    pub baker: Option<u64>,
    pub finalized: bool,
    pub transaction_count: u32,
    pub transactions_energy_cost: Option<u64>,
    pub transactions_size: u32,
    pub state_hash: Option<Bytes>,
    pub protocol_version: ProtocolVersionCode,
    pub round: Option<u64>,
    pub epoch: Option<u64>,
}

/// Hash and height of a block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockRef {
    /// Block hash.
    pub hash: Option<Bytes>,
    /// Absolute height.
    pub height: Option<u64>,
}

/// Blocks at a height.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlocksAtHeightResponse {
    /// Hashes, possibly empty.
    pub blocks: Vec<Bytes>,
}

/// Tree of live branches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Branch {
    /// Root of this subtree.
    pub block_hash: Option<Bytes>,
    /// Children.
    pub children: Vec<Branch>,
}

/// Baker in the election.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElectionBaker {
    /// Baker id.
    pub baker: Option<u64>,
    /// Baker account.
    pub account: Option<Bytes>,
    /// Relative lottery power.
    pub lottery_power: f64,
}

/// Leadership election data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElectionInfo {
    /// Absent from protocol 6.
    pub election_difficulty: Option<AmountFraction>,
    /// Election nonce.
    pub election_nonce: Option<Bytes>,
    /// Participants.
    pub baker_election_info: Vec<ElectionBaker>,
}

/// Finalizer in a finalization record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalizationSummaryParty {
    /// Baker id.
    pub baker: Option<u64>,
    /// Voting weight.
    pub weight: u64,
    /// Whether the party signed.
    pub signed: bool,
}

/// Finalization record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalizationSummary {
    /// Finalized block.
    pub block: Option<Bytes>,
    /// Finalization index.
    pub index: Option<u64>,
    /// Finalization delay.
    pub delay: Option<u64>,
    /// Parties.
    pub finalizers: Vec<FinalizationSummaryParty>,
}

/// Finalization record carried by a block, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockFinalizationSummary {
    /// No record.
    None(Empty),
    /// Record.
    Record(FinalizationSummary),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Next sequence number per update queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NextUpdateSequenceNumbers {
    pub root_keys: Option<u64>,
    pub level1_keys: Option<u64>,
    pub level2_keys: Option<u64>,
    pub protocol: Option<u64>,
    pub election_difficulty: Option<u64>,
    pub euro_per_energy: Option<u64>,
    pub micro_ccd_per_euro: Option<u64>,
    pub foundation_account: Option<u64>,
    pub mint_distribution: Option<u64>,
    pub transaction_fee_distribution: Option<u64>,
    pub gas_rewards: Option<u64>,
    pub pool_parameters: Option<u64>,
    pub add_anonymity_revoker: Option<u64>,
    pub add_identity_provider: Option<u64>,
    pub cooldown_parameters: Option<u64>,
    pub time_parameters: Option<u64>,
    pub timeout_parameters: Option<u64>,
    pub min_block_time: Option<u64>,
    pub block_energy_limit: Option<u64>,
    pub finalization_committee_parameters: Option<u64>,
    pub validator_score_parameters: Option<u64>,
}

/// Winner of a round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinningBaker {
    /// Round.
    pub round: Option<u64>,
    /// Winner.
    pub winner: Option<u64>,
    /// Whether the winner's block is on the finalized chain.
    pub present: bool,
}
