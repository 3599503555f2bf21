//! Consensus status, blocks and election data.
//!
//! Status and block records are split by protocol version: before protocol 6
//! they carry slot data, from protocol 6 round and epoch data.

use ccd_types::{
    ArrivedBlockInfo, BakerElectionInfo, BftStatus, BlockConsensusPosition, BlockFinalizationSummary,
    BlockHash, BlockInfo, Branch, ConsensusStatus, ConsensusVersionStatus, ElectionInfo, Energy,
    FinalizationSummary, FinalizationSummaryParty, FinalizedBlockInfo, NextUpdateSequenceNumbers,
    WinningBaker,
};

use super::{
    duration, each, fraction_value, idents, optional_timestamp, protocol_version, require,
    required_hex, required_ident, timestamp, TranslationResult,
};
use crate::domain::TranslationError;
use crate::wire::consensus::{self as wire, PROTOCOL_VERSION_6};

/// Node's view of consensus.
pub fn consensus_status(info: wire::ConsensusInfo) -> TranslationResult<ConsensusStatus> {
    let version = if info.protocol_version < PROTOCOL_VERSION_6 {
        ConsensusVersionStatus::V0 {
            slot_duration: duration(info.slot_duration, "ConsensusInfo.slotDuration")?,
        }
    } else {
        ConsensusVersionStatus::V1(BftStatus {
            current_timeout_duration: duration(
                info.current_timeout_duration,
                "ConsensusInfo.currentTimeoutDuration",
            )?,
            current_round: require(info.current_round, "ConsensusInfo.currentRound")?,
            current_epoch: require(info.current_epoch, "ConsensusInfo.currentEpoch")?,
            trigger_block_time: timestamp(info.trigger_block_time, "ConsensusInfo.triggerBlockTime")?,
        })
    };

    Ok(ConsensusStatus {
        best_block: required_ident(info.best_block, "ConsensusInfo.bestBlock")?,
        genesis_block: required_ident(info.genesis_block, "ConsensusInfo.genesisBlock")?,
        current_era_genesis_block: required_ident(
            info.current_era_genesis_block,
            "ConsensusInfo.currentEraGenesisBlock",
        )?,
        last_finalized_block: required_ident(info.last_finalized_block, "ConsensusInfo.lastFinalizedBlock")?,
        epoch_duration: duration(info.epoch_duration, "ConsensusInfo.epochDuration")?,
        best_block_height: require(info.best_block_height, "ConsensusInfo.bestBlockHeight")?,
        last_finalized_block_height: require(
            info.last_finalized_block_height,
            "ConsensusInfo.lastFinalizedBlockHeight",
        )?,
        finalization_count: require(info.finalization_count, "ConsensusInfo.finalizationCount")?,
        blocks_verified_count: require(info.blocks_verified_count, "ConsensusInfo.blocksVerifiedCount")?,
        blocks_received_count: require(info.blocks_received_count, "ConsensusInfo.blocksReceivedCount")?,
        block_arrive_latency_ema: require(info.block_arrive_latency_ema, "ConsensusInfo.blockArriveLatencyEma")?,
        block_arrive_latency_emsd: require(
            info.block_arrive_latency_emsd,
            "ConsensusInfo.blockArriveLatencyEmsd",
        )?,
        block_receive_latency_ema: require(
            info.block_receive_latency_ema,
            "ConsensusInfo.blockReceiveLatencyEma",
        )?,
        block_receive_latency_emsd: require(
            info.block_receive_latency_emsd,
            "ConsensusInfo.blockReceiveLatencyEmsd",
        )?,
        transactions_per_block_ema: require(
            info.transactions_per_block_ema,
            "ConsensusInfo.transactionsPerBlockEma",
        )?,
        transactions_per_block_emsd: require(
            info.transactions_per_block_emsd,
            "ConsensusInfo.transactionsPerBlockEmsd",
        )?,
        block_receive_period_ema: info.block_receive_period_ema,
        block_receive_period_emsd: info.block_receive_period_emsd,
        block_arrive_period_ema: info.block_arrive_period_ema,
        block_arrive_period_emsd: info.block_arrive_period_emsd,
        finalization_period_ema: info.finalization_period_ema,
        finalization_period_emsd: info.finalization_period_emsd,
        genesis_time: timestamp(info.genesis_time, "ConsensusInfo.genesisTime")?,
        current_era_genesis_time: timestamp(info.current_era_genesis_time, "ConsensusInfo.currentEraGenesisTime")?,
        block_last_received_time: optional_timestamp(
            info.block_last_received_time,
            "ConsensusInfo.blockLastReceivedTime",
        )?,
        block_last_arrived_time: optional_timestamp(
            info.block_last_arrived_time,
            "ConsensusInfo.blockLastArrivedTime",
        )?,
        last_finalized_time: optional_timestamp(info.last_finalized_time, "ConsensusInfo.lastFinalizedTime")?,
        genesis_index: require(info.genesis_index, "ConsensusInfo.genesisIndex")?,
        protocol_version: protocol_version(info.protocol_version, "ConsensusInfo.protocolVersion")?,
        version,
    })
}

/// Block summary.
pub fn block_info(info: wire::BlockInfo) -> TranslationResult<BlockInfo> {
    let position = if info.protocol_version < PROTOCOL_VERSION_6 {
        BlockConsensusPosition::V0 {
            slot: require(info.slot_number, "BlockInfo.slotNumber")?,
        }
    } else {
        BlockConsensusPosition::V1 {
            round: require(info.round, "BlockInfo.round")?,
            epoch: require(info.epoch, "BlockInfo.epoch")?,
        }
    };

    Ok(BlockInfo {
        hash: required_ident(info.hash, "BlockInfo.hash")?,
        parent: required_ident(info.parent_block, "BlockInfo.parentBlock")?,
        last_finalized: required_ident(info.last_finalized_block, "BlockInfo.lastFinalizedBlock")?,
        height: require(info.height, "BlockInfo.height")?,
        baker: info.baker,
        arrive_time: optional_timestamp(info.arrive_time, "BlockInfo.arriveTime")?,
        receive_time: optional_timestamp(info.receive_time, "BlockInfo.receiveTime")?,
        slot_time: timestamp(info.slot_time, "BlockInfo.slotTime")?,
        finalized: info.finalized,
        transaction_count: u64::from(info.transaction_count),
        transactions_size: u64::from(info.transactions_size),
        transaction_energy_cost: Energy(require(
            info.transactions_energy_cost,
            "BlockInfo.transactionsEnergyCost",
        )?),
        genesis_index: require(info.genesis_index, "BlockInfo.genesisIndex")?,
        era_block_height: require(info.era_block_height, "BlockInfo.eraBlockHeight")?,
        protocol_version: protocol_version(info.protocol_version, "BlockInfo.protocolVersion")?,
        state_hash: required_ident(info.state_hash, "BlockInfo.stateHash")?,
        position,
    })
}

/// Item of the finalized block stream.
pub fn finalized_block(block: wire::BlockRef) -> TranslationResult<FinalizedBlockInfo> {
    Ok(FinalizedBlockInfo {
        hash: required_ident(block.hash, "FinalizedBlockInfo.hash")?,
        height: require(block.height, "FinalizedBlockInfo.height")?,
    })
}

/// Item of the arrived block stream.
pub fn arrived_block(block: wire::BlockRef) -> TranslationResult<ArrivedBlockInfo> {
    Ok(ArrivedBlockInfo {
        hash: required_ident(block.hash, "ArrivedBlockInfo.hash")?,
        height: require(block.height, "ArrivedBlockInfo.height")?,
    })
}

/// Blocks the node knows at one height.
pub fn blocks_at_height(response: wire::BlocksAtHeightResponse) -> TranslationResult<Vec<BlockHash>> {
    idents(response.blocks, "BlocksAtHeightResponse.blocks")
}

/// Tree of non-finalized branches.
pub fn branch(branch: wire::Branch) -> TranslationResult<Branch> {
    Ok(Branch {
        block_hash: required_ident(branch.block_hash, "Branch.blockHash")?,
        children: each(branch.children, self::branch)?,
    })
}

/// Leadership election data. The difficulty is absent from protocol 6.
pub fn election_info(info: wire::ElectionInfo) -> TranslationResult<ElectionInfo> {
    Ok(ElectionInfo {
        election_nonce: required_hex(info.election_nonce, "ElectionInfo.electionNonce")?,
        election_difficulty: info.election_difficulty.map(fraction_value),
        bakers: each(info.baker_election_info, |baker| {
            Ok(BakerElectionInfo {
                baker: require(baker.baker, "ElectionInfo.bakerElectionInfo.baker")?,
                account: required_ident(baker.account, "ElectionInfo.bakerElectionInfo.account")?,
                lottery_power: baker.lottery_power,
            })
        })?,
    })
}

/// Finalization record of a block, if any.
pub fn block_finalization_summary(
    summary: wire::BlockFinalizationSummary,
) -> TranslationResult<BlockFinalizationSummary> {
    match summary {
        wire::BlockFinalizationSummary::None(_) => Ok(BlockFinalizationSummary::None),
        wire::BlockFinalizationSummary::Record(record) => {
            Ok(BlockFinalizationSummary::Record(FinalizationSummary {
                block: required_ident(record.block, "BlockFinalizationSummary.record.block")?,
                index: require(record.index, "BlockFinalizationSummary.record.index")?,
                delay: require(record.delay, "BlockFinalizationSummary.record.delay")?,
                finalizers: each(record.finalizers, |party| {
                    Ok(FinalizationSummaryParty {
                        baker: require(party.baker, "BlockFinalizationSummary.record.finalizers.baker")?,
                        weight: party.weight,
                        signed: party.signed,
                    })
                })?,
            }))
        }
        wire::BlockFinalizationSummary::Unrecognized(_) => {
            Err(TranslationError::unknown_variant("BlockFinalizationSummary"))
        }
    }
}

/// Next sequence number of every update queue.
pub fn next_update_sequence_numbers(
    next: wire::NextUpdateSequenceNumbers,
) -> TranslationResult<NextUpdateSequenceNumbers> {
    const P: &str = "NextUpdateSequenceNumbers";
    Ok(NextUpdateSequenceNumbers {
        root_keys: require(next.root_keys, (P, "rootKeys"))?,
        level1_keys: require(next.level1_keys, (P, "level1Keys"))?,
        level2_keys: require(next.level2_keys, (P, "level2Keys"))?,
        protocol: require(next.protocol, (P, "protocol"))?,
        election_difficulty: require(next.election_difficulty, (P, "electionDifficulty"))?,
        euro_per_energy: require(next.euro_per_energy, (P, "euroPerEnergy"))?,
        micro_ccd_per_euro: require(next.micro_ccd_per_euro, (P, "microCcdPerEuro"))?,
        foundation_account: require(next.foundation_account, (P, "foundationAccount"))?,
        mint_distribution: require(next.mint_distribution, (P, "mintDistribution"))?,
        transaction_fee_distribution: require(
            next.transaction_fee_distribution,
            (P, "transactionFeeDistribution"),
        )?,
        gas_rewards: require(next.gas_rewards, (P, "gasRewards"))?,
        pool_parameters: require(next.pool_parameters, (P, "poolParameters"))?,
        add_anonymity_revoker: require(next.add_anonymity_revoker, (P, "addAnonymityRevoker"))?,
        add_identity_provider: require(next.add_identity_provider, (P, "addIdentityProvider"))?,
        cooldown_parameters: require(next.cooldown_parameters, (P, "cooldownParameters"))?,
        time_parameters: require(next.time_parameters, (P, "timeParameters"))?,
        timeout_parameters: require(next.timeout_parameters, (P, "timeoutParameters"))?,
        min_block_time: require(next.min_block_time, (P, "minBlockTime"))?,
        block_energy_limit: require(next.block_energy_limit, (P, "blockEnergyLimit"))?,
        finalization_committee_parameters: require(
            next.finalization_committee_parameters,
            (P, "finalizationCommitteeParameters"),
        )?,
        validator_score_parameters: require(
            next.validator_score_parameters,
            (P, "validatorScoreParameters"),
        )?,
    })
}

/// Winner of a round.
pub fn winning_baker(winner: wire::WinningBaker) -> TranslationResult<WinningBaker> {
    Ok(WinningBaker {
        round: require(winner.round, "WinningBaker.round")?,
        winner: require(winner.winner, "WinningBaker.winner")?,
        present: winner.present,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TranslationErrorKind;
    use crate::wire::common::AmountFraction;
    use crate::wire::{Bytes, Empty};
    use ccd_types::ProtocolVersion;
    use std::time::Duration;

    fn hash(byte: u8) -> Option<Bytes> {
        Some(Bytes(vec![byte; 32]))
    }

    fn consensus_info(protocol_version: i32) -> wire::ConsensusInfo {
        wire::ConsensusInfo {
            best_block: hash(1),
            genesis_block: hash(2),
            genesis_time: Some(0),
            slot_duration: Some(250),
            epoch_duration: Some(3_600_000),
            last_finalized_block: hash(3),
            best_block_height: Some(11),
            last_finalized_block_height: Some(10),
            blocks_received_count: Some(5),
            block_receive_latency_ema: Some(0.1),
            block_receive_latency_emsd: Some(0.0),
            blocks_verified_count: Some(5),
            block_arrive_latency_ema: Some(0.2),
            block_arrive_latency_emsd: Some(0.0),
            transactions_per_block_ema: Some(1.5),
            transactions_per_block_emsd: Some(0.5),
            finalization_count: Some(9),
            protocol_version,
            genesis_index: Some(0),
            current_era_genesis_block: hash(2),
            current_era_genesis_time: Some(0),
            current_timeout_duration: Some(10_000),
            current_round: Some(77),
            current_epoch: Some(3),
            trigger_block_time: Some(1_000),
            ..Default::default()
        }
    }

    #[test]
    fn test_consensus_status_before_protocol_6() {
        let status = consensus_status(consensus_info(4)).unwrap();
        assert_eq!(status.protocol_version, ProtocolVersion(5));
        assert_eq!(
            status.version,
            ConsensusVersionStatus::V0 {
                slot_duration: Duration::from_millis(250)
            }
        );
        assert_eq!(status.last_finalized_block_height, 10);
    }

    #[test]
    fn test_consensus_status_from_protocol_6() {
        let status = consensus_status(consensus_info(5)).unwrap();
        assert_eq!(status.protocol_version, ProtocolVersion(6));
        let ConsensusVersionStatus::V1(bft) = status.version else {
            panic!("expected bft status");
        };
        assert_eq!(bft.current_round, 77);
        assert_eq!(bft.current_timeout_duration, Duration::from_millis(10_000));
    }

    #[test]
    fn test_bft_status_requires_round() {
        let mut info = consensus_info(5);
        info.current_round = None;
        let err = consensus_status(info).unwrap_err();
        assert_eq!(err.path, "ConsensusInfo.currentRound");
    }

    fn block(protocol_version: i32) -> wire::BlockInfo {
        wire::BlockInfo {
            hash: hash(1),
            height: Some(40),
            parent_block: hash(2),
            last_finalized_block: hash(3),
            genesis_index: Some(1),
            era_block_height: Some(20),
            slot_number: Some(900),
            slot_time: Some(5_000),
            baker: Some(4),
            finalized: true,
            transaction_count: 2,
            transactions_energy_cost: Some(600),
            transactions_size: 300,
            state_hash: hash(4),
            protocol_version,
            round: Some(8),
            epoch: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_block_position_by_version() {
        assert_eq!(
            block_info(block(3)).unwrap().position,
            BlockConsensusPosition::V0 { slot: 900 }
        );
        assert_eq!(
            block_info(block(6)).unwrap().position,
            BlockConsensusPosition::V1 { round: 8, epoch: 1 }
        );
    }

    #[test]
    fn test_block_info_is_deterministic() {
        assert_eq!(block_info(block(6)).unwrap(), block_info(block(6)).unwrap());
    }

    #[test]
    fn test_election_difficulty_optional() {
        let mut info = wire::ElectionInfo {
            election_difficulty: Some(AmountFraction {
                parts_per_hundred_thousand: 2_500,
            }),
            election_nonce: Some(Bytes(vec![1, 2])),
            baker_election_info: vec![],
        };
        assert_eq!(election_info(info.clone()).unwrap().election_difficulty, Some(0.025));
        info.election_difficulty = None;
        assert_eq!(election_info(info).unwrap().election_difficulty, None);
    }

    #[test]
    fn test_finalization_summary_cases() {
        assert_eq!(
            block_finalization_summary(wire::BlockFinalizationSummary::None(Empty {})),
            Ok(BlockFinalizationSummary::None)
        );
        let unknown = wire::BlockFinalizationSummary::Unrecognized(serde_json::json!({ "v2": {} }));
        assert_eq!(
            block_finalization_summary(unknown).unwrap_err().kind,
            TranslationErrorKind::UnknownVariant
        );
    }

    #[test]
    fn test_branch_recursion() {
        let tree = wire::Branch {
            block_hash: hash(1),
            children: vec![wire::Branch {
                block_hash: hash(2),
                children: vec![],
            }],
        };
        let translated = branch(tree).unwrap();
        assert_eq!(translated.children.len(), 1);
        assert_eq!(translated.children[0].block_hash, BlockHash::new([2; 32]));
    }
}
