//! A scripted chain served through [`MockTransport`].
//!
//! Blocks `0..=height` are finalized. Submitted block items stay `Received`
//! until the next [`SimulatedNode::finalize_block`], which puts them in the
//! new block and announces it on every open finalized-block subscription.

use std::collections::HashMap;
use std::sync::Arc;

use ccd_node_client::wire::consensus::{BlockInfo, BlockRef, BlocksAtHeightResponse, ConsensusInfo};
use ccd_node_client::wire::summary as summary_wire;
use ccd_node_client::wire::{Bytes, Empty};
use ccd_node_client::{mock_block_hash, MockTransport, RpcCode, RpcError, RpcMethod};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Slot time of the block at `height`, in milliseconds.
pub fn slot_time_ms(height: u64) -> i64 {
    i64::try_from(height).unwrap_or(i64::MAX).saturating_mul(1_000)
}

fn block_bytes(height: u64) -> Bytes {
    Bytes::from(mock_block_hash(height).as_bytes().as_slice())
}

fn to_value(value: impl serde::Serialize) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::new(RpcCode::Internal, e.to_string()))
}

fn invalid(message: &str) -> RpcError {
    RpcError::new(RpcCode::InvalidArgument, message)
}

fn given_height(selector: &Value) -> Result<u64, RpcError> {
    let given = selector["given"].as_str().ok_or_else(|| invalid("expected a given block"))?;
    let bytes = hex::decode(given).map_err(|_| invalid("bad block hash"))?;
    let prefix: [u8; 8] = bytes
        .get(..8)
        .and_then(|prefix| prefix.try_into().ok())
        .ok_or_else(|| invalid("short block hash"))?;
    Ok(u64::from_be_bytes(prefix))
}

#[derive(Default)]
struct NodeState {
    height: u64,
    next_item: u8,
    received: Vec<[u8; 32]>,
    finalized: HashMap<[u8; 32], u64>,
}

impl NodeState {
    fn consensus_info(&self) -> ConsensusInfo {
        ConsensusInfo {
            best_block: Some(block_bytes(self.height)),
            genesis_block: Some(block_bytes(0)),
            genesis_time: Some(0),
            slot_duration: Some(1_000),
            epoch_duration: Some(3_600_000),
            last_finalized_block: Some(block_bytes(self.height)),
            best_block_height: Some(self.height),
            last_finalized_block_height: Some(self.height),
            blocks_received_count: Some(self.height),
            block_receive_latency_ema: Some(0.0),
            block_receive_latency_emsd: Some(0.0),
            blocks_verified_count: Some(self.height),
            block_arrive_latency_ema: Some(0.0),
            block_arrive_latency_emsd: Some(0.0),
            transactions_per_block_ema: Some(0.0),
            transactions_per_block_emsd: Some(0.0),
            finalization_count: Some(self.height),
            protocol_version: 3,
            genesis_index: Some(0),
            current_era_genesis_block: Some(block_bytes(0)),
            current_era_genesis_time: Some(0),
            ..Default::default()
        }
    }

    fn status(&self, hash: [u8; 32]) -> Result<Value, RpcError> {
        if self.received.contains(&hash) {
            return to_value(summary_wire::BlockItemStatus::Received(Empty {}));
        }
        let height = self
            .finalized
            .get(&hash)
            .copied()
            .ok_or_else(|| RpcError::new(RpcCode::NotFound, "unknown block item"))?;
        to_value(summary_wire::BlockItemStatus::Finalized(summary_wire::Finalized {
            outcome: Some(summary_wire::BlockItemSummaryInBlock {
                block_hash: Some(block_bytes(height)),
                outcome: Some(summary_wire::BlockItemSummary {
                    index: Some(0),
                    energy_cost: Some(501),
                    hash: Some(Bytes::from(hash.as_slice())),
                    details: Some(summary_wire::BlockItemSummaryDetails::AccountTransaction(
                        summary_wire::AccountTransactionDetails {
                            cost: Some(1_000),
                            sender: Some(Bytes(vec![1; 32])),
                            effects: Some(summary_wire::AccountTransactionEffects::AccountTransfer(
                                summary_wire::AccountTransfer {
                                    amount: Some(250),
                                    receiver: Some(Bytes(vec![2; 32])),
                                    memo: None,
                                },
                            )),
                        },
                    )),
                }),
            }),
        }))
    }
}

/// Scripted node behind a [`MockTransport`].
#[derive(Clone)]
pub struct SimulatedNode {
    transport: MockTransport,
    state: Arc<Mutex<NodeState>>,
}

impl SimulatedNode {
    /// Node with blocks `0..=height` finalized.
    pub fn with_height(height: u64) -> Self {
        let node = Self {
            transport: MockTransport::new(),
            state: Arc::new(Mutex::new(NodeState {
                height,
                ..NodeState::default()
            })),
        };
        node.install();
        node
    }

    /// Transport serving this node.
    pub fn transport(&self) -> MockTransport {
        self.transport.clone()
    }

    /// Last finalized height.
    pub fn height(&self) -> u64 {
        self.state.lock().height
    }

    /// Finalize one block holding every received item and announce it.
    pub fn finalize_block(&self) -> u64 {
        let height = {
            let mut state = self.state.lock();
            state.height += 1;
            let height = state.height;
            for hash in std::mem::take(&mut state.received) {
                state.finalized.insert(hash, height);
            }
            height
        };
        let block = BlockRef {
            hash: Some(block_bytes(height)),
            height: Some(height),
        };
        if let Ok(block) = to_value(block) {
            self.transport.push(RpcMethod::GetFinalizedBlocks, block);
        }
        height
    }

    fn install(&self) {
        let state = Arc::clone(&self.state);
        self.transport.on_call(RpcMethod::GetConsensusInfo, move |_| {
            to_value(state.lock().consensus_info())
        });

        let state = Arc::clone(&self.state);
        self.transport.on_call(RpcMethod::GetBlocksAtHeight, move |request| {
            let height = request["absolute"]["height"]
                .as_u64()
                .ok_or_else(|| invalid("expected an absolute height"))?;
            let blocks = if height <= state.lock().height {
                vec![block_bytes(height)]
            } else {
                Vec::new()
            };
            to_value(BlocksAtHeightResponse { blocks })
        });

        let state = Arc::clone(&self.state);
        self.transport.on_call(RpcMethod::GetBlockInfo, move |request| {
            let height = given_height(request)?;
            if height > state.lock().height {
                return Err(RpcError::new(RpcCode::NotFound, "unknown block"));
            }
            to_value(BlockInfo {
                hash: Some(block_bytes(height)),
                height: Some(height),
                parent_block: Some(block_bytes(height.saturating_sub(1))),
                last_finalized_block: Some(block_bytes(height)),
                genesis_index: Some(0),
                era_block_height: Some(height),
                slot_number: Some(height),
                slot_time: Some(slot_time_ms(height)),
                finalized: true,
                transactions_energy_cost: Some(0),
                state_hash: Some(Bytes(vec![0xee; 32])),
                protocol_version: 3,
                ..Default::default()
            })
        });

        let state = Arc::clone(&self.state);
        self.transport.on_call(RpcMethod::SendBlockItem, move |_| {
            let mut state = state.lock();
            state.next_item = state.next_item.wrapping_add(1);
            let hash = [state.next_item; 32];
            state.received.push(hash);
            Ok(json!({ "value": hex::encode(hash) }))
        });

        let state = Arc::clone(&self.state);
        self.transport.on_call(RpcMethod::GetBlockItemStatus, move |request| {
            let bytes = request["value"]
                .as_str()
                .and_then(|value| hex::decode(value).ok())
                .ok_or_else(|| invalid("expected a transaction hash"))?;
            let hash: [u8; 32] = bytes.try_into().map_err(|_| invalid("bad transaction hash"))?;
            state.lock().status(hash)
        });
    }
}
