//! # Inbound Ports
//!
//! The slice of the query facade the block synchronizer runs on. Keeping it
//! a trait lets the synchronizer be driven by an in-memory chain in tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ccd_types::{BlockHash, BlockItemStatus, FinalizedBlockInfo, TransactionHash};
use futures::future;
use futures::stream::{BoxStream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;

use crate::domain::{ClientError, RpcCode, RpcError};

/// Lazy sequence of translated values from a streaming operation.
pub type NodeStream<T> = BoxStream<'static, Result<T, ClientError>>;

/// Chain queries consumed by the block synchronizer.
#[async_trait]
pub trait ChainQueries: Send + Sync {
    /// Height of the last finalized block.
    async fn last_finalized_height(&self) -> Result<u64, ClientError>;

    /// Hashes of the blocks at an absolute height; empty if the node knows none.
    async fn blocks_at_height(&self, height: u64) -> Result<Vec<BlockHash>, ClientError>;

    /// Live subscription to newly finalized blocks.
    async fn finalized_blocks(
        &self,
        cancel: CancellationToken,
    ) -> Result<NodeStream<FinalizedBlockInfo>, ClientError>;

    /// Current status of a block item.
    async fn block_item_status(&self, hash: TransactionHash) -> Result<BlockItemStatus, ClientError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Deterministic hash of the mock block at `height`.
pub fn mock_block_hash(height: u64) -> BlockHash {
    let mut bytes = [0u8; 32];
    bytes[..8].copy_from_slice(&height.to_be_bytes());
    bytes[31] = 0xcc;
    BlockHash::new(bytes)
}

type LiveSender = mpsc::UnboundedSender<Result<FinalizedBlockInfo, ClientError>>;

#[derive(Default)]
struct ChainState {
    height: u64,
    reported_height: Option<u64>,
    forgotten: BTreeSet<u64>,
    statuses: HashMap<TransactionHash, BlockItemStatus>,
    stalled_statuses: bool,
    live: Vec<LiveSender>,
}

/// In-memory finalized chain with blocks `0..=height`.
///
/// Every call to [`ChainQueries::blocks_at_height`] counts as a probe.
#[derive(Clone, Default)]
pub struct MockChain {
    state: Arc<Mutex<ChainState>>,
    probes: Arc<Mutex<Vec<u64>>>,
    opened: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
}

struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockChain {
    /// Chain finalized up to `height`.
    pub fn with_height(height: u64) -> Self {
        let chain = Self::default();
        chain.state.lock().height = height;
        chain
    }

    /// Finalize the next block and deliver it to live subscribers.
    pub fn finalize_next(&self) -> FinalizedBlockInfo {
        let mut state = self.state.lock();
        state.height += 1;
        let block = FinalizedBlockInfo {
            hash: mock_block_hash(state.height),
            height: state.height,
        };
        state.live.retain(|sender| sender.send(Ok(block)).is_ok());
        block
    }

    /// Deliver a block to live subscribers without changing the chain.
    pub fn announce(&self, block: FinalizedBlockInfo) {
        self.state.lock().live.retain(|sender| sender.send(Ok(block)).is_ok());
    }

    /// End every live subscription.
    pub fn close_live(&self) {
        self.state.lock().live.clear();
    }

    /// Report `height` as last finalized regardless of the actual chain.
    pub fn report_height(&self, height: u64) {
        self.state.lock().reported_height = Some(height);
    }

    /// Make the node answer "no blocks" at `height`.
    pub fn forget(&self, height: u64) {
        self.state.lock().forgotten.insert(height);
    }

    /// Make the node know `height` again.
    pub fn restore(&self, height: u64) {
        self.state.lock().forgotten.remove(&height);
    }

    /// Set the status reported for a block item.
    pub fn set_status(&self, hash: TransactionHash, status: BlockItemStatus) {
        self.state.lock().statuses.insert(hash, status);
    }

    /// Make every status query hang without answering.
    pub fn stall_statuses(&self) {
        self.state.lock().stalled_statuses = true;
    }

    /// Heights probed so far, in order.
    pub fn probes(&self) -> Vec<u64> {
        self.probes.lock().clone()
    }

    /// Live subscriptions opened so far.
    pub fn opened_subscriptions(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Live subscriptions not yet dropped.
    pub fn active_subscriptions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainQueries for MockChain {
    async fn last_finalized_height(&self) -> Result<u64, ClientError> {
        let state = self.state.lock();
        Ok(state.reported_height.unwrap_or(state.height))
    }

    async fn blocks_at_height(&self, height: u64) -> Result<Vec<BlockHash>, ClientError> {
        self.probes.lock().push(height);
        let state = self.state.lock();
        if height > state.height || state.forgotten.contains(&height) {
            return Ok(Vec::new());
        }
        Ok(vec![mock_block_hash(height)])
    }

    async fn finalized_blocks(
        &self,
        cancel: CancellationToken,
    ) -> Result<NodeStream<FinalizedBlockInfo>, ClientError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.state.lock().live.push(sender);
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_add(1, Ordering::SeqCst);

        let guard = LiveGuard(Arc::clone(&self.active));
        let stopped = async move { cancel.cancelled().await };
        Ok(UnboundedReceiverStream::new(receiver)
            .take_until(stopped)
            .map(move |item| {
                let _ = &guard;
                item
            })
            .boxed())
    }

    async fn block_item_status(&self, hash: TransactionHash) -> Result<BlockItemStatus, ClientError> {
        let status = {
            let state = self.state.lock();
            if state.stalled_statuses {
                None
            } else {
                Some(state.statuses.get(&hash).cloned())
            }
        };
        match status {
            None => future::pending().await,
            Some(status) => status.ok_or_else(|| RpcError::new(RpcCode::NotFound, "unknown block item").into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chain_heights() {
        let chain = MockChain::with_height(3);
        assert_eq!(chain.last_finalized_height().await.unwrap(), 3);
        assert_eq!(chain.blocks_at_height(2).await.unwrap(), vec![mock_block_hash(2)]);
        assert!(chain.blocks_at_height(4).await.unwrap().is_empty());
        assert_eq!(chain.probes(), vec![2, 4]);
    }

    #[tokio::test]
    async fn test_mock_chain_live_delivery() {
        let chain = MockChain::with_height(0);
        let mut live = chain.finalized_blocks(CancellationToken::new()).await.unwrap();
        let block = chain.finalize_next();
        assert_eq!(live.next().await.unwrap().unwrap(), block);
        drop(live);
        assert_eq!(chain.active_subscriptions(), 0);
        assert_eq!(chain.opened_subscriptions(), 1);
    }

    #[test]
    fn test_mock_block_hash_is_distinct() {
        assert_ne!(mock_block_hash(1), mock_block_hash(2));
    }
}
