//! # Block Synchronizer
//!
//! Algorithms over finalized chain data built purely on [`ChainQueries`]:
//!
//! - **Catch-up/live merge**: every finalized block from a start height, one
//!   per height, strictly increasing, with no gaps and no duplicates.
//! - **Earliest finalized search**: binary search over height for a monotone
//!   asynchronous predicate.
//! - **Finalization wait**: resolve once a block item is finalized, bounded by
//!   an optional timeout.
//!
//! ## Merge state machine
//!
//! ```text
//! CatchingUp { cursor, cached_bound } --(cursor > refreshed bound)--> Live { cursor }
//!                                    \--(no block at cursor)-------/
//! ```
//!
//! The live subscription opens on the first pull, before any catch-up probe,
//! so a block finalized while catching up is never missed. There is no
//! transition back from `Live`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use ccd_types::{BlockHash, BlockItemSummaryInBlock, FinalizedBlockInfo, TransactionHash, ValidationError};
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::ClientError;
use crate::ports::{ChainQueries, NodeStream};

/// Phase of the catch-up/live merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Fetching already finalized blocks by height.
    CatchingUp {
        /// Next height to deliver.
        cursor: u64,
        /// Last finalized height known, refreshed once the cursor passes it.
        cached_bound: Option<u64>,
    },
    /// Following the live subscription, filling gaps by probe.
    Live {
        /// Next height to deliver.
        cursor: u64,
    },
}

impl SyncPhase {
    /// Next height to deliver.
    pub fn cursor(&self) -> u64 {
        match self {
            Self::CatchingUp { cursor, .. } | Self::Live { cursor } => *cursor,
        }
    }
}

/// Run `fut` unless `cancel` fires first.
async fn guarded<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T, ClientError>>,
) -> Option<Result<T, ClientError>> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        result = fut => Some(result),
    }
}

struct Merge<Q: ?Sized> {
    chain: Arc<Q>,
    phase: SyncPhase,
    end: Option<u64>,
    cancel: CancellationToken,
    live_cancel: CancellationToken,
    live: Option<NodeStream<FinalizedBlockInfo>>,
    pending: Option<FinalizedBlockInfo>,
    done: bool,
}

impl<Q: ChainQueries + ?Sized> Merge<Q> {
    fn fail(&mut self, error: ClientError) -> Option<Result<FinalizedBlockInfo, ClientError>> {
        self.done = true;
        self.live_cancel.cancel();
        Some(Err(error))
    }

    fn finish(&mut self) -> Option<Result<FinalizedBlockInfo, ClientError>> {
        self.done = true;
        self.live_cancel.cancel();
        None
    }

    fn deliver(&mut self, block: FinalizedBlockInfo) -> Option<Result<FinalizedBlockInfo, ClientError>> {
        self.phase = match self.phase {
            SyncPhase::CatchingUp { cached_bound, .. } => SyncPhase::CatchingUp {
                cursor: block.height + 1,
                cached_bound,
            },
            SyncPhase::Live { .. } => SyncPhase::Live {
                cursor: block.height + 1,
            },
        };
        Some(Ok(block))
    }

    fn go_live(&mut self, cursor: u64) {
        debug!(cursor, "Switching from catch-up to live blocks");
        self.phase = SyncPhase::Live { cursor };
    }

    async fn probe(&mut self, height: u64) -> Option<Result<Option<BlockHash>, ClientError>> {
        guarded(&self.cancel, self.chain.blocks_at_height(height))
            .await
            .map(|result| result.map(|hashes| hashes.last().copied()))
    }

    async fn next(&mut self) -> Option<Result<FinalizedBlockInfo, ClientError>> {
        loop {
            if self.done {
                return None;
            }
            if self.cancel.is_cancelled() {
                debug!(cursor = self.phase.cursor(), "Finalized block stream cancelled");
                return self.finish();
            }
            let cursor = self.phase.cursor();
            if self.end.is_some_and(|end| cursor > end) {
                return self.finish();
            }

            if self.live.is_none() {
                let opened = guarded(&self.cancel, self.chain.finalized_blocks(self.live_cancel.clone())).await;
                match opened {
                    None => return self.finish(),
                    Some(Err(e)) => return self.fail(e),
                    Some(Ok(live)) => self.live = Some(live),
                }
            }

            match self.phase {
                SyncPhase::CatchingUp { cursor, cached_bound } => {
                    let bound = match cached_bound {
                        Some(bound) if cursor <= bound => bound,
                        _ => {
                            let refreshed = match guarded(&self.cancel, self.chain.last_finalized_height()).await {
                                None => return self.finish(),
                                Some(Err(e)) => return self.fail(e),
                                Some(Ok(height)) => height,
                            };
                            debug!(cursor, bound = refreshed, "Refreshed last finalized height");
                            if cursor > refreshed {
                                self.go_live(cursor);
                                continue;
                            }
                            refreshed
                        }
                    };
                    self.phase = SyncPhase::CatchingUp {
                        cursor,
                        cached_bound: Some(bound),
                    };

                    match self.probe(cursor).await {
                        None => return self.finish(),
                        Some(Err(e)) => return self.fail(e),
                        Some(Ok(Some(hash))) => return self.deliver(FinalizedBlockInfo { hash, height: cursor }),
                        Some(Ok(None)) => {
                            debug!(height = cursor, "No block at height below the finalized bound");
                            self.go_live(cursor);
                        }
                    }
                }
                SyncPhase::Live { cursor } => {
                    let block = match self.pending.take() {
                        Some(block) => block,
                        None => {
                            let Some(live) = self.live.as_mut() else {
                                return self.finish();
                            };
                            let next = tokio::select! {
                                biased;
                                _ = self.cancel.cancelled() => return self.finish(),
                                next = live.next() => next,
                            };
                            match next {
                                None => return self.finish(),
                                Some(Err(e)) => return self.fail(e),
                                Some(Ok(block)) => block,
                            }
                        }
                    };

                    if block.height < cursor {
                        continue;
                    }
                    if block.height == cursor {
                        return self.deliver(block);
                    }

                    self.pending = Some(block);
                    match self.probe(cursor).await {
                        None => return self.finish(),
                        Some(Err(e)) => return self.fail(e),
                        Some(Ok(Some(hash))) => return self.deliver(FinalizedBlockInfo { hash, height: cursor }),
                        Some(Ok(None)) => return self.fail(ClientError::MissingFinalizedBlock { height: cursor }),
                    }
                }
            }
        }
    }
}

/// Synchronization algorithms over a [`ChainQueries`] implementation.
pub struct BlockSynchronizer<Q: ?Sized> {
    chain: Arc<Q>,
}

impl<Q: ?Sized> Clone for BlockSynchronizer<Q> {
    fn clone(&self) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
        }
    }
}

impl<Q: ChainQueries + ?Sized + 'static> BlockSynchronizer<Q> {
    /// Synchronizer over `chain`.
    pub fn new(chain: Arc<Q>) -> Self {
        Self { chain }
    }

    /// Every finalized block from height `start`, up to and including `end`.
    ///
    /// Without `end` the stream follows the chain until `cancel` fires. The
    /// first error ends the stream. An already cancelled token yields an
    /// empty stream without touching the node.
    ///
    /// Nothing is requested until the first pull. That pull opens the live
    /// subscription before any catch-up probe; blocks finalized between
    /// construction and the first pull are fetched by the catch-up phase.
    pub fn finalized_blocks_from(
        &self,
        start: u64,
        end: Option<u64>,
        cancel: CancellationToken,
    ) -> NodeStream<FinalizedBlockInfo> {
        if cancel.is_cancelled() {
            return stream::empty().boxed();
        }
        let merge = Merge {
            chain: Arc::clone(&self.chain),
            phase: SyncPhase::CatchingUp {
                cursor: start,
                cached_bound: None,
            },
            end,
            live_cancel: cancel.child_token(),
            cancel,
            live: None,
            pending: None,
            done: false,
        };
        stream::unfold(merge, |mut merge| async move {
            let item = merge.next().await?;
            Some((item, merge))
        })
        .fuse()
        .boxed()
    }

    /// Value of `predicate` at the lowest height in `[from, to]` where it
    /// holds, `None` if it holds nowhere.
    ///
    /// `to` defaults to the last finalized height. The predicate must be
    /// monotone: once it holds at some height it holds at every greater
    /// height. Otherwise the result is unspecified. Each probe is handed the
    /// canonical block at that height.
    pub async fn find_earliest_finalized<T, F, Fut>(
        &self,
        from: u64,
        to: Option<u64>,
        mut predicate: F,
    ) -> Result<Option<T>, ClientError>
    where
        F: FnMut(FinalizedBlockInfo) -> Fut,
        Fut: Future<Output = Result<Option<T>, ClientError>>,
    {
        let to = match to {
            Some(to) => to,
            None => self.chain.last_finalized_height().await?,
        };
        if from > to {
            return Err(ValidationError::InvalidRange { from, to }.into());
        }

        let mut lower = from;
        let mut upper = to.saturating_add(1);
        let mut found = None;
        while lower < upper {
            let mid = lower + (upper - lower) / 2;
            let hash = self
                .chain
                .blocks_at_height(mid)
                .await?
                .first()
                .copied()
                .ok_or(ClientError::MissingFinalizedBlock { height: mid })?;

            match predicate(FinalizedBlockInfo { hash, height: mid }).await? {
                Some(value) => {
                    found = Some(value);
                    upper = mid;
                }
                None => lower = mid + 1,
            }
        }
        debug!(from, to, found = found.is_some(), "Earliest finalized search done");
        Ok(found)
    }

    /// Outcome of `hash` once it is in a finalized block.
    ///
    /// Returns at once if it already is. Otherwise the status is re-checked
    /// on every newly finalized block. `timeout` bounds the whole wait,
    /// including the first status check, and every node call is raced
    /// against `cancel`. The live subscription is released before any error
    /// surfaces.
    pub async fn wait_for_finalization(
        &self,
        hash: TransactionHash,
        timeout: Option<Duration>,
        cancel: CancellationToken,
    ) -> Result<BlockItemSummaryInBlock, ClientError> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        let live_cancel = cancel.child_token();
        let wait = self.follow_until_finalized(hash, live_cancel.clone());
        let result = match timeout {
            Some(limit) => tokio::time::timeout(limit, wait)
                .await
                .unwrap_or(Err(ClientError::Timeout(limit))),
            None => wait.await,
        };
        live_cancel.cancel();
        result
    }

    async fn finalized_outcome(
        &self,
        hash: TransactionHash,
        cancel: &CancellationToken,
    ) -> Result<Option<BlockItemSummaryInBlock>, ClientError> {
        let status = guarded(cancel, self.chain.block_item_status(hash))
            .await
            .ok_or(ClientError::Cancelled)??;
        Ok(status.into_finalized())
    }

    async fn follow_until_finalized(
        &self,
        hash: TransactionHash,
        cancel: CancellationToken,
    ) -> Result<BlockItemSummaryInBlock, ClientError> {
        if let Some(outcome) = self.finalized_outcome(hash, &cancel).await? {
            info!(transaction = %hash, block = %outcome.block_hash, "Transaction already finalized");
            return Ok(outcome);
        }

        let mut blocks = guarded(&cancel, self.chain.finalized_blocks(cancel.clone()))
            .await
            .ok_or(ClientError::Cancelled)??;

        // The item may have been finalized before the subscription opened.
        if let Some(outcome) = self.finalized_outcome(hash, &cancel).await? {
            info!(transaction = %hash, block = %outcome.block_hash, "Transaction finalized");
            return Ok(outcome);
        }

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                next = blocks.next() => next,
            };
            let block = match next {
                None => return Err(ClientError::UnexpectedEndOfStream),
                Some(result) => result?,
            };
            debug!(transaction = %hash, height = block.height, "Re-checking status on new block");
            if let Some(outcome) = self.finalized_outcome(hash, &cancel).await? {
                info!(transaction = %hash, block = %outcome.block_hash, "Transaction finalized");
                return Ok(outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{mock_block_hash, MockChain};
    use ccd_types::{BlockItemStatus, BlockItemSummary, BlockItemSummaryDetails, Energy, UpdatePayload};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn sync(chain: &MockChain) -> BlockSynchronizer<MockChain> {
        BlockSynchronizer::new(Arc::new(chain.clone()))
    }

    fn block(height: u64) -> FinalizedBlockInfo {
        FinalizedBlockInfo {
            hash: mock_block_hash(height),
            height,
        }
    }

    fn outcome(hash: TransactionHash) -> BlockItemSummaryInBlock {
        BlockItemSummaryInBlock {
            block_hash: mock_block_hash(4),
            summary: BlockItemSummary {
                index: 0,
                energy_cost: Energy(0),
                hash,
                details: BlockItemSummaryDetails::Update {
                    effective_time: Utc.timestamp_millis_opt(0).unwrap(),
                    payload: UpdatePayload::MinBlockTime(Duration::from_secs(2)),
                },
            },
        }
    }

    async fn heights(stream: NodeStream<FinalizedBlockInfo>) -> Vec<u64> {
        stream.map(|block| block.unwrap().height).collect().await
    }

    async fn wait_for_subscriber(chain: &MockChain) {
        while chain.opened_subscriptions() == 0 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_catch_up_then_live() {
        let chain = MockChain::with_height(12);
        chain.report_height(10);
        let mut blocks = sync(&chain).finalized_blocks_from(5, Some(12), CancellationToken::new());

        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(blocks.next().await.unwrap().unwrap().height);
        }
        chain.announce(block(9));
        chain.announce(block(11));
        chain.announce(block(12));
        seen.extend(heights(blocks).await);

        assert_eq!(seen, vec![5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(chain.opened_subscriptions(), 1);
        assert_eq!(chain.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_bound_refreshed_only_when_passed() {
        let chain = MockChain::with_height(10);
        let blocks = sync(&chain).finalized_blocks_from(0, Some(10), CancellationToken::new());
        assert_eq!(heights(blocks).await, (0..=10).collect::<Vec<_>>());
        assert_eq!(chain.probes(), (0..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_live_gap_is_filled() {
        let chain = MockChain::with_height(13);
        chain.report_height(10);
        let mut blocks = sync(&chain).finalized_blocks_from(9, Some(13), CancellationToken::new());

        assert_eq!(blocks.next().await.unwrap().unwrap(), block(9));
        chain.announce(block(13));
        assert_eq!(heights(blocks).await, vec![10, 11, 12, 13]);
        assert!(chain.probes().ends_with(&[11, 12]));
    }

    #[tokio::test]
    async fn test_height_regression_moves_to_live() {
        let chain = MockChain::with_height(10);
        chain.forget(7);
        let mut blocks = sync(&chain).finalized_blocks_from(5, Some(8), CancellationToken::new());

        assert_eq!(blocks.next().await.unwrap().unwrap().height, 5);
        assert_eq!(blocks.next().await.unwrap().unwrap().height, 6);

        chain.announce(block(7));
        chain.announce(block(8));
        assert_eq!(heights(blocks).await, vec![7, 8]);
        assert_eq!(chain.probes(), vec![5, 6, 7]);
    }

    #[tokio::test]
    async fn test_missing_block_in_gap_ends_stream() {
        let chain = MockChain::with_height(3);
        chain.report_height(2);
        chain.forget(3);
        let mut blocks = sync(&chain).finalized_blocks_from(3, None, CancellationToken::new());
        let pulling = tokio::spawn(async move {
            let first = blocks.next().await;
            let second = blocks.next().await;
            (first, second)
        });
        wait_for_subscriber(&chain).await;
        chain.announce(block(4));

        let (first, second) = pulling.await.unwrap();
        let err = first.unwrap().unwrap_err();
        assert!(matches!(err, ClientError::MissingFinalizedBlock { height: 3 }));
        assert!(second.is_none());
        assert_eq!(chain.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_cancel_stops_within_one_pull() {
        let chain = MockChain::with_height(100);
        let cancel = CancellationToken::new();
        let mut blocks = sync(&chain).finalized_blocks_from(0, None, cancel.clone());

        assert_eq!(blocks.next().await.unwrap().unwrap().height, 0);
        assert_eq!(blocks.next().await.unwrap().unwrap().height, 1);
        cancel.cancel();
        assert!(blocks.next().await.is_none());
        assert!(blocks.next().await.is_none());
        assert_eq!(chain.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_pre_cancelled_stream_is_empty() {
        let chain = MockChain::with_height(5);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let blocks = sync(&chain).finalized_blocks_from(0, None, cancel);
        assert!(heights(blocks).await.is_empty());
        assert_eq!(chain.opened_subscriptions(), 0);
        assert!(chain.probes().is_empty());
    }

    #[tokio::test]
    async fn test_find_earliest_probe_sequence() {
        let chain = MockChain::with_height(20);
        let found = sync(&chain)
            .find_earliest_finalized(0, Some(20), |block| async move {
                Ok((block.height >= 7).then_some(block.height))
            })
            .await
            .unwrap();
        assert_eq!(found, Some(7));
        assert_eq!(chain.probes(), vec![10, 5, 8, 7, 6]);
    }

    #[tokio::test]
    async fn test_find_earliest_defaults_to_last_finalized() {
        let chain = MockChain::with_height(3);
        let found = sync(&chain)
            .find_earliest_finalized(0, None, |block| async move { Ok(Some(block.hash)) })
            .await
            .unwrap();
        assert_eq!(found, Some(mock_block_hash(0)));
        assert_eq!(chain.probes(), vec![2, 1, 0]);
    }

    #[tokio::test]
    async fn test_find_earliest_none() {
        let chain = MockChain::with_height(8);
        let found: Option<u64> = sync(&chain)
            .find_earliest_finalized(2, Some(8), |_| async { Ok(None) })
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_find_earliest_rejects_inverted_range() {
        let chain = MockChain::with_height(8);
        let err = sync(&chain)
            .find_earliest_finalized(5, Some(2), |_| async { Ok(Some(())) })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::InvalidRange { from: 5, to: 2 })));
        assert!(chain.probes().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_find_earliest_is_logarithmic(
            (from, to, threshold) in (0u64..500, 0u64..500)
                .prop_flat_map(|(from, span)| (Just(from), Just(from + span), from..=from + span + 1))
        ) {
            let chain = MockChain::with_height(to);
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let found = runtime
                .block_on(sync(&chain).find_earliest_finalized(from, Some(to), move |block| async move {
                    Ok((block.height >= threshold).then_some(block.height))
                }))
                .unwrap();

            prop_assert_eq!(found, (threshold <= to).then_some(threshold));
            // ceil(log2(n + 1)) for n candidate heights
            let candidates = to - from + 1;
            let bound = (u64::BITS - candidates.leading_zeros()) as usize;
            prop_assert!(chain.probes().len() <= bound);
        }
    }

    #[tokio::test]
    async fn test_wait_already_finalized_opens_nothing() {
        let chain = MockChain::with_height(4);
        let tx = TransactionHash::new([1; 32]);
        chain.set_status(tx, BlockItemStatus::Finalized(outcome(tx)));

        let result = sync(&chain)
            .wait_for_finalization(tx, None, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result, outcome(tx));
        assert_eq!(chain.opened_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_wait_resolves_on_new_block() {
        let chain = MockChain::with_height(3);
        let tx = TransactionHash::new([2; 32]);
        chain.set_status(tx, BlockItemStatus::Received);

        let synchronizer = sync(&chain);
        let waiting =
            tokio::spawn(async move { synchronizer.wait_for_finalization(tx, None, CancellationToken::new()).await });
        wait_for_subscriber(&chain).await;

        chain.set_status(tx, BlockItemStatus::Finalized(outcome(tx)));
        chain.finalize_next();
        assert_eq!(waiting.await.unwrap().unwrap(), outcome(tx));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_timeout_releases_subscription() {
        let chain = MockChain::with_height(3);
        let tx = TransactionHash::new([3; 32]);
        chain.set_status(tx, BlockItemStatus::Received);

        let err = sync(&chain)
            .wait_for_finalization(tx, Some(Duration::from_secs(1)), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Timeout(limit) if limit == Duration::from_secs(1)));
        assert_eq!(chain.opened_subscriptions(), 1);
        assert_eq!(chain.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_wait_unexpected_end_of_stream() {
        let chain = MockChain::with_height(3);
        let tx = TransactionHash::new([4; 32]);
        chain.set_status(tx, BlockItemStatus::Received);

        let synchronizer = sync(&chain);
        let waiting =
            tokio::spawn(async move { synchronizer.wait_for_finalization(tx, None, CancellationToken::new()).await });
        wait_for_subscriber(&chain).await;
        chain.close_live();

        assert!(matches!(waiting.await.unwrap(), Err(ClientError::UnexpectedEndOfStream)));
    }

    #[tokio::test]
    async fn test_wait_cancelled() {
        let chain = MockChain::with_height(3);
        let tx = TransactionHash::new([5; 32]);
        chain.set_status(tx, BlockItemStatus::Received);
        let cancel = CancellationToken::new();

        let synchronizer = sync(&chain);
        let token = cancel.clone();
        let waiting = tokio::spawn(async move { synchronizer.wait_for_finalization(tx, None, token).await });
        wait_for_subscriber(&chain).await;
        cancel.cancel();

        assert!(matches!(waiting.await.unwrap(), Err(ClientError::Cancelled)));
        assert_eq!(chain.active_subscriptions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_timeout_covers_first_status_check() {
        let chain = MockChain::with_height(3);
        chain.stall_statuses();
        let tx = TransactionHash::new([6; 32]);

        let synchronizer = sync(&chain);
        let wait = synchronizer.wait_for_finalization(tx, Some(Duration::from_secs(1)), CancellationToken::new());
        let err = tokio::time::timeout(Duration::from_secs(60), wait)
            .await
            .expect("wait bounded by its own timeout")
            .unwrap_err();
        assert!(matches!(err, ClientError::Timeout(limit) if limit == Duration::from_secs(1)));
        assert_eq!(chain.opened_subscriptions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_with_cancelled_token_returns_at_once() {
        let chain = MockChain::with_height(3);
        chain.stall_statuses();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let synchronizer = sync(&chain);
        let wait = synchronizer.wait_for_finalization(TransactionHash::new([7; 32]), None, cancel);
        let err = tokio::time::timeout(Duration::from_secs(60), wait)
            .await
            .expect("cancelled wait returns")
            .unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
        assert_eq!(chain.opened_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_status_check() {
        let chain = MockChain::with_height(3);
        chain.stall_statuses();
        let cancel = CancellationToken::new();

        let synchronizer = sync(&chain);
        let token = cancel.clone();
        let waiting = tokio::spawn(async move {
            synchronizer
                .wait_for_finalization(TransactionHash::new([8; 32]), None, token)
                .await
        });
        tokio::task::yield_now().await;
        cancel.cancel();

        assert!(matches!(waiting.await.unwrap(), Err(ClientError::Cancelled)));
        assert_eq!(chain.active_subscriptions(), 0);
    }
}
