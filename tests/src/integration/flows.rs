//! # Integration Test Flows
//!
//! `NodeClient` against a [`SimulatedNode`](super::SimulatedNode):
//!
//! 1. **Catch-up then live**: a finalized block stream that starts in the
//!    past and follows the chain as it grows.
//! 2. **Submit and wait**: a transaction goes from `Received` to finalized
//!    and the waiter resolves on the announcing block.
//! 3. **Search by time**: binary search over height through real block
//!    info replies.
//! 4. **Cancellation**: every transport subscription is released.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::time::Duration;

    use ccd_node_client::{mock_block_hash, ClientConfig, ClientError, NodeClient, RpcMethod};
    use ccd_telemetry::{init_logging, TelemetryConfig};
    use ccd_types::{
        AccountAddress, AccountTransactionHeader, AccountTransactionSubmission, BlockItemStatus, BlockSelector,
        Energy, HexBytes,
    };
    use chrono::{TimeZone, Utc};
    use futures::StreamExt;
    use tokio_util::sync::CancellationToken;

    use crate::integration::simulated::{slot_time_ms, SimulatedNode};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn client(node: &SimulatedNode) -> NodeClient {
        let _ = init_logging(&TelemetryConfig::for_testing());
        NodeClient::new(Arc::new(node.transport()), ClientConfig::for_testing())
    }

    fn transfer() -> AccountTransactionSubmission {
        AccountTransactionSubmission {
            header: AccountTransactionHeader {
                sender: AccountAddress::new([1; 32]),
                nonce: 4,
                energy_amount: Energy(600),
                expiry: Utc::now() + chrono::Duration::hours(1),
            },
            payload: HexBytes::new(vec![3, 0, 1]),
            signature: BTreeMap::from([(0, BTreeMap::from([(0, HexBytes::new(vec![0xaa; 64]))]))]),
        }
    }

    async fn wait_for_subscriber(node: &SimulatedNode) {
        while node.transport().active_subscriptions() == 0 {
            tokio::task::yield_now().await;
        }
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_catch_up_then_follow_live() {
        let node = SimulatedNode::with_height(5);
        let client = client(&node);
        let mut blocks = client.get_finalized_blocks_from(2, Some(8), CancellationToken::new());

        let mut heights = Vec::new();
        for _ in 0..4 {
            heights.push(blocks.next().await.unwrap().unwrap().height);
        }
        assert_eq!(heights, vec![2, 3, 4, 5]);

        for _ in 0..3 {
            node.finalize_block();
        }
        while let Some(block) = blocks.next().await {
            let block = block.unwrap();
            assert_eq!(block.hash, mock_block_hash(block.height));
            heights.push(block.height);
        }
        assert_eq!(heights, (2..=8).collect::<Vec<_>>());
        drop(blocks);
        assert_eq!(node.transport().active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_submit_and_wait_for_finalization() {
        let node = SimulatedNode::with_height(10);
        let client = client(&node);

        let hash = client.send_account_transaction(&transfer()).await.unwrap();
        assert_eq!(
            client.get_block_item_status(hash).await.unwrap(),
            BlockItemStatus::Received
        );

        let waiter = client.clone();
        let waiting = tokio::spawn(async move {
            waiter
                .wait_for_transaction_finalization(hash, None, CancellationToken::new())
                .await
        });
        wait_for_subscriber(&node).await;
        let height = node.finalize_block();

        let outcome = waiting.await.unwrap().unwrap();
        assert_eq!(outcome.block_hash, mock_block_hash(height));
        assert_eq!(outcome.summary.hash, hash);
        assert_eq!(outcome.summary.sender(), Some(&AccountAddress::new([1; 32])));
        assert_eq!(node.transport().active_subscriptions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_uses_configured_timeout() {
        let node = SimulatedNode::with_height(10);
        let client = client(&node);
        let hash = client.send_account_transaction(&transfer()).await.unwrap();

        let err = client
            .wait_for_transaction_finalization(hash, None, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Timeout(limit) if limit == Duration::from_secs(5)));
        assert_eq!(node.transport().active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_find_first_block_by_time() {
        let node = SimulatedNode::with_height(30);
        let client = client(&node);

        let time = Utc.timestamp_millis_opt(12_345).unwrap();
        let info = client
            .find_first_finalized_block_no_later_than(time, 0, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(info.height, 13);
        assert_eq!(info.slot_time.timestamp_millis(), slot_time_ms(13));

        let later = Utc.timestamp_millis_opt(slot_time_ms(31)).unwrap();
        let none = client
            .find_first_finalized_block_no_later_than(later, 0, None)
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_search_probe_count_is_logarithmic() {
        let node = SimulatedNode::with_height(1_000);
        let client = client(&node);

        let found = client
            .find_earliest_finalized(0, None, |block| async move {
                Ok((block.height >= 617).then_some(block.height))
            })
            .await
            .unwrap();
        assert_eq!(found, Some(617));
        assert!(node.transport().call_count(RpcMethod::GetBlocksAtHeight) <= 10);
    }

    #[tokio::test]
    async fn test_cancel_releases_transport() {
        let node = SimulatedNode::with_height(50);
        let client = client(&node);
        let cancel = CancellationToken::new();
        let mut blocks = client.get_finalized_blocks_from(0, None, cancel.clone());

        for expected in 0..3 {
            assert_eq!(blocks.next().await.unwrap().unwrap().height, expected);
        }
        assert_eq!(node.transport().active_subscriptions(), 1);

        cancel.cancel();
        assert!(blocks.next().await.is_none());
        assert_eq!(node.transport().active_subscriptions(), 0);
        assert_eq!(node.height(), 50);
    }

    #[tokio::test]
    async fn test_consensus_status_drives_sync_bound() {
        let node = SimulatedNode::with_height(7);
        let client = client(&node);
        let status = client.get_consensus_status().await.unwrap();
        assert_eq!(status.last_finalized_block_height, 7);

        let info = client
            .get_block_info(BlockSelector::Given(mock_block_hash(3)))
            .await
            .unwrap();
        assert_eq!(info.height, 3);
    }
}
