//! # Outbound Ports
//!
//! The RPC transport the facade drives. Framing, channels and
//! authentication live behind this trait.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;

use crate::domain::{RpcCode, RpcError, RpcMethod};

/// Lazy sequence of raw replies from a server-streaming call.
pub type ReplyStream = BoxStream<'static, Result<Value, RpcError>>;

/// RPC transport - outbound port.
#[async_trait]
pub trait NodeTransport: Send + Sync {
    /// Issue a unary call and await its single reply.
    async fn call(&self, method: RpcMethod, request: Value) -> Result<Value, RpcError>;

    /// Open a server-streaming call.
    ///
    /// Once `cancel` fires the returned stream must end and the underlying
    /// subscription must be released.
    async fn subscribe(
        &self,
        method: RpcMethod,
        request: Value,
        cancel: CancellationToken,
    ) -> Result<ReplyStream, RpcError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

type Handler = Arc<dyn Fn(&Value) -> Result<Value, RpcError> + Send + Sync>;
type LiveSender = mpsc::UnboundedSender<Result<Value, RpcError>>;

#[derive(Default)]
struct MockState {
    handlers: HashMap<RpcMethod, Handler>,
    streams: HashMap<RpcMethod, Vec<Result<Value, RpcError>>>,
    live: HashMap<RpcMethod, Vec<LiveSender>>,
    calls: Vec<(RpcMethod, Value)>,
    subscriptions: Vec<(RpcMethod, Value)>,
}

/// In-memory transport.
///
/// Unary methods are served by handlers or canned replies. A subscription to
/// a method with canned stream items replays them and ends; any other
/// subscription stays open as a live channel fed through [`MockTransport::push`].
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
    active: Arc<AtomicUsize>,
}

struct SubscriptionGuard(Arc<AtomicUsize>);

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl MockTransport {
    /// Empty transport; every call fails with `UNIMPLEMENTED`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `method` with `reply`.
    pub fn reply(&self, method: RpcMethod, reply: Value) {
        self.on_call(method, move |_| Ok(reply.clone()));
    }

    /// Always fail `method` with `error`.
    pub fn fail(&self, method: RpcMethod, error: RpcError) {
        self.on_call(method, move |_| Err(error.clone()));
    }

    /// Answer `method` by running `handler` on the request.
    pub fn on_call(
        &self,
        method: RpcMethod,
        handler: impl Fn(&Value) -> Result<Value, RpcError> + Send + Sync + 'static,
    ) {
        self.state.lock().handlers.insert(method, Arc::new(handler));
    }

    /// Serve a finite stream for `method`.
    pub fn stream(&self, method: RpcMethod, items: Vec<Result<Value, RpcError>>) {
        self.state.lock().streams.insert(method, items);
    }

    /// Deliver `item` to every open live subscription of `method`.
    pub fn push(&self, method: RpcMethod, item: Value) {
        let mut state = self.state.lock();
        if let Some(senders) = state.live.get_mut(&method) {
            senders.retain(|sender| sender.send(Ok(item.clone())).is_ok());
        }
    }

    /// End every open live subscription of `method`.
    pub fn close(&self, method: RpcMethod) {
        self.state.lock().live.remove(&method);
    }

    /// Every unary call so far, in order.
    pub fn calls(&self) -> Vec<(RpcMethod, Value)> {
        self.state.lock().calls.clone()
    }

    /// Number of unary calls of `method`.
    pub fn call_count(&self, method: RpcMethod) -> usize {
        self.state.lock().calls.iter().filter(|(m, _)| *m == method).count()
    }

    /// Every subscription opened so far, in order.
    pub fn subscriptions(&self) -> Vec<(RpcMethod, Value)> {
        self.state.lock().subscriptions.clone()
    }

    /// Subscriptions whose stream has not been dropped yet.
    pub fn active_subscriptions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NodeTransport for MockTransport {
    async fn call(&self, method: RpcMethod, request: Value) -> Result<Value, RpcError> {
        let handler = {
            let mut state = self.state.lock();
            state.calls.push((method, request.clone()));
            state.handlers.get(&method).cloned()
        };
        match handler {
            Some(handler) => handler(&request),
            None => Err(RpcError::new(RpcCode::Unimplemented, method.name())),
        }
    }

    async fn subscribe(
        &self,
        method: RpcMethod,
        request: Value,
        cancel: CancellationToken,
    ) -> Result<ReplyStream, RpcError> {
        let source: ReplyStream = {
            let mut state = self.state.lock();
            state.subscriptions.push((method, request));
            match state.streams.get(&method) {
                Some(items) => stream::iter(items.clone()).boxed(),
                None => {
                    let (sender, receiver) = mpsc::unbounded_channel();
                    state.live.entry(method).or_default().push(sender);
                    UnboundedReceiverStream::new(receiver).boxed()
                }
            }
        };

        self.active.fetch_add(1, Ordering::SeqCst);
        let guard = SubscriptionGuard(Arc::clone(&self.active));
        let stopped = async move { cancel.cancelled().await };
        Ok(source
            .take_until(stopped)
            .map(move |item| {
                let _ = &guard;
                item
            })
            .boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unhandled_call_is_unimplemented() {
        let transport = MockTransport::new();
        let err = transport.call(RpcMethod::GetNodeInfo, json!({})).await.unwrap_err();
        assert_eq!(err.code, RpcCode::Unimplemented);
        assert_eq!(transport.call_count(RpcMethod::GetNodeInfo), 1);
    }

    #[tokio::test]
    async fn test_canned_stream_ends() {
        let transport = MockTransport::new();
        transport.stream(RpcMethod::GetBakerList, vec![Ok(json!({ "value": 1 })), Ok(json!({ "value": 2 }))]);
        let items: Vec<_> = transport
            .subscribe(RpcMethod::GetBakerList, json!({}), CancellationToken::new())
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(items.len(), 2);
        assert_eq!(transport.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_live_subscription_released_on_cancel() {
        let transport = MockTransport::new();
        let cancel = CancellationToken::new();
        let mut live = transport
            .subscribe(RpcMethod::GetFinalizedBlocks, json!({}), cancel.clone())
            .await
            .unwrap();
        assert_eq!(transport.active_subscriptions(), 1);

        transport.push(RpcMethod::GetFinalizedBlocks, json!({ "height": 1 }));
        assert_eq!(live.next().await.unwrap().unwrap(), json!({ "height": 1 }));

        cancel.cancel();
        assert!(live.next().await.is_none());
        drop(live);
        assert_eq!(transport.active_subscriptions(), 0);
    }
}
