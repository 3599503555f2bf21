//! # CCD Node Client
//!
//! Typed client for a blockchain node reached over an RPC transport.
//!
//! ## Purpose
//!
//! - Translate the node's wire messages into the `ccd-types` domain model,
//!   failing loudly on anything missing or unknown.
//! - Expose every node query as a typed operation on [`NodeClient`].
//! - Build chain synchronization on top: a gapless stream of finalized
//!   blocks from any height, binary search over height for a monotone
//!   predicate, and a bounded wait for a transaction to finalize.
//!
//! ## Guarantees
//!
//! | Guarantee | Where |
//! |-----------|-------|
//! | Finalized blocks strictly increasing by one, no duplicates | [`BlockSynchronizer::finalized_blocks_from`] |
//! | At most `ceil(log2(n + 1))` probes per search | [`BlockSynchronizer::find_earliest_finalized`] |
//! | Live subscription released on every exit path | [`BlockSynchronizer::wait_for_finalization`] |
//! | No request sent for invalid caller input | [`NodeClient`] |
//!
//! ## Module Structure
//!
//! ```text
//! ccd-node-client/
//! ├── domain/          # ClientError, TranslationError, RpcError, RpcMethod
//! ├── wire/            # serde mirrors of node messages
//! ├── translation/     # wire -> domain, one function per message
//! ├── ports/           # NodeTransport (outbound) + ChainQueries (inbound), mocks
//! ├── application/     # NodeClient query facade
//! ├── algorithms/      # BlockSynchronizer
//! └── config.rs        # ClientConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod translation;
pub mod wire;

// Re-exports
pub use algorithms::{BlockSynchronizer, SyncPhase};
pub use application::{InstanceCreation, NodeClient};
pub use config::{ClientConfig, DEFAULT_INVOKE_ENERGY};
pub use domain::{ClientError, RpcCode, RpcError, RpcMethod, TranslationError, TranslationErrorKind};
pub use ports::{
    mock_block_hash, ChainQueries, MockChain, MockTransport, NodeStream, NodeTransport, ReplyStream,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
