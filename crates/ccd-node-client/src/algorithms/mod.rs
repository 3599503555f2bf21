//! # Algorithms
//!
//! Chain synchronization built on the [`ChainQueries`](crate::ports::ChainQueries) port.

pub mod synchronizer;

pub use synchronizer::{BlockSynchronizer, SyncPhase};
