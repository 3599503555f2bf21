//! # CCD Types
//!
//! Stable, strongly typed domain model of everything a node reports.
//!
//! Values here are immutable once built. They are produced either by the
//! node client's wire translation or by a typed constructor that validates
//! its input and fails with [`ValidationError`].
//!
//! ## Design Principles
//!
//! - **Closed sums**: every concept the node reports in several shapes
//!   (accounts, chain parameters, reject reasons, events) is an enum that is
//!   matched exhaustively. A new shape is a compile error, not a default.
//! - **Version tags over optional fields**: a V0 record never carries a
//!   V1-only field, so `ChainParameters::V0` has no `time_parameters`.
//! - **Exact money**: amounts are micro CCD in a `u64` newtype.
//!
//! ## Module Structure
//!
//! ```text
//! ccd-types/
//! ├── identifiers      # hashes, addresses, credential ids, hex bytes
//! ├── primitives       # amounts, energy, rates, protocol version
//! ├── account          # AccountInfo and its parts
//! ├── chain_parameters # ChainParameters V0..V3
//! ├── consensus        # blocks, consensus status, election info
//! ├── contracts        # instances, modules, invocation results
//! ├── reject_reason    # RejectReason
//! ├── summary          # block item summaries and status
//! ├── rewards          # tokenomics, pools, special events
//! ├── updates          # update payloads
//! ├── node             # node, peer and identity metadata
//! ├── requests         # caller inputs (selectors, submissions)
//! └── errors           # ValidationError
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod account;
pub mod chain_parameters;
pub mod consensus;
pub mod contracts;
pub mod errors;
pub mod identifiers;
pub mod node;
pub mod primitives;
pub mod reject_reason;
pub mod requests;
pub mod rewards;
pub mod summary;
pub mod updates;

pub use account::*;
pub use chain_parameters::*;
pub use consensus::*;
pub use contracts::*;
pub use errors::*;
pub use identifiers::*;
pub use node::*;
pub use primitives::*;
pub use reject_reason::*;
pub use requests::*;
pub use rewards::*;
pub use summary::*;
pub use updates::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
