//! # CCD Node Client Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/
//! │   ├── simulated.rs   # SimulatedNode: a scripted chain behind MockTransport
//! │   └── flows.rs       # End-to-end flows through NodeClient
//! └── benches/           # Translation and synchronizer benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ccd-tests
//! cargo bench -p ccd-tests
//! ```

pub mod integration;
