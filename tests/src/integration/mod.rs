//! Cross-crate flows: facade, translation and synchronizer against a
//! simulated node.

pub mod flows;
pub mod simulated;

pub use simulated::SimulatedNode;
