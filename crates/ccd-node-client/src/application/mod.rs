//! # Application Layer
//!
//! The query facade: typed node operations over the transport port.

pub mod service;

pub use service::{InstanceCreation, NodeClient};
