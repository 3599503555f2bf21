//! # Ports Module
//!
//! Hexagonal ports: the transport the facade drives (outbound) and the chain
//! queries the synchronizer consumes (inbound).

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
