//! # Node and Identity Metadata

use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::identifiers::HexBytes;
use crate::primitives::{duration_millis, BakerId, Timestamp};

/// Identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpInfo {
    /// Identity.
    pub identity: u32,
    /// Name.
    pub name: String,
    /// URL.
    pub url: String,
    /// Description.
    pub description: String,
    /// Verify key.
    pub verify_key: HexBytes,
    /// Credential deployment verify key.
    pub cdi_verify_key: HexBytes,
}

/// Anonymity revoker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArInfo {
    /// Identity.
    pub identity: u32,
    /// Name.
    pub name: String,
    /// URL.
    pub url: String,
    /// Description.
    pub description: String,
    /// Public key.
    pub public_key: HexBytes,
}

/// Global cryptographic parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptographicParameters {
    /// Genesis string.
    pub genesis_string: String,
    /// Bulletproof generators.
    pub bulletproof_generators: HexBytes,
    /// On-chain commitment key.
    pub on_chain_commitment_key: HexBytes,
}

/// Network statistics of the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeNetworkInfo {
    /// Node id.
    pub node_id: String,
    /// Packets sent.
    pub peer_total_sent: u64,
    /// Packets received.
    pub peer_total_received: u64,
    /// Average inbound bytes per second.
    pub avg_bps_in: u64,
    /// Average outbound bytes per second.
    pub avg_bps_out: u64,
}

/// Committee membership of a baker node that is not actively participating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassiveCommitteeInfo {
    /// Not in the committee.
    NotInCommittee,
    /// Added, effective next epoch.
    AddedButNotActiveInCommittee,
    /// In the committee but the node's keys do not match.
    AddedButWrongKeys,
}

/// Committee role of a baker node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BakerCommitteeStatus {
    /// Not an active member.
    Passive(PassiveCommitteeInfo),
    /// Active baker.
    ActiveBaker,
    /// Active baker and finalizer.
    ActiveFinalizer,
}

/// Consensus role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeConsensusStatus {
    /// Consensus is not running.
    NotRunning,
    /// Running without baker keys.
    Passive,
    /// Running with baker keys.
    Active {
        /// Configured baker id.
        baker_id: BakerId,
        /// Committee status.
        status: BakerCommitteeStatus,
    },
}

/// Kind of node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeDetails {
    /// Bootstrapper, no consensus.
    Bootstrapper,
    /// Regular node.
    Node(NodeConsensusStatus),
}

/// Information about the queried node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfo {
    /// Software version.
    pub peer_version: String,
    /// Local time of the node.
    pub local_time: Timestamp,
    /// Uptime.
    #[serde(with = "duration_millis")]
    pub peer_uptime: Duration,
    /// Network statistics.
    pub network_info: NodeNetworkInfo,
    /// Node kind.
    pub details: NodeDetails,
}

/// Catch-up state of a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerCatchupStatus {
    /// Up to date.
    UpToDate,
    /// Pending catch-up.
    Pending,
    /// Catching up.
    CatchingUp,
}

/// Consensus view of a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerConsensusInfo {
    /// Peer is a bootstrapper.
    Bootstrapper,
    /// Regular peer.
    Node(PeerCatchupStatus),
}

/// Traffic statistics for a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerNetworkStats {
    /// Packets sent.
    pub packets_sent: u64,
    /// Packets received.
    pub packets_received: u64,
    /// Latency in milliseconds.
    pub latency: u64,
}

/// A connected peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    /// Peer id.
    pub peer_id: String,
    /// IP address.
    pub ip: IpAddr,
    /// Port.
    pub port: u16,
    /// Traffic statistics.
    pub network_stats: PeerNetworkStats,
    /// Consensus view.
    pub consensus_info: PeerConsensusInfo,
}
