//! Node, peer and identity metadata messages.

use serde::{Deserialize, Serialize};

use super::{Bytes, Empty};

/// Human readable description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Description {
    pub name: String,
    pub url: String,
    pub description: String,
}

/// Identity provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct IpInfo {
    pub identity: Option<u32>,
    pub description: Option<Description>,
    pub verify_key: Option<Bytes>,
    pub cdi_verify_key: Option<Bytes>,
}

/// Anonymity revoker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ArInfo {
    pub identity: Option<u32>,
    pub description: Option<Description>,
    pub public_key: Option<Bytes>,
}

/// Node network counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NetworkInfo {
    pub node_id: Option<String>,
    pub peer_total_sent: u64,
    pub peer_total_received: u64,
    pub avg_bps_in: u64,
    pub avg_bps_out: u64,
}

/// Passive committee codes.
pub mod passive_committee_info {
    #![allow(missing_docs)]
    pub const NOT_IN_COMMITTEE: i32 = 0;
    pub const ADDED_BUT_NOT_ACTIVE_IN_COMMITTEE: i32 = 1;
    pub const ADDED_BUT_WRONG_KEYS: i32 = 2;
}

/// Committee membership of a baker node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum BakerCommitteeStatus {
    PassiveCommitteeInfo(i32),
    ActiveBakerCommitteeInfo(Empty),
    ActiveFinalizerCommitteeInfo(Empty),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Baker running on the node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BakerConsensusInfo {
    pub baker_id: Option<u64>,
    pub status: Option<BakerCommitteeStatus>,
}

/// Consensus participation of the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum NodeConsensusStatus {
    NotRunning(Empty),
    Passive(Empty),
    Active(BakerConsensusInfo),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Details of a full node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NodeDetailsNode {
    pub consensus_status: Option<NodeConsensusStatus>,
}

/// Node role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum NodeDetails {
    Bootstrapper(Empty),
    Node(NodeDetailsNode),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Node information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NodeInfo {
    pub peer_version: String,
    pub local_time: Option<i64>,
    pub peer_uptime: Option<u64>,
    pub network_info: Option<NetworkInfo>,
    pub details: Option<NodeDetails>,
}

/// IP address and port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct SocketAddress {
    pub ip: Option<String>,
    pub port: Option<u32>,
}

/// Peer network counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PeerNetworkStats {
    pub packets_sent: u64,
    pub packets_received: u64,
    pub latency: u64,
}

/// Catch-up status codes.
pub mod catchup_status {
    #![allow(missing_docs)]
    pub const UP_TO_DATE: i32 = 0;
    pub const PENDING: i32 = 1;
    pub const CATCHING_UP: i32 = 2;
}

/// Consensus role of a peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum PeerConsensusInfo {
    Bootstrapper(Empty),
    NodeCatchupStatus(i32),
    /// Unknown variant.
    #[serde(untagged)]
    Unrecognized(serde_json::Value),
}

/// Connected peer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Peer {
    pub peer_id: Option<String>,
    pub socket_address: Option<SocketAddress>,
    pub network_stats: Option<PeerNetworkStats>,
    pub consensus_info: Option<PeerConsensusInfo>,
}

/// Connected peers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeersInfo {
    /// Peers.
    pub peers: Vec<Peer>,
}

/// Banned peer address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BannedPeer {
    /// IP address.
    pub ip_address: Option<String>,
}

/// Banned peers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannedPeers {
    /// Peers.
    pub peers: Vec<BannedPeer>,
}
