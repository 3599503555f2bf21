//! Node, peer and identity metadata.

use std::net::IpAddr;

use ccd_types::{
    ArInfo, BakerCommitteeStatus, IpInfo, NodeConsensusStatus, NodeDetails, NodeInfo, NodeNetworkInfo,
    PassiveCommitteeInfo, PeerCatchupStatus, PeerConsensusInfo, PeerInfo, PeerNetworkStats,
};

use super::{duration, require, required_hex, timestamp, FieldPath, TranslationResult};
use crate::domain::TranslationError;
use crate::wire::node as wire;

fn description(description: Option<wire::Description>, path: &str) -> TranslationResult<wire::Description> {
    require(description, (path, "description"))
}

/// Identity provider.
pub fn ip_info(info: wire::IpInfo, path: &str) -> TranslationResult<IpInfo> {
    let wire::Description {
        name,
        url,
        description: text,
    } = description(info.description, path)?;
    Ok(IpInfo {
        identity: require(info.identity, (path, "identity"))?,
        name,
        url,
        description: text,
        verify_key: required_hex(info.verify_key, (path, "verifyKey"))?,
        cdi_verify_key: required_hex(info.cdi_verify_key, (path, "cdiVerifyKey"))?,
    })
}

/// Anonymity revoker.
pub fn ar_info(info: wire::ArInfo, path: &str) -> TranslationResult<ArInfo> {
    let wire::Description {
        name,
        url,
        description: text,
    } = description(info.description, path)?;
    Ok(ArInfo {
        identity: require(info.identity, (path, "identity"))?,
        name,
        url,
        description: text,
        public_key: required_hex(info.public_key, (path, "publicKey"))?,
    })
}

fn committee_status(status: wire::BakerCommitteeStatus) -> TranslationResult<BakerCommitteeStatus> {
    use wire::passive_committee_info as codes;
    const P: &str = "NodeInfo.details.node.consensusStatus.active.status";
    match status {
        wire::BakerCommitteeStatus::PassiveCommitteeInfo(code) => {
            let passive = match code {
                codes::NOT_IN_COMMITTEE => PassiveCommitteeInfo::NotInCommittee,
                codes::ADDED_BUT_NOT_ACTIVE_IN_COMMITTEE => PassiveCommitteeInfo::AddedButNotActiveInCommittee,
                codes::ADDED_BUT_WRONG_KEYS => PassiveCommitteeInfo::AddedButWrongKeys,
                other => return Err(TranslationError::unknown_enum_value(P, other)),
            };
            Ok(BakerCommitteeStatus::Passive(passive))
        }
        wire::BakerCommitteeStatus::ActiveBakerCommitteeInfo(_) => Ok(BakerCommitteeStatus::ActiveBaker),
        wire::BakerCommitteeStatus::ActiveFinalizerCommitteeInfo(_) => Ok(BakerCommitteeStatus::ActiveFinalizer),
        wire::BakerCommitteeStatus::Unrecognized(_) => Err(TranslationError::unknown_variant(P)),
    }
}

fn node_details(details: wire::NodeDetails) -> TranslationResult<NodeDetails> {
    const P: &str = "NodeInfo.details.node.consensusStatus";
    match details {
        wire::NodeDetails::Bootstrapper(_) => Ok(NodeDetails::Bootstrapper),
        wire::NodeDetails::Node(node) => {
            let status = match require(node.consensus_status, P)? {
                wire::NodeConsensusStatus::NotRunning(_) => NodeConsensusStatus::NotRunning,
                wire::NodeConsensusStatus::Passive(_) => NodeConsensusStatus::Passive,
                wire::NodeConsensusStatus::Active(active) => NodeConsensusStatus::Active {
                    baker_id: require(active.baker_id, (P, "active.bakerId"))?,
                    status: committee_status(require(active.status, (P, "active.status"))?)?,
                },
                wire::NodeConsensusStatus::Unrecognized(_) => return Err(TranslationError::unknown_variant(P)),
            };
            Ok(NodeDetails::Node(status))
        }
        wire::NodeDetails::Unrecognized(_) => Err(TranslationError::unknown_variant("NodeInfo.details")),
    }
}

/// Information about the node itself.
pub fn node_info(info: wire::NodeInfo) -> TranslationResult<NodeInfo> {
    let network = require(info.network_info, "NodeInfo.networkInfo")?;
    Ok(NodeInfo {
        peer_version: info.peer_version,
        local_time: timestamp(info.local_time, "NodeInfo.localTime")?,
        peer_uptime: duration(info.peer_uptime, "NodeInfo.peerUptime")?,
        network_info: NodeNetworkInfo {
            node_id: require(network.node_id, "NodeInfo.networkInfo.nodeId")?,
            peer_total_sent: network.peer_total_sent,
            peer_total_received: network.peer_total_received,
            avg_bps_in: network.avg_bps_in,
            avg_bps_out: network.avg_bps_out,
        },
        details: node_details(require(info.details, "NodeInfo.details")?)?,
    })
}

/// Textual IP address as reported by the node.
pub fn ip_address(ip: Option<String>, path: impl FieldPath) -> TranslationResult<IpAddr> {
    let ip = require(ip, path)?;
    ip.parse()
        .map_err(|e| TranslationError::malformed(path.render(), format!("{ip}: {e}")))
}

fn peer_consensus_info(info: wire::PeerConsensusInfo) -> TranslationResult<PeerConsensusInfo> {
    use wire::catchup_status as codes;
    const P: &str = "PeerInfo.consensusInfo";
    match info {
        wire::PeerConsensusInfo::Bootstrapper(_) => Ok(PeerConsensusInfo::Bootstrapper),
        wire::PeerConsensusInfo::NodeCatchupStatus(code) => {
            let status = match code {
                codes::UP_TO_DATE => PeerCatchupStatus::UpToDate,
                codes::PENDING => PeerCatchupStatus::Pending,
                codes::CATCHING_UP => PeerCatchupStatus::CatchingUp,
                other => return Err(TranslationError::unknown_enum_value((P, "nodeCatchupStatus").render(), other)),
            };
            Ok(PeerConsensusInfo::Node(status))
        }
        wire::PeerConsensusInfo::Unrecognized(_) => Err(TranslationError::unknown_variant(P)),
    }
}

/// Connected peer.
pub fn peer_info(peer: wire::Peer) -> TranslationResult<PeerInfo> {
    let socket = require(peer.socket_address, "PeerInfo.socketAddress")?;
    let port = require(socket.port, "PeerInfo.socketAddress.port")?;
    let stats = require(peer.network_stats, "PeerInfo.networkStats")?;
    Ok(PeerInfo {
        peer_id: require(peer.peer_id, "PeerInfo.peerId")?,
        ip: ip_address(socket.ip, "PeerInfo.socketAddress.ip")?,
        port: u16::try_from(port)
            .map_err(|e| TranslationError::malformed("PeerInfo.socketAddress.port", e))?,
        network_stats: PeerNetworkStats {
            packets_sent: stats.packets_sent,
            packets_received: stats.packets_received,
            latency: stats.latency,
        },
        consensus_info: peer_consensus_info(require(peer.consensus_info, "PeerInfo.consensusInfo")?)?,
    })
}

/// Addresses of banned peers.
pub fn banned_peers(banned: wire::BannedPeers) -> TranslationResult<Vec<IpAddr>> {
    banned
        .peers
        .into_iter()
        .map(|peer| ip_address(peer.ip_address, "BannedPeer.ipAddress"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TranslationErrorKind;
    use crate::wire::{Bytes, Empty};
    use std::time::Duration;

    fn peer(ip: &str, port: u32) -> wire::Peer {
        wire::Peer {
            peer_id: Some("b8e2a1".to_string()),
            socket_address: Some(wire::SocketAddress {
                ip: Some(ip.to_string()),
                port: Some(port),
            }),
            network_stats: Some(wire::PeerNetworkStats {
                packets_sent: 10,
                packets_received: 12,
                latency: 40,
            }),
            consensus_info: Some(wire::PeerConsensusInfo::NodeCatchupStatus(2)),
        }
    }

    #[test]
    fn test_peer_info() {
        let info = peer_info(peer("10.0.0.7", 8888)).unwrap();
        assert_eq!(info.ip, "10.0.0.7".parse::<IpAddr>().unwrap());
        assert_eq!(info.port, 8888);
        assert_eq!(info.consensus_info, PeerConsensusInfo::Node(PeerCatchupStatus::CatchingUp));
    }

    #[test]
    fn test_peer_port_out_of_range() {
        let err = peer_info(peer("10.0.0.7", 70_000)).unwrap_err();
        assert_eq!(err.path, "PeerInfo.socketAddress.port");
    }

    #[test]
    fn test_peer_bad_ip() {
        let err = peer_info(peer("not-an-ip", 1)).unwrap_err();
        assert!(matches!(err.kind, TranslationErrorKind::Malformed(_)));
    }

    #[test]
    fn test_active_baker_node() {
        let info = wire::NodeInfo {
            peer_version: "6.3.0".to_string(),
            local_time: Some(1_000),
            peer_uptime: Some(60_000),
            network_info: Some(wire::NetworkInfo {
                node_id: Some("node-1".to_string()),
                ..Default::default()
            }),
            details: Some(wire::NodeDetails::Node(wire::NodeDetailsNode {
                consensus_status: Some(wire::NodeConsensusStatus::Active(wire::BakerConsensusInfo {
                    baker_id: Some(3),
                    status: Some(wire::BakerCommitteeStatus::ActiveFinalizerCommitteeInfo(Empty {})),
                })),
            })),
        };
        let info = node_info(info).unwrap();
        assert_eq!(info.peer_uptime, Duration::from_secs(60));
        assert_eq!(
            info.details,
            NodeDetails::Node(NodeConsensusStatus::Active {
                baker_id: 3,
                status: BakerCommitteeStatus::ActiveFinalizer,
            })
        );
    }

    #[test]
    fn test_ip_info_description() {
        let info = wire::IpInfo {
            identity: Some(0),
            description: Some(wire::Description {
                name: "Provider".to_string(),
                url: "https://ip.example".to_string(),
                description: "test provider".to_string(),
            }),
            verify_key: Some(Bytes(vec![1])),
            cdi_verify_key: Some(Bytes(vec![2])),
        };
        let info = ip_info(info, "IpInfo").unwrap();
        assert_eq!(info.name, "Provider");
        assert_eq!(info.description, "test provider");
    }

    #[test]
    fn test_banned_peers() {
        let banned = wire::BannedPeers {
            peers: vec![wire::BannedPeer {
                ip_address: Some("::1".to_string()),
            }],
        };
        assert_eq!(banned_peers(banned).unwrap(), vec!["::1".parse::<IpAddr>().unwrap()]);
    }
}
