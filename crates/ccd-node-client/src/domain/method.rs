//! Node methods, one per facade operation.

use std::fmt;

macro_rules! rpc_methods {
    ($($variant:ident),+ $(,)?) => {
        /// Every method the facade invokes on the transport.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum RpcMethod {
            $($variant),+
        }

        impl RpcMethod {
            /// Wire name of the method.
            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

rpc_methods!(
    GetNextAccountSequenceNumber,
    GetCryptographicParameters,
    GetAccountInfo,
    GetBlockItemStatus,
    GetConsensusInfo,
    GetModuleSource,
    GetInstanceInfo,
    InvokeInstance,
    SendBlockItem,
    GetBlockChainParameters,
    GetPoolInfo,
    GetPassiveDelegationInfo,
    GetTokenomicsInfo,
    InstanceStateLookup,
    GetBlocksAtHeight,
    GetBlockInfo,
    GetBranches,
    GetElectionInfo,
    GetNextUpdateSequenceNumbers,
    GetBlockFinalizationSummary,
    GetBakerEarliestWinTime,
    GetFirstBlockEpoch,
    GetNodeInfo,
    GetPeersInfo,
    Shutdown,
    PeerConnect,
    PeerDisconnect,
    GetBannedPeers,
    BanPeer,
    UnbanPeer,
    DumpStart,
    DumpStop,
    GetFinalizedBlocks,
    GetBlocks,
    GetAccountList,
    GetModuleList,
    GetAncestors,
    GetInstanceState,
    GetIdentityProviders,
    GetAnonymityRevokers,
    GetBakerList,
    GetPoolDelegators,
    GetPoolDelegatorsRewardPeriod,
    GetPassiveDelegators,
    GetPassiveDelegatorsRewardPeriod,
    GetAccountNonFinalizedTransactions,
    GetBlockTransactionEvents,
    GetBlockSpecialEvents,
    GetBlockPendingUpdates,
    GetBakersRewardPeriod,
    GetWinningBakersEpoch,
);

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name() {
        assert_eq!(RpcMethod::GetBlocksAtHeight.to_string(), "GetBlocksAtHeight");
        assert_eq!(RpcMethod::SendBlockItem.name(), "SendBlockItem");
    }
}
