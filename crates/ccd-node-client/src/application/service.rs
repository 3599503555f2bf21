//! # Node Client Service
//!
//! Application service exposing every node query as a typed operation.
//!
//! Each operation builds a wire request from its typed arguments, drives the
//! [`NodeTransport`] and hands the reply to the wire translation. Caller
//! input is validated before anything is sent. Block-scoped operations take
//! a [`BlockSelector`]; streaming operations take a [`CancellationToken`]
//! and return a lazy [`NodeStream`] that opens its subscription on the
//! first pull.

use std::future::Future;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ccd_types::{
    check_expiry, parse_ip, parse_port, AccountAddress, AccountIdentifier, AccountInfo,
    AccountTransactionSubmission, ArInfo, ArrivedBlockInfo, BakerId, BakerPoolStatus, BakerRewardPeriodInfo,
    BlockFinalizationSummary, BlockHash, BlockInfo, BlockItemStatus, BlockItemSummary, BlockItemSummaryInBlock,
    BlockSelector, BlockSpecialEvent, BlocksAtHeightRequest, Branch, ChainParameters, ConsensusStatus,
    ContractAddress, ContractContext, CryptographicParameters, DelegatorInfo, DelegatorRewardPeriodInfo,
    ElectionInfo, EpochRequest, FinalizedBlockInfo, HexBytes, InstanceInfo, InstanceStateEntry,
    InvokeContractResult, IpInfo, ModuleReference, NextAccountNonce, NextUpdateSequenceNumbers, NodeInfo,
    PassiveDelegationStatus, PeerInfo, PendingUpdate, RewardStatus, Timestamp, TransactionHash, UpdateInstruction,
    VersionedModuleSource, WinningBaker,
};
use futures::stream::{self, StreamExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::algorithms::BlockSynchronizer;
use crate::config::ClientConfig;
use crate::domain::{ClientError, RpcCode, RpcMethod, TranslationError};
use crate::ports::{ChainQueries, NodeStream, NodeTransport, ReplyStream};
use crate::translation::{
    account, chain_parameters, consensus, contracts, decode, each, ident, node, rewards, summary,
    timestamp_from_millis, updates, TranslationResult,
};
use crate::wire::common as wire_common;
use crate::wire::requests::{
    AccountInfoRequest, AncestorsRequest, BlockHashInput, CredentialDeployment, DumpRequest,
    InstanceInfoRequest, InstanceStateLookupRequest, InvokeInstanceRequest, ModuleSourceRequest,
    PoolDelegatorsRequest, PoolInfoRequest, SendBlockItemRequest,
};
use crate::wire::{self, Bytes, Empty, Wrapped};

/// Block at which a contract instance first exists.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceCreation {
    /// Earliest finalized block containing the instance.
    pub block: FinalizedBlockInfo,
    /// The instance as of that block.
    pub instance: InstanceInfo,
}

fn encode(method: RpcMethod, request: &impl Serialize) -> Result<Value, ClientError> {
    serde_json::to_value(request).map_err(|e| TranslationError::malformed(method.name(), e).into())
}

fn hash_request(bytes: &[u8]) -> Wrapped<Bytes> {
    Wrapped {
        value: Bytes::from(bytes),
    }
}

fn socket_address(ip: &str, port: i64) -> Result<wire::node::SocketAddress, ClientError> {
    parse_ip(ip)?;
    let port = parse_port(port)?;
    Ok(wire::node::SocketAddress {
        ip: Some(ip.to_string()),
        port: Some(u32::from(port)),
    })
}

fn banned_peer(ip: &str) -> Result<wire::node::BannedPeer, ClientError> {
    parse_ip(ip)?;
    Ok(wire::node::BannedPeer {
        ip_address: Some(ip.to_string()),
    })
}

enum Feed {
    Opening {
        transport: Arc<dyn NodeTransport>,
        request: Value,
    },
    Open(ReplyStream),
    Done,
}

/// Typed client over a node transport.
#[derive(Clone)]
pub struct NodeClient {
    transport: Arc<dyn NodeTransport>,
    config: ClientConfig,
}

impl NodeClient {
    /// Client with the given configuration.
    pub fn new(transport: Arc<dyn NodeTransport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Client with the default configuration.
    pub fn with_transport(transport: Arc<dyn NodeTransport>) -> Self {
        Self::new(transport, ClientConfig::default())
    }

    /// Active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn unary<R, W, D>(
        &self,
        method: RpcMethod,
        request: R,
        translate: impl FnOnce(W) -> TranslationResult<D> + Send,
    ) -> Result<D, ClientError>
    where
        R: Serialize + Send,
        W: DeserializeOwned,
    {
        let request = encode(method, &request)?;
        debug!(method = %method, endpoint = %self.config.endpoint, "Calling node");
        let reply = self.transport.call(method, request).await?;
        decode(method, reply).and_then(translate).map_err(|e| {
            warn!(method = %method, path = %e.path, "Untranslatable node reply: {}", e);
            e.into()
        })
    }

    fn streaming<R, W, D>(
        &self,
        method: RpcMethod,
        request: R,
        cancel: CancellationToken,
        translate: fn(W) -> TranslationResult<D>,
    ) -> NodeStream<D>
    where
        R: Serialize,
        W: DeserializeOwned + 'static,
        D: Send + 'static,
    {
        if cancel.is_cancelled() {
            return stream::empty().boxed();
        }
        let request = match encode(method, &request) {
            Ok(request) => request,
            Err(e) => return stream::once(async move { Err(e) }).boxed(),
        };
        let start = Feed::Opening {
            transport: Arc::clone(&self.transport),
            request,
        };
        self.feed(method, start, cancel, translate)
    }

    /// Subscribe now rather than on the first pull.
    async fn subscribed<R, W, D>(
        &self,
        method: RpcMethod,
        request: R,
        cancel: CancellationToken,
        translate: fn(W) -> TranslationResult<D>,
    ) -> Result<NodeStream<D>, ClientError>
    where
        R: Serialize + Send,
        W: DeserializeOwned + 'static,
        D: Send + 'static,
    {
        let request = encode(method, &request)?;
        debug!(method = %method, endpoint = %self.config.endpoint, "Opening node stream");
        let replies = self.transport.subscribe(method, request, cancel.clone()).await?;
        Ok(self.feed(method, Feed::Open(replies), cancel, translate))
    }

    fn feed<W, D>(
        &self,
        method: RpcMethod,
        start: Feed,
        cancel: CancellationToken,
        translate: fn(W) -> TranslationResult<D>,
    ) -> NodeStream<D>
    where
        W: DeserializeOwned + 'static,
        D: Send + 'static,
    {
        let endpoint = self.config.endpoint.clone();
        stream::unfold(start, move |feed| {
            let cancel = cancel.clone();
            let endpoint = endpoint.clone();
            async move {
                let mut replies = match feed {
                    Feed::Done => return None,
                    Feed::Open(replies) => replies,
                    Feed::Opening { transport, request } => {
                        debug!(method = %method, endpoint = %endpoint, "Opening node stream");
                        let opened = tokio::select! {
                            biased;
                            _ = cancel.cancelled() => return None,
                            opened = transport.subscribe(method, request, cancel.clone()) => opened,
                        };
                        match opened {
                            Ok(replies) => replies,
                            Err(e) => return Some((Err(e.into()), Feed::Done)),
                        }
                    }
                };

                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        debug!(method = %method, "Node stream cancelled");
                        return None;
                    }
                    next = replies.next() => next,
                };
                match next? {
                    Err(e) => Some((Err(e.into()), Feed::Done)),
                    Ok(value) => match decode(method, value).and_then(translate) {
                        Ok(item) => Some((Ok(item), Feed::Open(replies))),
                        Err(e) => {
                            warn!(method = %method, path = %e.path, "Untranslatable stream item: {}", e);
                            Some((Err(e.into()), Feed::Done))
                        }
                    },
                }
            }
        })
        .fuse()
        .boxed()
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Next nonce for an account and whether all its transactions are final.
    pub async fn get_next_account_nonce(&self, address: &AccountAddress) -> Result<NextAccountNonce, ClientError> {
        self.unary(
            RpcMethod::GetNextAccountSequenceNumber,
            hash_request(address.as_bytes()),
            account::next_account_nonce,
        )
        .await
    }

    /// Global cryptographic parameters.
    pub async fn get_cryptographic_parameters(
        &self,
        block: BlockSelector,
    ) -> Result<CryptographicParameters, ClientError> {
        self.unary(
            RpcMethod::GetCryptographicParameters,
            BlockHashInput::from(block),
            |params: wire::account::CryptographicParameters| {
                Ok(account::cryptographic_parameters(params))
            },
        )
        .await
    }

    /// Account state at a block.
    pub async fn get_account_info(
        &self,
        account: AccountIdentifier,
        block: BlockSelector,
    ) -> Result<AccountInfo, ClientError> {
        let request = AccountInfoRequest {
            block_hash: block.into(),
            account_identifier: account.into(),
        };
        self.unary(RpcMethod::GetAccountInfo, request, account::account_info).await
    }

    /// Accounts existing at a block.
    pub fn get_account_list(&self, block: BlockSelector, cancel: CancellationToken) -> NodeStream<AccountAddress> {
        self.streaming(
            RpcMethod::GetAccountList,
            BlockHashInput::from(block),
            cancel,
            |address: Wrapped<Bytes>| ident(&address.value, "AccountAddress"),
        )
    }

    /// Transactions of an account not yet finalized.
    pub fn get_account_non_finalized_transactions(
        &self,
        address: &AccountAddress,
        cancel: CancellationToken,
    ) -> NodeStream<TransactionHash> {
        self.streaming(
            RpcMethod::GetAccountNonFinalizedTransactions,
            hash_request(address.as_bytes()),
            cancel,
            |hash: Wrapped<Bytes>| ident(&hash.value, "TransactionHash"),
        )
    }

    // =========================================================================
    // Block items
    // =========================================================================

    /// Current status of a block item.
    pub async fn get_block_item_status(&self, hash: TransactionHash) -> Result<BlockItemStatus, ClientError> {
        self.unary(
            RpcMethod::GetBlockItemStatus,
            hash_request(hash.as_bytes()),
            summary::block_item_status,
        )
        .await
    }

    async fn send_block_item(&self, item: SendBlockItemRequest) -> Result<TransactionHash, ClientError> {
        let hash = self
            .unary(RpcMethod::SendBlockItem, item, |hash: Wrapped<Bytes>| {
                ident::<TransactionHash>(&hash.value, "TransactionHash")
            })
            .await?;
        info!(transaction = %hash, "Block item accepted");
        Ok(hash)
    }

    /// Submit a signed account transaction.
    ///
    /// Fails with a validation error, without contacting the node, if the
    /// expiry has already passed.
    pub async fn send_account_transaction(
        &self,
        submission: &AccountTransactionSubmission,
    ) -> Result<TransactionHash, ClientError> {
        submission.validate()?;
        self.send_block_item(SendBlockItemRequest::AccountTransaction(submission.into()))
            .await
    }

    /// Submit a serialized credential deployment.
    pub async fn send_credential_deployment(
        &self,
        payload: &HexBytes,
        expiry: Timestamp,
    ) -> Result<TransactionHash, ClientError> {
        check_expiry(expiry)?;
        self.send_block_item(SendBlockItemRequest::CredentialDeployment(CredentialDeployment::new(
            payload, expiry,
        )))
        .await
    }

    /// Submit a signed chain update instruction.
    pub async fn send_update_instruction(&self, instruction: &UpdateInstruction) -> Result<TransactionHash, ClientError> {
        self.send_block_item(SendBlockItemRequest::UpdateInstruction(instruction.into()))
            .await
    }

    /// Outcomes of every block item in a block.
    pub fn get_block_transaction_events(
        &self,
        block: BlockSelector,
        cancel: CancellationToken,
    ) -> NodeStream<BlockItemSummary> {
        self.streaming(
            RpcMethod::GetBlockTransactionEvents,
            BlockHashInput::from(block),
            cancel,
            summary::block_item_summary,
        )
    }

    // =========================================================================
    // Consensus and blocks
    // =========================================================================

    /// Node's view of consensus.
    pub async fn get_consensus_status(&self) -> Result<ConsensusStatus, ClientError> {
        self.unary(RpcMethod::GetConsensusInfo, Empty {}, consensus::consensus_status)
            .await
    }

    /// Hashes of the blocks at a height.
    pub async fn get_blocks_at_height(
        &self,
        request: impl Into<BlocksAtHeightRequest>,
    ) -> Result<Vec<BlockHash>, ClientError> {
        self.unary(
            RpcMethod::GetBlocksAtHeight,
            wire::requests::BlocksAtHeightRequest::from(request.into()),
            consensus::blocks_at_height,
        )
        .await
    }

    /// Summary of a block.
    pub async fn get_block_info(&self, block: BlockSelector) -> Result<BlockInfo, ClientError> {
        self.unary(RpcMethod::GetBlockInfo, BlockHashInput::from(block), consensus::block_info)
            .await
    }

    /// Tree of branches above the last finalized block.
    pub async fn get_branches(&self) -> Result<Branch, ClientError> {
        self.unary(RpcMethod::GetBranches, Empty {}, consensus::branch).await
    }

    /// Leadership election parameters and bakers.
    pub async fn get_election_info(&self, block: BlockSelector) -> Result<ElectionInfo, ClientError> {
        self.unary(
            RpcMethod::GetElectionInfo,
            BlockHashInput::from(block),
            consensus::election_info,
        )
        .await
    }

    /// Next sequence number of every update queue.
    pub async fn get_next_update_sequence_numbers(
        &self,
        block: BlockSelector,
    ) -> Result<NextUpdateSequenceNumbers, ClientError> {
        self.unary(
            RpcMethod::GetNextUpdateSequenceNumbers,
            BlockHashInput::from(block),
            consensus::next_update_sequence_numbers,
        )
        .await
    }

    /// Finalization record carried by a block, if any.
    pub async fn get_block_finalization_summary(
        &self,
        block: BlockSelector,
    ) -> Result<BlockFinalizationSummary, ClientError> {
        self.unary(
            RpcMethod::GetBlockFinalizationSummary,
            BlockHashInput::from(block),
            consensus::block_finalization_summary,
        )
        .await
    }

    /// Earliest time a baker may be expected to win a round.
    pub async fn get_baker_earliest_win_time(&self, baker: BakerId) -> Result<Timestamp, ClientError> {
        self.unary(
            RpcMethod::GetBakerEarliestWinTime,
            Wrapped { value: baker },
            |time: Wrapped<i64>| timestamp_from_millis(time.value, "Timestamp"),
        )
        .await
    }

    /// First block of an epoch.
    pub async fn get_first_block_epoch(&self, epoch: EpochRequest) -> Result<BlockHash, ClientError> {
        self.unary(
            RpcMethod::GetFirstBlockEpoch,
            wire::requests::EpochRequest::from(epoch),
            |hash: Wrapped<Bytes>| ident(&hash.value, "BlockHash"),
        )
        .await
    }

    /// Live subscription to finalized blocks.
    pub fn get_finalized_blocks(&self, cancel: CancellationToken) -> NodeStream<FinalizedBlockInfo> {
        self.streaming(RpcMethod::GetFinalizedBlocks, Empty {}, cancel, consensus::finalized_block)
    }

    /// Live subscription to blocks as they arrive.
    pub fn get_blocks(&self, cancel: CancellationToken) -> NodeStream<ArrivedBlockInfo> {
        self.streaming(RpcMethod::GetBlocks, Empty {}, cancel, consensus::arrived_block)
    }

    /// Up to `max` ancestors of a block, the block itself first.
    pub fn get_ancestors(&self, max: u64, block: BlockSelector, cancel: CancellationToken) -> NodeStream<BlockHash> {
        let request = AncestorsRequest {
            block_hash: block.into(),
            amount: max,
        };
        self.streaming(RpcMethod::GetAncestors, request, cancel, |hash: Wrapped<Bytes>| {
            ident(&hash.value, "BlockHash")
        })
    }

    /// Special outcomes of a block (rewards, mints, suspensions).
    pub fn get_block_special_events(
        &self,
        block: BlockSelector,
        cancel: CancellationToken,
    ) -> NodeStream<BlockSpecialEvent> {
        self.streaming(
            RpcMethod::GetBlockSpecialEvents,
            BlockHashInput::from(block),
            cancel,
            rewards::block_special_event,
        )
    }

    /// Updates queued at a block.
    pub fn get_block_pending_updates(&self, block: BlockSelector, cancel: CancellationToken) -> NodeStream<PendingUpdate> {
        self.streaming(
            RpcMethod::GetBlockPendingUpdates,
            BlockHashInput::from(block),
            cancel,
            updates::pending_update,
        )
    }

    /// Bakers that won rounds in a finished epoch.
    pub fn get_winning_bakers_epoch(&self, epoch: EpochRequest, cancel: CancellationToken) -> NodeStream<WinningBaker> {
        self.streaming(
            RpcMethod::GetWinningBakersEpoch,
            wire::requests::EpochRequest::from(epoch),
            cancel,
            consensus::winning_baker,
        )
    }

    /// Chain parameters in effect at a block.
    pub async fn get_block_chain_parameters(&self, block: BlockSelector) -> Result<ChainParameters, ClientError> {
        self.unary(
            RpcMethod::GetBlockChainParameters,
            BlockHashInput::from(block),
            chain_parameters::chain_parameters,
        )
        .await
    }

    // =========================================================================
    // Contracts
    // =========================================================================

    /// Source of a deployed module.
    pub async fn get_module_source(
        &self,
        module: &ModuleReference,
        block: BlockSelector,
    ) -> Result<VersionedModuleSource, ClientError> {
        let request = ModuleSourceRequest {
            block_hash: block.into(),
            module_ref: Bytes::from(module.as_bytes().as_slice()),
        };
        self.unary(RpcMethod::GetModuleSource, request, contracts::module_source)
            .await
    }

    /// Contract instance at a block.
    pub async fn get_instance_info(
        &self,
        contract: ContractAddress,
        block: BlockSelector,
    ) -> Result<InstanceInfo, ClientError> {
        let request = InstanceInfoRequest {
            block_hash: block.into(),
            address: contract.into(),
        };
        self.unary(RpcMethod::GetInstanceInfo, request, contracts::instance_info)
            .await
    }

    /// Dry run of a contract entrypoint. Nothing is committed.
    ///
    /// Without an explicit budget the configured default energy is used.
    pub async fn invoke_contract(
        &self,
        context: &ContractContext,
        block: BlockSelector,
    ) -> Result<InvokeContractResult, ClientError> {
        let request = InvokeInstanceRequest {
            block_hash: block.into(),
            invoker: context.invoker.map(wire_common::Address::from),
            instance: context.contract.into(),
            amount: context.amount.micro_ccd(),
            entrypoint: context.method.clone(),
            parameter: Bytes::from(context.parameter.as_bytes()),
            energy: context
                .energy
                .map_or(self.config.default_invoke_energy, |energy| energy.0),
        };
        self.unary(RpcMethod::InvokeInstance, request, contracts::invoke_result)
            .await
    }

    /// Value stored under one key of a contract's state.
    pub async fn instance_state_lookup(
        &self,
        contract: ContractAddress,
        key_hex: &str,
        block: BlockSelector,
    ) -> Result<Vec<u8>, ClientError> {
        let key = HexBytes::from_hex(key_hex)?;
        let request = InstanceStateLookupRequest {
            block_hash: block.into(),
            address: contract.into(),
            key: Bytes::from(key.as_bytes()),
        };
        self.unary(RpcMethod::InstanceStateLookup, request, |value: Wrapped<Bytes>| {
            Ok(value.value.0)
        })
        .await
    }

    /// Modules deployed at a block.
    pub fn get_module_list(&self, block: BlockSelector, cancel: CancellationToken) -> NodeStream<ModuleReference> {
        self.streaming(
            RpcMethod::GetModuleList,
            BlockHashInput::from(block),
            cancel,
            |module: Wrapped<Bytes>| ident(&module.value, "ModuleReference"),
        )
    }

    /// Full key-value state of a contract.
    pub fn get_instance_state(
        &self,
        contract: ContractAddress,
        block: BlockSelector,
        cancel: CancellationToken,
    ) -> NodeStream<InstanceStateEntry> {
        let request = InstanceInfoRequest {
            block_hash: block.into(),
            address: contract.into(),
        };
        self.streaming(RpcMethod::GetInstanceState, request, cancel, |pair: wire::contracts::InstanceStateKvPair| {
            Ok(contracts::instance_state_entry(pair))
        })
    }

    // =========================================================================
    // Pools and rewards
    // =========================================================================

    /// Status of a baker pool.
    pub async fn get_pool_info(&self, baker: BakerId, block: BlockSelector) -> Result<BakerPoolStatus, ClientError> {
        let request = PoolInfoRequest {
            block_hash: block.into(),
            baker,
        };
        self.unary(RpcMethod::GetPoolInfo, request, rewards::pool_status).await
    }

    /// Status of passive delegation.
    pub async fn get_passive_delegation_info(
        &self,
        block: BlockSelector,
    ) -> Result<PassiveDelegationStatus, ClientError> {
        self.unary(
            RpcMethod::GetPassiveDelegationInfo,
            BlockHashInput::from(block),
            rewards::passive_delegation_status,
        )
        .await
    }

    /// Tokenomics at a block.
    pub async fn get_tokenomics_info(&self, block: BlockSelector) -> Result<RewardStatus, ClientError> {
        self.unary(
            RpcMethod::GetTokenomicsInfo,
            BlockHashInput::from(block),
            rewards::reward_status,
        )
        .await
    }

    /// Registered bakers.
    pub fn get_baker_list(&self, block: BlockSelector, cancel: CancellationToken) -> NodeStream<BakerId> {
        self.streaming(
            RpcMethod::GetBakerList,
            BlockHashInput::from(block),
            cancel,
            |baker: Wrapped<u64>| Ok(baker.value),
        )
    }

    /// Delegators of a pool, including pending changes.
    pub fn get_pool_delegators(
        &self,
        baker: BakerId,
        block: BlockSelector,
        cancel: CancellationToken,
    ) -> NodeStream<DelegatorInfo> {
        let request = PoolDelegatorsRequest {
            block_hash: block.into(),
            baker,
        };
        self.streaming(RpcMethod::GetPoolDelegators, request, cancel, rewards::delegator_info)
    }

    /// Delegators of a pool fixed for the current reward period.
    pub fn get_pool_delegators_reward_period(
        &self,
        baker: BakerId,
        block: BlockSelector,
        cancel: CancellationToken,
    ) -> NodeStream<DelegatorRewardPeriodInfo> {
        let request = PoolDelegatorsRequest {
            block_hash: block.into(),
            baker,
        };
        self.streaming(
            RpcMethod::GetPoolDelegatorsRewardPeriod,
            request,
            cancel,
            rewards::delegator_reward_period_info,
        )
    }

    /// Passive delegators, including pending changes.
    pub fn get_passive_delegators(&self, block: BlockSelector, cancel: CancellationToken) -> NodeStream<DelegatorInfo> {
        self.streaming(
            RpcMethod::GetPassiveDelegators,
            BlockHashInput::from(block),
            cancel,
            rewards::delegator_info,
        )
    }

    /// Passive delegators fixed for the current reward period.
    pub fn get_passive_delegators_reward_period(
        &self,
        block: BlockSelector,
        cancel: CancellationToken,
    ) -> NodeStream<DelegatorRewardPeriodInfo> {
        self.streaming(
            RpcMethod::GetPassiveDelegatorsRewardPeriod,
            BlockHashInput::from(block),
            cancel,
            rewards::delegator_reward_period_info,
        )
    }

    /// Bakers of the current reward period.
    pub fn get_bakers_reward_period(
        &self,
        block: BlockSelector,
        cancel: CancellationToken,
    ) -> NodeStream<BakerRewardPeriodInfo> {
        self.streaming(
            RpcMethod::GetBakersRewardPeriod,
            BlockHashInput::from(block),
            cancel,
            rewards::baker_reward_period_info,
        )
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Identity providers.
    pub fn get_identity_providers(&self, block: BlockSelector, cancel: CancellationToken) -> NodeStream<IpInfo> {
        self.streaming(
            RpcMethod::GetIdentityProviders,
            BlockHashInput::from(block),
            cancel,
            |info: wire::node::IpInfo| node::ip_info(info, "IpInfo"),
        )
    }

    /// Anonymity revokers.
    pub fn get_anonymity_revokers(&self, block: BlockSelector, cancel: CancellationToken) -> NodeStream<ArInfo> {
        self.streaming(
            RpcMethod::GetAnonymityRevokers,
            BlockHashInput::from(block),
            cancel,
            |info: wire::node::ArInfo| node::ar_info(info, "ArInfo"),
        )
    }

    // =========================================================================
    // Node administration
    // =========================================================================

    /// Node metadata and role.
    pub async fn get_node_info(&self) -> Result<NodeInfo, ClientError> {
        self.unary(RpcMethod::GetNodeInfo, Empty {}, node::node_info).await
    }

    /// Connected peers.
    pub async fn get_peers_info(&self) -> Result<Vec<PeerInfo>, ClientError> {
        self.unary(RpcMethod::GetPeersInfo, Empty {}, |peers: wire::node::PeersInfo| {
            each(peers.peers, node::peer_info)
        })
        .await
    }

    /// Shut the node down.
    pub async fn shutdown(&self) -> Result<(), ClientError> {
        self.unary(RpcMethod::Shutdown, Empty {}, |_: Empty| Ok(())).await
    }

    /// Ask the node to connect to a peer.
    pub async fn peer_connect(&self, ip: &str, port: i64) -> Result<(), ClientError> {
        let address = socket_address(ip, port)?;
        self.unary(RpcMethod::PeerConnect, address, |_: Empty| Ok(())).await
    }

    /// Ask the node to drop a peer.
    pub async fn peer_disconnect(&self, ip: &str, port: i64) -> Result<(), ClientError> {
        let address = socket_address(ip, port)?;
        self.unary(RpcMethod::PeerDisconnect, address, |_: Empty| Ok(())).await
    }

    /// Banned peer addresses.
    pub async fn get_banned_peers(&self) -> Result<Vec<IpAddr>, ClientError> {
        self.unary(RpcMethod::GetBannedPeers, Empty {}, node::banned_peers).await
    }

    /// Ban a peer by address.
    pub async fn ban_peer(&self, ip: &str) -> Result<(), ClientError> {
        let peer = banned_peer(ip)?;
        self.unary(RpcMethod::BanPeer, peer, |_: Empty| Ok(())).await
    }

    /// Lift a ban.
    pub async fn unban_peer(&self, ip: &str) -> Result<(), ClientError> {
        let peer = banned_peer(ip)?;
        self.unary(RpcMethod::UnbanPeer, peer, |_: Empty| Ok(())).await
    }

    /// Start dumping network packets to `file`.
    pub async fn dump_start(&self, file: &str, raw: bool) -> Result<(), ClientError> {
        let request = DumpRequest {
            file: file.to_string(),
            raw,
        };
        self.unary(RpcMethod::DumpStart, request, |_: Empty| Ok(())).await
    }

    /// Stop dumping network packets.
    pub async fn dump_stop(&self) -> Result<(), ClientError> {
        self.unary(RpcMethod::DumpStop, Empty {}, |_: Empty| Ok(())).await
    }

    // =========================================================================
    // Synchronization
    // =========================================================================

    fn synchronizer(&self) -> BlockSynchronizer<NodeClient> {
        BlockSynchronizer::new(Arc::new(self.clone()))
    }

    /// Outcome of a block item once it is finalized.
    ///
    /// `timeout` falls back to the configured finalization timeout.
    pub async fn wait_for_transaction_finalization(
        &self,
        hash: TransactionHash,
        timeout: Option<Duration>,
        cancel: CancellationToken,
    ) -> Result<BlockItemSummaryInBlock, ClientError> {
        let timeout = timeout.or(self.config.finalization_timeout());
        self.synchronizer().wait_for_finalization(hash, timeout, cancel).await
    }

    /// Every finalized block from `start`, through `end` if given.
    pub fn get_finalized_blocks_from(
        &self,
        start: u64,
        end: Option<u64>,
        cancel: CancellationToken,
    ) -> NodeStream<FinalizedBlockInfo> {
        self.synchronizer().finalized_blocks_from(start, end, cancel)
    }

    /// Value of a monotone predicate at the lowest height where it holds.
    pub async fn find_earliest_finalized<T, F, Fut>(
        &self,
        from: u64,
        to: Option<u64>,
        predicate: F,
    ) -> Result<Option<T>, ClientError>
    where
        F: FnMut(FinalizedBlockInfo) -> Fut,
        Fut: Future<Output = Result<Option<T>, ClientError>>,
    {
        self.synchronizer().find_earliest_finalized(from, to, predicate).await
    }

    /// Earliest finalized block in which `contract` exists.
    pub async fn find_instance_creation(
        &self,
        contract: ContractAddress,
        from: u64,
        to: Option<u64>,
    ) -> Result<Option<InstanceCreation>, ClientError> {
        self.find_earliest_finalized(from, to, |block| async move {
            match self.get_instance_info(contract, BlockSelector::Given(block.hash)).await {
                Ok(instance) => Ok(Some(InstanceCreation { block, instance })),
                Err(e) if e.is_rpc(RpcCode::NotFound) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
    }

    /// Earliest finalized block whose slot time is at or after `time`.
    pub async fn find_first_finalized_block_no_later_than(
        &self,
        time: Timestamp,
        from: u64,
        to: Option<u64>,
    ) -> Result<Option<BlockInfo>, ClientError> {
        self.find_earliest_finalized(from, to, |block| async move {
            let info = self.get_block_info(BlockSelector::Given(block.hash)).await?;
            Ok((info.slot_time >= time).then_some(info))
        })
        .await
    }
}

#[async_trait]
impl ChainQueries for NodeClient {
    async fn last_finalized_height(&self) -> Result<u64, ClientError> {
        Ok(self.get_consensus_status().await?.last_finalized_block_height)
    }

    async fn blocks_at_height(&self, height: u64) -> Result<Vec<BlockHash>, ClientError> {
        self.get_blocks_at_height(height).await
    }

    async fn finalized_blocks(&self, cancel: CancellationToken) -> Result<NodeStream<FinalizedBlockInfo>, ClientError> {
        self.subscribed(RpcMethod::GetFinalizedBlocks, Empty {}, cancel, consensus::finalized_block)
            .await
    }

    async fn block_item_status(&self, hash: TransactionHash) -> Result<BlockItemStatus, ClientError> {
        self.get_block_item_status(hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RpcError, TranslationErrorKind};
    use crate::ports::{mock_block_hash, MockTransport};
    use ccd_types::{
        AccountTransactionHeader, BlockConsensusPosition, CcdAmount, Energy, ValidationError,
    };
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn client(transport: &MockTransport) -> NodeClient {
        NodeClient::new(Arc::new(transport.clone()), ClientConfig::for_testing())
    }

    fn given_height(request: &Value, field: Option<&str>) -> u64 {
        let selector = match field {
            Some(field) => &request[field],
            None => request,
        };
        let bytes = hex::decode(selector["given"].as_str().unwrap()).unwrap();
        u64::from_be_bytes(bytes[..8].try_into().unwrap())
    }

    fn serve_heights(transport: &MockTransport) {
        transport.on_call(RpcMethod::GetBlocksAtHeight, |request| {
            let height = request["absolute"]["height"].as_u64().unwrap();
            let blocks = wire::consensus::BlocksAtHeightResponse {
                blocks: vec![Bytes::from(mock_block_hash(height).as_bytes().as_slice())],
            };
            Ok(serde_json::to_value(blocks).unwrap())
        });
    }

    fn block_info(height: u64) -> Value {
        serde_json::to_value(wire::consensus::BlockInfo {
            hash: Some(Bytes::from(mock_block_hash(height).as_bytes().as_slice())),
            height: Some(height),
            parent_block: Some(Bytes(vec![1; 32])),
            last_finalized_block: Some(Bytes(vec![2; 32])),
            genesis_index: Some(0),
            era_block_height: Some(height),
            slot_number: Some(height),
            slot_time: Some(i64::try_from(height).unwrap() * 1_000),
            finalized: true,
            transactions_energy_cost: Some(0),
            state_hash: Some(Bytes(vec![3; 32])),
            protocol_version: 3,
            ..Default::default()
        })
        .unwrap()
    }

    fn instance_v1() -> Value {
        serde_json::to_value(wire::contracts::InstanceInfo::V1(wire::contracts::InstanceInfoV1 {
            owner: Some(Bytes(vec![9; 32])),
            amount: Some(0),
            methods: vec!["counter.view".to_string()],
            name: Some("init_counter".to_string()),
            source_module: Some(Bytes(vec![8; 32])),
        }))
        .unwrap()
    }

    fn block_ref(height: u64) -> Value {
        json!({ "hash": hex::encode(mock_block_hash(height).as_bytes()), "height": height })
    }

    #[tokio::test]
    async fn test_next_account_nonce() {
        let transport = MockTransport::new();
        transport.reply(
            RpcMethod::GetNextAccountSequenceNumber,
            json!({ "sequenceNumber": 7, "allFinal": true }),
        );
        let address = AccountAddress::new([4; 32]);

        let nonce = client(&transport).get_next_account_nonce(&address).await.unwrap();
        assert_eq!(nonce.nonce, 7);
        assert!(nonce.all_final);

        let (_, request) = &transport.calls()[0];
        assert_eq!(request, &json!({ "value": hex::encode([4u8; 32]) }));
    }

    #[tokio::test]
    async fn test_rpc_error_passes_through() {
        let transport = MockTransport::new();
        transport.fail(RpcMethod::GetBranches, RpcError::new(RpcCode::Unavailable, "node down"));
        let err = client(&transport).get_branches().await.unwrap_err();
        assert!(err.is_rpc(RpcCode::Unavailable));
    }

    #[tokio::test]
    async fn test_malformed_reply_names_method() {
        let transport = MockTransport::new();
        transport.reply(RpcMethod::GetBlocksAtHeight, json!({ "blocks": "not a list" }));
        let err = client(&transport).get_blocks_at_height(3).await.unwrap_err();
        let ClientError::Translation(err) = err else {
            panic!("expected translation error");
        };
        assert_eq!(err.path, "GetBlocksAtHeight");
        assert!(matches!(err.kind, TranslationErrorKind::Malformed(_)));
    }

    #[tokio::test]
    async fn test_relative_blocks_at_height_request() {
        let transport = MockTransport::new();
        transport.reply(RpcMethod::GetBlocksAtHeight, json!({ "blocks": [] }));
        let request = BlocksAtHeightRequest::Relative {
            genesis_index: 1,
            height: 4,
            restrict: false,
        };
        let blocks = client(&transport).get_blocks_at_height(request).await.unwrap();
        assert!(blocks.is_empty());
        assert_eq!(
            transport.calls()[0].1,
            json!({ "relative": { "genesisIndex": 1, "height": 4, "restrict": false } })
        );
    }

    #[tokio::test]
    async fn test_admin_input_validated_before_sending() {
        let transport = MockTransport::new();
        let client = client(&transport);

        let err = client.peer_connect("not-an-ip", 8888).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::InvalidIp(_))));
        let err = client.peer_disconnect("127.0.0.1", 70_000).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::InvalidPort(70_000))));
        let err = client.ban_peer("300.1.1.1").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::InvalidIp(_))));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_peer_connect_request() {
        let transport = MockTransport::new();
        transport.reply(RpcMethod::PeerConnect, json!({}));
        client(&transport).peer_connect("10.0.0.1", 8888).await.unwrap();
        assert_eq!(transport.calls()[0].1, json!({ "ip": "10.0.0.1", "port": 8888 }));
    }

    #[tokio::test]
    async fn test_banned_peers() {
        let transport = MockTransport::new();
        transport.reply(
            RpcMethod::GetBannedPeers,
            json!({ "peers": [{ "ipAddress": "1.2.3.4" }, { "ipAddress": "::1" }] }),
        );
        let peers = client(&transport).get_banned_peers().await.unwrap();
        assert_eq!(peers, vec!["1.2.3.4".parse::<IpAddr>().unwrap(), "::1".parse().unwrap()]);
    }

    #[tokio::test]
    async fn test_invoke_uses_default_energy() {
        let transport = MockTransport::new();
        transport.fail(RpcMethod::InvokeInstance, RpcError::new(RpcCode::Internal, "stop"));
        let context = ContractContext {
            invoker: None,
            contract: ContractAddress { index: 3, subindex: 0 },
            amount: CcdAmount::ZERO,
            method: "counter.view".to_string(),
            parameter: HexBytes::new(Vec::new()),
            energy: None,
        };
        let client = client(&transport);
        let _ = client.invoke_contract(&context, BlockSelector::LastFinal).await;
        let _ = client
            .invoke_contract(
                &ContractContext {
                    energy: Some(Energy(42)),
                    ..context
                },
                BlockSelector::LastFinal,
            )
            .await;

        let calls = transport.calls();
        assert_eq!(calls[0].1["energy"], 10_000);
        assert_eq!(calls[1].1["energy"], 42);
        assert!(calls[0].1.get("invoker").is_none());
    }

    #[tokio::test]
    async fn test_expired_transaction_not_sent() {
        let transport = MockTransport::new();
        let submission = AccountTransactionSubmission {
            header: AccountTransactionHeader {
                sender: AccountAddress::new([1; 32]),
                nonce: 1,
                energy_amount: Energy(500),
                expiry: Utc.timestamp_opt(1_000, 0).unwrap(),
            },
            payload: HexBytes::new(vec![0]),
            signature: BTreeMap::new(),
        };
        let err = client(&transport).send_account_transaction(&submission).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::ExpiryInPast { .. })));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_credential_deployment_returns_hash() {
        let transport = MockTransport::new();
        transport.reply(RpcMethod::SendBlockItem, json!({ "value": hex::encode([5u8; 32]) }));
        let expiry = Utc::now() + chrono::Duration::minutes(10);

        let hash = client(&transport)
            .send_credential_deployment(&HexBytes::new(vec![1, 2]), expiry)
            .await
            .unwrap();
        assert_eq!(hash, TransactionHash::new([5; 32]));

        let request = &transport.calls()[0].1;
        assert_eq!(request["credentialDeployment"]["payload"]["rawPayload"], "0102");
        assert_eq!(request["credentialDeployment"]["messageExpiry"], expiry.timestamp());
    }

    #[tokio::test]
    async fn test_instance_state_lookup_rejects_bad_hex() {
        let transport = MockTransport::new();
        let err = client(&transport)
            .instance_state_lookup(ContractAddress { index: 1, subindex: 0 }, "zz", BlockSelector::LastFinal)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(ValidationError::InvalidHex(_))));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_baker_earliest_win_time() {
        let transport = MockTransport::new();
        transport.reply(RpcMethod::GetBakerEarliestWinTime, json!({ "value": 1_700_000_000_000i64 }));
        let time = client(&transport).get_baker_earliest_win_time(12).await.unwrap();
        assert_eq!(time.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(transport.calls()[0].1, json!({ "value": 12 }));
    }

    #[tokio::test]
    async fn test_baker_list_stream() {
        let transport = MockTransport::new();
        transport.stream(
            RpcMethod::GetBakerList,
            vec![Ok(json!({ "value": 1 })), Ok(json!({ "value": 4 }))],
        );
        let bakers: Vec<_> = client(&transport)
            .get_baker_list(BlockSelector::LastFinal, CancellationToken::new())
            .collect()
            .await;
        assert_eq!(bakers.into_iter().map(Result::unwrap).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(transport.subscriptions()[0].1, json!({ "lastFinal": {} }));
    }

    #[tokio::test]
    async fn test_stream_is_lazy() {
        let transport = MockTransport::new();
        let stream = client(&transport).get_blocks(CancellationToken::new());
        assert!(transport.subscriptions().is_empty());
        drop(stream);
        assert!(transport.subscriptions().is_empty());
    }

    #[tokio::test]
    async fn test_live_stream_pending_until_push() {
        let transport = MockTransport::new();
        let mut blocks = tokio_test::task::spawn(client(&transport).get_finalized_blocks(CancellationToken::new()));

        tokio_test::assert_pending!(blocks.poll_next());
        assert_eq!(transport.subscriptions().len(), 1);

        transport.push(RpcMethod::GetFinalizedBlocks, block_ref(2));
        assert!(blocks.is_woken());
        let block = tokio_test::assert_ready!(blocks.poll_next()).unwrap().unwrap();
        assert_eq!(block.height, 2);
    }

    #[tokio::test]
    async fn test_stream_ends_after_translation_error() {
        let transport = MockTransport::new();
        transport.stream(
            RpcMethod::GetAccountList,
            vec![
                Ok(json!({ "value": hex::encode([1u8; 32]) })),
                Ok(json!({ "value": "0102" })),
                Ok(json!({ "value": hex::encode([2u8; 32]) })),
            ],
        );
        let items: Vec<_> = client(&transport)
            .get_account_list(BlockSelector::LastFinal, CancellationToken::new())
            .collect()
            .await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap(), &AccountAddress::new([1; 32]));
        assert!(matches!(items[1], Err(ClientError::Translation(_))));
    }

    #[tokio::test]
    async fn test_cancelled_live_stream_releases_subscription() {
        let transport = MockTransport::new();
        let cancel = CancellationToken::new();
        let mut blocks = client(&transport).get_finalized_blocks(cancel.clone());

        let first = tokio::spawn(async move {
            let first = blocks.next().await;
            (first, blocks)
        });
        while transport.subscriptions().is_empty() {
            tokio::task::yield_now().await;
        }
        transport.push(RpcMethod::GetFinalizedBlocks, block_ref(5));
        let (first, mut blocks) = first.await.unwrap();
        assert_eq!(first.unwrap().unwrap().height, 5);

        cancel.cancel();
        assert!(blocks.next().await.is_none());
        drop(blocks);
        assert_eq!(transport.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_pre_cancelled_stream_never_subscribes() {
        let transport = MockTransport::new();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let items: Vec<_> = client(&transport).get_finalized_blocks(cancel).collect().await;
        assert!(items.is_empty());
        assert!(transport.subscriptions().is_empty());
    }

    #[tokio::test]
    async fn test_synchronizer_feed_subscribes_immediately() {
        let transport = MockTransport::new();
        let client = client(&transport);
        let mut blocks = ChainQueries::finalized_blocks(&client, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(transport.active_subscriptions(), 1);

        transport.push(RpcMethod::GetFinalizedBlocks, block_ref(4));
        assert_eq!(blocks.next().await.unwrap().unwrap().height, 4);
        drop(blocks);
        assert_eq!(transport.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_find_first_finalized_block_no_later_than() {
        let transport = MockTransport::new();
        serve_heights(&transport);
        transport.on_call(RpcMethod::GetBlockInfo, |request| Ok(block_info(given_height(request, None))));

        let time = Utc.timestamp_millis_opt(7_500).unwrap();
        let info = client(&transport)
            .find_first_finalized_block_no_later_than(time, 0, Some(20))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(info.height, 8);
        assert_eq!(info.position, BlockConsensusPosition::V0 { slot: 8 });
    }

    #[tokio::test]
    async fn test_find_instance_creation() {
        let transport = MockTransport::new();
        serve_heights(&transport);
        transport.on_call(RpcMethod::GetInstanceInfo, |request| {
            if given_height(request, Some("blockHash")) < 5 {
                Err(RpcError::new(RpcCode::NotFound, "no such instance"))
            } else {
                Ok(instance_v1())
            }
        });

        let creation = client(&transport)
            .find_instance_creation(ContractAddress { index: 2, subindex: 0 }, 0, Some(9))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creation.block.height, 5);
        assert_eq!(creation.block.hash, mock_block_hash(5));
        assert!(matches!(creation.instance, InstanceInfo::V1 { .. }));
    }

    #[tokio::test]
    async fn test_find_instance_creation_propagates_other_errors() {
        let transport = MockTransport::new();
        serve_heights(&transport);
        transport.fail(RpcMethod::GetInstanceInfo, RpcError::new(RpcCode::Internal, "boom"));
        let err = client(&transport)
            .find_instance_creation(ContractAddress { index: 2, subindex: 0 }, 0, Some(9))
            .await
            .unwrap_err();
        assert!(err.is_rpc(RpcCode::Internal));
    }

    #[tokio::test]
    async fn test_wait_for_finalization_already_finalized() {
        let transport = MockTransport::new();
        let tx = TransactionHash::new([6; 32]);
        transport.reply(
            RpcMethod::GetBlockItemStatus,
            json!({
                "finalized": {
                    "outcome": {
                        "blockHash": hex::encode(mock_block_hash(3).as_bytes()),
                        "outcome": {
                            "index": 0,
                            "energyCost": 0,
                            "hash": hex::encode(tx.as_bytes()),
                            "details": {
                                "update": {
                                    "effectiveTime": 0,
                                    "payload": { "minBlockTimeUpdate": 2000 }
                                }
                            }
                        }
                    }
                }
            }),
        );

        let outcome = client(&transport)
            .wait_for_transaction_finalization(tx, None, CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(outcome.block_hash, mock_block_hash(3));
        assert_eq!(outcome.summary.hash, tx);
        assert!(transport.subscriptions().is_empty());
    }
}
