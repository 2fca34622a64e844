//! The wire underneath a [`ChainEndpoint`](super::endpoint::ChainEndpoint). [`GrpcTransport`] is
//! the real thing; anything else implementing [`ChainTransport`] (a recording mock, a proxy)
//! can be plugged into an endpoint instead.
use async_trait::async_trait;
use prost_types::Any;

use crate::{
    chain::config::BroadcastMode,
    coin::Coin,
    denom::DenomTrace,
    error::NetworkError,
    node::{AuthParams, BlockResults, BlockSummary, NodeStatus, TxSummary, TX_HASH_LENGTH},
    tx::BroadcastResult,
};

pub use self::grpc::GrpcTransport;

pub mod grpc;

/// Paging configuration for queries with potentially large result sets
pub type PageRequest = cosmos_sdk_proto::cosmos::base::query::v1beta1::PageRequest;

pub const DEFAULT_PAGE_LIMIT: u64 = 1000;

/// The page request every paginated listing starts from
pub fn default_page_request() -> PageRequest {
    PageRequest {
        key: Vec::new(),
        offset: 0,
        limit: DEFAULT_PAGE_LIMIT,
        count_total: true,
        ..Default::default()
    }
}

/// One page of a paginated listing
#[derive(Clone, Debug, Default)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Continuation key; empty on the last page
    pub next_key: Vec<u8>,
    /// Total item count, when the chain was asked for it and reported one
    pub total: Option<u64>,
}

/// Typed RPC/gRPC calls a chain endpoint needs
#[async_trait]
pub trait ChainTransport: Send + Sync {
    /// Raw account for an address, [`None`] if the chain does not know it
    async fn account(&self, address: &str) -> Result<Option<Any>, NetworkError>;

    async fn all_balances(
        &self,
        address: &str,
        page: PageRequest,
    ) -> Result<Page<Coin>, NetworkError>;

    /// One page of denom traces, read at the given block height
    async fn denom_traces(
        &self,
        page: PageRequest,
        height: u64,
    ) -> Result<Page<DenomTrace>, NetworkError>;

    async fn latest_height(&self) -> Result<u64, NetworkError>;

    async fn delegator_validators(&self, delegator: &str) -> Result<Vec<String>, NetworkError>;

    /// Gas used by the signed transaction when simulated against current state
    async fn simulate(&self, tx_bytes: Vec<u8>) -> Result<u64, NetworkError>;

    async fn broadcast(
        &self,
        tx_bytes: Vec<u8>,
        mode: BroadcastMode,
    ) -> Result<BroadcastResult, NetworkError>;

    /// One page of every account the chain knows, still packed
    async fn accounts(&self, page: PageRequest) -> Result<Page<Any>, NetworkError>;

    async fn auth_params(&self) -> Result<AuthParams, NetworkError>;

    async fn node_status(&self) -> Result<NodeStatus, NetworkError>;

    /// Block at a height, or the latest block when `height` is [`None`]
    async fn block(&self, height: Option<u64>) -> Result<BlockSummary, NetworkError>;

    async fn block_results(&self, height: Option<u64>) -> Result<BlockResults, NetworkError>;

    async fn tx(&self, hash: [u8; TX_HASH_LENGTH]) -> Result<TxSummary, NetworkError>;

    /// Succeeds when the node reports itself healthy
    async fn health(&self) -> Result<(), NetworkError>;
}
