//! gRPC and Tendermint RPC backed [`ChainTransport`]. The gRPC channel is connected on first use
//! and shared by every module client afterwards.
use async_trait::async_trait;
use cosmos_sdk_proto::{
    cosmos::{
        auth::v1beta1 as auth,
        bank::v1beta1 as bank,
        base::query::v1beta1::PageResponse,
        distribution::v1beta1 as distribution,
        tx::v1beta1::{self as txs, service_client::ServiceClient},
    },
    ibc::applications::transfer::v1 as transfer,
};
use cosmrs::tendermint::{
    abci::{responses::DeliverTx, transaction::Hash},
    block::Height,
};
use prost_types::Any;
use tendermint_rpc::{Client, HttpClient};
use tokio::sync::OnceCell;
use tonic::{
    metadata::{Ascii, MetadataValue},
    transport::{Channel, Endpoint},
    Code,
};

use super::{ChainTransport, Page, PageRequest};
use crate::{
    chain::config::BroadcastMode,
    coin::Coin,
    denom::DenomTrace,
    error::NetworkError,
    node::{
        tx_hash, AuthParams, BlockResults, BlockSummary, NodeStatus, TxOutcome, TxSummary,
        TX_HASH_LENGTH,
    },
    tx::BroadcastResult,
    utils::normalize_grpc_endpoint,
};

/// Metadata header the Cosmos SDK gRPC gateway reads the query height from
const BLOCK_HEIGHT_HEADER: &str = "x-cosmos-block-height";

pub type AuthQueryClient = auth::query_client::QueryClient<Channel>;
pub type BankQueryClient = bank::query_client::QueryClient<Channel>;
pub type DistributionQueryClient = distribution::query_client::QueryClient<Channel>;
pub type TransferQueryClient = transfer::query_client::QueryClient<Channel>;
pub type TxServiceClient = ServiceClient<Channel>;

/// Proto clients that can be built on top of a shared channel
pub trait ConstructClient {
    fn new_client(channel: Channel) -> Self;
}

impl ConstructClient for AuthQueryClient {
    fn new_client(channel: Channel) -> Self {
        AuthQueryClient::new(channel)
    }
}

impl ConstructClient for BankQueryClient {
    fn new_client(channel: Channel) -> Self {
        BankQueryClient::new(channel)
    }
}

impl ConstructClient for DistributionQueryClient {
    fn new_client(channel: Channel) -> Self {
        DistributionQueryClient::new(channel)
    }
}

impl ConstructClient for TransferQueryClient {
    fn new_client(channel: Channel) -> Self {
        TransferQueryClient::new(channel)
    }
}

impl ConstructClient for TxServiceClient {
    fn new_client(channel: Channel) -> Self {
        TxServiceClient::new(channel)
    }
}

pub struct GrpcTransport {
    endpoint: Endpoint,
    channel: OnceCell<Channel>,
    rpc_client: HttpClient,
}

impl GrpcTransport {
    /// Validates both addresses; no connection is made until the first call.
    pub fn new(rpc_address: &str, grpc_address: &str) -> Result<Self, NetworkError> {
        let grpc_address = normalize_grpc_endpoint(grpc_address)?;
        let endpoint = Endpoint::from_shared(grpc_address)
            .map_err(|e| NetworkError::InvalidEndpoint(e.to_string()))?;
        let rpc_client = HttpClient::new(rpc_address)?;

        Ok(GrpcTransport {
            endpoint,
            channel: OnceCell::new(),
            rpc_client,
        })
    }

    async fn channel(&self) -> Result<Channel, NetworkError> {
        let channel = self
            .channel
            .get_or_try_init(|| async { self.endpoint.connect().await })
            .await?;

        Ok(channel.clone())
    }

    /// Gets a module client on the shared channel
    pub async fn get_client<T: ConstructClient>(&self) -> Result<T, NetworkError> {
        Ok(T::new_client(self.channel().await?))
    }
}

fn page_of<T>(items: Vec<T>, pagination: Option<PageResponse>) -> Page<T> {
    // chains leave total at zero when count_total was not honored
    let (next_key, total) = match pagination {
        Some(p) => (p.next_key, (p.total > 0).then(|| p.total)),
        None => (Vec::new(), None),
    };

    Page {
        items,
        next_key,
        total,
    }
}

/// Header value pinning a query to `height`
fn height_metadata(height: u64) -> Result<MetadataValue<Ascii>, NetworkError> {
    height
        .to_string()
        .parse::<MetadataValue<Ascii>>()
        .map_err(|e| NetworkError::Malformed(e.to_string()))
}

fn rpc_height(height: u64) -> Result<Height, NetworkError> {
    Height::try_from(height).map_err(|e| NetworkError::Malformed(e.to_string()))
}

fn tx_outcome(result: &DeliverTx) -> TxOutcome {
    TxOutcome {
        code: result.code.value(),
        log: result.log.to_string(),
        gas_wanted: result.gas_wanted.value(),
        gas_used: result.gas_used.value(),
    }
}

#[async_trait]
impl ChainTransport for GrpcTransport {
    async fn account(&self, address: &str) -> Result<Option<Any>, NetworkError> {
        let mut query_client = self.get_client::<AuthQueryClient>().await?;
        let request = auth::QueryAccountRequest {
            address: address.to_string(),
        };

        match query_client.account(request).await {
            Ok(response) => Ok(response.into_inner().account),
            Err(status) if status.code() == Code::NotFound => Ok(None),
            Err(status) => Err(status.into()),
        }
    }

    async fn all_balances(
        &self,
        address: &str,
        page: PageRequest,
    ) -> Result<Page<Coin>, NetworkError> {
        let mut query_client = self.get_client::<BankQueryClient>().await?;
        let request = bank::QueryAllBalancesRequest {
            address: address.to_string(),
            pagination: Some(page),
        };
        let response = query_client.all_balances(request).await?.into_inner();
        let mut balances = Vec::<Coin>::with_capacity(response.balances.len());

        for b in response.balances {
            balances.push(
                Coin::try_from(b).map_err(|e| NetworkError::Malformed(e.to_string()))?,
            )
        }

        Ok(page_of(balances, response.pagination))
    }

    async fn denom_traces(
        &self,
        page: PageRequest,
        height: u64,
    ) -> Result<Page<DenomTrace>, NetworkError> {
        let mut query_client = self.get_client::<TransferQueryClient>().await?;
        let mut request = tonic::Request::new(transfer::QueryDenomTracesRequest {
            pagination: Some(page),
        });
        request
            .metadata_mut()
            .insert(BLOCK_HEIGHT_HEADER, height_metadata(height)?);

        let response = query_client.denom_traces(request).await?.into_inner();
        let traces = response
            .denom_traces
            .into_iter()
            .map(DenomTrace::from)
            .collect();

        Ok(page_of(traces, response.pagination))
    }

    async fn latest_height(&self) -> Result<u64, NetworkError> {
        let status = self.rpc_client.status().await?;

        Ok(status.sync_info.latest_block_height.value())
    }

    async fn delegator_validators(&self, delegator: &str) -> Result<Vec<String>, NetworkError> {
        let mut query_client = self.get_client::<DistributionQueryClient>().await?;
        let request = distribution::QueryDelegatorValidatorsRequest {
            delegator_address: delegator.to_string(),
        };

        Ok(query_client
            .delegator_validators(request)
            .await?
            .into_inner()
            .validators)
    }

    async fn simulate(&self, tx_bytes: Vec<u8>) -> Result<u64, NetworkError> {
        let mut tx_client = self.get_client::<TxServiceClient>().await?;
        let request = txs::SimulateRequest {
            tx_bytes,
            ..Default::default()
        };
        let response = tx_client.simulate(request).await?.into_inner();

        response
            .gas_info
            .map(|info| info.gas_used)
            .ok_or_else(|| NetworkError::Malformed("simulation returned no gas info".to_string()))
    }

    async fn broadcast(
        &self,
        tx_bytes: Vec<u8>,
        mode: BroadcastMode,
    ) -> Result<BroadcastResult, NetworkError> {
        let mut tx_client = self.get_client::<TxServiceClient>().await?;
        let mode = match mode {
            BroadcastMode::Sync => txs::BroadcastMode::Sync,
            BroadcastMode::Async => txs::BroadcastMode::Async,
            BroadcastMode::Block => txs::BroadcastMode::Block,
        };
        let request = txs::BroadcastTxRequest {
            tx_bytes,
            mode: mode as i32,
        };
        let response = tx_client.broadcast_tx(request).await?.into_inner();

        response
            .tx_response
            .map(BroadcastResult::from)
            .ok_or_else(|| NetworkError::Malformed("broadcast returned no tx response".to_string()))
    }

    async fn accounts(&self, page: PageRequest) -> Result<Page<Any>, NetworkError> {
        let mut query_client = self.get_client::<AuthQueryClient>().await?;
        let request = auth::QueryAccountsRequest {
            pagination: Some(page),
        };
        let response = query_client.accounts(request).await?.into_inner();

        Ok(page_of(response.accounts, response.pagination))
    }

    async fn auth_params(&self) -> Result<AuthParams, NetworkError> {
        let mut query_client = self.get_client::<AuthQueryClient>().await?;
        let params = query_client
            .params(auth::QueryParamsRequest {})
            .await?
            .into_inner()
            .params
            .ok_or_else(|| NetworkError::Malformed("auth params missing".to_string()))?;

        Ok(AuthParams {
            max_memo_characters: params.max_memo_characters,
            tx_sig_limit: params.tx_sig_limit,
            tx_size_cost_per_byte: params.tx_size_cost_per_byte,
            sig_verify_cost_ed25519: params.sig_verify_cost_ed25519,
            sig_verify_cost_secp256k1: params.sig_verify_cost_secp256k1,
        })
    }

    async fn node_status(&self) -> Result<NodeStatus, NetworkError> {
        let status = self.rpc_client.status().await?;

        Ok(NodeStatus {
            moniker: status.node_info.moniker.to_string(),
            network: status.node_info.network.to_string(),
            version: status.node_info.version.to_string(),
            latest_block_height: status.sync_info.latest_block_height.value(),
            latest_block_hash: status.sync_info.latest_block_hash.to_string(),
            latest_block_time: status.sync_info.latest_block_time.to_rfc3339(),
            catching_up: status.sync_info.catching_up,
        })
    }

    async fn block(&self, height: Option<u64>) -> Result<BlockSummary, NetworkError> {
        let response = match height {
            Some(h) => self.rpc_client.block(rpc_height(h)?).await?,
            None => self.rpc_client.latest_block().await?,
        };
        let header = &response.block.header;

        Ok(BlockSummary {
            height: header.height.value(),
            hash: response.block_id.hash.to_string(),
            chain_id: header.chain_id.to_string(),
            time: header.time.to_rfc3339(),
            proposer: header.proposer_address.to_string(),
            tx_hashes: response
                .block
                .data
                .iter()
                .map(|tx| tx_hash(tx.as_bytes()))
                .collect(),
        })
    }

    async fn block_results(&self, height: Option<u64>) -> Result<BlockResults, NetworkError> {
        let response = match height {
            Some(h) => self.rpc_client.block_results(rpc_height(h)?).await?,
            None => self.rpc_client.latest_block_results().await?,
        };

        Ok(BlockResults {
            height: response.height.value(),
            txs: response
                .txs_results
                .unwrap_or_default()
                .iter()
                .map(tx_outcome)
                .collect(),
        })
    }

    async fn tx(&self, hash: [u8; TX_HASH_LENGTH]) -> Result<TxSummary, NetworkError> {
        let response = self.rpc_client.tx(Hash::new(hash), false).await?;

        Ok(TxSummary {
            hash: response.hash.to_string(),
            height: response.height.value(),
            index: response.index,
            result: tx_outcome(&response.tx_result),
        })
    }

    async fn health(&self) -> Result<(), NetworkError> {
        Ok(self.rpc_client.health().await?)
    }
}
