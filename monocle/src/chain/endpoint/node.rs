//! Tendermint RPC reads: node status and health, blocks, block results and committed transactions.
use crate::{
    error::ChainClientError,
    node::{self, BlockResults, BlockSummary, NodeStatus, TxSummary},
};

use super::ChainEndpoint;

impl ChainEndpoint {
    pub async fn node_status(&self) -> Result<NodeStatus, ChainClientError> {
        self.call("node_status", self.transport.node_status()).await
    }

    /// Block at `height`, or the latest one
    pub async fn block(&self, height: Option<u64>) -> Result<BlockSummary, ChainClientError> {
        self.call("block", self.transport.block(height)).await
    }

    pub async fn block_results(
        &self,
        height: Option<u64>,
    ) -> Result<BlockResults, ChainClientError> {
        self.call("block_results", self.transport.block_results(height))
            .await
    }

    /// Looks up a committed transaction by its hex hash. A malformed hash is rejected before
    /// anything is sent.
    pub async fn tx(&self, hash: &str) -> Result<TxSummary, ChainClientError> {
        let hash = node::parse_tx_hash(hash)?;

        self.call("tx", self.transport.tx(hash)).await
    }

    pub async fn health(&self) -> Result<(), ChainClientError> {
        self.call("health", self.transport.health()).await
    }
}
