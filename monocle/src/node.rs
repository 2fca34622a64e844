//! Plain views of what a Tendermint node reports about itself, its blocks and its
//! transactions, plus the auth module parameters. Transports convert their wire types into
//! these so callers never depend on a particular RPC client version.
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ChainClientError;

/// Length of a transaction hash in bytes
pub const TX_HASH_LENGTH: usize = 32;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NodeStatus {
    pub moniker: String,
    /// Chain id the node is on
    pub network: String,
    pub version: String,
    pub latest_block_height: u64,
    pub latest_block_hash: String,
    pub latest_block_time: String,
    pub catching_up: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct BlockSummary {
    pub height: u64,
    pub hash: String,
    pub chain_id: String,
    pub time: String,
    pub proposer: String,
    /// Hashes of the transactions in the block, in block order
    pub tx_hashes: Vec<String>,
}

/// Outcome of one transaction as executed in a block
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TxOutcome {
    pub code: u32,
    pub log: String,
    pub gas_wanted: u64,
    pub gas_used: u64,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct BlockResults {
    pub height: u64,
    pub txs: Vec<TxOutcome>,
}

/// A committed transaction found by hash
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TxSummary {
    pub hash: String,
    pub height: u64,
    pub index: u32,
    pub result: TxOutcome,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AuthParams {
    pub max_memo_characters: u64,
    pub tx_sig_limit: u64,
    pub tx_size_cost_per_byte: u64,
    pub sig_verify_cost_ed25519: u64,
    pub sig_verify_cost_secp256k1: u64,
}

/// Tendermint transaction hash: upper case hex of the SHA-256 of the raw transaction
pub fn tx_hash(tx_bytes: &[u8]) -> String {
    hex::encode_upper(Sha256::digest(tx_bytes))
}

/// Parses a hex transaction hash, in either case
pub fn parse_tx_hash(hash: &str) -> Result<[u8; TX_HASH_LENGTH], ChainClientError> {
    let invalid = || ChainClientError::InvalidTxHash(hash.to_string());
    let bytes = hex::decode(hash.trim()).map_err(|_| invalid())?;

    bytes.try_into().map_err(|_| invalid())
}
