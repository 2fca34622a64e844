#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use cosmos_sdk_proto::cosmos::auth::v1beta1::BaseAccount;
use monocle::{
    account::BASE_ACCOUNT_TYPE_URL,
    chain::{
        config::{BroadcastMode, ChainClientConfig, OutputFormat, SignMode},
        transport::{Page, PageRequest},
    },
    coin::Coin,
    denom::DenomTrace,
    error::NetworkError,
    keyring::Keyring,
    node::{AuthParams, BlockResults, BlockSummary, NodeStatus, TxSummary, TX_HASH_LENGTH},
    tx::BroadcastResult,
    ChainEndpoint, ChainTransport,
};
use prost::Message;
use prost_types::Any;

/// Key name the test mnemonic is imported under
pub const TEST_KEY: &str = "test";

/// 24 word phrase; the keyring only derives from 24 word mnemonics
pub const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

pub const SIMULATED_GAS: u64 = 100_000;

/// Temporary keyring directory, removed on drop
pub struct TestDir(PathBuf);

impl TestDir {
    pub fn new() -> Self {
        TestDir(std::env::temp_dir().join(format!("monocle-test-{}", uuid::Uuid::new_v4())))
    }

    pub fn path(&self) -> String {
        self.0.to_string_lossy().to_string()
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

pub fn test_config(chain_id: &str, prefix: &str, key_dir: &TestDir) -> ChainClientConfig {
    ChainClientConfig {
        chain_id: chain_id.to_string(),
        rpc_address: "http://localhost:26657".to_string(),
        grpc_address: "http://localhost:9090".to_string(),
        account_prefix: prefix.to_string(),
        key: TEST_KEY.to_string(),
        keyring_backend: "file".to_string(),
        key_directory: Some(key_dir.path()),
        gas_adjustment: 1.5,
        gas_prices: "0.01uatom".to_string(),
        timeout_secs: 5,
        output_format: OutputFormat::Json,
        broadcast_mode: BroadcastMode::Sync,
        sign_mode: SignMode::Direct,
    }
}

/// Keyring holding the test mnemonic under [`TEST_KEY`]
pub fn test_keyring(key_dir: &TestDir) -> Keyring {
    let keyring = Keyring::new_file_store(Some(&key_dir.path())).unwrap();
    if !keyring.key_exists(TEST_KEY).unwrap() {
        keyring
            .import_key(TEST_KEY, TEST_MNEMONIC, "", None, false)
            .unwrap();
    }

    keyring
}

pub fn test_endpoint(
    chain_id: &str,
    prefix: &str,
    key_dir: &TestDir,
    transport: Arc<MockTransport>,
) -> ChainEndpoint {
    ChainEndpoint::with_transport(
        test_config(chain_id, prefix, key_dir),
        test_keyring(key_dir),
        transport,
    )
}

/// Splits items into pages chained by one byte continuation keys. Only the first page carries
/// the total, like the SDK does.
pub fn paged<T: Clone>(pages: Vec<Vec<T>>) -> Vec<Page<T>> {
    let total: usize = pages.iter().map(Vec::len).sum();
    let count = pages.len();

    pages
        .into_iter()
        .enumerate()
        .map(|(i, items)| Page {
            items,
            next_key: if i + 1 < count { vec![i as u8 + 1] } else { vec![] },
            total: if i == 0 { Some(total as u64) } else { None },
        })
        .collect()
}

fn page_at<T: Clone>(pages: &[Page<T>], request: &PageRequest) -> Result<Page<T>, NetworkError> {
    let index = request.key.first().copied().unwrap_or(0) as usize;

    pages
        .get(index)
        .cloned()
        .ok_or_else(|| NetworkError::Malformed(format!("no page {}", index)))
}

/// Packed base account, as the auth module returns it
pub fn packed_account(address: &str, account_number: u64, sequence: u64) -> Any {
    let account = BaseAccount {
        address: address.to_string(),
        pub_key: None,
        account_number,
        sequence,
    };

    Any {
        type_url: BASE_ACCOUNT_TYPE_URL.to_string(),
        value: account.encode_to_vec(),
    }
}

pub fn block_at(height: u64, tx_hashes: Vec<String>) -> BlockSummary {
    BlockSummary {
        height,
        hash: format!("{:064X}", height),
        chain_id: "cosmoshub-4".to_string(),
        time: "2022-06-01T00:00:00Z".to_string(),
        proposer: "A1B2C3".to_string(),
        tx_hashes,
    }
}

pub fn unavailable() -> NetworkError {
    NetworkError::Request(tonic::Status::unavailable("connection refused"))
}

/// Scripted transport. Every listing is served from prepared pages and every call is recorded.
pub struct MockTransport {
    pub balance_pages: Vec<Page<Coin>>,
    pub trace_pages: Vec<Page<DenomTrace>>,
    pub height: u64,
    pub account_number: u64,
    pub sequence: u64,
    pub validators: Vec<String>,
    pub fail_balances: bool,
    /// Delay before the latest height is answered
    pub latency: Option<Duration>,
    /// Broadcast outcome; [`None`] simulates an unreachable node
    pub broadcast_code: Option<u32>,
    pub account_pages: Vec<Page<Any>>,
    pub blocks: Vec<BlockSummary>,
    pub block_results: Vec<BlockResults>,
    pub txs: Vec<TxSummary>,
    pub healthy: bool,
    pub calls: Mutex<Vec<String>>,
    pub trace_heights: Mutex<Vec<u64>>,
    pub broadcasts: Mutex<Vec<(Vec<u8>, BroadcastMode)>>,
    /// Heights asked for by block and block results calls
    pub block_heights: Mutex<Vec<Option<u64>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        MockTransport {
            balance_pages: paged(vec![vec![]]),
            trace_pages: paged(vec![vec![]]),
            height: 1_000,
            account_number: 7,
            sequence: 3,
            validators: vec![],
            fail_balances: false,
            latency: None,
            broadcast_code: Some(0),
            account_pages: paged(vec![vec![]]),
            blocks: vec![],
            block_results: vec![],
            txs: vec![],
            healthy: true,
            calls: Mutex::new(vec![]),
            trace_heights: Mutex::new(vec![]),
            broadcasts: Mutex::new(vec![]),
            block_heights: Mutex::new(vec![]),
        }
    }
}

impl MockTransport {
    pub fn with_balances(coins: Vec<Coin>) -> Self {
        MockTransport {
            balance_pages: paged(vec![coins]),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        MockTransport {
            fail_balances: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl ChainTransport for MockTransport {
    async fn account(&self, address: &str) -> Result<Option<Any>, NetworkError> {
        self.record("account");

        Ok(Some(packed_account(
            address,
            self.account_number,
            self.sequence,
        )))
    }

    async fn all_balances(
        &self,
        _address: &str,
        page: PageRequest,
    ) -> Result<Page<Coin>, NetworkError> {
        self.record("all_balances");

        if self.fail_balances {
            return Err(unavailable());
        }

        page_at(&self.balance_pages, &page)
    }

    async fn denom_traces(
        &self,
        page: PageRequest,
        height: u64,
    ) -> Result<Page<DenomTrace>, NetworkError> {
        self.record("denom_traces");
        self.trace_heights.lock().unwrap().push(height);

        page_at(&self.trace_pages, &page)
    }

    async fn latest_height(&self) -> Result<u64, NetworkError> {
        self.record("latest_height");

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        Ok(self.height)
    }

    async fn delegator_validators(&self, _delegator: &str) -> Result<Vec<String>, NetworkError> {
        self.record("delegator_validators");

        Ok(self.validators.clone())
    }

    async fn simulate(&self, _tx_bytes: Vec<u8>) -> Result<u64, NetworkError> {
        self.record("simulate");

        Ok(SIMULATED_GAS)
    }

    async fn broadcast(
        &self,
        tx_bytes: Vec<u8>,
        mode: BroadcastMode,
    ) -> Result<BroadcastResult, NetworkError> {
        self.record("broadcast");
        self.broadcasts.lock().unwrap().push((tx_bytes, mode));

        match self.broadcast_code {
            Some(code) => Ok(BroadcastResult {
                code,
                log: if code == 0 {
                    "[]".to_string()
                } else {
                    "insufficient funds".to_string()
                },
                tx_hash: "5E2A4B4F3C9E".to_string(),
                height: self.height as i64,
            }),
            None => Err(unavailable()),
        }
    }

    async fn accounts(&self, page: PageRequest) -> Result<Page<Any>, NetworkError> {
        self.record("accounts");

        page_at(&self.account_pages, &page)
    }

    async fn auth_params(&self) -> Result<AuthParams, NetworkError> {
        self.record("auth_params");

        Ok(AuthParams {
            max_memo_characters: 256,
            tx_sig_limit: 7,
            tx_size_cost_per_byte: 10,
            sig_verify_cost_ed25519: 590,
            sig_verify_cost_secp256k1: 1000,
        })
    }

    async fn node_status(&self) -> Result<NodeStatus, NetworkError> {
        self.record("node_status");

        Ok(NodeStatus {
            moniker: "mock-node".to_string(),
            network: "cosmoshub-4".to_string(),
            version: "0.34.19".to_string(),
            latest_block_height: self.height,
            latest_block_hash: format!("{:064X}", self.height),
            latest_block_time: "2022-06-01T00:00:00Z".to_string(),
            catching_up: false,
        })
    }

    async fn block(&self, height: Option<u64>) -> Result<BlockSummary, NetworkError> {
        self.record("block");
        self.block_heights.lock().unwrap().push(height);

        let height = height.unwrap_or(self.height);
        self.blocks
            .iter()
            .find(|b| b.height == height)
            .cloned()
            .ok_or_else(|| NetworkError::Malformed(format!("no block at height {}", height)))
    }

    async fn block_results(&self, height: Option<u64>) -> Result<BlockResults, NetworkError> {
        self.record("block_results");
        self.block_heights.lock().unwrap().push(height);

        let height = height.unwrap_or(self.height);
        self.block_results
            .iter()
            .find(|r| r.height == height)
            .cloned()
            .ok_or_else(|| NetworkError::Malformed(format!("no results at height {}", height)))
    }

    async fn tx(&self, hash: [u8; TX_HASH_LENGTH]) -> Result<TxSummary, NetworkError> {
        self.record("tx");

        let hash = hex::encode_upper(hash);
        self.txs
            .iter()
            .find(|t| t.hash == hash)
            .cloned()
            .ok_or_else(|| NetworkError::Malformed(format!("tx {} not found", hash)))
    }

    async fn health(&self) -> Result<(), NetworkError> {
        self.record("health");

        if self.healthy {
            Ok(())
        } else {
            Err(unavailable())
        }
    }
}
