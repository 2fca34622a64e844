use std::time::Duration;

use cosmrs::ErrorReport;
use thiserror::Error;

// Higher level error: ChainClientError. Everything a chain operation can fail with
// ends up here, tagged with the chain it happened on where that matters.
#[derive(Debug, Error)]
pub enum ChainClientError {
    #[error("{0}")]
    Account(#[from] AccountError),
    #[error("{0}")]
    Address(#[from] AddressError),
    #[error("{0}")]
    Amount(#[from] AmountError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("invalid transaction hash '{0}'")]
    InvalidTxHash(String),
    #[error("{0}")]
    Keyring(#[from] KeyStoreError),
    #[error("network error on chain {chain_id} during {operation}: {source}")]
    Network {
        chain_id: String,
        operation: &'static str,
        source: NetworkError,
    },
    #[error("inconsistent pagination on chain {chain_id} during {operation}: {source}")]
    Pagination {
        chain_id: String,
        operation: &'static str,
        source: PaginationError,
    },
    #[error("{0}")]
    Tx(#[from] TxError),
    #[error("'{input}' is neither a known key nor a valid address on chain {chain_id}")]
    UnresolvedIdentity { chain_id: String, input: String },
    #[error("chain {0} is not configured")]
    UnknownChain(String),
}

// Lower level errors; used by higher level errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("error encoding address: {0}")]
    Encoding(String),
    #[error("error decoding address: {0}")]
    Decoding(String),
    #[error("address prefix mismatch: expected '{expected}', found '{found}'")]
    PrefixMismatch { expected: String, found: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("invalid amount '{amount}' for {denom}: {reason}")]
    Invalid {
        denom: String,
        amount: String,
        reason: String,
    },
    #[error("amount of {denom} overflows")]
    Overflow { denom: String },
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("{0}")]
    Connection(#[from] tonic::transport::Error),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("{0}")]
    Request(#[from] tonic::Status),
    #[error("tendermint rpc error: {0}")]
    Rpc(#[from] tendermint_rpc::Error),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("continuation key {0} was returned twice")]
    RepeatedKey(String),
    #[error("chain reported {reported} items but {received} were received")]
    TotalMismatch { reported: u64, received: u64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chain {0} is configured more than once")]
    DuplicateChain(String),
    #[error("invalid gas price '{0}'")]
    GasPrice(String),
    #[error("invalid config for chain '{chain_id}': {reason}")]
    Invalid { chain_id: String, reason: String },
    #[error("default chain {0} not found in chains")]
    MissingDefaultChain(String),
    #[error("unsupported keyring backend '{0}'")]
    UnsupportedKeyringBackend(String),
}

#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("error creating or opening keystore: {0}")]
    CouldNotOpenOrCreateKeyStore(String),
    #[error("key name '{0}' already exists.")]
    Exists(String),
    #[error("key name '{0}' does not exist.")]
    DoesNotExist(String),
    #[error("invalid key name '{0}'")]
    InvalidKeyName(String),
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),
    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),
    #[error("unable to derive key: {0}")]
    KeyDerivation(String),
    #[error("unable to store key: {0}")]
    UnableToStoreKey(String),
    #[error("unable to delete key: {0}")]
    UnableToDeleteKey(String),
    #[error("unable to retrieve key: {0}")]
    UnableToRetrieveKey(String),
    #[error("error reading file: {0}")]
    FileIO(String),
}

#[derive(Debug, Error)]
pub enum TxError {
    #[error("parsing error: {0}")]
    FeeParsing(#[from] eyre::Report),
    #[error("invalid coins '{0}'")]
    InvalidCoins(String),
    #[error("chain rejected transaction: code({code}) msg({log})")]
    Rejected { code: u32, log: String },
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("error signing message: {0}")]
    Signing(String),
    #[error("error converting types: {0}")]
    TypeConversion(String),
    #[error("sign mode {0} is not supported")]
    UnsupportedSignMode(String),
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account {0} not found")]
    NotFound(String),
    #[error("empty account data: {0}")]
    Empty(String),
    #[error("error decoding account data: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("error decoding public key: {0}")]
    PublicKey(#[from] ErrorReport),
    #[error("unsupported account type {0}")]
    Unsupported(String),
}
