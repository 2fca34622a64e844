#![warn(unused_qualifications)]

use std::{future::Future, sync::Arc};

use tracing::debug;

use crate::{
    address::{self, RawAddress},
    error::{AddressError, ChainClientError, NetworkError, PaginationError},
    keyring::Keyring,
};

use super::{
    config::ChainClientConfig,
    transport::{ChainTransport, GrpcTransport},
};

pub mod node;
pub mod query;
pub mod tx;

/// One configured chain: its config, the keyring its keys live in and the transport queries and
/// transactions go through. Read-only once built, so it can be shared freely between tasks.
pub struct ChainEndpoint {
    config: ChainClientConfig,
    keyring: Keyring,
    transport: Arc<dyn ChainTransport>,
}

impl ChainEndpoint {
    /// Validates the config, opens the keyring and sets up a gRPC transport. Connections are
    /// only made when the first call goes out.
    pub fn connect(config: ChainClientConfig) -> Result<Self, ChainClientError> {
        config.validate()?;

        let keyring = Keyring::new_file_store(config.key_directory.as_deref())?;
        let transport = GrpcTransport::new(&config.rpc_address, &config.grpc_address).map_err(
            |source| ChainClientError::Network {
                chain_id: config.chain_id.clone(),
                operation: "connect",
                source,
            },
        )?;

        Ok(ChainEndpoint::with_transport(
            config,
            keyring,
            Arc::new(transport),
        ))
    }

    pub fn with_transport(
        config: ChainClientConfig,
        keyring: Keyring,
        transport: Arc<dyn ChainTransport>,
    ) -> Self {
        ChainEndpoint {
            config,
            keyring,
            transport,
        }
    }

    pub fn config(&self) -> &ChainClientConfig {
        &self.config
    }

    pub fn chain_id(&self) -> &str {
        &self.config.chain_id
    }

    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    /// Resolves a key name or a bech32 address to a raw address on this chain. Key names take
    /// precedence. An address carrying another chain's prefix is an address error rather than an
    /// unresolved identity.
    pub fn resolve_key_or_address(&self, input: &str) -> Result<RawAddress, ChainClientError> {
        if self.keyring.key_exists(input)? {
            let output = self
                .keyring
                .get_public_key_and_address(input, &self.config.account_prefix)?;
            return Ok(output.address);
        }

        match address::decode(&self.config.account_prefix, input) {
            Ok(raw) => Ok(raw),
            Err(err @ AddressError::PrefixMismatch { .. }) => Err(err.into()),
            Err(_) => Err(ChainClientError::UnresolvedIdentity {
                chain_id: self.config.chain_id.clone(),
                input: input.to_string(),
            }),
        }
    }

    /// Bech32 form of a raw address under this chain's prefix
    pub fn encode_address(&self, raw: &RawAddress) -> Result<String, ChainClientError> {
        Ok(raw.to_bech32(&self.config.account_prefix)?)
    }

    /// Runs one transport call under the configured timeout, tagging failures with this chain
    /// and the operation name.
    pub(crate) async fn call<T, F>(
        &self,
        operation: &'static str,
        request: F,
    ) -> Result<T, ChainClientError>
    where
        F: Future<Output = Result<T, NetworkError>>,
    {
        let timeout = self.config.timeout();

        debug!(chain_id = %self.config.chain_id, operation, "calling chain");

        let result = match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(NetworkError::Timeout(timeout)),
        };

        result.map_err(|source| {
            debug!(chain_id = %self.config.chain_id, operation, error = %source, "call failed");
            ChainClientError::Network {
                chain_id: self.config.chain_id.clone(),
                operation,
                source,
            }
        })
    }

    pub(crate) fn pagination_error(
        &self,
        operation: &'static str,
        source: PaginationError,
    ) -> ChainClientError {
        ChainClientError::Pagination {
            chain_id: self.config.chain_id.clone(),
            operation,
            source,
        }
    }
}
