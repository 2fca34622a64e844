use std::collections::{BTreeMap, HashSet};

use tracing::info;

use crate::error::{ChainClientError, ConfigError};

use super::{config::ChainClientConfig, endpoint::ChainEndpoint};

/// The configured chains, keyed by chain id. Built once at startup and handed to whatever needs
/// to reach a chain.
pub struct ChainRegistry {
    endpoints: BTreeMap<String, ChainEndpoint>,
    default_chain: String,
}

impl ChainRegistry {
    /// Validates every config and sets up one endpoint per chain
    pub fn new(
        configs: Vec<ChainClientConfig>,
        default_chain: &str,
    ) -> Result<Self, ChainClientError> {
        validate_configs(&configs, default_chain)?;

        let endpoints = configs
            .into_iter()
            .map(ChainEndpoint::connect)
            .collect::<Result<Vec<_>, _>>()?;

        ChainRegistry::from_endpoints(endpoints, default_chain)
    }

    /// Assembles a registry from endpoints that are already built, e.g. on a custom transport
    pub fn from_endpoints(
        endpoints: Vec<ChainEndpoint>,
        default_chain: &str,
    ) -> Result<Self, ChainClientError> {
        let mut map = BTreeMap::new();

        for endpoint in endpoints {
            let chain_id = endpoint.chain_id().to_string();
            if map.contains_key(&chain_id) {
                return Err(ConfigError::DuplicateChain(chain_id).into());
            }
            map.insert(chain_id, endpoint);
        }

        if !map.contains_key(default_chain) {
            return Err(ConfigError::MissingDefaultChain(default_chain.to_string()).into());
        }

        info!(chains = map.len(), default_chain, "chain registry ready");

        Ok(ChainRegistry {
            endpoints: map,
            default_chain: default_chain.to_string(),
        })
    }

    pub fn get(&self, chain_id: &str) -> Result<&ChainEndpoint, ChainClientError> {
        self.endpoints
            .get(chain_id)
            .ok_or_else(|| ChainClientError::UnknownChain(chain_id.to_string()))
    }

    /// The given chain, or the default chain when none is given
    pub fn get_or_default(
        &self,
        chain_id: Option<&str>,
    ) -> Result<&ChainEndpoint, ChainClientError> {
        self.get(chain_id.unwrap_or(&self.default_chain))
    }

    pub fn default_endpoint(&self) -> Result<&ChainEndpoint, ChainClientError> {
        self.get(&self.default_chain)
    }

    pub fn default_chain(&self) -> &str {
        &self.default_chain
    }

    /// Chain ids in lexicographic order
    pub fn chain_ids(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &ChainEndpoint> {
        self.endpoints.values()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

/// Checks a set of chain configs without touching the keyring or the network
pub fn validate_configs(
    configs: &[ChainClientConfig],
    default_chain: &str,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for config in configs {
        config.validate()?;
        if !seen.insert(config.chain_id.as_str()) {
            return Err(ConfigError::DuplicateChain(config.chain_id.clone()));
        }
    }

    if !seen.contains(default_chain) {
        return Err(ConfigError::MissingDefaultChain(default_chain.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::config::tests::test_config;

    fn temp_dir() -> String {
        std::env::temp_dir()
            .join(format!("monocle-registry-{}", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn rejects_duplicate_chains() {
        let configs = vec![
            test_config("cosmoshub-4", "cosmos"),
            test_config("cosmoshub-4", "cosmos"),
        ];

        assert!(matches!(
            validate_configs(&configs, "cosmoshub-4"),
            Err(ConfigError::DuplicateChain(id)) if id == "cosmoshub-4"
        ));
    }

    #[test]
    fn rejects_unknown_default_chain() {
        let configs = vec![test_config("cosmoshub-4", "cosmos")];

        assert!(matches!(
            ChainRegistry::new(configs, "osmosis-1"),
            Err(ChainClientError::Config(ConfigError::MissingDefaultChain(_)))
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = test_config("cosmoshub-4", "cosmos");
        config.timeout_secs = 0;

        assert!(matches!(
            validate_configs(&[config], "cosmoshub-4"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn builds_registry() {
        let key_dir = temp_dir();
        let configs = ["osmosis-1", "cosmoshub-4", "juno-1"]
            .iter()
            .map(|id| {
                let mut config = test_config(id, "cosmos");
                config.key_directory = Some(key_dir.clone());
                config
            })
            .collect();

        let registry = ChainRegistry::new(configs, "cosmoshub-4").unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.chain_ids().collect::<Vec<_>>(),
            vec!["cosmoshub-4", "juno-1", "osmosis-1"]
        );
        assert_eq!(registry.default_endpoint().unwrap().chain_id(), "cosmoshub-4");
        assert_eq!(registry.get_or_default(Some("juno-1")).unwrap().chain_id(), "juno-1");
        assert!(matches!(
            registry.get("akash"),
            Err(ChainClientError::UnknownChain(_))
        ));

        std::fs::remove_dir_all(key_dir).unwrap();
    }
}
