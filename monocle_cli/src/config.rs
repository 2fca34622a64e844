//! MonocleCli Config
//!
//! The config file lists every chain the CLI can talk to. Global `--key` and `--output` flags
//! are applied on top of it in `commands.rs` before anything is connected.
use crate::error::{Error, ErrorKind};
use abscissa_core::tracing::debug;
use monocle::chain::{
    config::{BroadcastMode, ChainClientConfig, OutputFormat, SignMode, DEFAULT_TIMEOUT_SECS},
    registry::validate_configs,
};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const CONFIG_DIR: &str = ".monocle";
const CONFIG_FILE: &str = "config.toml";

/// MonocleCli Configuration
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MonocleCliConfig {
    /// Chain used when a command is not given one
    pub default_chain: String,
    /// Configured chains
    pub chains: Vec<ChainClientConfig>,
}

/// Cosmos Hub and Osmosis over their public endpoints
impl Default for MonocleCliConfig {
    fn default() -> Self {
        MonocleCliConfig {
            default_chain: "cosmoshub-4".to_string(),
            chains: vec![
                default_chain_config(
                    "cosmoshub-4",
                    "https://rpc.cosmos.network:443",
                    "https://grpc.cosmos.network:443",
                    "cosmos",
                    "0.025uatom",
                ),
                default_chain_config(
                    "osmosis-1",
                    "https://rpc.osmosis.zone:443",
                    "https://grpc.osmosis.zone:443",
                    "osmo",
                    "0.025uosmo",
                ),
            ],
        }
    }
}

fn default_chain_config(
    chain_id: &str,
    rpc_address: &str,
    grpc_address: &str,
    account_prefix: &str,
    gas_prices: &str,
) -> ChainClientConfig {
    ChainClientConfig {
        chain_id: chain_id.to_string(),
        rpc_address: rpc_address.to_string(),
        grpc_address: grpc_address.to_string(),
        account_prefix: account_prefix.to_string(),
        key: "default".to_string(),
        keyring_backend: "file".to_string(),
        key_directory: None,
        gas_adjustment: 1.2,
        gas_prices: gas_prices.to_string(),
        timeout_secs: DEFAULT_TIMEOUT_SECS,
        output_format: OutputFormat::Json,
        broadcast_mode: BroadcastMode::Sync,
        sign_mode: SignMode::Direct,
    }
}

impl MonocleCliConfig {
    /// Applies the global overrides to every chain and checks the result
    pub fn with_overrides(
        mut self,
        key: Option<&str>,
        output: Option<OutputFormat>,
    ) -> Result<Self, Error> {
        for chain in self.chains.iter_mut() {
            if let Some(key) = key {
                chain.key = key.to_string();
            }
            if let Some(output) = output {
                chain.output_format = output;
            }
        }

        validate_configs(&self.chains, &self.default_chain)
            .map_err(|err| ErrorKind::Config.context(err))?;

        Ok(self)
    }

    /// Config of the default chain
    pub fn default_chain_config(&self) -> Result<&ChainClientConfig, Error> {
        self.chain_config(&self.default_chain)
    }

    /// Config of the named chain
    pub fn chain_config(&self, chain_id: &str) -> Result<&ChainClientConfig, Error> {
        self.chains
            .iter()
            .find(|c| c.chain_id == chain_id)
            .ok_or_else(|| {
                ErrorKind::Config
                    .context(format!("chain {} is not configured", chain_id))
                    .into()
            })
    }
}

/// `~/.monocle/config.toml`
pub fn default_config_path() -> Result<PathBuf, Error> {
    let mut path = dirs::home_dir()
        .ok_or_else(|| ErrorKind::Config.context("could not determine home directory"))?;
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);

    Ok(path)
}

/// Writes the default config to `path`, creating its directory. An existing file is only
/// replaced when `overwrite` is set.
pub fn init(path: &Path, overwrite: bool) -> Result<(), Error> {
    if path.exists() && !overwrite {
        return Err(ErrorKind::Config
            .context(format!("{} already exists", path.display()))
            .into());
    }
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            debug!("creating config directory {}", dir.display());
            fs::create_dir_all(dir)?;
        }
    }

    let content = toml::to_string(&MonocleCliConfig::default())?;
    fs::write(path, content)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let content = toml::to_string(&MonocleCliConfig::default()).unwrap();
        let config: MonocleCliConfig = toml::from_str(&content).unwrap();

        assert!(content.contains("default-chain = \"cosmoshub-4\""));
        assert!(content.contains("[[chains]]"));
        assert_eq!(config.chains.len(), 2);
        assert_eq!(config.default_chain_config().unwrap().account_prefix, "cosmos");
    }

    #[test]
    fn overrides_apply_to_every_chain() {
        let config = MonocleCliConfig::default()
            .with_overrides(Some("validator"), Some(OutputFormat::Text))
            .unwrap();

        for chain in &config.chains {
            assert_eq!(chain.key, "validator");
            assert_eq!(chain.output_format, OutputFormat::Text);
        }
    }

    #[test]
    fn rejects_unknown_default_chain() {
        let mut config = MonocleCliConfig::default();
        config.default_chain = "juno-1".to_string();

        assert!(config.with_overrides(None, None).is_err());
        assert!(MonocleCliConfig::default().chain_config("juno-1").is_err());
    }
}
