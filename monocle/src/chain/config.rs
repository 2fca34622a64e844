use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{coin::is_valid_denom, error::ConfigError};

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const FILE_KEYRING_BACKEND: &str = "file";

/// Everything needed to talk to and sign for one chain
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChainClientConfig {
    pub chain_id: String,
    #[serde(rename = "rpc-addr")]
    pub rpc_address: String,
    #[serde(rename = "grpc-addr")]
    pub grpc_address: String,
    pub account_prefix: String,
    pub key: String,
    #[serde(default = "default_keyring_backend")]
    pub keyring_backend: String,
    /// Keyring directory. Defaults to `~/.monocle/keys` when unset.
    #[serde(default)]
    pub key_directory: Option<String>,
    pub gas_adjustment: f64,
    pub gas_prices: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub broadcast_mode: BroadcastMode,
    #[serde(default)]
    pub sign_mode: SignMode,
}

fn default_keyring_backend() -> String {
    FILE_KEYRING_BACKEND.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ChainClientConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::Invalid {
            chain_id: self.chain_id.clone(),
            reason: reason.to_string(),
        };

        if self.chain_id.trim().is_empty() {
            return Err(invalid("chain id is empty"));
        }
        if self.account_prefix.trim().is_empty() {
            return Err(invalid("account prefix is empty"));
        }
        if !self.gas_adjustment.is_finite() || self.gas_adjustment <= 0.0 {
            return Err(invalid("gas adjustment must be greater than zero"));
        }
        if self.timeout_secs == 0 {
            return Err(invalid("timeout must be at least one second"));
        }
        if self.keyring_backend != FILE_KEYRING_BACKEND {
            return Err(ConfigError::UnsupportedKeyringBackend(
                self.keyring_backend.clone(),
            ));
        }
        self.gas_price()?;

        Ok(())
    }

    pub fn gas_price(&self) -> Result<GasPrice, ConfigError> {
        self.gas_prices.parse()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// A decimal price per unit of gas in a single denom, e.g. `0.025uatom`
#[derive(Clone, Debug, PartialEq)]
pub struct GasPrice {
    pub amount: f64,
    pub denom: String,
}

impl GasPrice {
    /// Fee for the given gas limit, rounded up to the next whole unit
    pub fn fee_for(&self, gas_limit: u64) -> u64 {
        (gas_limit as f64 * self.amount).ceil() as u64
    }
}

impl FromStr for GasPrice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| ConfigError::GasPrice(s.to_string()))?;
        let (amount, denom) = s.split_at(split);
        let amount: f64 = amount
            .parse()
            .map_err(|_| ConfigError::GasPrice(s.to_string()))?;

        if !amount.is_finite() || amount < 0.0 || !is_valid_denom(denom) {
            return Err(ConfigError::GasPrice(s.to_string()));
        }

        Ok(GasPrice {
            amount,
            denom: denom.to_string(),
        })
    }
}

/// How long a broadcast waits: mempool acceptance, block inclusion, or not at all
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    Sync,
    Async,
    Block,
}

impl Default for BroadcastMode {
    fn default() -> Self {
        BroadcastMode::Sync
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignMode {
    Direct,
    AminoJson,
}

impl Default for SignMode {
    fn default() -> Self {
        SignMode::Direct
    }
}

impl fmt::Display for SignMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignMode::Direct => write!(f, "direct"),
            SignMode::AminoJson => write!(f, "amino-json"),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Text,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Json
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_config(chain_id: &str, prefix: &str) -> ChainClientConfig {
        ChainClientConfig {
            chain_id: chain_id.to_string(),
            rpc_address: "http://localhost:26657".to_string(),
            grpc_address: "http://localhost:9090".to_string(),
            account_prefix: prefix.to_string(),
            key: "default".to_string(),
            keyring_backend: FILE_KEYRING_BACKEND.to_string(),
            key_directory: None,
            gas_adjustment: 1.2,
            gas_prices: "0.01uatom".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            output_format: OutputFormat::Json,
            broadcast_mode: BroadcastMode::Sync,
            sign_mode: SignMode::Direct,
        }
    }

    #[test]
    fn parses_gas_prices() {
        assert_eq!(
            "0.025uatom".parse::<GasPrice>().unwrap(),
            GasPrice {
                amount: 0.025,
                denom: "uatom".to_string()
            }
        );
        assert_eq!("1uosmo".parse::<GasPrice>().unwrap().amount, 1.0);
        assert!("uatom".parse::<GasPrice>().is_err());
        assert!("0.01".parse::<GasPrice>().is_err());
        assert!("0.0.1uatom".parse::<GasPrice>().is_err());
    }

    #[test]
    fn rejects_malformed_gas_denoms() {
        assert!(matches!(
            "0.025u".parse::<GasPrice>(),
            Err(ConfigError::GasPrice(_))
        ));
        assert!("0.025u atom".parse::<GasPrice>().is_err());
        assert!("0.025u$atom".parse::<GasPrice>().is_err());
        assert!("0.025ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2"
            .parse::<GasPrice>()
            .is_ok());
    }

    #[test]
    fn fee_is_rounded_up() {
        let price = "0.01uatom".parse::<GasPrice>().unwrap();

        assert_eq!(price.fee_for(100_000), 1_000);
        assert_eq!(price.fee_for(100_050), 1_001);
        assert_eq!(price.fee_for(0), 0);
    }

    #[test]
    fn validates_config() {
        assert!(test_config("cosmoshub-4", "cosmos").validate().is_ok());

        let mut config = test_config("cosmoshub-4", "");
        assert!(config.validate().is_err());

        config = test_config("cosmoshub-4", "cosmos");
        config.gas_adjustment = 0.0;
        assert!(config.validate().is_err());

        config = test_config("cosmoshub-4", "cosmos");
        config.gas_prices = "free".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::GasPrice(_))));

        config = test_config("cosmoshub-4", "cosmos");
        config.keyring_backend = "os".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsupportedKeyringBackend(_))
        ));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ChainClientConfig = serde_json::from_str(
            r#"{
                "chain-id": "osmosis-1",
                "rpc-addr": "https://rpc.osmosis.zone:443",
                "grpc-addr": "https://grpc.osmosis.zone:443",
                "account-prefix": "osmo",
                "key": "default",
                "gas-adjustment": 1.2,
                "gas-prices": "0.01uosmo",
                "broadcast-mode": "block"
            }"#,
        )
        .unwrap();

        assert_eq!(config.broadcast_mode, BroadcastMode::Block);
        assert_eq!(config.sign_mode, SignMode::Direct);
        assert_eq!(config.timeout(), Duration::from_secs(20));
        assert_eq!(config.keyring_backend, "file");
    }
}
