//! MonocleCli Subcommands

mod chains;
mod config;
mod crosschain;
mod keys;
mod query;
mod tendermint;
mod tx;

use self::{
    chains::ChainsCmd, config::ConfigCmd, crosschain::CrossChainCmd, keys::KeysCmd,
    query::QueryCmd, tendermint::TendermintCmd, tx::TxCmd,
};
use crate::{config::MonocleCliConfig, prelude::*};
use abscissa_core::{Command, Configurable, FrameworkError, FrameworkErrorKind, Runnable};
use clap::Parser;
use monocle::{chain::config::OutputFormat, keyring::Keyring, ChainRegistry};
use serde::Serialize;
use std::path::PathBuf;

/// MonocleCli Subcommands
/// Subcommands need to be listed in an enum.
#[derive(Command, Debug, Parser, Runnable)]
pub enum MonocleCliCmd {
    /// Manage the config file
    #[clap(subcommand)]
    Config(ConfigCmd),
    /// Inspect configured chains
    #[clap(subcommand)]
    Chains(ChainsCmd),
    /// Manage keys
    #[clap(subcommand)]
    Keys(KeysCmd),
    /// Query a single chain
    #[clap(subcommand)]
    Query(QueryCmd),
    /// Query across all configured chains
    #[clap(subcommand)]
    Crosschain(CrossChainCmd),
    /// Sign and broadcast transactions
    #[clap(subcommand)]
    Tx(TxCmd),
    /// Query a chain's Tendermint node
    #[clap(subcommand)]
    Tendermint(TendermintCmd),
}

/// Entry point for the application. It needs to be a struct to allow using subcommands!
#[derive(Command, Debug, Parser)]
#[clap(author, about, version)]
pub struct EntryPoint {
    #[clap(subcommand)]
    cmd: MonocleCliCmd,

    /// Enable verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Use the specified config file
    #[clap(short, long)]
    pub config: Option<String>,

    /// Key to use on every chain instead of the configured one
    #[clap(long)]
    pub key: Option<String>,

    /// Output format, json or text
    #[clap(short, long)]
    pub output: Option<OutputFormat>,
}

impl Runnable for EntryPoint {
    fn run(&self) {
        self.cmd.run()
    }
}

/// This trait allows you to define how application configuration is loaded.
impl Configurable<MonocleCliConfig> for EntryPoint {
    /// Location of the configuration file. Without `-c` and without a file at the default
    /// location, the built-in default config is used.
    fn config_path(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(PathBuf::from(path)),
            None => crate::config::default_config_path()
                .ok()
                .filter(|path| path.exists()),
        }
    }

    /// Apply `--key` and `--output` to every chain, then validate the chain set.
    fn process_config(
        &self,
        config: MonocleCliConfig,
    ) -> Result<MonocleCliConfig, FrameworkError> {
        config
            .with_overrides(self.key.as_deref(), self.output)
            .map_err(|err| FrameworkErrorKind::ConfigError.context(err).into())
    }
}

/// Builds the registry from the loaded config. Exits on failure.
pub(crate) fn registry() -> ChainRegistry {
    let config = APP.config();

    ChainRegistry::new(config.chains.clone(), &config.default_chain).unwrap_or_else(|err| {
        status_err!("can't set up chains: {}", err);
        std::process::exit(1);
    })
}

/// Opens the keyring of the default chain. Exits on failure.
pub(crate) fn keyring() -> (Keyring, OutputFormat) {
    let config = APP.config();
    let chain = config.default_chain_config().unwrap_or_else(|err| {
        status_err!("{}", err);
        std::process::exit(1);
    });
    let keyring = Keyring::new_file_store(chain.key_directory.as_deref()).unwrap_or_else(|err| {
        status_err!("can't open keyring: {}", err);
        std::process::exit(1);
    });

    (keyring, chain.output_format)
}

/// Prints `value` as pretty JSON, or through `text` for text output. Exits if serialization
/// fails.
pub(crate) fn print_output<T, F>(format: OutputFormat, value: &T, text: F)
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).unwrap_or_else(|err| {
                status_err!("can't serialize output: {}", err);
                std::process::exit(1);
            });
            println!("{}", json);
        }
        OutputFormat::Text => println!("{}", text(value)),
    }
}

/// Runs a command future on the tokio runtime. Exits on executor errors.
pub(crate) fn run_async<F>(future: F)
where
    F: std::future::Future<Output = ()>,
{
    abscissa_tokio::run(&APP, future).unwrap_or_else(|e| {
        status_err!("executor exited with error: {}", e);
        std::process::exit(1);
    });
}
