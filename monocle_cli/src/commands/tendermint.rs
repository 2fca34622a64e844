mod block;
mod block_results;
mod health;
mod status;
mod tx;

use abscissa_core::{status_err, Command, Runnable};
use clap::Parser;
use monocle::{ChainEndpoint, ChainRegistry};

use self::{
    block::BlockCmd, block_results::BlockResultsCmd, health::HealthCmd, status::StatusCmd,
    tx::TxCmd,
};

/// `tendermint` subcommand
#[derive(Command, Debug, Parser, Runnable)]
pub enum TendermintCmd {
    /// Node info and sync state
    Status(StatusCmd),
    /// Block at a height, or the latest block
    Block(BlockCmd),
    /// Execution results of the transactions in a block
    BlockResults(BlockResultsCmd),
    /// Committed transaction by hash
    Tx(TxCmd),
    /// Whether the node is healthy
    Health(HealthCmd),
}

fn endpoint<'a>(registry: &'a ChainRegistry, chain: Option<&str>) -> &'a ChainEndpoint {
    registry.get_or_default(chain).unwrap_or_else(|err| {
        status_err!("{}", err);
        std::process::exit(1);
    })
}
