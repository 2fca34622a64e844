mod balances;

use abscissa_core::{Command, Runnable};
use clap::Parser;

use self::balances::BalancesCmd;

/// `crosschain` subcommand
#[derive(Command, Debug, Parser, Runnable)]
pub enum CrossChainCmd {
    /// Balances of one identity on several chains
    Balances(BalancesCmd),
}
