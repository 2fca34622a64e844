mod send;

use abscissa_core::{Command, Runnable};
use clap::Parser;

use self::send::SendCmd;

/// `tx` subcommand
#[derive(Command, Debug, Parser, Runnable)]
pub enum TxCmd {
    /// Send coins to a key or address
    Send(SendCmd),
}
