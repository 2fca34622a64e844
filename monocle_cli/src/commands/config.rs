mod init;

use abscissa_core::{Command, Runnable};
use clap::Parser;

use self::init::InitCmd;

/// `config` subcommand
#[derive(Command, Debug, Parser, Runnable)]
pub enum ConfigCmd {
    /// Write the default config file
    Init(InitCmd),
}
