mod list;
mod show;

use abscissa_core::{Command, Runnable};
use clap::Parser;

use self::{list::ListCmd, show::ShowCmd};

/// `chains` subcommand. Reads the loaded config only; nothing is connected.
#[derive(Command, Debug, Parser, Runnable)]
pub enum ChainsCmd {
    /// List configured chain ids
    List(ListCmd),
    /// Show the config of one chain
    Show(ShowCmd),
}
