mod add;
mod delete;
mod import;
mod show;

use abscissa_core::{Command, Runnable};
use clap::Parser;
use monocle::keyring::PublicKeyOutput;
use serde::Serialize;

use self::{add::AddCmd, delete::DeleteCmd, import::ImportCmd, show::ShowCmd};

/// `keys` subcommand. Keys live in the keyring directory of the default chain.
#[derive(Command, Debug, Parser, Runnable)]
pub enum KeysCmd {
    /// Generate a new key and print its mnemonic
    Add(AddCmd),
    /// Delete a key
    Delete(DeleteCmd),
    /// Restore a key from a mnemonic
    Import(ImportCmd),
    /// Show the address of a key
    Show(ShowCmd),
}

#[derive(Serialize)]
struct KeyOutput {
    name: String,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    mnemonic: Option<String>,
}

impl KeyOutput {
    fn new(key: PublicKeyOutput, mnemonic: Option<String>) -> Self {
        KeyOutput {
            name: key.name,
            address: key.account.to_string(),
            mnemonic,
        }
    }

    fn text(&self) -> String {
        match &self.mnemonic {
            Some(m) => format!("{} {}\n\n{}", self.name, self.address, m),
            None => format!("{} {}", self.name, self.address),
        }
    }
}
