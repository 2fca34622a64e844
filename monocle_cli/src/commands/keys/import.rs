use crate::{commands::keyring, prelude::*};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct ImportCmd {
    /// Key name
    pub name: String,

    /// Space separated BIP39 mnemonic
    pub mnemonic: String,

    /// Derivation path, m/44'/118'/0'/0/0 by default
    #[clap(long)]
    pub hd_path: Option<String>,

    /// Replace a key stored under the same name
    #[clap(long)]
    pub overwrite: bool,
}

impl Runnable for ImportCmd {
    fn run(&self) {
        let (keyring, _) = keyring();

        keyring
            .import_key(
                &self.name,
                &self.mnemonic,
                "",
                self.hd_path.as_deref(),
                self.overwrite,
            )
            .unwrap_or_else(|err| {
                status_err!("can't import key {}: {}", self.name, err);
                std::process::exit(1);
            });

        status_ok!("Imported", "{}", self.name);
    }
}
