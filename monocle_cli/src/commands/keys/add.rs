use super::KeyOutput;
use crate::{
    commands::{keyring, print_output},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct AddCmd {
    /// Key name
    pub name: String,

    /// Replace a key stored under the same name
    #[clap(long)]
    pub overwrite: bool,
}

impl Runnable for AddCmd {
    fn run(&self) {
        let (keyring, format) = keyring();
        let prefix = APP.config().default_chain_config().map(|c| c.account_prefix.clone());
        let prefix = prefix.unwrap_or_else(|err| {
            status_err!("{}", err);
            std::process::exit(1);
        });

        let mnemonic = keyring
            .create_key(&self.name, "", None, self.overwrite)
            .unwrap_or_else(|err| {
                status_err!("can't create key {}: {}", self.name, err);
                std::process::exit(1);
            });
        let key = keyring
            .get_public_key_and_address(&self.name, &prefix)
            .unwrap_or_else(|err| {
                status_err!("can't read key {}: {}", self.name, err);
                std::process::exit(1);
            });

        let output = KeyOutput::new(key, Some(mnemonic.phrase().to_string()));
        print_output(format, &output, KeyOutput::text);
    }
}
