use super::KeyOutput;
use crate::{
    commands::{keyring, print_output},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct ShowCmd {
    /// Key name
    pub name: String,

    /// Show the address for this chain instead of the default one
    #[clap(long)]
    pub chain: Option<String>,
}

impl Runnable for ShowCmd {
    fn run(&self) {
        let (keyring, format) = keyring();
        let config = APP.config();
        let chain = match &self.chain {
            Some(id) => config.chain_config(id),
            None => config.default_chain_config(),
        }
        .unwrap_or_else(|err| {
            status_err!("{}", err);
            std::process::exit(1);
        });

        let key = keyring
            .get_public_key_and_address(&self.name, &chain.account_prefix)
            .unwrap_or_else(|err| {
                status_err!("can't read key {}: {}", self.name, err);
                std::process::exit(1);
            });

        print_output(format, &KeyOutput::new(key, None), KeyOutput::text);
    }
}
