use crate::{commands::keyring, prelude::*};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct DeleteCmd {
    /// Key name
    pub name: String,
}

impl Runnable for DeleteCmd {
    fn run(&self) {
        let (keyring, _) = keyring();

        keyring.delete_key(&self.name).unwrap_or_else(|err| {
            status_err!("can't delete key {}: {}", self.name, err);
            std::process::exit(1);
        });

        status_ok!("Deleted", "{}", self.name);
    }
}
