use crate::{config, prelude::*};
use abscissa_core::{Command, Runnable};
use clap::Parser;
use std::path::PathBuf;

#[derive(Command, Debug, Parser)]
pub struct InitCmd {
    /// Where to write the config. Defaults to ~/.monocle/config.toml
    #[clap(long)]
    path: Option<String>,

    /// Replace an existing config file
    #[clap(long)]
    overwrite: bool,
}

impl Runnable for InitCmd {
    /// Write a config file with the default chains
    fn run(&self) {
        let path = match &self.path {
            Some(p) => PathBuf::from(p),
            None => config::default_config_path().unwrap_or_else(|err| {
                status_err!("{}", err);
                std::process::exit(1);
            }),
        };

        config::init(&path, self.overwrite).unwrap_or_else(|err| {
            status_err!("can't write config: {}", err);
            std::process::exit(1);
        });

        status_ok!("Created", "{}", path.display());
    }
}
