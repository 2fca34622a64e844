use crate::{commands::print_output, prelude::*};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct ShowCmd {
    /// Chain id
    pub chain_id: String,
}

impl Runnable for ShowCmd {
    /// Print the config of a chain
    fn run(&self) {
        let config = APP.config();
        let chain = config.chain_config(&self.chain_id).unwrap_or_else(|err| {
            status_err!("{}", err);
            std::process::exit(1);
        });

        print_output(chain.output_format, chain, |chain| {
            toml::to_string(chain).unwrap_or_else(|err| {
                status_err!("can't serialize chain config: {}", err);
                std::process::exit(1);
            })
        });
    }
}
