use super::endpoint;
use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct StatusCmd {
    /// Chain to query. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,
}

impl Runnable for StatusCmd {
    fn run(&self) {
        let registry = registry();
        let endpoint = endpoint(&registry, self.chain.as_deref());
        let format = endpoint.config().output_format;

        run_async(async {
            let status = endpoint.node_status().await.unwrap_or_else(|err| {
                status_err!("failed to query node status: {}", err);
                std::process::exit(1);
            });

            print_output(format, &status, |s| {
                format!(
                    "{} on {} ({})\nlatest block: {} {} at {}\ncatching up: {}",
                    s.moniker,
                    s.network,
                    s.version,
                    s.latest_block_height,
                    s.latest_block_hash,
                    s.latest_block_time,
                    s.catching_up
                )
            });
        });
    }
}
