use super::endpoint;
use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct HealthCmd {
    /// Chain to check. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,
}

impl Runnable for HealthCmd {
    fn run(&self) {
        let registry = registry();
        let endpoint = endpoint(&registry, self.chain.as_deref());
        let format = endpoint.config().output_format;
        let chain_id = endpoint.chain_id().to_string();

        run_async(async {
            endpoint.health().await.unwrap_or_else(|err| {
                status_err!("node unhealthy: {}", err);
                std::process::exit(1);
            });

            print_output(format, &chain_id, |id| format!("{} is healthy", id));
        });
    }
}
