use super::target;
use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct DelegatorValidatorsCmd {
    /// Key name or bech32 address. Defaults to the chain's configured key
    pub key_or_address: Option<String>,

    /// Chain to query. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,
}

impl Runnable for DelegatorValidatorsCmd {
    fn run(&self) {
        let registry = registry();
        let (endpoint, address) = target(
            &registry,
            self.chain.as_deref(),
            self.key_or_address.as_deref(),
        );
        let format = endpoint.config().output_format;

        run_async(async {
            let validators = endpoint
                .delegator_validators(&address)
                .await
                .unwrap_or_else(|err| {
                    status_err!("failed to query validators: {}", err);
                    std::process::exit(1);
                });

            print_output(format, &validators, |v| v.join("\n"));
        });
    }
}
