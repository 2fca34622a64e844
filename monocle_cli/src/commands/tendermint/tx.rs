use super::endpoint;
use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct TxCmd {
    /// Transaction hash, hex encoded
    pub hash: String,

    /// Chain to query. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,
}

impl Runnable for TxCmd {
    fn run(&self) {
        let registry = registry();
        let endpoint = endpoint(&registry, self.chain.as_deref());
        let format = endpoint.config().output_format;

        run_async(async {
            let tx = endpoint.tx(&self.hash).await.unwrap_or_else(|err| {
                status_err!("failed to query tx: {}", err);
                std::process::exit(1);
            });

            print_output(format, &tx, |t| {
                format!(
                    "{} at height {} (index {})\ncode: {}\ngas: {}/{}\nlog: {}",
                    t.hash,
                    t.height,
                    t.index,
                    t.result.code,
                    t.result.gas_used,
                    t.result.gas_wanted,
                    t.result.log
                )
            });
        });
    }
}
