use super::endpoint;
use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct BlockResultsCmd {
    /// Block height. Defaults to the latest block
    pub height: Option<u64>,

    /// Chain to query. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,
}

impl Runnable for BlockResultsCmd {
    fn run(&self) {
        let registry = registry();
        let endpoint = endpoint(&registry, self.chain.as_deref());
        let format = endpoint.config().output_format;

        run_async(async {
            let results = endpoint
                .block_results(self.height)
                .await
                .unwrap_or_else(|err| {
                    status_err!("failed to query block results: {}", err);
                    std::process::exit(1);
                });

            print_output(format, &results, |r| {
                let mut text = format!("block {}: {} txs", r.height, r.txs.len());
                for (i, tx) in r.txs.iter().enumerate() {
                    text.push_str(&format!(
                        "\n  {}: code {} gas {}/{}",
                        i, tx.code, tx.gas_used, tx.gas_wanted
                    ));
                }
                text
            });
        });
    }
}
