use super::endpoint;
use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct BlockCmd {
    /// Block height. Defaults to the latest block
    pub height: Option<u64>,

    /// Chain to query. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,
}

impl Runnable for BlockCmd {
    fn run(&self) {
        let registry = registry();
        let endpoint = endpoint(&registry, self.chain.as_deref());
        let format = endpoint.config().output_format;

        run_async(async {
            let block = endpoint.block(self.height).await.unwrap_or_else(|err| {
                status_err!("failed to query block: {}", err);
                std::process::exit(1);
            });

            print_output(format, &block, |b| {
                let mut text = format!(
                    "block {} on {}\nhash: {}\ntime: {}\nproposer: {}\ntxs: {}",
                    b.height,
                    b.chain_id,
                    b.hash,
                    b.time,
                    b.proposer,
                    b.tx_hashes.len()
                );
                for hash in &b.tx_hashes {
                    text.push_str(&format!("\n  {}", hash));
                }
                text
            });
        });
    }
}
