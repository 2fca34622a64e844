use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct HeightCmd {
    /// Chain to query. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,
}

impl Runnable for HeightCmd {
    fn run(&self) {
        let registry = registry();
        let endpoint = registry
            .get_or_default(self.chain.as_deref())
            .unwrap_or_else(|err| {
                status_err!("{}", err);
                std::process::exit(1);
            });
        let format = endpoint.config().output_format;

        run_async(async {
            let height = endpoint.latest_height().await.unwrap_or_else(|err| {
                status_err!("failed to query height: {}", err);
                std::process::exit(1);
            });

            print_output(format, &height, u64::to_string);
        });
    }
}
