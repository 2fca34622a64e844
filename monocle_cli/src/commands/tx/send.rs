use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;
use monocle::coin::parse_coins;

#[derive(Command, Debug, Parser)]
pub struct SendCmd {
    /// Key to send from
    pub from: String,

    /// Recipient key name or bech32 address
    pub to: String,

    /// Amount, e.g. 1000uatom or 10uatom,5uosmo
    pub amount: String,

    /// Chain to send on. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,

    #[clap(long, default_value = "")]
    pub memo: String,
}

impl Runnable for SendCmd {
    fn run(&self) {
        let amount = parse_coins(&self.amount).unwrap_or_else(|err| {
            status_err!("{}", err);
            std::process::exit(1);
        });
        let registry = registry();
        let endpoint = registry
            .get_or_default(self.chain.as_deref())
            .unwrap_or_else(|err| {
                status_err!("{}", err);
                std::process::exit(1);
            });
        let format = endpoint.config().output_format;

        run_async(async {
            let result = endpoint
                .bank_send(&self.from, &self.to, amount, &self.memo)
                .await
                .unwrap_or_else(|err| {
                    status_err!("failed to send coins: {}", err);
                    std::process::exit(1);
                });

            if !result.accepted() {
                status_err!(
                    "failed to send coins: code({}) msg({})",
                    result.code,
                    result.log
                );
                std::process::exit(1);
            }

            print_output(format, &result, |r| format!("{} at height {}", r.tx_hash, r.height));
        });
    }
}
