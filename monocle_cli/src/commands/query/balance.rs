use super::target;
use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;
use monocle::coin::Coin;
use serde::Serialize;

#[derive(Command, Debug, Parser)]
pub struct BalanceCmd {
    /// Key name or bech32 address. Defaults to the chain's configured key
    pub key_or_address: Option<String>,

    /// Chain to query. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,

    /// Show IBC denoms as reported instead of resolving them to their transfer path
    #[clap(long)]
    pub raw: bool,
}

#[derive(Serialize)]
struct BalanceOutput<'a> {
    chain_id: &'a str,
    address: &'a str,
    balances: Vec<Coin>,
}

impl Runnable for BalanceCmd {
    fn run(&self) {
        let registry = registry();
        let (endpoint, address) = target(
            &registry,
            self.chain.as_deref(),
            self.key_or_address.as_deref(),
        );
        let format = endpoint.config().output_format;

        run_async(async {
            let balances = endpoint
                .balances(&address, !self.raw)
                .await
                .unwrap_or_else(|err| {
                    status_err!("failed to query balances: {}", err);
                    std::process::exit(1);
                });

            let output = BalanceOutput {
                chain_id: endpoint.chain_id(),
                address: &address,
                balances: balances.to_coins(),
            };

            print_output(format, &output, |o| {
                o.balances
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            });
        });
    }
}
