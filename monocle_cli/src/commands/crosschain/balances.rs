use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;
use monocle::aggregator::{AggregatedBalances, CrossChainAggregator};

#[derive(Command, Debug, Parser)]
pub struct BalancesCmd {
    /// Key name or bech32 address. Defaults to the default chain's configured key
    pub key_or_address: Option<String>,

    /// Sum the balances of all chains by base denom
    #[clap(long)]
    pub combined: bool,

    /// Comma separated chain ids. Defaults to every configured chain
    #[clap(long, use_value_delimiter = true)]
    pub chains: Vec<String>,
}

impl Runnable for BalancesCmd {
    fn run(&self) {
        let registry = registry();
        let default = registry.default_endpoint().unwrap_or_else(|err| {
            status_err!("{}", err);
            std::process::exit(1);
        });
        let format = default.config().output_format;
        let input = self
            .key_or_address
            .clone()
            .unwrap_or_else(|| default.config().key.clone());
        let chains: Vec<String> = if self.chains.is_empty() {
            registry.chain_ids().map(String::from).collect()
        } else {
            self.chains.clone()
        };

        run_async(async {
            let balances = CrossChainAggregator::new(&registry)
                .balances(&chains, &input, self.combined)
                .await
                .unwrap_or_else(|err| {
                    status_err!("failed to query balances: {}", err);
                    std::process::exit(1);
                });

            print_output(format, &balances, |b| match b {
                AggregatedBalances::PerChain(chains) => chains
                    .iter()
                    .map(|chain| {
                        let coins: Vec<String> = chain
                            .balances
                            .to_coins()
                            .iter()
                            .map(ToString::to_string)
                            .collect();
                        format!("{} {}: {}", chain.chain_id, chain.address, coins.join(","))
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
                AggregatedBalances::Combined(combined) => combined
                    .iter()
                    .map(|(denom, amount)| format!("{}{}", amount, denom))
                    .collect::<Vec<_>>()
                    .join("\n"),
            });
        });
    }
}
