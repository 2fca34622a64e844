use super::account::AccountOutput;
use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct AccountsCmd {
    /// Chain to query. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,
}

impl Runnable for AccountsCmd {
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
            let accounts = endpoint.accounts().await.unwrap_or_else(|err| {
                status_err!("failed to query accounts: {}", err);
                std::process::exit(1);
            });

            let output: Vec<AccountOutput> = accounts
                .iter()
                .map(|account| {
                    let address = account
                        .base_account()
                        .map(|base| base.address.clone())
                        .unwrap_or_default();
                    AccountOutput::new(address, account)
                })
                .collect();

            print_output(format, &output, |accounts| {
                accounts
                    .iter()
                    .map(|a| format!("{} ({})", a.address, a.kind))
                    .collect::<Vec<_>>()
                    .join("\n")
            });
        });
    }
}
