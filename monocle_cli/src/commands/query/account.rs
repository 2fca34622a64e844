use super::target;
use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;
use monocle::account::Account;
use serde::Serialize;

#[derive(Command, Debug, Parser)]
pub struct AccountCmd {
    /// Key name or bech32 address. Defaults to the chain's configured key
    pub key_or_address: Option<String>,

    /// Chain to query. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,
}

#[derive(Serialize)]
pub(super) struct AccountOutput {
    pub(super) kind: String,
    pub(super) address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sequence: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    module_name: Option<String>,
}

impl AccountOutput {
    pub(super) fn new(address: String, account: &Account) -> Self {
        let base = account.base_account();

        AccountOutput {
            kind: account.kind().to_string(),
            address,
            account_number: base.map(|b| b.account_number),
            sequence: base.map(|b| b.sequence),
            module_name: match account {
                Account::Module { name, .. } => Some(name.clone()),
                _ => None,
            },
        }
    }
}

impl Runnable for AccountCmd {
    fn run(&self) {
        let registry = registry();
        let (endpoint, address) = target(
            &registry,
            self.chain.as_deref(),
            self.key_or_address.as_deref(),
        );
        let format = endpoint.config().output_format;

        run_async(async {
            let account = endpoint.account(&address).await.unwrap_or_else(|err| {
                status_err!("failed to query account: {}", err);
                std::process::exit(1);
            });

            let output = AccountOutput::new(address.clone(), &account);
            print_output(format, &output, |o| match (o.account_number, o.sequence) {
                (Some(number), Some(sequence)) => format!(
                    "{} ({})\naccount number: {}\nsequence: {}",
                    o.address, o.kind, number, sequence
                ),
                _ => format!("{} ({})", o.address, o.kind),
            });
        });
    }
}
