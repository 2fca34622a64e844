use crate::{
    commands::{print_output, registry, run_async},
    prelude::*,
};
use abscissa_core::{Command, Runnable};
use clap::Parser;

#[derive(Command, Debug, Parser)]
pub struct AuthParamsCmd {
    /// Chain to query. Defaults to the default chain
    #[clap(long)]
    pub chain: Option<String>,
}

impl Runnable for AuthParamsCmd {
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
            let params = endpoint.auth_params().await.unwrap_or_else(|err| {
                status_err!("failed to query auth params: {}", err);
                std::process::exit(1);
            });

            print_output(format, &params, |p| {
                format!(
                    "max memo characters: {}\ntx sig limit: {}\ntx size cost per byte: {}\nsig verify cost ed25519: {}\nsig verify cost secp256k1: {}",
                    p.max_memo_characters,
                    p.tx_sig_limit,
                    p.tx_size_cost_per_byte,
                    p.sig_verify_cost_ed25519,
                    p.sig_verify_cost_secp256k1
                )
            });
        });
    }
}
