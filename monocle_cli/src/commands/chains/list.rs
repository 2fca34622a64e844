use crate::{commands::print_output, prelude::*};
use abscissa_core::{Command, Runnable};
use clap::Parser;
use serde::Serialize;

#[derive(Command, Debug, Parser)]
pub struct ListCmd {}

#[derive(Serialize)]
struct ChainList<'a> {
    default_chain: &'a str,
    chains: Vec<&'a str>,
}

impl Runnable for ListCmd {
    /// List all chains from the local config
    fn run(&self) {
        let config = APP.config();
        let format = config
            .default_chain_config()
            .map(|c| c.output_format)
            .unwrap_or_default();
        let list = ChainList {
            default_chain: &config.default_chain,
            chains: config.chains.iter().map(|c| c.chain_id.as_str()).collect(),
        };

        print_output(format, &list, |list| {
            list.chains
                .iter()
                .map(|id| {
                    if *id == list.default_chain {
                        format!("{} (default)", id)
                    } else {
                        id.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        });
    }
}
