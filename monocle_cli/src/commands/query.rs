mod account;
mod accounts;
mod auth_params;
mod balance;
mod delegator_validators;
mod height;

use abscissa_core::{status_err, Command, Runnable};
use clap::Parser;
use monocle::{ChainEndpoint, ChainRegistry};

use self::{
    account::AccountCmd, accounts::AccountsCmd, auth_params::AuthParamsCmd, balance::BalanceCmd,
    delegator_validators::DelegatorValidatorsCmd, height::HeightCmd,
};

/// `query` subcommand
#[derive(Command, Debug, Parser, Runnable)]
pub enum QueryCmd {
    /// Account number, sequence and kind of an address
    Account(AccountCmd),
    /// Every account on the chain
    Accounts(AccountsCmd),
    /// Parameters of the auth module
    AuthParams(AuthParamsCmd),
    /// Balances of a key or address
    Balance(BalanceCmd),
    /// Validators a key or address has delegated to
    DelegatorValidators(DelegatorValidatorsCmd),
    /// Latest block height
    Height(HeightCmd),
}

/// Picks the chain and turns a key name or address into its bech32 address there. Without an
/// input the chain's configured key is used.
fn target<'a>(
    registry: &'a ChainRegistry,
    chain: Option<&str>,
    key_or_address: Option<&str>,
) -> (&'a ChainEndpoint, String) {
    let endpoint = registry.get_or_default(chain).unwrap_or_else(|err| {
        status_err!("{}", err);
        std::process::exit(1);
    });
    let input = key_or_address.unwrap_or(endpoint.config().key.as_str());
    let address = endpoint
        .resolve_key_or_address(input)
        .and_then(|raw| endpoint.encode_address(&raw))
        .unwrap_or_else(|err| {
            status_err!("{}", err);
            std::process::exit(1);
        });

    (endpoint, address)
}
