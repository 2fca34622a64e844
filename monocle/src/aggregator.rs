//! Balances of one identity across several chains. Every chain resolves the key or address on
//! its own, all chains are queried at once, and a single failing chain fails the whole call.
use std::collections::BTreeMap;

use cosmwasm_std::{Uint256, Uint512};
use futures::future::try_join_all;
use serde::Serialize;
use tracing::debug;

use crate::{
    chain::registry::ChainRegistry,
    coin::CoinSet,
    denom::normalize_denom,
    error::{AmountError, ChainClientError},
};

/// Resolved balances of one chain, under that chain's address
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChainBalance {
    pub chain_id: String,
    pub address: String,
    pub balances: CoinSet,
}

/// Balances summed over chains, keyed by base denom. Sums are 512 bit so adding up 256 bit
/// chain amounts cannot overflow.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CombinedBalances(BTreeMap<String, Uint512>);

impl CombinedBalances {
    pub fn new() -> Self {
        CombinedBalances::default()
    }

    /// Adds an amount under the normalized form of `denom`
    pub fn add(&mut self, denom: &str, amount: Uint256) -> Result<(), ChainClientError> {
        let entry = self
            .0
            .entry(normalize_denom(denom).to_string())
            .or_insert_with(Uint512::zero);
        *entry = entry
            .checked_add(Uint512::from(amount))
            .map_err(|_| AmountError::Overflow {
                denom: denom.to_string(),
            })?;

        Ok(())
    }

    pub fn get(&self, denom: &str) -> Option<Uint512> {
        self.0.get(denom).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Uint512)> {
        self.0.iter().map(|(d, a)| (d.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AggregatedBalances {
    PerChain(Vec<ChainBalance>),
    Combined(CombinedBalances),
}

pub struct CrossChainAggregator<'a> {
    registry: &'a ChainRegistry,
}

impl<'a> CrossChainAggregator<'a> {
    pub fn new(registry: &'a ChainRegistry) -> Self {
        CrossChainAggregator { registry }
    }

    /// Balances of `key_or_address` on the named chains, either per chain (sorted by chain id)
    /// or combined into one set.
    pub async fn balances<S: AsRef<str>>(
        &self,
        chain_names: &[S],
        key_or_address: &str,
        combine: bool,
    ) -> Result<AggregatedBalances, ChainClientError> {
        let per_chain = self.per_chain(chain_names, key_or_address).await?;

        if combine {
            Ok(AggregatedBalances::Combined(combine_balances(&per_chain)?))
        } else {
            Ok(AggregatedBalances::PerChain(per_chain))
        }
    }

    pub async fn per_chain<S: AsRef<str>>(
        &self,
        chain_names: &[S],
        key_or_address: &str,
    ) -> Result<Vec<ChainBalance>, ChainClientError> {
        let mut names: Vec<&str> = chain_names.iter().map(AsRef::as_ref).collect();
        names.sort_unstable();
        names.dedup();

        let mut targets = Vec::with_capacity(names.len());
        for name in names {
            let endpoint = self.registry.get(name)?;
            let raw = endpoint.resolve_key_or_address(key_or_address)?;
            targets.push((endpoint, endpoint.encode_address(&raw)?));
        }

        debug!(chains = targets.len(), "querying balances across chains");

        let queries = targets.into_iter().map(|(endpoint, address)| async move {
            let balances = endpoint.balances(&address, true).await?;

            Ok::<_, ChainClientError>(ChainBalance {
                chain_id: endpoint.chain_id().to_string(),
                address,
                balances,
            })
        });

        try_join_all(queries).await
    }
}

/// Sums per chain balances by base denom
pub fn combine_balances(balances: &[ChainBalance]) -> Result<CombinedBalances, ChainClientError> {
    let mut combined = CombinedBalances::new();

    for chain in balances {
        for (denom, amount) in chain.balances.iter() {
            combined.add(denom, *amount)?;
        }
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(chain_id: &str, coins: &[(&str, u128)]) -> ChainBalance {
        ChainBalance {
            chain_id: chain_id.to_string(),
            address: format!("{}1qqqq", chain_id),
            balances: coins
                .iter()
                .map(|(d, a)| (d.to_string(), Uint256::from(*a)))
                .collect(),
        }
    }

    #[test]
    fn sums_by_base_denom() {
        let combined = combine_balances(&[
            chain("cosmoshub-4", &[("transfer/channel-0/uatom", 50)]),
            chain("osmosis-1", &[("uatom", 30)]),
        ])
        .unwrap();

        assert_eq!(combined.len(), 1);
        assert_eq!(combined.get("uatom"), Some(Uint512::from(80u128)));
    }

    #[test]
    fn keeps_distinct_denoms_apart() {
        let combined = combine_balances(&[
            chain(
                "cosmoshub-4",
                &[("uatom", 1), ("transfer/channel-141/uosmo", 2)],
            ),
            chain("osmosis-1", &[("uosmo", 3), ("ibc/ABCD", 4)]),
        ])
        .unwrap();

        let denoms: Vec<&str> = combined.iter().map(|(d, _)| d).collect();
        assert_eq!(denoms, vec!["ibc/ABCD", "uatom", "uosmo"]);
        assert_eq!(combined.get("uosmo"), Some(Uint512::from(5u128)));
    }

    #[test]
    fn does_not_overflow_256_bits() {
        let mut combined = CombinedBalances::new();
        combined.add("uatom", Uint256::MAX).unwrap();
        combined.add("transfer/channel-0/uatom", Uint256::MAX).unwrap();

        let expected = Uint512::from(Uint256::MAX) + Uint512::from(Uint256::MAX);
        assert_eq!(combined.get("uatom"), Some(expected));
    }
}
