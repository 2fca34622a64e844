//! Coin types convertable from the Cosmos SDK proto coin types. Amounts are 256 bit like the
//! SDK's `Int`, so nothing a chain reports gets truncated.
use std::{collections::BTreeMap, fmt, str::FromStr};

use cosmos_sdk_proto::cosmos::base::v1beta1::Coin as ProtoCoin;
use cosmwasm_std::Uint256;
use serde::{Deserialize, Serialize};

use crate::error::{AmountError, TxError};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Uint256,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<Uint256>) -> Self {
        Coin {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Parses `<amount><denom>`, e.g. `100uatom` or `5ibc/27394FB0...`
impl FromStr for Coin {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TxError::InvalidCoins(s.to_string()))?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() || !is_valid_denom(denom) {
            return Err(TxError::InvalidCoins(s.to_string()));
        }

        Ok(Coin {
            denom: denom.to_string(),
            amount: Uint256::from_str(amount).map_err(|e| TxError::InvalidCoins(e.to_string()))?,
        })
    }
}

/// Cosmos SDK denom rule: a letter, then letters, digits or `/:._-`
pub(crate) fn is_valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && denom.len() >= 2
        && denom.len() <= 128
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'))
}

/// Parses a comma separated coin list such as `100uatom,20uosmo`
pub fn parse_coins(s: &str) -> Result<Vec<Coin>, TxError> {
    s.split(',')
        .filter(|c| !c.trim().is_empty())
        .map(Coin::from_str)
        .collect()
}

impl From<Coin> for ProtoCoin {
    fn from(coin: Coin) -> Self {
        ProtoCoin {
            denom: coin.denom,
            amount: coin.amount.to_string(),
        }
    }
}

impl TryFrom<ProtoCoin> for Coin {
    type Error = AmountError;

    fn try_from(coin: ProtoCoin) -> Result<Coin, Self::Error> {
        Coin::try_from(&coin)
    }
}

impl TryFrom<&ProtoCoin> for Coin {
    type Error = AmountError;

    fn try_from(coin: &ProtoCoin) -> Result<Coin, Self::Error> {
        let amount = Uint256::from_str(&coin.amount).map_err(|e| AmountError::Invalid {
            denom: coin.denom.clone(),
            amount: coin.amount.clone(),
            reason: e.to_string(),
        })?;

        Ok(Coin {
            denom: coin.denom.clone(),
            amount,
        })
    }
}

/// A set of balances keyed by denomination, ordered for display
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoinSet(BTreeMap<String, Uint256>);

impl CoinSet {
    pub fn new() -> Self {
        CoinSet::default()
    }

    /// Adds a coin. Amounts for a denom already present are summed; an overflow of the
    /// 256 bit amount is reported rather than wrapped.
    pub fn add(&mut self, coin: Coin) -> Result<(), AmountError> {
        let sum = self
            .get(&coin.denom)
            .unwrap_or_else(Uint256::zero)
            .checked_add(coin.amount)
            .map_err(|_| AmountError::Overflow {
                denom: coin.denom.clone(),
            })?;
        self.0.insert(coin.denom, sum);

        Ok(())
    }

    pub fn get(&self, denom: &str) -> Option<Uint256> {
        self.0.get(denom).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn denoms(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Uint256)> {
        self.0.iter().map(|(d, a)| (d.as_str(), a))
    }

    pub fn to_coins(&self) -> Vec<Coin> {
        self.0
            .iter()
            .map(|(denom, amount)| Coin::new(denom.clone(), *amount))
            .collect()
    }
}

impl FromIterator<(String, Uint256)> for CoinSet {
    fn from_iter<I: IntoIterator<Item = (String, Uint256)>>(iter: I) -> Self {
        CoinSet(iter.into_iter().collect())
    }
}
