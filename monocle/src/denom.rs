//! IBC denomination traces. An asset transferred over IBC lives on the receiving chain under an
//! opaque `ibc/<hash>` denom; the trace maps that hash back to the transfer path it arrived by.
use std::collections::HashMap;

use cosmos_sdk_proto::ibc::applications::transfer::v1::DenomTrace as ProtoDenomTrace;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::{
    coin::{Coin, CoinSet},
    error::AmountError,
};

pub const IBC_DENOM_PREFIX: &str = "ibc/";
const TRANSFER_PATH_PREFIX: &str = "transfer/";

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DenomTrace {
    /// Chain of `port/channel` hops, e.g. `transfer/channel-0/transfer/channel-141`
    pub path: String,
    pub base_denom: String,
}

impl DenomTrace {
    /// The on-chain denom: `ibc/` followed by the upper case hex SHA256 of the full path.
    /// A trace without hops is native and keeps its base denom.
    pub fn ibc_denom(&self) -> String {
        if self.path.is_empty() {
            return self.base_denom.clone();
        }
        let hash = Sha256::digest(self.full_path().as_bytes());

        format!("{}{}", IBC_DENOM_PREFIX, hex::encode_upper(hash))
    }

    /// `path/base_denom`, or just the base denom for native assets
    pub fn full_path(&self) -> String {
        if self.path.is_empty() {
            self.base_denom.clone()
        } else {
            format!("{}/{}", self.path, self.base_denom)
        }
    }

    /// Splits a full path back into hops and base denom. Hops are consumed in
    /// `port/channel-N` pairs; whatever follows is the base denom, which may itself
    /// contain slashes (`gamm/pool/1`).
    pub fn parse(full_path: &str) -> DenomTrace {
        let segments: Vec<&str> = full_path.split('/').collect();
        let mut hops = 0;

        while segments.len() - hops > 2 && segments[hops + 1].starts_with("channel-") {
            hops += 2;
        }

        DenomTrace {
            path: segments[..hops].join("/"),
            base_denom: segments[hops..].join("/"),
        }
    }
}

impl From<ProtoDenomTrace> for DenomTrace {
    fn from(trace: ProtoDenomTrace) -> Self {
        DenomTrace {
            path: trace.path,
            base_denom: trace.base_denom,
        }
    }
}

/// Replaces IBC hash denoms with their full transfer path. Zero balances are dropped before
/// lookup, coins with no matching trace pass through unchanged. Should the trace set contain
/// the same hash twice, the first trace wins and the duplicate is logged.
pub fn resolve_balance(
    coins: &[Coin],
    traces: &[DenomTrace],
) -> Result<CoinSet, AmountError> {
    let index = index_traces(traces);
    let mut resolved = CoinSet::new();

    for coin in coins.iter().filter(|c| !c.is_zero()) {
        let denom = match index.get(coin.denom.as_str()) {
            Some(trace) => trace.full_path(),
            None => coin.denom.clone(),
        };
        resolved.add(Coin::new(denom, coin.amount))?;
    }

    Ok(resolved)
}

fn index_traces(traces: &[DenomTrace]) -> HashMap<String, &DenomTrace> {
    let mut index: HashMap<String, &DenomTrace> = HashMap::with_capacity(traces.len());

    for trace in traces {
        let hash = trace.ibc_denom();
        if let Some(first) = index.get(&hash) {
            warn!(
                denom = %hash,
                kept = %first.full_path(),
                ignored = %trace.full_path(),
                "duplicate denom trace"
            );
            continue;
        }
        index.insert(hash, trace);
    }

    index
}

/// Reduces an IBC transfer path to the base denom it carries so balances of the same
/// asset received over different channels can be summed. Other denoms are returned as is.
pub fn normalize_denom(denom: &str) -> &str {
    if denom.starts_with(TRANSFER_PATH_PREFIX) {
        denom.rsplit('/').next().unwrap_or(denom)
    } else {
        denom
    }
}
