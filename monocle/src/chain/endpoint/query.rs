//! Queries against a single chain. Listings are paginated and always read to the last page.
use std::{collections::HashSet, future::Future};

use tracing::debug;

use crate::{
    account::{Account, BaseAccount},
    chain::transport::{default_page_request, Page, PageRequest},
    coin::{Coin, CoinSet},
    denom::{self, DenomTrace},
    error::{AccountError, ChainClientError, NetworkError, PaginationError},
    node::AuthParams,
};

use super::ChainEndpoint;

impl ChainEndpoint {
    /// Gets the account at an address, unpacked into one of the known kinds
    pub async fn account(&self, address: &str) -> Result<Account, ChainClientError> {
        let any = self
            .call("account", self.transport.account(address))
            .await?
            .ok_or_else(|| AccountError::NotFound(address.to_string()))?;

        Ok(Account::try_from(any)?)
    }

    /// Gets the base account (number and sequence) behind an address
    pub async fn base_account(&self, address: &str) -> Result<BaseAccount, ChainClientError> {
        let account = self.account(address).await?;

        match account.base_account() {
            Some(base) => Ok(base.clone()),
            None => Err(AccountError::Unsupported(account.kind().to_string()).into()),
        }
    }

    /// Every account on the chain, unpacked. Kinds this client does not know come back as
    /// [`Account::Unknown`].
    pub async fn accounts(&self) -> Result<Vec<Account>, ChainClientError> {
        let packed = self
            .exhaust("accounts", default_page_request(), |page| {
                self.transport.accounts(page)
            })
            .await?;

        let mut accounts = Vec::with_capacity(packed.len());
        for any in packed {
            accounts.push(Account::try_from(any)?);
        }

        Ok(accounts)
    }

    pub async fn auth_params(&self) -> Result<AuthParams, ChainClientError> {
        self.call("auth_params", self.transport.auth_params()).await
    }

    pub async fn latest_height(&self) -> Result<u64, ChainClientError> {
        self.call("latest_height", self.transport.latest_height())
            .await
    }

    /// Validators the address has delegated to
    pub async fn delegator_validators(
        &self,
        address: &str,
    ) -> Result<Vec<String>, ChainClientError> {
        self.call(
            "delegator_validators",
            self.transport.delegator_validators(address),
        )
        .await
    }

    /// Every coin the address holds, as the chain reports them
    pub async fn all_balances(&self, address: &str) -> Result<Vec<Coin>, ChainClientError> {
        self.exhaust("all_balances", default_page_request(), |page| {
            self.transport.all_balances(address, page)
        })
        .await
    }

    /// Balances of an address. With `resolve_denoms`, IBC hash denoms are replaced by their full
    /// transfer path using traces read at a single height, and zero balances are dropped.
    pub async fn balances(
        &self,
        address: &str,
        resolve_denoms: bool,
    ) -> Result<CoinSet, ChainClientError> {
        let coins = self.all_balances(address).await?;

        if !resolve_denoms {
            let mut balances = CoinSet::new();
            for coin in coins {
                balances.add(coin)?;
            }
            return Ok(balances);
        }

        let height = self.latest_height().await?;
        let traces = self.denom_traces(default_page_request(), height).await?;

        debug!(
            chain_id = %self.config.chain_id,
            height,
            traces = traces.len(),
            "resolving balance denoms"
        );

        Ok(denom::resolve_balance(&coins, &traces)?)
    }

    /// All denom traces from `page` onwards, every page read at `height`
    pub async fn denom_traces(
        &self,
        page: PageRequest,
        height: u64,
    ) -> Result<Vec<DenomTrace>, ChainClientError> {
        self.exhaust("denom_traces", page, |page| {
            self.transport.denom_traces(page, height)
        })
        .await
    }

    /// Follows continuation keys until the last page. A key seen twice or a page count that
    /// disagrees with the reported total is an error, never a truncated result.
    async fn exhaust<T, F, Fut>(
        &self,
        operation: &'static str,
        first: PageRequest,
        mut fetch: F,
    ) -> Result<Vec<T>, ChainClientError>
    where
        F: FnMut(PageRequest) -> Fut,
        Fut: Future<Output = Result<Page<T>, NetworkError>>,
    {
        // totals count the whole listing, so they can only be checked when starting at the top
        let from_start = first.key.is_empty() && first.offset == 0;
        let mut request = first;
        let mut items = Vec::new();
        let mut seen_keys = HashSet::new();
        let mut reported_total = None;

        loop {
            let page = self.call(operation, fetch(request.clone())).await?;

            if reported_total.is_none() {
                reported_total = page.total;
            }
            items.extend(page.items);

            if page.next_key.is_empty() {
                break;
            }
            if !seen_keys.insert(page.next_key.clone()) {
                return Err(self.pagination_error(
                    operation,
                    PaginationError::RepeatedKey(hex::encode_upper(&page.next_key)),
                ));
            }

            request = PageRequest {
                key: page.next_key,
                offset: 0,
                count_total: false,
                ..request
            };
        }

        if let Some(total) = reported_total {
            let received = items.len() as u64;
            if from_start && total != received {
                return Err(self.pagination_error(
                    operation,
                    PaginationError::TotalMismatch {
                        reported: total,
                        received,
                    },
                ));
            }
        }

        Ok(items)
    }
}
