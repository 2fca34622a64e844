//! Signing and broadcasting. Sequence numbers are read fresh for every transaction and never
//! retried; callers sending concurrently from one account have to serialize themselves.
use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;
use cosmrs::{tendermint::chain::Id, Any};
use prost::Message;
use tracing::{debug, info, warn};

use crate::{
    chain::config::SignMode,
    coin::Coin,
    error::{ChainClientError, TxError},
    tx::{sign_tx, BroadcastResult, TxMetadata},
};

use super::ChainEndpoint;

pub const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";

impl ChainEndpoint {
    /// Signs a single message with the configured key and broadcasts it
    pub async fn send_msg(&self, msg: Any) -> Result<BroadcastResult, ChainClientError> {
        self.send_msgs(&self.config.key, vec![msg], "").await
    }

    /// Signs and broadcasts messages with the given key. A transport failure is an error; a
    /// transaction the chain refused comes back as a result with a non-zero code.
    pub async fn send_msgs(
        &self,
        key_name: &str,
        msgs: Vec<Any>,
        memo: &str,
    ) -> Result<BroadcastResult, ChainClientError> {
        if self.config.sign_mode != SignMode::Direct {
            return Err(TxError::UnsupportedSignMode(self.config.sign_mode.to_string()).into());
        }

        let signing_key = self.keyring.get_key(key_name)?;
        let public_key = signing_key.public_key();
        let sender = self
            .keyring
            .get_public_key_and_address(key_name, &self.config.account_prefix)?
            .account
            .to_string();
        let account = self.base_account(&sender).await?;
        let gas_price = self.config.gas_price()?;
        let mut metadata = TxMetadata {
            chain_id: self
                .config
                .chain_id
                .parse::<Id>()
                .map_err(|e| TxError::TypeConversion(e.to_string()))?,
            account_number: account.account_number,
            sequence_number: account.sequence,
            gas_limit: 0,
            fee_amount: 0,
            fee_denom: gas_price.denom.clone(),
            timeout_height: 0,
            memo: memo.to_string(),
        };

        // zero fee for simulation; the chain skips fee checks there
        let simulation_tx = sign_tx(msgs.clone(), &metadata, public_key, &signing_key)?;
        let gas_used = self
            .call("simulate", self.transport.simulate(simulation_tx))
            .await?;

        metadata.gas_limit = (gas_used as f64 * self.config.gas_adjustment).ceil() as u64;
        metadata.fee_amount = gas_price.fee_for(metadata.gas_limit);

        debug!(
            chain_id = %self.config.chain_id,
            sender = %sender,
            sequence = metadata.sequence_number,
            gas_used,
            gas_limit = metadata.gas_limit,
            fee = metadata.fee_amount,
            "signing transaction"
        );

        let tx_bytes = sign_tx(msgs, &metadata, public_key, &signing_key)?;
        let result = self
            .call(
                "broadcast",
                self.transport.broadcast(tx_bytes, self.config.broadcast_mode),
            )
            .await?;

        if result.accepted() {
            info!(chain_id = %self.config.chain_id, tx_hash = %result.tx_hash, "transaction accepted");
        } else {
            warn!(
                chain_id = %self.config.chain_id,
                code = result.code,
                log = %result.log,
                "transaction rejected"
            );
        }

        Ok(result)
    }

    /// Sends coins from a key to a key name or address on this chain
    pub async fn bank_send(
        &self,
        from_key: &str,
        to: &str,
        amount: Vec<Coin>,
        memo: &str,
    ) -> Result<BroadcastResult, ChainClientError> {
        if amount.is_empty() || amount.iter().any(Coin::is_zero) {
            let coins: Vec<String> = amount.iter().map(Coin::to_string).collect();
            return Err(TxError::InvalidCoins(coins.join(",")).into());
        }

        let from_address = self
            .keyring
            .get_public_key_and_address(from_key, &self.config.account_prefix)?
            .account
            .to_string();
        let to_address = self.encode_address(&self.resolve_key_or_address(to)?)?;
        let msg = MsgSend {
            from_address,
            to_address,
            amount: amount.into_iter().map(Into::into).collect(),
        };
        let msg = Any {
            type_url: MSG_SEND_TYPE_URL.to_string(),
            value: msg.encode_to_vec(),
        };

        self.send_msgs(from_key, vec![msg], memo).await
    }
}
