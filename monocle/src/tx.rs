//! Transaction building blocks shared by the signing pipeline in
//! [`ChainEndpoint`](crate::chain::endpoint::ChainEndpoint) and its callers.
use cosmos_sdk_proto::cosmos::base::abci::v1beta1::TxResponse;
use cosmrs::{
    crypto::{secp256k1::SigningKey, PublicKey},
    tendermint::chain::Id,
    tx::{self, Fee, SignDoc, SignerInfo},
    Any, Denom,
};
use serde::{Deserialize, Serialize};

use crate::{coin::is_valid_denom, error::TxError};

/// Metadata wrapper for transactions
#[derive(Clone, Debug)]
pub struct TxMetadata {
    pub chain_id: Id,
    pub account_number: u64,
    pub sequence_number: u64,
    pub gas_limit: u64,
    pub fee_amount: u64,
    pub fee_denom: String,
    pub timeout_height: u16,
    pub memo: String,
}

/// What the chain answered to a broadcast. A non-zero code means the chain rejected the
/// transaction; `log` then carries its reason.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BroadcastResult {
    pub code: u32,
    pub log: String,
    pub tx_hash: String,
    pub height: i64,
}

impl BroadcastResult {
    pub fn accepted(&self) -> bool {
        self.code == 0
    }

    /// Turns a rejection into an error for callers that don't need to inspect it.
    pub fn ensure_accepted(self) -> Result<Self, TxError> {
        if self.accepted() {
            Ok(self)
        } else {
            Err(TxError::Rejected {
                code: self.code,
                log: self.log,
            })
        }
    }
}

impl From<TxResponse> for BroadcastResult {
    fn from(response: TxResponse) -> Self {
        BroadcastResult {
            code: response.code,
            log: response.raw_log,
            tx_hash: response.txhash,
            height: response.height,
        }
    }
}

/// Builds the body, signs it in direct mode and serializes the raw transaction.
pub fn sign_tx(
    msgs: Vec<Any>,
    metadata: &TxMetadata,
    public_key: PublicKey,
    signing_key: &SigningKey,
) -> Result<Vec<u8>, TxError> {
    if !is_valid_denom(&metadata.fee_denom) {
        return Err(TxError::InvalidCoins(metadata.fee_denom.clone()));
    }

    let tx_body = tx::Body::new(msgs, &metadata.memo, metadata.timeout_height);

    // Create signer info.
    let signer_info = SignerInfo::single_direct(Some(public_key), metadata.sequence_number);

    // Compute auth info from signer info by associating a fee.
    let fee = cosmrs::Coin {
        denom: metadata.fee_denom.parse::<Denom>()?,
        amount: metadata.fee_amount.into(),
    };
    let auth_info = signer_info.auth_info(Fee::from_amount_and_gas(fee, metadata.gas_limit));

    // Create doc to be signed
    let sign_doc = SignDoc::new(
        &tx_body,
        &auth_info,
        &metadata.chain_id,
        metadata.account_number,
    )
    .map_err(|err| TxError::TypeConversion(err.to_string()))?;

    sign_doc
        .sign(signing_key)
        .map_err(|err| TxError::Signing(err.to_string()))?
        .to_bytes()
        .map_err(|err| TxError::Serialization(err.to_string()))
}
