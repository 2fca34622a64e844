//! Accounts as returned by the auth module. The chain answers with a protobuf `Any`; the kinds
//! this client understands are unpacked into [`Account`], anything else is kept as
//! [`Account::Unknown`] with its type URL.
use cosmos_sdk_proto::cosmos::{
    auth::v1beta1::{BaseAccount as ProtoBaseAccount, ModuleAccount},
    vesting::v1beta1::{
        BaseVestingAccount, ContinuousVestingAccount, DelayedVestingAccount,
        PeriodicVestingAccount, PermanentLockedAccount,
    },
};
use cosmrs::crypto::PublicKey;
use prost::Message;
use prost_types::Any;

use crate::error::AccountError;

pub const BASE_ACCOUNT_TYPE_URL: &str = "/cosmos.auth.v1beta1.BaseAccount";
pub const MODULE_ACCOUNT_TYPE_URL: &str = "/cosmos.auth.v1beta1.ModuleAccount";
pub const CONTINUOUS_VESTING_ACCOUNT_TYPE_URL: &str =
    "/cosmos.vesting.v1beta1.ContinuousVestingAccount";
pub const DELAYED_VESTING_ACCOUNT_TYPE_URL: &str = "/cosmos.vesting.v1beta1.DelayedVestingAccount";
pub const PERIODIC_VESTING_ACCOUNT_TYPE_URL: &str =
    "/cosmos.vesting.v1beta1.PeriodicVestingAccount";
pub const PERMANENT_LOCKED_ACCOUNT_TYPE_URL: &str =
    "/cosmos.vesting.v1beta1.PermanentLockedAccount";

/// Used for converting the BaseAccount type in cosmos_sdk_proto to something with concrete field types
#[derive(Clone, Debug)]
pub struct BaseAccount {
    pub address: String,
    // public key is not present on chain until the account has signed something
    pub pub_key: Option<PublicKey>,
    pub account_number: u64,
    pub sequence: u64,
}

// TO-DO: Handle public keys with type URL /cosmos.crypto.multisig.LegacyAminoPubKey
impl TryFrom<ProtoBaseAccount> for BaseAccount {
    type Error = AccountError;

    fn try_from(account: ProtoBaseAccount) -> Result<BaseAccount, Self::Error> {
        let pub_key = match account.pub_key {
            Some(k) => Some(PublicKey::try_from(k)?),
            None => None,
        };

        Ok(BaseAccount {
            address: account.address,
            pub_key,
            account_number: account.account_number,
            sequence: account.sequence,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VestingKind {
    Continuous,
    Delayed,
    Periodic,
    PermanentLocked,
}

/// The account kinds this client knows how to unpack
#[derive(Clone, Debug)]
pub enum Account {
    Base(BaseAccount),
    Module {
        base: BaseAccount,
        name: String,
        permissions: Vec<String>,
    },
    Vesting {
        base: BaseAccount,
        kind: VestingKind,
    },
    Unknown {
        type_url: String,
    },
}

impl Account {
    /// The base account carrying number and sequence. [`None`] for unknown kinds.
    pub fn base_account(&self) -> Option<&BaseAccount> {
        match self {
            Account::Base(base) => Some(base),
            Account::Module { base, .. } | Account::Vesting { base, .. } => Some(base),
            Account::Unknown { .. } => None,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Account::Base(_) => "base",
            Account::Module { .. } => "module",
            Account::Vesting { .. } => "vesting",
            Account::Unknown { type_url } => type_url,
        }
    }
}

impl TryFrom<Any> for Account {
    type Error = AccountError;

    fn try_from(any: Any) -> Result<Self, Self::Error> {
        let value = any.value.as_slice();

        Ok(match any.type_url.as_str() {
            BASE_ACCOUNT_TYPE_URL => Account::Base(ProtoBaseAccount::decode(value)?.try_into()?),
            MODULE_ACCOUNT_TYPE_URL => {
                let module = ModuleAccount::decode(value)?;
                Account::Module {
                    base: required_base(module.base_account, "module account")?,
                    name: module.name,
                    permissions: module.permissions,
                }
            }
            CONTINUOUS_VESTING_ACCOUNT_TYPE_URL => vesting(
                ContinuousVestingAccount::decode(value)?.base_vesting_account,
                VestingKind::Continuous,
            )?,
            DELAYED_VESTING_ACCOUNT_TYPE_URL => vesting(
                DelayedVestingAccount::decode(value)?.base_vesting_account,
                VestingKind::Delayed,
            )?,
            PERIODIC_VESTING_ACCOUNT_TYPE_URL => vesting(
                PeriodicVestingAccount::decode(value)?.base_vesting_account,
                VestingKind::Periodic,
            )?,
            PERMANENT_LOCKED_ACCOUNT_TYPE_URL => vesting(
                PermanentLockedAccount::decode(value)?.base_vesting_account,
                VestingKind::PermanentLocked,
            )?,
            _ => Account::Unknown {
                type_url: any.type_url,
            },
        })
    }
}

fn required_base(
    base: Option<ProtoBaseAccount>,
    kind: &str,
) -> Result<BaseAccount, AccountError> {
    match base {
        Some(b) => b.try_into(),
        None => Err(AccountError::Empty(format!("{} has no base account", kind))),
    }
}

fn vesting(base: Option<BaseVestingAccount>, kind: VestingKind) -> Result<Account, AccountError> {
    let base_vesting =
        base.ok_or_else(|| AccountError::Empty("vesting account has no base".to_string()))?;

    Ok(Account::Vesting {
        base: required_base(base_vesting.base_account, "vesting account")?,
        kind,
    })
}
