//! Bech32 address encoding. The raw 20 byte account address is chain agnostic, but its
//! text form always carries the prefix of the chain it is meant for.
use std::fmt;

use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Serialize};

use crate::error::AddressError;

/// Length of an account address (RIPEMD160(SHA256(pubkey)))
pub const ADDRESS_LENGTH: usize = 20;

/// Raw account address bytes
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RawAddress([u8; ADDRESS_LENGTH]);

impl RawAddress {
    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        RawAddress(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Bech32 representation under the given chain prefix
    pub fn to_bech32(&self, prefix: &str) -> Result<String, AddressError> {
        encode(prefix, &self.0)
    }
}

impl TryFrom<&[u8]> for RawAddress {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let raw: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|_| {
            AddressError::Encoding(format!(
                "expected {} address bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            ))
        })?;

        Ok(RawAddress(raw))
    }
}

impl fmt::Display for RawAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

/// Encodes raw address bytes as bech32 text with the given prefix.
pub fn encode(prefix: &str, raw: &[u8]) -> Result<String, AddressError> {
    if raw.len() != ADDRESS_LENGTH {
        return Err(AddressError::Encoding(format!(
            "expected {} address bytes, got {}",
            ADDRESS_LENGTH,
            raw.len()
        )));
    }
    if prefix.is_empty() {
        return Err(AddressError::Encoding("empty prefix".to_string()));
    }

    bech32::encode(prefix, raw.to_base32(), Variant::Bech32)
        .map_err(|e| AddressError::Encoding(e.to_string()))
}

/// Decodes bech32 text, requiring it to carry exactly the expected prefix.
pub fn decode(prefix: &str, text: &str) -> Result<RawAddress, AddressError> {
    let (hrp, data, variant) =
        bech32::decode(text).map_err(|e| AddressError::Decoding(e.to_string()))?;

    if variant != Variant::Bech32 {
        return Err(AddressError::Decoding(
            "expected bech32 variant, found bech32m".to_string(),
        ));
    }
    if hrp != prefix.to_lowercase() {
        return Err(AddressError::PrefixMismatch {
            expected: prefix.to_string(),
            found: hrp,
        });
    }

    let bytes = Vec::<u8>::from_base32(&data).map_err(|e| AddressError::Decoding(e.to_string()))?;

    RawAddress::try_from(bytes.as_slice())
        .map_err(|_| AddressError::Decoding(format!("invalid address length {}", bytes.len())))
}
