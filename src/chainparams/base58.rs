//! Version prefixes for Base58Check-encoded keys and addresses.

use crate::crypto::{base58check_decode, base58check_encode};
use crate::error::ChainError;
use serde::ser::SerializeMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    ScriptAddress2,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl Base58Type {
    pub const ALL: [Base58Type; 6] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::ScriptAddress2,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Base58Type::PubkeyAddress => "pubkey",
            Base58Type::ScriptAddress => "script",
            Base58Type::ScriptAddress2 => "script2",
            Base58Type::SecretKey => "secret",
            Base58Type::ExtPublicKey => "ext-public",
            Base58Type::ExtSecretKey => "ext-secret",
        }
    }

    /// Payload lengths (after the prefix) that make sense for this kind.
    pub fn payload_lengths(&self) -> &'static [usize] {
        match self {
            Base58Type::PubkeyAddress | Base58Type::ScriptAddress | Base58Type::ScriptAddress2 => {
                &[20]
            }
            // 32-byte key, optionally followed by the 0x01 compression flag
            Base58Type::SecretKey => &[32, 33],
            Base58Type::ExtPublicKey | Base58Type::ExtSecretKey => &[74],
        }
    }

    fn index(&self) -> usize {
        match self {
            Base58Type::PubkeyAddress => 0,
            Base58Type::ScriptAddress => 1,
            Base58Type::ScriptAddress2 => 2,
            Base58Type::SecretKey => 3,
            Base58Type::ExtPublicKey => 4,
            Base58Type::ExtSecretKey => 5,
        }
    }
}

impl fmt::Display for Base58Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Base58Type {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl FromStr for Base58Type {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Base58Type::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ChainError::InvalidAddress(format!("Unknown address kind {:?}", s)))
    }
}

/// Prefix bytes for every [`Base58Type`] on one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base58Prefixes([Vec<u8>; 6]);

impl Base58Prefixes {
    pub fn new(
        pubkey_address: u8,
        script_address: u8,
        script_address2: u8,
        secret_key: u8,
        ext_public_key: [u8; 4],
        ext_secret_key: [u8; 4],
    ) -> Self {
        Base58Prefixes([
            vec![pubkey_address],
            vec![script_address],
            vec![script_address2],
            vec![secret_key],
            ext_public_key.to_vec(),
            ext_secret_key.to_vec(),
        ])
    }

    pub fn get(&self, kind: Base58Type) -> &[u8] {
        &self.0[kind.index()]
    }

    pub fn encode(&self, kind: Base58Type, payload: &[u8]) -> String {
        let prefix = self.get(kind);
        let mut data = Vec::with_capacity(prefix.len() + payload.len());
        data.extend_from_slice(prefix);
        data.extend_from_slice(payload);
        base58check_encode(&data)
    }

    /// Finds the kind whose prefix and payload length match already-decoded
    /// Base58Check data, returning it with the payload.
    pub fn classify<'a>(&self, data: &'a [u8]) -> Option<(Base58Type, &'a [u8])> {
        Base58Type::ALL.into_iter().find_map(|kind| {
            let payload = data.strip_prefix(self.get(kind))?;
            kind.payload_lengths()
                .contains(&payload.len())
                .then_some((kind, payload))
        })
    }

    /// Decodes `s` and requires it to be of `kind` on this network.
    pub fn decode(&self, kind: Base58Type, s: &str) -> Result<Vec<u8>, ChainError> {
        let data = base58check_decode(s)?;
        match self.classify(&data) {
            Some((found, payload)) if found == kind => Ok(payload.to_vec()),
            Some((found, _)) => Err(ChainError::InvalidAddress(format!(
                "Expected a {} encoding, found {}",
                kind, found
            ))),
            None => Err(ChainError::InvalidAddress(format!(
                "{} does not carry a known prefix for this network",
                s
            ))),
        }
    }
}

impl Serialize for Base58Prefixes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for kind in Base58Type::ALL {
            map.serialize_entry(kind.name(), &hex::encode(self.get(kind)))?;
        }
        map.end()
    }
}
