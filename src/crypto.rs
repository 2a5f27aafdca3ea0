//! Cryptographic primitives for the Reacoin chain parameters

use crate::error::ChainError;
use ripemd::Ripemd160;
use secp256k1::PublicKey;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// A 256-bit value stored in internal (hashing) byte order.
///
/// Block hashes, Merkle roots, proof-of-work limits and chain-work floors all
/// share this representation. The textual form is the byte-reversed hex
/// string used by every block explorer, so `Display` and `FromStr` agree with
/// published digests.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    pub const ZERO: Hash256 = Hash256([0u8; 32]);

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash256(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parses a big-endian hex literal, optionally prefixed with `0x`.
    /// Short literals are left-padded with zeros.
    pub fn from_hex(s: &str) -> Result<Self, ChainError> {
        let digits = s.trim();
        let digits = digits
            .strip_prefix("0x")
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        if digits.len() > 64 {
            return Err(ChainError::InvalidHash(format!(
                "Hex literal must be at most 64 digits, got {}",
                digits.len()
            )));
        }
        let padded = format!("{:0>64}", digits);
        let mut bytes: [u8; 32] = hex::decode(&padded)
            .map_err(|e| ChainError::InvalidHash(format!("Invalid hex {:?}: {}", s, e)))?
            .try_into()
            .map_err(|_| ChainError::InvalidHash("Failed to convert bytes into hash".to_string()))?;
        bytes.reverse();
        Ok(Hash256(bytes))
    }

    /// Big-endian hex, the way digests are published.
    pub fn to_hex(&self) -> String {
        let mut bytes = self.0;
        bytes.reverse();
        hex::encode(bytes)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self.to_hex())
    }
}

impl FromStr for Hash256 {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash256::from_hex(s)
    }
}

impl serde::Serialize for Hash256 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Hash256 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash256::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// SHA-256 applied twice, as used for transaction ids and block hashes.
pub fn sha256d(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    Hash256(Sha256::digest(first).into())
}

/// RIPEMD-160 of SHA-256, the payload of pay-to-pubkey-hash addresses.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// Parses a SEC-encoded (compressed or uncompressed) secp256k1 public key.
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKey, ChainError> {
    PublicKey::from_slice(bytes)
        .map_err(|e| ChainError::InvalidPublicKey(format!("Invalid public key: {}", e)))
}

/// Base58 with a four byte double-SHA-256 checksum appended.
pub fn base58check_encode(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

/// Decodes a Base58Check string, verifying and stripping the checksum.
pub fn base58check_decode(s: &str) -> Result<Vec<u8>, ChainError> {
    bs58::decode(s)
        .with_check(None)
        .into_vec()
        .map_err(|e| ChainError::InvalidAddress(format!("Base58Check decoding failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_hex_is_byte_reversed() {
        let hash = Hash256::from_hex("0x01").unwrap();
        assert_eq!(hash.as_bytes()[0], 1);
        assert!(hash.as_bytes()[1..].iter().all(|b| *b == 0));
        assert_eq!(
            hash.to_string(),
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn test_hash_from_hex_rejects_garbage() {
        assert!(Hash256::from_hex("zz").is_err());
        assert!(Hash256::from_hex(&"0".repeat(65)).is_err());
    }

    #[test]
    fn test_sha256d_empty() {
        // Double SHA-256 of the empty string, displayed big-endian.
        assert_eq!(
            sha256d(b"").to_hex(),
            "56944c5d3f98413ef45cf54545538103cc9f298e0575820ad3591376e2e0f65d"
        );
    }

    #[test]
    fn test_base58check_round_trip_and_checksum() {
        let mut payload = vec![60u8];
        payload.extend_from_slice(&[0u8; 20]);
        let encoded = base58check_encode(&payload);
        assert_eq!(encoded, "R9HC5WtHbpoa51NCUAz86XLCmGTbkf45NT");
        assert_eq!(base58check_decode(&encoded).unwrap(), payload);

        let mut tampered = encoded.into_bytes();
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == b'T' { b'U' } else { b'T' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(base58check_decode(&tampered).is_err());
    }

    #[test]
    fn test_parse_public_key_rejects_short_input() {
        let result = parse_public_key(&[0x04; 10]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid public key"));
    }
}
