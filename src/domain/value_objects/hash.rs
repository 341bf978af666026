//! Crypto Hash Value Object
//!
//! A SHA-256 digest rendered in base58, the format NEAR uses for block
//! hashes, transaction hashes and contract code hashes.

use std::fmt;
use std::str::FromStr;

use borsh::BorshSerialize;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::StorefrontError;

/// 32-byte hash value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, BorshSerialize)]
pub struct CryptoHash([u8; 32]);

impl CryptoHash {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hash arbitrary content with SHA-256
    pub fn of(content: &[u8]) -> Self {
        Self(Sha256::digest(content).into())
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this hash matches a base58 string
    pub fn matches_str(&self, s: &str) -> bool {
        self.to_string() == s
    }
}

impl fmt::Display for CryptoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl FromStr for CryptoHash {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| StorefrontError::remote("INVALID_HASH", reason, s.into());
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| invalid(format!("hash '{s}' is not base58: {e}")))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| invalid(format!("hash '{s}' has {} bytes, expected 32", v.len())))?;
        Ok(Self(bytes))
    }
}

impl Serialize for CryptoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CryptoHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
