//! Signing keys
//!
//! Keys use NEAR's text form `ed25519:<base58>`. A secret key is 64 bytes
//! (seed followed by public key), matching what `near login` writes.

use std::fmt;
use std::str::FromStr;

use borsh::BorshSerialize;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{StorefrontError, StorefrontResult};

const ED25519_PREFIX: &str = "ed25519:";

/// Key type tag used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize)]
pub enum KeyType {
    Ed25519,
}

/// Ed25519 public key
#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshSerialize)]
pub struct PublicKey {
    key_type: KeyType,
    data: [u8; 32],
}

impl PublicKey {
    pub const fn ed25519(data: [u8; 32]) -> Self {
        Self {
            key_type: KeyType::Ed25519,
            data,
        }
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.data
    }

    /// Verify `signature` over `message`
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.data) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(&signature.data);
        key.verify(message, &sig).is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ED25519_PREFIX}{}", bs58::encode(self.data).into_string())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl FromStr for PublicKey {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_key(s)?;
        let data: [u8; 32] = bytes
            .try_into()
            .map_err(|_| key_error(s, "public key must be 32 bytes"))?;
        Ok(Self::ed25519(data))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Ed25519 signature
#[derive(Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub struct Signature {
    key_type: KeyType,
    data: [u8; 64],
}

impl Signature {
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.data
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Signature({ED25519_PREFIX}{})",
            bs58::encode(self.data).into_string()
        )
    }
}

/// Ed25519 key pair: the signing capability behind an account handle
#[derive(Clone)]
pub struct KeyPair {
    signing: SigningKey,
}

impl KeyPair {
    /// Deterministic key pair from a 32-byte seed
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing: SigningKey::from_bytes(&seed),
        }
    }

    /// Parse `ed25519:<base58>` with either a 64-byte (seed + public) or a
    /// 32-byte (seed only) payload
    pub fn from_secret_str(s: &str) -> StorefrontResult<Self> {
        let bytes = decode_key(s)?;
        let seed: [u8; 32] = match bytes.len() {
            32 | 64 => bytes[..32]
                .try_into()
                .map_err(|_| key_error(s, "secret key must be 32 or 64 bytes"))?,
            _ => return Err(key_error(s, "secret key must be 32 or 64 bytes")),
        };
        let pair = Self::from_seed(seed);
        if bytes.len() == 64 && bytes[32..] != pair.public_key().data {
            return Err(key_error(s, "embedded public key does not match the seed"));
        }
        Ok(pair)
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::ed25519(self.signing.verifying_key().to_bytes())
    }

    /// Text form of the full 64-byte secret key
    pub fn secret_key_string(&self) -> String {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.signing.to_bytes());
        bytes[32..].copy_from_slice(&self.public_key().data);
        format!("{ED25519_PREFIX}{}", bs58::encode(bytes).into_string())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature {
            key_type: KeyType::Ed25519,
            data: self.signing.sign(message).to_bytes(),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

fn decode_key(s: &str) -> StorefrontResult<Vec<u8>> {
    let encoded = s.strip_prefix(ED25519_PREFIX).unwrap_or(s);
    if encoded.contains(':') {
        return Err(key_error(s, "only ed25519 keys are supported"));
    }
    bs58::decode(encoded)
        .into_vec()
        .map_err(|e| key_error(s, &format!("not base58: {e}")))
}

fn key_error(value: &str, reason: &str) -> StorefrontError {
    // Never echo secret material back
    let shown = value.split_once(':').map_or("key", |(prefix, _)| prefix);
    StorefrontError::InvalidKey {
        value: format!("{shown}:…"),
        reason: reason.to_string(),
    }
}
