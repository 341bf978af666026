//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod account_id;
mod amount;
mod hash;
mod key;

pub use account_id::AccountId;
pub use amount::{as_near, Gas, NearToken, YOCTO_PER_NEAR};
pub use hash::CryptoHash;
pub use key::{KeyPair, KeyType, PublicKey, Signature};
