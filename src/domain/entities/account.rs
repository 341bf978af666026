use crate::domain::value_objects::{AccountId, KeyPair, PublicKey};

/// A loaded account: its id plus the key it signs with
#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    key_pair: KeyPair,
}

impl Account {
    pub fn new(id: AccountId, key_pair: KeyPair) -> Self {
        Self { id, key_pair }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    pub fn public_key(&self) -> PublicKey {
        self.key_pair.public_key()
    }
}
