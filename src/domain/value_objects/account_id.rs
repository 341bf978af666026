//! Account Identifier Value Object
//!
//! NEAR account ids are hierarchical: `marketplace.parent.testnet` is a
//! direct child of `parent.testnet`. Only the parent may create it.

use std::fmt;
use std::str::FromStr;

use borsh::BorshSerialize;
use serde::{Deserialize, Serialize};

use crate::error::{StorefrontError, StorefrontResult};

/// Validated NEAR account identifier
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, BorshSerialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub const MIN_LEN: usize = 2;
    pub const MAX_LEN: usize = 64;

    /// Parse and validate an account id
    pub fn parse(value: &str) -> StorefrontResult<Self> {
        validate(value).map_err(|reason| StorefrontError::InvalidAccountId {
            value: value.to_string(),
            reason: reason.to_string(),
        })?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the child account `prefix.self`.
    ///
    /// `prefix` must be a single label: `sub_account("a.b")` is rejected
    /// because the result would not be a direct child.
    pub fn sub_account(&self, prefix: &str) -> StorefrontResult<Self> {
        if prefix.contains('.') {
            return Err(StorefrontError::InvalidAccountId {
                value: prefix.to_string(),
                reason: "sub-account prefix must not contain '.'".to_string(),
            });
        }
        Self::parse(&format!("{}.{}", prefix, self.0))
    }

    /// Parent account, if this is not a top-level account
    pub fn parent(&self) -> Option<Self> {
        self.0
            .split_once('.')
            .map(|(_, rest)| Self(rest.to_string()))
    }

    /// True when `self` is exactly one level below `parent`
    pub fn is_sub_account_of(&self, parent: &AccountId) -> bool {
        self.parent().as_ref() == Some(parent)
    }

    /// True for 64-char hex implicit accounts
    pub fn is_implicit(&self) -> bool {
        self.0.len() == 64 && self.0.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

fn validate(value: &str) -> Result<(), &'static str> {
    if value.len() < AccountId::MIN_LEN {
        return Err("too short");
    }
    if value.len() > AccountId::MAX_LEN {
        return Err("too long");
    }

    let mut last_was_separator = true;
    for c in value.chars() {
        match c {
            'a'..='z' | '0'..='9' => last_was_separator = false,
            '-' | '_' | '.' => {
                if last_was_separator {
                    return Err("separators must sit between alphanumeric characters");
                }
                last_was_separator = true;
            }
            'A'..='Z' => return Err("uppercase characters are not allowed"),
            _ => return Err("only [a-z0-9._-] are allowed"),
        }
    }

    if last_was_separator {
        return Err("must not end with a separator");
    }
    Ok(())
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = StorefrontError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sub_account_prefixes_parent() {
        let parent = AccountId::parse("parent.testnet").unwrap();
        let child = parent.sub_account("marketplace").unwrap();
        assert_eq!(child.as_str(), "marketplace.parent.testnet");
        assert!(child.is_sub_account_of(&parent));
    }

    #[test]
    fn sub_account_rejects_dotted_prefix() {
        let parent = AccountId::parse("parent.testnet").unwrap();
        assert!(parent.sub_account("a.b").is_err());
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["a", "Alice.testnet", "alice..testnet", ".alice", "alice.", "al ice", "a$b"] {
            assert!(AccountId::parse(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn accepts_near_style_ids() {
        for good in ["akileus0.testnet", "near", "card_store-1.testnet", "a-b_c.d"] {
            assert!(AccountId::parse(good).is_ok(), "{good} should be accepted");
        }
    }

    #[test]
    fn top_level_has_no_parent() {
        let id = AccountId::parse("testnet").unwrap();
        assert_eq!(id.parent(), None);
    }

    #[test]
    fn implicit_account_detection() {
        let hex = "a".repeat(64);
        assert!(AccountId::parse(&hex).unwrap().is_implicit());
        assert!(!AccountId::parse("alice.testnet").unwrap().is_implicit());
    }

    #[test]
    fn deserialize_validates() {
        let ok: AccountId = serde_json::from_str("\"alice.testnet\"").unwrap();
        assert_eq!(ok.as_str(), "alice.testnet");
        assert!(serde_json::from_str::<AccountId>("\"ALICE\"").is_err());
    }

    proptest! {
        #[test]
        fn derived_children_stay_direct_children(prefix in "[a-z0-9]{1,12}") {
            let parent = AccountId::parse("store.testnet").unwrap();
            let child = parent.sub_account(&prefix).unwrap();
            prop_assert!(child.is_sub_account_of(&parent));
            prop_assert!(child.as_str().ends_with(".store.testnet"));
        }
    }
}
