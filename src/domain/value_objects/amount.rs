//! Token and gas amounts

use std::fmt;
use std::str::FromStr;

use borsh::BorshSerialize;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{StorefrontError, StorefrontResult};

/// Number of yoctoNEAR in one NEAR
pub const YOCTO_PER_NEAR: u128 = 10u128.pow(24);

/// An amount of NEAR, stored in yoctoNEAR.
///
/// Parses from `"10"` / `"0.5"` (NEAR) or `"1000yocto"`. Serializes as a
/// yocto decimal string, the way the RPC node reports balances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize)]
pub struct NearToken(u128);

impl NearToken {
    pub const ZERO: Self = Self(0);

    pub const fn from_yocto(yocto: u128) -> Self {
        Self(yocto)
    }

    pub const fn from_near(near: u128) -> Self {
        Self(near * YOCTO_PER_NEAR)
    }

    pub const fn as_yocto(&self) -> u128 {
        self.0
    }

    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn parse(value: &str) -> StorefrontResult<Self> {
        let invalid = |reason: &str| StorefrontError::InvalidAmount {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = value.trim();
        if let Some(yocto) = trimmed.strip_suffix("yocto") {
            return yocto
                .trim()
                .parse::<u128>()
                .map(Self)
                .map_err(|_| invalid("expected an integer yocto amount"));
        }

        let near = trimmed
            .strip_suffix("NEAR")
            .or_else(|| trimmed.strip_suffix("near"))
            .unwrap_or(trimmed)
            .trim();

        let (whole, frac) = near.split_once('.').unwrap_or((near, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("empty amount"));
        }
        if frac.len() > 24 {
            return Err(invalid("more than 24 decimal places"));
        }

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("not a number"))?
        };
        let frac_yocto: u128 = if frac.is_empty() {
            0
        } else {
            let digits: u128 = frac.parse().map_err(|_| invalid("not a number"))?;
            digits * 10u128.pow(24 - frac.len() as u32)
        };

        whole
            .checked_mul(YOCTO_PER_NEAR)
            .and_then(|w| w.checked_add(frac_yocto))
            .map(Self)
            .ok_or_else(|| invalid("amount overflows u128"))
    }
}

impl fmt::Display for NearToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / YOCTO_PER_NEAR;
        let frac = self.0 % YOCTO_PER_NEAR;
        if frac == 0 {
            return write!(f, "{whole} NEAR");
        }
        let frac = format!("{frac:024}");
        write!(f, "{whole}.{} NEAR", frac.trim_end_matches('0'))
    }
}

impl FromStr for NearToken {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NearToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for NearToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u128>()
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for amounts written by people (`"10"`, `"0.5 NEAR"`,
/// `"1000yocto"`, or a bare `10` / `2.5`), used by config files.
/// Serializes with `Display`.
pub mod as_near {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::NearToken;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Whole(u64),
        Fraction(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &NearToken, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NearToken, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Whole(near) => Ok(NearToken::from_near(u128::from(near))),
            Raw::Fraction(near) => NearToken::parse(&near.to_string()).map_err(serde::de::Error::custom),
            Raw::Text(raw) => NearToken::parse(&raw).map_err(serde::de::Error::custom),
        }
    }
}

/// Prepaid gas attached to a function call
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, BorshSerialize,
)]
#[serde(transparent)]
pub struct Gas(u64);

impl Gas {
    pub const ONE_TERA: u64 = 1_000_000_000_000;

    /// 30 Tgas, the default function call budget
    pub const DEFAULT_CALL: Self = Self(30 * Self::ONE_TERA);

    pub const fn from_gas(gas: u64) -> Self {
        Self(gas)
    }

    pub const fn from_tgas(tgas: u64) -> Self {
        Self(tgas * Self::ONE_TERA)
    }

    pub const fn as_gas(&self) -> u64 {
        self.0
    }

    pub fn parse(value: &str) -> StorefrontResult<Self> {
        let trimmed = value.trim();
        let invalid = || StorefrontError::InvalidAmount {
            value: value.to_string(),
            reason: "expected '<n>Tgas' or an integer gas amount".to_string(),
        };
        match trimmed
            .strip_suffix("Tgas")
            .or_else(|| trimmed.strip_suffix("tgas"))
        {
            Some(tgas) => tgas
                .trim()
                .parse::<u64>()
                .ok()
                .and_then(|t| t.checked_mul(Self::ONE_TERA))
                .map(Self)
                .ok_or_else(invalid),
            None => trimmed.parse().map(Self).map_err(|_| invalid()),
        }
    }
}

impl Default for Gas {
    fn default() -> Self {
        Self::DEFAULT_CALL
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % Self::ONE_TERA == 0 {
            write!(f, "{}Tgas", self.0 / Self::ONE_TERA)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Gas {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_near() {
        assert_eq!(NearToken::parse("10").unwrap(), NearToken::from_near(10));
    }

    #[test]
    fn parses_fractional_near() {
        let half = NearToken::parse("0.5").unwrap();
        assert_eq!(half.as_yocto(), YOCTO_PER_NEAR / 2);
        assert_eq!(NearToken::parse(".25 NEAR").unwrap().as_yocto(), YOCTO_PER_NEAR / 4);
    }

    #[test]
    fn parses_yocto_suffix() {
        assert_eq!(NearToken::parse("1000yocto").unwrap().as_yocto(), 1000);
    }

    #[test]
    fn rejects_garbage() {
        assert!(NearToken::parse("ten").is_err());
        assert!(NearToken::parse("").is_err());
        assert!(NearToken::parse("1.0000000000000000000000001").is_err());
    }

    #[test]
    fn displays_trimmed_decimals() {
        assert_eq!(NearToken::from_near(10).to_string(), "10 NEAR");
        assert_eq!(NearToken::parse("1.25").unwrap().to_string(), "1.25 NEAR");
    }

    #[test]
    fn serializes_as_yocto_string() {
        let json = serde_json::to_string(&NearToken::from_yocto(42)).unwrap();
        assert_eq!(json, "\"42\"");
        let back: NearToken = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(back.as_yocto(), 42);
    }

    #[test]
    fn human_adapter_reads_near_units() {
        #[derive(Deserialize, Serialize)]
        struct Row {
            #[serde(with = "as_near")]
            balance: NearToken,
        }
        let row: Row = serde_json::from_str(r#"{"balance":"2.5"}"#).unwrap();
        assert_eq!(row.balance.as_yocto(), 5 * YOCTO_PER_NEAR / 2);
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"balance":"2.5 NEAR"}"#);
    }

    #[test]
    fn human_adapter_reads_bare_numbers() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(with = "as_near")]
            balance: NearToken,
        }
        let whole: Row = toml::from_str("balance = 10").unwrap();
        assert_eq!(whole.balance, NearToken::from_near(10));
        let zero: Row = toml::from_str("balance = 0").unwrap();
        assert_eq!(zero.balance, NearToken::ZERO);
        let half: Row = toml::from_str("balance = 0.5").unwrap();
        assert_eq!(half.balance.as_yocto(), YOCTO_PER_NEAR / 2);
        assert!(toml::from_str::<Row>("balance = -1").is_err());
    }

    #[test]
    fn gas_parses_tgas() {
        assert_eq!(Gas::parse("30Tgas").unwrap(), Gas::DEFAULT_CALL);
        assert_eq!(Gas::parse("5000").unwrap().as_gas(), 5000);
        assert!(Gas::parse("lots").is_err());
    }

    #[test]
    fn gas_display() {
        assert_eq!(Gas::from_tgas(100).to_string(), "100Tgas");
        assert_eq!(Gas::from_gas(7).to_string(), "7");
    }
}
