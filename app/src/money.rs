//! Monetary amounts. Amounts are kept as whole cents so that values such as `"247.80"` round-trip
//! exactly; binary floating point is never involved.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must be a non-negative decimal number")]
    Malformed,
    #[error("amount can have at most two decimal places")]
    TooManyDecimals,
    #[error("amount is too large")]
    Overflow,
}

/// A non-negative currency value with two decimal places.
#[derive(Debug, Clone, Copy, Default, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Amount(i64);

impl Amount {
    pub fn from_cents(cents: u32) -> Self {
        Self(i64::from(cents))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        let (whole, fraction) = match s.split_once('.') {
            Some((_, "")) => return Err(ParseError::Malformed),
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };
        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(ParseError::Malformed);
        }
        if fraction.len() > 2 {
            return Err(ParseError::TooManyDecimals);
        }
        let units: i64 = whole.parse().map_err(|_| ParseError::Overflow)?;
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| ParseError::Malformed)? * 10,
            _ => fraction.parse::<i64>().map_err(|_| ParseError::Malformed)?,
        };
        units
            .checked_mul(100)
            .and_then(|total| total.checked_add(cents))
            .map(Amount)
            .ok_or(ParseError::Overflow)
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_decimal_text() {
        assert_eq!("247.80".parse::<Amount>().unwrap().cents(), 24780);
        assert_eq!("15".parse::<Amount>().unwrap().cents(), 1500);
        assert_eq!("0.5".parse::<Amount>().unwrap().cents(), 50);
        assert_eq!("1245.3".parse::<Amount>().unwrap().cents(), 124530);
        assert_eq!("0.01".parse::<Amount>().unwrap().cents(), 1);
    }

    #[test]
    fn renders_two_decimals() {
        assert_eq!("15".parse::<Amount>().unwrap().to_string(), "15.00");
        assert_eq!("89.9".parse::<Amount>().unwrap().to_string(), "89.90");
        assert_eq!(Amount::from_cents(7).to_string(), "0.07");
    }

    #[test]
    fn rejects_invalid_text() {
        assert_eq!("".parse::<Amount>(), Err(ParseError::Empty));
        assert_eq!("1.234".parse::<Amount>(), Err(ParseError::TooManyDecimals));
        assert_eq!("-1".parse::<Amount>(), Err(ParseError::Malformed));
        assert_eq!("+1".parse::<Amount>(), Err(ParseError::Malformed));
        assert_eq!("abc".parse::<Amount>(), Err(ParseError::Malformed));
        assert_eq!("1e3".parse::<Amount>(), Err(ParseError::Malformed));
        assert_eq!("12.".parse::<Amount>(), Err(ParseError::Malformed));
        assert_eq!(".5".parse::<Amount>(), Err(ParseError::Malformed));
        assert_eq!(
            "99999999999999999999".parse::<Amount>(),
            Err(ParseError::Overflow)
        );
    }

    #[test]
    fn serializes_as_string() {
        let amount: Amount = serde_json::from_str(r#""125.00""#).unwrap();
        assert_eq!(amount.cents(), 12500);
        assert_eq!(serde_json::to_string(&amount).unwrap(), r#""125.00""#);
        assert!(serde_json::from_str::<Amount>(r#""1.001""#).is_err());
    }
}
