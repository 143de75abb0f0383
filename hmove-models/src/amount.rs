// Copyright (c) 2022 MASSA LABS <info@massa.net>

use crate::constants::{AMOUNT_DECIMALS, AMOUNT_DECIMAL_FACTOR};
use crate::ModelsError;
use hmove_serialization::{SerializeError, Serializer, U256WordSerializer};
use serde::de::Unexpected;
use std::fmt;
use std::str::FromStr;

/// A structure representing a decimal Amount of tokens with safe operations
/// this allows ensuring that there is never an uncontrolled overflow or precision loss
/// while providing a convenient decimal interface for users
/// The underlying `u128` raw representation is a fixed-point value with factor `AMOUNT_DECIMAL_FACTOR`
/// The minimal value is 0 and the maximal value is `u128::MAX / 10^18` whole tokens
#[derive(Clone, Copy, Debug, PartialEq, Eq, Ord, PartialOrd, Default, Hash)]
pub struct Amount(u128);

impl Amount {
    /// Largest representable amount, also used as the "unlimited" allowance sentinel
    pub const MAX: Amount = Amount(u128::MAX);

    /// Create a zero Amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Obtains the underlying raw `u128` representation
    /// Warning: do not use this unless you know what you are doing
    /// because the raw value does not take the `AMOUNT_DECIMAL_FACTOR` into account.
    pub fn to_raw(&self) -> u128 {
        self.0
    }

    /// constructs an `Amount` from the underlying raw `u128` representation
    /// Warning: do not use this unless you know what you are doing
    /// because the raw value does not take the `AMOUNT_DECIMAL_FACTOR` into account
    /// In most cases, you should be using `Amount::from_str("11.23")`
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// safely subtract another amount from self, saturating the result on underflow
    #[must_use]
    pub fn saturating_sub(self, amount: Amount) -> Self {
        Amount(self.0.saturating_sub(amount.0))
    }

    /// returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// safely subtract another amount from self, returning None on underflow
    /// ```
    /// # use hmove_models::Amount;
    /// # use std::str::FromStr;
    /// let amount_1 : Amount = Amount::from_str("42").unwrap();
    /// let amount_2 : Amount = Amount::from_str("7").unwrap();
    /// let res : Amount = amount_1.checked_sub(amount_2).unwrap();
    /// assert_eq!(res, Amount::from_str("35").unwrap())
    /// ```
    pub fn checked_sub(self, amount: Amount) -> Option<Self> {
        self.0.checked_sub(amount.0).map(Amount)
    }

    /// safely add self to another amount, returning None on overflow
    /// ```
    /// # use hmove_models::Amount;
    /// # use std::str::FromStr;
    /// let amount_1 : Amount = Amount::from_str("42").unwrap();
    /// let amount_2 : Amount = Amount::from_str("7").unwrap();
    /// let res : Amount = amount_1.checked_add(amount_2).unwrap();
    /// assert_eq!(res, Amount::from_str("49").unwrap())
    /// ```
    pub fn checked_add(self, amount: Amount) -> Option<Self> {
        self.0.checked_add(amount.0).map(Amount)
    }
}

/// display an Amount in decimal string form (like "10.33")
///
/// ```
/// # use hmove_models::Amount;
/// # use std::str::FromStr;
/// let value = Amount::from_str("11.111").unwrap();
/// assert_eq!(format!("{}", value), "11.111");
/// assert_eq!(format!("{}", Amount::from_raw(1)), "0.000000000000000001");
/// ```
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let integer = self.0 / AMOUNT_DECIMAL_FACTOR;
        let fraction = self.0 % AMOUNT_DECIMAL_FACTOR;
        if fraction == 0 {
            return write!(f, "{}", integer);
        }
        let fraction = format!("{:0width$}", fraction, width = AMOUNT_DECIMALS as usize);
        write!(f, "{}.{}", integer, fraction.trim_end_matches('0'))
    }
}

/// build an Amount from decimal string form (like "10.33")
/// note that this will fail if the string format is invalid
/// or if the conversion would cause an overflow, underflow or precision loss
///
/// ```
/// # use hmove_models::Amount;
/// # use std::str::FromStr;
/// assert!(Amount::from_str("11.1").is_ok());
/// assert!(Amount::from_str("1000000000").is_ok());
/// assert!(Amount::from_str("11.1111111111111111111111").is_err());
/// assert!(Amount::from_str("1111111111111111111111111111111").is_err());
/// assert!(Amount::from_str("-11.1").is_err());
/// assert!(Amount::from_str("abc").is_err());
/// ```
impl FromStr for Amount {
    type Err = ModelsError;

    fn from_str(str_amount: &str) -> Result<Self, Self::Err> {
        if str_amount.starts_with('-') {
            return Err(ModelsError::AmountParseError(
                "amounts cannot be strictly negative".to_string(),
            ));
        }
        let (integer_part, fraction_part) = match str_amount.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (str_amount, ""),
        };
        if integer_part.is_empty() && fraction_part.is_empty() {
            return Err(ModelsError::AmountParseError(format!(
                "invalid amount: \"{}\"",
                str_amount
            )));
        }
        if !integer_part
            .chars()
            .chain(fraction_part.chars())
            .all(|c| c.is_ascii_digit())
        {
            return Err(ModelsError::AmountParseError(format!(
                "invalid amount: \"{}\"",
                str_amount
            )));
        }
        let fraction_part = fraction_part.trim_end_matches('0');
        if fraction_part.len() > AMOUNT_DECIMALS as usize {
            return Err(ModelsError::AmountParseError(format!(
                "amounts cannot be more precise than 1/{}",
                AMOUNT_DECIMAL_FACTOR
            )));
        }
        let too_large = || ModelsError::AmountParseError("amount is too large".to_string());
        let integer: u128 = if integer_part.is_empty() {
            0
        } else {
            integer_part.parse().map_err(|_| too_large())?
        };
        let fraction: u128 = if fraction_part.is_empty() {
            0
        } else {
            let padded = format!(
                "{:0<width$}",
                fraction_part,
                width = AMOUNT_DECIMALS as usize
            );
            padded
                .parse()
                .map_err(|err: std::num::ParseIntError| {
                    ModelsError::AmountParseError(err.to_string())
                })?
        };
        integer
            .checked_mul(AMOUNT_DECIMAL_FACTOR)
            .and_then(|raw| raw.checked_add(fraction))
            .map(Amount)
            .ok_or_else(too_large)
    }
}

impl<'de> serde::Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Amount, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_str(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> serde::de::Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn visit_str<E>(self, value: &str) -> Result<Amount, E>
    where
        E: serde::de::Error,
    {
        Amount::from_str(value).map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "an Amount type representing a fixed-point token amount"
        )
    }
}

impl serde::Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Serializer for `Amount` as a 32-byte word
#[derive(Clone, Default)]
pub struct AmountSerializer {
    word_serializer: U256WordSerializer,
}

impl AmountSerializer {
    /// Create a new `AmountSerializer`
    pub const fn new() -> Self {
        Self {
            word_serializer: U256WordSerializer::new(),
        }
    }
}

impl Serializer<Amount> for AmountSerializer {
    /// ## Example
    /// ```
    /// use hmove_models::amount::{Amount, AmountSerializer};
    /// use hmove_serialization::Serializer;
    /// use std::str::FromStr;
    ///
    /// let amount = Amount::from_str("11.111").unwrap();
    /// let serializer = AmountSerializer::new();
    /// let mut serialized = vec![];
    /// serializer.serialize(&amount, &mut serialized).unwrap();
    /// assert_eq!(serialized.len(), 32);
    /// ```
    fn serialize(&self, value: &Amount, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        self.word_serializer.serialize(&value.0, buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_parse_exact() {
        let amount = Amount::from_str("1000000000").unwrap();
        assert_eq!(amount.to_raw(), 1_000_000_000 * AMOUNT_DECIMAL_FACTOR);
        assert_eq!(amount.to_string(), "1000000000");

        let amount = Amount::from_str("0.000000000000000001").unwrap();
        assert_eq!(amount, Amount::from_raw(1));

        let amount = Amount::from_str(".5").unwrap();
        assert_eq!(amount.to_string(), "0.5");

        let amount = Amount::from_str("2.").unwrap();
        assert_eq!(amount.to_string(), "2");

        // trailing zeros do not count as precision
        let amount = Amount::from_str("1.1000000000000000000000").unwrap();
        assert_eq!(amount.to_string(), "1.1");
    }

    #[test]
    fn test_amount_parse_rejects() {
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str(".").is_err());
        assert!(Amount::from_str("+1").is_err());
        assert!(Amount::from_str("1.0000000000000000001").is_err());
        assert!(Amount::from_str("1 000").is_err());
        assert!(Amount::from_str("1.2.3").is_err());
    }

    #[test]
    fn test_amount_max_display_parses_back() {
        let max = Amount::MAX;
        let repr = max.to_string();
        assert_eq!(Amount::from_str(&repr).unwrap(), max);
        assert_eq!(
            Amount::from_raw(u128::MAX).checked_add(Amount::from_raw(1)),
            None
        );
        assert_eq!(
            Amount::zero().saturating_sub(Amount::from_raw(1)),
            Amount::zero()
        );
    }

    #[test]
    fn test_amount_serde() {
        let amount = Amount::from_str("42.42").unwrap();
        let serialized = serde_json::to_string(&amount).unwrap();
        assert_eq!(serialized, "\"42.42\"");
        let deserialized: Amount = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, amount);
        assert!(serde_json::from_str::<Amount>("\"-1\"").is_err());
    }
}
