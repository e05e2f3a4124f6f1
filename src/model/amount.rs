//! Amount type for monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that
//! may or may not include a currency symbol and commas. All balance and settlement arithmetic in
//! the crate runs on this type, so sums are exact and never drift the way binary floats do.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// Currency symbols accepted (and discarded) when parsing. Two-character symbols come first so
/// that `C$` is not mistaken for `$`.
const SYMBOLS: [&str; 7] = ["C$", "A$", "$", "€", "£", "¥", "₹"];

/// Represents a monetary amount in the ledger's working currency.
///
/// This type wraps `Decimal` and provides custom serialization/deserialization so that amounts
/// are stored as plain decimal strings (`"50.00"`) while parsing tolerates user input with a
/// currency symbol or thousands separators.
///
/// # Examples
///
/// Parsing with a currency symbol:
/// ```
/// # use divvy::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("$1,250.00").unwrap();
/// assert_eq!(amount, Amount::from_cents(125_000));
/// ```
///
/// Arithmetic is exact:
/// ```
/// # use divvy::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("0.10").unwrap();
/// let b = Amount::from_str("0.20").unwrap();
/// assert_eq!(a + b, Amount::from_str("0.30").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero in the working currency.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// One cent. Balances within this tolerance of zero are considered settled, and settlements
    /// of this size or smaller are never suggested.
    pub const EPSILON: Amount = Amount(Decimal::from_parts(1, 0, 0, false, 2));

    /// Creates a new `Amount` from a `Decimal` value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates an `Amount` from a whole number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Returns the underlying `Decimal` value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the value in whole cents, or `None` if the value carries sub-cent precision or
    /// overflows an `i64`.
    pub fn as_cents(&self) -> Option<i64> {
        let scaled = self.0 * Decimal::ONE_HUNDRED;
        if !scaled.fract().is_zero() {
            return None;
        }
        scaled.to_i64()
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.is_zero()
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Rounds to two decimal places, halves away from zero, e.g. `2.345 -> 2.35` and
    /// `-2.345 -> -2.35`.
    pub fn round_to_cents(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

/// An error that can occur when parsing strings into `Amount` values.
#[derive(Debug, Clone)]
pub struct AmountError(String);

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError("An amount cannot be empty".to_string()));
        }

        // Pull off a leading minus sign before looking for a currency symbol so that both
        // "-$50.00" and "$-50.00" style inputs parse.
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut without_symbol = unsigned;
        for symbol in SYMBOLS {
            if let Some(rest) = unsigned.strip_prefix(symbol) {
                without_symbol = rest;
                break;
            }
        }

        let without_commas = without_symbol.replace(',', "");
        let value = Decimal::from_str(&without_commas)
            .map_err(|e| AmountError(format!("Invalid amount '{s}': {e}")))?;
        Ok(Amount(if negative { -value } else { value }))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Serialize as a plain decimal string to keep the ledger file exact and readable.
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        Amount(iter.map(|a| a.0).sum())
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        Amount(iter.map(|a| a.0).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_with_dollar_sign() {
        let amount = Amount::from_str("$50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_negative_with_dollar_sign() {
        let amount = Amount::from_str("-$50.00").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("-50.00").unwrap());
    }

    #[test]
    fn test_parse_two_character_symbol() {
        let amount = Amount::from_str("C$12.50").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("12.50").unwrap());
    }

    #[test]
    fn test_parse_euro_symbol() {
        let amount = Amount::from_str("€9.99").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("9.99").unwrap());
    }

    #[test]
    fn test_parse_with_commas() {
        let amount = Amount::from_str("$1,234,567.89").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("1234567.89").unwrap());
    }

    #[test]
    fn test_parse_whitespace() {
        let amount = Amount::from_str("  $50.00  ").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_empty_string_is_error() {
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("   ").is_err());
    }

    #[test]
    fn test_parse_garbage_is_error() {
        let err = Amount::from_str("twelve").unwrap_err();
        assert!(err.to_string().contains("Invalid amount"));
    }

    #[test]
    fn test_display_plain() {
        let amount = Amount::from_str("50.00").unwrap();
        assert_eq!(amount.to_string(), "50.00");
    }

    #[test]
    fn test_serialize_as_plain_string() {
        let amount = Amount::from_str("$1,000.50").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"1000.50\"");
    }

    #[test]
    fn test_deserialize() {
        let amount: Amount = serde_json::from_str("\"-25.00\"").unwrap();
        assert_eq!(amount.value(), Decimal::from_str("-25.00").unwrap());
    }

    #[test]
    fn test_cents_round_trip() {
        let amount = Amount::from_cents(1234);
        assert_eq!(amount.as_cents(), Some(1234));
        assert_eq!(amount.to_string(), "12.34");
    }

    #[test]
    fn test_as_cents_rejects_sub_cent_precision() {
        let amount = Amount::from_str("0.005").unwrap();
        assert_eq!(amount.as_cents(), None);
    }

    #[test]
    fn test_round_to_cents_half_away_from_zero() {
        assert_eq!(
            Amount::from_str("2.345").unwrap().round_to_cents(),
            Amount::from_str("2.35").unwrap()
        );
        assert_eq!(
            Amount::from_str("-2.345").unwrap().round_to_cents(),
            Amount::from_str("-2.35").unwrap()
        );
        assert_eq!(
            Amount::from_str("2.344").unwrap().round_to_cents(),
            Amount::from_str("2.34").unwrap()
        );
    }

    #[test]
    fn test_zero_is_not_positive_or_negative() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::ZERO.is_positive());
        assert!(!Amount::ZERO.is_negative());
    }

    #[test]
    fn test_sign_predicates() {
        let positive = Amount::from_str("50.00").unwrap();
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Amount::from_str("-50.00").unwrap();
        assert!(negative.is_negative());
        assert!(!negative.is_positive());
    }

    #[test]
    fn test_epsilon_comparisons() {
        assert!(Amount::from_str("0.009").unwrap() < Amount::EPSILON);
        assert!(Amount::from_str("0.011").unwrap() > Amount::EPSILON);
        assert_eq!(Amount::from_str("0.01").unwrap(), Amount::EPSILON);
    }

    #[test]
    fn test_arithmetic() {
        let a = Amount::from_cents(1050);
        let b = Amount::from_cents(525);
        assert_eq!(a + b, Amount::from_cents(1575));
        assert_eq!(a - b, Amount::from_cents(525));
        assert_eq!(-a, Amount::from_cents(-1050));

        let mut c = Amount::ZERO;
        c += a;
        c -= b;
        assert_eq!(c, Amount::from_cents(525));
    }

    #[test]
    fn test_sum() {
        let amounts = [
            Amount::from_cents(100),
            Amount::from_cents(-250),
            Amount::from_cents(150),
        ];
        let total: Amount = amounts.iter().sum();
        assert_eq!(total, Amount::ZERO);
    }

    #[test]
    fn test_abs() {
        assert_eq!(
            Amount::from_cents(-500).abs(),
            Amount::from_cents(500)
        );
    }

    #[test]
    fn test_ordering() {
        assert!(Amount::from_cents(3000) < Amount::from_cents(5000));
        assert!(Amount::from_cents(-100) < Amount::ZERO);
    }
}
