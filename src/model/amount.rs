//! Amount type for handling monetary values with an optional currency sign.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! parsing values that may or may not include a `฿` sign and thousands separators.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

/// The currency sign used when none is configured.
pub const DEFAULT_CURRENCY: &str = "฿";

/// Amounts must stay below this magnitude to be recorded. They are stored as JSON numbers, and up
/// to here, with at most [`MAX_DECIMAL_PLACES`], they read back exactly.
pub const AMOUNT_LIMIT: i64 = 10_000_000_000_000;

/// The most decimal places a recorded amount may have.
pub const MAX_DECIMAL_PLACES: u32 = 2;

/// Represents an amount of money.
///
/// Amounts are stored in the JSON data as plain numbers, e.g. `45000` or `12.5`, so that the
/// data stays readable by other tools. When printed they are formatted with thousands separators
/// and two decimal places.
///
/// # Examples
///
/// ```
/// # use budget_flow::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("฿1,250.5").unwrap();
/// assert_eq!(amount.to_string(), "฿1,250.50");
/// assert_eq!(amount.display_with("$"), "$1,250.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value().is_sign_negative()
    }

    /// Returns true if the amount can be stored and read back without change, i.e. its magnitude
    /// is below [`AMOUNT_LIMIT`] and it has no more than [`MAX_DECIMAL_PLACES`].
    pub fn is_storable(&self) -> bool {
        self.value().abs() < Decimal::from(AMOUNT_LIMIT)
            && self.value().normalize().scale() <= MAX_DECIMAL_PLACES
    }

    /// Parses an amount that may start with `currency`, the inverse of [`Amount::display_with`].
    /// Thousands separators are ignored.
    pub fn parse_with(s: &str, currency: &str) -> Result<Self, AmountError> {
        let trimmed = s.trim();

        // Strip the currency sign, which may come after a minus sign: "-฿50" or "฿50"
        let without_sign = match trimmed.strip_prefix('-') {
            Some(after_minus) => format!("-{}", strip_currency(after_minus, currency)),
            None => strip_currency(trimmed, currency).to_string(),
        };

        let without_commas = without_sign.replace(',', "");
        let value = Decimal::from_str(without_commas.trim()).map_err(AmountError)?;
        Ok(Amount(value))
    }

    /// Formats the amount using `currency` as the sign, e.g. `-$1,000.00`.
    pub fn display_with(&self, currency: &str) -> String {
        let (sign, num) = if self.is_negative() {
            ("-", self.value().abs())
        } else {
            ("", self.value())
        };
        format!(
            "{sign}{currency}{}",
            format_num::format_num!(",.2", num.to_f64().unwrap_or_default())
        )
    }
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse_with(s, DEFAULT_CURRENCY)
    }
}

fn strip_currency<'a>(s: &'a str, currency: &str) -> &'a str {
    if currency.is_empty() {
        return s;
    }
    s.strip_prefix(currency).unwrap_or(s)
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with(DEFAULT_CURRENCY))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        rust_decimal::serde::float::deserialize(deserializer).map(Amount)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

// Sums saturate at the bounds of `Decimal` instead of panicking.

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Amount {
        iter.copied().sum()
    }
}
