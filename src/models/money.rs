//! Money type for representing currency amounts
//!
//! Amounts are stored as integer cents so that running balances never drift;
//! conversion to floating point happens only at the plotting edge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

use thiserror::Error;

/// A monetary amount in cents (hundredths of the currency unit)
///
/// Arithmetic saturates at the `i64` bounds rather than wrapping or panicking.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

/// Error returned by [`Money::parse`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid money format: {0}")]
pub struct MoneyParseError(pub String);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use banker::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_major_units(), 10.5);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// The amount in whole currency units, for plotting
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Nearest whole-cent amount for a value in major units
    pub fn from_major_units(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "10.50", "-10.50", "$10.50", "-$10.50", "(10.50)", "1,234.5"
    /// and "10". Anything past two decimal places is truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError(s.to_string());
        let trimmed = s.trim();

        // Accounting style "(12.00)" means negative
        let (mut negative, body) = match trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Some(inner) => (true, inner.trim()),
            None => (false, trimmed),
        };

        let body = match body.strip_prefix('-') {
            Some(rest) => {
                negative = !negative;
                rest
            }
            None => body,
        };
        let body: String = body
            .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-')
            .chars()
            .filter(|c| *c != ',')
            .collect();
        // "$-5.00"
        let body = match body.strip_prefix('-') {
            Some(rest) => {
                negative = !negative;
                rest.to_string()
            }
            None => body,
        };

        if body.is_empty() {
            return Err(invalid());
        }

        let (whole, frac) = match body.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (body.as_str(), ""),
        };

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        if !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac[..2].parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol, e.g. "-€12.30"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
        assert_eq!(Money::from_cents(123456).format_with_symbol("€"), "€1234.56");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("-$10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("$-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("(12.00)").unwrap().cents(), -1200);
        assert_eq!(Money::parse("1,234.5").unwrap().cents(), 123450);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("0.059").unwrap().cents(), 5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("$").is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);

        assert_eq!((a + b).cents(), 1250);
        assert_eq!((a - b).cents(), 750);
        assert_eq!((-a).cents(), -1000);

        let total: Money = vec![a, b, -b].into_iter().sum();
        assert_eq!(total, a);
    }

    #[test]
    fn test_arithmetic_saturates_at_bounds() {
        let huge = Money::parse("90000000000000000.00").unwrap();

        assert_eq!(huge + huge, Money::from_cents(i64::MAX));
        assert_eq!(-huge - huge, Money::from_cents(i64::MIN));
        assert_eq!(-Money::from_cents(i64::MIN), Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MIN).abs(), Money::from_cents(i64::MAX));

        let mut running = huge;
        running += huge;
        assert_eq!(running.cents(), i64::MAX);

        let total: Money = vec![huge, huge, -huge].into_iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX - huge.cents()));
    }

    #[test]
    fn test_to_major_units() {
        assert_eq!(Money::from_cents(-2550).to_major_units(), -25.5);
        assert_eq!(Money::zero().to_major_units(), 0.0);
        assert_eq!(Money::from_major_units(10.456).cents(), 1046);
        assert_eq!(Money::from_major_units(-0.5).cents(), -50);
    }
}
