//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE SPLITTING PROBLEM                                                  │
//! │                                                                         │
//! │  With floating point shares:                                            │
//! │    $10.00 / 3 = 3.3333333333333335 each → drift nobody can settle      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + explicit leftover                        │
//! │    1000 cents / 3 = 333 cents, leftover 1 cent                         │
//! │    → shares 334 / 333 / 333, sum is exactly 1000                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The receipt service speaks JSON numbers in dollars (`20.0`). The
//! [`dollars`] and [`dollars_opt`] serde adapters convert at that boundary
//! and nowhere else. Incoming amounts are rounded to the nearest whole cent
//! (`0.125` loads as 13 cents) and must lie within [`Money::MAX_AMOUNT`].
//!
//! ## Usage
//! ```rust
//! use fairshare_core::money::Money;
//!
//! let pizza = Money::from_cents(2000); // $20.00
//! let shares = pizza.split_even(3, 0);
//! assert_eq!(shares, vec![
//!     Money::from_cents(667),
//!     Money::from_cents(667),
//!     Money::from_cents(666),
//! ]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: receipts carry discounts and refunds as negative lines
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Default serde**: plain integer cents (used by allocation results)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted from outside the engine ($100 billion).
    ///
    /// Receipt amounts loaded from JSON or parsed from text beyond this are
    /// rejected, which keeps every sum over a receipt far from `i64` overflow.
    pub const MAX_AMOUNT: Money = Money(10_000_000_000_000);

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use fairshare_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Converts a wire amount in dollars to cents, rounding to the nearest
    /// cent (halves away from zero).
    ///
    /// Only the JSON boundary should call this. Returns `None` for NaN,
    /// infinities and magnitudes above [`Money::MAX_AMOUNT`].
    pub fn from_wire_dollars(dollars: f64) -> Option<Self> {
        if !dollars.is_finite() {
            return None;
        }
        let cents = (dollars * 100.0).round();
        if cents.abs() > Money::MAX_AMOUNT.0 as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Converts to a wire amount in dollars.
    pub fn to_wire_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parses a printed amount such as `12.34`, `$12.34`, `-4.5` or `7`.
    ///
    /// Receipt text is parsed digit by digit so no float ever touches the
    /// value. At most two decimal places are accepted, and the magnitude may
    /// not exceed [`Money::MAX_AMOUNT`].
    ///
    /// ## Example
    /// ```rust
    /// use fairshare_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("$12.34").unwrap().cents(), 1234);
    /// assert_eq!(Money::parse_decimal("-4.5").unwrap().cents(), -450);
    /// assert!(Money::parse_decimal("12.345").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let (major, minor) = rest.split_once('.').unwrap_or((rest, ""));

        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }
        if minor.len() > 2 || !minor.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected at most two decimal digits"));
        }

        let major: i64 = major.parse().map_err(|_| invalid("amount is too large"))?;
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("bad decimal digits"))? * 10,
            _ => minor.parse().map_err(|_| invalid("bad decimal digits"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .filter(|c| *c <= Money::MAX_AMOUNT.0)
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Splits this amount into `parts` shares that sum back to it exactly.
    ///
    /// Every share gets `floor(amount / parts)` cents. The leftover cents
    /// (`amount mod parts`, always in `0..parts`) go one each to the shares
    /// starting at index `rotation % parts` and wrapping around. Rotating the
    /// start per line item keeps the leftover cents from always landing on the
    /// first participant.
    ///
    /// Returns an empty vector when `parts` is zero.
    ///
    /// ## Example
    /// ```rust
    /// use fairshare_core::money::Money;
    ///
    /// let ten = Money::from_cents(1000);
    /// let shares = ten.split_even(3, 1);
    /// assert_eq!(shares, vec![
    ///     Money::from_cents(333),
    ///     Money::from_cents(334),
    ///     Money::from_cents(333),
    /// ]);
    /// ```
    pub fn split_even(&self, parts: usize, rotation: usize) -> Vec<Money> {
        if parts == 0 {
            return Vec::new();
        }

        let divisor = parts as i64;
        let base = self.0.div_euclid(divisor);
        let leftover = self.0.rem_euclid(divisor) as usize;
        let start = rotation % parts;

        (0..parts)
            .map(|index| {
                let offset = (index + parts - start) % parts;
                if offset < leftover {
                    Money(base + 1)
                } else {
                    Money(base)
                }
            })
            .collect()
    }
}

/// Renders an optional receipt figure, `"N/A"` when the receipt lacks it.
///
/// Absent subtotal/tax/total are "not available", never `$0.00`.
pub fn format_optional(amount: Option<Money>) -> String {
    match amount {
        Some(amount) => amount.to_string(),
        None => "N/A".to_string(),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde Adapters (wire dollars)
// =============================================================================

/// Serde adapter for a required amount carried as JSON dollars.
///
/// ```rust,ignore
/// #[serde(with = "crate::money::dollars")]
/// pub total_price: Money,
/// ```
pub mod dollars {
    use super::Money;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(amount.to_wire_dollars())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_wire_dollars(value)
            .ok_or_else(|| D::Error::custom(format!("invalid amount: {}", value)))
    }
}

/// Serde adapter for an optional amount; `null` and a missing field are `None`.
pub mod dollars_opt {
    use super::Money;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        amount: &Option<Money>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match amount {
            Some(amount) => serializer.serialize_some(&amount.to_wire_dollars()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Money>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(|value| {
                Money::from_wire_dollars(value)
                    .ok_or_else(|| D::Error::custom(format!("invalid amount: {}", value)))
            })
            .transpose()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
