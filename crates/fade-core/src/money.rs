//! # Money Module
//!
//! Provides the `Money` and `Rate` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a payroll system that is someone's wages:                           │
//! │    1000.00 × 33.33% summed over a year drifts by whole cents            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Revenue, commissions, rents and adjustments are all i64 cents.       │
//! │    Rounding to a whole cent happens exactly ONCE per derived figure,    │
//! │    at the single rate multiplication - never at intermediate sums.      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Monetary fields serialize as fixed-point decimal strings with exactly two
//! fractional digits (`"510.00"`); rates serialize as percent strings with
//! two fractional digits (`"50.00"`). Internally nothing ever leaves integer
//! arithmetic.
//!
//! ## Usage
//! ```rust
//! use fade_core::money::{Money, Rate};
//!
//! // Create from cents (preferred)
//! let revenue = Money::from_cents(100_000); // 1000.00
//!
//! // Apply a commission rate
//! let commission = revenue.apply_rate(Rate::from_bps(5000)); // 50%
//! assert_eq!(commission.cents(), 50_000);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(10.99); // NO SUCH METHOD EXISTS!
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values - a net payable can go below
///   zero when adjustments exceed the gross commission
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Transparent sqlx derive**: Repositories bind/decode it as a plain
///   INTEGER column
///
/// ## Where Money Flows
/// ```text
/// SaleLine.subtotal ──► RevenueTotals ──► CommissionBreakdown ──► Calculation
///                                              │
///          Adjustment.amount ──► net total ────┘──► net_payable
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use fade_core::money::Money;
    ///
    /// let rent = Money::from_cents(30_000); // 300.00
    /// assert_eq!(rent.cents(), 30_000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the larger of two Money values.
    ///
    /// ## Example
    /// ```rust
    /// use fade_core::money::Money;
    ///
    /// // Chair-rent commission floors at zero:
    /// let kept = (Money::from_cents(25_000) - Money::from_cents(30_000))
    ///     .max(Money::zero());
    /// assert_eq!(kept, Money::zero());
    /// ```
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// Applies a rate (in basis points) and rounds to a whole cent.
    ///
    /// ## Rounding
    /// Half-up rounding at the single multiplication:
    /// `(cents × bps + 5000) / 10000`. This is the ONLY place a derived
    /// monetary figure is rounded; sums of already-rounded figures stay
    /// exact.
    ///
    /// ## Example
    /// ```rust
    /// use fade_core::money::{Money, Rate};
    ///
    /// let products = Money::from_cents(20_000);    // 200.00
    /// let commission = products.apply_rate(Rate::from_bps(3000)); // 30%
    /// assert_eq!(commission.cents(), 6_000);       // 60.00
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // i128 to prevent overflow on large amounts
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use fade_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(4_500); // 45.00 haircut
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.cents(), 9_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Formats the value as a fixed-point decimal with two fractional
    /// digits and no currency symbol - the wire representation.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }

    /// Parses a fixed-point decimal string ("510.00", "-5.5", "300").
    ///
    /// At most two fractional digits are accepted; a single digit means
    /// tenths ("5.5" = 5.50).
    pub fn parse_decimal(s: &str) -> Result<Self, ParseMoneyError> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((maj, min)) => (maj, min),
            None => (digits, ""),
        };

        if major_str.is_empty() || !major_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseMoneyError(s.to_string()));
        }
        if minor_str.len() > 2 || !minor_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseMoneyError(s.to_string()));
        }

        let major: i64 = major_str.parse().map_err(|_| ParseMoneyError(s.to_string()))?;
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| ParseMoneyError(s.to_string()))? * 10,
            _ => minor_str.parse().map_err(|_| ParseMoneyError(s.to_string()))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| ParseMoneyError(s.to_string()))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Error parsing a decimal money or rate string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fixed-point decimal: '{0}'")]
pub struct ParseMoneyError(String);

// =============================================================================
// Money Trait Implementations
// =============================================================================

/// Display shows the wire format: two fractional digits, no symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
    }
}

/// Serializes as a two-fractional-digit decimal string ("510.00").
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a fixed-point decimal string like \"510.00\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                Money::parse_decimal(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(MoneyVisitor)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 5000 bps = 50% (a typical service commission split)
///
/// Keeping rates as integers means a 50% commission on 1000.00 is an exact
/// integer multiplication, not a float round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Formats the rate as a percent string with two fractional digits.
    pub fn to_percent_string(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }

    /// Parses a percent string ("50.00", "8.25", "30") into basis points.
    pub fn parse_percent(s: &str) -> Result<Self, ParseMoneyError> {
        let hundredths = Money::parse_decimal(s)?.cents();
        let bps = u32::try_from(hundredths).map_err(|_| ParseMoneyError(s.to_string()))?;
        Ok(Rate(bps))
    }
}

/// Display shows the percent wire format ("50.00").
impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_percent_string())
    }
}

impl FromStr for Rate {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rate::parse_percent(s)
    }
}

/// Serializes as a two-fractional-digit percent string ("50.00").
impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_percent_string())
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RateVisitor;

        impl Visitor<'_> for RateVisitor {
            type Value = Rate;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a percent string like \"50.00\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Rate, E> {
                Rate::parse_percent(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(RateVisitor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.cents(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display_wire_format() {
        assert_eq!(Money::from_cents(51_000).to_string(), "510.00");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((b - a).cents(), -500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 7]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 357);
    }

    #[test]
    fn test_apply_rate_exact() {
        // 1000.00 at 50% = 500.00
        let revenue = Money::from_cents(100_000);
        assert_eq!(revenue.apply_rate(Rate::from_bps(5000)).cents(), 50_000);

        // 200.00 at 30% = 60.00
        let products = Money::from_cents(20_000);
        assert_eq!(products.apply_rate(Rate::from_bps(3000)).cents(), 6_000);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // 10.00 at 8.25% = 0.825 → 0.83
        let amount = Money::from_cents(1000);
        assert_eq!(amount.apply_rate(Rate::from_bps(825)).cents(), 83);

        // 0.01 at 50% = 0.005 → 0.01
        assert_eq!(Money::from_cents(1).apply_rate(Rate::from_bps(5000)).cents(), 1);
    }

    #[test]
    fn test_max_floors_at_zero() {
        let shortfall = Money::from_cents(25_000) - Money::from_cents(30_000);
        assert!(shortfall.is_negative());
        assert_eq!(shortfall.max(Money::zero()), Money::zero());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("510.00").unwrap().cents(), 51_000);
        assert_eq!(Money::parse_decimal("5.5").unwrap().cents(), 550);
        assert_eq!(Money::parse_decimal("300").unwrap().cents(), 30_000);
        assert_eq!(Money::parse_decimal("-5.50").unwrap().cents(), -550);
        assert_eq!(Money::parse_decimal("0.07").unwrap().cents(), 7);

        assert!(Money::parse_decimal("").is_err());
        assert!(Money::parse_decimal("abc").is_err());
        assert!(Money::parse_decimal("1.234").is_err());
        assert!(Money::parse_decimal("1,50").is_err());
        assert!(Money::parse_decimal(".50").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let money = Money::from_cents(51_000);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "\"510.00\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }

    #[test]
    fn test_rate_basics() {
        let rate = Rate::from_bps(5000);
        assert_eq!(rate.bps(), 5000);
        assert!((rate.percentage() - 50.0).abs() < 0.001);
        assert_eq!(rate.to_string(), "50.00");

        assert_eq!(Rate::from_percentage(8.25).bps(), 825);
    }

    #[test]
    fn test_rate_serde_round_trip() {
        let rate = Rate::from_bps(825);
        let json = serde_json::to_string(&rate).unwrap();
        assert_eq!(json, "\"8.25\"");
        let back: Rate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rate);
    }

    #[test]
    fn test_rate_parse_rejects_negative() {
        assert!(Rate::parse_percent("-5.00").is_err());
        assert_eq!(Rate::parse_percent("30").unwrap().bps(), 3000);
    }
}
