//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  profit = total_sale - total_cost must hold EXACTLY on every read,     │
//! │  and the dashboard re-computes every order on every request.           │
//! │                                                                         │
//! │  With floats:  28350.0 - (9666.0 + 287.5 + ...) drifts in the last bit │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is i64 cents. Percentages are basis points.            │
//! │    The only rounding happens when a rate is applied, once, to the cent.│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use eterno_core::money::Money;
//!
//! let price = Money::from_major(15750);       // $15750.00
//! let doubled = price.multiply_quantity(2).unwrap(); // $31500.00
//! let advance: Money = "5000.50".parse().unwrap();
//! assert_eq!(advance.cents(), 500_050);
//! assert_eq!(doubled.cents(), 3_150_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a balance goes negative when the advance exceeds the sale
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as a bare integer**: config files and JSON carry cents
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  catalog price ──► subtotal ──► total_sale ──┬──► balance_remaining     │
/// │                                              │                          │
/// │  catalog costs ──► production_cost ──┐       └──► profit               │
/// │                                      ▼                                  │
/// │  advance ──► surcharge_advance ──► total_cost                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use eterno_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Catalog prices and costs are whole amounts, so this is the usual
    /// way to write them down.
    ///
    /// ## Example
    /// ```rust
    /// use eterno_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(4833).cents(), 483_300);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
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

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
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

    /// Applies a basis-point rate and rounds half away from zero to the cent.
    ///
    /// Used for financing surcharges and discount amounts. Returns `None`
    /// when the result does not fit in an `i64`.
    ///
    /// ## Implementation
    /// Integer math in i128: `(amount * bps ± 5000) / 10000`.
    /// The ±5000 is half of the divisor, with the sign of the product, so
    /// a negative balance rounds symmetrically with a positive one.
    ///
    /// ## Example
    /// ```rust
    /// use eterno_core::money::Money;
    ///
    /// let advance = Money::from_major(5000);
    /// // 5000.00 × 5.75% = 287.50
    /// assert_eq!(advance.apply_bps(575).unwrap().cents(), 28_750);
    ///
    /// // 0.10 × 5% = 0.005 → 0.01
    /// assert_eq!(Money::from_cents(10).apply_bps(500).unwrap().cents(), 1);
    /// assert_eq!(Money::from_cents(-10).apply_bps(500).unwrap().cents(), -1);
    /// ```
    pub fn apply_bps(&self, bps: u32) -> Option<Money> {
        let product = self.0 as i128 * bps as i128;
        let rounded = if product >= 0 {
            (product + 5000) / 10000
        } else {
            (product - 5000) / 10000
        };
        i64::try_from(rounded).ok().map(Money)
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use eterno_core::money::Money;
    ///
    /// let unit_price = Money::from_major(13125);
    /// assert_eq!(unit_price.multiply_quantity(3), Some(Money::from_major(39375)));
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Addition that returns `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtraction that returns `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// The discount amount is rounded to the cent first, then subtracted,
    /// so a 100% discount always lands on exactly zero.
    ///
    /// ## Example
    /// ```rust
    /// use eterno_core::money::Money;
    /// use eterno_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_major(31500);
    /// let discounted = subtotal.apply_discount(DiscountRate::from_bps(1000)); // 10% off
    /// assert_eq!(discounted, Some(Money::from_major(28350)));
    /// ```
    pub fn apply_discount(&self, discount: DiscountRate) -> Option<Money> {
        self.checked_sub(self.apply_bps(discount.bps())?)
    }

    /// Ratio of `self` to `whole` as a percentage (for display only).
    ///
    /// Returns `0.0` when `whole` is not positive.
    pub fn percentage_of(&self, whole: Money) -> f64 {
        if !whole.is_positive() {
            return 0.0;
        }
        self.0 as f64 / whole.0 as f64 * 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

/// Parses amounts typed by an operator: `"5000"`, `"5000.5"`, `"-12.34"`.
///
/// At most two decimal places are accepted; anything finer would need
/// rounding, and an amount typed by hand should never be silently changed.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected digits, e.g. 5000 or 5000.50"));
        }
        if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = whole.parse().map_err(|_| invalid("amount too large"))?;
        let minor: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("bad decimals"))? * 10,
            _ => frac.parse().map_err(|_| invalid("bad decimals"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Default money is zero.
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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
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
// Unit Tests
// =============================================================================
