//! # Domain Types
//!
//! Core domain types used throughout Eterno.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderRecord   │   │   OrderTerms    │   │  CostCategory   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (auto)      │──►│  product        │   │  Framing        │       │
//! │  │  order_date     │   │  quantity       │   │  Printing       │       │
//! │  │  client         │   │  discount       │   │  Drytac         │       │
//! │  │  created_at     │   │  advance        │   │  Acrylic        │       │
//! │  └─────────────────┘   │  installments×2 │   │  Mounting       │       │
//! │                        │  session_date   │   │  Paper          │       │
//! │  ┌─────────────────┐   │  balance_paid   │   └─────────────────┘       │
//! │  │  DiscountRate   │   └─────────────────┘                              │
//! │  │  SurchargeRate  │                                                    │
//! │  │  bps (u32)      │   ┌─────────────────┐                              │
//! │  │  575 = 5.75%    │   │   DateRange     │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `OrderTerms` is everything the pricing engine reads. `OrderRecord` is the
//! stored row: the terms plus who/when bookkeeping.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// 100% in basis points.
pub const FULL_BPS: u32 = 10_000;

// =============================================================================
// Discount Rate
// =============================================================================

/// Order discount in basis points (1000 = 10% off).
///
/// ## Why Basis Points?
/// The discount is entered as a percentage on the order form and stored as a
/// fraction. Basis points keep it an integer so the discounted sale is exact.
///
/// `from_bps` does not check the range (rows read back from storage go
/// through it); the pricing engine rejects anything above 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount from a fraction (0 = no discount, 1 = 100% off).
    ///
    /// ## Example
    /// ```rust
    /// use eterno_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_fraction(0.10).unwrap().bps(), 1000);
    /// assert!(DiscountRate::from_fraction(1.5).is_err());
    /// assert!(DiscountRate::from_fraction(-0.1).is_err());
    /// ```
    pub fn from_fraction(fraction: f64) -> CoreResult<Self> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(CoreError::InvalidDiscount {
                value: fraction.to_string(),
            });
        }
        Ok(DiscountRate((fraction * FULL_BPS as f64).round() as u32))
    }

    /// Creates a discount from a percentage as typed on the order form (10 = 10%).
    pub fn from_percent(pct: f64) -> CoreResult<Self> {
        Self::from_fraction(pct / 100.0).map_err(|_| CoreError::InvalidDiscount {
            value: format!("{}%", pct),
        })
    }

    /// Returns the discount in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the discount as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / FULL_BPS as f64
    }

    /// Returns the discount as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// True when the discount is within 0%..=100%.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 <= FULL_BPS
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Surcharge Rate
// =============================================================================

/// Financing surcharge in basis points (575 = 5.75% of the financed amount).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurchargeRate(u32);

impl SurchargeRate {
    /// Creates a surcharge rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        SurchargeRate(bps)
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

    /// Zero surcharge (cash, or an installment count with no tier).
    #[inline]
    pub const fn zero() -> Self {
        SurchargeRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Surcharge owed on a financed amount, or `None` if it overflows.
    #[inline]
    pub fn apply(&self, amount: Money) -> Option<Money> {
        amount.apply_bps(self.0)
    }
}

impl Default for SurchargeRate {
    fn default() -> Self {
        SurchargeRate::zero()
    }
}

// =============================================================================
// Cost Category
// =============================================================================

/// Production cost categories for one framed print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    /// Frame and framing labor.
    Framing,
    /// Print on photo paper.
    Printing,
    /// Dry-mount adhesive film.
    Drytac,
    /// Acrylic face.
    Acrylic,
    /// Mounting labor.
    Mounting,
    /// Paper stock.
    Paper,
}

impl CostCategory {
    /// Every category, in report column order.
    pub const ALL: [CostCategory; 6] = [
        CostCategory::Framing,
        CostCategory::Printing,
        CostCategory::Drytac,
        CostCategory::Acrylic,
        CostCategory::Mounting,
        CostCategory::Paper,
    ];

    /// Config/report key for the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CostCategory::Framing => "framing",
            CostCategory::Printing => "printing",
            CostCategory::Drytac => "drytac",
            CostCategory::Acrylic => "acrylic",
            CostCategory::Mounting => "mounting",
            CostCategory::Paper => "paper",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order Terms
// =============================================================================

/// Everything the pricing engine reads from an order.
///
/// `installments_*` of 0 means "not financed". A count that has no tier in
/// the financing table is accepted and priced as 0% surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTerms {
    /// Catalog product name (exact match).
    pub product: String,
    /// Units ordered; must be positive.
    pub quantity: i64,
    /// Discount on the subtotal.
    #[serde(default)]
    pub discount: DiscountRate,
    /// Advance collected at order time.
    #[serde(default)]
    pub advance: Money,
    /// Installments the advance was financed in.
    #[serde(default)]
    pub installments_advance: u32,
    /// Installments the balance will be financed in.
    #[serde(default)]
    pub installments_balance: u32,
    /// Date of the photo session, if scheduled.
    #[serde(default)]
    pub session_date: Option<NaiveDate>,
    /// Balance explicitly marked as collected.
    #[serde(default)]
    pub balance_paid: bool,
}

impl OrderTerms {
    /// Terms for a cash order with no advance, discount or session date.
    pub fn new(product: impl Into<String>, quantity: i64) -> Self {
        OrderTerms {
            product: product.into(),
            quantity,
            discount: DiscountRate::zero(),
            advance: Money::zero(),
            installments_advance: 0,
            installments_balance: 0,
            session_date: None,
            balance_paid: false,
        }
    }

    /// Sets the discount.
    pub fn with_discount(mut self, discount: DiscountRate) -> Self {
        self.discount = discount;
        self
    }

    /// Sets the advance and the installments it was financed in.
    pub fn with_advance(mut self, advance: Money, installments: u32) -> Self {
        self.advance = advance;
        self.installments_advance = installments;
        self
    }

    /// Sets the installments for the balance.
    pub fn with_balance_installments(mut self, installments: u32) -> Self {
        self.installments_balance = installments;
        self
    }

    /// Sets the session date.
    pub fn with_session_date(mut self, date: NaiveDate) -> Self {
        self.session_date = Some(date);
        self
    }

    /// Marks the balance as collected.
    pub fn paid(mut self) -> Self {
        self.balance_paid = true;
        self
    }
}

// =============================================================================
// New Order / Order Record
// =============================================================================

/// An order about to be stored (insert or full update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Date the order was taken.
    pub order_date: NaiveDate,
    /// Customer name.
    pub client: String,
    /// Pricing inputs.
    pub terms: OrderTerms,
}

/// A stored order row.
///
/// Amounts are kept as raw cents / bps so the row maps 1:1 onto the table;
/// use [`OrderRecord::terms`] to get typed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderRecord {
    pub id: i64,
    pub order_date: NaiveDate,
    pub client: String,
    pub product: String,
    pub quantity: i64,
    /// Discount in basis points (1000 = 10%).
    pub discount_bps: u32,
    /// Advance in cents.
    pub advance_cents: i64,
    pub installments_advance: u32,
    pub installments_balance: u32,
    pub session_date: Option<NaiveDate>,
    pub balance_paid: bool,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Returns the pricing inputs of this row.
    pub fn terms(&self) -> OrderTerms {
        OrderTerms {
            product: self.product.clone(),
            quantity: self.quantity,
            discount: DiscountRate::from_bps(self.discount_bps),
            advance: self.advance(),
            installments_advance: self.installments_advance,
            installments_balance: self.installments_balance,
            session_date: self.session_date,
            balance_paid: self.balance_paid,
        }
    }

    /// Returns the advance as Money.
    #[inline]
    pub fn advance(&self) -> Money {
        Money::from_cents(self.advance_cents)
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// Inclusive order-date filter; either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Unbounded range.
    pub const fn all() -> Self {
        DateRange {
            from: None,
            to: None,
        }
    }

    /// Range with the given optional bounds.
    pub const fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        DateRange { from, to }
    }

    /// Checks whether a date falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
