//! # Pricing Engine
//!
//! Turns an order's terms into a revenue / cost / profit breakdown.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  catalog[product] ──► unit_price ──► subtotal = unit_price × qty       │
//! │                   └─► costs[k] × qty ──► production_cost               │
//! │                                                                         │
//! │  subtotal × (1 − discount) ──► total_sale                              │
//! │  total_sale − advance ──────► balance_remaining                        │
//! │                                                                         │
//! │  advance × rate(installments_advance) ──► surcharge_advance            │
//! │  balance × rate(installments_balance) ──► surcharge_balance            │
//! │                                                                         │
//! │  total_cost = production_cost + surcharges                             │
//! │  profit     = total_sale − total_cost                                  │
//! │  margin     = profit / total_sale × 100   (0 when total_sale is 0)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The financing surcharge is a cost to the studio (the card processor
//! keeps it), so it lowers profit rather than raising the sale.
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use eterno_core::config::PricingConfig;
//! use eterno_core::money::Money;
//! use eterno_core::pricing::compute_breakdown;
//! use eterno_core::types::OrderTerms;
//!
//! let config = PricingConfig::default();
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//!
//! let breakdown = compute_breakdown(&config, &OrderTerms::new("Large", 1), today).unwrap();
//! assert_eq!(breakdown.profit, Money::from_major(10917));
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::balance::{is_balance_pending, BalanceStatus};
use crate::config::PricingConfig;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CostCategory, OrderTerms};

/// Computed figures for one order. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub unit_price: Money,
    pub subtotal: Money,
    /// Subtotal after discount.
    pub total_sale: Money,
    pub advance: Money,
    /// `total_sale - advance`; negative when the advance overshoots.
    pub balance_remaining: Money,
    /// Per-category cost, already scaled by quantity.
    pub production_costs: BTreeMap<CostCategory, Money>,
    pub production_cost: Money,
    pub surcharge_advance: Money,
    pub surcharge_balance: Money,
    pub total_surcharge: Money,
    /// Production cost plus all surcharges.
    pub total_cost: Money,
    pub profit: Money,
    /// Percent of `total_sale` (display only).
    pub profit_margin_pct: f64,
    /// What is left of the advance after paying for production and the
    /// advance's own financing fee.
    pub available_from_advance: Money,
    pub balance_pending: bool,
    pub balance_status: BalanceStatus,
}

/// Computes the breakdown for one order.
///
/// ## Errors
/// Checked in this order, returning on the first failure:
/// - `UnknownProduct` - product not in the catalog
/// - `InvalidQuantity` - quantity is zero or negative
/// - `InvalidDiscount` - discount above 100%
/// - `AmountOverflow` - an intermediate amount leaves the `i64` cent range
///   (only reachable with absurd quantities or advances)
///
/// An installment count with no tier is NOT an error; it costs 0%.
///
/// ## Determinism
/// Reads only its arguments. `today` is passed in instead of read from
/// the clock so the same inputs always give the same breakdown.
pub fn compute_breakdown(
    config: &PricingConfig,
    terms: &OrderTerms,
    today: NaiveDate,
) -> CoreResult<Breakdown> {
    let product = config.product(&terms.product)?;

    if terms.quantity <= 0 {
        return Err(CoreError::InvalidQuantity {
            quantity: terms.quantity,
        });
    }

    if !terms.discount.is_valid() {
        return Err(CoreError::InvalidDiscount {
            value: format!("{}%", terms.discount.percentage()),
        });
    }

    let quantity = terms.quantity;
    let unit_price = product.price;
    let overflow = |field: &str| CoreError::AmountOverflow {
        field: field.to_string(),
    };

    let production_costs = product
        .costs
        .iter()
        .map(|(category, cost)| {
            cost.multiply_quantity(quantity)
                .map(|scaled| (*category, scaled))
                .ok_or_else(|| overflow("production_cost"))
        })
        .collect::<CoreResult<BTreeMap<CostCategory, Money>>>()?;
    let production_cost = production_costs
        .values()
        .try_fold(Money::zero(), |acc, cost| acc.checked_add(*cost))
        .ok_or_else(|| overflow("production_cost"))?;

    let subtotal = unit_price
        .multiply_quantity(quantity)
        .ok_or_else(|| overflow("subtotal"))?;
    let total_sale = subtotal
        .apply_discount(terms.discount)
        .ok_or_else(|| overflow("total_sale"))?;
    let balance_remaining = total_sale
        .checked_sub(terms.advance)
        .ok_or_else(|| overflow("balance_remaining"))?;

    let surcharge_advance = config
        .financing
        .rate(terms.installments_advance)
        .apply(terms.advance)
        .ok_or_else(|| overflow("surcharge_advance"))?;
    let surcharge_balance = config
        .financing
        .rate(terms.installments_balance)
        .apply(balance_remaining)
        .ok_or_else(|| overflow("surcharge_balance"))?;
    let total_surcharge = surcharge_advance
        .checked_add(surcharge_balance)
        .ok_or_else(|| overflow("total_surcharge"))?;

    let total_cost = production_cost
        .checked_add(total_surcharge)
        .ok_or_else(|| overflow("total_cost"))?;
    let profit = total_sale
        .checked_sub(total_cost)
        .ok_or_else(|| overflow("profit"))?;
    let profit_margin_pct = profit.percentage_of(total_sale);

    let available_from_advance = terms
        .advance
        .checked_sub(production_cost)
        .and_then(|left| left.checked_sub(surcharge_advance))
        .ok_or_else(|| overflow("available_from_advance"))?;

    let balance_pending = is_balance_pending(
        balance_remaining,
        terms.balance_paid,
        terms.session_date,
        today,
    );
    let balance_status = if balance_pending {
        BalanceStatus::Pending
    } else {
        BalanceStatus::Settled
    };

    Ok(Breakdown {
        unit_price,
        subtotal,
        total_sale,
        advance: terms.advance,
        balance_remaining,
        production_costs,
        production_cost,
        surcharge_advance,
        surcharge_balance,
        total_surcharge,
        total_cost,
        profit,
        profit_margin_pct,
        available_from_advance,
        balance_pending,
        balance_status,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
