//! # Dashboard Summary
//!
//! Aggregates priced orders into the totals shown on the dashboard.
//!
//! ```text
//!  OrderRecord ──► compute_breakdown ──► PricedOrder ─┐
//!  OrderRecord ──► compute_breakdown ──► PricedOrder ─┼──► DashboardSummary
//!  OrderRecord ──► compute_breakdown ──► PricedOrder ─┘
//! ```
//!
//! Like [`Breakdown`], the summary is derived and never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::PricingConfig;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{compute_breakdown, Breakdown};
use crate::types::OrderRecord;

/// A stored order together with its computed breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedOrder {
    pub record: OrderRecord,
    pub breakdown: Breakdown,
}

impl PricedOrder {
    /// Prices a stored order.
    pub fn price(config: &PricingConfig, record: OrderRecord, today: NaiveDate) -> CoreResult<Self> {
        let breakdown = compute_breakdown(config, &record.terms(), today)?;
        Ok(PricedOrder { record, breakdown })
    }
}

/// Totals for a single product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTotals {
    pub units: i64,
    pub sales: Money,
    pub profit: Money,
}

/// Aggregate figures over a set of orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub order_count: usize,
    pub total_sales: Money,
    pub total_costs: Money,
    pub total_profit: Money,
    /// `total_profit / total_sales`, in percent; 0 when there are no sales.
    pub average_margin_pct: f64,
    /// Keyed by product name.
    pub by_product: BTreeMap<String, ProductTotals>,
    /// Orders whose balance is still to be collected.
    pub pending_count: usize,
    /// Sum of the outstanding balances of pending orders.
    pub pending_balance_total: Money,
}

impl DashboardSummary {
    /// Folds `(record, breakdown)` pairs into a summary.
    ///
    /// An empty iterator gives an all-zero summary. Fails with
    /// `AmountOverflow` if a running total leaves the cent range.
    pub fn from_breakdowns<'a, I>(orders: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (&'a OrderRecord, &'a Breakdown)>,
    {
        let mut summary = DashboardSummary::default();

        for (record, breakdown) in orders {
            summary.order_count += 1;
            add_to(&mut summary.total_sales, breakdown.total_sale, "total_sales")?;
            add_to(&mut summary.total_costs, breakdown.total_cost, "total_costs")?;
            add_to(&mut summary.total_profit, breakdown.profit, "total_profit")?;

            let product = summary.by_product.entry(record.product.clone()).or_default();
            product.units = product
                .units
                .checked_add(record.quantity)
                .ok_or_else(|| overflow("units"))?;
            add_to(&mut product.sales, breakdown.total_sale, "sales")?;
            add_to(&mut product.profit, breakdown.profit, "profit")?;

            if breakdown.balance_pending {
                summary.pending_count += 1;
                add_to(
                    &mut summary.pending_balance_total,
                    breakdown.balance_remaining,
                    "pending_balance_total",
                )?;
            }
        }

        summary.average_margin_pct = summary.total_profit.percentage_of(summary.total_sales);
        Ok(summary)
    }

    /// Summarizes already priced orders.
    pub fn from_priced(orders: &[PricedOrder]) -> CoreResult<Self> {
        Self::from_breakdowns(orders.iter().map(|o| (&o.record, &o.breakdown)))
    }
}

fn overflow(field: &str) -> CoreError {
    CoreError::AmountOverflow {
        field: field.to_string(),
    }
}

fn add_to(total: &mut Money, amount: Money, field: &str) -> CoreResult<()> {
    *total = total.checked_add(amount).ok_or_else(|| overflow(field))?;
    Ok(())
}

/// Prices every record and aggregates the results.
///
/// Stops at the first record that fails to price (e.g. a product that was
/// removed from the catalog after the order was stored).
pub fn summarize(
    config: &PricingConfig,
    records: Vec<OrderRecord>,
    today: NaiveDate,
) -> CoreResult<(Vec<PricedOrder>, DashboardSummary)> {
    let priced = records
        .into_iter()
        .map(|record| PricedOrder::price(config, record, today))
        .collect::<CoreResult<Vec<_>>>()?;

    let summary = DashboardSummary::from_priced(&priced)?;
    Ok((priced, summary))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn record(id: i64, product: &str, quantity: i64, advance: Money) -> OrderRecord {
        OrderRecord {
            id,
            order_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            client: format!("Client {id}"),
            product: product.to_string(),
            quantity,
            discount_bps: 0,
            advance_cents: advance.cents(),
            installments_advance: 0,
            installments_balance: 0,
            session_date: None,
            balance_paid: false,
            created_at: Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_summary() {
        let (priced, summary) = summarize(&PricingConfig::default(), vec![], today()).unwrap();
        assert!(priced.is_empty());
        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.total_sales, Money::zero());
        assert_eq!(summary.average_margin_pct, 0.0);
        assert!(summary.by_product.is_empty());
    }

    #[test]
    fn test_summary_totals() {
        let records = vec![
            record(1, "Large", 1, Money::zero()),
            record(2, "Small", 2, Money::from_major(26250)),
            record(3, "Large", 2, Money::from_major(1000)),
        ];
        let (priced, summary) = summarize(&PricingConfig::default(), records, today()).unwrap();

        assert_eq!(priced.len(), 3);
        assert_eq!(summary.order_count, 3);
        assert_eq!(summary.total_sales, Money::from_major(15750 + 26250 + 31500));
        assert_eq!(summary.total_costs, Money::from_major(4833 + 7522 + 9666));
        assert_eq!(
            summary.total_profit,
            summary.total_sales - summary.total_costs
        );

        let large = summary.by_product["Large"];
        assert_eq!(large.units, 3);
        assert_eq!(large.sales, Money::from_major(47250));

        let small = summary.by_product["Small"];
        assert_eq!(small.units, 2);
        assert_eq!(small.profit, Money::from_major(26250 - 7522));

        // Small is fully paid up front
        assert_eq!(summary.pending_count, 2);
        assert_eq!(
            summary.pending_balance_total,
            Money::from_major(15750 + 30500)
        );
    }

    #[test]
    fn test_average_margin_is_weighted() {
        let records = vec![
            record(1, "Large", 1, Money::zero()),
            record(2, "Small", 1, Money::zero()),
        ];
        let (_, summary) = summarize(&PricingConfig::default(), records, today()).unwrap();

        let expected = (15750.0 - 4833.0 + 13125.0 - 3761.0) / (15750.0 + 13125.0) * 100.0;
        assert!((summary.average_margin_pct - expected).abs() < 1e-9);
    }

    #[test]
    fn test_totals_out_of_range_are_an_error() {
        let config = PricingConfig::default();
        // each order alone fits; together they do not
        let big = record(1, "Large", 3_000_000_000_000, Money::zero());
        let priced = PricedOrder::price(&config, big, today()).unwrap();
        let orders = vec![priced.clone(), priced];

        let err = DashboardSummary::from_priced(&orders).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
    }

    #[test]
    fn test_first_pricing_error_aborts() {
        let records = vec![
            record(1, "Large", 1, Money::zero()),
            record(2, "Retired", 1, Money::zero()),
        ];
        let err = summarize(&PricingConfig::default(), records, today()).unwrap_err();
        assert!(matches!(err, CoreError::UnknownProduct(name) if name == "Retired"));
    }
}
