//! # Command Handlers
//!
//! One function per subcommand. Each returns a serializable value; `main`
//! prints it as JSON.
//!
//! ## Write Path
//! ```text
//! OrderArgs ──► NewOrder ──► validate_new_order ──► compute_breakdown ──► insert
//!                                 (fields)           (product exists)
//! ```
//! Pricing runs before the row is written so an unknown product never
//! reaches the store.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use eterno_core::validation::{validate_date_range, validate_new_order};
use eterno_core::{
    compute_breakdown, summarize, Breakdown, DashboardSummary, DateRange, DiscountRate,
    FinancingSurchargeTable, Money, NewOrder, OrderTerms, PricedOrder, PricingConfig,
};
use eterno_db::Database;

// =============================================================================
// Arguments
// =============================================================================

/// Pricing inputs shared by `quote`, `add` and `update`.
#[derive(Debug, Clone, Args)]
pub struct TermsArgs {
    /// Catalog product name (exact match)
    #[arg(long)]
    pub product: String,

    /// Units ordered
    #[arg(long, default_value_t = 1)]
    pub quantity: i64,

    /// Discount in percent (0-100)
    #[arg(long, default_value_t = 0.0)]
    pub discount: f64,

    /// Advance collected, e.g. 5000 or 5000.50
    #[arg(long, default_value = "0")]
    pub advance: Money,

    /// Card installments for the advance (0 = not financed)
    #[arg(long, default_value_t = 0)]
    pub installments_advance: u32,

    /// Card installments for the balance (0 = not financed)
    #[arg(long, default_value_t = 0)]
    pub installments_balance: u32,

    /// Photo session date (YYYY-MM-DD)
    #[arg(long)]
    pub session_date: Option<NaiveDate>,

    /// Balance already collected; omitting it never un-marks a paid order
    #[arg(long)]
    pub paid: bool,
}

impl TermsArgs {
    /// Converts to typed order terms.
    pub fn to_terms(&self) -> Result<OrderTerms> {
        let discount = DiscountRate::from_percent(self.discount)?;

        Ok(OrderTerms {
            product: self.product.clone(),
            quantity: self.quantity,
            discount,
            advance: self.advance,
            installments_advance: self.installments_advance,
            installments_balance: self.installments_balance,
            session_date: self.session_date,
            balance_paid: self.paid,
        })
    }
}

/// Full order input for `add` and `update`.
#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Order date (YYYY-MM-DD); today when omitted
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Customer name
    #[arg(long)]
    pub client: String,

    #[command(flatten)]
    pub terms: TermsArgs,
}

impl OrderArgs {
    pub fn to_new_order(&self, today: NaiveDate) -> Result<NewOrder> {
        Ok(NewOrder {
            order_date: self.date.unwrap_or(today),
            client: self.client.clone(),
            terms: self.terms.to_terms()?,
        })
    }
}

/// Optional order-date filter for `list` and `summary`.
#[derive(Debug, Clone, Default, Args)]
pub struct RangeArgs {
    /// First order date included (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last order date included (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl RangeArgs {
    pub fn to_range(&self) -> Result<DateRange> {
        validate_date_range(self.from, self.to)?;
        Ok(DateRange::new(self.from, self.to))
    }
}

// =============================================================================
// Output
// =============================================================================

/// `summary` output.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub range: DateRange,
    pub today: NaiveDate,
    pub summary: DashboardSummary,
}

/// `delete` / `mark-paid` acknowledgement.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub id: i64,
    pub action: &'static str,
}

// =============================================================================
// Offline Commands
// =============================================================================

/// `catalog`: the pricing tables in effect.
pub fn catalog(pricing: &PricingConfig) -> &PricingConfig {
    pricing
}

/// `quote`: prices terms without storing anything.
pub fn quote(pricing: &PricingConfig, args: &TermsArgs, today: NaiveDate) -> Result<Breakdown> {
    let terms = args.to_terms()?;
    warn_unknown_installments(&pricing.financing, &terms);

    let breakdown = compute_breakdown(pricing, &terms, today)?;
    Ok(breakdown)
}

// =============================================================================
// Store Commands
// =============================================================================

/// `add`: validates, prices and stores a new order.
pub async fn add(
    db: &Database,
    pricing: &PricingConfig,
    args: &OrderArgs,
    today: NaiveDate,
) -> Result<PricedOrder> {
    let order = prepare(pricing, args, today)?;

    let record = db.orders().insert(&order).await.context("Failed to store order")?;
    info!(id = record.id, client = %record.client, "Order added");

    Ok(PricedOrder::price(pricing, record, today)?)
}

/// `update`: replaces an order's inputs.
pub async fn update(
    db: &Database,
    pricing: &PricingConfig,
    id: i64,
    args: &OrderArgs,
    today: NaiveDate,
) -> Result<PricedOrder> {
    let order = prepare(pricing, args, today)?;

    let record = db
        .orders()
        .update(id, &order)
        .await
        .with_context(|| format!("Failed to update order {id}"))?;
    info!(id, "Order updated");

    Ok(PricedOrder::price(pricing, record, today)?)
}

/// `delete`: removes an order.
pub async fn delete(db: &Database, id: i64) -> Result<Ack> {
    db.orders()
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete order {id}"))?;
    info!(id, "Order deleted");

    Ok(Ack {
        id,
        action: "deleted",
    })
}

/// `mark-paid`: records that the balance was collected.
pub async fn mark_paid(
    db: &Database,
    pricing: &PricingConfig,
    id: i64,
    today: NaiveDate,
) -> Result<PricedOrder> {
    let repo = db.orders();
    repo.mark_balance_paid(id)
        .await
        .with_context(|| format!("Failed to mark order {id} as paid"))?;
    info!(id, "Balance marked as paid");

    let record = repo
        .get_by_id(id)
        .await?
        .with_context(|| format!("Order {id} disappeared after update"))?;
    Ok(PricedOrder::price(pricing, record, today)?)
}

/// `list`: stored orders with their breakdowns, newest first.
pub async fn list(
    db: &Database,
    pricing: &PricingConfig,
    args: &RangeArgs,
    today: NaiveDate,
) -> Result<Vec<PricedOrder>> {
    let range = args.to_range()?;
    let records = db.orders().list(&range).await.context("Failed to list orders")?;
    let (priced, _) = summarize(pricing, records, today)?;
    Ok(priced)
}

/// `summary`: dashboard totals over a date range.
pub async fn summary(
    db: &Database,
    pricing: &PricingConfig,
    args: &RangeArgs,
    today: NaiveDate,
) -> Result<SummaryReport> {
    let range = args.to_range()?;
    let records = db.orders().list(&range).await.context("Failed to list orders")?;
    let (_, summary) = summarize(pricing, records, today)?;

    info!(
        orders = summary.order_count,
        pending = summary.pending_count,
        "Summary computed"
    );

    Ok(SummaryReport {
        range,
        today,
        summary,
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// Builds and checks an order before it is written.
fn prepare(pricing: &PricingConfig, args: &OrderArgs, today: NaiveDate) -> Result<NewOrder> {
    let order = args.to_new_order(today)?;
    validate_new_order(&order)?;
    warn_unknown_installments(&pricing.financing, &order.terms);

    // Rejects unknown products before anything is stored
    compute_breakdown(pricing, &order.terms, today)?;
    Ok(order)
}

/// Unknown installment counts price at 0%; flag them to the operator.
fn warn_unknown_installments(table: &FinancingSurchargeTable, terms: &OrderTerms) {
    for (which, count) in [
        ("advance", terms.installments_advance),
        ("balance", terms.installments_balance),
    ] {
        if !table.is_known(count) {
            warn!(
                installments = count,
                financed = which,
                "No surcharge tier for this installment count; pricing it at 0%"
            );
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use eterno_core::{BalanceStatus, CoreError};
    use eterno_db::DbConfig;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn terms(product: &str, quantity: i64) -> TermsArgs {
        TermsArgs {
            product: product.to_string(),
            quantity,
            discount: 0.0,
            advance: Money::zero(),
            installments_advance: 0,
            installments_balance: 0,
            session_date: None,
            paid: false,
        }
    }

    fn order(client: &str, day: u32, terms: TermsArgs) -> OrderArgs {
        OrderArgs {
            date: Some(date(2026, 10, day)),
            client: client.to_string(),
            terms,
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[test]
    fn test_quote_discount_and_financed_advance() {
        let mut args = terms("Large", 2);
        args.discount = 10.0;
        args.advance = Money::from_major(5000);
        args.installments_advance = 3;

        let b = quote(&PricingConfig::default(), &args, today()).unwrap();
        assert_eq!(b.total_sale, Money::from_major(28350));
        assert_eq!(b.surcharge_advance, Money::from_major_minor(287, 50));
    }

    #[test]
    fn test_quote_rejects_bad_input() {
        let pricing = PricingConfig::default();

        let err = quote(&pricing, &terms("Huge", 1), today()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::UnknownProduct(_))
        ));

        let mut args = terms("Large", 1);
        args.discount = 150.0;
        let err = quote(&pricing, &args, today()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidDiscount { .. })
        ));
    }

    #[test]
    fn test_order_date_defaults_to_today() {
        let mut args = order("Ana", 1, terms("Small", 1));
        args.date = None;
        assert_eq!(args.to_new_order(today()).unwrap().order_date, today());
    }

    #[test]
    fn test_range_args_validated() {
        let args = RangeArgs {
            from: Some(date(2026, 10, 2)),
            to: Some(date(2026, 10, 1)),
        };
        assert!(args.to_range().is_err());
        assert_eq!(RangeArgs::default().to_range().unwrap(), DateRange::all());
    }

    #[tokio::test]
    async fn test_add_then_list_and_summary() {
        let db = db().await;
        let pricing = PricingConfig::default();

        let mut small = terms("Small", 1);
        small.advance = Money::from_major(13125);
        add(&db, &pricing, &order("Ana", 1, terms("Large", 1)), today())
            .await
            .unwrap();
        add(&db, &pricing, &order("Luis", 5, small), today())
            .await
            .unwrap();

        let listed = list(&db, &pricing, &RangeArgs::default(), today()).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].record.client, "Luis");

        let report = summary(&db, &pricing, &RangeArgs::default(), today())
            .await
            .unwrap();
        assert_eq!(report.summary.order_count, 2);
        assert_eq!(report.summary.total_sales, Money::from_major(15750 + 13125));
        assert_eq!(report.summary.pending_count, 1);
        assert_eq!(report.summary.pending_balance_total, Money::from_major(15750));

        let october_5 = RangeArgs {
            from: Some(date(2026, 10, 5)),
            to: None,
        };
        let report = summary(&db, &pricing, &october_5, today()).await.unwrap();
        assert_eq!(report.summary.order_count, 1);
    }

    #[tokio::test]
    async fn test_add_rejects_before_storing() {
        let db = db().await;
        let pricing = PricingConfig::default();

        assert!(add(&db, &pricing, &order("Ana", 1, terms("Huge", 1)), today())
            .await
            .is_err());
        assert!(add(&db, &pricing, &order("  ", 1, terms("Large", 1)), today())
            .await
            .is_err());
        assert!(add(&db, &pricing, &order("Ana", 1, terms("Large", 0)), today())
            .await
            .is_err());

        assert_eq!(db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_mark_paid_and_delete() {
        let db = db().await;
        let pricing = PricingConfig::default();

        let added = add(&db, &pricing, &order("Ana", 1, terms("Large", 1)), today())
            .await
            .unwrap();
        let id = added.record.id;
        assert_eq!(added.breakdown.balance_status, BalanceStatus::Pending);

        let updated = update(&db, &pricing, id, &order("Ana", 2, terms("Small", 2)), today())
            .await
            .unwrap();
        assert_eq!(updated.record.product, "Small");
        assert_eq!(updated.breakdown.subtotal, Money::from_major(26250));

        let paid = mark_paid(&db, &pricing, id, today()).await.unwrap();
        assert!(paid.record.balance_paid);
        assert_eq!(paid.breakdown.balance_status, BalanceStatus::Settled);

        let ack = delete(&db, id).await.unwrap();
        assert_eq!(ack.id, id);
        assert!(delete(&db, id).await.is_err());
        assert!(mark_paid(&db, &pricing, id, today()).await.is_err());
    }

    #[tokio::test]
    async fn test_update_without_paid_keeps_order_settled() {
        let db = db().await;
        let pricing = PricingConfig::default();

        let mut pending = terms("Large", 1);
        pending.session_date = Some(date(2026, 12, 1));
        let added = add(&db, &pricing, &order("Ana", 1, pending.clone()), today())
            .await
            .unwrap();
        let id = added.record.id;
        mark_paid(&db, &pricing, id, today()).await.unwrap();

        let updated = update(&db, &pricing, id, &order("Ana", 1, pending), today())
            .await
            .unwrap();
        assert!(updated.record.balance_paid);
        assert_eq!(updated.breakdown.balance_status, BalanceStatus::Settled);
    }

    #[test]
    fn test_quote_huge_quantity_is_an_error() {
        let err = quote(&PricingConfig::default(), &terms("Large", i64::MAX), today()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::AmountOverflow { .. })
        ));
    }
}
