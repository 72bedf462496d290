//! Cross-module properties of the pricing engine, exercised through the
//! public API only.

use chrono::{NaiveDate, TimeZone, Utc};
use eterno_core::{
    compute_breakdown, summarize, CoreError, DashboardSummary, DiscountRate, Money, OrderRecord,
    OrderTerms, PricingConfig,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn config() -> PricingConfig {
    PricingConfig::default()
}

#[test]
fn production_cost_is_linear_in_quantity() {
    let config = config();
    for product in config.products.names() {
        let one = compute_breakdown(&config, &OrderTerms::new(product, 1), today()).unwrap();
        for quantity in [2, 3, 7, 50] {
            let many =
                compute_breakdown(&config, &OrderTerms::new(product, quantity), today()).unwrap();
            assert_eq!(
                Some(many.production_cost),
                one.production_cost.multiply_quantity(quantity)
            );
            assert_eq!(Some(many.subtotal), one.subtotal.multiply_quantity(quantity));
        }
    }
}

#[test]
fn discount_bounds() {
    let config = config();
    for product in ["Large", "Small"] {
        let none = compute_breakdown(&config, &OrderTerms::new(product, 3), today()).unwrap();
        assert_eq!(none.total_sale, none.subtotal);

        let full = OrderTerms::new(product, 3).with_discount(DiscountRate::from_bps(10_000));
        let full = compute_breakdown(&config, &full, today()).unwrap();
        assert_eq!(full.total_sale, Money::zero());
        assert_eq!(full.profit_margin_pct, 0.0);
    }
}

#[test]
fn profit_identity_and_determinism() {
    let config = config();
    let cases = [
        OrderTerms::new("Large", 1),
        OrderTerms::new("Large", 2)
            .with_discount(DiscountRate::from_bps(1000))
            .with_advance(Money::from_major(5000), 3),
        OrderTerms::new("Small", 4)
            .with_discount(DiscountRate::from_bps(333))
            .with_advance(Money::from_major_minor(1234, 56), 12)
            .with_balance_installments(10),
        OrderTerms::new("Small", 1)
            .with_advance(Money::from_major(20000), 2)
            .with_balance_installments(6),
    ];

    for terms in &cases {
        let first = compute_breakdown(&config, terms, today()).unwrap();
        let second = compute_breakdown(&config, terms, today()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.profit, first.total_sale - first.total_cost);
        assert_eq!(
            first.total_cost,
            first.production_cost + first.surcharge_advance + first.surcharge_balance
        );
        assert_eq!(first.balance_remaining, first.total_sale - first.advance);
        assert_eq!(
            first.production_costs.values().copied().sum::<Money>(),
            first.production_cost
        );
    }
}

#[test]
fn balance_settles_on_session_day() {
    let config = config();
    let session = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
    let terms = OrderTerms::new("Large", 1)
        .with_advance(Money::from_major(13750), 0)
        .with_session_date(session);

    let before = compute_breakdown(&config, &terms, session.pred_opt().unwrap()).unwrap();
    let on_day = compute_breakdown(&config, &terms, session).unwrap();

    assert_eq!(before.balance_remaining, Money::from_major(2000));
    assert!(before.balance_pending);
    assert!(!on_day.balance_pending);
    // only the flag depends on today
    assert_eq!(before.profit, on_day.profit);
}

#[test]
fn unknown_installments_cost_nothing() {
    let config = config();
    assert!(!config.financing.is_known(4));

    let terms = OrderTerms::new("Small", 1)
        .with_advance(Money::from_major(3000), 4)
        .with_balance_installments(4);
    let b = compute_breakdown(&config, &terms, today()).unwrap();

    assert_eq!(b.total_surcharge, Money::zero());
    assert_eq!(b.total_cost, b.production_cost);
}

#[test]
fn summary_matches_individual_breakdowns() {
    let config = config();
    let created = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).unwrap();
    let record = |id: i64, product: &str, quantity: i64, discount_bps: u32, advance: i64| OrderRecord {
        id,
        order_date: NaiveDate::from_ymd_opt(2026, 10, id as u32).unwrap(),
        client: format!("Client {id}"),
        product: product.to_string(),
        quantity,
        discount_bps,
        advance_cents: advance,
        installments_advance: 3,
        installments_balance: 6,
        session_date: None,
        balance_paid: id % 2 == 0,
        created_at: created,
    };
    let records = vec![
        record(1, "Large", 1, 0, 500_000),
        record(2, "Small", 2, 1500, 0),
        record(3, "Large", 3, 500, 1_000_000),
        record(4, "Small", 1, 0, 1_312_500),
    ];

    let (priced, summary) = summarize(&config, records, today()).unwrap();

    let sales: Money = priced.iter().map(|p| p.breakdown.total_sale).sum();
    let profit: Money = priced.iter().map(|p| p.breakdown.profit).sum();
    assert_eq!(summary.total_sales, sales);
    assert_eq!(summary.total_profit, profit);
    assert_eq!(summary.total_profit, summary.total_sales - summary.total_costs);
    assert_eq!(summary.order_count, 4);

    let units: i64 = summary.by_product.values().map(|t| t.units).sum();
    assert_eq!(units, 7);

    // even ids are marked paid
    assert_eq!(summary.pending_count, 2);
    assert_eq!(summary, DashboardSummary::from_priced(&priced).unwrap());
}

#[test]
fn out_of_range_quantities_fail_cleanly() {
    let config = config();
    for quantity in [10_000_000_000_000, i64::MAX / 2, i64::MAX] {
        let result = compute_breakdown(&config, &OrderTerms::new("Large", quantity), today());
        assert!(matches!(result, Err(CoreError::AmountOverflow { .. })));
    }
}
