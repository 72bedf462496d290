//! # Order Repository
//!
//! Database operations for orders.
//!
//! ## Key Operations
//! - CRUD on order rows
//! - Dashboard listing with an optional order-date range
//! - Marking a balance as collected
//!
//! ## What Is Stored
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  orders                                                                 │
//! │  id │ order_date │ client │ product │ quantity │ discount_bps │ ...    │
//! │     │            │        │         │          │              │        │
//! │  Inputs only. total_sale, costs, surcharges, profit and the pending    │
//! │  flag are never stored: they depend on the pricing config and on      │
//! │  today, so they are recomputed on every read.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use eterno_core::{DateRange, NewOrder, OrderRecord};

/// Column list shared by every SELECT, in `OrderRecord` field order.
const ORDER_COLUMNS: &str = r#"
    id,
    order_date,
    client,
    product,
    quantity,
    discount_bps,
    advance_cents,
    installments_advance,
    installments_balance,
    session_date,
    balance_paid,
    created_at
"#;

/// Repository for order database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.orders();
///
/// let stored = repo.insert(&new_order).await?;
/// let found = repo.get_by_id(stored.id).await?;
/// repo.mark_balance_paid(stored.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new order.
    ///
    /// ## Returns
    /// * `Ok(OrderRecord)` - Stored row with its generated id and `created_at`
    /// * `Err(DbError::ConstraintViolation)` - Row failed a CHECK constraint
    pub async fn insert(&self, order: &NewOrder) -> DbResult<OrderRecord> {
        debug!(client = %order.client, product = %order.terms.product, "Inserting order");

        let terms = &order.terms;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                order_date, client, product, quantity,
                discount_bps, advance_cents,
                installments_advance, installments_balance,
                session_date, balance_paid, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6,
                ?7, ?8,
                ?9, ?10, ?11
            )
            "#,
        )
        .bind(order.order_date)
        .bind(order.client.trim())
        .bind(&terms.product)
        .bind(terms.quantity)
        .bind(terms.discount.bps())
        .bind(terms.advance.cents())
        .bind(terms.installments_advance)
        .bind(terms.installments_balance)
        .bind(terms.session_date)
        .bind(terms.balance_paid)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, "Order inserted");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    /// Replaces every input field of an existing order.
    ///
    /// `id` and `created_at` are kept. `balance_paid` can only be raised:
    /// an order already marked paid stays paid whatever `order` says.
    ///
    /// ## Returns
    /// * `Ok(OrderRecord)` - Row as stored after the update
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    pub async fn update(&self, id: i64, order: &NewOrder) -> DbResult<OrderRecord> {
        debug!(id, "Updating order");

        let terms = &order.terms;

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                order_date = ?2,
                client = ?3,
                product = ?4,
                quantity = ?5,
                discount_bps = ?6,
                advance_cents = ?7,
                installments_advance = ?8,
                installments_balance = ?9,
                session_date = ?10,
                balance_paid = balance_paid OR ?11
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(order.order_date)
        .bind(order.client.trim())
        .bind(&terms.product)
        .bind(terms.quantity)
        .bind(terms.discount.bps())
        .bind(terms.advance.cents())
        .bind(terms.installments_advance)
        .bind(terms.installments_balance)
        .bind(terms.session_date)
        .bind(terms.balance_paid)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    /// Gets an order by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(OrderRecord))` - Order found
    /// * `Ok(None)` - Order not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<OrderRecord>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1");

        let order = sqlx::query_as::<_, OrderRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Deletes an order.
    ///
    /// Hard delete: orders carry no references from other tables.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Lists orders whose order date falls in `range` (inclusive, either end
    /// open), newest first.
    ///
    /// Ties on the same date are broken by id, most recent insert first.
    pub async fn list(&self, range: &DateRange) -> DbResult<Vec<OrderRecord>> {
        debug!(from = ?range.from, to = ?range.to, "Listing orders");

        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE (?1 IS NULL OR order_date >= ?1)
              AND (?2 IS NULL OR order_date <= ?2)
            ORDER BY order_date DESC, id DESC
            "#
        );

        let orders = sqlx::query_as::<_, OrderRecord>(&sql)
            .bind(range.from)
            .bind(range.to)
            .fetch_all(&self.pool)
            .await?;

        debug_assert!(orders.iter().all(|o| range.contains(o.order_date)));
        debug!(count = orders.len(), "Listed orders");
        Ok(orders)
    }

    /// Marks an order's balance as collected.
    ///
    /// Idempotent on an order that is already marked.
    pub async fn mark_balance_paid(&self, id: i64) -> DbResult<()> {
        debug!(id, "Marking balance paid");

        let result = sqlx::query("UPDATE orders SET balance_paid = 1 WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }

    /// Counts stored orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
